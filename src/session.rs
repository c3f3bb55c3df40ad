use crate::dirs::DirStack;
use crate::stack::Stack;

/// Mutable state shared by every builtin run from one interpreter.
///
/// - `things`: the scratch stack manipulated by `push`, `pop`, `peek` and `show`.
/// - `dirs`: the directory stack behind `pushd`, `popd` and `dirs`.
/// - `should_exit`: set by `exit`; the REPL stops once it sees it.
#[derive(Debug, Default)]
pub struct Session {
    pub things: Stack<String>,
    pub dirs: DirStack,
    pub should_exit: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
