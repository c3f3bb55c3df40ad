use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::interpreter::Factory;
use crate::session::Session;
use anyhow::{Context, Result};
use argh::{EarlyExit, FromArgs};
use std::io::Write;

/// Built-in commands known to the playground at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// in-process against the [`Session`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "push" or "pushd".
    fn name() -> &'static str;

    /// Executes the command.
    ///
    /// Return value should follow shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        match <T as BuiltinCommand>::execute(*self, stdout, session) {
            Ok(x) => Ok(x),
            Err(e) => {
                writeln!(stdout, "{}: {:#}", T::name(), e)?;
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(self: Box<Self>, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        stdout.write_all(self.output.as_bytes())?;
        Ok(if self.is_error { 1 } else { 0 })
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            Some(match T::from_args(&[name], args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

#[derive(FromArgs)]
/// Push items onto the stack, in the order given.
pub struct Push {
    #[argh(positional, greedy)]
    /// items to push; the last one ends up on top.
    pub items: Vec<String>,
}

impl BuiltinCommand for Push {
    fn name() -> &'static str {
        "push"
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        session.things.extend(self.items);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove the top item from the stack and print it.
/// Exits with status 1 when the stack is empty.
pub struct Pop {}

impl BuiltinCommand for Pop {
    fn name() -> &'static str {
        "pop"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        match session.things.pop() {
            Some(item) => {
                writeln!(stdout, "{}", item)?;
                Ok(0)
            }
            None => Ok(1),
        }
    }
}

#[derive(FromArgs)]
/// Print the top item of the stack without removing it.
/// Exits with status 1 when the stack is empty.
pub struct Peek {}

impl BuiltinCommand for Peek {
    fn name() -> &'static str {
        "peek"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        match session.things.peek() {
            Some(item) => {
                writeln!(stdout, "{}", item)?;
                Ok(0)
            }
            None => Ok(1),
        }
    }
}

#[derive(FromArgs)]
/// Print every item on the stack, top first.
pub struct Show {
    #[argh(option, short = 'd', default = "String::from(\", \")")]
    /// separator placed between items (default ", "); inside double quotes
    /// \n and \t stand for a line feed and a tab.
    pub delimiter: String,
}

impl BuiltinCommand for Show {
    fn name() -> &'static str {
        "show"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        writeln!(stdout, "{}", session.things.join_string(&self.delimiter))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether the stack is empty.
/// Exits with status 0 when empty, 1 otherwise.
pub struct Empty {}

impl BuiltinCommand for Empty {
    fn name() -> &'static str {
        "empty"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let empty = session.things.is_empty();
        writeln!(stdout, "Empty: {}", empty)?;
        Ok(if empty { 0 } else { 1 })
    }
}

#[derive(FromArgs)]
/// Remember the current directory, then change to another one.
pub struct Pushd {
    #[argh(positional)]
    /// directory to switch to; absolute or relative to the current directory.
    pub target: String,
}

impl BuiltinCommand for Pushd {
    fn name() -> &'static str {
        "pushd"
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        session.dirs.pushd(&self.target)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Change back to the most recently remembered directory.
pub struct Popd {}

impl BuiltinCommand for Popd {
    fn name() -> &'static str {
        "popd"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let dir = session.dirs.popd()?;
        writeln!(stdout, "{}", dir.display())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// List remembered directories, most recent first.
pub struct Dirs {}

impl BuiltinCommand for Dirs {
    fn name() -> &'static str {
        "dirs"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        for dir in session.dirs.dirs() {
            writeln!(stdout, "{}", dir.display())?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the current working directory to standard output.
pub struct Pwd {}

impl BuiltinCommand for Pwd {
    fn name() -> &'static str {
        "pwd"
    }

    fn execute(self, stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        let cwd = session
            .dirs
            .current_dir()
            .context("can't determine working directory")?;
        writeln!(stdout, "{}", cwd.to_string_lossy())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// write the arguments to standard output, separated by spaces.
/// by default, a trailing newline is printed.
pub struct Echo {
    #[argh(switch, short = 'n')]
    /// do not output the trailing newline.
    pub no_newline: bool,

    #[argh(positional, greedy)]
    /// values to print as-is, separated by spaces.
    pub args: Vec<String>,
}

impl BuiltinCommand for Echo {
    fn name() -> &'static str {
        "echo"
    }

    fn execute(self, stdout: &mut dyn Write, _session: &mut Session) -> Result<ExitCode> {
        let s = self.args.join(" ");
        if self.no_newline {
            write!(stdout, "{}", s)?;
        } else {
            writeln!(stdout, "{}", s)?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Leave the interactive playground.
pub struct Exit {}

impl BuiltinCommand for Exit {
    fn name() -> &'static str {
        "exit"
    }

    fn execute(self, _stdout: &mut dyn Write, session: &mut Session) -> Result<ExitCode> {
        session.should_exit = true;
        Ok(0)
    }
}
