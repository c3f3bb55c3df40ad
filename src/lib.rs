//! A small personal collection of utilities.
//!
//! - [`Stack`]: a generic singly-linked LIFO container.
//! - [`dirs::DirStack`]: `pushd`/`popd` for the process working directory.
//! - [`errors`]: wrap an error with a higher level message.
//! - [`store`]: a key/value store with pluggable drivers.
//!
//! The [`Interpreter`] exposes the stack and directory stack as builtin
//! commands; the `playground` binary drives it.

mod builtin;
pub mod command;
pub mod dirs;
pub mod errors;
mod interpreter;
mod lexer;
pub mod session;
pub mod stack;
pub mod store;

/// Just a convenient re-export of the interactive command runner.
///
/// See [`Interpreter`] for the high-level API and examples.
pub use interpreter::Interpreter;
pub use lexer::LexingError;
pub use stack::Stack;
