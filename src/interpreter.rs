use crate::builtin::{Dirs, Echo, Empty, Exit, Peek, Pop, Popd, Push, Pushd, Pwd, Show};
use crate::command::{CommandFactory, ExitCode};
use crate::lexer;
use crate::session::Session;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;
use tracing::{debug, warn};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate, see the builtin module.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A minimal command interpreter over a [`Session`].
///
/// The interpreter holds the session and a list of [`CommandFactory`] objects
/// that are queried to create commands by name. See [`Default`] for the
/// builtins included out of the box.
///
/// Example
/// ```
/// use cookies::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// sh.execute_line(r#"push "Thing 1" "Thing 2""#, &mut out).unwrap();
/// sh.execute_line("show", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "Thing 2, Thing 1\n");
/// ```
pub struct Interpreter {
    session: Session,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self {
            session: Session::new(),
            commands,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Run a single command invocation by name with arguments, printing to
    /// standard output.
    pub fn run(&mut self, name: &str, args: &[&str]) -> anyhow::Result<ExitCode> {
        let mut stdout = std::io::stdout().lock();
        let code = self.run_with_output(name, args, &mut stdout)?;
        stdout.flush()?;
        Ok(code)
    }

    /// Run a single command invocation, writing its output to `stdout`.
    ///
    /// Returns the command's exit code or an error if no factory knows `name`.
    pub fn run_with_output(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                let code = cmd.execute(stdout, &mut self.session)?;
                debug!(name, code, "command finished");
                return Ok(code);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Split `line` into words and run the resulting command.
    ///
    /// A blank line does nothing and succeeds.
    pub fn execute_line(&mut self, line: &str, stdout: &mut dyn Write) -> anyhow::Result<ExitCode> {
        let words = lexer::split_into_words(line)?;
        let Some((name, args)) = words.split_first() else {
            return Ok(0);
        };
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        self.run_with_output(name, &args, stdout)
    }

    /// Read-Eval-Print Loop over standard input, until `exit`, Ctrl-C or EOF.
    pub fn repl(&mut self) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;

        while !self.session.should_exit {
            match rl.readline("🍪$ ") {
                Ok(line) => {
                    rl.add_history_entry(line.as_str())?;
                    let mut stdout = std::io::stdout().lock();
                    if let Err(e) = self.execute_line(&line, &mut stdout) {
                        warn!(error = %e, "line failed");
                        println!("{:#}", e);
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    break;
                }
                Err(err) => {
                    println!("Error: {:?}", err);
                    break;
                }
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    /// Interpreter knowing every builtin of the playground.
    fn default() -> Self {
        Self::new(vec![
            Box::new(Factory::<Push>::default()),
            Box::new(Factory::<Pop>::default()),
            Box::new(Factory::<Peek>::default()),
            Box::new(Factory::<Show>::default()),
            Box::new(Factory::<Empty>::default()),
            Box::new(Factory::<Pushd>::default()),
            Box::new(Factory::<Popd>::default()),
            Box::new(Factory::<Dirs>::default()),
            Box::new(Factory::<Pwd>::default()),
            Box::new(Factory::<Echo>::default()),
            Box::new(Factory::<Exit>::default()),
        ])
    }
}
