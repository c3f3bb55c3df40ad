use argh::FromArgs;
use cookies::{Interpreter, Stack};
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Environment variable consulted when `--log-level` isn't given.
const LOG_ENV: &str = "COOKIES_LOG";

#[derive(FromArgs)]
/// Scratch space for playing with the cookies utilities.
struct Playground {
    #[argh(option)]
    /// tracing filter, e.g. "debug" or "cookies=trace"; falls back to $COOKIES_LOG, then "warn".
    log_level: Option<String>,

    #[argh(subcommand)]
    command: Option<Command>,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Repl(Repl),
    Run(Run),
}

#[derive(FromArgs)]
/// Start an interactive session.
#[argh(subcommand, name = "repl")]
struct Repl {}

#[derive(FromArgs)]
/// Run a single builtin and exit with its status.
#[argh(subcommand, name = "run")]
struct Run {
    #[argh(positional)]
    /// builtin to run, e.g. "echo".
    name: String,

    #[argh(positional, greedy)]
    /// arguments passed to the builtin.
    args: Vec<String>,
}

/// Picks the tracing filter: `--log-level` first, then `$COOKIES_LOG`, then `warn`.
///
/// A bad `--log-level` is an error. A bad `$COOKIES_LOG` falls back to `warn`
/// and hands back a message to log once the subscriber is up.
fn log_filter(
    level: Option<&str>,
    env_value: Option<&str>,
) -> anyhow::Result<(EnvFilter, Option<String>)> {
    if let Some(level) = level {
        let filter = EnvFilter::try_new(level)
            .map_err(|e| anyhow::anyhow!("invalid --log-level '{}': {}", level, e))?;
        return Ok((filter, None));
    }
    match env_value.map(EnvFilter::try_new) {
        Some(Ok(filter)) => Ok((filter, None)),
        Some(Err(e)) => {
            let msg = format!("ignoring invalid {} '{}': {}", LOG_ENV, env_value.unwrap_or_default(), e);
            Ok((EnvFilter::new("warn"), Some(msg)))
        }
        None => Ok((EnvFilter::new("warn"), None)),
    }
}

fn init_logging(level: Option<&str>) -> anyhow::Result<()> {
    let env_value = std::env::var(LOG_ENV).ok();
    let (filter, fallback) = log_filter(level, env_value.as_deref())?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    if let Some(msg) = fallback {
        warn!("{}", msg);
    }
    Ok(())
}

fn demo() {
    // Write play code here...

    println!();
    println!("All work and no play makes Jack a dull boy,");
    println!("All play and no work makes Jack a mere toy.");
    println!();

    let mut s = Stack::new();

    s.push("Thing 1");
    s.push("Thing 2");
    s.push("Thing 3");

    println!("{}", s.join_string("\n"));
    println!();

    let thing3 = s.pop();
    println!("{} exists: {}", thing3.unwrap_or_default(), thing3.is_some());
    println!();

    println!("{}", s.join_string("\n"));
    println!();

    while s.pop().is_some() {}

    println!("Empty: {}", s.is_empty());
}

fn main() -> anyhow::Result<ExitCode> {
    let args: Playground = argh::from_env();
    init_logging(args.log_level.as_deref())?;

    match args.command {
        None => demo(),
        Some(Command::Repl(_)) => Interpreter::default()
            .repl()
            .map_err(|e| anyhow::anyhow!("readline failed: {}", e))?,
        Some(Command::Run(run)) => {
            let argv: Vec<&str> = run.args.iter().map(String::as_str).collect();
            let code = Interpreter::default().run(&run.name, &argv)?;
            return Ok(ExitCode::from(u8::try_from(code).unwrap_or(1)));
        }
    }
    Ok(ExitCode::SUCCESS)
}
