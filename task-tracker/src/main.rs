use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use task_tracker::config::Config;
use task_tracker::router::PREFIX;
use task_tracker::{JsonFileStore, Outcome, Session, SystemClock, presenter};
use tracing::debug;

/// Track tasks from the command line.
///
/// Without a command an interactive session starts; otherwise the given words are run
/// as a single `task ...` command.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Configuration file to use instead of ./task-tracker.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Task file, overriding the configured `data_file`
    #[arg(long)]
    file: Option<PathBuf>,

    /// Command to run once, e.g. `add buy milk`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    command: Vec<String>,
}

fn main() -> anyhow::Result<ExitCode> {
    let args = Cli::parse();
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(file) = args.file {
        config.data_file = file;
    }

    tracing_subscriber::fmt()
        .with_max_level(config.max_level()?)
        .with_writer(std::io::stderr)
        .init();
    debug!(?config, "Loaded configuration");

    let session = Session::new(JsonFileStore::new(&config.data_file), SystemClock);

    if args.command.is_empty() {
        session.run(std::io::stdin().lock(), std::io::stdout().lock())?;
        return Ok(ExitCode::SUCCESS);
    }

    let line = format!("{PREFIX} {}", args.command.join(" "));
    match session.handle_line(&line) {
        Ok(Outcome::Exit) => Ok(ExitCode::SUCCESS),
        Ok(outcome) => {
            if let Some(text) = presenter::outcome(&outcome) {
                println!("{text}");
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            debug!(error = %e, "Command failed");
            println!("{}", presenter::error(&e));
            Ok(ExitCode::FAILURE)
        }
    }
}
