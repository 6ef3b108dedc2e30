use crate::error::Error;
use crate::presenter;
use crate::repository::{MarkOutcome, TaskRepository};
use crate::router::{self, Command};
use crate::store::Store;
use crate::task::{Clock, Status, Task};
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// What a successfully handled command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Added(Task),
    Updated(Task),
    Deleted(Task),
    Marked(Task),
    AlreadyMarked(Task),
    Listed {
        tasks: Vec<Task>,
        status: Option<Status>,
    },
    Help,
    Exit,
}

/// Command-response loop over a store.
///
/// Each command gets its own freshly built [`TaskRepository`], so nothing is carried
/// between lines except what the store persisted.
pub struct Session<S: Store, C: Clock> {
    store: S,
    clock: C,
}

impl<S: Store, C: Clock> Session<S, C> {
    pub fn new(store: S, clock: C) -> Self {
        Self { store, clock }
    }

    /// Parses and runs a single line.
    pub fn handle_line(&self, line: &str) -> Result<Outcome, Error> {
        let command = router::parse(line)?;
        debug!(?command, "Parsed command");
        self.execute(command)
    }

    pub fn execute(&self, command: Command) -> Result<Outcome, Error> {
        let repository = TaskRepository::new(&self.store, &self.clock);
        let outcome = match command {
            Command::Add { description } => Outcome::Added(repository.add(&description)?),
            Command::Update { id, description } => {
                Outcome::Updated(repository.update(&id, &description)?)
            }
            Command::Delete { id } => Outcome::Deleted(repository.delete(&id)?),
            Command::Mark { id, status } => match repository.mark(&id, &status)? {
                MarkOutcome::Marked(task) => Outcome::Marked(task),
                MarkOutcome::Unchanged(task) => Outcome::AlreadyMarked(task),
            },
            Command::List { status } => Outcome::Listed {
                tasks: repository.filter(status)?,
                status,
            },
            Command::Help => Outcome::Help,
            Command::Exit => Outcome::Exit,
        };
        Ok(outcome)
    }

    /// Reads commands from `input` until `exit` or end of input, writing one response
    /// per command to `output`.
    ///
    /// Lines that are not valid UTF-8 are decoded lossily and handled like any other
    /// line, so they cannot end the session.
    pub fn run<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> std::io::Result<()> {
        writeln!(output, "{}", presenter::BANNER)?;
        let mut buffer = Vec::new();
        loop {
            write!(output, "{}", presenter::PROMPT)?;
            output.flush()?;
            buffer.clear();
            if input.read_until(b'\n', &mut buffer)? == 0 {
                info!("End of input, closing session");
                writeln!(output)?;
                break;
            }
            let line = String::from_utf8_lossy(&buffer);
            match self.handle_line(&line) {
                Ok(Outcome::Exit) => {
                    info!("Exit requested, closing session");
                    break;
                }
                Ok(outcome) => {
                    if let Some(text) = presenter::outcome(&outcome) {
                        writeln!(output, "{text}")?;
                    }
                }
                Err(e) => {
                    debug!(error = %e, "Command failed");
                    writeln!(output, "{}", presenter::error(&e))?;
                }
            }
        }
        Ok(())
    }
}
