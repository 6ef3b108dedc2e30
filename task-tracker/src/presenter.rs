//! User-facing text. Nothing outside this module decides what the user reads.

use crate::error::Error;
use crate::router::{COMMANDS, PREFIX};
use crate::session::Outcome;
use crate::task::Task;
use chrono::{DateTime, Local, TimeZone, Utc};
use std::fmt::Display;

pub const BANNER: &str = "---Task list---";
pub const PROMPT: &str = "> ";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Text for a handled command, or `None` when nothing should be printed.
pub fn outcome(outcome: &Outcome) -> Option<String> {
    let text = match outcome {
        Outcome::Added(task) => format!("Task added successfully (ID: {})", task.id()),
        Outcome::Updated(task) => format!("Task updated successfully (ID: {})", task.id()),
        Outcome::Deleted(task) => format!("Task deleted successfully (ID: {})", task.id()),
        Outcome::Marked(task) => format!(
            "Task marked successfully (ID: {}, Status: {})",
            task.id(),
            task.status()
        ),
        Outcome::AlreadyMarked(task) => {
            format!("Task already {} (ID: {})", task.status(), task.id())
        }
        Outcome::Listed { tasks, status } => match (tasks.is_empty(), status) {
            (true, None) => "Task list empty".to_string(),
            (true, Some(status)) => format!("Task list with status '{status}' empty"),
            (false, _) => tasks
                .iter()
                .map(|task| task_line(task, &Local))
                .collect::<Vec<_>>()
                .join("\n"),
        },
        Outcome::Help => help(),
        Outcome::Exit => return None,
    };
    Some(text)
}

/// Text for a command that failed.
pub fn error(error: &Error) -> String {
    let text = match error {
        Error::InvalidCommand => "Invalid command",
        Error::InvalidParameter => "Invalid parameter",
        Error::NotFound(_) | Error::InvalidInput | Error::InvalidStatus(_) => "Invalid value",
        Error::NoFreeId => "Task list full",
        Error::Storage(_) => "Failed to access task storage",
    };
    text.to_string()
}

pub fn help() -> String {
    let mut text = String::from("---Help---");
    for spec in COMMANDS {
        text.push('\n');
        if spec.usage.is_empty() {
            text.push_str(&format!("{PREFIX} {}", spec.name));
        } else {
            text.push_str(&format!("{PREFIX} {} {}", spec.name, spec.usage));
        }
    }
    text
}

/// One listing line, with timestamps shown in `tz`.
pub fn task_line<Tz>(task: &Task, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let updated_at = task
        .updated_at()
        .map(|at| timestamp(at, tz))
        .unwrap_or_else(|| "None".to_string());
    format!(
        "{}. {} | {} | created at {} | updated at {}",
        task.id(),
        task.description(),
        task.status(),
        timestamp(task.created_at(), tz),
        updated_at
    )
}

fn timestamp<Tz>(at: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.with_timezone(tz).format(TIMESTAMP_FORMAT).to_string()
}
