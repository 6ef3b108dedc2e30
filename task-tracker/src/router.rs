//! Turns one line of input into a [`Command`].
//!
//! Every recognized command is described by a [`CommandSpec`] in [`COMMANDS`]. A single
//! routine, [`parse`], checks a tokenized line against that table:
//!
//! - an unknown prefix or keyword is an [`Error::InvalidCommand`];
//! - a known keyword with the wrong number of tokens, or an unknown sub-keyword, is an
//!   [`Error::InvalidParameter`]. Arity is always checked before sub-keywords.

use crate::error::Error;
use crate::task::Status;

/// Keyword every command line starts with.
pub const PREFIX: &str = "task";

/// How many tokens (prefix and keyword included) a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// More than this many tokens; the rest is free text.
    Floor(usize),
    /// Exactly this many tokens.
    Exact(usize),
}

impl Arity {
    fn accepts(&self, token_count: usize) -> bool {
        match *self {
            Arity::Floor(floor) => token_count > floor,
            Arity::Exact(exact) => token_count == exact,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Add,
    Delete,
    Update,
    Mark,
    List,
    Help,
    Exit,
}

/// Optional trailing keyword with its own exact token count.
#[derive(Debug, Clone, Copy)]
pub struct SubKeyword {
    pub value: &'static str,
    pub arity: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub kind: CommandKind,
    pub arity: Arity,
    pub sub_keywords: &'static [SubKeyword],
    /// Argument summary shown by `help`.
    pub usage: &'static str,
}

const LIST_FILTERS: &[SubKeyword] = &[
    SubKeyword {
        value: "todo",
        arity: 3,
    },
    SubKeyword {
        value: "in-progress",
        arity: 3,
    },
    SubKeyword {
        value: "done",
        arity: 3,
    },
];

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "add",
        kind: CommandKind::Add,
        arity: Arity::Floor(2),
        sub_keywords: &[],
        usage: "(Task)",
    },
    CommandSpec {
        name: "delete",
        kind: CommandKind::Delete,
        arity: Arity::Exact(3),
        sub_keywords: &[],
        usage: "(Task ID)",
    },
    CommandSpec {
        name: "update",
        kind: CommandKind::Update,
        arity: Arity::Floor(3),
        sub_keywords: &[],
        usage: "(Task ID) (New task)",
    },
    CommandSpec {
        name: "mark",
        kind: CommandKind::Mark,
        arity: Arity::Exact(4),
        sub_keywords: &[],
        usage: "(Task ID) (New status [todo / in-progress / done])",
    },
    CommandSpec {
        name: "list",
        kind: CommandKind::List,
        arity: Arity::Exact(2),
        sub_keywords: LIST_FILTERS,
        usage: "[todo / in-progress / done]",
    },
    CommandSpec {
        name: "help",
        kind: CommandKind::Help,
        arity: Arity::Exact(2),
        sub_keywords: &[],
        usage: "",
    },
    CommandSpec {
        name: "exit",
        kind: CommandKind::Exit,
        arity: Arity::Exact(2),
        sub_keywords: &[],
        usage: "",
    },
];

/// A validated command with its arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add { description: String },
    Delete { id: String },
    Update { id: String, description: String },
    Mark { id: String, status: String },
    List { status: Option<Status> },
    Help,
    Exit,
}

pub fn lookup(name: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.name == name)
}

/// Validates `line` against the command table.
pub fn parse(line: &str) -> Result<Command, Error> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 || tokens[0] != PREFIX {
        return Err(Error::InvalidCommand);
    }
    let spec = lookup(tokens[1]).ok_or(Error::InvalidCommand)?;
    check_shape(spec, &tokens)?;
    Ok(build(spec.kind, &tokens[2..]))
}

fn check_shape(spec: &CommandSpec, tokens: &[&str]) -> Result<(), Error> {
    if spec.arity.accepts(tokens.len()) {
        return Ok(());
    }
    let candidates: Vec<&SubKeyword> = spec
        .sub_keywords
        .iter()
        .filter(|sub| sub.arity == tokens.len())
        .collect();
    if candidates.is_empty() {
        return Err(Error::InvalidParameter);
    }
    // Sub-keywords directly follow the prefix and command name.
    let keyword = tokens[2];
    if candidates.iter().any(|sub| sub.value == keyword) {
        Ok(())
    } else {
        Err(Error::InvalidParameter)
    }
}

fn build(kind: CommandKind, args: &[&str]) -> Command {
    match kind {
        CommandKind::Add => Command::Add {
            description: args.join(" "),
        },
        CommandKind::Delete => Command::Delete {
            id: args[0].to_string(),
        },
        CommandKind::Update => Command::Update {
            id: args[0].to_string(),
            description: args[1..].join(" "),
        },
        CommandKind::Mark => Command::Mark {
            id: args[0].to_string(),
            status: args[1].to_string(),
        },
        CommandKind::List => Command::List {
            status: args.first().and_then(|status| status.parse().ok()),
        },
        CommandKind::Help => Command::Help,
        CommandKind::Exit => Command::Exit,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_invalid_command(line: &str) {
        assert!(
            matches!(parse(line), Err(Error::InvalidCommand)),
            "expected {line:?} to be an invalid command"
        );
    }

    fn assert_invalid_parameter(line: &str) {
        assert!(
            matches!(parse(line), Err(Error::InvalidParameter)),
            "expected {line:?} to be an invalid parameter"
        );
    }

    #[test]
    fn rejects_lines_without_prefix_and_keyword() {
        assert_invalid_command("");
        assert_invalid_command("task");
        assert_invalid_command("add buy milk");
        assert_invalid_command("tasks add buy milk");
        assert_invalid_command("TASK list");
    }

    #[test]
    fn rejects_unknown_keywords() {
        assert_invalid_command("task remove 1");
        assert_invalid_command("task List");
    }

    #[test]
    fn add_takes_the_rest_of_the_line_as_description() {
        assert_eq!(
            parse("task add buy   some\tmilk").unwrap(),
            Command::Add {
                description: "buy some milk".to_string()
            }
        );
    }

    #[test]
    fn add_needs_a_description() {
        assert_invalid_parameter("task add");
        assert_invalid_parameter("task add   ");
    }

    #[test]
    fn update_needs_id_and_description() {
        assert_invalid_parameter("task update");
        assert_invalid_parameter("task update 1");
        assert_eq!(
            parse("task update 1 call mom").unwrap(),
            Command::Update {
                id: "1".to_string(),
                description: "call mom".to_string()
            }
        );
    }

    #[test]
    fn delete_takes_exactly_one_id() {
        assert_invalid_parameter("task delete");
        assert_invalid_parameter("task delete 1 2");
        assert_eq!(
            parse("task delete x").unwrap(),
            Command::Delete { id: "x".to_string() }
        );
    }

    #[test]
    fn mark_takes_id_and_status_without_validating_them() {
        assert_invalid_parameter("task mark 1");
        assert_invalid_parameter("task mark 1 done now");
        assert_eq!(
            parse("task mark 1 finished").unwrap(),
            Command::Mark {
                id: "1".to_string(),
                status: "finished".to_string()
            }
        );
    }

    #[test]
    fn list_accepts_no_filter_or_a_known_status() {
        assert_eq!(parse("task list").unwrap(), Command::List { status: None });
        assert_eq!(
            parse("task list in-progress").unwrap(),
            Command::List {
                status: Some(Status::InProgress)
            }
        );
    }

    #[test]
    fn list_with_unknown_status_is_an_invalid_parameter() {
        assert_invalid_parameter("task list badstatus");
    }

    #[test]
    fn list_arity_is_checked_before_the_filter() {
        assert_invalid_parameter("task list done extra");
        assert_invalid_parameter("task list badstatus extra");
    }

    #[test]
    fn help_and_exit_take_no_arguments() {
        assert_eq!(parse("task help").unwrap(), Command::Help);
        assert_eq!(parse("  task   exit  ").unwrap(), Command::Exit);
        assert_invalid_parameter("task help add");
        assert_invalid_parameter("task exit now");
    }

    #[test]
    fn list_filters_match_status_values() {
        let spec = lookup("list").unwrap();
        let values: Vec<&str> = spec.sub_keywords.iter().map(|sub| sub.value).collect();
        let statuses: Vec<&str> = Status::ALL.iter().map(Status::as_str).collect();

        assert_eq!(values, statuses);
    }
}
