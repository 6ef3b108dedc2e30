use crate::error::Error;
use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// A single tracked unit of work.
#[derive(Debug, Eq, PartialEq, Serialize, Deserialize, Clone)]
pub struct Task {
    id: u32,
    description: String,
    status: Status,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    created_at: DateTime<Utc>,
    #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
    updated_at: Option<DateTime<Utc>>,
}

/// The fixed set of states a task can be in.
#[derive(Debug, Default, Eq, PartialEq, Serialize, Deserialize, Clone, Copy, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    #[default]
    Todo,
    InProgress,
    Done,
}

impl Status {
    /// Every status, in the order they are offered to users.
    pub const ALL: [Status; 3] = [Status::Todo, Status::InProgress, Status::Done];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Todo => "todo",
            Status::InProgress => "in-progress",
            Status::Done => "done",
        }
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::InvalidStatus(s.to_string()))
    }
}

impl Task {
    /// Creates a fresh `todo` task that has never been updated.
    pub fn new(id: u32, description: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            description,
            status: Status::Todo,
            created_at: created_at.trunc_subsecs(3),
            updated_at: None,
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub(crate) fn set_description(&mut self, description: String, now: DateTime<Utc>) {
        self.description = description;
        self.touch(now);
    }

    pub(crate) fn set_status(&mut self, status: Status, now: DateTime<Utc>) {
        self.status = status;
        self.touch(now);
    }

    // updated_at never precedes created_at, even if the clock stepped backwards.
    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = Some(now.trunc_subsecs(3).max(self.created_at));
    }
}

/// Source of the current time for stamping tasks.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
