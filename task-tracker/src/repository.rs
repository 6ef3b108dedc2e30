use crate::error::{Error, StoreError};
use crate::store::Store;
use crate::task::{Clock, Status, Task};
use tracing::info;

/// Result of asking for a status change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkOutcome {
    /// The status changed and was persisted.
    Marked(Task),
    /// The task already had the requested status; nothing was written.
    Unchanged(Task),
}

/// Task collection operations on top of a [`Store`].
///
/// Every operation reloads the collection from the store first, so a repository holds
/// no task state of its own and can be built fresh for each command.
pub struct TaskRepository<'a, S: Store, C: Clock> {
    store: &'a S,
    clock: &'a C,
}

impl<'a, S: Store, C: Clock> TaskRepository<'a, S, C> {
    pub fn new(store: &'a S, clock: &'a C) -> Self {
        Self { store, clock }
    }

    /// Creates a `todo` task with the next free id (highest id + 1, or 1 when empty).
    #[tracing::instrument(skip(self))]
    pub fn add(&self, description: &str) -> Result<Task, Error> {
        let description = non_empty(description)?;
        let mut tasks = self.store.load()?;
        let id = tasks
            .iter()
            .map(Task::id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(Error::NoFreeId)?;
        let task = Task::new(id, description, self.clock.now());
        tasks.push(task.clone());
        self.store.save(&tasks)?;
        info!(id, "Task added");
        Ok(task)
    }

    /// Looks a task up by its textual id.
    ///
    /// Ids that are not positive integers simply match nothing.
    #[tracing::instrument(skip(self))]
    pub fn find(&self, id: &str) -> Result<Option<Task>, StoreError> {
        let tasks = self.store.load()?;
        Ok(parse_id(id).and_then(|id| tasks.into_iter().find(|task| task.id() == id)))
    }

    /// Replaces a task's description and stamps its update time.
    #[tracing::instrument(skip(self))]
    pub fn update(&self, id: &str, description: &str) -> Result<Task, Error> {
        let description = non_empty(description)?;
        let mut tasks = self.store.load()?;
        let index = position(&tasks, id)?;
        tasks[index].set_description(description, self.clock.now());
        self.store.save(&tasks)?;
        info!(id = tasks[index].id(), "Task updated");
        Ok(tasks[index].clone())
    }

    /// Removes a task and renumbers the rest to 1..=N in their current order.
    ///
    /// The returned task carries the id it had before removal. Ids held by callers
    /// are stale after this returns.
    #[tracing::instrument(skip(self))]
    pub fn delete(&self, id: &str) -> Result<Task, Error> {
        let mut tasks = self.store.load()?;
        let index = position(&tasks, id)?;
        let removed = tasks.remove(index);
        for (new_id, task) in (1..).zip(tasks.iter_mut()) {
            task.set_id(new_id);
        }
        self.store.save(&tasks)?;
        info!(id = removed.id(), remaining = tasks.len(), "Task deleted");
        Ok(removed)
    }

    /// Moves a task to `status`, unless it is already there.
    #[tracing::instrument(skip(self))]
    pub fn mark(&self, id: &str, status: &str) -> Result<MarkOutcome, Error> {
        let status: Status = status.parse()?;
        let mut tasks = self.store.load()?;
        let index = position(&tasks, id)?;
        if tasks[index].status() == status {
            return Ok(MarkOutcome::Unchanged(tasks.swap_remove(index)));
        }
        tasks[index].set_status(status, self.clock.now());
        self.store.save(&tasks)?;
        info!(id = tasks[index].id(), %status, "Task marked");
        Ok(MarkOutcome::Marked(tasks.swap_remove(index)))
    }

    /// All tasks, or only those with `status`, in ascending id order.
    #[tracing::instrument(skip(self))]
    pub fn filter(&self, status: Option<Status>) -> Result<Vec<Task>, StoreError> {
        let mut tasks = self.store.load()?;
        if let Some(status) = status {
            tasks.retain(|task| task.status() == status);
        }
        tasks.sort_by_key(Task::id);
        Ok(tasks)
    }
}

fn parse_id(id: &str) -> Option<u32> {
    id.parse::<u32>().ok().filter(|id| *id > 0)
}

fn position(tasks: &[Task], id: &str) -> Result<usize, Error> {
    parse_id(id)
        .and_then(|parsed| tasks.iter().position(|task| task.id() == parsed))
        .ok_or_else(|| Error::NotFound(id.to_string()))
}

fn non_empty(description: &str) -> Result<String, Error> {
    let description = description.trim();
    if description.is_empty() {
        return Err(Error::InvalidInput);
    }
    Ok(description.to_string())
}
