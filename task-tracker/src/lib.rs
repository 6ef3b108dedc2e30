pub mod config;
pub mod error;
pub mod presenter;
pub mod repository;
pub mod router;
pub mod session;
pub mod store;
pub mod task;

pub use error::{Error, StoreError};
pub use repository::{MarkOutcome, TaskRepository};
pub use session::{Outcome, Session};
pub use store::{JsonFileStore, Store};
pub use task::{Clock, Status, SystemClock, Task};
