//! Driving port for reading tasks.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskQuery: Send + Sync {
    /// Every task owned by `owner`.
    async fn list(&self, owner: &UserId) -> Result<Vec<Task>, Error>;

    /// One task, visible only to its owner.
    async fn get(&self, owner: &UserId, task_id: &TaskId) -> Result<Task, Error>;
}
