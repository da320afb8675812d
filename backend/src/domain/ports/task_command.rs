//! Driving port for task mutations.
//!
//! Every method takes the acting user; ownership is checked behind the port.

use async_trait::async_trait;

use crate::domain::{Error, Task, TaskChanges, TaskDraft, TaskId, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskCommand: Send + Sync {
    /// Create an incomplete task owned by `owner`.
    async fn create(&self, owner: &UserId, draft: TaskDraft) -> Result<Task, Error>;

    /// Apply `changes` to a task the actor owns.
    async fn update(
        &self,
        actor: &UserId,
        task_id: &TaskId,
        changes: TaskChanges,
    ) -> Result<Task, Error>;

    /// Delete a task the actor owns.
    async fn delete(&self, actor: &UserId, task_id: &TaskId) -> Result<(), Error>;
}
