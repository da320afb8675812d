//! Port for task persistence.
use async_trait::async_trait;

use crate::domain::{Task, TaskId, UserId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by task repository adapters.
    pub enum TaskPersistenceError {
        /// Repository connection could not be established.
        Connection { message: String } => "task repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "task repository query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Insert a new task.
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError>;

    /// Fetch a task by id regardless of owner.
    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError>;

    /// All tasks owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError>;

    /// Overwrite the mutable fields of an existing task.
    ///
    /// Returns `false` when no row matched.
    async fn update(&self, task: &Task) -> Result<bool, TaskPersistenceError>;

    /// Remove a task. Returns `false` when no row matched.
    async fn delete(&self, id: &TaskId) -> Result<bool, TaskPersistenceError>;
}
