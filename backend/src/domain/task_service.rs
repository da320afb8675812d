//! Task use-cases with ownership enforcement.
//!
//! Reads are scoped to the caller: another user's task looks exactly like a
//! missing one. Mutations load the task first so a foreign task yields a
//! forbidden error rather than not found.

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use tracing::debug;

use crate::domain::ports::{TaskCommand, TaskPersistenceError, TaskQuery, TaskRepository};
use crate::domain::{Error, Task, TaskChanges, TaskDraft, TaskId, UserId};

const NO_TASK_FOUND: &str = "No task found..";
const TASK_NOT_FOUND: &str = "Task with given id not found";
const FOREIGN_UPDATE: &str = "You can't update task of another user";
const FOREIGN_DELETE: &str = "You can't delete task of another user";

/// Implements [`TaskCommand`] and [`TaskQuery`] over a [`TaskRepository`].
#[derive(Clone)]
pub struct TaskService<R> {
    tasks: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> TaskService<R> {
    pub fn new(tasks: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { tasks, clock }
    }
}

fn map_task_error(error: TaskPersistenceError) -> Error {
    match error {
        TaskPersistenceError::Connection { message } => {
            Error::internal(format!("task repository unavailable: {message}"))
        }
        TaskPersistenceError::Query { message } => {
            Error::internal(format!("task repository error: {message}"))
        }
    }
}

impl<R> TaskService<R>
where
    R: TaskRepository,
{
    async fn load_owned(
        &self,
        actor: &UserId,
        task_id: &TaskId,
        forbidden: &'static str,
    ) -> Result<Task, Error> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await
            .map_err(map_task_error)?
            .ok_or_else(|| Error::not_found(TASK_NOT_FOUND))?;
        if !task.is_owned_by(actor) {
            debug!(user_id = %actor, task_id = %task_id, "rejected access to foreign task");
            return Err(Error::forbidden(forbidden));
        }
        Ok(task)
    }
}

#[async_trait]
impl<R> TaskCommand for TaskService<R>
where
    R: TaskRepository,
{
    async fn create(&self, owner: &UserId, draft: TaskDraft) -> Result<Task, Error> {
        let task = Task::create(*owner, draft, self.clock.utc());
        self.tasks.insert(&task).await.map_err(map_task_error)?;
        debug!(user_id = %owner, task_id = %task.id(), "task created");
        Ok(task)
    }

    async fn update(
        &self,
        actor: &UserId,
        task_id: &TaskId,
        changes: TaskChanges,
    ) -> Result<Task, Error> {
        let mut task = self.load_owned(actor, task_id, FOREIGN_UPDATE).await?;
        task.apply(changes, self.clock.utc());
        let updated = self.tasks.update(&task).await.map_err(map_task_error)?;
        if !updated {
            return Err(Error::not_found(TASK_NOT_FOUND));
        }
        Ok(task)
    }

    async fn delete(&self, actor: &UserId, task_id: &TaskId) -> Result<(), Error> {
        self.load_owned(actor, task_id, FOREIGN_DELETE).await?;
        let deleted = self.tasks.delete(task_id).await.map_err(map_task_error)?;
        if !deleted {
            return Err(Error::not_found(TASK_NOT_FOUND));
        }
        debug!(user_id = %actor, task_id = %task_id, "task deleted");
        Ok(())
    }
}

#[async_trait]
impl<R> TaskQuery for TaskService<R>
where
    R: TaskRepository,
{
    async fn list(&self, owner: &UserId) -> Result<Vec<Task>, Error> {
        self.tasks
            .list_for_owner(owner)
            .await
            .map_err(map_task_error)
    }

    async fn get(&self, owner: &UserId, task_id: &TaskId) -> Result<Task, Error> {
        self.tasks
            .find_by_id(task_id)
            .await
            .map_err(map_task_error)?
            .filter(|task| task.is_owned_by(owner))
            .ok_or_else(|| Error::not_found(NO_TASK_FOUND))
    }
}

#[cfg(test)]
#[path = "task_service_tests.rs"]
mod tests;
