//! `TaskRepository` backed by a `HashMap`.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskId, UserId};

#[derive(Debug, Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<HashMap<TaskId, Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, HashMap<TaskId, Task>>, TaskPersistenceError> {
        self.tasks
            .read()
            .map_err(|_| TaskPersistenceError::query("task store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, HashMap<TaskId, Task>>, TaskPersistenceError> {
        self.tasks
            .write()
            .map_err(|_| TaskPersistenceError::query("task store lock poisoned"))
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        self.write()?.insert(*task.id(), task.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut tasks: Vec<Task> = self
            .read()?
            .values()
            .filter(|task| task.is_owned_by(owner))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| (task.created_at(), *task.id().as_uuid()));
        Ok(tasks)
    }

    async fn update(&self, task: &Task) -> Result<bool, TaskPersistenceError> {
        let mut tasks = self.write()?;
        match tasks.get_mut(task.id()) {
            Some(stored) => {
                *stored = task.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskPersistenceError> {
        Ok(self.write()?.remove(id).is_some())
    }
}
