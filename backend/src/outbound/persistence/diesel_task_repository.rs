//! PostgreSQL-backed `TaskRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{TaskPersistenceError, TaskRepository};
use crate::domain::{Task, TaskId, TaskRecord, UserId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewTaskRow, TaskRow, TaskUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::tasks;

/// Diesel-backed implementation of the task repository port.
#[derive(Clone)]
pub struct DieselTaskRepository {
    pool: DbPool,
}

impl DieselTaskRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_checkout_error(error: PoolError) -> TaskPersistenceError {
    map_pool_error(error, TaskPersistenceError::connection)
}

fn map_query_error(error: diesel::result::Error) -> TaskPersistenceError {
    map_diesel_error(
        error,
        TaskPersistenceError::query,
        TaskPersistenceError::connection,
    )
}

impl From<TaskRow> for Task {
    fn from(row: TaskRow) -> Self {
        Self::from(TaskRecord {
            id: TaskId::from_uuid(row.id),
            owner: UserId::from_uuid(row.user_id),
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl TaskRepository for DieselTaskRepository {
    async fn insert(&self, task: &Task) -> Result<(), TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;
        let row = NewTaskRow {
            id: *task.id().as_uuid(),
            user_id: *task.owner().as_uuid(),
            title: task.title(),
            description: task.description(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        };
        diesel::insert_into(tasks::table)
            .values(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_query_error)
    }

    async fn find_by_id(&self, id: &TaskId) -> Result<Option<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;
        let row = tasks::table
            .find(id.as_uuid())
            .select(TaskRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_query_error)?;
        Ok(row.map(Task::from))
    }

    async fn list_for_owner(&self, owner: &UserId) -> Result<Vec<Task>, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;
        let rows: Vec<TaskRow> = tasks::table
            .filter(tasks::user_id.eq(owner.as_uuid()))
            .order((tasks::created_at.asc(), tasks::id.asc()))
            .select(TaskRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_query_error)?;
        Ok(rows.into_iter().map(Task::from).collect())
    }

    async fn update(&self, task: &Task) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;
        let changes = TaskUpdate {
            title: task.title(),
            description: task.description(),
            completed: task.completed(),
            updated_at: task.updated_at(),
        };
        let affected = diesel::update(tasks::table.find(task.id().as_uuid()))
            .set(&changes)
            .execute(&mut conn)
            .await
            .map_err(map_query_error)?;
        Ok(affected > 0)
    }

    async fn delete(&self, id: &TaskId) -> Result<bool, TaskPersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_checkout_error)?;
        let affected = diesel::delete(tasks::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(map_query_error)?;
        Ok(affected > 0)
    }
}
