//! Task endpoints. Every route requires an access token.
//!
//! ```text
//! GET    /tasks
//! GET    /tasks/{task_id}
//! POST   /tasks            {"title":"Buy milk","description":"2L"}
//! PUT    /tasks/{task_id}  {"title":"Buy milk","description":"2L","completed":true}
//! DELETE /tasks/{task_id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

use crate::domain::{Error, Task, TaskChanges, TaskDraft, TaskId};

use super::ApiResult;
use super::auth::AuthenticatedUser;
use super::envelope::Envelope;
use super::error::ErrorEnvelope;
use super::schemas::{MessageResponseSchema, TaskListResponseSchema, TaskResponseSchema};
use super::state::HttpState;

const LIST_OK: &str = "Tasks found successfully..";
const GET_OK: &str = "Task found successfully..";
const CREATE_OK: &str = "Task created successfully..";
const UPDATE_OK: &str = "Task updated successfully..";
const DELETE_OK: &str = "Task deleted successfully..";

/// Body of `POST /tasks` and `PUT /tasks/{task_id}`.
///
/// `completed` is only honoured on update and only when it is a boolean.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct TaskRequest {
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Buy milk")]
    pub title: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "2L semi-skimmed")]
    pub description: Option<Value>,
    #[serde(default)]
    #[schema(value_type = Option<bool>)]
    pub completed: Option<Value>,
}

impl TaskRequest {
    fn into_parts(self) -> (Result<TaskDraft, Error>, Option<bool>) {
        let text = |value: Option<Value>| match value {
            Some(Value::String(text)) => Some(text),
            _ => None,
        };
        let completed = self.completed.as_ref().and_then(Value::as_bool);
        let draft = TaskDraft::try_from_parts(text(self.title), text(self.description))
            .map_err(|err| Error::invalid_request(err.to_string()));
        (draft, completed)
    }
}

/// Task as rendered on the wire.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TaskView {
    #[serde(rename = "_id")]
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    pub id: String,
    /// Owner's user id.
    pub user: String,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().to_string(),
            user: task.owner().to_string(),
            title: task.title().to_owned(),
            description: task.description().to_owned(),
            completed: task.completed(),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

#[derive(Serialize)]
struct TaskPayload {
    task: TaskView,
}

#[derive(Serialize)]
struct TaskListPayload {
    tasks: Vec<TaskView>,
}

fn parse_task_id(raw: &str) -> ApiResult<TaskId> {
    TaskId::parse(raw).map_err(|err| Error::invalid_request(err.to_string()))
}

fn task_response(msg: &'static str, task: &Task) -> HttpResponse {
    Envelope::new(
        msg,
        TaskPayload {
            task: TaskView::from(task),
        },
    )
    .into_response()
}

/// List the caller's tasks.
#[utoipa::path(
    get,
    path = "/tasks",
    responses(
        (status = 200, description = "Caller's tasks", body = TaskListResponseSchema),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["tasks"],
    operation_id = "listTasks"
)]
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
) -> ApiResult<HttpResponse> {
    let tasks = state.tasks_query.list(caller.user_id()).await?;
    let payload = TaskListPayload {
        tasks: tasks.iter().map(TaskView::from).collect(),
    };
    Ok(Envelope::new(LIST_OK, payload).into_response())
}

/// Fetch one of the caller's tasks.
#[utoipa::path(
    get,
    path = "/tasks/{task_id}",
    params(("task_id" = String, Path, description = "Task identifier (UUID)")),
    responses(
        (status = 200, description = "Task", body = TaskResponseSchema),
        (status = 400, description = "Invalid id or no such task", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["tasks"],
    operation_id = "getTask"
)]
#[get("/tasks/{task_id}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let task_id = parse_task_id(&path)?;
    let task = state.tasks_query.get(caller.user_id(), &task_id).await?;
    Ok(task_response(GET_OK, &task))
}

/// Create a task owned by the caller.
#[utoipa::path(
    post,
    path = "/tasks",
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task created", body = TaskResponseSchema),
        (status = 400, description = "Title or description missing", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["tasks"],
    operation_id = "createTask"
)]
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    payload: web::Json<TaskRequest>,
) -> ApiResult<HttpResponse> {
    let (draft, _) = payload.into_inner().into_parts();
    let task = state.tasks.create(caller.user_id(), draft?).await?;
    Ok(task_response(CREATE_OK, &task))
}

/// Replace title and description, optionally setting `completed`.
#[utoipa::path(
    put,
    path = "/tasks/{task_id}",
    params(("task_id" = String, Path, description = "Task identifier (UUID)")),
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Task updated", body = TaskResponseSchema),
        (status = 400, description = "Invalid id, missing fields or no such task", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Task belongs to another user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["tasks"],
    operation_id = "updateTask"
)]
#[put("/tasks/{task_id}")]
pub async fn update_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<TaskRequest>,
) -> ApiResult<HttpResponse> {
    let task_id = parse_task_id(&path)?;
    let (draft, completed) = payload.into_inner().into_parts();
    let changes = TaskChanges::new(draft?, completed);
    let task = state
        .tasks
        .update(caller.user_id(), &task_id, changes)
        .await?;
    Ok(task_response(UPDATE_OK, &task))
}

/// Delete one of the caller's tasks.
#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    params(("task_id" = String, Path, description = "Task identifier (UUID)")),
    responses(
        (status = 200, description = "Task deleted", body = MessageResponseSchema),
        (status = 400, description = "Invalid id or no such task", body = ErrorEnvelope),
        (status = 401, description = "Missing or invalid token", body = ErrorEnvelope),
        (status = 403, description = "Task belongs to another user", body = ErrorEnvelope),
        (status = 500, description = "Internal server error", body = ErrorEnvelope)
    ),
    tags = ["tasks"],
    operation_id = "deleteTask"
)]
#[delete("/tasks/{task_id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    caller: AuthenticatedUser,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let task_id = parse_task_id(&path)?;
    state.tasks.delete(caller.user_id(), &task_id).await?;
    Ok(Envelope::message(DELETE_OK).into_response())
}

#[cfg(test)]
#[path = "tasks_tests.rs"]
mod tests;
