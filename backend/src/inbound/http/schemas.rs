//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! Domain types stay free of utoipa. Response bodies are assembled from a
//! generic [`Envelope`](super::envelope::Envelope) at runtime, so their
//! documented shapes are spelled out here instead.

use utoipa::ToSchema;

use super::tasks::TaskView;
use super::users::{LoginUserView, UserView};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// A unique field is already taken.
    #[schema(rename = "conflict")]
    Conflict,
    /// The requested record does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// Token missing or rejected.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// The caller does not own the record.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// Unexpected server failure.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// Body of responses that carry only a message.
#[derive(ToSchema)]
#[schema(as = MessageResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct MessageResponseSchema {
    #[schema(example = true)]
    status: bool,
    #[schema(example = "Task deleted successfully..")]
    msg: String,
}

#[derive(ToSchema)]
#[schema(as = LoginResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct LoginResponseSchema {
    status: bool,
    #[schema(example = "Login successful..")]
    msg: String,
    /// Access token for the `Authorization` header.
    token: String,
    user: LoginUserView,
}

#[derive(ToSchema)]
#[schema(as = ProfileResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ProfileResponseSchema {
    status: bool,
    #[schema(example = "Profile found successfully..")]
    msg: String,
    user: UserView,
}

#[derive(ToSchema)]
#[schema(as = TaskListResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TaskListResponseSchema {
    status: bool,
    #[schema(example = "Tasks found successfully..")]
    msg: String,
    tasks: Vec<TaskView>,
}

#[derive(ToSchema)]
#[schema(as = TaskResponse)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct TaskResponseSchema {
    status: bool,
    #[schema(example = "Task found successfully..")]
    msg: String,
    task: TaskView,
}
