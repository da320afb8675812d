//! Domain primitives, validation rules and use-case services.
//!
//! Nothing in here knows about HTTP or SQL. Inbound adapters build the
//! validated input types ([`SignupForm`], [`LoginCredentials`],
//! [`TaskDraft`]) and call the driving ports in [`ports`]; the services
//! reach storage and crypto only through the driven ports.

mod account_service;
pub mod auth;
pub mod error;
pub mod ports;
pub mod task;
mod task_service;
pub mod trace_id;
pub mod user;
pub mod validation;

pub use self::account_service::AccountService;
pub use self::auth::{
    EMAIL_ALREADY_REGISTERED, FieldValue, LoginCredentials, LoginValidationError,
    MIN_PASSWORD_CHARS, SignupForm, SignupValidationError,
};
pub use self::error::{Error, ErrorCode};
pub use self::task::{
    TASK_CONTENT_MISSING, TASK_ID_NOT_VALID, Task, TaskChanges, TaskDraft, TaskId, TaskRecord,
    TaskValidationError,
};
pub use self::task_service::TaskService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{EmailAddress, PasswordHash, User, UserId, UserName, UserValidationError};
pub use self::validation::{validate_email, validate_identifier};

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use taskboard::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// assert!(handler().is_err());
/// ```
pub type ApiResult<T> = Result<T, Error>;
