//! HTTP rendering of domain errors.
//!
//! [`status_for`] is the one table from [`ErrorCode`] to HTTP status. Every
//! failure leaves the service as an [`ErrorEnvelope`]; internal errors are
//! logged in full and redacted on the wire.

use actix_web::error::JsonPayloadError;
use actix_web::{HttpRequest, HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

use super::schemas::ErrorCodeSchema;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

/// Message sent in place of any internal error detail.
pub const INTERNAL_SERVER_ERROR: &str = "Internal Server Error";
/// Message for bodies that are not valid JSON objects.
pub const INVALID_PAYLOAD: &str = "Invalid request payload";

/// Map an error code to its HTTP status.
///
/// Conflicts and missing records are reported as 400, matching what
/// existing clients expect.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest | ErrorCode::Conflict | ErrorCode::NotFound => {
            StatusCode::BAD_REQUEST
        }
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Failure body: `{status:false, msg, code, traceId?}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = ErrorResponse)]
pub struct ErrorEnvelope {
    #[schema(example = false)]
    pub status: bool,
    #[schema(example = "Task id not valid")]
    pub msg: String,
    #[schema(value_type = ErrorCodeSchema)]
    pub code: ErrorCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl From<&Error> for ErrorEnvelope {
    fn from(error: &Error) -> Self {
        let msg = match error.code() {
            ErrorCode::InternalError => INTERNAL_SERVER_ERROR.to_owned(),
            _ => error.message().to_owned(),
        };
        Self {
            status: false,
            msg,
            code: error.code(),
            trace_id: error.trace_id().map(str::to_owned),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        if self.code() == ErrorCode::InternalError {
            error!(error = %self, trace_id = ?self.trace_id(), "request failed");
        }
        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(ErrorEnvelope::from(self))
    }
}

/// `JsonConfig` error handler turning body parse failures into envelopes.
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, "rejected request body");
    Error::invalid_request(INVALID_PAYLOAD).into()
}
