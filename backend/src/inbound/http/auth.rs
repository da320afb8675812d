//! Request authentication.
//!
//! [`AuthenticatedUser`] reads `Authorization: <token>` or
//! `Authorization: Bearer <token>` and resolves it through the
//! [`AccessTokens`](crate::domain::ports::AccessTokens) port held in
//! [`HttpState`]. Handlers that take it as an argument are protected.

use actix_web::dev::Payload;
use actix_web::http::header::{self, HeaderMap};
use actix_web::{FromRequest, HttpRequest, web};
use futures_util::future::{Ready, ready};
use tracing::debug;

use crate::domain::{Error, UserId};

use super::state::HttpState;

pub const TOKEN_NOT_FOUND: &str = "Token not found";
pub const INVALID_TOKEN: &str = "Invalid token";

/// Identity of the caller, established from the access token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(UserId);

impl AuthenticatedUser {
    pub fn user_id(&self) -> &UserId {
        &self.0
    }
}

/// Extract the raw token, or `None` when the header is absent or blank.
fn presented_token(headers: &HeaderMap) -> Result<Option<&str>, Error> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };
    let raw = value
        .to_str()
        .map_err(|_| Error::unauthorized(INVALID_TOKEN))?
        .trim();
    let token = match raw.split_once(' ') {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("bearer") => rest.trim(),
        None if raw.eq_ignore_ascii_case("bearer") => "",
        _ => raw,
    };
    Ok((!token.is_empty()).then_some(token))
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, Error> {
    let state = req
        .app_data::<web::Data<HttpState>>()
        .ok_or_else(|| Error::internal("HttpState is not registered as app data"))?;
    let token = presented_token(req.headers())?.ok_or_else(|| Error::unauthorized(TOKEN_NOT_FOUND))?;
    state
        .tokens
        .verify(token)
        .map(AuthenticatedUser)
        .map_err(|err| {
            debug!(error = %err, "rejected access token");
            Error::unauthorized(INVALID_TOKEN)
        })
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
