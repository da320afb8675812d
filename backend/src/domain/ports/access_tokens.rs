//! Port for issuing and verifying access tokens.

use std::fmt;

use crate::domain::UserId;

use super::define_port_error;

define_port_error! {
    /// Errors raised by access token adapters.
    pub enum AccessTokenError {
        /// The token could not be signed.
        Signing { message: String } => "access token signing failed: {message}",
        /// Signature, encoding or claims are not acceptable.
        Invalid { message: String } => "access token rejected: {message}",
        /// The token is past its expiry.
        Expired => "access token expired",
    }
}

/// Opaque signed credential handed to clients at login.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(..)")
    }
}

/// Issues tokens bound to a user id and resolves them back.
#[cfg_attr(test, mockall::automock)]
pub trait AccessTokens: Send + Sync {
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, AccessTokenError>;

    fn verify(&self, token: &str) -> Result<UserId, AccessTokenError>;
}
