//! Driving port for login.
//!
//! Inbound adapters call it to exchange credentials for an access token
//! without knowing how users are stored or how tokens are signed.

use async_trait::async_trait;

use crate::domain::{Error, LoginCredentials, User};

use super::AccessToken;

/// Successful login: the issued token and the matching account.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    pub token: AccessToken,
    pub user: User,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Verify credentials and issue an access token.
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error>;
}
