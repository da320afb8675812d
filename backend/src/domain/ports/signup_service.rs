//! Driving port for account registration.

use async_trait::async_trait;

use crate::domain::{Error, SignupForm, UserId};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SignupService: Send + Sync {
    /// Register a new account from a validated form.
    async fn register(&self, form: SignupForm) -> Result<UserId, Error>;
}
