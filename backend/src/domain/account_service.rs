//! Account use-cases: signup, login and profile lookup.
//!
//! The service owns the ordering of the persistence-backed checks (email
//! uniqueness, known email, password match). Shape validation has already
//! happened in [`SignupForm`] and [`LoginCredentials`].

use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinError;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    AccessTokenError, AccessTokens, LoginOutcome, LoginService, PasswordHashError,
    PasswordHasher, SignupService, UserPersistenceError, UserProfileQuery, UserRepository,
};
use crate::domain::{
    EMAIL_ALREADY_REGISTERED, Error, LoginCredentials, SignupForm, TraceId, User, UserId,
};

const EMAIL_NOT_REGISTERED: &str = "This email is not registered!!";
const PASSWORD_INCORRECT: &str = "Password incorrect!!";
const USER_NOT_FOUND: &str = "User not found";

/// Implements [`SignupService`], [`LoginService`] and [`UserProfileQuery`].
#[derive(Clone)]
pub struct AccountService<U, H, T> {
    users: Arc<U>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<U, H, T> AccountService<U, H, T> {
    pub fn new(users: Arc<U>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            users,
            hasher,
            tokens,
        }
    }
}

fn map_user_error(error: UserPersistenceError) -> Error {
    match error {
        UserPersistenceError::DuplicateEmail { .. } => Error::conflict(EMAIL_ALREADY_REGISTERED),
        UserPersistenceError::Connection { message } => {
            Error::internal(format!("user repository unavailable: {message}"))
        }
        UserPersistenceError::Query { message } => {
            Error::internal(format!("user repository error: {message}"))
        }
    }
}

fn map_hash_error(error: PasswordHashError) -> Error {
    Error::internal(error.to_string())
}

fn map_join_error(error: JoinError) -> Error {
    Error::internal(format!("password hashing task failed: {error}"))
}

/// Run `op` against the hasher on the blocking pool, keeping the caller's
/// trace identifier in scope.
async fn run_hasher<H, F, R>(hasher: &Arc<H>, op: F) -> Result<R, Error>
where
    H: PasswordHasher + 'static,
    F: FnOnce(&H) -> Result<R, PasswordHashError> + Send + 'static,
    R: Send + 'static,
{
    let hasher = Arc::clone(hasher);
    let trace_id = TraceId::current();
    tokio::task::spawn_blocking(move || match trace_id {
        Some(id) => TraceId::sync_scope(id, || op(&hasher)),
        None => op(&hasher),
    })
    .await
    .map_err(map_join_error)?
    .map_err(map_hash_error)
}

fn map_token_error(error: AccessTokenError) -> Error {
    Error::internal(error.to_string())
}

#[async_trait]
impl<U, H, T> SignupService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: AccessTokens,
{
    async fn register(&self, form: SignupForm) -> Result<UserId, Error> {
        let existing = self
            .users
            .find_by_email(form.email().as_ref())
            .await
            .map_err(map_user_error)?;
        if existing.is_some() {
            debug!("signup rejected: email already registered");
            return Err(Error::conflict(EMAIL_ALREADY_REGISTERED));
        }

        let password = Zeroizing::new(form.password().to_owned());
        let password_hash = run_hasher(&self.hasher, move |hasher| hasher.hash(&password)).await?;
        let user = User::new(
            UserId::random(),
            form.name().clone(),
            form.email().clone(),
            password_hash,
        );
        self.users.insert(&user).await.map_err(map_user_error)?;

        info!(user_id = %user.id(), "account registered");
        Ok(*user.id())
    }
}

#[async_trait]
impl<U, H, T> LoginService for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: AccessTokens,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginOutcome, Error> {
        let Some(user) = self
            .users
            .find_by_email(credentials.email())
            .await
            .map_err(map_user_error)?
        else {
            debug!("login rejected: unknown email");
            return Err(Error::invalid_request(EMAIL_NOT_REGISTERED));
        };

        let password = Zeroizing::new(credentials.password().to_owned());
        let stored = user.password_hash().clone();
        let matches = run_hasher(&self.hasher, move |hasher| {
            hasher.verify(&password, &stored)
        })
        .await?;
        if !matches {
            debug!(user_id = %user.id(), "login rejected: password mismatch");
            return Err(Error::invalid_request(PASSWORD_INCORRECT));
        }

        let token = self.tokens.issue(user.id()).map_err(map_token_error)?;
        info!(user_id = %user.id(), "login succeeded");
        Ok(LoginOutcome { token, user })
    }
}

#[async_trait]
impl<U, H, T> UserProfileQuery for AccountService<U, H, T>
where
    U: UserRepository,
    H: PasswordHasher + 'static,
    T: AccessTokens,
{
    async fn fetch_profile(&self, user_id: &UserId) -> Result<User, Error> {
        self.users
            .find_by_id(user_id)
            .await
            .map_err(map_user_error)?
            .ok_or_else(|| Error::not_found(USER_NOT_FOUND))
    }
}

#[cfg(test)]
#[path = "account_service_tests.rs"]
mod tests;
