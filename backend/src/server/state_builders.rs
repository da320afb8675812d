//! Wiring of domain services onto the HTTP state.
//!
//! With a database URL the Diesel repositories back the services after
//! migrations run; without one the in-memory store is used and a warning is
//! logged.

use std::io;
use std::sync::Arc;

use mockable::{Clock, DefaultClock};
use tracing::{info, warn};
use zeroize::Zeroizing;

use taskboard::domain::ports::{TaskRepository, UserRepository};
use taskboard::domain::{AccountService, TaskService};
use taskboard::inbound::http::state::{HttpState, HttpStatePorts};
use taskboard::outbound::memory::{InMemoryTaskRepository, InMemoryUserRepository};
use taskboard::outbound::persistence::{
    DbPool, DieselTaskRepository, DieselUserRepository, PoolConfig, run_migrations,
};
use taskboard::outbound::security::{Argon2PasswordHasher, JwtAccessTokens};

use super::config::ServerSettings;

fn wire<U, R>(
    users: Arc<U>,
    tasks: Arc<R>,
    tokens: Arc<JwtAccessTokens>,
    clock: Arc<dyn Clock>,
) -> HttpState
where
    U: UserRepository + 'static,
    R: TaskRepository + 'static,
{
    let accounts = Arc::new(AccountService::new(
        users,
        Arc::new(Argon2PasswordHasher::new()),
        Arc::clone(&tokens),
    ));
    let task_service = Arc::new(TaskService::new(tasks, clock));
    HttpState::new(HttpStatePorts {
        signup: accounts.clone(),
        login: accounts.clone(),
        profile: accounts,
        tasks: task_service.clone(),
        tasks_query: task_service,
        tokens,
    })
}

async fn connect(database_url: &str, max_connections: u32) -> io::Result<DbPool> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || run_migrations(&url))
        .await
        .map_err(|err| io::Error::other(format!("migration task failed: {err}")))?
        .map_err(io::Error::other)?;
    info!("database migrations applied");

    DbPool::new(PoolConfig::new(database_url).with_max_size(max_connections))
        .await
        .map_err(io::Error::other)
}

/// Build the HTTP state from settings and a resolved token secret.
///
/// # Errors
///
/// Returns [`io::Error`] when migrations fail, the pool cannot be built, or
/// the token adapter rejects the secret.
pub async fn build_http_state(
    settings: &ServerSettings,
    secret: &Zeroizing<Vec<u8>>,
) -> io::Result<HttpState> {
    let clock: Arc<dyn Clock> = Arc::new(DefaultClock);
    let tokens = Arc::new(
        JwtAccessTokens::new(secret, settings.token_ttl(), Arc::clone(&clock))
            .map_err(io::Error::other)?,
    );

    match settings.database_url.as_deref() {
        Some(url) => {
            let pool = connect(url, settings.db_max_connections()).await?;
            Ok(wire(
                Arc::new(DieselUserRepository::new(pool.clone())),
                Arc::new(DieselTaskRepository::new(pool)),
                tokens,
                clock,
            ))
        }
        None => {
            warn!("TASKS_DATABASE_URL not set; data is kept in memory and lost on restart");
            Ok(wire(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryTaskRepository::new()),
                tokens,
                clock,
            ))
        }
    }
}
