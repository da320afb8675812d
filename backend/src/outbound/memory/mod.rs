//! In-process repositories for development runs and tests.
//!
//! Data lives for the lifetime of the process. Each operation holds the lock
//! only for its own read or write; a poisoned lock surfaces as a query error.

mod task_repository;
mod user_repository;

pub use task_repository::InMemoryTaskRepository;
pub use user_repository::InMemoryUserRepository;
