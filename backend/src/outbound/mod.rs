//! Outbound adapters implementing the driven ports.
//!
//! - **persistence**: PostgreSQL repositories using Diesel
//! - **memory**: process-local repositories for development and tests
//! - **security**: Argon2id password hashing and JWT access tokens
//!
//! Adapters translate between domain types and infrastructure types and
//! contain no business rules.

pub mod memory;
pub mod persistence;
pub mod security;
