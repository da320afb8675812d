//! Task board backend: accounts with token authentication and per-user tasks.
//!
//! Layout follows ports and adapters:
//!
//! - [`domain`]: entities, validation, services and port traits
//! - [`inbound`]: the actix-web HTTP adapter
//! - [`outbound`]: PostgreSQL, in-memory and credential adapters
//! - [`middleware`]: request tracing

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
