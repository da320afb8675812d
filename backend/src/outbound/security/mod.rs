//! Credential adapters: Argon2id password hashing and HS256 access tokens.

mod argon2_password_hasher;
mod jwt_access_tokens;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use jwt_access_tokens::{JwtAccessTokens, MIN_SECRET_BYTES};
