//! HS256 JWT implementation of the `AccessTokens` port.
//!
//! Claims are `{ id, iat, exp }` with `id` holding the user id. Expiry is
//! checked against the injected clock rather than the library's wall clock,
//! so tests can move time.

use std::sync::Arc;
use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::domain::UserId;
use crate::domain::ports::{AccessToken, AccessTokenError, AccessTokens};

/// Shortest signing secret accepted, in bytes.
pub const MIN_SECRET_BYTES: usize = 32;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    id: String,
    iat: i64,
    exp: i64,
}

/// Signs and verifies access tokens with a shared secret.
pub struct JwtAccessTokens {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
    clock: Arc<dyn Clock>,
}

impl JwtAccessTokens {
    /// Build the adapter.
    ///
    /// # Errors
    ///
    /// Returns [`AccessTokenError::Signing`] when `secret` is shorter than
    /// [`MIN_SECRET_BYTES`] or `ttl` does not fit in seconds since the epoch.
    pub fn new(secret: &[u8], ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self, AccessTokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(AccessTokenError::signing(format!(
                "secret must be at least {MIN_SECRET_BYTES} bytes"
            )));
        }
        let ttl_secs = i64::try_from(ttl.as_secs())
            .map_err(|_| AccessTokenError::signing("token lifetime out of range"))?;
        Ok(Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl_secs,
            clock,
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation
    }
}

impl AccessTokens for JwtAccessTokens {
    fn issue(&self, user_id: &UserId) -> Result<AccessToken, AccessTokenError> {
        let iat = self.clock.utc().timestamp();
        let claims = Claims {
            id: user_id.to_string(),
            iat,
            exp: iat.saturating_add(self.ttl_secs),
        };
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map(AccessToken::new)
            .map_err(|err| AccessTokenError::signing(err.to_string()))
    }

    fn verify(&self, token: &str) -> Result<UserId, AccessTokenError> {
        let data = jsonwebtoken::decode::<Claims>(token, &self.decoding, &Self::validation())
            .map_err(|err| AccessTokenError::invalid(err.to_string()))?;
        if data.claims.exp <= self.clock.utc().timestamp() {
            return Err(AccessTokenError::expired());
        }
        UserId::new(&data.claims.id)
            .map_err(|err| AccessTokenError::invalid(format!("id claim: {err}")))
    }
}
