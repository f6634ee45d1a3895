/// Shared JWT issuance and validation for course-hub
///
/// Tokens are HS256-signed with a single shared secret. The secret is injected
/// once at construction via [`JwtKeys::from_secret`] and kept immutable in the
/// returned value; there is no process-wide key storage.
///
/// Tokens carry exactly one claim of interest, the subject (`sub`), which is the
/// authenticated user's UUID. Tokens are stateless: there is no server-side
/// revocation list, a token stays valid until `exp` passes or the secret rotates.
///
/// ## Usage
///
/// ```rust
/// use crypto_core::jwt::JwtKeys;
/// use std::time::Duration;
/// use uuid::Uuid;
///
/// let keys = JwtKeys::from_secret(&"s".repeat(32), Duration::from_secs(3600)).unwrap();
/// let user_id = Uuid::new_v4();
/// let token = keys.issue(user_id).unwrap();
/// assert_eq!(keys.verify(&token).unwrap(), user_id);
/// ```
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

// ============================================================================
// Constants
// ============================================================================

/// Minimum accepted secret length in bytes
pub const MIN_SECRET_BYTES: usize = 32;

/// Longest accepted token lifetime (one year)
pub const MAX_TTL_SECS: u64 = 365 * 24 * 60 * 60;

const JWT_ALGORITHM: Algorithm = Algorithm::HS256;

// ============================================================================
// Data Structures
// ============================================================================

/// JWT claims carried by course-hub access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Token failures
///
/// `Missing` and `Invalid` are the two verification outcomes; callers map both
/// to an unauthorized response.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("access token not found")]
    Missing,

    #[error("invalid token")]
    Invalid,

    #[error("JWT secret too short: {0} bytes, need at least {MIN_SECRET_BYTES}")]
    WeakSecret(usize),

    #[error("token lifetime too long: {0}s, at most {MAX_TTL_SECS}s")]
    TtlTooLong(u64),

    #[error("failed to sign token: {0}")]
    Signing(String),
}

// ============================================================================
// Keys
// ============================================================================

/// Signing and verification material derived from one shared secret
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for JwtKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtKeys")
            .field("secret", &"[REDACTED]")
            .field("algorithm", &JWT_ALGORITHM)
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl JwtKeys {
    /// Build keys from a shared secret.
    ///
    /// Secrets shorter than [`MIN_SECRET_BYTES`] and lifetimes longer than
    /// [`MAX_TTL_SECS`] are rejected.
    pub fn from_secret(secret: &str, ttl: Duration) -> Result<Self, TokenError> {
        if secret.len() < MIN_SECRET_BYTES {
            return Err(TokenError::WeakSecret(secret.len()));
        }
        if ttl.as_secs() > MAX_TTL_SECS {
            return Err(TokenError::TtlTooLong(ttl.as_secs()));
        }

        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl,
        })
    }

    /// Lifetime given to newly issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue an access token for `subject`
    pub fn issue(&self, subject: Uuid) -> Result<String, TokenError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or(TokenError::TtlTooLong(self.ttl.as_secs()))?;
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    /// Verify `token` and return the full claim set
    pub fn decode_claims(&self, token: &str) -> Result<Claims, TokenError> {
        if token.trim().is_empty() {
            return Err(TokenError::Missing);
        }

        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("JWT validation failed: {}", e);
                TokenError::Invalid
            })
    }

    /// Verify `token` and return the subject identity.
    ///
    /// A valid signature over a `sub` that is not a UUID is still `Invalid`.
    pub fn verify(&self, token: &str) -> Result<Uuid, TokenError> {
        let claims = self.decode_claims(token)?;
        Uuid::parse_str(&claims.sub).map_err(|_| TokenError::Invalid)
    }
}

// ============================================================================
// Tests
// ============================================================================
