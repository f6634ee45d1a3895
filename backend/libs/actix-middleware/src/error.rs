//! Authentication rejections
//!
//! Rendered with the same `{ success, message }` envelope the services use so
//! clients see one response shape for every failure.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use crypto_core::TokenError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer token in the request
    #[error("Access token not found")]
    MissingToken,

    /// Token present but unusable: wrong scheme, bad signature, expired, malformed
    #[error("Invalid token")]
    InvalidToken,

    /// Handler asked for an identity on a route the middleware does not cover
    #[error("User not authenticated")]
    Unauthenticated,
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Missing => AuthError::MissingToken,
            _ => AuthError::InvalidToken,
        }
    }
}

impl ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        StatusCode::UNAUTHORIZED
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "message": self.to_string(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_map_to_auth_errors() {
        assert_eq!(AuthError::from(TokenError::Missing), AuthError::MissingToken);
        assert_eq!(AuthError::from(TokenError::Invalid), AuthError::InvalidToken);
        assert_eq!(
            AuthError::from(TokenError::WeakSecret(3)),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn test_all_rejections_are_unauthorized() {
        for err in [
            AuthError::MissingToken,
            AuthError::InvalidToken,
            AuthError::Unauthenticated,
        ] {
            assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        }
    }
}
