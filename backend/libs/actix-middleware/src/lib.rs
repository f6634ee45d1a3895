//! # Actix Middleware Library
//!
//! Shared middleware components for course-hub Actix services
//!
//! ## Modules
//! - `jwt_auth`: bearer token authentication middleware and the `UserId` extractor
//! - `error`: JSON envelope rejections produced by the middleware

pub mod error;
pub mod jwt_auth;

pub use error::AuthError;
pub use jwt_auth::{JwtAuthMiddleware, UserId};
