//! Shared cryptographic helpers for course-hub services
//!
//! ## Modules
//! - `jwt`: HS256 access token issuance and verification

pub mod jwt;

pub use jwt::{Claims, JwtKeys, TokenError};
