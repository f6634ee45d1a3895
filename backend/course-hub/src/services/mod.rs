/// Business logic layer
///
/// Services sit between the HTTP handlers and the store. They validate
/// input, apply the ownership and rating rules, and map store misses onto
/// `AppError` variants.
use crate::error::{AppError, Result};

pub mod auth;
pub mod courses;
pub mod posts;

pub use auth::AuthService;
pub use courses::CourseService;
pub use posts::PostService;

/// A required text field: present and not blank
fn required_text(value: Option<String>, message: &str) -> Result<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AppError::Validation(message.to_string())),
    }
}
