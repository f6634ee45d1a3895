/// HTTP handlers
///
/// Each handler resolves the caller, hands off to a service and wraps the
/// result in the `{ success, ... }` envelope. Failures are rendered by
/// `AppError`.
use uuid::Uuid;

use crate::error::{AppError, Resource, Result};

pub mod auth;
pub mod courses;
pub mod health;
pub mod posts;
pub mod upload;

pub use upload::UploadForm;

/// A path id that is not a UUID cannot match any record
fn parse_id(raw: &str, resource: Resource) -> Result<Uuid> {
    Uuid::parse_str(raw).map_err(|_| AppError::NotFoundOrDenied(resource))
}
