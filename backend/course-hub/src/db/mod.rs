/// Resource store
///
/// Handlers and services talk to persistence only through these traits.
/// Conditional writes take `(id, owner)` and return `None` both when the
/// record does not exist and when it belongs to someone else.
use async_trait::async_trait;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{Course, CourseChanges, NewCourse, NewPost, Post, PostChanges, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Result of a conditional rating write
#[derive(Debug, Clone, PartialEq)]
pub enum RatingOutcome {
    Rated(Course),
    AlreadyRated,
    NotFound,
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a user; a taken username yields `AppError::Conflict`
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User>;

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>>;

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>>;
}

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Every post, oldest first, owner expanded
    async fn list_posts(&self) -> Result<Vec<Post>>;

    async fn create_post(&self, owner: Uuid, post: NewPost) -> Result<Post>;

    async fn update_post(&self, id: Uuid, owner: Uuid, changes: PostChanges)
        -> Result<Option<Post>>;

    async fn delete_post(&self, id: Uuid, owner: Uuid) -> Result<Option<Post>>;

    /// Overwrite the like counter; not owner-gated
    async fn set_post_like(&self, id: Uuid, like: i64) -> Result<Option<Post>>;
}

#[async_trait]
pub trait CourseStore: Send + Sync {
    /// Every course, oldest first, owner expanded
    async fn list_courses(&self) -> Result<Vec<Course>>;

    async fn create_course(&self, owner: Uuid, course: NewCourse) -> Result<Course>;

    async fn update_course(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>>;

    async fn delete_course(&self, id: Uuid, owner: Uuid) -> Result<Option<Course>>;

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>>;

    /// Set `rate` and add `actor` to `learner`, only if `actor` is not already there
    async fn record_rating(&self, id: Uuid, actor: Uuid, rate: f64) -> Result<RatingOutcome>;
}

/// Everything the HTTP layer needs from persistence
#[async_trait]
pub trait Store: UserStore + PostStore + CourseStore {
    /// Liveness check used by `/api/health`
    async fn ping(&self) -> Result<()>;
}
