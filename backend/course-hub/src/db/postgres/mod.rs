/// PostgreSQL store
///
/// Repositories are free functions over `&PgPool`; `PgStore` wires them to the
/// store traits. Ownership is enforced inside each statement with
/// `WHERE id = $1 AND posted_by = $2`.
use actix_middleware::AuthError;
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{CourseStore, PostStore, RatingOutcome, Store, UserStore};
use crate::error::{AppError, Result};
use crate::models::{Course, CourseChanges, NewCourse, NewPost, Post, PostChanges, User};

pub mod course_repo;
pub mod post_repo;
pub mod user_repo;

/// Map an insert error, treating a `posted_by` foreign key miss as a token
/// whose subject no longer exists
pub(crate) fn owner_insert_error(err: sqlx::Error) -> AppError {
    match err {
        sqlx::Error::Database(e) if e.is_foreign_key_violation() => {
            tracing::debug!("owner has no user row: {}", e);
            AppError::Unauthenticated(AuthError::Unauthenticated)
        }
        e => e.into(),
    }
}

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        user_repo::create_user(&self.pool, username, password_hash).await
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(user_repo::find_by_username(&self.pool, username).await?)
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(user_repo::find_by_id(&self.pool, id).await?)
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        Ok(post_repo::list_posts(&self.pool).await?)
    }

    async fn create_post(&self, owner: Uuid, post: NewPost) -> Result<Post> {
        post_repo::create_post(&self.pool, owner, &post).await
    }

    async fn update_post(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>> {
        Ok(post_repo::update_post(&self.pool, id, owner, &changes).await?)
    }

    async fn delete_post(&self, id: Uuid, owner: Uuid) -> Result<Option<Post>> {
        Ok(post_repo::delete_post(&self.pool, id, owner).await?)
    }

    async fn set_post_like(&self, id: Uuid, like: i64) -> Result<Option<Post>> {
        Ok(post_repo::set_like(&self.pool, id, like).await?)
    }
}

#[async_trait]
impl CourseStore for PgStore {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        course_repo::list_courses(&self.pool).await
    }

    async fn create_course(&self, owner: Uuid, course: NewCourse) -> Result<Course> {
        course_repo::create_course(&self.pool, owner, &course).await
    }

    async fn update_course(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>> {
        course_repo::update_course(&self.pool, id, owner, &changes).await
    }

    async fn delete_course(&self, id: Uuid, owner: Uuid) -> Result<Option<Course>> {
        course_repo::delete_course(&self.pool, id, owner).await
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>> {
        course_repo::find_course_by_id(&self.pool, id).await
    }

    async fn record_rating(&self, id: Uuid, actor: Uuid, rate: f64) -> Result<RatingOutcome> {
        if let Some(course) = course_repo::record_rating(&self.pool, id, actor, rate).await? {
            return Ok(RatingOutcome::Rated(course));
        }

        // The conditional write missed: tell "no such course" from "already rated"
        match course_repo::find_course_by_id(&self.pool, id).await? {
            Some(_) => Ok(RatingOutcome::AlreadyRated),
            None => Ok(RatingOutcome::NotFound),
        }
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
