/// Course service - creation, listing, owner-gated update/delete and rating
use std::sync::Arc;
use uuid::Uuid;

use super::required_text;
use crate::db::{RatingOutcome, Store};
use crate::error::{AppError, Resource, Result};
use crate::models::{normalize_url, Course, CourseChanges, CourseInput, NewCourse};
use crate::security::apply_rating;

pub struct CourseService {
    store: Arc<dyn Store>,
}

impl CourseService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    pub async fn list_courses(&self) -> Result<Vec<Course>> {
        self.store.list_courses().await
    }

    /// Create a course owned by `actor`
    pub async fn create_course(&self, actor: Uuid, input: CourseInput) -> Result<Course> {
        let title = required_text(input.title, "Title is required")?;
        let url = required_text(input.url, "Url is required")?;
        let cost = input
            .cost
            .ok_or_else(|| AppError::Validation("Cost is required".to_string()))?;

        let course = NewCourse {
            title,
            description: input.description,
            url: normalize_url(&url),
            cost,
            course_type: input.course_type,
            framework: input.framework,
            image: input.image,
        };

        let course = self.store.create_course(actor, course).await?;
        tracing::info!(course_id = %course.id, user_id = %actor, "course created");
        Ok(course)
    }

    /// Update a course the caller owns; absent optional fields keep their value
    pub async fn update_course(
        &self,
        actor: Uuid,
        id: Uuid,
        input: CourseInput,
    ) -> Result<Course> {
        let changes = CourseChanges {
            title: required_text(input.title, "Title is required")?,
            description: input.description,
            url: input
                .url
                .filter(|u| !u.trim().is_empty())
                .map(|u| normalize_url(&u)),
            cost: input.cost,
            course_type: input.course_type,
            framework: input.framework,
            image: input.image,
        };

        let course = self
            .store
            .update_course(id, actor, changes)
            .await?
            .ok_or(AppError::NotFoundOrDenied(Resource::Course))?;

        tracing::info!(course_id = %id, user_id = %actor, "course updated");
        Ok(course)
    }

    /// Delete a course the caller owns, returning it
    pub async fn delete_course(&self, actor: Uuid, id: Uuid) -> Result<Course> {
        let course = self
            .store
            .delete_course(id, actor)
            .await?
            .ok_or(AppError::NotFoundOrDenied(Resource::Course))?;

        tracing::info!(course_id = %id, user_id = %actor, "course deleted");
        Ok(course)
    }

    /// Rate a course once per identity; the new value replaces `rate`
    pub async fn rate_course(&self, actor: Uuid, id: Uuid, rate: f64) -> Result<Course> {
        let course = self
            .store
            .find_course(id)
            .await?
            .ok_or(AppError::NotFoundOrDenied(Resource::Course))?;

        if apply_rating(&course.learner, actor, rate).is_err() {
            tracing::debug!(course_id = %id, user_id = %actor, "repeat rating rejected");
            return Err(AppError::AlreadyRated);
        }

        // The store re-checks membership in the same write, so a concurrent
        // duplicate lands here as AlreadyRated.
        match self.store.record_rating(id, actor, rate).await? {
            RatingOutcome::Rated(course) => {
                tracing::info!(course_id = %id, user_id = %actor, rate, "course rated");
                Ok(course)
            }
            RatingOutcome::AlreadyRated => Err(AppError::AlreadyRated),
            RatingOutcome::NotFound => Err(AppError::NotFoundOrDenied(Resource::Course)),
        }
    }
}
