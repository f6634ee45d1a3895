/// In-memory store
///
/// Backs the integration tests and `STORE_BACKEND=memory`. Each conditional
/// write runs its check and its mutation under one write lock. When two locks
/// are held, `posts`/`courses` is always taken before `users`.
///
/// Owners are not checked against `users`: a record created for an unknown
/// subject is kept and rendered with `username: null`. `PgStore` rejects the
/// same write as unauthenticated through the `posted_by` foreign key.
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{CourseStore, PostStore, RatingOutcome, Store, UserStore};
use crate::error::{AppError, Result};
use crate::models::{Course, CourseChanges, NewCourse, NewPost, Owner, Post, PostChanges, User};
use crate::security::{apply_rating, authorize, Operation};

#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    posts: RwLock<Vec<Post>>,
    courses: RwLock<Vec<Course>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Resolve the owner's current username
fn owner_of(users: &[User], id: Uuid) -> Owner {
    Owner {
        id,
        username: users
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.username.clone()),
    }
}

fn expand_post(mut post: Post, users: &[User]) -> Post {
    post.posted_by = owner_of(users, post.posted_by.id);
    post
}

fn expand_course(mut course: Course, users: &[User]) -> Course {
    course.posted_by = owner_of(users, course.posted_by.id);
    course
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> Result<User> {
        let mut users = self.users.write().await;
        if users.iter().any(|u| u.username == username) {
            return Err(AppError::Conflict("Username already taken".to_string()));
        }

        let user = User {
            id: Uuid::new_v4(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = self.posts.read().await;
        let users = self.users.read().await;
        Ok(posts
            .iter()
            .cloned()
            .map(|p| expand_post(p, &users))
            .collect())
    }

    async fn create_post(&self, owner: Uuid, post: NewPost) -> Result<Post> {
        let now = Utc::now();
        let record = Post {
            id: Uuid::new_v4(),
            title: post.title,
            content: post.content,
            image: post.image,
            like: post.like,
            posted_by: Owner {
                id: owner,
                username: None,
            },
            created_at: now,
            updated_at: now,
        };

        let mut posts = self.posts.write().await;
        posts.push(record.clone());
        let users = self.users.read().await;
        Ok(expand_post(record, &users))
    }

    async fn update_post(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: PostChanges,
    ) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        if !authorize(owner, post.posted_by.id, Operation::Update).is_allowed() {
            return Ok(None);
        }

        post.title = changes.title;
        post.content = changes.content;
        if let Some(like) = changes.like {
            post.like = like;
        }
        if let Some(image) = changes.image {
            post.image = Some(image);
        }
        post.updated_at = Utc::now();

        let updated = post.clone();
        let users = self.users.read().await;
        Ok(Some(expand_post(updated, &users)))
    }

    async fn delete_post(&self, id: Uuid, owner: Uuid) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(index) = posts.iter().position(|p| p.id == id) else {
            return Ok(None);
        };
        if !authorize(owner, posts[index].posted_by.id, Operation::Delete).is_allowed() {
            return Ok(None);
        }

        let removed = posts.remove(index);
        let users = self.users.read().await;
        Ok(Some(expand_post(removed, &users)))
    }

    async fn set_post_like(&self, id: Uuid, like: i64) -> Result<Option<Post>> {
        let mut posts = self.posts.write().await;
        let Some(post) = posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        post.like = like;
        post.updated_at = Utc::now();

        let updated = post.clone();
        let users = self.users.read().await;
        Ok(Some(expand_post(updated, &users)))
    }
}

#[async_trait]
impl CourseStore for MemoryStore {
    async fn list_courses(&self) -> Result<Vec<Course>> {
        let courses = self.courses.read().await;
        let users = self.users.read().await;
        Ok(courses
            .iter()
            .cloned()
            .map(|c| expand_course(c, &users))
            .collect())
    }

    async fn create_course(&self, owner: Uuid, course: NewCourse) -> Result<Course> {
        let now = Utc::now();
        let record = Course {
            id: Uuid::new_v4(),
            title: course.title,
            description: course.description,
            url: course.url,
            cost: course.cost,
            course_type: course.course_type,
            framework: course.framework,
            rate: 0.0,
            learner: Vec::new(),
            image: course.image,
            posted_by: Owner {
                id: owner,
                username: None,
            },
            created_at: now,
            updated_at: now,
        };

        let mut courses = self.courses.write().await;
        courses.push(record.clone());
        let users = self.users.read().await;
        Ok(expand_course(record, &users))
    }

    async fn update_course(
        &self,
        id: Uuid,
        owner: Uuid,
        changes: CourseChanges,
    ) -> Result<Option<Course>> {
        let mut courses = self.courses.write().await;
        let Some(course) = courses.iter_mut().find(|c| c.id == id) else {
            return Ok(None);
        };
        if !authorize(owner, course.posted_by.id, Operation::Update).is_allowed() {
            return Ok(None);
        }

        course.title = changes.title;
        if let Some(description) = changes.description {
            course.description = Some(description);
        }
        if let Some(url) = changes.url {
            course.url = url;
        }
        if let Some(cost) = changes.cost {
            course.cost = cost;
        }
        if let Some(course_type) = changes.course_type {
            course.course_type = Some(course_type);
        }
        if let Some(framework) = changes.framework {
            course.framework = Some(framework);
        }
        if let Some(image) = changes.image {
            course.image = Some(image);
        }
        course.updated_at = Utc::now();

        let updated = course.clone();
        let users = self.users.read().await;
        Ok(Some(expand_course(updated, &users)))
    }

    async fn delete_course(&self, id: Uuid, owner: Uuid) -> Result<Option<Course>> {
        let mut courses = self.courses.write().await;
        let Some(index) = courses.iter().position(|c| c.id == id) else {
            return Ok(None);
        };
        if !authorize(owner, courses[index].posted_by.id, Operation::Delete).is_allowed() {
            return Ok(None);
        }

        let removed = courses.remove(index);
        let users = self.users.read().await;
        Ok(Some(expand_course(removed, &users)))
    }

    async fn find_course(&self, id: Uuid) -> Result<Option<Course>> {
        let courses = self.courses.read().await;
        let users = self.users.read().await;
        Ok(courses
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .map(|c| expand_course(c, &users)))
    }

    async fn record_rating(&self, id: Uuid, actor: Uuid, rate: f64) -> Result<RatingOutcome> {
        let mut courses = self.courses.write().await;
        let Some(course) = courses.iter_mut().find(|c| c.id == id) else {
            return Ok(RatingOutcome::NotFound);
        };

        let Ok(change) = apply_rating(&course.learner, actor, rate) else {
            return Ok(RatingOutcome::AlreadyRated);
        };
        course.rate = change.rate;
        course.learner = change.learner;
        course.updated_at = Utc::now();

        let updated = course.clone();
        let users = self.users.read().await;
        Ok(RatingOutcome::Rated(expand_course(updated, &users)))
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}
