/// Post service - creation, listing, owner-gated update/delete and likes
use std::sync::Arc;
use uuid::Uuid;

use super::required_text;
use crate::db::Store;
use crate::error::{AppError, Resource, Result};
use crate::models::{NewPost, Post, PostChanges, PostInput};

pub struct PostService {
    store: Arc<dyn Store>,
}

impl PostService {
    pub fn new(store: Arc<dyn Store>) -> Self {
        Self { store }
    }

    /// All posts from every owner
    pub async fn list_posts(&self) -> Result<Vec<Post>> {
        self.store.list_posts().await
    }

    /// Create a post owned by `actor`
    pub async fn create_post(&self, actor: Uuid, input: PostInput) -> Result<Post> {
        let post = NewPost {
            title: required_text(input.title, "Title is required")?,
            content: input.content.unwrap_or_default(),
            like: input.like.unwrap_or(0),
            image: input.image,
        };

        let post = self.store.create_post(actor, post).await?;
        tracing::info!(post_id = %post.id, user_id = %actor, "post created");
        Ok(post)
    }

    /// Update a post the caller owns.
    ///
    /// Absent `content` clears it; absent `like` and `image` keep the stored value.
    pub async fn update_post(&self, actor: Uuid, id: Uuid, input: PostInput) -> Result<Post> {
        let changes = PostChanges {
            title: required_text(input.title, "Title is required")?,
            content: input.content.unwrap_or_default(),
            like: input.like,
            image: input.image,
        };

        let post = self
            .store
            .update_post(id, actor, changes)
            .await?
            .ok_or(AppError::NotFoundOrDenied(Resource::Post))?;

        tracing::info!(post_id = %id, user_id = %actor, "post updated");
        Ok(post)
    }

    /// Delete a post the caller owns, returning it
    pub async fn delete_post(&self, actor: Uuid, id: Uuid) -> Result<Post> {
        let post = self
            .store
            .delete_post(id, actor)
            .await?
            .ok_or(AppError::NotFoundOrDenied(Resource::Post))?;

        tracing::info!(post_id = %id, user_id = %actor, "post deleted");
        Ok(post)
    }

    /// Overwrite the like counter; any authenticated user may do this
    pub async fn set_like(&self, actor: Uuid, id: Uuid, like: i64) -> Result<Post> {
        let post = self
            .store
            .set_post_like(id, like)
            .await?
            .ok_or(AppError::NotFoundOrDenied(Resource::Post))?;

        tracing::debug!(post_id = %id, user_id = %actor, like, "post like updated");
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::MemoryStore;
    use crate::models::Image;

    fn input(title: Option<&str>) -> PostInput {
        PostInput {
            title: title.map(str::to_string),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_create_requires_title_and_stores_nothing() {
        let svc = PostService::new(Arc::new(MemoryStore::new()));
        let actor = Uuid::new_v4();

        for title in [None, Some(""), Some("   ")] {
            let err = svc.create_post(actor, input(title)).await.unwrap_err();
            assert_eq!(err.to_string(), "Title is required");
        }
        assert!(svc.list_posts().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_defaults() {
        let svc = PostService::new(Arc::new(MemoryStore::new()));
        let actor = Uuid::new_v4();

        let post = svc.create_post(actor, input(Some("hi"))).await.unwrap();
        assert_eq!(post.content, "");
        assert_eq!(post.like, 0);
        assert!(post.image.is_none());
        assert_eq!(post.posted_by.id, actor);
    }

    #[tokio::test]
    async fn test_update_clears_content_and_keeps_image() {
        let svc = PostService::new(Arc::new(MemoryStore::new()));
        let actor = Uuid::new_v4();
        let created = svc
            .create_post(
                actor,
                PostInput {
                    title: Some("a".into()),
                    content: Some("body".into()),
                    like: Some(3),
                    image: Some(Image::new(vec![1, 2], None)),
                },
            )
            .await
            .unwrap();

        let updated = svc
            .update_post(actor, created.id, input(Some("b")))
            .await
            .unwrap();
        assert_eq!(updated.title, "b");
        assert_eq!(updated.content, "");
        assert_eq!(updated.like, 3);
        assert_eq!(updated.image, created.image);
    }

    #[tokio::test]
    async fn test_non_owner_gets_not_found_or_denied() {
        let svc = PostService::new(Arc::new(MemoryStore::new()));
        let owner = Uuid::new_v4();
        let other = Uuid::new_v4();
        let post = svc.create_post(owner, input(Some("mine"))).await.unwrap();

        let err = svc
            .update_post(other, post.id, input(Some("x")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrDenied(Resource::Post)));

        let err = svc.delete_post(other, post.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrDenied(Resource::Post)));

        let deleted = svc.delete_post(owner, post.id).await.unwrap();
        assert_eq!(deleted.id, post.id);
    }

    #[tokio::test]
    async fn test_like_is_not_owner_gated() {
        let svc = PostService::new(Arc::new(MemoryStore::new()));
        let post = svc
            .create_post(Uuid::new_v4(), input(Some("p")))
            .await
            .unwrap();

        let liked = svc.set_like(Uuid::new_v4(), post.id, 7).await.unwrap();
        assert_eq!(liked.like, 7);

        let err = svc
            .set_like(Uuid::new_v4(), Uuid::new_v4(), 1)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFoundOrDenied(Resource::Post)));
    }
}
