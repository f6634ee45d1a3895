use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::owner_insert_error;
use crate::error::AppError;
use crate::models::{Image, NewPost, Owner, Post, PostChanges};

/// Post joined with its owner's username
#[derive(Debug, FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    content: String,
    image_data: Option<Vec<u8>>,
    image_content_type: Option<String>,
    like_count: i64,
    posted_by: Uuid,
    owner_username: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Post {
            id: row.id,
            title: row.title,
            content: row.content,
            image: Image::from_columns(row.image_data, row.image_content_type),
            like: row.like_count,
            posted_by: Owner {
                id: row.posted_by,
                username: row.owner_username,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const POST_COLUMNS: &str = "p.id, p.title, p.content, p.image_data, p.image_content_type, \
     p.like_count, p.posted_by, u.username AS owner_username, p.created_at, p.updated_at";

/// Wrap a data-modifying statement so its RETURNING row comes back with the owner expanded
fn with_owner(cte: &str) -> String {
    format!(
        "WITH p AS ({cte} RETURNING *) \
         SELECT {POST_COLUMNS} FROM p LEFT JOIN users u ON u.id = p.posted_by"
    )
}

/// List all posts in insertion order
pub async fn list_posts(pool: &PgPool) -> Result<Vec<Post>, sqlx::Error> {
    let sql = format!(
        "SELECT {POST_COLUMNS} FROM posts p LEFT JOIN users u ON u.id = p.posted_by \
         ORDER BY p.created_at ASC, p.id ASC"
    );

    let rows = sqlx::query_as::<_, PostRow>(&sql).fetch_all(pool).await?;
    Ok(rows.into_iter().map(Post::from).collect())
}

/// Create a post owned by `owner`
pub async fn create_post(
    pool: &PgPool,
    owner: Uuid,
    post: &NewPost,
) -> Result<Post, AppError> {
    let sql = with_owner(
        "INSERT INTO posts (title, content, like_count, image_data, image_content_type, posted_by) \
         VALUES ($1, $2, $3, $4, $5, $6)",
    );

    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(&post.title)
        .bind(&post.content)
        .bind(post.like)
        .bind(post.image.as_ref().map(|i| i.data.as_slice()))
        .bind(post.image.as_ref().map(|i| i.content_type.as_str()))
        .bind(owner)
        .fetch_one(pool)
        .await
        .map_err(owner_insert_error)?;
    Ok(row.into())
}

/// Update a post only if `owner` created it.
/// `None` covers both a missing post and a foreign one.
pub async fn update_post(
    pool: &PgPool,
    id: Uuid,
    owner: Uuid,
    changes: &PostChanges,
) -> Result<Option<Post>, sqlx::Error> {
    let sql = with_owner(
        "UPDATE posts SET \
             title = $3, \
             content = $4, \
             like_count = COALESCE($5, like_count), \
             image_data = COALESCE($6, image_data), \
             image_content_type = CASE WHEN $6 IS NULL THEN image_content_type ELSE $7 END, \
             updated_at = NOW() \
         WHERE id = $1 AND posted_by = $2",
    );

    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .bind(owner)
        .bind(&changes.title)
        .bind(&changes.content)
        .bind(changes.like)
        .bind(changes.image.as_ref().map(|i| i.data.as_slice()))
        .bind(changes.image.as_ref().map(|i| i.content_type.as_str()))
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Post::from))
}

/// Delete a post only if `owner` created it, returning the removed record
pub async fn delete_post(
    pool: &PgPool,
    id: Uuid,
    owner: Uuid,
) -> Result<Option<Post>, sqlx::Error> {
    let sql = with_owner("DELETE FROM posts WHERE id = $1 AND posted_by = $2");

    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .bind(owner)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Post::from))
}

/// Overwrite the like counter of any post
pub async fn set_like(pool: &PgPool, id: Uuid, like: i64) -> Result<Option<Post>, sqlx::Error> {
    let sql = with_owner("UPDATE posts SET like_count = $2, updated_at = NOW() WHERE id = $1");

    let row = sqlx::query_as::<_, PostRow>(&sql)
        .bind(id)
        .bind(like)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(Post::from))
}
