use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use super::{Image, Owner};

/// A post as returned to clients, with its owner expanded
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Image>,
    pub like: i64,
    #[serde(rename = "postedBy")]
    pub posted_by: Owner,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Fields submitted on create/update, already parsed from the form
#[derive(Debug, Clone, Default)]
pub struct PostInput {
    pub title: Option<String>,
    pub content: Option<String>,
    pub like: Option<i64>,
    pub image: Option<Image>,
}

/// Validated insert; the owner is passed to the store separately
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub like: i64,
    pub image: Option<Image>,
}

/// Whitelisted update set.
///
/// `title` and `content` are always written; `like` and `image` only when
/// present. `posted_by` is immutable after insert, so it has no field here.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub like: Option<i64>,
    pub image: Option<Image>,
}
