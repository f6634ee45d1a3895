/// Course Hub Library
///
/// Token-authenticated REST backend for posts and courses. Every record is
/// owned by the user who created it; only that user may update or delete it.
/// Courses additionally accept one rating per user.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and multipart upload parsing
/// - `models`: Data structures for users, posts, courses and images
/// - `services`: Business logic layer
/// - `db`: Store traits with PostgreSQL and in-memory implementations
/// - `security`: Ownership gate, rating gate and password hashing
/// - `routes`: Route table and JSON extractor configuration
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod security;
pub mod services;

use crypto_core::JwtKeys;
use std::sync::Arc;

pub use config::Config;
pub use error::{AppError, Result};

use db::Store;
use services::{AuthService, CourseService, PostService};

/// Shared per-worker state handed to every handler
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub keys: Arc<JwtKeys>,
    pub auth: AuthService,
    pub posts: PostService,
    pub courses: CourseService,
    /// Maximum multipart body size in bytes
    pub upload_limit: usize,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, keys: Arc<JwtKeys>, upload_limit: usize) -> Self {
        Self {
            auth: AuthService::new(store.clone(), keys.clone()),
            posts: PostService::new(store.clone()),
            courses: CourseService::new(store.clone()),
            store,
            keys,
            upload_limit,
        }
    }
}
