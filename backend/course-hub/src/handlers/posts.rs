/// Post handlers - HTTP endpoints under /api/posts
use actix_middleware::UserId;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::{parse_id, UploadForm};
use crate::error::{AppError, Resource, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct LikeRequest {
    pub like: Option<i64>,
}

/// GET /api/posts
pub async fn list_posts(state: web::Data<AppState>, _user_id: UserId) -> Result<HttpResponse> {
    let posts = state.posts.list_posts().await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "posts": posts })))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    user_id: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let input = UploadForm::read(payload, state.upload_limit)
        .await?
        .into_post_input()?;
    let post = state.posts.create_post(user_id.0, input).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post success !",
        "post": post,
    })))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let id = parse_id(&path, Resource::Post)?;
    let input = UploadForm::read(payload, state.upload_limit)
        .await?
        .into_post_input()?;
    let post = state.posts.update_post(user_id.0, id, input).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Success!",
        "post": post,
    })))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, Resource::Post)?;
    let post = state.posts.delete_post(user_id.0, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "post": post })))
}

/// PATCH /api/posts/updatelike/{id}
pub async fn update_like(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
    req: web::Json<LikeRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, Resource::Post)?;
    let like = req
        .like
        .ok_or_else(|| AppError::Validation("Like is required".to_string()))?;
    let post = state.posts.set_like(user_id.0, id, like).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Success!",
        "post": post,
    })))
}
