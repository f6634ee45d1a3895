/// Course handlers - HTTP endpoints under /api/courses
use actix_middleware::UserId;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use super::{parse_id, UploadForm};
use crate::error::{AppError, Resource, Result};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RateRequest {
    pub rate: Option<f64>,
}

/// GET /api/courses
pub async fn list_courses(state: web::Data<AppState>, _user_id: UserId) -> Result<HttpResponse> {
    let courses = state.courses.list_courses().await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "courses": courses })))
}

/// POST /api/courses
pub async fn create_course(
    state: web::Data<AppState>,
    user_id: UserId,
    payload: Multipart,
) -> Result<HttpResponse> {
    let input = UploadForm::read(payload, state.upload_limit)
        .await?
        .into_course_input()?;
    let course = state.courses.create_course(user_id.0, input).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Post course success !",
        "course": course,
    })))
}

/// PUT /api/courses/{id}
pub async fn update_course(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
    payload: Multipart,
) -> Result<HttpResponse> {
    let id = parse_id(&path, Resource::Course)?;
    let input = UploadForm::read(payload, state.upload_limit)
        .await?
        .into_course_input()?;
    let course = state.courses.update_course(user_id.0, id, input).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Success!",
        "course": course,
    })))
}

/// DELETE /api/courses/{id}
pub async fn delete_course(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, Resource::Course)?;
    let course = state.courses.delete_course(user_id.0, id).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "course": course })))
}

/// PATCH /api/courses/update-rate/{id}
pub async fn update_rate(
    state: web::Data<AppState>,
    user_id: UserId,
    path: web::Path<String>,
    req: web::Json<RateRequest>,
) -> Result<HttpResponse> {
    let id = parse_id(&path, Resource::Course)?;
    let rate = req
        .rate
        .filter(|r| r.is_finite())
        .ok_or_else(|| AppError::Validation("Rate is required".to_string()))?;
    let course = state.courses.rate_course(user_id.0, id, rate).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Success!",
        "course": course,
    })))
}
