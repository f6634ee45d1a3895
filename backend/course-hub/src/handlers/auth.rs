/// Auth handlers - register, login and current user
use actix_middleware::UserId;
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::error::Result;
use crate::models::AuthRequest;
use crate::AppState;

/// POST /api/auth/register
pub async fn register(
    state: web::Data<AppState>,
    req: web::Json<AuthRequest>,
) -> Result<HttpResponse> {
    let token = state.auth.register(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User created successfully",
        "accessToken": token,
    })))
}

/// POST /api/auth/login
pub async fn login(
    state: web::Data<AppState>,
    req: web::Json<AuthRequest>,
) -> Result<HttpResponse> {
    let token = state.auth.login(req.into_inner()).await?;

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "User logged in successfully",
        "accessToken": token,
    })))
}

/// GET /api/auth
pub async fn current_user(state: web::Data<AppState>, user_id: UserId) -> Result<HttpResponse> {
    let user = state.auth.current_user(user_id.0).await?;

    Ok(HttpResponse::Ok().json(json!({ "success": true, "user": user })))
}
