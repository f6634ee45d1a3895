use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::AppState;

/// GET /api/health - readiness, pings the store
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    match state.store.ping().await {
        Ok(()) => HttpResponse::Ok().json(json!({ "success": true, "status": "ok" })),
        Err(e) => {
            tracing::error!("health check failed: {}", e);
            HttpResponse::ServiceUnavailable().json(json!({
                "success": false,
                "status": "unavailable",
            }))
        }
    }
}

/// GET /api/health/live
pub async fn liveness() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "success": true, "status": "alive" }))
}
