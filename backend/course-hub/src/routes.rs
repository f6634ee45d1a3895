/// Route table
///
/// Everything under `/api/posts` and `/api/courses` sits behind
/// `JwtAuthMiddleware`. Under `/api/auth` only `GET /api/auth` does.
use actix_middleware::JwtAuthMiddleware;
use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;
use crate::handlers::{auth, courses, health, posts};
use crate::AppState;

/// Render malformed JSON bodies with the common error envelope
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::debug!("rejected JSON body: {}", err);
    AppError::Validation(format!("Invalid JSON body: {}", err)).into()
}

pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>) {
    let auth_layer = JwtAuthMiddleware::new(state.keys.clone());

    cfg.app_data(state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .route("/api/health", web::get().to(health::health))
        .route("/api/health/live", web::get().to(health::liveness))
        .service(
            web::scope("/api/auth")
                .route("/register", web::post().to(auth::register))
                .route("/login", web::post().to(auth::login))
                .service(
                    web::resource("")
                        .wrap(auth_layer.clone())
                        .route(web::get().to(auth::current_user)),
                ),
        )
        .service(
            web::scope("/api/posts")
                .wrap(auth_layer.clone())
                .service(
                    web::resource("")
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post)),
                )
                .service(
                    web::resource("/updatelike/{id}").route(web::patch().to(posts::update_like)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post)),
                ),
        )
        .service(
            web::scope("/api/courses")
                .wrap(auth_layer)
                .service(
                    web::resource("")
                        .route(web::get().to(courses::list_courses))
                        .route(web::post().to(courses::create_course)),
                )
                .service(
                    web::resource("/update-rate/{id}")
                        .route(web::patch().to(courses::update_rate)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::put().to(courses::update_course))
                        .route(web::delete().to(courses::delete_course)),
                ),
        );
}
