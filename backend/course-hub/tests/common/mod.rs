//! Shared helpers for the course-hub API tests
#![allow(dead_code)]

use actix_web::{body::MessageBody, dev::ServiceResponse, http::header, test, web};
use course_hub::db::MemoryStore;
use course_hub::models::AuthRequest;
use course_hub::{routes, AppState};
use crypto_core::JwtKeys;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const BOUNDARY: &str = "----course-hub-test-boundary";

pub fn keys() -> Arc<JwtKeys> {
    Arc::new(JwtKeys::from_secret(&"t".repeat(48), Duration::from_secs(3600)).unwrap())
}

/// App state over a fresh in-memory store
pub fn state() -> web::Data<AppState> {
    state_with_limit(1024 * 1024)
}

pub fn state_with_limit(upload_limit: usize) -> web::Data<AppState> {
    web::Data::new(AppState::new(
        Arc::new(MemoryStore::new()),
        keys(),
        upload_limit,
    ))
}

/// Route configuration for `App::configure`
pub fn app_config(state: web::Data<AppState>) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| routes::configure(cfg, state)
}

/// Register a user through the service layer and return `(id, token)`
pub async fn user(state: &web::Data<AppState>, username: &str) -> (Uuid, String) {
    let token = state
        .auth
        .register(AuthRequest {
            username: username.to_string(),
            password: "correct horse".to_string(),
        })
        .await
        .unwrap();
    let id = state.keys.verify(&token).unwrap();
    (id, token)
}

pub fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", token))
}

/// Builder for `multipart/form-data` request bodies
#[derive(Default)]
pub struct Form {
    body: Vec<u8>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, data: &[u8], content_type: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; \
                 filename=\"upload.bin\"\r\nContent-Type: {content_type}\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Header pair and finished body
    pub fn finish(mut self) -> ((header::HeaderName, String), Vec<u8>) {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        (
            (
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            ),
            self.body,
        )
    }
}

/// Multipart request with a bearer token
pub fn multipart_request(
    req: test::TestRequest,
    uri: &str,
    token: &str,
    form: Form,
) -> test::TestRequest {
    let (content_type, body) = form.finish();
    req.uri(uri)
        .insert_header(bearer(token))
        .insert_header(content_type)
        .set_payload(body)
}

/// Status and JSON body of a response
pub async fn status_and_json(
    resp: ServiceResponse<impl MessageBody>,
) -> (actix_web::http::StatusCode, Value) {
    let status = resp.status();
    let body: Value = test::read_body_json(resp).await;
    (status, body)
}
