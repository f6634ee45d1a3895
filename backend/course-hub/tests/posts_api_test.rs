//! Post endpoints: validation, visibility, ownership and likes

mod common;

use actix_web::{
    http::{header, StatusCode},
    test, App,
};
use serde_json::json;
use uuid::Uuid;

use common::{app_config, bearer, multipart_request, state, status_and_json, user, Form};

macro_rules! create_post {
    ($app:expr, $token:expr, $form:expr) => {{
        let req = multipart_request(test::TestRequest::post(), "/api/posts", $token, $form);
        let (status, body) =
            status_and_json(test::call_service($app, req.to_request()).await).await;
        assert_eq!(status, StatusCode::OK);
        body["post"].clone()
    }};
}

#[actix_web::test]
async fn test_create_requires_title_and_stores_nothing() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, token) = user(&state, "alice").await;

    for form in [
        Form::new(),
        Form::new().text("title", ""),
        Form::new().text("content", "no title"),
    ] {
        let req = multipart_request(test::TestRequest::post(), "/api/posts", &token, form);
        let (status, body) =
            status_and_json(test::call_service(&app, req.to_request()).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "success": false, "message": "Title is required" })
        );
    }

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(body["posts"], json!([]));
}

#[actix_web::test]
async fn test_create_with_bare_closing_boundary_reports_missing_title() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, token) = user(&state, "alice").await;

    for uri in ["/api/posts", "/api/courses"] {
        let req = test::TestRequest::post()
            .uri(uri)
            .insert_header(bearer(&token))
            .insert_header((
                header::CONTENT_TYPE,
                "multipart/form-data; boundary=abc".to_string(),
            ))
            .set_payload("--abc--\r\n")
            .to_request();
        let (status, body) = status_and_json(test::call_service(&app, req).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Title is required");
    }
}

#[actix_web::test]
async fn test_create_with_body_cut_after_a_part_is_malformed() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, token) = user(&state, "alice").await;

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .insert_header((
            header::CONTENT_TYPE,
            "multipart/form-data; boundary=abc".to_string(),
        ))
        .set_payload("--abc\r\nContent-Disposition: form-data; name=\"title\"\r\n\r\nHello")
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Malformed multipart body");

    let req = test::TestRequest::get()
        .uri("/api/posts")
        .insert_header(bearer(&token))
        .to_request();
    let (_, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(body["posts"], json!([]));
}

#[actix_web::test]
async fn test_create_with_image_and_defaults() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (alice, token) = user(&state, "alice").await;

    let form = Form::new()
        .text("title", "Hello")
        .file("image", b"\x89PNG", "image/png");
    let req = multipart_request(test::TestRequest::post(), "/api/posts", &token, form);
    let (status, body) = status_and_json(test::call_service(&app, req.to_request()).await).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post success !");
    let post = &body["post"];
    assert_eq!(post["title"], "Hello");
    assert_eq!(post["content"], "");
    assert_eq!(post["like"], 0);
    assert_eq!(post["image"]["data"], "iVBORw==");
    assert_eq!(post["image"]["contentType"], "image/png");
    assert_eq!(post["postedBy"]["_id"], alice.to_string());
    assert_eq!(post["postedBy"]["username"], "alice");
    assert!(post["_id"].is_string());
}

#[actix_web::test]
async fn test_list_shows_every_owner() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, alice) = user(&state, "alice").await;
    let (_, bob) = user(&state, "bob").await;

    let _from_alice = create_post!(&app, &alice, Form::new().text("title", "from alice"));
    let _from_bob = create_post!(&app, &bob, Form::new().text("title", "from bob"));

    for token in [&alice, &bob] {
        let req = test::TestRequest::get()
            .uri("/api/posts")
            .insert_header(bearer(token))
            .to_request();
        let (_, body) = status_and_json(test::call_service(&app, req).await).await;
        let owners: Vec<&str> = body["posts"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["postedBy"]["username"].as_str().unwrap())
            .collect();
        assert_eq!(owners, vec!["alice", "bob"]);
    }
}

#[actix_web::test]
async fn test_only_owner_can_update_or_delete() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (alice_id, alice) = user(&state, "alice").await;
    let (bob_id, bob) = user(&state, "bob").await;

    let post = create_post!(
        &app,
        &alice,
        Form::new().text("title", "original").text("content", "body")
    );
    let uri = format!("/api/posts/{}", post["_id"].as_str().unwrap());

    // Bob cannot touch it, even naming himself as the owner
    let form = Form::new()
        .text("title", "hijacked")
        .text("postedBy", &bob_id.to_string());
    let req = multipart_request(test::TestRequest::put(), &uri, &bob, form);
    let (status, body) = status_and_json(test::call_service(&app, req.to_request()).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Post not found or user not authorised");

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&bob))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Post not found or user not authorised");

    // Alice updates: content is cleared when omitted, owner stays Alice
    let form = Form::new()
        .text("title", "edited")
        .text("postedBy", &bob_id.to_string());
    let req = multipart_request(test::TestRequest::put(), &uri, &alice, form);
    let (status, body) = status_and_json(test::call_service(&app, req.to_request()).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Success!");
    assert_eq!(body["post"]["title"], "edited");
    assert_eq!(body["post"]["content"], "");
    assert_eq!(body["post"]["postedBy"]["_id"], alice_id.to_string());

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&alice))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["post"]["_id"], post["_id"]);
    assert_eq!(body["post"]["title"], "edited");

    // Gone now: same answer as for a foreign record
    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header(bearer(&alice))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Post not found or user not authorised");
}

#[actix_web::test]
async fn test_malformed_id_is_not_found_or_denied() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, token) = user(&state, "alice").await;

    let req = test::TestRequest::delete()
        .uri("/api/posts/not-a-uuid")
        .insert_header(bearer(&token))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Post not found or user not authorised");
}

#[actix_web::test]
async fn test_update_keeps_image_when_none_sent() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, token) = user(&state, "alice").await;

    let post = create_post!(
        &app,
        &token,
        Form::new()
            .text("title", "pic")
            .text("like", "4")
            .file("image", b"abc", "image/jpeg")
    );
    let uri = format!("/api/posts/{}", post["_id"].as_str().unwrap());

    let req = multipart_request(
        test::TestRequest::put(),
        &uri,
        &token,
        Form::new().text("title", "pic 2"),
    );
    let (status, body) = status_and_json(test::call_service(&app, req.to_request()).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["image"], post["image"]);
    assert_eq!(body["post"]["like"], 4);
}

#[actix_web::test]
async fn test_like_patch_is_open_to_any_user() {
    let state = state();
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, alice) = user(&state, "alice").await;
    let (_, bob) = user(&state, "bob").await;

    let post = create_post!(&app, &alice, Form::new().text("title", "likeable"));
    let uri = format!("/api/posts/updatelike/{}", post["_id"].as_str().unwrap());

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&bob))
        .set_json(json!({ "like": 5 }))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["post"]["like"], 5);
    assert_eq!(body["post"]["postedBy"]["username"], "alice");

    let req = test::TestRequest::patch()
        .uri(&uri)
        .insert_header(bearer(&bob))
        .set_json(json!({}))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Like is required");

    let req = test::TestRequest::patch()
        .uri(&format!("/api/posts/updatelike/{}", Uuid::new_v4()))
        .insert_header(bearer(&bob))
        .set_json(json!({ "like": 1 }))
        .to_request();
    let (status, body) = status_and_json(test::call_service(&app, req).await).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Post not found or user not authorised");
}

#[actix_web::test]
async fn test_upload_limit_is_enforced() {
    let state = common::state_with_limit(16);
    let app = test::init_service(App::new().configure(app_config(state.clone()))).await;
    let (_, token) = user(&state, "alice").await;

    let form = Form::new()
        .text("title", "big")
        .file("image", &[0u8; 64], "image/png");
    let req = multipart_request(test::TestRequest::post(), "/api/posts", &token, form);
    let (status, body) = status_and_json(test::call_service(&app, req.to_request()).await).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Upload exceeds 16 bytes limit");
}
