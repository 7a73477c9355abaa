use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use sea_orm::Database;
use serde_json::{Value, json};
use tower::ServiceExt;

use engine::{Engine, MAX_IMAGE_BYTES};
use migration::MigratorTrait;
use server::{ServerState, router};

use std::sync::Arc;

const BOUNDARY: &str = "recipe-form-boundary";

async fn test_router() -> Router {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder().database(db).build().await.unwrap();
    router(ServerState {
        engine: Arc::new(engine),
    })
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap()
}

/// Register a user and return the session cookie (`session=<token>`).
async fn register(app: &Router, username: &str) -> String {
    let response = app
        .clone()
        .oneshot(json_request(
            "/register",
            json!({
                "username": username,
                "email": format!("{username}@example.com"),
                "password": "s3cret",
                "confirmation": "s3cret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    cookie.split(';').next().unwrap().to_string()
}

fn multipart_body(fields: &[(&str, &str)], photo: Option<&[u8]>) -> Body {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some(bytes) = photo {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"photo\"; \
                 filename=\"photo.jpg\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

fn recipe_request(cookie: &str, fields: &[(&str, &str)], photo: Option<&[u8]>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/recipes/new")
        .header(header::COOKIE, cookie)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(multipart_body(fields, photo))
        .unwrap()
}

#[tokio::test]
async fn index_is_public_and_starts_empty() {
    let app = test_router().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["recipes"], json!([]));
}

#[tokio::test]
async fn register_sets_a_session_cookie() {
    let app = test_router().await;

    let cookie = register(&app, "alice").await;
    assert!(cookie.starts_with("session="));

    // The cookie opens protected routes.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/recipes/new")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let app = test_router().await;
    register(&app, "alice").await;

    let response = app
        .oneshot(json_request(
            "/register",
            json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "s3cret",
                "confirmation": "s3cret",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Username already taken.");
}

#[tokio::test]
async fn mismatched_passwords_are_rejected() {
    let app = test_router().await;

    let response = app
        .oneshot(json_request(
            "/register",
            json!({
                "username": "alice",
                "email": "alice@example.com",
                "password": "s3cret",
                "confirmation": "different",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Passwords must match.");
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let app = test_router().await;
    register(&app, "alice").await;

    let response = app
        .oneshot(json_request(
            "/login",
            json!({ "username": "alice", "password": "wrong" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid username and/or password.");
}

#[tokio::test]
async fn login_opens_a_fresh_session() {
    let app = test_router().await;
    register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "/login",
            json!({ "username": "alice", "password": "s3cret" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(response.headers().contains_key(header::SET_COOKIE));
}

#[tokio::test]
async fn new_recipe_form_requires_login() {
    let app = test_router().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/recipes/new")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let cookie = register(&app, "alice").await;
    let response = app
        .oneshot(
            Request::builder()
                .uri("/recipes/new")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let units = json["units"].as_array().unwrap();
    assert_eq!(units.len(), 10);
    assert!(units.contains(&json!("cups")));
    assert!(units.contains(&json!("unit(s)")));
}

#[tokio::test]
async fn submitting_a_recipe_redirects_to_the_index() {
    let app = test_router().await;
    let cookie = register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(recipe_request(
            &cookie,
            &[
                ("title", "Tiramisu"),
                ("preparation", "Layer and chill."),
                ("notes", "Best the day after."),
                ("categories", "Dessert"),
                ("ingredient_name", "Mascarpone"),
                ("ingredient_qty", "500"),
                ("ingredient_unit", "g"),
            ],
            Some(b"jpeg bytes"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/");

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["recipes"][0]["title"], "Tiramisu");
    assert_eq!(json["recipes"][0]["author"], "alice");
    assert_eq!(json["recipes"][0]["categories"][0]["name"], "Dessert");
    assert_eq!(json["recipes"][0]["has_image"], true);
    let id = json["recipes"][0]["id"].as_i64().unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/recipes/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["ingredients"][0]["name"], "Mascarpone");
    assert_eq!(json["ingredients"][0]["quantity"], "500 g");
    assert_eq!(json["notes"], "Best the day after.");
}

#[tokio::test]
async fn blank_title_returns_the_form_with_the_message() {
    let app = test_router().await;
    let cookie = register(&app, "alice").await;

    let response = app
        .oneshot(recipe_request(
            &cookie,
            &[
                ("title", "   "),
                ("preparation", "Mix."),
                ("categories", "Dessert"),
            ],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(json["error"], "Title is required.");
    assert!(json["units"].as_array().is_some());
}

#[tokio::test]
async fn oversized_photo_gets_the_friendly_error() {
    let app = test_router().await;
    let cookie = register(&app, "alice").await;

    let photo = vec![0u8; MAX_IMAGE_BYTES + 1];
    let response = app
        .oneshot(recipe_request(
            &cookie,
            &[("title", "Cake"), ("preparation", "Bake.")],
            Some(&photo),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = body_json(response).await;
    assert_eq!(
        json["error"],
        "Image must be smaller than 2 MB. Please choose a smaller file."
    );
}

#[tokio::test]
async fn recipe_submission_requires_login() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/recipes/new")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={BOUNDARY}"),
                )
                .body(multipart_body(&[("title", "Cake")], None))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = test_router().await;
    let cookie = register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/logout")
                .header(header::COOKIE, cookie.clone())
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/recipes/new")
                .header(header::COOKIE, cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn commenting_requires_login() {
    let app = test_router().await;

    let response = app
        .oneshot(json_request("/recipes/1/comments", json!({ "body": "Hi" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comments_land_on_the_recipe() {
    let app = test_router().await;
    let alice = register(&app, "alice").await;

    let response = app
        .clone()
        .oneshot(recipe_request(
            &alice,
            &[("title", "Focaccia"), ("preparation", "Bake.")],
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let id = body_json(response).await["recipes"][0]["id"]
        .as_i64()
        .unwrap();

    let bob = register(&app, "bob").await;
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/recipes/{id}/comments"))
                .header(header::COOKIE, bob)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json!({ "body": "Delicious." }).to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/recipes/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["comments"][0]["author"], "bob");
    assert_eq!(json["comments"][0]["body"], "Delicious.");
}

#[tokio::test]
async fn unknown_recipe_detail_is_not_found() {
    let app = test_router().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/recipes/99")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
