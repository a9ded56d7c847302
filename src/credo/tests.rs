//! Route tests driving the full router.

use super::{Service, openapi, router};
use crate::credentials::{CredentialService, store::tests::TempDb};
use anyhow::Result;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header::CONTENT_TYPE},
};
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

struct TestApp {
    _db: TempDb,
    app: Router,
}

impl TestApp {
    async fn new() -> Result<Self> {
        let db = TempDb::new().await?;
        let service: Arc<Service> = Arc::new(CredentialService::new(db.store.clone()));
        Ok(Self {
            app: router(service),
            _db: db,
        })
    }

    async fn send(&self, method: Method, uri: &str, body: &Value) -> Result<(StatusCode, Value)> {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))?;
        self.call(request).await
    }

    async fn call(&self, request: Request<Body>) -> Result<(StatusCode, Value)> {
        let response = self.app.clone().oneshot(request).await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body)?
        };
        Ok((status, value))
    }
}

#[tokio::test]
async fn register_login_update_flow() -> Result<()> {
    let test = TestApp::new().await?;

    let (status, body) = test
        .send(
            Method::POST,
            "/register",
            &json!({"username": "alice", "password": "abc12345"}),
        )
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User created successfully");

    let (status, body) = test
        .send(
            Method::POST,
            "/login",
            &json!({"username": "alice", "password": "abc12345"}),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login successful");

    let (status, body) = test
        .send(
            Method::PATCH,
            "/update",
            &json!({"username": "alice", "password": "abc12345", "new_password": "newpass12"}),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password updated successfully");

    let (status, body) = test
        .send(
            Method::POST,
            "/login",
            &json!({"username": "alice", "password": "abc12345"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidCredentials");
    assert_eq!(
        body["error"],
        "Invalid login. Incorrect username or password."
    );

    let (status, _) = test
        .send(
            Method::POST,
            "/login",
            &json!({"username": "alice", "password": "newpass12"}),
        )
        .await?;
    assert_eq!(status, StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn register_rejections() -> Result<()> {
    let test = TestApp::new().await?;

    let (status, body) = test
        .send(Method::POST, "/register", &json!({"username": "alice"}))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MissingField");
    assert_eq!(body["error"], "Missing username or password");

    let (status, body) = test
        .send(
            Method::POST,
            "/register",
            &json!({"username": "", "password": "abc12345"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "MissingField");

    let (status, body) = test
        .send(
            Method::POST,
            "/register",
            &json!({"username": "alice", "password": "abcdefgh"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "WeakPassword");
    assert_eq!(
        body["error"],
        "Password must be at least 8 characters long and include at least 1 number"
    );

    test.send(
        Method::POST,
        "/register",
        &json!({"username": "alice", "password": "abc12345"}),
    )
    .await?;
    let (status, body) = test
        .send(
            Method::POST,
            "/register",
            &json!({"username": "alice", "password": "xyz98765"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "UsernameTaken");
    assert_eq!(body["error"], "Username already exists");
    Ok(())
}

#[tokio::test]
async fn update_rejections() -> Result<()> {
    let test = TestApp::new().await?;
    test.send(
        Method::POST,
        "/register",
        &json!({"username": "alice", "password": "abc12345"}),
    )
    .await?;

    let (status, body) = test
        .send(
            Method::PATCH,
            "/update",
            &json!({"username": "alice", "password": "abc12345"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing username, password, or new_password");

    let (status, body) = test
        .send(
            Method::PATCH,
            "/update",
            &json!({"username": "alice", "password": "abc12345", "new_password": "short1"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "WeakPassword");

    let (status, body) = test
        .send(
            Method::PATCH,
            "/update",
            &json!({"username": "alice", "password": "wrongpw1", "new_password": "newpass12"}),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidCredentials");
    Ok(())
}

#[tokio::test]
async fn non_json_content_type_is_415() -> Result<()> {
    let test = TestApp::new().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(CONTENT_TYPE, "text/plain")
        .body(Body::from(r#"{"username":"alice","password":"abc12345"}"#))?;
    let (status, body) = test.call(request).await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["kind"], "UnsupportedMediaType");

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .body(Body::empty())?;
    let (status, _) = test.call(request).await?;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_400() -> Result<()> {
    let test = TestApp::new().await?;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/register")
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))?;
    let (status, body) = test.call(request).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "InvalidBody");
    Ok(())
}

#[tokio::test]
async fn health_reports_database() -> Result<()> {
    let test = TestApp::new().await?;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/health")
        .body(Body::empty())?;
    let response = test.app.clone().oneshot(request).await?;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("X-App"));
    assert!(response.headers().contains_key("x-request-id"));

    let body = to_bytes(response.into_body(), usize::MAX).await?;
    let value: Value = serde_json::from_slice(&body)?;
    assert_eq!(value["database"], "ok");
    assert_eq!(value["name"], env!("CARGO_PKG_NAME"));

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/health")
        .body(Body::empty())?;
    let (status, body) = test.call(request).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
    Ok(())
}

#[tokio::test]
async fn request_id_is_propagated() -> Result<()> {
    let test = TestApp::new().await?;

    let request = Request::builder()
        .method(Method::GET)
        .uri("/")
        .header("x-request-id", "req-123")
        .body(Body::empty())?;
    let response = test.app.clone().oneshot(request).await?;
    assert_eq!(
        response
            .headers()
            .get("x-request-id")
            .and_then(|v| v.to_str().ok()),
        Some("req-123")
    );
    Ok(())
}

#[test]
fn openapi_documents_routes() {
    let doc = openapi();
    for path in ["/register", "/login", "/update", "/health"] {
        assert!(doc.paths.paths.contains_key(path), "{path} missing");
    }
}
