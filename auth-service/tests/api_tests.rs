mod common;

use auth::Claims;
use common::TestApp;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_then_login() {
    let app = TestApp::spawn().await;

    let response = app.register("alice", "s3cret", "user").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.expect("Failed to read body"),
        "User registered successfully"
    );

    let response = app.login("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);

    let token = response.text().await.expect("Failed to read body");
    let claims: Claims = app
        .jwt_handler
        .decode(&token)
        .expect("Token should verify with the signing secret");
    assert_eq!(claims.sub.as_deref(), Some("alice"));
    assert_eq!(claims.role(), Some("ROLE_USER"));
    assert_eq!(claims.iss.as_deref(), Some("auth-service"));
    assert!(claims.exp.unwrap() > claims.iat.unwrap());
}

#[tokio::test]
async fn test_login_with_query_parameters() {
    let app = TestApp::spawn().await;
    app.register("bob", "hunter2", "admin").await;

    let response = app
        .post("/auth/login")
        .query(&[("username", "bob"), ("password", "hunter2")])
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::OK);

    let token = response.text().await.expect("Failed to read body");
    let claims: Claims = app.jwt_handler.decode(&token).unwrap();
    assert_eq!(claims.sub.as_deref(), Some("bob"));
    assert_eq!(claims.role(), Some("ROLE_ADMIN"));
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::spawn().await;
    app.register("alice", "s3cret", "user").await;

    let response = app.login("alice", "wrong").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.text().await.unwrap(),
        "Invalid credentials: wrong password"
    );
}

#[tokio::test]
async fn test_login_unknown_user() {
    let app = TestApp::spawn().await;

    let response = app.login("ghost", "anything").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.text().await.unwrap(),
        "Invalid credentials: user not found"
    );

    // An empty password still reports the missing user
    let response = app.login("ghost", "").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.text().await.unwrap(),
        "Invalid credentials: user not found"
    );
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let app = TestApp::spawn().await;
    app.register("alice", "s3cret", "user").await;

    let response = app.login("Alice", "s3cret").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_login_missing_parameters() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/login")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_duplicate_keeps_original_password() {
    let app = TestApp::spawn().await;
    app.register("alice", "s3cret", "user").await;

    let response = app.register("alice", "other", "admin").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "User already exists: alice");

    let response = app.login("alice", "other").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.login("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);
    let claims: Claims = app
        .jwt_handler
        .decode(&response.text().await.unwrap())
        .unwrap();
    assert_eq!(claims.role(), Some("ROLE_USER"));
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    let response = app.register("", "s3cret", "user").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response
        .text()
        .await
        .unwrap()
        .starts_with("Invalid username"));

    let response = app.register("alice", "", "user").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.register("alice", "s3cret", "super user").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was stored by the rejected attempts
    let response = app.register("alice", "s3cret", "user").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_register_malformed_body() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({ "username": "alice", "password": "s3cret" }))
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post("/auth/register")
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_concurrent_registrations_admit_one() {
    let app = TestApp::spawn().await;

    let attempts = (0..8).map(|i| {
        let request = app
            .post("/auth/register")
            .json(&json!({
                "username": "carol",
                "password": format!("password-{}", i),
                "role": "user",
            }));
        async move { request.send().await.expect("Failed to execute request") }
    });

    let mut handles = Vec::new();
    for attempt in attempts {
        handles.push(tokio::spawn(attempt));
    }

    let mut accepted = 0;
    for handle in handles {
        if handle.await.unwrap().status() == StatusCode::OK {
            accepted += 1;
        }
    }
    assert_eq!(accepted, 1);
}

#[tokio::test]
async fn test_health_check() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "ok");
}

#[tokio::test]
#[ignore = "requires a running Postgres instance (DATABASE_URL)"]
async fn test_postgres_register_then_login() {
    let app = TestApp::spawn_with_postgres().await;

    let response = app.register("alice", "s3cret", "user").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.register("alice", "other", "user").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app.login("alice", "s3cret").await;
    assert_eq!(response.status(), StatusCode::OK);
    let claims: Claims = app
        .jwt_handler
        .decode(&response.text().await.unwrap())
        .unwrap();
    assert_eq!(claims.sub.as_deref(), Some("alice"));
    assert_eq!(claims.role(), Some("ROLE_USER"));

    app.cleanup().await;
}
