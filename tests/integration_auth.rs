#![cfg(feature = "integration-tests")]

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use common::{
    CLIENT_IP, TEST_PASSWORD, body_json, create_user, get, get_with_bearer, get_with_cookie,
    json_request, test_app, token_for,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

fn set_cookies(response: &axum::response::Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_returns_tokens_and_sets_cookies(pool: PgPool) {
    create_user(&pool, "alice").await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(pool, dir.path());

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"username": "alice", "password": TEST_PASSWORD}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookies = set_cookies(&response);
    let access = cookies
        .iter()
        .find(|c| c.starts_with("access_token="))
        .unwrap();
    assert!(access.contains("HttpOnly"));
    assert!(access.contains("Path=/"));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));

    let body = body_json(response).await;
    assert!(body["access_token"].is_string());
    assert!(body["refresh_token"].is_string());
    assert_eq!(body["user"]["username"], "alice");
    assert!(body["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_login_rejects_bad_credentials_uniformly(pool: PgPool) {
    let inactive = create_user(&pool, "dormant").await;
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(inactive)
        .execute(&pool)
        .await
        .unwrap();
    create_user(&pool, "bob").await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(pool, dir.path());

    for body in [
        json!({"username": "bob", "password": "wrong-password"}),
        json!({"username": "nobody", "password": TEST_PASSWORD}),
        json!({"username": "dormant", "password": TEST_PASSWORD}),
    ] {
        let response = app
            .clone()
            .oneshot(json_request("POST", "/api/auth/login", None, body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            body_json(response).await["error"],
            "Invalid username or password"
        );
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_refresh_reads_cookie(pool: PgPool) {
    create_user(&pool, "carol").await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(pool, dir.path());

    let login = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth/login",
            None,
            json!({"username": "carol", "password": TEST_PASSWORD}),
        ))
        .await
        .unwrap();
    let refresh_token = body_json(login).await["refresh_token"]
        .as_str()
        .unwrap()
        .to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/refresh")
        .header(header::COOKIE, format!("refresh_token={refresh_token}"))
        .header("x-forwarded-for", CLIENT_IP)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        set_cookies(&response)
            .iter()
            .any(|c| c.starts_with("access_token="))
    );

    let access = body_json(response).await["access_token"]
        .as_str()
        .unwrap()
        .to_string();
    let status = app
        .oneshot(get_with_bearer("/api/auth/auth-status", &access))
        .await
        .unwrap();
    assert_eq!(body_json(status).await["user"]["username"], "carol");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_cookie_credential_authenticates(pool: PgPool) {
    let id = create_user(&pool, "dana").await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(pool, dir.path());

    let response = app
        .oneshot(get_with_cookie(
            "/api/auth/auth-status",
            &token_for(id, "dana"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["user"]["id"], id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_authorization_header_shadows_cookie(pool: PgPool) {
    let id = create_user(&pool, "erin").await;
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(pool, dir.path());

    let request = Request::builder()
        .uri("/api/auth/auth-status")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .header(header::COOKIE, format!("access_token={}", token_for(id, "erin")))
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(body_json(response).await, json!({"user": null}));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_deactivated_user_token_is_anonymous(pool: PgPool) {
    let id = create_user(&pool, "frank").await;
    let token = token_for(id, "frank");
    sqlx::query("UPDATE users SET is_active = FALSE WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(pool, dir.path());

    let response = app
        .clone()
        .oneshot(get_with_bearer("/api/auth/auth-status", &token))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({"user": null}));

    let response = app.oneshot(get("/api/addresses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
