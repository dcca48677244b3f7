//! Router behaviour that needs no database: every request here is either
//! anonymous or carries a credential rejected before any lookup.

mod common;

use axum::http::{StatusCode, header};
use chrono::Utc;
use common::{
    CLIENT_IP, body_json, get, get_with_bearer, get_with_cookie, json_request, jwt_config,
    lazy_pool, test_app, test_state,
};
use jsonwebtoken::{EncodingKey, Header, encode};
use orderdesk::orderdesk_auth::{Claims, TokenType, create_refresh_token};
use orderdesk::orderdesk_config::RateLimitConfig;
use orderdesk::router::init_router;
use serde_json::json;
use tower::ServiceExt;

const SCOPED_LISTS: [&str; 5] = [
    "/api/projects",
    "/api/warehouses",
    "/api/carriers",
    "/api/orders",
    "/api/order-lines",
];

fn expired_token() -> String {
    let config = jwt_config();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "1".to_string(),
        username: "ghost".to_string(),
        iss: config.issuer.clone(),
        token_type: TokenType::Access,
        exp: (now - 60) as usize,
        iat: (now - 3660) as usize,
        jti: "expired".to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap()
}

fn forged_token() -> String {
    let config = jwt_config();
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: "1".to_string(),
        username: "ghost".to_string(),
        iss: config.issuer,
        token_type: TokenType::Access,
        exp: (now + 3600) as usize,
        iat: now as usize,
        jti: "forged".to_string(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-entirely-different"),
    )
    .unwrap()
}

#[tokio::test]
async fn test_anonymous_scoped_lists_are_empty() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    for uri in SCOPED_LISTS {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
        assert_eq!(body_json(response).await, json!([]), "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_credentials_behave_as_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let refresh = create_refresh_token(1, "ghost", &jwt_config()).unwrap();
    let tokens = [
        expired_token(),
        forged_token(),
        "not-a-jwt".to_string(),
        refresh,
    ];

    for token in &tokens {
        let response = app
            .clone()
            .oneshot(get_with_bearer("/api/orders", token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));

        let response = app
            .clone()
            .oneshot(get_with_cookie("/api/warehouses", token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }
}

#[tokio::test]
async fn test_non_bearer_authorization_header_is_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let request = axum::http::Request::builder()
        .uri("/api/carriers")
        .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_anonymous_detail_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    for uri in [
        "/api/orders/1",
        "/api/warehouses/1",
        "/api/carriers/1",
        "/api/projects/1",
        "/api/order-lines/1",
        "/api/order-lines/order/1",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_anonymous_writes_require_authentication() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let requests = [
        json_request(
            "POST",
            "/api/orders",
            None,
            json!({"order_type": 1, "project": 1}),
        ),
        json_request(
            "POST",
            "/api/warehouses",
            None,
            json!({"name": "Main", "lookup_code": "MAIN", "projects": [1]}),
        ),
        json_request("DELETE", "/api/carriers/1", None, json!({})),
        json_request("POST", "/api/orders/1/export", None, json!({})),
        json_request(
            "POST",
            "/api/projects/1/add_contact",
            None,
            json!({"contact_id": 1}),
        ),
    ];

    for request in requests {
        let uri = request.uri().to_string();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_reference_data_requires_authentication() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    for uri in [
        "/api/addresses",
        "/api/contacts",
        "/api/carrier-services",
        "/api/order-types",
        "/api/order-classes",
        "/api/order-statuses",
    ] {
        let response = app.clone().oneshot(get(uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");

        let response = app
            .clone()
            .oneshot(get_with_bearer(uri, &expired_token()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn test_auth_status_anonymous() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let response = app
        .clone()
        .oneshot(get("/api/auth/auth-status"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({"user": null}));

    let response = app
        .oneshot(get_with_bearer("/api/auth/auth-status", &forged_token()))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!({"user": null}));
}

#[tokio::test]
async fn test_logout_expires_session_cookies() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let response = app
        .oneshot(json_request("POST", "/api/auth/logout", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let cookies: Vec<String> = response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("access_token=")));
    assert!(cookies.iter().any(|c| c.starts_with("refresh_token=")));
    assert!(cookies.iter().all(|c| c.contains("Max-Age=0")));
}

#[tokio::test]
async fn test_refresh_without_token_is_unauthorized() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/refresh", None, json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/auth/refresh",
            None,
            json!({"refresh_token": "garbage"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_endpoints_are_rate_limited() {
    let dir = tempfile::tempdir().unwrap();
    let mut state = test_state(lazy_pool(), dir.path());
    state.rate_limit_config = RateLimitConfig {
        auth_per_second: 60,
        auth_burst_size: 1,
    };
    let app = init_router(state);

    let first = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/refresh", None, json!({})))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::UNAUTHORIZED);

    let second = app
        .clone()
        .oneshot(json_request("POST", "/api/auth/refresh", None, json!({})))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::TOO_MANY_REQUESTS);

    // auth-status shares the prefix but not the limiter
    let status = app.oneshot(get("/api/auth/auth-status")).await.unwrap();
    assert_eq!(status.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let response = app.oneshot(get("/api/orders")).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}

#[tokio::test]
async fn test_cors_preflight_allows_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let request = axum::http::Request::builder()
        .method("OPTIONS")
        .uri("/api/orders")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header("x-forwarded-for", CLIENT_IP)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
            .unwrap(),
        "true"
    );
    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:5173"
    );
}

#[tokio::test]
async fn test_openapi_document_served() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(lazy_pool(), dir.path());

    let response = app.oneshot(get("/api-docs/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let doc = body_json(response).await;
    assert!(doc["paths"]["/api/orders"].is_object());
}
