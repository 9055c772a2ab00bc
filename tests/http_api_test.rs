//! Smoke tests over the real router: public reads, permission-gated writes,
//! and the health probes.

mod common;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn reads_are_public_and_writes_are_gated() {
    let app = common::setup().await;
    app.create_user("admin", true).await;
    app.create_user("shopper", false).await;
    let router = app.router();

    // Public read works without a token
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/base-categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let payload = json!({"name": "Electronics", "en_name": "electronics", "description": ""});

    // No token at all
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/base-categories",
            None,
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Authenticated but without catalog:write
    let shopper = app.services.auth.login("shopper").await.unwrap();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/base-categories",
            Some(&shopper.access_token),
            payload.clone(),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // Staff token creates the row
    let admin = app.services.auth.login("admin").await.unwrap();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/base-categories",
            Some(&admin.access_token),
            payload,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Electronics");

    // The public listing now shows it
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/v1/base-categories")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn discount_validation_surfaces_as_bad_request() {
    let app = common::setup().await;
    app.create_user("admin", true).await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;
    let router = app.router();

    let admin = app.services.auth.login("admin").await.unwrap();
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/product-packages",
            Some(&admin.access_token),
            json!({"product_id": product, "price": 1000, "discount": 100, "is_active_discount": true}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("discount"));
}

#[tokio::test]
async fn comment_author_comes_from_the_token() {
    let app = common::setup().await;
    let reader = app.create_user("reader", false).await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let product = app.create_product("the-novel", vec![category]).await;
    let router = app.router();

    let token = app.services.auth.login("reader").await.unwrap();
    let response = router
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/v1/comments",
            Some(&token.access_token),
            json!({"product_id": product, "body": "great read", "rating": 5}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["user_id"], json!(reader.id));

    // Anonymous comment creation is refused
    let response = router
        .oneshot(json_request(
            "POST",
            "/api/v1/comments",
            None,
            json!({"product_id": product, "body": "drive-by", "rating": 1}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_probes_respond() {
    let app = common::setup().await;
    let router = app.router();

    for uri in ["/health", "/health/live", "/health/ready"] {
        let response = router
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}
