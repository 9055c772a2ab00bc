//! Token issuance and validation against the user table.

mod common;

use assert_matches::assert_matches;
use catalog_api::auth::{consts, AuthError};

#[tokio::test]
async fn staff_accounts_get_catalog_permissions() {
    let app = common::setup().await;
    let staff = app.create_user("admin", true).await;

    let pair = app.services.auth.login("admin").await.unwrap();
    assert_eq!(pair.token_type, "Bearer");

    let claims = app.services.auth.validate_token(&pair.access_token).unwrap();
    assert_eq!(claims.sub, staff.id.to_string());
    assert!(claims.roles.contains(&"admin".to_string()));
    assert!(claims
        .permissions
        .contains(&consts::CATALOG_WRITE.to_string()));
    assert!(claims
        .permissions
        .contains(&consts::COMMENTS_MODERATE.to_string()));
}

#[tokio::test]
async fn shoppers_authenticate_without_write_permissions() {
    let app = common::setup().await;
    app.create_user("shopper", false).await;

    let pair = app.services.auth.login("shopper").await.unwrap();
    let claims = app.services.auth.validate_token(&pair.access_token).unwrap();

    assert_eq!(claims.roles, vec!["customer".to_string()]);
    assert!(claims.permissions.is_empty());
}

#[tokio::test]
async fn unknown_accounts_are_rejected() {
    let app = common::setup().await;

    let result = app.services.auth.login("nobody").await;
    assert_matches!(result, Err(AuthError::UnknownUser));
}

#[tokio::test]
async fn refresh_tokens_issue_a_fresh_pair() {
    let app = common::setup().await;
    app.create_user("admin", true).await;

    let pair = app.services.auth.login("admin").await.unwrap();
    let refreshed = app
        .services
        .auth
        .refresh_token(&pair.refresh_token)
        .await
        .unwrap();

    let claims = app
        .services
        .auth
        .validate_token(&refreshed.access_token)
        .unwrap();
    assert!(claims.roles.contains(&"admin".to_string()));
}

#[tokio::test]
async fn garbage_tokens_fail_validation() {
    let app = common::setup().await;

    let result = app.services.auth.validate_token("not-a-jwt");
    assert_matches!(result, Err(AuthError::InvalidToken));
}
