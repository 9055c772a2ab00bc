//! Comment authorship, threading, and moderation rules.

mod common;

use assert_matches::assert_matches;
use catalog_api::{
    errors::ServiceError,
    services::comments::{CommentQuery, CreateCommentInput, UpdateCommentInput},
};

fn comment_on(product_id: uuid::Uuid, body: &str) -> CreateCommentInput {
    CreateCommentInput {
        product_id,
        parent_id: None,
        body: body.to_string(),
        rating: 4,
    }
}

#[tokio::test]
async fn comments_carry_an_explicit_author_and_start_unapproved() {
    let app = common::setup().await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let product = app.create_product("the-novel", vec![category]).await;
    let author = app.create_user("reader", false).await;

    let comment = app
        .services
        .comments
        .create_comment(comment_on(product, "loved it"), author.id)
        .await
        .unwrap();

    assert_eq!(comment.user_id, author.id);
    assert!(!comment.is_approved);

    let approved = app
        .services
        .comments
        .approve_comment(comment.id)
        .await
        .unwrap();
    assert!(approved.is_approved);
}

#[tokio::test]
async fn replies_must_stay_on_the_same_product() {
    let app = common::setup().await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let first = app.create_product("first-novel", vec![category]).await;
    let second = app.create_product("second-novel", vec![category]).await;
    let author = app.create_user("reader", false).await;

    let parent = app
        .services
        .comments
        .create_comment(comment_on(first, "original"), author.id)
        .await
        .unwrap();

    // Reply on the same product is fine
    let reply = app
        .services
        .comments
        .create_comment(
            CreateCommentInput {
                product_id: first,
                parent_id: Some(parent.id),
                body: "agreed".to_string(),
                rating: 5,
            },
            author.id,
        )
        .await
        .unwrap();
    assert_eq!(reply.parent_id, Some(parent.id));

    // Reply pointing across products is rejected
    let cross = app
        .services
        .comments
        .create_comment(
            CreateCommentInput {
                product_id: second,
                parent_id: Some(parent.id),
                body: "wrong thread".to_string(),
                rating: 3,
            },
            author.id,
        )
        .await;
    assert_matches!(cross, Err(ServiceError::ValidationError(_)));
}

#[tokio::test]
async fn ratings_are_one_to_five() {
    let app = common::setup().await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let product = app.create_product("the-novel", vec![category]).await;
    let author = app.create_user("reader", false).await;

    for rating in [0, 6] {
        let result = app
            .services
            .comments
            .create_comment(
                CreateCommentInput {
                    product_id: product,
                    parent_id: None,
                    body: "meh".to_string(),
                    rating,
                },
                author.id,
            )
            .await;
        assert_matches!(result, Err(ServiceError::ValidationError(_)));
    }
}

#[tokio::test]
async fn only_the_author_may_edit() {
    let app = common::setup().await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let product = app.create_product("the-novel", vec![category]).await;
    let author = app.create_user("reader", false).await;
    let other = app.create_user("lurker", false).await;

    let comment = app
        .services
        .comments
        .create_comment(comment_on(product, "first take"), author.id)
        .await
        .unwrap();

    let denied = app
        .services
        .comments
        .update_comment(
            comment.id,
            UpdateCommentInput {
                body: Some("hijacked".to_string()),
                rating: None,
            },
            other.id,
        )
        .await;
    assert_matches!(denied, Err(ServiceError::Forbidden(_)));

    let edited = app
        .services
        .comments
        .update_comment(
            comment.id,
            UpdateCommentInput {
                body: Some("second take".to_string()),
                rating: Some(5),
            },
            author.id,
        )
        .await
        .unwrap();
    assert_eq!(edited.body, "second take");
    assert_eq!(edited.rating, 5);
}

#[tokio::test]
async fn moderators_may_delete_and_replies_go_with_the_parent() {
    let app = common::setup().await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let product = app.create_product("the-novel", vec![category]).await;
    let author = app.create_user("reader", false).await;
    let moderator = app.create_user("moderator", true).await;

    let parent = app
        .services
        .comments
        .create_comment(comment_on(product, "spam"), author.id)
        .await
        .unwrap();
    app.services
        .comments
        .create_comment(
            CreateCommentInput {
                product_id: product,
                parent_id: Some(parent.id),
                body: "reply to spam".to_string(),
                rating: 1,
            },
            author.id,
        )
        .await
        .unwrap();

    // A non-author without moderation rights cannot delete
    let denied = app
        .services
        .comments
        .delete_comment(parent.id, moderator.id, false)
        .await;
    assert_matches!(denied, Err(ServiceError::Forbidden(_)));

    app.services
        .comments
        .delete_comment(parent.id, moderator.id, true)
        .await
        .unwrap();

    let remaining = app
        .services
        .comments
        .list_comments(CommentQuery {
            product_id: Some(product),
            is_approved: None,
        })
        .await
        .unwrap();
    assert!(remaining.is_empty());
}

#[tokio::test]
async fn my_comments_lists_only_the_callers() {
    let app = common::setup().await;
    let base = app.create_base_category("books").await;
    let category = app.create_category(base, None, "novels").await;
    let product = app.create_product("the-novel", vec![category]).await;
    let alice = app.create_user("alice", false).await;
    let bob = app.create_user("bob", false).await;

    app.services
        .comments
        .create_comment(comment_on(product, "from alice"), alice.id)
        .await
        .unwrap();
    app.services
        .comments
        .create_comment(comment_on(product, "from bob"), bob.id)
        .await
        .unwrap();

    let mine = app
        .services
        .comments
        .comments_by_user(alice.id)
        .await
        .unwrap();
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].body, "from alice");
}
