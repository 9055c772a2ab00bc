use crate::auth::consts as perm;
use crate::auth::{AuthRouterExt, AuthenticatedUser};
use crate::handlers::common::{
    created_response, ensure_not_blank, map_service_error, no_content_response, normalize_string,
    success_response, validate_input,
};
use crate::{
    entities::CommentModel,
    errors::ApiError,
    services::comments::{CommentQuery, CreateCommentInput, UpdateCommentInput},
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{delete, get, post, put},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Creates the router for comment endpoints.
///
/// Reads are public; creating and editing require an authenticated caller
/// (the author comes from the token, never from the payload); approval is a
/// moderator action.
pub fn comments_routes() -> Router<AppState> {
    let authenticated = Router::new()
        .route("/", post(create_comment))
        .route("/my-comments", get(my_comments))
        .route("/:id", put(update_comment))
        .route("/:id", delete(delete_comment))
        .with_auth();

    let moderation = Router::new()
        .route("/:id/approve", post(approve_comment))
        .with_permission(perm::COMMENTS_MODERATE);

    Router::new()
        .route("/", get(list_comments))
        .route("/:id", get(get_comment))
        .merge(authenticated)
        .merge(moderation)
}

/// Create a comment authored by the calling user
#[utoipa::path(
    post,
    path = "/api/v1/comments",
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created, pending approval", body = CommentResponse),
        (status = 400, description = "Rating out of range or parent on another product", body = crate::errors::ErrorResponse),
        (status = 401, description = "Unauthenticated", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product or parent comment not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Comments"
)]
pub async fn create_comment(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Json(payload): Json<CreateCommentRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let body = normalize_string(payload.body);
    ensure_not_blank(&body, "body")?;

    let comment = state
        .services
        .comments
        .create_comment(
            CreateCommentInput {
                product_id: payload.product_id,
                parent_id: payload.parent_id,
                body,
                rating: payload.rating,
            },
            user.user_id,
        )
        .await
        .map_err(map_service_error)?;

    Ok(created_response(CommentResponse::from(comment)))
}

/// List comments, optionally filtered by product and approval state
#[utoipa::path(
    get,
    path = "/api/v1/comments",
    params(CommentListParams),
    responses((status = 200, description = "Comments", body = [CommentResponse])),
    tag = "Comments"
)]
pub async fn list_comments(
    State(state): State<AppState>,
    Query(params): Query<CommentListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let comments = state
        .services
        .comments
        .list_comments(CommentQuery {
            product_id: params.product_id,
            is_approved: params.is_approved,
        })
        .await
        .map_err(map_service_error)?;

    let data: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(success_response(data))
}

/// Comments written by the calling user
#[utoipa::path(
    get,
    path = "/api/v1/comments/my-comments",
    responses(
        (status = 200, description = "The caller's comments", body = [CommentResponse]),
        (status = 401, description = "Unauthenticated", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Comments"
)]
pub async fn my_comments(
    user: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let comments = state
        .services
        .comments
        .comments_by_user(user.user_id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<CommentResponse> = comments.into_iter().map(CommentResponse::from).collect();
    Ok(success_response(data))
}

/// Get a comment by ID
#[utoipa::path(
    get,
    path = "/api/v1/comments/:id",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment", body = CommentResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Comments"
)]
pub async fn get_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let comment = state
        .services
        .comments
        .get_comment(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CommentResponse::from(comment)))
}

/// Edit a comment. Only the author may edit.
#[utoipa::path(
    put,
    path = "/api/v1/comments/:id",
    params(("id" = Uuid, Path, description = "Comment ID")),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = CommentResponse),
        (status = 403, description = "Not the author", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Comments"
)]
pub async fn update_comment(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCommentRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let comment = state
        .services
        .comments
        .update_comment(
            id,
            UpdateCommentInput {
                body: payload.body,
                rating: payload.rating,
            },
            user.user_id,
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CommentResponse::from(comment)))
}

/// Delete a comment. Allowed for the author or a moderator.
#[utoipa::path(
    delete,
    path = "/api/v1/comments/:id",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 204, description = "Comment deleted"),
        (status = 403, description = "Neither author nor moderator", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Comments"
)]
pub async fn delete_comment(
    user: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let is_moderator = user.is_admin() || user.has_permission(perm::COMMENTS_MODERATE);
    state
        .services
        .comments
        .delete_comment(id, user.user_id, is_moderator)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Approve a comment for public display
#[utoipa::path(
    post,
    path = "/api/v1/comments/:id/approve",
    params(("id" = Uuid, Path, description = "Comment ID")),
    responses(
        (status = 200, description = "Comment approved", body = CommentResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Comments"
)]
pub async fn approve_comment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let comment = state
        .services
        .comments
        .approve_comment(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CommentResponse::from(comment)))
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CommentListParams {
    pub product_id: Option<Uuid>,
    pub is_approved: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCommentRequest {
    pub product_id: Uuid,
    /// When set, must reference a comment on the same product
    pub parent_id: Option<Uuid>,
    #[validate(length(min = 1, max = 4096))]
    pub body: String,
    /// 1..=5
    pub rating: i16,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 4096))]
    pub body: Option<String>,
    pub rating: Option<i16>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub user_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub body: String,
    pub rating: i16,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

impl From<CommentModel> for CommentResponse {
    fn from(model: CommentModel) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            user_id: model.user_id,
            parent_id: model.parent_id,
            body: model.body,
            rating: model.rating,
            is_approved: model.is_approved,
            created_at: model.created_at,
        }
    }
}
