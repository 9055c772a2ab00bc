use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response,
};
use crate::{
    entities::{SizeGroup, SizeLabel, SizeModel},
    errors::ApiError,
    services::catalog::{CreateSizeInput, UpdateSizeInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Creates the router for size endpoints
pub fn sizes_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_size))
        .route("/:id", put(update_size))
        .route("/:id", delete(delete_size))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_sizes))
        .route("/:id", get(get_size))
        .merge(protected)
}

/// Create a size
#[utoipa::path(
    post,
    path = "/api/v1/sizes",
    request_body = CreateSizeRequest,
    responses(
        (status = 201, description = "Size created", body = SizeResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Sizes"
)]
pub async fn create_size(
    State(state): State<AppState>,
    Json(payload): Json<CreateSizeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let size = state
        .services
        .catalog
        .create_size(CreateSizeInput {
            label: payload.label,
            numeric_size: payload.numeric_size,
            numeric_label: payload.numeric_label,
            group: payload.group,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(SizeResponse::from(size)))
}

/// List sizes, ordered by numeric size
#[utoipa::path(
    get,
    path = "/api/v1/sizes",
    responses((status = 200, description = "Sizes", body = [SizeResponse])),
    tag = "Sizes"
)]
pub async fn list_sizes(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let sizes = state
        .services
        .catalog
        .list_sizes()
        .await
        .map_err(map_service_error)?;

    let data: Vec<SizeResponse> = sizes.into_iter().map(SizeResponse::from).collect();
    Ok(success_response(data))
}

/// Get a size by ID
#[utoipa::path(
    get,
    path = "/api/v1/sizes/:id",
    params(("id" = Uuid, Path, description = "Size ID")),
    responses(
        (status = 200, description = "Size", body = SizeResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Sizes"
)]
pub async fn get_size(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let size = state
        .services
        .catalog
        .get_size(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(SizeResponse::from(size)))
}

/// Update a size
#[utoipa::path(
    put,
    path = "/api/v1/sizes/:id",
    params(("id" = Uuid, Path, description = "Size ID")),
    request_body = UpdateSizeRequest,
    responses(
        (status = 200, description = "Size updated", body = SizeResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Sizes"
)]
pub async fn update_size(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateSizeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let size = state
        .services
        .catalog
        .update_size(
            id,
            UpdateSizeInput {
                label: payload.label,
                numeric_size: payload.numeric_size,
                numeric_label: payload.numeric_label,
                group: payload.group,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(SizeResponse::from(size)))
}

/// Delete a size
#[utoipa::path(
    delete,
    path = "/api/v1/sizes/:id",
    params(("id" = Uuid, Path, description = "Size ID")),
    responses(
        (status = 204, description = "Size deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Sizes"
)]
pub async fn delete_size(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_size(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSizeRequest {
    /// Letter label for clothing (XS through 4XL)
    #[schema(value_type = Option<String>)]
    pub label: Option<SizeLabel>,
    /// Numeric size, e.g. shoe sizes
    pub numeric_size: Option<i16>,
    pub numeric_label: Option<String>,
    #[schema(value_type = Option<String>)]
    pub group: Option<SizeGroup>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateSizeRequest {
    #[schema(value_type = Option<String>)]
    pub label: Option<SizeLabel>,
    pub numeric_size: Option<i16>,
    pub numeric_label: Option<String>,
    #[schema(value_type = Option<String>)]
    pub group: Option<SizeGroup>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SizeResponse {
    pub id: Uuid,
    #[schema(value_type = Option<String>)]
    pub label: Option<SizeLabel>,
    pub numeric_size: Option<i16>,
    pub numeric_label: Option<String>,
    #[schema(value_type = Option<String>)]
    pub group: Option<SizeGroup>,
}

impl From<SizeModel> for SizeResponse {
    fn from(model: SizeModel) -> Self {
        Self {
            id: model.id,
            label: model.label,
            numeric_size: model.numeric_size,
            numeric_label: model.numeric_label,
            group: model.group,
        }
    }
}
