use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, ensure_not_blank, map_service_error, no_content_response, normalize_string,
    success_response, validate_input,
};
use crate::{
    entities::BaseCategoryModel,
    errors::ApiError,
    services::catalog::{BaseCategoryDetail, CreateBaseCategoryInput, UpdateBaseCategoryInput},
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
use validator::Validate;

use super::brands::BrandResponse;
use super::categories::CategoryResponse;

/// Creates the router for base category endpoints
pub fn base_categories_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_base_category))
        .route("/:id", put(update_base_category))
        .route("/:id", delete(delete_base_category))
        .route("/:id/brands/:brand_id", post(link_brand))
        .route("/:id/brands/:brand_id", delete(unlink_brand))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_base_categories))
        .route("/:id", get(get_base_category))
        .merge(protected)
}

/// Create a new base category
#[utoipa::path(
    post,
    path = "/api/v1/base-categories",
    request_body = CreateBaseCategoryRequest,
    responses(
        (status = 201, description = "Base category created", body = BaseCategoryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 403, description = "Forbidden", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "BaseCategories"
)]
pub async fn create_base_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateBaseCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    ensure_not_blank(&name, "name")?;
    let en_name = normalize_string(payload.en_name);
    ensure_not_blank(&en_name, "en_name")?;

    let base_category = state
        .services
        .catalog
        .create_base_category(CreateBaseCategoryInput {
            name,
            en_name,
            description: payload.description.unwrap_or_default(),
            image_url: payload.image_url,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(BaseCategoryResponse::from(base_category)))
}

/// List base categories
#[utoipa::path(
    get,
    path = "/api/v1/base-categories",
    responses(
        (status = 200, description = "Base categories", body = [BaseCategoryResponse])
    ),
    tag = "BaseCategories"
)]
pub async fn list_base_categories(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let base_categories = state
        .services
        .catalog
        .list_base_categories()
        .await
        .map_err(map_service_error)?;

    let data: Vec<BaseCategoryResponse> = base_categories
        .into_iter()
        .map(BaseCategoryResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Get a base category with its categories and brands
#[utoipa::path(
    get,
    path = "/api/v1/base-categories/:id",
    params(("id" = Uuid, Path, description = "Base category ID")),
    responses(
        (status = 200, description = "Base category detail", body = BaseCategoryDetailResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "BaseCategories"
)]
pub async fn get_base_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let detail = state
        .services
        .catalog
        .base_category_detail(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(BaseCategoryDetailResponse::from(detail)))
}

/// Update a base category
#[utoipa::path(
    put,
    path = "/api/v1/base-categories/:id",
    params(("id" = Uuid, Path, description = "Base category ID")),
    request_body = UpdateBaseCategoryRequest,
    responses(
        (status = 200, description = "Base category updated", body = BaseCategoryResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "BaseCategories"
)]
pub async fn update_base_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBaseCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let base_category = state
        .services
        .catalog
        .update_base_category(
            id,
            UpdateBaseCategoryInput {
                name: payload.name,
                en_name: payload.en_name,
                description: payload.description,
                image_url: payload.image_url,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(BaseCategoryResponse::from(base_category)))
}

/// Delete a base category and its category tree
#[utoipa::path(
    delete,
    path = "/api/v1/base-categories/:id",
    params(("id" = Uuid, Path, description = "Base category ID")),
    responses(
        (status = 204, description = "Base category deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "BaseCategories"
)]
pub async fn delete_base_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_base_category(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Link a brand to a base category (idempotent)
#[utoipa::path(
    post,
    path = "/api/v1/base-categories/:id/brands/:brand_id",
    params(
        ("id" = Uuid, Path, description = "Base category ID"),
        ("brand_id" = Uuid, Path, description = "Brand ID")
    ),
    responses(
        (status = 204, description = "Brand linked"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "BaseCategories"
)]
pub async fn link_brand(
    State(state): State<AppState>,
    Path((id, brand_id)): Path<(Uuid, Uuid)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .link_brand_to_base_category(id, brand_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Unlink a brand from a base category (idempotent)
#[utoipa::path(
    delete,
    path = "/api/v1/base-categories/:id/brands/:brand_id",
    params(
        ("id" = Uuid, Path, description = "Base category ID"),
        ("brand_id" = Uuid, Path, description = "Brand ID")
    ),
    responses((status = 204, description = "Brand unlinked")),
    security(("Bearer" = [])),
    tag = "BaseCategories"
)]
pub async fn unlink_brand(
    State(state): State<AppState>,
    Path((id, brand_id)): Path<(Uuid, Uuid)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .unlink_brand_from_base_category(id, brand_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBaseCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub en_name: String,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBaseCategoryRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub en_name: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Summary view used by list endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct BaseCategoryResponse {
    pub id: Uuid,
    pub name: String,
    pub en_name: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<BaseCategoryModel> for BaseCategoryResponse {
    fn from(model: BaseCategoryModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            en_name: model.en_name,
            description: model.description,
            image_url: model.image_url,
        }
    }
}

/// Detail view with nested categories and brands
#[derive(Debug, Serialize, ToSchema)]
pub struct BaseCategoryDetailResponse {
    #[serde(flatten)]
    pub base_category: BaseCategoryResponse,
    pub categories: Vec<CategoryResponse>,
    pub brands: Vec<BrandResponse>,
}

impl From<BaseCategoryDetail> for BaseCategoryDetailResponse {
    fn from(detail: BaseCategoryDetail) -> Self {
        Self {
            base_category: BaseCategoryResponse::from(detail.base_category),
            categories: detail
                .categories
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
            brands: detail.brands.into_iter().map(BrandResponse::from).collect(),
        }
    }
}
