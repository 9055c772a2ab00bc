use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, ensure_not_blank, map_service_error, no_content_response, normalize_string,
    success_response, validate_input,
};
use crate::{
    entities::CategoryModel,
    errors::ApiError,
    services::catalog::{CategoryDetail, CreateCategoryInput, UpdateCategoryInput},
    AppState,
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{delete, get, post, put},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::attributes::CategoryAttributeResponse;
use super::products::ProductResponse;

/// Creates the router for category endpoints
pub fn categories_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_category))
        .route("/:id", put(update_category))
        .route("/:id", delete(delete_category))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_categories))
        .route("/:id", get(get_category))
        .route("/:id/path", get(get_category_path))
        .route("/:id/products", get(get_category_products))
        .merge(protected)
}

/// Create a new category
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = CreateCategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategoryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Base category or parent not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Categories"
)]
pub async fn create_category(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    ensure_not_blank(&name, "name")?;
    let en_name = normalize_string(payload.en_name);
    ensure_not_blank(&en_name, "en_name")?;

    let category = state
        .services
        .catalog
        .create_category(CreateCategoryInput {
            base_category_id: payload.base_category_id,
            parent_id: payload.parent_id,
            name,
            en_name,
            description: payload.description.unwrap_or_default(),
            image_url: payload.image_url,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(CategoryResponse::from(category)))
}

/// List categories, optionally scoped to one base category
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    params(CategoryListParams),
    responses((status = 200, description = "Categories", body = [CategoryResponse])),
    tag = "Categories"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(params): Query<CategoryListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let categories = state
        .services
        .catalog
        .list_categories(params.base_category_id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<CategoryResponse> = categories.into_iter().map(CategoryResponse::from).collect();
    Ok(success_response(data))
}

/// Get a category with its children and attribute definitions
#[utoipa::path(
    get,
    path = "/api/v1/categories/:id",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category detail", body = CategoryDetailResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let detail = state
        .services
        .catalog
        .category_detail(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryDetailResponse::from(detail)))
}

/// Walk from a category up to its root. Fails with 409 when the tree
/// contains a cycle.
#[utoipa::path(
    get,
    path = "/api/v1/categories/:id/path",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Ancestry path, node first, root last", body = [CategoryResponse]),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Cycle detected", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category_path(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let path = state
        .services
        .hierarchy
        .ancestry_path(id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<CategoryResponse> = path.into_iter().map(CategoryResponse::from).collect();
    Ok(success_response(data))
}

/// Products assigned to a category
#[utoipa::path(
    get,
    path = "/api/v1/categories/:id/products",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Products in the category", body = [ProductResponse]),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Categories"
)]
pub async fn get_category_products(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .products_in_category(id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(success_response(data))
}

/// Update a category. Changing `base_category_id` is rejected once any
/// product is attached to the category or its subtree.
#[utoipa::path(
    put,
    path = "/api/v1/categories/:id",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategoryResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Reparenting would create a cycle", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Categories"
)]
pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let category = state
        .services
        .catalog
        .update_category(
            id,
            UpdateCategoryInput {
                base_category_id: payload.base_category_id,
                parent_id: payload.parent_id,
                name: payload.name,
                en_name: payload.en_name,
                description: payload.description,
                image_url: payload.image_url,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryResponse::from(category)))
}

/// Delete a category and its subtree
#[utoipa::path(
    delete,
    path = "/api/v1/categories/:id",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse),
        (status = 409, description = "Cycle detected while walking the subtree", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Categories"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_category(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryListParams {
    /// Restrict to categories under this base category
    pub base_category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryRequest {
    pub base_category_id: Uuid,
    pub parent_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub en_name: String,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryRequest {
    pub base_category_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub en_name: Option<String>,
    pub description: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub base_category_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub en_name: String,
    pub description: String,
    pub image_url: Option<String>,
}

impl From<CategoryModel> for CategoryResponse {
    fn from(model: CategoryModel) -> Self {
        Self {
            id: model.id,
            base_category_id: model.base_category_id,
            parent_id: model.parent_id,
            name: model.name,
            en_name: model.en_name,
            description: model.description,
            image_url: model.image_url,
        }
    }
}

/// Detail view with direct children and owned attribute definitions
#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDetailResponse {
    #[serde(flatten)]
    pub category: CategoryResponse,
    pub children: Vec<CategoryResponse>,
    pub attributes: Vec<CategoryAttributeResponse>,
}

impl From<CategoryDetail> for CategoryDetailResponse {
    fn from(detail: CategoryDetail) -> Self {
        Self {
            category: CategoryResponse::from(detail.category),
            children: detail
                .children
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
            attributes: detail
                .attributes
                .into_iter()
                .map(CategoryAttributeResponse::from)
                .collect(),
        }
    }
}
