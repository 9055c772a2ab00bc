use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, ensure_not_blank, map_service_error, no_content_response, normalize_string,
    success_response, validate_input,
};
use crate::{
    entities::{CategoryAttributeModel, ProductAttributeModel},
    errors::ApiError,
    services::{
        catalog::{CreateCategoryAttributeInput, UpdateCategoryAttributeInput},
        products::CreateProductAttributeInput,
    },
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

/// Creates the router for category attribute definitions
pub fn category_attributes_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_category_attribute))
        .route("/:id", put(update_category_attribute))
        .route("/:id", delete(delete_category_attribute))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_category_attributes))
        .route("/:id", get(get_category_attribute))
        .merge(protected)
}

/// Creates the router for per-product attribute values
pub fn product_attributes_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_product_attribute))
        .route("/:id", put(update_product_attribute))
        .route("/:id", delete(delete_product_attribute))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_product_attributes))
        .merge(protected)
}

/// Define an attribute on a category
#[utoipa::path(
    post,
    path = "/api/v1/category-attributes",
    request_body = CreateCategoryAttributeRequest,
    responses(
        (status = 201, description = "Attribute defined", body = CategoryAttributeResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Category not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Attributes"
)]
pub async fn create_category_attribute(
    State(state): State<AppState>,
    Json(payload): Json<CreateCategoryAttributeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    ensure_not_blank(&name, "name")?;

    let attribute = state
        .services
        .catalog
        .create_category_attribute(CreateCategoryAttributeInput {
            category_id: payload.category_id,
            name,
            title: payload.title,
            value: payload.value,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(CategoryAttributeResponse::from(attribute)))
}

/// List attribute definitions, optionally scoped to one category
#[utoipa::path(
    get,
    path = "/api/v1/category-attributes",
    params(CategoryAttributeListParams),
    responses((status = 200, description = "Attribute definitions", body = [CategoryAttributeResponse])),
    tag = "Attributes"
)]
pub async fn list_category_attributes(
    State(state): State<AppState>,
    Query(params): Query<CategoryAttributeListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let attributes = state
        .services
        .catalog
        .list_category_attributes(params.category_id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<CategoryAttributeResponse> = attributes
        .into_iter()
        .map(CategoryAttributeResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Get an attribute definition by ID
#[utoipa::path(
    get,
    path = "/api/v1/category-attributes/:id",
    params(("id" = Uuid, Path, description = "Attribute ID")),
    responses(
        (status = 200, description = "Attribute definition", body = CategoryAttributeResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Attributes"
)]
pub async fn get_category_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let attribute = state
        .services
        .catalog
        .get_category_attribute(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryAttributeResponse::from(attribute)))
}

/// Update an attribute definition
#[utoipa::path(
    put,
    path = "/api/v1/category-attributes/:id",
    params(("id" = Uuid, Path, description = "Attribute ID")),
    request_body = UpdateCategoryAttributeRequest,
    responses(
        (status = 200, description = "Attribute updated", body = CategoryAttributeResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Attributes"
)]
pub async fn update_category_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCategoryAttributeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let attribute = state
        .services
        .catalog
        .update_category_attribute(
            id,
            UpdateCategoryAttributeInput {
                name: payload.name,
                title: payload.title,
                value: payload.value,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(CategoryAttributeResponse::from(attribute)))
}

/// Delete an attribute definition and the product values referencing it
#[utoipa::path(
    delete,
    path = "/api/v1/category-attributes/:id",
    params(("id" = Uuid, Path, description = "Attribute ID")),
    responses(
        (status = 204, description = "Attribute deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Attributes"
)]
pub async fn delete_category_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_category_attribute(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Assign an attribute value to a product. The product must belong to the
/// category defining the attribute.
#[utoipa::path(
    post,
    path = "/api/v1/product-attributes",
    request_body = CreateProductAttributeRequest,
    responses(
        (status = 201, description = "Value assigned", body = ProductAttributeResponse),
        (status = 400, description = "Product not in the defining category", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product or attribute not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Attributes"
)]
pub async fn create_product_attribute(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductAttributeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let value = state
        .services
        .products
        .create_product_attribute(CreateProductAttributeInput {
            product_id: payload.product_id,
            attribute_id: payload.attribute_id,
            value: payload.value,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(ProductAttributeResponse::from(value)))
}

/// List product attribute values, optionally scoped to one product
#[utoipa::path(
    get,
    path = "/api/v1/product-attributes",
    params(ProductAttributeListParams),
    responses((status = 200, description = "Attribute values", body = [ProductAttributeResponse])),
    tag = "Attributes"
)]
pub async fn list_product_attributes(
    State(state): State<AppState>,
    Query(params): Query<ProductAttributeListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let values = state
        .services
        .products
        .list_product_attributes(params.product_id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<ProductAttributeResponse> = values
        .into_iter()
        .map(ProductAttributeResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Update a product attribute value
#[utoipa::path(
    put,
    path = "/api/v1/product-attributes/:id",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    request_body = UpdateProductAttributeRequest,
    responses(
        (status = 200, description = "Value updated", body = ProductAttributeResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Attributes"
)]
pub async fn update_product_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductAttributeRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let value = state
        .services
        .products
        .update_product_attribute(id, payload.value)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductAttributeResponse::from(value)))
}

/// Remove a product attribute value
#[utoipa::path(
    delete,
    path = "/api/v1/product-attributes/:id",
    params(("id" = Uuid, Path, description = "Assignment ID")),
    responses(
        (status = 204, description = "Value removed"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Attributes"
)]
pub async fn delete_product_attribute(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product_attribute(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct CategoryAttributeListParams {
    pub category_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductAttributeListParams {
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateCategoryAttributeRequest {
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// Falls back to "untitled attribute" when omitted
    pub title: Option<String>,
    pub value: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateCategoryAttributeRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub title: Option<String>,
    pub value: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductAttributeRequest {
    pub product_id: Uuid,
    pub attribute_id: Uuid,
    pub value: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductAttributeRequest {
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryAttributeResponse {
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub title: String,
    pub value: String,
}

impl From<CategoryAttributeModel> for CategoryAttributeResponse {
    fn from(model: CategoryAttributeModel) -> Self {
        Self {
            id: model.id,
            category_id: model.category_id,
            name: model.name,
            title: model.title,
            value: model.value,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductAttributeResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub attribute_id: Uuid,
    pub value: String,
}

impl From<ProductAttributeModel> for ProductAttributeResponse {
    fn from(model: ProductAttributeModel) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            attribute_id: model.attribute_id,
            value: model.value,
        }
    }
}
