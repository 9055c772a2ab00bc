use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, ensure_not_blank, map_service_error, no_content_response,
    normalize_optional_string, normalize_string, success_response, validate_input,
    PaginatedResponse, PaginationParams,
};
use crate::{
    entities::ProductModel,
    errors::ApiError,
    services::products::{
        AttributeValue, CreateProductInput, ProductDetail, ProductSearchQuery, UpdateProductInput,
    },
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

use super::attributes::CategoryAttributeResponse;
use super::categories::CategoryResponse;
use super::comments::CommentResponse;
use super::gallery::GalleryImageResponse;
use super::packages::PackageResponse;

/// Creates the router for product endpoints
pub fn products_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_product))
        .route("/:id", put(update_product))
        .route("/:id", delete(delete_product))
        .route("/:id/categories/:category_id", post(assign_category))
        .route("/:id/categories/:category_id", delete(remove_category))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_products))
        .route("/:id", get(get_product))
        .route("/:id/packages", get(get_product_packages))
        .route("/:id/gallery", get(get_product_gallery))
        .route("/:id/effective-attributes", get(get_effective_attributes))
        .merge(protected)
}

/// Create a new product
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = CreateProductRequest,
    responses(
        (status = 201, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "A referenced category does not exist", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    ensure_not_blank(&name, "name")?;

    let product = state
        .services
        .products
        .create_product(CreateProductInput {
            name,
            description: payload.description.unwrap_or_default(),
            is_active: payload.is_active.unwrap_or(false),
            image_url: normalize_optional_string(payload.image_url),
            category_ids: payload.category_ids.unwrap_or_default(),
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(ProductResponse::from(product)))
}

/// List products with search and pagination
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(ProductListParams, PaginationParams),
    responses((status = 200, description = "Products", body = [ProductResponse])),
    tag = "Products"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(params): Query<ProductListParams>,
    Query(pagination): Query<PaginationParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let per_page = pagination.capped_per_page(state.config.api_max_page_size);
    let result = state
        .services
        .products
        .search_products(ProductSearchQuery {
            search: params.search,
            is_active: params.is_active,
            limit: Some(per_page),
            offset: Some(pagination.offset()),
        })
        .await
        .map_err(map_service_error)?;

    let data: Vec<ProductResponse> = result
        .products
        .into_iter()
        .map(ProductResponse::from)
        .collect();
    Ok(success_response(PaginatedResponse::new(
        data,
        pagination.page,
        per_page,
        result.total,
    )))
}

/// Get a product with categories, attribute values, packages, gallery, and
/// comments
#[utoipa::path(
    get,
    path = "/api/v1/products/:id",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product detail", body = ProductDetailResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let detail = state
        .services
        .products
        .get_product_detail(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductDetailResponse::from(detail)))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/api/v1/products/:id",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = payload
        .name
        .map(normalize_string)
        .map(|value| {
            ensure_not_blank(&value, "name")?;
            Ok::<_, ApiError>(value)
        })
        .transpose()?;

    let product = state
        .services
        .products
        .update_product(
            id,
            UpdateProductInput {
                name,
                description: payload.description,
                is_active: payload.is_active,
                image_url: normalize_optional_string(payload.image_url),
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ProductResponse::from(product)))
}

/// Delete a product and cascade to its packages, gallery, comments, and
/// attribute values
#[utoipa::path(
    delete,
    path = "/api/v1/products/:id",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_product(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Packages belonging to a product
#[utoipa::path(
    get,
    path = "/api/v1/products/:id/packages",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Product packages", body = [PackageResponse]),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product_packages(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let packages = state
        .services
        .packages
        .packages_for_product(id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<PackageResponse> = packages.into_iter().map(PackageResponse::from).collect();
    Ok(success_response(data))
}

/// Gallery images belonging to a product
#[utoipa::path(
    get,
    path = "/api/v1/products/:id/gallery",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Gallery images", body = [GalleryImageResponse]),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_product_gallery(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    // Listing through the product endpoint checks the product exists first
    state
        .services
        .products
        .get_product(id)
        .await
        .map_err(map_service_error)?;

    let images = state
        .services
        .products
        .list_gallery(Some(id))
        .await
        .map_err(map_service_error)?;

    let data: Vec<GalleryImageResponse> = images
        .into_iter()
        .map(GalleryImageResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Attribute definitions the product inherits through its categories.
/// Same-named definitions from different categories stay distinct.
#[utoipa::path(
    get,
    path = "/api/v1/products/:id/effective-attributes",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Inherited attribute definitions", body = [CategoryAttributeResponse]),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Products"
)]
pub async fn get_effective_attributes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let attributes = state
        .services
        .hierarchy
        .effective_attributes(id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<CategoryAttributeResponse> = attributes
        .into_iter()
        .map(CategoryAttributeResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Assign the product to a category (idempotent)
#[utoipa::path(
    post,
    path = "/api/v1/products/:id/categories/:category_id",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category assigned"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn assign_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .hierarchy
        .assign_category(id, category_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Remove the product from a category (idempotent)
#[utoipa::path(
    delete,
    path = "/api/v1/products/:id/categories/:category_id",
    params(
        ("id" = Uuid, Path, description = "Product ID"),
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category removed"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Products"
)]
pub async fn remove_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .hierarchy
        .remove_category(id, category_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct ProductListParams {
    /// Substring match on the product name
    pub search: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub category_ids: Option<Vec<Uuid>>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    #[validate(url)]
    pub image_url: Option<String>,
}

/// Summary view used by list endpoints
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductModel> for ProductResponse {
    fn from(model: ProductModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            is_active: model.is_active,
            image_url: model.image_url,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

/// An attribute value paired with the definition it instantiates
#[derive(Debug, Serialize, ToSchema)]
pub struct AttributeValueResponse {
    pub id: Uuid,
    pub attribute_id: Uuid,
    pub value: String,
    pub definition: Option<CategoryAttributeResponse>,
}

impl From<AttributeValue> for AttributeValueResponse {
    fn from(value: AttributeValue) -> Self {
        Self {
            id: value.assignment.id,
            attribute_id: value.assignment.attribute_id,
            value: value.assignment.value,
            definition: value.definition.map(CategoryAttributeResponse::from),
        }
    }
}

/// Detail view with every owned collection nested
#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetailResponse {
    #[serde(flatten)]
    pub product: ProductResponse,
    pub categories: Vec<CategoryResponse>,
    pub attributes: Vec<AttributeValueResponse>,
    pub packages: Vec<PackageResponse>,
    pub gallery: Vec<GalleryImageResponse>,
    pub comments: Vec<CommentResponse>,
}

impl From<ProductDetail> for ProductDetailResponse {
    fn from(detail: ProductDetail) -> Self {
        Self {
            product: ProductResponse::from(detail.product),
            categories: detail
                .categories
                .into_iter()
                .map(CategoryResponse::from)
                .collect(),
            attributes: detail
                .attributes
                .into_iter()
                .map(AttributeValueResponse::from)
                .collect(),
            packages: detail
                .packages
                .into_iter()
                .map(PackageResponse::from)
                .collect(),
            gallery: detail
                .gallery
                .into_iter()
                .map(GalleryImageResponse::from)
                .collect(),
            comments: detail
                .comments
                .into_iter()
                .map(CommentResponse::from)
                .collect(),
        }
    }
}
