use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    entities::{ProductPackageModel, StorageCapacity},
    errors::ApiError,
    services::packages::{self, CreatePackageInput, PackageQuery, UpdatePackageInput},
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

/// Creates the router for product package (variant) endpoints
pub fn packages_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_package))
        .route("/:id", put(update_package))
        .route("/:id", delete(delete_package))
        .route("/:id/sale", post(record_sale))
        .route("/:id/rating", put(set_rating))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_packages))
        .route("/:id", get(get_package))
        // View events come straight from the storefront
        .route("/:id/view", post(record_view))
        .merge(protected)
}

/// Create a package. `final_price` is derived from `price`, `discount`, and
/// `is_active_discount` in the same write.
#[utoipa::path(
    post,
    path = "/api/v1/product-packages",
    request_body = CreatePackageRequest,
    responses(
        (status = 201, description = "Package created", body = PackageResponse),
        (status = 400, description = "Price or discount out of range", body = crate::errors::ErrorResponse),
        (status = 404, description = "Product, size, or color not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Packages"
)]
pub async fn create_package(
    State(state): State<AppState>,
    Json(payload): Json<CreatePackageRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let package = state
        .services
        .packages
        .create_package(CreatePackageInput {
            product_id: payload.product_id,
            size_id: payload.size_id,
            color_id: payload.color_id,
            storage: payload.storage,
            quantity: payload.quantity.unwrap_or(0),
            weight_grams: payload.weight_grams.unwrap_or(0),
            is_active: payload.is_active.unwrap_or(false),
            price: payload.price,
            discount: payload.discount.unwrap_or(0),
            is_active_discount: payload.is_active_discount.unwrap_or(false),
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(PackageResponse::from(package)))
}

/// List packages, optionally filtered by product or active flag
#[utoipa::path(
    get,
    path = "/api/v1/product-packages",
    params(PackageListParams),
    responses((status = 200, description = "Packages", body = [PackageResponse])),
    tag = "Packages"
)]
pub async fn list_packages(
    State(state): State<AppState>,
    Query(params): Query<PackageListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let result = state
        .services
        .packages
        .list_packages(PackageQuery {
            product_id: params.product_id,
            is_active: params.is_active,
            limit: params.limit,
            offset: params.offset,
        })
        .await
        .map_err(map_service_error)?;

    let data: Vec<PackageResponse> = result
        .packages
        .into_iter()
        .map(PackageResponse::from)
        .collect();
    Ok(success_response(PackageListResponse {
        packages: data,
        total: result.total,
    }))
}

/// Get a package by ID
#[utoipa::path(
    get,
    path = "/api/v1/product-packages/:id",
    params(("id" = Uuid, Path, description = "Package ID")),
    responses(
        (status = 200, description = "Package", body = PackageResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Packages"
)]
pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let package = state
        .services
        .packages
        .get_package(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(PackageResponse::from(package)))
}

/// Update a package. Pricing fields are revalidated and `final_price`
/// recomputed from the merged state.
#[utoipa::path(
    put,
    path = "/api/v1/product-packages/:id",
    params(("id" = Uuid, Path, description = "Package ID")),
    request_body = UpdatePackageRequest,
    responses(
        (status = 200, description = "Package updated", body = PackageResponse),
        (status = 400, description = "Price or discount out of range", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Packages"
)]
pub async fn update_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdatePackageRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let package = state
        .services
        .packages
        .update_package(
            id,
            UpdatePackageInput {
                size_id: payload.size_id,
                color_id: payload.color_id,
                storage: payload.storage,
                quantity: payload.quantity,
                weight_grams: payload.weight_grams,
                is_active: payload.is_active,
                price: payload.price,
                discount: payload.discount,
                is_active_discount: payload.is_active_discount,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(PackageResponse::from(package)))
}

/// Delete a package
#[utoipa::path(
    delete,
    path = "/api/v1/product-packages/:id",
    params(("id" = Uuid, Path, description = "Package ID")),
    responses(
        (status = 204, description = "Package deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Packages"
)]
pub async fn delete_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .packages
        .delete_package(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Record one view of the package
#[utoipa::path(
    post,
    path = "/api/v1/product-packages/:id/view",
    params(("id" = Uuid, Path, description = "Package ID")),
    responses(
        (status = 204, description = "View recorded"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Packages"
)]
pub async fn record_view(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .packages
        .record_view(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Record units sold from an order event
#[utoipa::path(
    post,
    path = "/api/v1/product-packages/:id/sale",
    params(("id" = Uuid, Path, description = "Package ID")),
    request_body = RecordSaleRequest,
    responses(
        (status = 204, description = "Sale recorded"),
        (status = 400, description = "Quantity must be positive", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Packages"
)]
pub async fn record_sale(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<RecordSaleRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .packages
        .record_sale(id, payload.quantity)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Set the aggregated rating
#[utoipa::path(
    put,
    path = "/api/v1/product-packages/:id/rating",
    params(("id" = Uuid, Path, description = "Package ID")),
    request_body = SetRatingRequest,
    responses(
        (status = 204, description = "Rating set"),
        (status = 400, description = "Rating out of range", body = crate::errors::ErrorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Packages"
)]
pub async fn set_rating(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetRatingRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .packages
        .set_rating(id, payload.rating)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct PackageListParams {
    pub product_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreatePackageRequest {
    pub product_id: Uuid,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub storage: Option<StorageCapacity>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub weight_grams: Option<i32>,
    pub is_active: Option<bool>,
    /// Integer currency units, must be positive
    pub price: i64,
    /// Percent, 0..=99
    pub discount: Option<i16>,
    pub is_active_discount: Option<bool>,
}

#[derive(Debug, Default, Deserialize, ToSchema, Validate)]
pub struct UpdatePackageRequest {
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub storage: Option<StorageCapacity>,
    #[validate(range(min = 0))]
    pub quantity: Option<i32>,
    #[validate(range(min = 0))]
    pub weight_grams: Option<i32>,
    pub is_active: Option<bool>,
    pub price: Option<i64>,
    pub discount: Option<i16>,
    pub is_active_discount: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordSaleRequest {
    pub quantity: i64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetRatingRequest {
    pub rating: f64,
}

/// Package view. `final_price` is the gated, persisted figure;
/// `potential_savings` reports the configured discount whether or not it is
/// active.
#[derive(Debug, Serialize, ToSchema)]
pub struct PackageResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    #[schema(value_type = Option<String>)]
    pub storage: Option<StorageCapacity>,
    pub quantity: i32,
    pub weight_grams: i32,
    pub is_active: bool,
    pub price: i64,
    pub discount: i16,
    pub is_active_discount: bool,
    pub final_price: i64,
    pub potential_savings: i64,
    pub sold_count: i64,
    pub views_count: i64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProductPackageModel> for PackageResponse {
    fn from(model: ProductPackageModel) -> Self {
        let potential_savings = packages::potential_savings(&model);
        Self {
            id: model.id,
            product_id: model.product_id,
            size_id: model.size_id,
            color_id: model.color_id,
            storage: model.storage,
            quantity: model.quantity,
            weight_grams: model.weight_grams,
            is_active: model.is_active,
            price: model.price,
            discount: model.discount,
            is_active_discount: model.is_active_discount,
            final_price: model.final_price,
            potential_savings,
            sold_count: model.sold_count,
            views_count: model.views_count,
            rating: model.rating,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackageListResponse {
    pub packages: Vec<PackageResponse>,
    pub total: u64,
}
