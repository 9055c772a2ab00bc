use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, ensure_not_blank, map_service_error, no_content_response, normalize_string,
    success_response, validate_input,
};
use crate::{
    entities::BrandModel,
    errors::ApiError,
    services::catalog::{CreateBrandInput, UpdateBrandInput},
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

use super::products::ProductResponse;

/// Creates the router for brand endpoints
pub fn brands_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_brand))
        .route("/:id", put(update_brand))
        .route("/:id", delete(delete_brand))
        .route("/:id/categories/:category_id", post(link_category))
        .route("/:id/categories/:category_id", delete(unlink_category))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_brands))
        .route("/:id", get(get_brand))
        .route("/:id/products", get(get_brand_products))
        .merge(protected)
}

/// Create a new brand
#[utoipa::path(
    post,
    path = "/api/v1/brands",
    request_body = CreateBrandRequest,
    responses(
        (status = 201, description = "Brand created", body = BrandResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn create_brand(
    State(state): State<AppState>,
    Json(payload): Json<CreateBrandRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let name = normalize_string(payload.name);
    ensure_not_blank(&name, "name")?;
    let en_name = normalize_string(payload.en_name);
    ensure_not_blank(&en_name, "en_name")?;

    let brand = state
        .services
        .catalog
        .create_brand(CreateBrandInput {
            name,
            en_name,
            logo_url: payload.logo_url,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(BrandResponse::from(brand)))
}

/// List brands
#[utoipa::path(
    get,
    path = "/api/v1/brands",
    responses((status = 200, description = "Brands", body = [BrandResponse])),
    tag = "Brands"
)]
pub async fn list_brands(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let brands = state
        .services
        .catalog
        .list_brands()
        .await
        .map_err(map_service_error)?;

    let data: Vec<BrandResponse> = brands.into_iter().map(BrandResponse::from).collect();
    Ok(success_response(data))
}

/// Get a brand by ID
#[utoipa::path(
    get,
    path = "/api/v1/brands/:id",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Brand", body = BrandResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Brands"
)]
pub async fn get_brand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let brand = state
        .services
        .catalog
        .get_brand(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(BrandResponse::from(brand)))
}

/// Products reachable through the brand's category links
#[utoipa::path(
    get,
    path = "/api/v1/brands/:id/products",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 200, description = "Products for the brand", body = [ProductResponse]),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Brands"
)]
pub async fn get_brand_products(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let products = state
        .services
        .products
        .products_for_brand(id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(success_response(data))
}

/// Update a brand
#[utoipa::path(
    put,
    path = "/api/v1/brands/:id",
    params(("id" = Uuid, Path, description = "Brand ID")),
    request_body = UpdateBrandRequest,
    responses(
        (status = 200, description = "Brand updated", body = BrandResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn update_brand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBrandRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let brand = state
        .services
        .catalog
        .update_brand(
            id,
            UpdateBrandInput {
                name: payload.name,
                en_name: payload.en_name,
                logo_url: payload.logo_url,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(BrandResponse::from(brand)))
}

/// Delete a brand
#[utoipa::path(
    delete,
    path = "/api/v1/brands/:id",
    params(("id" = Uuid, Path, description = "Brand ID")),
    responses(
        (status = 204, description = "Brand deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn delete_brand(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_brand(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Link a brand to a category (idempotent)
#[utoipa::path(
    post,
    path = "/api/v1/brands/:id/categories/:category_id",
    params(
        ("id" = Uuid, Path, description = "Brand ID"),
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses(
        (status = 204, description = "Category linked"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn link_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .link_brand_to_category(id, category_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Unlink a brand from a category (idempotent)
#[utoipa::path(
    delete,
    path = "/api/v1/brands/:id/categories/:category_id",
    params(
        ("id" = Uuid, Path, description = "Brand ID"),
        ("category_id" = Uuid, Path, description = "Category ID")
    ),
    responses((status = 204, description = "Category unlinked")),
    security(("Bearer" = [])),
    tag = "Brands"
)]
pub async fn unlink_category(
    State(state): State<AppState>,
    Path((id, category_id)): Path<(Uuid, Uuid)>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .unlink_brand_from_category(id, category_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBrandRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 255))]
    pub en_name: String,
    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBrandRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub en_name: Option<String>,
    #[validate(url)]
    pub logo_url: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BrandResponse {
    pub id: Uuid,
    pub name: String,
    pub en_name: String,
    pub logo_url: Option<String>,
}

impl From<BrandModel> for BrandResponse {
    fn from(model: BrandModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            en_name: model.en_name,
            logo_url: model.logo_url,
        }
    }
}
