use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{entities::GalleryImageModel, errors::ApiError, AppState};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{delete, get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Creates the router for gallery endpoints
pub fn gallery_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(add_image))
        .route("/:id", delete(delete_image))
        .with_permission(perm::CATALOG_WRITE);

    Router::new().route("/", get(list_images)).merge(protected)
}

/// Attach an image to a product's gallery. Emits the resize hook for the
/// 800x800 gallery target.
#[utoipa::path(
    post,
    path = "/api/v1/gallery",
    request_body = AddGalleryImageRequest,
    responses(
        (status = 201, description = "Image attached", body = GalleryImageResponse),
        (status = 404, description = "Product not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Gallery"
)]
pub async fn add_image(
    State(state): State<AppState>,
    Json(payload): Json<AddGalleryImageRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let image = state
        .services
        .products
        .add_gallery_image(payload.product_id, payload.image_url)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(GalleryImageResponse::from(image)))
}

/// List gallery images, optionally filtered by product
#[utoipa::path(
    get,
    path = "/api/v1/gallery",
    params(GalleryListParams),
    responses((status = 200, description = "Gallery images", body = [GalleryImageResponse])),
    tag = "Gallery"
)]
pub async fn list_images(
    State(state): State<AppState>,
    Query(params): Query<GalleryListParams>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let images = state
        .services
        .products
        .list_gallery(params.product_id)
        .await
        .map_err(map_service_error)?;

    let data: Vec<GalleryImageResponse> = images
        .into_iter()
        .map(GalleryImageResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Remove a gallery image
#[utoipa::path(
    delete,
    path = "/api/v1/gallery/:id",
    params(("id" = Uuid, Path, description = "Gallery image ID")),
    responses(
        (status = 204, description = "Image removed"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Gallery"
)]
pub async fn delete_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .products
        .delete_gallery_image(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GalleryListParams {
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct AddGalleryImageRequest {
    pub product_id: Uuid,
    #[validate(url)]
    pub image_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct GalleryImageResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub image_url: String,
}

impl From<GalleryImageModel> for GalleryImageResponse {
    fn from(model: GalleryImageModel) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            image_url: model.image_url,
        }
    }
}
