use crate::auth::consts as perm;
use crate::auth::AuthRouterExt;
use crate::handlers::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    entities::{BaseColorModel, ColorModel},
    errors::ApiError,
    services::catalog::{
        CreateBaseColorInput, CreateColorInput, UpdateBaseColorInput, UpdateColorInput,
    },
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

/// Creates the router for color endpoints
pub fn colors_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_color))
        .route("/:id", put(update_color))
        .route("/:id", delete(delete_color))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_colors))
        .route("/:id", get(get_color))
        .merge(protected)
}

/// Creates the router for base color endpoints
pub fn base_colors_routes() -> Router<AppState> {
    let protected = Router::new()
        .route("/", post(create_base_color))
        .route("/:id", put(update_base_color))
        .route("/:id", delete(delete_base_color))
        .with_permission(perm::CATALOG_WRITE);

    Router::new()
        .route("/", get(list_base_colors))
        .route("/:id", get(get_base_color))
        .merge(protected)
}

/// Create a color
#[utoipa::path(
    post,
    path = "/api/v1/colors",
    request_body = CreateColorRequest,
    responses(
        (status = 201, description = "Color created", body = ColorResponse),
        (status = 400, description = "Invalid payload", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn create_color(
    State(state): State<AppState>,
    Json(payload): Json<CreateColorRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let color = state
        .services
        .catalog
        .create_color(CreateColorInput {
            name: payload.name,
            hex_code: payload.hex_code,
            image_url: payload.image_url,
            base_color_id: payload.base_color_id,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(ColorResponse::from(color)))
}

/// List colors
#[utoipa::path(
    get,
    path = "/api/v1/colors",
    responses((status = 200, description = "Colors", body = [ColorResponse])),
    tag = "Colors"
)]
pub async fn list_colors(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let colors = state
        .services
        .catalog
        .list_colors()
        .await
        .map_err(map_service_error)?;

    let data: Vec<ColorResponse> = colors.into_iter().map(ColorResponse::from).collect();
    Ok(success_response(data))
}

/// Get a color by ID
#[utoipa::path(
    get,
    path = "/api/v1/colors/:id",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 200, description = "Color", body = ColorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Colors"
)]
pub async fn get_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let color = state
        .services
        .catalog
        .get_color(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ColorResponse::from(color)))
}

/// Update a color
#[utoipa::path(
    put,
    path = "/api/v1/colors/:id",
    params(("id" = Uuid, Path, description = "Color ID")),
    request_body = UpdateColorRequest,
    responses(
        (status = 200, description = "Color updated", body = ColorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn update_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateColorRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    validate_input(&payload)?;

    let color = state
        .services
        .catalog
        .update_color(
            id,
            UpdateColorInput {
                name: payload.name,
                hex_code: payload.hex_code,
                image_url: payload.image_url,
                base_color_id: payload.base_color_id,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(ColorResponse::from(color)))
}

/// Delete a color
#[utoipa::path(
    delete,
    path = "/api/v1/colors/:id",
    params(("id" = Uuid, Path, description = "Color ID")),
    responses(
        (status = 204, description = "Color deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn delete_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_color(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

/// Create a base color
#[utoipa::path(
    post,
    path = "/api/v1/base-colors",
    request_body = CreateBaseColorRequest,
    responses((status = 201, description = "Base color created", body = BaseColorResponse)),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn create_base_color(
    State(state): State<AppState>,
    Json(payload): Json<CreateBaseColorRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let base_color = state
        .services
        .catalog
        .create_base_color(CreateBaseColorInput {
            name: payload.name,
            hex_code: payload.hex_code,
        })
        .await
        .map_err(map_service_error)?;

    Ok(created_response(BaseColorResponse::from(base_color)))
}

/// List base colors
#[utoipa::path(
    get,
    path = "/api/v1/base-colors",
    responses((status = 200, description = "Base colors", body = [BaseColorResponse])),
    tag = "Colors"
)]
pub async fn list_base_colors(
    State(state): State<AppState>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let base_colors = state
        .services
        .catalog
        .list_base_colors()
        .await
        .map_err(map_service_error)?;

    let data: Vec<BaseColorResponse> = base_colors
        .into_iter()
        .map(BaseColorResponse::from)
        .collect();
    Ok(success_response(data))
}

/// Get a base color by ID
#[utoipa::path(
    get,
    path = "/api/v1/base-colors/:id",
    params(("id" = Uuid, Path, description = "Base color ID")),
    responses(
        (status = 200, description = "Base color", body = BaseColorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    tag = "Colors"
)]
pub async fn get_base_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let base_color = state
        .services
        .catalog
        .get_base_color(id)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(BaseColorResponse::from(base_color)))
}

/// Update a base color
#[utoipa::path(
    put,
    path = "/api/v1/base-colors/:id",
    params(("id" = Uuid, Path, description = "Base color ID")),
    request_body = UpdateBaseColorRequest,
    responses(
        (status = 200, description = "Base color updated", body = BaseColorResponse),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn update_base_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBaseColorRequest>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    let base_color = state
        .services
        .catalog
        .update_base_color(
            id,
            UpdateBaseColorInput {
                name: payload.name,
                hex_code: payload.hex_code,
            },
        )
        .await
        .map_err(map_service_error)?;

    Ok(success_response(BaseColorResponse::from(base_color)))
}

/// Delete a base color
#[utoipa::path(
    delete,
    path = "/api/v1/base-colors/:id",
    params(("id" = Uuid, Path, description = "Base color ID")),
    responses(
        (status = 204, description = "Base color deleted"),
        (status = 404, description = "Not found", body = crate::errors::ErrorResponse)
    ),
    security(("Bearer" = [])),
    tag = "Colors"
)]
pub async fn delete_base_color(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl axum::response::IntoResponse, ApiError> {
    state
        .services
        .catalog
        .delete_base_color(id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateColorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    /// `#RRGGBB`
    pub hex_code: String,
    #[validate(url)]
    pub image_url: Option<String>,
    pub base_color_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateColorRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub hex_code: Option<String>,
    #[validate(url)]
    pub image_url: Option<String>,
    pub base_color_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBaseColorRequest {
    pub name: Option<String>,
    pub hex_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBaseColorRequest {
    pub name: Option<String>,
    pub hex_code: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ColorResponse {
    pub id: Uuid,
    pub name: String,
    pub hex_code: String,
    pub image_url: Option<String>,
    pub base_color_id: Option<Uuid>,
}

impl From<ColorModel> for ColorResponse {
    fn from(model: ColorModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            hex_code: model.hex_code,
            image_url: model.image_url,
            base_color_id: model.base_color_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BaseColorResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub hex_code: String,
}

impl From<BaseColorModel> for BaseColorResponse {
    fn from(model: BaseColorModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            hex_code: model.hex_code,
        }
    }
}
