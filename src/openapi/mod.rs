use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = r#"
# Catalog API

A catalog backend for storefronts: base categories, category trees, brands,
colors, sizes, products, purchasable packages with derived pricing, image
galleries, and moderated comments.

## Authentication

Reads are public. Mutating endpoints require a JWT bearer token carrying the
`catalog:write` permission (`comments:moderate` for comment approval);
creating a comment only requires an authenticated caller:

```
Authorization: Bearer <your-jwt-token>
```

## Pagination

List endpoints accept `page` / `per_page` (max 100) or `limit` / `offset`
query parameters as documented per endpoint.
"#,
        contact(name = "API Support", email = "support@example.com"),
        license(name = "MIT")
    ),
    modifiers(&SecurityAddon),
    paths(
        // Base categories
        crate::handlers::base_categories::create_base_category,
        crate::handlers::base_categories::list_base_categories,
        crate::handlers::base_categories::get_base_category,
        crate::handlers::base_categories::update_base_category,
        crate::handlers::base_categories::delete_base_category,
        crate::handlers::base_categories::link_brand,
        crate::handlers::base_categories::unlink_brand,

        // Categories
        crate::handlers::categories::create_category,
        crate::handlers::categories::list_categories,
        crate::handlers::categories::get_category,
        crate::handlers::categories::get_category_path,
        crate::handlers::categories::get_category_products,
        crate::handlers::categories::update_category,
        crate::handlers::categories::delete_category,

        // Brands
        crate::handlers::brands::create_brand,
        crate::handlers::brands::list_brands,
        crate::handlers::brands::get_brand,
        crate::handlers::brands::get_brand_products,
        crate::handlers::brands::update_brand,
        crate::handlers::brands::delete_brand,
        crate::handlers::brands::link_category,
        crate::handlers::brands::unlink_category,

        // Colors
        crate::handlers::colors::create_color,
        crate::handlers::colors::list_colors,
        crate::handlers::colors::get_color,
        crate::handlers::colors::update_color,
        crate::handlers::colors::delete_color,
        crate::handlers::colors::create_base_color,
        crate::handlers::colors::list_base_colors,
        crate::handlers::colors::get_base_color,
        crate::handlers::colors::update_base_color,
        crate::handlers::colors::delete_base_color,

        // Sizes
        crate::handlers::sizes::create_size,
        crate::handlers::sizes::list_sizes,
        crate::handlers::sizes::get_size,
        crate::handlers::sizes::update_size,
        crate::handlers::sizes::delete_size,

        // Attribute definitions and values
        crate::handlers::attributes::create_category_attribute,
        crate::handlers::attributes::list_category_attributes,
        crate::handlers::attributes::get_category_attribute,
        crate::handlers::attributes::update_category_attribute,
        crate::handlers::attributes::delete_category_attribute,
        crate::handlers::attributes::create_product_attribute,
        crate::handlers::attributes::list_product_attributes,
        crate::handlers::attributes::update_product_attribute,
        crate::handlers::attributes::delete_product_attribute,

        // Products
        crate::handlers::products::create_product,
        crate::handlers::products::list_products,
        crate::handlers::products::get_product,
        crate::handlers::products::update_product,
        crate::handlers::products::delete_product,
        crate::handlers::products::get_product_packages,
        crate::handlers::products::get_product_gallery,
        crate::handlers::products::get_effective_attributes,
        crate::handlers::products::assign_category,
        crate::handlers::products::remove_category,

        // Packages
        crate::handlers::packages::create_package,
        crate::handlers::packages::list_packages,
        crate::handlers::packages::get_package,
        crate::handlers::packages::update_package,
        crate::handlers::packages::delete_package,
        crate::handlers::packages::record_view,
        crate::handlers::packages::record_sale,
        crate::handlers::packages::set_rating,

        // Gallery
        crate::handlers::gallery::add_image,
        crate::handlers::gallery::list_images,
        crate::handlers::gallery::delete_image,

        // Comments
        crate::handlers::comments::create_comment,
        crate::handlers::comments::list_comments,
        crate::handlers::comments::my_comments,
        crate::handlers::comments::get_comment,
        crate::handlers::comments::update_comment,
        crate::handlers::comments::delete_comment,
        crate::handlers::comments::approve_comment,
    ),
    components(
        schemas(
            // Common types
            crate::ApiResponse<serde_json::Value>,
            crate::ListQuery,

            // Catalog hierarchy
            crate::handlers::base_categories::CreateBaseCategoryRequest,
            crate::handlers::base_categories::UpdateBaseCategoryRequest,
            crate::handlers::base_categories::BaseCategoryResponse,
            crate::handlers::base_categories::BaseCategoryDetailResponse,
            crate::handlers::categories::CreateCategoryRequest,
            crate::handlers::categories::UpdateCategoryRequest,
            crate::handlers::categories::CategoryResponse,
            crate::handlers::categories::CategoryDetailResponse,
            crate::handlers::brands::CreateBrandRequest,
            crate::handlers::brands::UpdateBrandRequest,
            crate::handlers::brands::BrandResponse,

            // Dimensions
            crate::handlers::colors::CreateColorRequest,
            crate::handlers::colors::UpdateColorRequest,
            crate::handlers::colors::ColorResponse,
            crate::handlers::colors::CreateBaseColorRequest,
            crate::handlers::colors::UpdateBaseColorRequest,
            crate::handlers::colors::BaseColorResponse,
            crate::handlers::sizes::CreateSizeRequest,
            crate::handlers::sizes::UpdateSizeRequest,
            crate::handlers::sizes::SizeResponse,

            // Attributes
            crate::handlers::attributes::CreateCategoryAttributeRequest,
            crate::handlers::attributes::UpdateCategoryAttributeRequest,
            crate::handlers::attributes::CategoryAttributeResponse,
            crate::handlers::attributes::CreateProductAttributeRequest,
            crate::handlers::attributes::UpdateProductAttributeRequest,
            crate::handlers::attributes::ProductAttributeResponse,

            // Products and packages
            crate::handlers::products::CreateProductRequest,
            crate::handlers::products::UpdateProductRequest,
            crate::handlers::products::ProductResponse,
            crate::handlers::products::ProductDetailResponse,
            crate::handlers::products::AttributeValueResponse,
            crate::handlers::packages::CreatePackageRequest,
            crate::handlers::packages::UpdatePackageRequest,
            crate::handlers::packages::RecordSaleRequest,
            crate::handlers::packages::SetRatingRequest,
            crate::handlers::packages::PackageResponse,
            crate::handlers::packages::PackageListResponse,

            // Gallery and comments
            crate::handlers::gallery::AddGalleryImageRequest,
            crate::handlers::gallery::GalleryImageResponse,
            crate::handlers::comments::CreateCommentRequest,
            crate::handlers::comments::UpdateCommentRequest,
            crate::handlers::comments::CommentResponse,

            // Error types
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "Bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openapi_document_generates() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("Catalog API"));
        assert!(json.contains("/api/v1/products"));
        assert!(json.contains("/api/v1/product-packages"));
    }
}
