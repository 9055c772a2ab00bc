//! Product detail aggregation and list filtering.

mod common;

use catalog_api::services::{
    catalog::{CreateBrandInput, CreateCategoryAttributeInput},
    comments::CreateCommentInput,
    packages::CreatePackageInput,
    products::{CreateProductAttributeInput, ProductSearchQuery},
};

#[tokio::test]
async fn detail_view_nests_every_owned_collection() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;
    let author = app.create_user("reader", false).await;

    let definition = app
        .services
        .catalog
        .create_category_attribute(CreateCategoryAttributeInput {
            category_id: category,
            name: "display".to_string(),
            title: None,
            value: "6.1in".to_string(),
        })
        .await
        .unwrap();
    app.services
        .products
        .create_product_attribute(CreateProductAttributeInput {
            product_id: product,
            attribute_id: definition.id,
            value: "6.1in OLED".to_string(),
        })
        .await
        .unwrap();

    app.services
        .packages
        .create_package(CreatePackageInput {
            product_id: product,
            size_id: None,
            color_id: None,
            storage: None,
            quantity: 3,
            weight_grams: 180,
            is_active: true,
            price: 1000,
            discount: 20,
            is_active_discount: true,
        })
        .await
        .unwrap();

    app.services
        .products
        .add_gallery_image(product, "https://img.example.com/1.jpg".to_string())
        .await
        .unwrap();

    app.services
        .comments
        .create_comment(
            CreateCommentInput {
                product_id: product,
                parent_id: None,
                body: "nice".to_string(),
                rating: 5,
            },
            author.id,
        )
        .await
        .unwrap();

    let detail = app
        .services
        .products
        .get_product_detail(product)
        .await
        .unwrap();

    assert_eq!(detail.product.id, product);
    assert_eq!(detail.categories.len(), 1);
    assert_eq!(detail.categories[0].id, category);
    assert_eq!(detail.attributes.len(), 1);
    assert_eq!(
        detail.attributes[0]
            .definition
            .as_ref()
            .map(|d| d.name.as_str()),
        Some("display")
    );
    assert_eq!(detail.packages.len(), 1);
    assert_eq!(detail.packages[0].final_price, 800);
    assert_eq!(detail.gallery.len(), 1);
    assert_eq!(detail.comments.len(), 1);
}

#[tokio::test]
async fn search_filters_by_name_and_active_flag() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    app.create_product("phone-alpha", vec![category]).await;
    app.create_product("phone-beta", vec![category]).await;
    app.create_product("tablet-gamma", vec![category]).await;

    let phones = app
        .services
        .products
        .search_products(ProductSearchQuery {
            search: Some("phone".to_string()),
            is_active: None,
            limit: None,
            offset: None,
        })
        .await
        .unwrap();
    assert_eq!(phones.total, 2);

    let paged = app
        .services
        .products
        .search_products(ProductSearchQuery {
            search: None,
            is_active: None,
            limit: Some(2),
            offset: Some(0),
        })
        .await
        .unwrap();
    assert_eq!(paged.total, 3);
    assert_eq!(paged.products.len(), 2);
}

#[tokio::test]
async fn brand_products_flow_through_category_links() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let other = app.create_category(base, None, "tablets").await;

    let brand = app
        .services
        .catalog
        .create_brand(CreateBrandInput {
            name: "acme".to_string(),
            en_name: "acme-en".to_string(),
            logo_url: None,
        })
        .await
        .unwrap();
    app.services
        .catalog
        .link_brand_to_category(brand.id, category)
        .await
        .unwrap();

    let in_brand = app.create_product("phone-acme", vec![category]).await;
    app.create_product("tablet-other", vec![other]).await;

    let products = app
        .services
        .products
        .products_for_brand(brand.id)
        .await
        .unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, in_brand);

    let in_category = app
        .services
        .products
        .products_in_category(category)
        .await
        .unwrap();
    assert_eq!(in_category.len(), 1);
    assert_eq!(in_category[0].id, in_brand);
}
