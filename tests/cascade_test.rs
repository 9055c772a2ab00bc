//! Delete cascades and the base-category immutability rule.

mod common;

use assert_matches::assert_matches;
use catalog_api::{
    entities::{
        comment, gallery_image, product_attribute, product_category, product_package, Category,
        Comment, GalleryImage, ProductAttribute, ProductCategory, ProductPackage,
    },
    errors::ServiceError,
    services::{
        catalog::{CreateCategoryAttributeInput, UpdateCategoryInput},
        comments::CreateCommentInput,
        packages::CreatePackageInput,
        products::CreateProductAttributeInput,
    },
};
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};

#[tokio::test]
async fn deleting_a_product_removes_everything_it_owns() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;
    let author = app.create_user("shopper", false).await;

    app.services
        .packages
        .create_package(CreatePackageInput {
            product_id: product,
            size_id: None,
            color_id: None,
            storage: None,
            quantity: 1,
            weight_grams: 180,
            is_active: true,
            price: 79_900,
            discount: 0,
            is_active_discount: false,
        })
        .await
        .unwrap();

    app.services
        .products
        .add_gallery_image(product, "https://img.example.com/phone-x/1.jpg".to_string())
        .await
        .unwrap();

    let definition = app
        .services
        .catalog
        .create_category_attribute(CreateCategoryAttributeInput {
            category_id: category,
            name: "display".to_string(),
            title: Some("Display".to_string()),
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
        .comments
        .create_comment(
            CreateCommentInput {
                product_id: product,
                parent_id: None,
                body: "great phone".to_string(),
                rating: 5,
            },
            author.id,
        )
        .await
        .unwrap();

    app.services.products.delete_product(product).await.unwrap();

    let db = app.db.as_ref();
    let packages = ProductPackage::find()
        .filter(product_package::Column::ProductId.eq(product))
        .count(db)
        .await
        .unwrap();
    let gallery = GalleryImage::find()
        .filter(gallery_image::Column::ProductId.eq(product))
        .count(db)
        .await
        .unwrap();
    let comments = Comment::find()
        .filter(comment::Column::ProductId.eq(product))
        .count(db)
        .await
        .unwrap();
    let attributes = ProductAttribute::find()
        .filter(product_attribute::Column::ProductId.eq(product))
        .count(db)
        .await
        .unwrap();
    let links = ProductCategory::find()
        .filter(product_category::Column::ProductId.eq(product))
        .count(db)
        .await
        .unwrap();

    assert_eq!(packages, 0);
    assert_eq!(gallery, 0);
    assert_eq!(comments, 0);
    assert_eq!(attributes, 0);
    assert_eq!(links, 0);

    let gone = app.services.products.get_product(product).await;
    assert_matches!(gone, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn deleting_a_category_removes_its_subtree_and_links() {
    let app = common::setup().await;
    let base = app.create_base_category("clothing").await;
    let root = app.create_category(base, None, "apparel").await;
    let child = app.create_category(base, Some(root), "shirts").await;
    let grandchild = app.create_category(base, Some(child), "t-shirts").await;
    let sibling = app.create_category(base, None, "shoes").await;

    app.services
        .catalog
        .create_category_attribute(CreateCategoryAttributeInput {
            category_id: child,
            name: "fit".to_string(),
            title: None,
            value: "regular".to_string(),
        })
        .await
        .unwrap();

    let product = app.create_product("basic-tee", vec![grandchild, sibling]).await;

    app.services.catalog.delete_category(root).await.unwrap();

    let db = app.db.as_ref();
    for id in [root, child, grandchild] {
        assert!(Category::find_by_id(id).one(db).await.unwrap().is_none());
    }
    assert!(Category::find_by_id(sibling).one(db).await.unwrap().is_some());

    // The product survives; only the links into the deleted subtree go
    let remaining = app
        .services
        .hierarchy
        .category_ids_of(product)
        .await
        .unwrap();
    assert_eq!(remaining, vec![sibling]);
}

#[tokio::test]
async fn base_category_is_immutable_once_products_attach() {
    let app = common::setup().await;
    let clothing = app.create_base_category("clothing").await;
    let electronics = app.create_base_category("electronics").await;
    let category = app.create_category(clothing, None, "wearables").await;
    let child = app.create_category(clothing, Some(category), "watches").await;

    // Product attaches deep in the subtree; the rule still locks the root
    app.create_product("smart-watch", vec![child]).await;

    let result = app
        .services
        .catalog
        .update_category(
            category,
            UpdateCategoryInput {
                base_category_id: Some(electronics),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(result, Err(ServiceError::InvalidOperation(_)));

    let unchanged = app.services.catalog.get_category(category).await.unwrap();
    assert_eq!(unchanged.base_category_id, clothing);
}

#[tokio::test]
async fn base_category_can_move_while_the_subtree_is_empty() {
    let app = common::setup().await;
    let clothing = app.create_base_category("clothing").await;
    let electronics = app.create_base_category("electronics").await;
    let category = app.create_category(clothing, None, "gadgets").await;
    let child = app.create_category(clothing, Some(category), "widgets").await;

    let moved = app
        .services
        .catalog
        .update_category(
            category,
            UpdateCategoryInput {
                base_category_id: Some(electronics),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.base_category_id, electronics);

    // The whole subtree moves with it
    let child_row = app.services.catalog.get_category(child).await.unwrap();
    assert_eq!(child_row.base_category_id, electronics);
}

#[tokio::test]
async fn product_names_are_unique() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    app.create_product("phone-x", vec![category]).await;

    let duplicate = app
        .services
        .products
        .create_product(catalog_api::services::products::CreateProductInput {
            name: "phone-x".to_string(),
            description: String::new(),
            is_active: true,
            image_url: None,
            category_ids: vec![category],
        })
        .await;
    assert_matches!(duplicate, Err(ServiceError::ValidationError(_)));
}
