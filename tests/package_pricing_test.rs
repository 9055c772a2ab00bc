//! End-to-end checks that a package's persisted `final_price` always agrees
//! with its price, discount, and discount gate.

mod common;

use assert_matches::assert_matches;
use catalog_api::{
    errors::ServiceError,
    services::packages::{CreatePackageInput, PackageQuery, UpdatePackageInput},
};
use uuid::Uuid;

fn package_input(product_id: Uuid, price: i64, discount: i16, active: bool) -> CreatePackageInput {
    CreatePackageInput {
        product_id,
        size_id: None,
        color_id: None,
        storage: None,
        quantity: 5,
        weight_grams: 250,
        is_active: true,
        price,
        discount,
        is_active_discount: active,
    }
}

#[tokio::test]
async fn final_price_is_derived_on_create() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let discounted = app
        .services
        .packages
        .create_package(package_input(product, 1000, 20, true))
        .await
        .unwrap();
    assert_eq!(discounted.final_price, 800);

    let truncated = app
        .services
        .packages
        .create_package(package_input(product, 999, 33, true))
        .await
        .unwrap();
    // floor(999 * 33 / 100) == 329, so truncation keeps a unit the buyer pays
    assert_eq!(truncated.final_price, 670);

    let gated_off = app
        .services
        .packages
        .create_package(package_input(product, 1000, 20, false))
        .await
        .unwrap();
    assert_eq!(gated_off.final_price, 1000);
}

#[tokio::test]
async fn out_of_range_discounts_are_rejected_not_clamped() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let too_high = app
        .services
        .packages
        .create_package(package_input(product, 1000, 100, true))
        .await;
    assert_matches!(too_high, Err(ServiceError::ValidationError(_)));

    let negative = app
        .services
        .packages
        .create_package(package_input(product, 1000, -1, false))
        .await;
    assert_matches!(negative, Err(ServiceError::ValidationError(_)));

    // Nothing was persisted by the rejected writes
    let listed = app
        .services
        .packages
        .list_packages(PackageQuery {
            product_id: Some(product),
            is_active: None,
            limit: None,
            offset: None,
        })
        .await
        .unwrap();
    assert_eq!(listed.total, 0);
}

#[tokio::test]
async fn zero_and_negative_prices_are_rejected() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    for price in [0, -500] {
        let result = app
            .services
            .packages
            .create_package(package_input(product, price, 0, false))
            .await;
        assert_matches!(result, Err(ServiceError::ValidationError(_)));
    }
}

#[tokio::test]
async fn update_recomputes_final_price_from_merged_state() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let package = app
        .services
        .packages
        .create_package(package_input(product, 1000, 20, false))
        .await
        .unwrap();
    assert_eq!(package.final_price, 1000);

    // Flipping only the gate reuses the stored price and discount
    let updated = app
        .services
        .packages
        .update_package(
            package.id,
            UpdatePackageInput {
                is_active_discount: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.final_price, 800);

    // Changing the price while the gate is on recomputes again
    let repriced = app
        .services
        .packages
        .update_package(
            package.id,
            UpdatePackageInput {
                price: Some(2000),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(repriced.final_price, 1600);

    // An out-of-range discount on update is rejected and leaves the row alone
    let rejected = app
        .services
        .packages
        .update_package(
            package.id,
            UpdatePackageInput {
                discount: Some(150),
                ..Default::default()
            },
        )
        .await;
    assert_matches!(rejected, Err(ServiceError::ValidationError(_)));

    let unchanged = app.services.packages.get_package(package.id).await.unwrap();
    assert_eq!(unchanged.price, 2000);
    assert_eq!(unchanged.discount, 20);
    assert_eq!(unchanged.final_price, 1600);
}

#[tokio::test]
async fn counters_survive_pricing_updates() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let package = app
        .services
        .packages
        .create_package(package_input(product, 1000, 0, false))
        .await
        .unwrap();

    app.services.packages.record_view(package.id).await.unwrap();
    app.services.packages.record_view(package.id).await.unwrap();
    app.services
        .packages
        .record_sale(package.id, 3)
        .await
        .unwrap();

    app.services
        .packages
        .update_package(
            package.id,
            UpdatePackageInput {
                price: Some(900),
                discount: Some(10),
                is_active_discount: Some(true),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let current = app.services.packages.get_package(package.id).await.unwrap();
    assert_eq!(current.views_count, 2);
    assert_eq!(current.sold_count, 3);
    assert_eq!(current.final_price, 810);
}

#[tokio::test]
async fn sale_increments_must_be_positive() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let package = app
        .services
        .packages
        .create_package(package_input(product, 1000, 0, false))
        .await
        .unwrap();

    for quantity in [0, -2] {
        let result = app.services.packages.record_sale(package.id, quantity).await;
        assert_matches!(result, Err(ServiceError::ValidationError(_)));
    }

    let current = app.services.packages.get_package(package.id).await.unwrap();
    assert_eq!(current.sold_count, 0);
}

#[tokio::test]
async fn missing_references_fail_with_not_found() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let ghost_product = app
        .services
        .packages
        .create_package(package_input(Uuid::new_v4(), 1000, 0, false))
        .await;
    assert_matches!(ghost_product, Err(ServiceError::NotFound(_)));

    let mut with_ghost_size = package_input(product, 1000, 0, false);
    with_ghost_size.size_id = Some(Uuid::new_v4());
    let result = app.services.packages.create_package(with_ghost_size).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));

    let mut with_ghost_color = package_input(product, 1000, 0, false);
    with_ghost_color.color_id = Some(Uuid::new_v4());
    let result = app.services.packages.create_package(with_ghost_color).await;
    assert_matches!(result, Err(ServiceError::NotFound(_)));
}

#[tokio::test]
async fn rating_is_gated_to_five_stars() {
    let app = common::setup().await;
    let base = app.create_base_category("electronics").await;
    let category = app.create_category(base, None, "phones").await;
    let product = app.create_product("phone-x", vec![category]).await;

    let package = app
        .services
        .packages
        .create_package(package_input(product, 1000, 0, false))
        .await
        .unwrap();

    app.services
        .packages
        .set_rating(package.id, 4.5)
        .await
        .unwrap();
    let current = app.services.packages.get_package(package.id).await.unwrap();
    assert!((current.rating - 4.5).abs() < f64::EPSILON);

    let too_high = app.services.packages.set_rating(package.id, 5.1).await;
    assert_matches!(too_high, Err(ServiceError::ValidationError(_)));

    let negative = app.services.packages.set_rating(package.id, -0.1).await;
    assert_matches!(negative, Err(ServiceError::ValidationError(_)));
}
