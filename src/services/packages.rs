use crate::{
    entities::{
        product_package, Color, Product, ProductPackage, ProductPackageModel, Size,
        StorageCapacity,
    },
    errors::ServiceError,
    events::{Event, EventSender},
    services::pricing,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Owns product packages (purchasable variants) and their derived pricing.
///
/// Every write path recomputes `final_price` and persists it in the same
/// insert/update statement as the inputs it derives from. Counter columns are
/// bumped with relative single-statement updates and are never written by
/// pricing updates.
#[derive(Clone)]
pub struct PackageService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl PackageService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a new package for a product
    #[instrument(skip(self))]
    pub async fn create_package(
        &self,
        input: CreatePackageInput,
    ) -> Result<ProductPackageModel, ServiceError> {
        pricing::validate_price(input.price)?;
        pricing::validate_discount(input.discount)?;
        pricing::validate_quantity(input.quantity)?;
        pricing::validate_weight(input.weight_grams)?;

        self.ensure_product_exists(input.product_id).await?;
        self.ensure_selectors_exist(input.size_id, input.color_id)
            .await?;

        let package_id = Uuid::new_v4();
        let now = Utc::now();
        let final_price =
            pricing::compute_final_price(input.price, input.discount, input.is_active_discount);

        let package = product_package::ActiveModel {
            id: Set(package_id),
            product_id: Set(input.product_id),
            size_id: Set(input.size_id),
            color_id: Set(input.color_id),
            storage: Set(input.storage),
            quantity: Set(input.quantity),
            weight_grams: Set(input.weight_grams),
            is_active: Set(input.is_active),
            price: Set(input.price),
            discount: Set(input.discount),
            is_active_discount: Set(input.is_active_discount),
            final_price: Set(final_price),
            sold_count: Set(0),
            views_count: Set(0),
            rating: Set(0.0),
            created_at: Set(now),
            updated_at: Set(now),
        };

        let package = package.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::PackageCreated {
                product_id: package.product_id,
                package_id,
            })
            .await;

        info!(
            "Created package {} for product {}",
            package_id, package.product_id
        );
        Ok(package)
    }

    /// Update an existing package. `final_price` is recomputed from the
    /// merged row state, so partial pricing updates stay consistent.
    #[instrument(skip(self))]
    pub async fn update_package(
        &self,
        package_id: Uuid,
        input: UpdatePackageInput,
    ) -> Result<ProductPackageModel, ServiceError> {
        let current = self.get_package(package_id).await?;

        let price = input.price.unwrap_or(current.price);
        let discount = input.discount.unwrap_or(current.discount);
        let is_active_discount = input
            .is_active_discount
            .unwrap_or(current.is_active_discount);

        pricing::validate_price(price)?;
        pricing::validate_discount(discount)?;
        if let Some(quantity) = input.quantity {
            pricing::validate_quantity(quantity)?;
        }
        if let Some(weight) = input.weight_grams {
            pricing::validate_weight(weight)?;
        }
        if input.size_id.is_some() || input.color_id.is_some() {
            self.ensure_selectors_exist(input.size_id, input.color_id)
                .await?;
        }

        let product_id = current.product_id;
        let mut active: product_package::ActiveModel = current.into();

        if let Some(size_id) = input.size_id {
            active.size_id = Set(Some(size_id));
        }
        if let Some(color_id) = input.color_id {
            active.color_id = Set(Some(color_id));
        }
        if let Some(storage) = input.storage {
            active.storage = Set(Some(storage));
        }
        if let Some(quantity) = input.quantity {
            active.quantity = Set(quantity);
        }
        if let Some(weight) = input.weight_grams {
            active.weight_grams = Set(weight);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }

        active.price = Set(price);
        active.discount = Set(discount);
        active.is_active_discount = Set(is_active_discount);
        active.final_price = Set(pricing::compute_final_price(
            price,
            discount,
            is_active_discount,
        ));
        active.updated_at = Set(Utc::now());

        let package = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::PackageUpdated {
                product_id,
                package_id,
            })
            .await;

        info!("Updated package {}", package_id);
        Ok(package)
    }

    /// Get a package by ID
    #[instrument(skip(self))]
    pub async fn get_package(&self, package_id: Uuid) -> Result<ProductPackageModel, ServiceError> {
        ProductPackage::find_by_id(package_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Package {} not found", package_id)))
    }

    /// List packages, optionally filtered by product
    #[instrument(skip(self))]
    pub async fn list_packages(
        &self,
        query: PackageQuery,
    ) -> Result<PackageListResult, ServiceError> {
        let mut db_query = ProductPackage::find();

        if let Some(product_id) = query.product_id {
            db_query = db_query.filter(product_package::Column::ProductId.eq(product_id));
        }
        if let Some(is_active) = query.is_active {
            db_query = db_query.filter(product_package::Column::IsActive.eq(is_active));
        }

        let total = db_query.clone().count(&*self.db).await?;

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let packages = db_query
            .order_by_desc(product_package::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(PackageListResult { packages, total })
    }

    /// All packages belonging to one product
    #[instrument(skip(self))]
    pub async fn packages_for_product(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<ProductPackageModel>, ServiceError> {
        self.ensure_product_exists(product_id).await?;

        ProductPackage::find()
            .filter(product_package::Column::ProductId.eq(product_id))
            .order_by_desc(product_package::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Delete a package
    #[instrument(skip(self))]
    pub async fn delete_package(&self, package_id: Uuid) -> Result<(), ServiceError> {
        let package = self.get_package(package_id).await?;
        let product_id = package.product_id;

        let active: product_package::ActiveModel = package.into();
        active.delete(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::PackageDeleted {
                product_id,
                package_id,
            })
            .await;

        info!("Deleted package {}", package_id);
        Ok(())
    }

    /// Record one external view event. A relative single-statement increment;
    /// concurrent pricing updates cannot clobber it.
    #[instrument(skip(self))]
    pub async fn record_view(&self, package_id: Uuid) -> Result<(), ServiceError> {
        let result = ProductPackage::update_many()
            .col_expr(
                product_package::Column::ViewsCount,
                Expr::col(product_package::Column::ViewsCount).add(1),
            )
            .filter(product_package::Column::Id.eq(package_id))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Package {} not found",
                package_id
            )));
        }
        Ok(())
    }

    /// Record units sold from an external order event
    #[instrument(skip(self))]
    pub async fn record_sale(&self, package_id: Uuid, quantity: i64) -> Result<(), ServiceError> {
        if quantity <= 0 {
            return Err(ServiceError::ValidationError(format!(
                "sale quantity must be positive, got {quantity}"
            )));
        }

        let result = ProductPackage::update_many()
            .col_expr(
                product_package::Column::SoldCount,
                Expr::col(product_package::Column::SoldCount).add(quantity),
            )
            .filter(product_package::Column::Id.eq(package_id))
            .exec(&*self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "Package {} not found",
                package_id
            )));
        }
        Ok(())
    }

    /// Set the aggregated rating (0.0..=5.0)
    #[instrument(skip(self))]
    pub async fn set_rating(&self, package_id: Uuid, rating: f64) -> Result<(), ServiceError> {
        pricing::validate_rating(rating)?;

        let package = self.get_package(package_id).await?;
        let mut active: product_package::ActiveModel = package.into();
        active.rating = Set(rating);
        active.updated_at = Set(Utc::now());
        active.update(&*self.db).await?;
        Ok(())
    }

    async fn ensure_product_exists(&self, product_id: Uuid) -> Result<(), ServiceError> {
        if Product::find_by_id(product_id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Product {} not found",
                product_id
            )));
        }
        Ok(())
    }

    async fn ensure_selectors_exist(
        &self,
        size_id: Option<Uuid>,
        color_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        if let Some(size_id) = size_id {
            if Size::find_by_id(size_id).one(&*self.db).await?.is_none() {
                return Err(ServiceError::NotFound(format!(
                    "Size {} not found",
                    size_id
                )));
            }
        }
        if let Some(color_id) = color_id {
            if Color::find_by_id(color_id).one(&*self.db).await?.is_none() {
                return Err(ServiceError::NotFound(format!(
                    "Color {} not found",
                    color_id
                )));
            }
        }
        Ok(())
    }
}

/// Informational saving for a package's configured discount, whether or not
/// the discount is active. Not persisted.
pub fn potential_savings(package: &ProductPackageModel) -> i64 {
    pricing::discount_amount(package.price, package.discount)
}

/// Input for creating a package
#[derive(Debug, Deserialize, Serialize)]
pub struct CreatePackageInput {
    pub product_id: Uuid,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub storage: Option<StorageCapacity>,
    pub quantity: i32,
    pub weight_grams: i32,
    pub is_active: bool,
    pub price: i64,
    pub discount: i16,
    pub is_active_discount: bool,
}

/// Input for updating a package
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdatePackageInput {
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub storage: Option<StorageCapacity>,
    pub quantity: Option<i32>,
    pub weight_grams: Option<i32>,
    pub is_active: Option<bool>,
    pub price: Option<i64>,
    pub discount: Option<i16>,
    pub is_active_discount: Option<bool>,
}

/// Package listing filter
#[derive(Debug, Clone, Deserialize)]
pub struct PackageQuery {
    pub product_id: Option<Uuid>,
    pub is_active: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Package listing result
#[derive(Debug, Serialize)]
pub struct PackageListResult {
    pub packages: Vec<ProductPackageModel>,
    pub total: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package_with(price: i64, discount: i16, active: bool) -> ProductPackageModel {
        ProductPackageModel {
            id: Uuid::new_v4(),
            product_id: Uuid::new_v4(),
            size_id: None,
            color_id: None,
            storage: None,
            quantity: 1,
            weight_grams: 100,
            is_active: true,
            price,
            discount,
            is_active_discount: active,
            final_price: pricing::compute_final_price(price, discount, active),
            sold_count: 0,
            views_count: 0,
            rating: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn potential_savings_reports_inactive_discounts_too() {
        let staged = package_with(1000, 20, false);
        assert_eq!(staged.final_price, 1000);
        assert_eq!(potential_savings(&staged), 200);
    }

    #[test]
    fn potential_savings_matches_active_discount_delta() {
        let live = package_with(1000, 20, true);
        assert_eq!(live.final_price, 800);
        assert_eq!(potential_savings(&live), live.price - live.final_price);
    }
}
