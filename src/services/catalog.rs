use crate::{
    entities::{
        base_category, base_category_brand, brand, brand_category, category, category_attribute,
        color, product_attribute, size, BaseCategory, BaseCategoryBrand, BaseCategoryModel,
        BaseColor, BaseColorModel, Brand, BrandCategory, BrandModel, Category, CategoryAttribute,
        CategoryAttributeModel, CategoryModel, Color, ColorModel, ProductAttribute,
        ProductCategory, Size, SizeGroup, SizeLabel, SizeModel,
    },
    entities::base_color,
    entities::product_category,
    errors::ServiceError,
    events::{Event, EventSender, ImageTarget},
    services::hierarchy::HierarchyService,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// CRUD over the catalog's dimension entities: base categories, the category
/// tree, brands, colors, and sizes, plus per-category attribute definitions.
///
/// Structural rules live here: a category's parent must share its base
/// category, re-parenting may not create a cycle, and a base category becomes
/// immutable for a subtree once products are attached to it.
#[derive(Clone)]
pub struct CatalogService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
    hierarchy: HierarchyService,
}

impl CatalogService {
    pub fn new(
        db: Arc<DatabaseConnection>,
        event_sender: Arc<EventSender>,
        hierarchy: HierarchyService,
    ) -> Self {
        Self {
            db,
            event_sender,
            hierarchy,
        }
    }

    // ---- Base categories ----

    #[instrument(skip(self))]
    pub async fn create_base_category(
        &self,
        input: CreateBaseCategoryInput,
    ) -> Result<BaseCategoryModel, ServiceError> {
        self.ensure_unique_base_category(&input.name, &input.en_name, None)
            .await?;

        let model = base_category::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            en_name: Set(input.en_name),
            description: Set(input.description),
            image_url: Set(input.image_url.clone()),
        };
        let model = model.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::BaseCategoryCreated(model.id))
            .await;
        self.emit_image(&input.image_url, ImageTarget::CategoryThumb)
            .await;

        info!("Created base category {}", model.id);
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn update_base_category(
        &self,
        id: Uuid,
        input: UpdateBaseCategoryInput,
    ) -> Result<BaseCategoryModel, ServiceError> {
        let current = self.get_base_category(id).await?;

        let name = input.name.clone().unwrap_or_else(|| current.name.clone());
        let en_name = input
            .en_name
            .clone()
            .unwrap_or_else(|| current.en_name.clone());
        self.ensure_unique_base_category(&name, &en_name, Some(id))
            .await?;

        let mut active: base_category::ActiveModel = current.into();
        active.name = Set(name);
        active.en_name = Set(en_name);
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        let image_changed = input.image_url.is_some();
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }

        let model = active.update(&*self.db).await?;
        if image_changed {
            self.emit_image(&model.image_url, ImageTarget::CategoryThumb)
                .await;
        }
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_base_category(&self, id: Uuid) -> Result<BaseCategoryModel, ServiceError> {
        BaseCategory::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Base category {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_base_categories(&self) -> Result<Vec<BaseCategoryModel>, ServiceError> {
        BaseCategory::find()
            .order_by_asc(base_category::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Detail view: the base category with its categories and linked brands.
    #[instrument(skip(self))]
    pub async fn base_category_detail(
        &self,
        id: Uuid,
    ) -> Result<BaseCategoryDetail, ServiceError> {
        let base_category = self.get_base_category(id).await?;

        let categories = Category::find()
            .filter(category::Column::BaseCategoryId.eq(id))
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await?;

        let brand_ids: Vec<Uuid> = BaseCategoryBrand::find()
            .filter(base_category_brand::Column::BaseCategoryId.eq(id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.brand_id)
            .collect();

        let brands = if brand_ids.is_empty() {
            Vec::new()
        } else {
            Brand::find()
                .filter(brand::Column::Id.is_in(brand_ids))
                .all(&*self.db)
                .await?
        };

        Ok(BaseCategoryDetail {
            base_category,
            categories,
            brands,
        })
    }

    /// Delete a base category and its whole category forest.
    #[instrument(skip(self))]
    pub async fn delete_base_category(&self, id: Uuid) -> Result<(), ServiceError> {
        let base = self.get_base_category(id).await?;

        let category_ids: Vec<Uuid> = Category::find()
            .filter(category::Column::BaseCategoryId.eq(id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|c| c.id)
            .collect();

        let txn = self.db.begin().await?;
        Self::delete_categories_in_txn(&txn, &category_ids).await?;
        BaseCategoryBrand::delete_many()
            .filter(base_category_brand::Column::BaseCategoryId.eq(id))
            .exec(&txn)
            .await?;
        let active: base_category::ActiveModel = base.into();
        active.delete(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::BaseCategoryDeleted(id))
            .await;

        info!("Deleted base category {}", id);
        Ok(())
    }

    /// Idempotently link a brand to a base category.
    #[instrument(skip(self))]
    pub async fn link_brand_to_base_category(
        &self,
        base_category_id: Uuid,
        brand_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.get_base_category(base_category_id).await?;
        self.get_brand(brand_id).await?;

        let exists = BaseCategoryBrand::find_by_id((base_category_id, brand_id))
            .one(&*self.db)
            .await?
            .is_some();
        if exists {
            return Ok(());
        }

        let link = base_category_brand::ActiveModel {
            base_category_id: Set(base_category_id),
            brand_id: Set(brand_id),
        };
        link.insert(&*self.db).await?;
        Ok(())
    }

    /// Idempotently unlink a brand from a base category.
    #[instrument(skip(self))]
    pub async fn unlink_brand_from_base_category(
        &self,
        base_category_id: Uuid,
        brand_id: Uuid,
    ) -> Result<(), ServiceError> {
        BaseCategoryBrand::delete_many()
            .filter(base_category_brand::Column::BaseCategoryId.eq(base_category_id))
            .filter(base_category_brand::Column::BrandId.eq(brand_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    // ---- Categories ----

    #[instrument(skip(self))]
    pub async fn create_category(
        &self,
        input: CreateCategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        self.get_base_category(input.base_category_id).await?;
        self.ensure_unique_category(&input.name, &input.en_name, None)
            .await?;

        if let Some(parent_id) = input.parent_id {
            let parent = self.get_category(parent_id).await?;
            if parent.base_category_id != input.base_category_id {
                return Err(ServiceError::ValidationError(format!(
                    "parent category {} belongs to a different base category",
                    parent_id
                )));
            }
        }

        let model = category::ActiveModel {
            id: Set(Uuid::new_v4()),
            base_category_id: Set(input.base_category_id),
            parent_id: Set(input.parent_id),
            name: Set(input.name),
            en_name: Set(input.en_name),
            description: Set(input.description),
            image_url: Set(input.image_url.clone()),
        };
        let model = model.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::CategoryCreated(model.id))
            .await;
        self.emit_image(&input.image_url, ImageTarget::CategoryThumb)
            .await;

        info!("Created category {}", model.id);
        Ok(model)
    }

    /// Update a category.
    ///
    /// Changing the base category is only allowed while no product is
    /// attached anywhere in the subtree, and it moves the whole subtree so
    /// children never disagree with their ancestors about the base.
    /// Re-parenting onto a descendant is refused as a cycle.
    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: Uuid,
        input: UpdateCategoryInput,
    ) -> Result<CategoryModel, ServiceError> {
        let current = self.get_category(id).await?;

        let name = input.name.clone().unwrap_or_else(|| current.name.clone());
        let en_name = input
            .en_name
            .clone()
            .unwrap_or_else(|| current.en_name.clone());
        self.ensure_unique_category(&name, &en_name, Some(id))
            .await?;

        let mut target_base = current.base_category_id;
        if let Some(base_category_id) = input.base_category_id {
            if base_category_id != current.base_category_id {
                self.get_base_category(base_category_id).await?;
                if self.hierarchy.subtree_has_products(id).await? {
                    return Err(ServiceError::InvalidOperation(format!(
                        "category {} has products attached in its subtree; its base category is immutable",
                        id
                    )));
                }
                if current.parent_id.is_some() && input.parent_id.is_none() {
                    return Err(ServiceError::ValidationError(format!(
                        "category {} would keep a parent in the old base category; move the tree from its root or supply a parent in the target base",
                        id
                    )));
                }
                target_base = base_category_id;
            }
        }

        if let Some(parent_id) = input.parent_id {
            let parent = self.get_category(parent_id).await?;
            if parent.base_category_id != target_base {
                return Err(ServiceError::ValidationError(format!(
                    "parent category {} belongs to a different base category",
                    parent_id
                )));
            }
            let subtree = self.hierarchy.subtree_ids(id).await?;
            if subtree.contains(&parent_id) {
                return Err(ServiceError::CycleDetected(format!(
                    "category {} cannot become a child of its own descendant {}",
                    id, parent_id
                )));
            }
        }

        let base_changed = target_base != current.base_category_id;
        let subtree = if base_changed {
            self.hierarchy.subtree_ids(id).await?
        } else {
            Vec::new()
        };

        let txn = self.db.begin().await?;

        if base_changed {
            Category::update_many()
                .col_expr(
                    category::Column::BaseCategoryId,
                    sea_orm::sea_query::Expr::value(target_base),
                )
                .filter(category::Column::Id.is_in(subtree))
                .exec(&txn)
                .await?;
        }

        let current = Category::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))?;
        let mut active: category::ActiveModel = current.into();
        active.name = Set(name);
        active.en_name = Set(en_name);
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(parent_id) = input.parent_id {
            active.parent_id = Set(Some(parent_id));
        }
        let image_changed = input.image_url.is_some();
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }

        let model = active.update(&txn).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CategoryUpdated(id))
            .await;
        if image_changed {
            self.emit_image(&model.image_url, ImageTarget::CategoryThumb)
                .await;
        }

        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_category(&self, id: Uuid) -> Result<CategoryModel, ServiceError> {
        Category::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Category {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_categories(
        &self,
        base_category_id: Option<Uuid>,
    ) -> Result<Vec<CategoryModel>, ServiceError> {
        let mut query = Category::find();
        if let Some(base_category_id) = base_category_id {
            query = query.filter(category::Column::BaseCategoryId.eq(base_category_id));
        }
        query
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Detail view: the category with its direct children and its attribute
    /// definitions.
    #[instrument(skip(self))]
    pub async fn category_detail(&self, id: Uuid) -> Result<CategoryDetail, ServiceError> {
        let category = self.get_category(id).await?;

        let children = Category::find()
            .filter(category::Column::ParentId.eq(id))
            .order_by_asc(category::Column::Name)
            .all(&*self.db)
            .await?;

        let attributes = CategoryAttribute::find()
            .filter(category_attribute::Column::CategoryId.eq(id))
            .all(&*self.db)
            .await?;

        Ok(CategoryDetail {
            category,
            children,
            attributes,
        })
    }

    /// Delete a category and its whole subtree, detaching products and
    /// dropping the subtree's attribute definitions (and the product values
    /// referencing them) in one transaction.
    #[instrument(skip(self))]
    pub async fn delete_category(&self, id: Uuid) -> Result<(), ServiceError> {
        let subtree = self.hierarchy.subtree_ids(id).await?;
        let subtree_size = subtree.len();

        let txn = self.db.begin().await?;
        Self::delete_categories_in_txn(&txn, &subtree).await?;
        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::CategoryDeleted {
                category_id: id,
                subtree_size,
            })
            .await;

        info!("Deleted category {} (subtree of {})", id, subtree_size);
        Ok(())
    }

    async fn delete_categories_in_txn(
        txn: &sea_orm::DatabaseTransaction,
        category_ids: &[Uuid],
    ) -> Result<(), ServiceError> {
        if category_ids.is_empty() {
            return Ok(());
        }

        let attribute_ids: Vec<Uuid> = CategoryAttribute::find()
            .filter(category_attribute::Column::CategoryId.is_in(category_ids.to_vec()))
            .all(txn)
            .await?
            .into_iter()
            .map(|a| a.id)
            .collect();

        if !attribute_ids.is_empty() {
            ProductAttribute::delete_many()
                .filter(product_attribute::Column::AttributeId.is_in(attribute_ids))
                .exec(txn)
                .await?;
            CategoryAttribute::delete_many()
                .filter(category_attribute::Column::CategoryId.is_in(category_ids.to_vec()))
                .exec(txn)
                .await?;
        }

        ProductCategory::delete_many()
            .filter(product_category::Column::CategoryId.is_in(category_ids.to_vec()))
            .exec(txn)
            .await?;
        BrandCategory::delete_many()
            .filter(brand_category::Column::CategoryId.is_in(category_ids.to_vec()))
            .exec(txn)
            .await?;
        Category::delete_many()
            .filter(category::Column::Id.is_in(category_ids.to_vec()))
            .exec(txn)
            .await?;

        Ok(())
    }

    // ---- Brands ----

    #[instrument(skip(self))]
    pub async fn create_brand(&self, input: CreateBrandInput) -> Result<BrandModel, ServiceError> {
        self.ensure_unique_brand(&input.name, &input.en_name, None)
            .await?;

        let model = brand::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            en_name: Set(input.en_name),
            logo_url: Set(input.logo_url.clone()),
        };
        let model = model.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::BrandCreated(model.id))
            .await;
        self.emit_image(&input.logo_url, ImageTarget::BrandLogo).await;

        info!("Created brand {}", model.id);
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn update_brand(
        &self,
        id: Uuid,
        input: UpdateBrandInput,
    ) -> Result<BrandModel, ServiceError> {
        let current = self.get_brand(id).await?;

        let name = input.name.clone().unwrap_or_else(|| current.name.clone());
        let en_name = input
            .en_name
            .clone()
            .unwrap_or_else(|| current.en_name.clone());
        self.ensure_unique_brand(&name, &en_name, Some(id)).await?;

        let mut active: brand::ActiveModel = current.into();
        active.name = Set(name);
        active.en_name = Set(en_name);
        let logo_changed = input.logo_url.is_some();
        if let Some(logo_url) = input.logo_url {
            active.logo_url = Set(Some(logo_url));
        }

        let model = active.update(&*self.db).await?;
        if logo_changed {
            self.emit_image(&model.logo_url, ImageTarget::BrandLogo).await;
        }
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_brand(&self, id: Uuid) -> Result<BrandModel, ServiceError> {
        Brand::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Brand {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_brands(&self) -> Result<Vec<BrandModel>, ServiceError> {
        Brand::find()
            .order_by_asc(brand::Column::EnName)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_brand(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = self.get_brand(id).await?;

        let txn = self.db.begin().await?;
        BrandCategory::delete_many()
            .filter(brand_category::Column::BrandId.eq(id))
            .exec(&txn)
            .await?;
        BaseCategoryBrand::delete_many()
            .filter(base_category_brand::Column::BrandId.eq(id))
            .exec(&txn)
            .await?;
        let active: brand::ActiveModel = model.into();
        active.delete(&txn).await?;
        txn.commit().await?;

        self.event_sender.send_or_log(Event::BrandDeleted(id)).await;
        Ok(())
    }

    /// Idempotently link a brand to a category.
    #[instrument(skip(self))]
    pub async fn link_brand_to_category(
        &self,
        brand_id: Uuid,
        category_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.get_brand(brand_id).await?;
        self.get_category(category_id).await?;

        let exists = BrandCategory::find_by_id((brand_id, category_id))
            .one(&*self.db)
            .await?
            .is_some();
        if exists {
            return Ok(());
        }

        let link = brand_category::ActiveModel {
            brand_id: Set(brand_id),
            category_id: Set(category_id),
        };
        link.insert(&*self.db).await?;
        Ok(())
    }

    /// Idempotently unlink a brand from a category.
    #[instrument(skip(self))]
    pub async fn unlink_brand_from_category(
        &self,
        brand_id: Uuid,
        category_id: Uuid,
    ) -> Result<(), ServiceError> {
        BrandCategory::delete_many()
            .filter(brand_category::Column::BrandId.eq(brand_id))
            .filter(brand_category::Column::CategoryId.eq(category_id))
            .exec(&*self.db)
            .await?;
        Ok(())
    }

    /// Category ids a brand is linked to.
    pub async fn brand_category_ids(&self, brand_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        self.get_brand(brand_id).await?;
        let links = BrandCategory::find()
            .filter(brand_category::Column::BrandId.eq(brand_id))
            .all(&*self.db)
            .await?;
        Ok(links.into_iter().map(|link| link.category_id).collect())
    }

    // ---- Colors ----

    #[instrument(skip(self))]
    pub async fn create_color(&self, input: CreateColorInput) -> Result<ColorModel, ServiceError> {
        validate_hex_code(&input.hex_code)?;
        if let Some(base_color_id) = input.base_color_id {
            self.get_base_color(base_color_id).await?;
        }

        let model = color::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            hex_code: Set(input.hex_code),
            image_url: Set(input.image_url.clone()),
            base_color_id: Set(input.base_color_id),
        };
        let model = model.insert(&*self.db).await?;
        self.emit_image(&input.image_url, ImageTarget::ColorSwatch)
            .await;
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn update_color(
        &self,
        id: Uuid,
        input: UpdateColorInput,
    ) -> Result<ColorModel, ServiceError> {
        let current = self.get_color(id).await?;

        if let Some(ref hex_code) = input.hex_code {
            validate_hex_code(hex_code)?;
        }
        if let Some(base_color_id) = input.base_color_id {
            self.get_base_color(base_color_id).await?;
        }

        let mut active: color::ActiveModel = current.into();
        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(hex_code) = input.hex_code {
            active.hex_code = Set(hex_code);
        }
        if let Some(base_color_id) = input.base_color_id {
            active.base_color_id = Set(Some(base_color_id));
        }
        let image_changed = input.image_url.is_some();
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }

        let model = active.update(&*self.db).await?;
        if image_changed {
            self.emit_image(&model.image_url, ImageTarget::ColorSwatch)
                .await;
        }
        Ok(model)
    }

    #[instrument(skip(self))]
    pub async fn get_color(&self, id: Uuid) -> Result<ColorModel, ServiceError> {
        Color::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Color {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_colors(&self) -> Result<Vec<ColorModel>, ServiceError> {
        Color::find()
            .order_by_asc(color::Column::Name)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_color(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = self.get_color(id).await?;
        let active: color::ActiveModel = model.into();
        active.delete(&*self.db).await?;
        Ok(())
    }

    // ---- Base colors ----

    #[instrument(skip(self))]
    pub async fn create_base_color(
        &self,
        input: CreateBaseColorInput,
    ) -> Result<BaseColorModel, ServiceError> {
        let hex_code = input.hex_code.unwrap_or_else(|| "#FFFFFF".to_string());
        validate_hex_code(&hex_code)?;

        let model = base_color::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(input.name),
            hex_code: Set(hex_code),
        };
        model.insert(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_base_color(
        &self,
        id: Uuid,
        input: UpdateBaseColorInput,
    ) -> Result<BaseColorModel, ServiceError> {
        let current = self.get_base_color(id).await?;

        if let Some(ref hex_code) = input.hex_code {
            validate_hex_code(hex_code)?;
        }

        let mut active: base_color::ActiveModel = current.into();
        if let Some(name) = input.name {
            active.name = Set(Some(name));
        }
        if let Some(hex_code) = input.hex_code {
            active.hex_code = Set(hex_code);
        }
        active.update(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get_base_color(&self, id: Uuid) -> Result<BaseColorModel, ServiceError> {
        BaseColor::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Base color {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_base_colors(&self) -> Result<Vec<BaseColorModel>, ServiceError> {
        BaseColor::find().all(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_base_color(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = self.get_base_color(id).await?;

        let txn = self.db.begin().await?;
        Color::delete_many()
            .filter(color::Column::BaseColorId.eq(id))
            .exec(&txn)
            .await?;
        let active: base_color::ActiveModel = model.into();
        active.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    // ---- Sizes ----

    #[instrument(skip(self))]
    pub async fn create_size(&self, input: CreateSizeInput) -> Result<SizeModel, ServiceError> {
        if let Some(numeric_size) = input.numeric_size {
            if numeric_size < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "numeric size cannot be negative, got {numeric_size}"
                )));
            }
        }

        let model = size::ActiveModel {
            id: Set(Uuid::new_v4()),
            label: Set(input.label),
            numeric_size: Set(input.numeric_size),
            numeric_label: Set(input.numeric_label),
            group: Set(input.group),
        };
        model.insert(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_size(
        &self,
        id: Uuid,
        input: UpdateSizeInput,
    ) -> Result<SizeModel, ServiceError> {
        let current = self.get_size(id).await?;

        if let Some(numeric_size) = input.numeric_size {
            if numeric_size < 0 {
                return Err(ServiceError::ValidationError(format!(
                    "numeric size cannot be negative, got {numeric_size}"
                )));
            }
        }

        let mut active: size::ActiveModel = current.into();
        if let Some(label) = input.label {
            active.label = Set(Some(label));
        }
        if let Some(numeric_size) = input.numeric_size {
            active.numeric_size = Set(Some(numeric_size));
        }
        if let Some(numeric_label) = input.numeric_label {
            active.numeric_label = Set(Some(numeric_label));
        }
        if let Some(group) = input.group {
            active.group = Set(Some(group));
        }
        active.update(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get_size(&self, id: Uuid) -> Result<SizeModel, ServiceError> {
        Size::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Size {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_sizes(&self) -> Result<Vec<SizeModel>, ServiceError> {
        Size::find()
            .order_by_asc(size::Column::NumericSize)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_size(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = self.get_size(id).await?;
        let active: size::ActiveModel = model.into();
        active.delete(&*self.db).await?;
        Ok(())
    }

    // ---- Category attribute definitions ----

    #[instrument(skip(self))]
    pub async fn create_category_attribute(
        &self,
        input: CreateCategoryAttributeInput,
    ) -> Result<CategoryAttributeModel, ServiceError> {
        self.get_category(input.category_id).await?;

        if input.name.trim().is_empty() {
            return Err(ServiceError::ValidationError(
                "attribute name cannot be blank".to_string(),
            ));
        }

        let title = input
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| "untitled attribute".to_string());

        let model = category_attribute::ActiveModel {
            id: Set(Uuid::new_v4()),
            category_id: Set(input.category_id),
            name: Set(input.name),
            title: Set(title),
            value: Set(input.value),
        };
        model.insert(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_category_attribute(
        &self,
        id: Uuid,
        input: UpdateCategoryAttributeInput,
    ) -> Result<CategoryAttributeModel, ServiceError> {
        let current = self.get_category_attribute(id).await?;

        let mut active: category_attribute::ActiveModel = current.into();
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(ServiceError::ValidationError(
                    "attribute name cannot be blank".to_string(),
                ));
            }
            active.name = Set(name);
        }
        if let Some(title) = input.title {
            active.title = Set(title);
        }
        if let Some(value) = input.value {
            active.value = Set(value);
        }
        active.update(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn get_category_attribute(
        &self,
        id: Uuid,
    ) -> Result<CategoryAttributeModel, ServiceError> {
        CategoryAttribute::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Attribute {} not found", id)))
    }

    #[instrument(skip(self))]
    pub async fn list_category_attributes(
        &self,
        category_id: Option<Uuid>,
    ) -> Result<Vec<CategoryAttributeModel>, ServiceError> {
        let mut query = CategoryAttribute::find();
        if let Some(category_id) = category_id {
            query = query.filter(category_attribute::Column::CategoryId.eq(category_id));
        }
        query.all(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_category_attribute(&self, id: Uuid) -> Result<(), ServiceError> {
        let model = self.get_category_attribute(id).await?;

        let txn = self.db.begin().await?;
        ProductAttribute::delete_many()
            .filter(product_attribute::Column::AttributeId.eq(id))
            .exec(&txn)
            .await?;
        let active: category_attribute::ActiveModel = model.into();
        active.delete(&txn).await?;
        txn.commit().await?;
        Ok(())
    }

    // ---- helpers ----

    async fn emit_image(&self, url: &Option<String>, target: ImageTarget) {
        if let Some(url) = url {
            self.event_sender
                .send_or_log(Event::ImageAttached {
                    url: url.clone(),
                    target,
                })
                .await;
        }
    }

    async fn ensure_unique_base_category(
        &self,
        name: &str,
        en_name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = BaseCategory::find().filter(
            Condition::any()
                .add(base_category::Column::Name.eq(name))
                .add(base_category::Column::EnName.eq(en_name)),
        );
        if let Some(id) = exclude_id {
            query = query.filter(base_category::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Base category name {} already exists",
                name
            )));
        }
        Ok(())
    }

    async fn ensure_unique_category(
        &self,
        name: &str,
        en_name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Category::find().filter(
            Condition::any()
                .add(category::Column::Name.eq(name))
                .add(category::Column::EnName.eq(en_name)),
        );
        if let Some(id) = exclude_id {
            query = query.filter(category::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Category name {} already exists",
                name
            )));
        }
        Ok(())
    }

    async fn ensure_unique_brand(
        &self,
        name: &str,
        en_name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Brand::find().filter(
            Condition::any()
                .add(brand::Column::Name.eq(name))
                .add(brand::Column::EnName.eq(en_name)),
        );
        if let Some(id) = exclude_id {
            query = query.filter(brand::Column::Id.ne(id));
        }
        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Brand name {} already exists",
                name
            )));
        }
        Ok(())
    }
}

/// `#RRGGBB`
fn validate_hex_code(hex: &str) -> Result<(), ServiceError> {
    let well_formed = hex.len() == 7
        && hex.starts_with('#')
        && hex[1..].chars().all(|c| c.is_ascii_hexdigit());
    if !well_formed {
        return Err(ServiceError::ValidationError(format!(
            "hex code must look like #RRGGBB, got {hex}"
        )));
    }
    Ok(())
}

// Inputs

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateBaseCategoryInput {
    pub name: String,
    pub en_name: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateBaseCategoryInput {
    pub name: Option<String>,
    pub en_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCategoryInput {
    pub base_category_id: Uuid,
    pub parent_id: Option<Uuid>,
    pub name: String,
    pub en_name: String,
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateCategoryInput {
    pub base_category_id: Option<Uuid>,
    pub parent_id: Option<Uuid>,
    pub name: Option<String>,
    pub en_name: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateBrandInput {
    pub name: String,
    pub en_name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateBrandInput {
    pub name: Option<String>,
    pub en_name: Option<String>,
    pub logo_url: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateColorInput {
    pub name: String,
    pub hex_code: String,
    pub image_url: Option<String>,
    pub base_color_id: Option<Uuid>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateColorInput {
    pub name: Option<String>,
    pub hex_code: Option<String>,
    pub image_url: Option<String>,
    pub base_color_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateBaseColorInput {
    pub name: Option<String>,
    pub hex_code: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateBaseColorInput {
    pub name: Option<String>,
    pub hex_code: Option<String>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateSizeInput {
    pub label: Option<SizeLabel>,
    pub numeric_size: Option<i16>,
    pub numeric_label: Option<String>,
    pub group: Option<SizeGroup>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateSizeInput {
    pub label: Option<SizeLabel>,
    pub numeric_size: Option<i16>,
    pub numeric_label: Option<String>,
    pub group: Option<SizeGroup>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct CreateCategoryAttributeInput {
    pub category_id: Uuid,
    pub name: String,
    pub title: Option<String>,
    pub value: String,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateCategoryAttributeInput {
    pub name: Option<String>,
    pub title: Option<String>,
    pub value: Option<String>,
}

// Detail views

#[derive(Debug, Serialize)]
pub struct BaseCategoryDetail {
    pub base_category: BaseCategoryModel,
    pub categories: Vec<CategoryModel>,
    pub brands: Vec<BrandModel>,
}

#[derive(Debug, Serialize)]
pub struct CategoryDetail {
    pub category: CategoryModel,
    pub children: Vec<CategoryModel>,
    pub attributes: Vec<CategoryAttributeModel>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_codes_are_checked_strictly() {
        assert!(validate_hex_code("#FFFFFF").is_ok());
        assert!(validate_hex_code("#00ff9a").is_ok());
        assert!(validate_hex_code("FFFFFF").is_err());
        assert!(validate_hex_code("#FFF").is_err());
        assert!(validate_hex_code("#GGGGGG").is_err());
        assert!(validate_hex_code("#FFFFFFF").is_err());
    }
}
