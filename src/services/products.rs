use crate::{
    entities::{
        brand_category, category, category_attribute, comment, gallery_image, product,
        product_attribute, product_category, product_package, Brand, BrandCategory, Category,
        CategoryAttribute, CategoryAttributeModel, CategoryModel, Comment, CommentModel,
        GalleryImage, GalleryImageModel, Product, ProductAttribute, ProductAttributeModel,
        ProductCategory, ProductModel, ProductPackage, ProductPackageModel,
    },
    errors::ServiceError,
    events::{Event, EventSender, ImageTarget},
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Product definitions, their attribute values, and their galleries.
#[derive(Clone)]
pub struct ProductService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl ProductService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// Create a new product
    #[instrument(skip(self))]
    pub async fn create_product(
        &self,
        input: CreateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        self.ensure_unique_name(&input.name, None).await?;

        for category_id in &input.category_ids {
            if Category::find_by_id(*category_id)
                .one(&*self.db)
                .await?
                .is_none()
            {
                return Err(ServiceError::NotFound(format!(
                    "Category {} not found",
                    category_id
                )));
            }
        }

        let product_id = Uuid::new_v4();
        let now = Utc::now();

        let txn = self.db.begin().await?;

        let product = product::ActiveModel {
            id: Set(product_id),
            name: Set(input.name.clone()),
            description: Set(input.description.clone()),
            is_active: Set(input.is_active),
            image_url: Set(input.image_url.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let product = product.insert(&txn).await?;

        for category_id in &input.category_ids {
            let link = product_category::ActiveModel {
                product_id: Set(product_id),
                category_id: Set(*category_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::ProductCreated(product_id))
            .await;
        if let Some(url) = &product.image_url {
            self.event_sender
                .send_or_log(Event::ImageAttached {
                    url: url.clone(),
                    target: ImageTarget::ProductImage,
                })
                .await;
        }

        info!("Created product: {}", product_id);
        Ok(product)
    }

    /// Update an existing product
    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        product_id: Uuid,
        input: UpdateProductInput,
    ) -> Result<ProductModel, ServiceError> {
        if let Some(ref name) = input.name {
            self.ensure_unique_name(name, Some(product_id)).await?;
        }

        let product = self.get_product(product_id).await?;
        let mut active: product::ActiveModel = product.into();

        if let Some(name) = input.name {
            active.name = Set(name);
        }
        if let Some(description) = input.description {
            active.description = Set(description);
        }
        if let Some(is_active) = input.is_active {
            active.is_active = Set(is_active);
        }
        let image_changed = input.image_url.is_some();
        if let Some(image_url) = input.image_url {
            active.image_url = Set(Some(image_url));
        }
        active.updated_at = Set(Utc::now());

        let product = active.update(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::ProductUpdated(product_id))
            .await;
        if image_changed {
            if let Some(url) = &product.image_url {
                self.event_sender
                    .send_or_log(Event::ImageAttached {
                        url: url.clone(),
                        target: ImageTarget::ProductImage,
                    })
                    .await;
            }
        }

        info!("Updated product: {}", product_id);
        Ok(product)
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, product_id: Uuid) -> Result<ProductModel, ServiceError> {
        Product::find_by_id(product_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Product {} not found", product_id)))
    }

    /// Full detail view: the product plus everything hanging off it.
    #[instrument(skip(self))]
    pub async fn get_product_detail(
        &self,
        product_id: Uuid,
    ) -> Result<ProductDetail, ServiceError> {
        let product = self.get_product(product_id).await?;

        let category_ids: Vec<Uuid> = ProductCategory::find()
            .filter(product_category::Column::ProductId.eq(product_id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.category_id)
            .collect();

        let categories = if category_ids.is_empty() {
            Vec::new()
        } else {
            Category::find()
                .filter(category::Column::Id.is_in(category_ids))
                .all(&*self.db)
                .await?
        };

        let assignments = ProductAttribute::find()
            .filter(product_attribute::Column::ProductId.eq(product_id))
            .all(&*self.db)
            .await?;

        let definition_ids: Vec<Uuid> = assignments.iter().map(|a| a.attribute_id).collect();
        let definitions = if definition_ids.is_empty() {
            Vec::new()
        } else {
            CategoryAttribute::find()
                .filter(category_attribute::Column::Id.is_in(definition_ids))
                .all(&*self.db)
                .await?
        };

        let attributes = assignments
            .into_iter()
            .map(|assignment| {
                let definition = definitions
                    .iter()
                    .find(|d| d.id == assignment.attribute_id)
                    .cloned();
                AttributeValue {
                    assignment,
                    definition,
                }
            })
            .collect();

        let packages = ProductPackage::find()
            .filter(product_package::Column::ProductId.eq(product_id))
            .order_by_desc(product_package::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        let gallery = GalleryImage::find()
            .filter(gallery_image::Column::ProductId.eq(product_id))
            .all(&*self.db)
            .await?;

        let comments = Comment::find()
            .filter(comment::Column::ProductId.eq(product_id))
            .order_by_desc(comment::Column::CreatedAt)
            .all(&*self.db)
            .await?;

        Ok(ProductDetail {
            product,
            categories,
            attributes,
            packages,
            gallery,
            comments,
        })
    }

    /// Search products
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: ProductSearchQuery,
    ) -> Result<ProductSearchResult, ServiceError> {
        let mut db_query = Product::find();

        if let Some(search) = &query.search {
            db_query = db_query.filter(product::Column::Name.contains(search));
        }
        if let Some(is_active) = query.is_active {
            db_query = db_query.filter(product::Column::IsActive.eq(is_active));
        }

        let total = db_query.clone().count(&*self.db).await?;

        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
        let offset = query.offset.unwrap_or(0);

        let products = db_query
            .order_by_desc(product::Column::CreatedAt)
            .limit(limit)
            .offset(offset)
            .all(&*self.db)
            .await?;

        Ok(ProductSearchResult { products, total })
    }

    /// Delete a product and everything that belongs to it: packages, gallery
    /// rows, comments, attribute values, and category links go in the same
    /// transaction.
    #[instrument(skip(self))]
    pub async fn delete_product(&self, product_id: Uuid) -> Result<(), ServiceError> {
        let product = self.get_product(product_id).await?;

        let txn = self.db.begin().await?;

        ProductAttribute::delete_many()
            .filter(product_attribute::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;
        Comment::delete_many()
            .filter(comment::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;
        GalleryImage::delete_many()
            .filter(gallery_image::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;
        ProductPackage::delete_many()
            .filter(product_package::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;
        ProductCategory::delete_many()
            .filter(product_category::Column::ProductId.eq(product_id))
            .exec(&txn)
            .await?;

        let active: product::ActiveModel = product.into();
        active.delete(&txn).await?;

        txn.commit().await?;

        self.event_sender
            .send_or_log(Event::ProductDeleted(product_id))
            .await;

        info!("Deleted product {}", product_id);
        Ok(())
    }

    /// Products assigned to one category
    #[instrument(skip(self))]
    pub async fn products_in_category(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<ProductModel>, ServiceError> {
        if Category::find_by_id(category_id)
            .one(&*self.db)
            .await?
            .is_none()
        {
            return Err(ServiceError::NotFound(format!(
                "Category {} not found",
                category_id
            )));
        }

        let product_ids: Vec<Uuid> = ProductCategory::find()
            .filter(product_category::Column::CategoryId.eq(category_id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.product_id)
            .collect();

        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        Product::find()
            .filter(product::Column::Id.is_in(product_ids))
            .order_by_desc(product::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Products reachable through a brand's category links. The brand has no
    /// direct product relation; membership flows brand → categories →
    /// products.
    #[instrument(skip(self))]
    pub async fn products_for_brand(
        &self,
        brand_id: Uuid,
    ) -> Result<Vec<ProductModel>, ServiceError> {
        if Brand::find_by_id(brand_id).one(&*self.db).await?.is_none() {
            return Err(ServiceError::NotFound(format!(
                "Brand {} not found",
                brand_id
            )));
        }

        let category_ids: Vec<Uuid> = BrandCategory::find()
            .filter(brand_category::Column::BrandId.eq(brand_id))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.category_id)
            .collect();

        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        let product_ids: Vec<Uuid> = ProductCategory::find()
            .filter(product_category::Column::CategoryId.is_in(category_ids))
            .all(&*self.db)
            .await?
            .into_iter()
            .map(|link| link.product_id)
            .collect();

        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        Product::find()
            .filter(product::Column::Id.is_in(product_ids))
            .order_by_desc(product::Column::CreatedAt)
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    // ---- Attribute values ----

    /// Assign a value for a category attribute to a product. The attribute's
    /// category must be one of the product's categories; the definition is
    /// inherited through that assignment.
    #[instrument(skip(self))]
    pub async fn create_product_attribute(
        &self,
        input: CreateProductAttributeInput,
    ) -> Result<ProductAttributeModel, ServiceError> {
        self.get_product(input.product_id).await?;

        let definition = CategoryAttribute::find_by_id(input.attribute_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Attribute {} not found", input.attribute_id))
            })?;

        let linked = ProductCategory::find_by_id((input.product_id, definition.category_id))
            .one(&*self.db)
            .await?
            .is_some();
        if !linked {
            return Err(ServiceError::ValidationError(format!(
                "product {} is not assigned to category {} that defines attribute {}",
                input.product_id, definition.category_id, definition.name
            )));
        }

        let value = product_attribute::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(input.product_id),
            attribute_id: Set(input.attribute_id),
            value: Set(input.value),
        };

        value.insert(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn update_product_attribute(
        &self,
        id: Uuid,
        value: String,
    ) -> Result<ProductAttributeModel, ServiceError> {
        let assignment = ProductAttribute::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product attribute {} not found", id))
            })?;

        let mut active: product_attribute::ActiveModel = assignment.into();
        active.value = Set(value);
        active.update(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_product_attribute(&self, id: Uuid) -> Result<(), ServiceError> {
        let assignment = ProductAttribute::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Product attribute {} not found", id))
            })?;

        let active: product_attribute::ActiveModel = assignment.into();
        active.delete(&*self.db).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn list_product_attributes(
        &self,
        product_id: Option<Uuid>,
    ) -> Result<Vec<ProductAttributeModel>, ServiceError> {
        let mut query = ProductAttribute::find();
        if let Some(product_id) = product_id {
            query = query.filter(product_attribute::Column::ProductId.eq(product_id));
        }
        query.all(&*self.db).await.map_err(Into::into)
    }

    // ---- Gallery ----

    #[instrument(skip(self))]
    pub async fn add_gallery_image(
        &self,
        product_id: Uuid,
        image_url: String,
    ) -> Result<GalleryImageModel, ServiceError> {
        self.get_product(product_id).await?;

        let image = gallery_image::ActiveModel {
            id: Set(Uuid::new_v4()),
            product_id: Set(product_id),
            image_url: Set(image_url.clone()),
        };
        let image = image.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::ImageAttached {
                url: image_url,
                target: ImageTarget::GalleryImage,
            })
            .await;

        Ok(image)
    }

    #[instrument(skip(self))]
    pub async fn list_gallery(
        &self,
        product_id: Option<Uuid>,
    ) -> Result<Vec<GalleryImageModel>, ServiceError> {
        let mut query = GalleryImage::find();
        if let Some(product_id) = product_id {
            query = query.filter(gallery_image::Column::ProductId.eq(product_id));
        }
        query.all(&*self.db).await.map_err(Into::into)
    }

    #[instrument(skip(self))]
    pub async fn delete_gallery_image(&self, id: Uuid) -> Result<(), ServiceError> {
        let image = GalleryImage::find_by_id(id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| ServiceError::NotFound(format!("Gallery image {} not found", id)))?;

        let active: gallery_image::ActiveModel = image.into();
        active.delete(&*self.db).await?;
        Ok(())
    }

    async fn ensure_unique_name(
        &self,
        name: &str,
        exclude_id: Option<Uuid>,
    ) -> Result<(), ServiceError> {
        let mut query = Product::find().filter(product::Column::Name.eq(name));
        if let Some(id) = exclude_id {
            query = query.filter(product::Column::Id.ne(id));
        }

        if query.one(&*self.db).await?.is_some() {
            return Err(ServiceError::ValidationError(format!(
                "Product name {} already exists",
                name
            )));
        }

        Ok(())
    }
}

/// Input for creating a product
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateProductInput {
    pub name: String,
    pub description: String,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub category_ids: Vec<Uuid>,
}

/// Input for updating a product
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UpdateProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
    pub image_url: Option<String>,
}

/// Input for assigning an attribute value to a product
#[derive(Debug, Deserialize, Serialize)]
pub struct CreateProductAttributeInput {
    pub product_id: Uuid,
    pub attribute_id: Uuid,
    pub value: String,
}

/// Product search query
#[derive(Debug, Clone, Deserialize)]
pub struct ProductSearchQuery {
    pub search: Option<String>,
    pub is_active: Option<bool>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// Product search result
#[derive(Debug, Serialize)]
pub struct ProductSearchResult {
    pub products: Vec<ProductModel>,
    pub total: u64,
}

/// An attribute value together with the definition it instantiates.
#[derive(Debug, Clone, Serialize)]
pub struct AttributeValue {
    pub assignment: ProductAttributeModel,
    pub definition: Option<CategoryAttributeModel>,
}

/// Everything the detail view of a product carries.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: ProductModel,
    pub categories: Vec<CategoryModel>,
    pub attributes: Vec<AttributeValue>,
    pub packages: Vec<ProductPackageModel>,
    pub gallery: Vec<GalleryImageModel>,
    pub comments: Vec<CommentModel>,
}
