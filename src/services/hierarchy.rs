use crate::{
    entities::{
        category, category_attribute, product_category, Category, CategoryAttribute,
        CategoryAttributeModel, CategoryModel, Product, ProductCategory,
    },
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set,
};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;
use tracing::{info, instrument};
use uuid::Uuid;

/// Resolves the category tree and the attribute definitions that apply to a
/// product.
///
/// Categories form a self-referential tree through `parent_id`. Nothing in
/// the schema can stop a bad write from introducing a loop, so every walk
/// carries a visited set and fails with `CycleDetected` instead of spinning.
#[derive(Clone)]
pub struct HierarchyService {
    db: Arc<DatabaseConnection>,
    event_sender: Arc<EventSender>,
}

impl HierarchyService {
    pub fn new(db: Arc<DatabaseConnection>, event_sender: Arc<EventSender>) -> Self {
        Self { db, event_sender }
    }

    /// The chain of categories from `category_id` up to its root (the node
    /// with no parent), inclusive and in walk order.
    #[instrument(skip(self))]
    pub async fn ancestry_path(
        &self,
        category_id: Uuid,
    ) -> Result<Vec<CategoryModel>, ServiceError> {
        let mut path = Vec::new();
        let mut visited: HashSet<Uuid> = HashSet::new();

        let mut current = Category::find_by_id(category_id)
            .one(&*self.db)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Category {} not found", category_id))
            })?;

        loop {
            if !visited.insert(current.id) {
                return Err(ServiceError::CycleDetected(format!(
                    "category {} appears twice on its own ancestry path",
                    current.id
                )));
            }

            let parent_id = current.parent_id;
            path.push(current);

            let Some(parent_id) = parent_id else {
                break;
            };

            if visited.contains(&parent_id) {
                return Err(ServiceError::CycleDetected(format!(
                    "category {} appears twice on its own ancestry path",
                    parent_id
                )));
            }

            current = Category::find_by_id(parent_id)
                .one(&*self.db)
                .await?
                .ok_or_else(|| {
                    ServiceError::NotFound(format!("Category {} not found", parent_id))
                })?;
        }

        Ok(path)
    }

    /// Breadth-first ids of a category and every category beneath it.
    #[instrument(skip(self))]
    pub async fn subtree_ids(&self, category_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
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

        let mut visited: HashSet<Uuid> = HashSet::new();
        let mut queue: VecDeque<Uuid> = VecDeque::new();
        let mut ids = Vec::new();

        visited.insert(category_id);
        queue.push_back(category_id);

        while let Some(current) = queue.pop_front() {
            ids.push(current);

            let children = Category::find()
                .filter(category::Column::ParentId.eq(current))
                .all(&*self.db)
                .await?;

            for child in children {
                if !visited.insert(child.id) {
                    return Err(ServiceError::CycleDetected(format!(
                        "category {} reachable twice from {}",
                        child.id, category_id
                    )));
                }
                queue.push_back(child.id);
            }
        }

        Ok(ids)
    }

    /// Every attribute definition the product inherits through its category
    /// assignments. Same-named definitions from different categories stay
    /// distinct entries; two categories may legitimately define an attribute
    /// with the same name and different semantics.
    #[instrument(skip(self))]
    pub async fn effective_attributes(
        &self,
        product_id: Uuid,
    ) -> Result<Vec<CategoryAttributeModel>, ServiceError> {
        self.ensure_product_exists(product_id).await?;

        let category_ids = self.category_ids_of(product_id).await?;
        if category_ids.is_empty() {
            return Ok(Vec::new());
        }

        CategoryAttribute::find()
            .filter(category_attribute::Column::CategoryId.is_in(category_ids))
            .all(&*self.db)
            .await
            .map_err(Into::into)
    }

    /// Idempotently add the product to a category.
    #[instrument(skip(self))]
    pub async fn assign_category(
        &self,
        product_id: Uuid,
        category_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.ensure_product_exists(product_id).await?;
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

        let already_linked = ProductCategory::find_by_id((product_id, category_id))
            .one(&*self.db)
            .await?
            .is_some();
        if already_linked {
            return Ok(());
        }

        let link = product_category::ActiveModel {
            product_id: Set(product_id),
            category_id: Set(category_id),
        };
        link.insert(&*self.db).await?;

        self.event_sender
            .send_or_log(Event::ProductCategoryAssigned {
                product_id,
                category_id,
            })
            .await;

        info!("Assigned product {} to category {}", product_id, category_id);
        Ok(())
    }

    /// Idempotently remove the product from a category.
    #[instrument(skip(self))]
    pub async fn remove_category(
        &self,
        product_id: Uuid,
        category_id: Uuid,
    ) -> Result<(), ServiceError> {
        self.ensure_product_exists(product_id).await?;

        let result = ProductCategory::delete_many()
            .filter(product_category::Column::ProductId.eq(product_id))
            .filter(product_category::Column::CategoryId.eq(category_id))
            .exec(&*self.db)
            .await?;

        if result.rows_affected > 0 {
            self.event_sender
                .send_or_log(Event::ProductCategoryRemoved {
                    product_id,
                    category_id,
                })
                .await;
            info!(
                "Removed product {} from category {}",
                product_id, category_id
            );
        }

        Ok(())
    }

    /// Category ids currently assigned to a product.
    pub async fn category_ids_of(&self, product_id: Uuid) -> Result<Vec<Uuid>, ServiceError> {
        let links = ProductCategory::find()
            .filter(product_category::Column::ProductId.eq(product_id))
            .all(&*self.db)
            .await?;
        Ok(links.into_iter().map(|link| link.category_id).collect())
    }

    /// True when any product is attached to the category or its subtree.
    /// Guards the base-category immutability rule.
    pub async fn subtree_has_products(&self, category_id: Uuid) -> Result<bool, ServiceError> {
        let ids = self.subtree_ids(category_id).await?;
        let link = ProductCategory::find()
            .filter(product_category::Column::CategoryId.is_in(ids))
            .one(&*self.db)
            .await?;
        Ok(link.is_some())
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
}
