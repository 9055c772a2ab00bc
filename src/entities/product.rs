use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A sellable item definition, independent of any purchasable configuration.
/// Concrete SKUs live in `product_packages`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub is_active: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_category::Entity")]
    CategoryLinks,
    #[sea_orm(has_many = "super::product_attribute::Entity")]
    Attributes,
    #[sea_orm(has_many = "super::product_package::Entity")]
    Packages,
    #[sea_orm(has_many = "super::gallery_image::Entity")]
    GalleryImages,
    #[sea_orm(has_many = "super::comment::Entity")]
    Comments,
}

impl Related<super::product_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryLinks.def()
    }
}

impl Related<super::product_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl Related<super::gallery_image::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GalleryImages.def()
    }
}

impl Related<super::comment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Comments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
