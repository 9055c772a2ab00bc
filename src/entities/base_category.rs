use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level catalog grouping (e.g. "Electronics").
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "base_categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub en_name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub image_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::category::Entity")]
    Categories,
    #[sea_orm(has_many = "super::base_category_brand::Entity")]
    BrandLinks,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::base_category_brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BrandLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
