use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A node in the category tree beneath a base category. `parent_id` forms a
/// self-referential tree of unbounded depth; traversal lives in the hierarchy
/// service and always carries a visited set.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub base_category_id: Uuid,
    pub parent_id: Option<Uuid>,
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
    #[sea_orm(
        belongs_to = "super::base_category::Entity",
        from = "Column::BaseCategoryId",
        to = "super::base_category::Column::Id"
    )]
    BaseCategory,

    #[sea_orm(belongs_to = "Entity", from = "Column::ParentId", to = "Column::Id")]
    Parent,

    #[sea_orm(has_many = "Entity")]
    Children,

    #[sea_orm(has_many = "super::category_attribute::Entity")]
    Attributes,

    #[sea_orm(has_many = "super::product_category::Entity")]
    ProductLinks,
}

impl Related<super::base_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseCategory.def()
    }
}

impl Related<super::category_attribute::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Attributes.def()
    }
}

impl Related<Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Parent.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
