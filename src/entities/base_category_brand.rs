use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Base category ↔ brand membership.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "base_category_brands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub base_category_id: Uuid,
    #[sea_orm(primary_key, auto_increment = false)]
    pub brand_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::base_category::Entity",
        from = "Column::BaseCategoryId",
        to = "super::base_category::Column::Id"
    )]
    BaseCategory,
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id"
    )]
    Brand,
}

impl Related<super::base_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseCategory.def()
    }
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
