use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(unique)]
    pub en_name: String,
    pub logo_url: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::brand_category::Entity")]
    CategoryLinks,
    #[sea_orm(has_many = "super::base_category_brand::Entity")]
    BaseCategoryLinks,
}

impl Related<super::brand_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CategoryLinks.def()
    }
}

impl Related<super::base_category_brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseCategoryLinks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
