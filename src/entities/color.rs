use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "colors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    /// `#RRGGBB`, validated at the boundary
    pub hex_code: String,
    pub image_url: Option<String>,
    pub base_color_id: Option<Uuid>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::base_color::Entity",
        from = "Column::BaseColorId",
        to = "super::base_color::Column::Id"
    )]
    BaseColor,
    #[sea_orm(has_many = "super::product_package::Entity")]
    Packages,
}

impl Related<super::base_color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BaseColor.def()
    }
}

impl Related<super::product_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
