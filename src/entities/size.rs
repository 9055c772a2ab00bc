use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Sizes carry either a letter label (clothing), a numeric size (shoes), or a
/// free-form numeric label; listings order by `numeric_size`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sizes")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub label: Option<SizeLabel>,
    pub numeric_size: Option<i16>,
    pub numeric_label: Option<String>,
    pub group: Option<SizeGroup>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum SizeLabel {
    #[sea_orm(string_value = "XS")]
    Xs,
    #[sea_orm(string_value = "S")]
    S,
    #[sea_orm(string_value = "M")]
    M,
    #[sea_orm(string_value = "L")]
    L,
    #[sea_orm(string_value = "XL")]
    Xl,
    #[sea_orm(string_value = "XXL")]
    Xxl,
    #[sea_orm(string_value = "3XL")]
    Xl3,
    #[sea_orm(string_value = "4XL")]
    Xl4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "lowercase")]
pub enum SizeGroup {
    #[sea_orm(string_value = "clothing")]
    Clothing,
    #[sea_orm(string_value = "shoes")]
    Shoes,
    #[sea_orm(string_value = "accessories")]
    Accessories,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product_package::Entity")]
    Packages,
}

impl Related<super::product_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
