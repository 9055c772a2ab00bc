use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A concrete purchasable configuration of a product (size × color × storage)
/// with its own price and stock.
///
/// `final_price` is derived from `price`, `discount`, and
/// `is_active_discount`; it is recomputed inside the same statement that
/// persists any of those fields and is never writable by callers.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_packages")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub product_id: Uuid,
    pub size_id: Option<Uuid>,
    pub color_id: Option<Uuid>,
    pub storage: Option<StorageCapacity>,
    pub quantity: i32,
    pub weight_grams: i32,
    pub is_active: bool,
    /// Integer currency units
    pub price: i64,
    /// Percent, 0..=99
    pub discount: i16,
    pub is_active_discount: bool,
    pub final_price: i64,
    pub sold_count: i64,
    pub views_count: i64,
    #[sea_orm(column_type = "Double")]
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Storage capacity options for devices that carry one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
pub enum StorageCapacity {
    #[sea_orm(string_value = "4T")]
    Tb4,
    #[sea_orm(string_value = "2T")]
    Tb2,
    #[sea_orm(string_value = "1T")]
    Tb1,
    #[sea_orm(string_value = "512")]
    Gb512,
    #[sea_orm(string_value = "256")]
    Gb256,
    #[sea_orm(string_value = "128")]
    Gb128,
    #[sea_orm(string_value = "64")]
    Gb64,
    #[sea_orm(string_value = "32")]
    Gb32,
    #[sea_orm(string_value = "16")]
    Gb16,
    #[sea_orm(string_value = "8")]
    Gb8,
    #[sea_orm(string_value = "4")]
    Gb4,
    #[sea_orm(string_value = "2")]
    Gb2,
    #[sea_orm(string_value = "1")]
    Gb1,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::product::Entity",
        from = "Column::ProductId",
        to = "super::product::Column::Id"
    )]
    Product,
    #[sea_orm(
        belongs_to = "super::size::Entity",
        from = "Column::SizeId",
        to = "super::size::Column::Id"
    )]
    Size,
    #[sea_orm(
        belongs_to = "super::color::Entity",
        from = "Column::ColorId",
        to = "super::color::Column::Id"
    )]
    Color,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Product.def()
    }
}

impl Related<super::size::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Size.def()
    }
}

impl Related<super::color::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Color.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
