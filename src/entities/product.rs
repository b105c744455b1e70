use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::entities::category::Entity as Category;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "products")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub code: String,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Relative path under the upload directory, set once an image is stored.
    pub image: Option<String>,
    pub price: f64,
    pub quantity: i32,
    #[sea_orm(unique)]
    pub internal_reference: String,
    pub inventory_status: InventoryStatus,
    pub rating: f64,
    pub category_id: i32,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
    pub version: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "Category",
        from = "crate::entities::product::Column::CategoryId",
        to = "crate::entities::category::Column::Id",
        on_update = "Cascade",
        on_delete = "Restrict",
    )]
    Category,
}

impl Related<Category> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, PartialEq, Eq, Debug, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(
    enum_name = "inventory_status",
    db_type = "String(StringLen::N(32))",
    rs_type = "String"
)]
pub enum InventoryStatus {
    #[sea_orm(string_value = "INSTOCK")]
    #[serde(rename = "INSTOCK")]
    InStock,
    #[sea_orm(string_value = "LOWSTOCK")]
    #[serde(rename = "LOWSTOCK")]
    LowStock,
    #[sea_orm(string_value = "OUTOFSTOCK")]
    #[serde(rename = "OUTOFSTOCK")]
    OutOfStock,
}

impl FromStr for InventoryStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INSTOCK" => Ok(InventoryStatus::InStock),
            "LOWSTOCK" => Ok(InventoryStatus::LowStock),
            "OUTOFSTOCK" => Ok(InventoryStatus::OutOfStock),
            _ => Err(()),
        }
    }
}
