//! Merchandise entity - An item workers purchase with coins.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Merchandise database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "merchandise")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name of the item
    pub name: String,
    /// Cost in coins, always positive
    pub coins: i64,
    /// Image shown on the worker dashboard
    pub image_url: String,
    /// Optional display description
    pub description: Option<String>,
    /// When the item was added to the catalog
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Merchandise and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One item has many redemption roster rows
    #[sea_orm(has_many = "super::merchandise_redemption::Entity")]
    Redemptions,
}

impl Related<super::merchandise_redemption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Redemptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
