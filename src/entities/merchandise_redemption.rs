//! Merchandise redemption roster - One row per (item, account) purchase.
//!
//! Mirrors the coupon roster: the composite primary key enforces the
//! exactly-once invariant at the storage boundary.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Merchandise redemption database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "merchandise_redemptions")]
pub struct Model {
    /// Item that was redeemed
    #[sea_orm(primary_key, auto_increment = false)]
    pub merchandise_id: i64,
    /// Account that redeemed it
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: i64,
    /// When the redemption was committed
    pub redeemed_at: DateTimeUtc,
}

/// Defines relationships between the roster and its owning entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each roster row belongs to one merchandise item
    #[sea_orm(
        belongs_to = "super::merchandise::Entity",
        from = "Column::MerchandiseId",
        to = "super::merchandise::Column::Id"
    )]
    Merchandise,
    /// Each roster row belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::merchandise::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Merchandise.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
