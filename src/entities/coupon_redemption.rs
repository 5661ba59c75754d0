//! Coupon redemption roster - One row per (coupon, account) redemption.
//!
//! The composite primary key makes the roster a set: a second insert for the
//! same pair fails at the storage boundary, which the redemption engine maps
//! to `AlreadyRedeemed`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Coupon redemption database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupon_redemptions")]
pub struct Model {
    /// Coupon that was redeemed
    #[sea_orm(primary_key, auto_increment = false)]
    pub coupon_id: i64,
    /// Account that redeemed it
    #[sea_orm(primary_key, auto_increment = false)]
    pub account_id: i64,
    /// When the redemption was committed
    pub redeemed_at: DateTimeUtc,
}

/// Defines relationships between the roster and its owning entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each roster row belongs to one coupon
    #[sea_orm(
        belongs_to = "super::coupon::Entity",
        from = "Column::CouponId",
        to = "super::coupon::Column::Id"
    )]
    Coupon,
    /// Each roster row belongs to one account
    #[sea_orm(
        belongs_to = "super::account::Entity",
        from = "Column::AccountId",
        to = "super::account::Column::Id"
    )]
    Account,
}

impl Related<super::coupon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coupon.def()
    }
}

impl Related<super::account::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
