//! Coupon entity - A code that credits coins to the redeeming worker.
//!
//! A coupon is *active* when `is_active` is set and `expires_at`, if present,
//! lies in the future. Its redemption roster lives in the
//! `coupon_redemptions` table, keyed so each account can appear at most once.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Coupon database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "coupons")]
pub struct Model {
    /// Unique identifier for the coupon
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Redemption code entered by workers, unique across coupons
    #[sea_orm(unique)]
    pub code: String,
    /// Coins credited on redemption, always positive
    pub coins: i64,
    /// Optional display description shown after redemption
    pub description: Option<String>,
    /// Optional expiry; the coupon is inactive at and after this instant
    pub expires_at: Option<DateTimeUtc>,
    /// Manual deactivation flag
    pub is_active: bool,
    /// When the coupon was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Coupon and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One coupon has many redemption roster rows
    #[sea_orm(has_many = "super::coupon_redemption::Entity")]
    Redemptions,
}

impl Related<super::coupon_redemption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Redemptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
