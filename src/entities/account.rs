//! Account entity - Represents a registered identity with a coin balance.
//!
//! Accounts are created at registration in the `pending` role with zero coins
//! and are promoted to `worker` by an admin. The account row is the sole owner
//! of its coin balance; the redemption rosters never carry a shadow balance.

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};

/// Account status gating access to the worker and admin surfaces.
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Registered but not yet verified by an admin
    #[sea_orm(string_value = "pending")]
    Pending,
    /// Approved worker with access to the rewards dashboard
    #[sea_orm(string_value = "worker")]
    Worker,
    /// Back-office administrator
    #[sea_orm(string_value = "admin")]
    Admin,
}

impl Role {
    /// Stable lowercase name, as stored in the database.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Worker => "worker",
            Self::Admin => "admin",
        }
    }
}

/// Account database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    /// Unique identifier for the account
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Subject issued by the external identity provider
    #[sea_orm(unique)]
    pub auth_id: String,
    /// Display name chosen at registration
    pub name: String,
    /// Contact email, unique per account
    #[sea_orm(unique)]
    pub email: String,
    /// Current role: pending, worker, or admin
    pub role: Role,
    /// Coin balance, never negative
    pub coins: i64,
    /// When the account was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Account and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One account appears in many coupon redemption rows
    #[sea_orm(has_many = "super::coupon_redemption::Entity")]
    CouponRedemptions,
    /// One account appears in many merchandise redemption rows
    #[sea_orm(has_many = "super::merchandise_redemption::Entity")]
    MerchandiseRedemptions,
}

impl Related<super::coupon_redemption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CouponRedemptions.def()
    }
}

impl Related<super::merchandise_redemption::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MerchandiseRedemptions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
