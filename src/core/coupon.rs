//! Coupon catalog logic - Admin CRUD and the active-coupon lookup.
//!
//! Coupons credit coins on redemption; the redemption itself lives in
//! `core::redemption`. This module owns creation, listing, deactivation, and
//! deletion, plus the activity rules (manual flag and expiry) applied when a
//! worker's code is looked up.

use crate::{
    core::require_fields,
    entities::{Coupon, CouponRedemption, coupon, coupon_redemption},
    errors::{Error, Result},
};
use sea_orm::{JoinType, QueryOrder, QuerySelect, Set, SqlErr, TransactionTrait, prelude::*};

/// Creates a coupon worth `coins` on redemption.
///
/// The code is required and unique; the payout must be positive. Blank
/// descriptions are normalized to `None`. New coupons start active.
///
/// # Errors
/// Returns a validation error for a missing code or non-positive payout,
/// `DuplicateCoupon` for a code collision, or a database error.
pub async fn create_coupon(
    db: &DatabaseConnection,
    code: String,
    coins: i64,
    description: Option<String>,
    expires_at: Option<DateTimeUtc>,
) -> Result<coupon::Model> {
    require_fields(&[("code", !code.trim().is_empty())])?;
    if coins <= 0 {
        return Err(Error::Validation {
            fields: "coins".to_string(),
        });
    }

    let code = code.trim().to_string();
    let model = coupon::ActiveModel {
        code: Set(code.clone()),
        coins: Set(coins),
        description: Set(description.filter(|d| !d.trim().is_empty())),
        expires_at: Set(expires_at),
        is_active: Set(true),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(created) => Ok(created),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(Error::DuplicateCoupon { code }),
            _ => Err(err.into()),
        },
    }
}

/// Retrieves the full coupon catalog, newest first (admin view).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_coupons(db: &DatabaseConnection) -> Result<Vec<coupon::Model>> {
    Coupon::find()
        .order_by_desc(coupon::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Looks up a coupon by code and verifies it is currently redeemable.
///
/// A coupon is redeemable when its manual `is_active` flag is set and its
/// expiry, if any, lies in the future. The two failure modes are reported
/// separately: an unknown code is `CouponNotFound`, a known but deactivated
/// or expired code is `CouponInactive`.
///
/// # Errors
/// Returns `CouponNotFound`, `CouponInactive`, or a database error.
pub async fn find_active_coupon_by_code<C>(db: &C, code: &str) -> Result<coupon::Model>
where
    C: ConnectionTrait,
{
    let coupon = Coupon::find()
        .filter(coupon::Column::Code.eq(code))
        .one(db)
        .await?
        .ok_or_else(|| Error::CouponNotFound {
            code: code.to_string(),
        })?;

    if !coupon.is_active {
        return Err(Error::CouponInactive { code: coupon.code });
    }
    if let Some(expires_at) = coupon.expires_at {
        if expires_at <= chrono::Utc::now() {
            return Err(Error::CouponInactive { code: coupon.code });
        }
    }

    Ok(coupon)
}

/// Retrieves the coupons a given account has redeemed, newest redemption
/// first, for the worker dashboard's "My Redeemed Coupons" list.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_redeemed_coupons(
    db: &DatabaseConnection,
    account_id: i64,
) -> Result<Vec<coupon::Model>> {
    Coupon::find()
        .join(JoinType::InnerJoin, coupon::Relation::Redemptions.def())
        .filter(coupon_redemption::Column::AccountId.eq(account_id))
        .order_by_desc(coupon_redemption::Column::RedeemedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Flips the manual activation flag on a coupon.
///
/// # Errors
/// Returns `CouponNotFound` if the coupon is absent, or a database error.
pub async fn set_coupon_active(
    db: &DatabaseConnection,
    coupon_id: i64,
    active: bool,
) -> Result<coupon::Model> {
    let mut coupon: coupon::ActiveModel = Coupon::find_by_id(coupon_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::CouponNotFound {
            code: coupon_id.to_string(),
        })?
        .into();

    coupon.is_active = Set(active);
    coupon.update(db).await.map_err(Into::into)
}

/// Hard-deletes a coupon along with its redemption roster.
///
/// Both deletes run in one transaction so the roster can never outlive its
/// coupon. Already-credited balances are untouched.
///
/// # Errors
/// Returns `CouponNotFound` if the coupon is absent, or a database error.
pub async fn delete_coupon(db: &DatabaseConnection, coupon_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let coupon = Coupon::find_by_id(coupon_id)
        .one(&txn)
        .await?
        .ok_or_else(|| Error::CouponNotFound {
            code: coupon_id.to_string(),
        })?;

    CouponRedemption::delete_many()
        .filter(coupon_redemption::Column::CouponId.eq(coupon_id))
        .exec(&txn)
        .await?;
    coupon.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
