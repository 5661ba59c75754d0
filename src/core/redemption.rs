//! Redemption engine - Exactly-once reward redemption over the coins ledger.
//!
//! Both protocols run inside a single database transaction so the roster
//! insert and the balance update commit or roll back together. The rosters'
//! composite primary keys back up the membership checks: two sessions racing
//! past the read both try to insert the same key, and the storage layer
//! rejects the loser, which surfaces as `AlreadyRedeemed`. The balance side
//! is guarded the same way - the debit statement re-checks the balance at
//! write time, so a stale session can never push an account negative.
//!
//! `LedgerInconsistency` is reserved for genuine infrastructure partial
//! failure: a rollback or commit that itself fails after the roster and
//! balance have diverged inside the transaction.

use crate::{
    core::{account, coupon, merchandise},
    entities::{CouponRedemption, MerchandiseRedemption, coupon_redemption, merchandise_redemption},
    errors::{Error, Result},
};
use sea_orm::{DatabaseTransaction, Set, SqlErr, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::{info, warn};

/// Outcome of a successful coupon redemption, shaped for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CouponReceipt {
    /// The redeemed code
    pub code: String,
    /// Coins credited
    pub coins: i64,
    /// Coupon description, if the admin provided one
    pub description: Option<String>,
    /// Account balance after the credit
    pub balance: i64,
}

/// Outcome of a successful merchandise redemption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MerchandiseReceipt {
    /// Name of the redeemed item
    pub name: String,
    /// Coins debited
    pub coins: i64,
    /// Account balance after the debit
    pub balance: i64,
}

/// Redeems a coupon code for the given account, crediting its payout.
///
/// Protocol, all inside one transaction:
/// 1. Look up the coupon by code; unknown codes are `CouponNotFound`,
///    deactivated or expired ones `CouponInactive`.
/// 2. Reject with `AlreadyRedeemed` when the account is on the roster.
/// 3. Insert the roster row and credit `coupon.coins` to the balance.
/// 4. Commit, returning the updated balance and description for display.
///
/// # Errors
/// Returns the protocol errors above, `LedgerInconsistency` when the
/// transaction cannot be cleanly resolved, or a database error.
pub async fn redeem_coupon(
    db: &DatabaseConnection,
    account_id: i64,
    code: &str,
) -> Result<CouponReceipt> {
    let txn = db.begin().await?;

    let coupon = coupon::find_active_coupon_by_code(&txn, code).await?;

    let already = CouponRedemption::find_by_id((coupon.id, account_id))
        .one(&txn)
        .await?;
    if already.is_some() {
        return Err(Error::AlreadyRedeemed {
            reward: coupon.code,
        });
    }

    let roster = coupon_redemption::ActiveModel {
        coupon_id: Set(coupon.id),
        account_id: Set(account_id),
        redeemed_at: Set(chrono::Utc::now()),
    };
    if let Err(err) = roster.insert(&txn).await {
        return Err(match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Error::AlreadyRedeemed {
                reward: coupon.code,
            },
            _ => err.into(),
        });
    }

    let account = match account::adjust_coins(&txn, account_id, coupon.coins).await {
        Ok(account) => account,
        Err(err) => return Err(unwind(txn, &format!("coupon '{}' credit", coupon.code), err).await),
    };

    commit(txn, &format!("coupon '{}' redemption", coupon.code)).await?;
    info!(
        account_id,
        code = %coupon.code,
        coins = coupon.coins,
        "coupon redeemed"
    );

    Ok(CouponReceipt {
        code: coupon.code,
        coins: coupon.coins,
        description: coupon.description,
        balance: account.coins,
    })
}

/// Redeems a merchandise item for the given account, debiting its cost.
///
/// Protocol, all inside one transaction:
/// 1. Re-read the item and the account fresh - client-cached balances are
///    never trusted.
/// 2. Reject with `AlreadyRedeemed` when the account is on the roster.
/// 3. Reject with `InsufficientBalance` when the balance cannot cover the
///    cost.
/// 4. Insert the roster row and debit the cost; the debit statement
///    re-checks the balance at write time, closing the race between two
///    sessions of the same account.
/// 5. Commit, returning the updated balance.
///
/// # Errors
/// Returns the protocol errors above, `MerchandiseNotFound` or
/// `AccountNotFound` for dangling ids, `LedgerInconsistency` when the
/// transaction cannot be cleanly resolved, or a database error.
pub async fn redeem_merchandise(
    db: &DatabaseConnection,
    account_id: i64,
    merchandise_id: i64,
) -> Result<MerchandiseReceipt> {
    let txn = db.begin().await?;

    let item = merchandise::get_merchandise_by_id(&txn, merchandise_id)
        .await?
        .ok_or(Error::MerchandiseNotFound { id: merchandise_id })?;
    let holder = account::get_account_by_id(&txn, account_id)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })?;

    let already = MerchandiseRedemption::find_by_id((item.id, account_id))
        .one(&txn)
        .await?;
    if already.is_some() {
        return Err(Error::AlreadyRedeemed { reward: item.name });
    }

    if holder.coins < item.coins {
        return Err(Error::InsufficientBalance {
            current: holder.coins,
            required: item.coins,
        });
    }

    let roster = merchandise_redemption::ActiveModel {
        merchandise_id: Set(item.id),
        account_id: Set(account_id),
        redeemed_at: Set(chrono::Utc::now()),
    };
    if let Err(err) = roster.insert(&txn).await {
        return Err(match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                Error::AlreadyRedeemed { reward: item.name }
            }
            _ => err.into(),
        });
    }

    let account = match account::adjust_coins(&txn, account_id, -item.coins).await {
        Ok(account) => account,
        Err(err) => return Err(unwind(txn, &format!("'{}' debit", item.name), err).await),
    };

    commit(txn, &format!("merchandise '{}' redemption", item.name)).await?;
    info!(
        account_id,
        item = %item.name,
        coins = item.coins,
        "merchandise redeemed"
    );

    Ok(MerchandiseReceipt {
        name: item.name,
        coins: item.coins,
        balance: account.coins,
    })
}

/// Rolls the transaction back after a failed balance update, undoing the
/// roster insert. A rollback failure means the roster row may survive
/// without its balance counterpart, which is exactly the divergence
/// `LedgerInconsistency` exists to flag.
async fn unwind(txn: DatabaseTransaction, step: &str, cause: Error) -> Error {
    match txn.rollback().await {
        Ok(()) => cause,
        Err(rollback_err) => {
            warn!("rollback failed after {step}: {rollback_err}");
            Error::LedgerInconsistency {
                detail: format!(
                    "{step} failed ({cause}) and the roster rollback also failed: {rollback_err}"
                ),
            }
        }
    }
}

/// Commits the redemption transaction, mapping a commit failure to
/// `LedgerInconsistency` so it is surfaced for reconciliation instead of
/// read as an ordinary retryable error.
async fn commit(txn: DatabaseTransaction, step: &str) -> Result<()> {
    txn.commit().await.map_err(|err| Error::LedgerInconsistency {
        detail: format!("commit of {step} failed: {err}"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::{
        core::{account, coupon},
        entities::Role,
        test_utils::*,
    };

    #[tokio::test]
    async fn test_redeem_coupon_credits_balance_once() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        create_test_coupon(&db, "SAVE10", 10).await?;

        let receipt = redeem_coupon(&db, worker.id, "SAVE10").await?;
        assert_eq!(receipt.code, "SAVE10");
        assert_eq!(receipt.coins, 10);
        assert_eq!(receipt.balance, 10);

        // Second attempt is permanently rejected and the balance unchanged
        let result = redeem_coupon(&db, worker.id, "SAVE10").await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AlreadyRedeemed { reward } if reward == "SAVE10"
        ));
        let worker = account::get_account_by_id(&db, worker.id).await?.unwrap();
        assert_eq!(worker.coins, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_redeem_coupon_returns_description() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        coupon::create_coupon(
            &db,
            "WELCOME".to_string(),
            25,
            Some("Welcome aboard".to_string()),
            None,
        )
        .await?;

        let receipt = redeem_coupon(&db, worker.id, "WELCOME").await?;
        assert_eq!(receipt.description.as_deref(), Some("Welcome aboard"));

        Ok(())
    }

    #[tokio::test]
    async fn test_redeem_coupon_unknown_or_inactive() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        let dormant = create_test_coupon(&db, "DORMANT", 10).await?;
        coupon::set_coupon_active(&db, dormant.id, false).await?;

        let result = redeem_coupon(&db, worker.id, "MISSING").await;
        assert!(matches!(result.unwrap_err(), Error::CouponNotFound { .. }));

        let result = redeem_coupon(&db, worker.id, "DORMANT").await;
        assert!(matches!(result.unwrap_err(), Error::CouponInactive { .. }));

        // Neither attempt touched the balance
        let worker = account::get_account_by_id(&db, worker.id).await?.unwrap();
        assert_eq!(worker.coins, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_same_coupon_different_accounts() -> Result<()> {
        let db = setup_test_db().await?;
        let asha = create_test_account(&db, "asha", Role::Worker).await?;
        let omar = create_test_account(&db, "omar", Role::Worker).await?;
        create_test_coupon(&db, "SHARED", 10).await?;

        assert_eq!(redeem_coupon(&db, asha.id, "SHARED").await?.balance, 10);
        assert_eq!(redeem_coupon(&db, omar.id, "SHARED").await?.balance, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_redeem_merchandise_debits_exactly_once() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        account::adjust_coins(&db, worker.id, 50).await?;
        let cap = create_test_merchandise(&db, "Garage Cap", 30).await?;

        let receipt = redeem_merchandise(&db, worker.id, cap.id).await?;
        assert_eq!(receipt.name, "Garage Cap");
        assert_eq!(receipt.coins, 30);
        assert_eq!(receipt.balance, 20);

        // Second attempt by the same account is rejected, balance stays 20
        let result = redeem_merchandise(&db, worker.id, cap.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AlreadyRedeemed { reward } if reward == "Garage Cap"
        ));
        let worker = account::get_account_by_id(&db, worker.id).await?.unwrap();
        assert_eq!(worker.coins, 20);

        Ok(())
    }

    #[tokio::test]
    async fn test_redeem_merchandise_insufficient_balance() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        account::adjust_coins(&db, worker.id, 10).await?;
        let cap = create_test_merchandise(&db, "Garage Cap", 30).await?;

        let result = redeem_merchandise(&db, worker.id, cap.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientBalance {
                current: 10,
                required: 30
            }
        ));

        // Balance untouched and the roster empty
        let worker = account::get_account_by_id(&db, worker.id).await?.unwrap();
        assert_eq!(worker.coins, 10);
        let roster = MerchandiseRedemption::find_by_id((cap.id, worker.id))
            .one(&db)
            .await?;
        assert!(roster.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn test_redeem_merchandise_exact_balance() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        account::adjust_coins(&db, worker.id, 30).await?;
        let cap = create_test_merchandise(&db, "Garage Cap", 30).await?;

        let receipt = redeem_merchandise(&db, worker.id, cap.id).await?;
        assert_eq!(receipt.balance, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_redeem_merchandise_unknown_ids() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        let cap = create_test_merchandise(&db, "Garage Cap", 30).await?;

        let result = redeem_merchandise(&db, worker.id, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::MerchandiseNotFound { id: 999 }
        ));

        let result = redeem_merchandise(&db, 999, cap.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AccountNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_stale_second_session_is_rejected() -> Result<()> {
        // Two sessions of the same account both loaded the dashboard while
        // the balance still covered the item. The first redemption wins; the
        // engine re-reads state for the second and rejects it.
        let (db, worker) = setup_with_worker().await?;
        account::adjust_coins(&db, worker.id, 30).await?;
        let cap = create_test_merchandise(&db, "Garage Cap", 30).await?;

        let first = redeem_merchandise(&db, worker.id, cap.id).await;
        let second = redeem_merchandise(&db, worker.id, cap.id).await;

        assert_eq!(first?.balance, 0);
        assert!(matches!(second.unwrap_err(), Error::AlreadyRedeemed { .. }));

        let worker = account::get_account_by_id(&db, worker.id).await?.unwrap();
        assert_eq!(worker.coins, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_balance_stays_non_negative_across_sequence() -> Result<()> {
        let (db, worker) = setup_with_worker().await?;
        create_test_coupon(&db, "SAVE10", 10).await?;
        create_test_coupon(&db, "SAVE20", 20).await?;
        let mug = create_test_merchandise(&db, "Mug", 15).await?;
        let cap = create_test_merchandise(&db, "Cap", 30).await?;

        redeem_coupon(&db, worker.id, "SAVE10").await?; // 10
        let result = redeem_merchandise(&db, worker.id, mug.id).await; // needs 15
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientBalance { .. }
        ));

        redeem_coupon(&db, worker.id, "SAVE20").await?; // 30
        assert_eq!(redeem_merchandise(&db, worker.id, mug.id).await?.balance, 15);

        let result = redeem_merchandise(&db, worker.id, cap.id).await; // needs 30
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientBalance {
                current: 15,
                required: 30
            }
        ));

        let worker = account::get_account_by_id(&db, worker.id).await?.unwrap();
        assert!(worker.coins >= 0);
        assert_eq!(worker.coins, 15);

        Ok(())
    }
}
