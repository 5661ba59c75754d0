//! Account business logic - Registration, verification, and the coin balance.
//!
//! Accounts enter the system in the `pending` role with zero coins. Admins
//! promote them to `worker` or delete them; the redemption engine is the only
//! other writer of the balance. `adjust_coins` is the single choke point for
//! balance mutation and enforces the non-negative invariant at the storage
//! layer with a guarded atomic update.

use crate::{
    core::{is_well_formed_email, require_fields},
    entities::{Account, Role, account},
    errors::{Error, Result},
};
use sea_orm::{Condition, QueryOrder, Set, SqlErr, prelude::*};

/// Creates a new account in the `pending` role with a zero balance.
///
/// The `auth_id` is the subject issued by the external identity provider at
/// sign-up; the caller passes it through from the verified session token.
/// Fails with `DuplicateAccount` when an account already exists for either
/// the identity or the email - checked up front for a clean message, and
/// backed by the unique indexes on both columns.
///
/// # Errors
/// Returns an error if required fields are missing, the email is malformed,
/// the account already exists, or the insert fails.
pub async fn register(
    db: &DatabaseConnection,
    auth_id: String,
    name: String,
    email: String,
) -> Result<account::Model> {
    require_fields(&[
        ("auth_id", !auth_id.trim().is_empty()),
        ("name", !name.trim().is_empty()),
        ("email", !email.trim().is_empty()),
    ])?;

    let email = email.trim().to_string();
    if !is_well_formed_email(&email) {
        return Err(Error::Validation {
            fields: "email".to_string(),
        });
    }

    let existing = Account::find()
        .filter(
            Condition::any()
                .add(account::Column::AuthId.eq(auth_id.trim()))
                .add(account::Column::Email.eq(&email)),
        )
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(Error::DuplicateAccount { email });
    }

    let model = account::ActiveModel {
        auth_id: Set(auth_id.trim().to_string()),
        name: Set(name.trim().to_string()),
        email: Set(email.clone()),
        role: Set(Role::Pending),
        coins: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match model.insert(db).await {
        Ok(created) => Ok(created),
        Err(err) => match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => Err(Error::DuplicateAccount { email }),
            _ => Err(err.into()),
        },
    }
}

/// Retrieves an account by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_account_by_id<C>(db: &C, account_id: i64) -> Result<Option<account::Model>>
where
    C: ConnectionTrait,
{
    Account::find_by_id(account_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Finds an account by the subject the identity provider issued for it.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_account_by_auth_id(
    db: &DatabaseConnection,
    auth_id: &str,
) -> Result<Option<account::Model>> {
    Account::find()
        .filter(account::Column::AuthId.eq(auth_id))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Retrieves all accounts awaiting admin verification, oldest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_pending_accounts(db: &DatabaseConnection) -> Result<Vec<account::Model>> {
    Account::find()
        .filter(account::Column::Role.eq(Role::Pending))
        .order_by_asc(account::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Promotes a pending account to the `worker` role.
///
/// The only permitted promotion is `pending -> worker`. Approving an account
/// in any other role - including re-approving a worker - is rejected with
/// `InvalidTransition` rather than treated as a no-op.
///
/// # Errors
/// Returns `AccountNotFound` if the account is absent, `InvalidTransition`
/// if it is not pending, or a database error.
pub async fn approve_account(db: &DatabaseConnection, account_id: i64) -> Result<account::Model> {
    let account = Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })?;

    if account.role != Role::Pending {
        return Err(Error::InvalidTransition {
            from: account.role.as_str().to_string(),
            to: Role::Worker.as_str().to_string(),
        });
    }

    let mut active: account::ActiveModel = account.into();
    active.role = Set(Role::Worker);
    active.update(db).await.map_err(Into::into)
}

/// Rejects a pending account, deleting it entirely.
///
/// Rejection is only defined for pending accounts; workers and admins cannot
/// be removed through this surface.
///
/// # Errors
/// Returns `AccountNotFound` if the account is absent, `InvalidTransition`
/// if it is not pending, or a database error.
pub async fn reject_account(db: &DatabaseConnection, account_id: i64) -> Result<()> {
    let account = Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })?;

    if account.role != Role::Pending {
        return Err(Error::InvalidTransition {
            from: account.role.as_str().to_string(),
            to: "deleted".to_string(),
        });
    }

    account.delete(db).await?;
    Ok(())
}

/// Atomically applies `coins = coins + delta` to an account balance.
///
/// The update runs as a single SQL statement; for debits the statement also
/// requires `coins >= -delta`, so a concurrent balance change can never push
/// the account negative. Zero rows affected on a debit means the guard
/// rejected it, reported as `InsufficientBalance` with the balance that was
/// observed.
///
/// # Arguments
/// * `db` - Database connection or transaction
/// * `account_id` - ID of the account to update
/// * `delta` - Coins to add (negative to subtract)
///
/// # Errors
/// Returns `AccountNotFound`, `InsufficientBalance`, or a database error.
pub async fn adjust_coins<C>(db: &C, account_id: i64, delta: i64) -> Result<account::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    let account = Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })?;

    let mut update = Account::update_many()
        .col_expr(
            account::Column::Coins,
            Expr::col(account::Column::Coins).add(delta),
        )
        .filter(account::Column::Id.eq(account_id));
    if delta < 0 {
        update = update.filter(account::Column::Coins.gte(-delta));
    }

    let result = update.exec(db).await?;
    if result.rows_affected == 0 {
        return Err(Error::InsufficientBalance {
            current: account.coins,
            required: -delta,
        });
    }

    Account::find_by_id(account_id)
        .one(db)
        .await?
        .ok_or(Error::AccountNotFound { id: account_id })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_register_validation() -> Result<()> {
        let db = setup_test_db().await?;

        let result = register(
            &db,
            String::new(),
            String::new(),
            "a@example.com".to_string(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { fields } if fields == "auth_id, name"
        ));

        let result = register(
            &db,
            "auth-1".to_string(),
            "Asha".to_string(),
            "not-an-email".to_string(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::Validation { fields } if fields == "email"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_register_starts_pending_with_zero_coins() -> Result<()> {
        let db = setup_test_db().await?;

        let account = register(
            &db,
            "auth-1".to_string(),
            "  Asha  ".to_string(),
            "asha@example.com".to_string(),
        )
        .await?;

        assert_eq!(account.name, "Asha");
        assert_eq!(account.role, Role::Pending);
        assert_eq!(account.coins, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_register_duplicate_identity_or_email() -> Result<()> {
        let db = setup_test_db().await?;
        register(
            &db,
            "auth-1".to_string(),
            "Asha".to_string(),
            "asha@example.com".to_string(),
        )
        .await?;

        // Same identity, different email
        let result = register(
            &db,
            "auth-1".to_string(),
            "Asha".to_string(),
            "other@example.com".to_string(),
        )
        .await;
        assert!(matches!(result.unwrap_err(), Error::DuplicateAccount { .. }));

        // Same email, different identity
        let result = register(
            &db,
            "auth-2".to_string(),
            "Imposter".to_string(),
            "asha@example.com".to_string(),
        )
        .await;
        assert!(matches!(
            result.unwrap_err(),
            Error::DuplicateAccount { email } if email == "asha@example.com"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_promotes_pending_to_worker() -> Result<()> {
        let db = setup_test_db().await?;
        let pending = create_test_account(&db, "asha", Role::Pending).await?;

        let approved = approve_account(&db, pending.id).await?;
        assert_eq!(approved.role, Role::Worker);

        // No longer in the verification queue
        let queue = list_pending_accounts(&db).await?;
        assert!(queue.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_rejects_non_pending() -> Result<()> {
        let db = setup_test_db().await?;
        let worker = create_test_account(&db, "asha", Role::Worker).await?;
        let admin = create_test_account(&db, "omar", Role::Admin).await?;

        let result = approve_account(&db, worker.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidTransition { from, to } if from == "worker" && to == "worker"
        ));

        let result = approve_account(&db, admin.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidTransition { from, .. } if from == "admin"
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_approve_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = approve_account(&db, 999).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AccountNotFound { id: 999 }
        ));

        Ok(())
    }

    #[tokio::test]
    async fn test_reject_deletes_pending_account() -> Result<()> {
        let db = setup_test_db().await?;
        let pending = create_test_account(&db, "asha", Role::Pending).await?;

        reject_account(&db, pending.id).await?;

        assert!(get_account_by_id(&db, pending.id).await?.is_none());
        assert!(list_pending_accounts(&db).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn test_reject_refuses_worker_and_admin() -> Result<()> {
        let db = setup_test_db().await?;
        let worker = create_test_account(&db, "asha", Role::Worker).await?;

        let result = reject_account(&db, worker.id).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InvalidTransition { from, to } if from == "worker" && to == "deleted"
        ));
        assert!(get_account_by_id(&db, worker.id).await?.is_some());

        Ok(())
    }

    #[tokio::test]
    async fn test_list_pending_orders_oldest_first() -> Result<()> {
        let db = setup_test_db().await?;
        let first = create_test_account(&db, "asha", Role::Pending).await?;
        let second = create_test_account(&db, "omar", Role::Pending).await?;
        create_test_account(&db, "vera", Role::Worker).await?;

        let queue = list_pending_accounts(&db).await?;
        assert_eq!(queue.len(), 2);
        assert_eq!(queue[0].id, first.id);
        assert_eq!(queue[1].id, second.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_coins_credit_and_debit() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_account(&db, "asha", Role::Worker).await?;

        let account = adjust_coins(&db, account.id, 50).await?;
        assert_eq!(account.coins, 50);

        let account = adjust_coins(&db, account.id, -20).await?;
        assert_eq!(account.coins, 30);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_coins_never_goes_negative() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_account(&db, "asha", Role::Worker).await?;
        adjust_coins(&db, account.id, 10).await?;

        let result = adjust_coins(&db, account.id, -11).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::InsufficientBalance {
                current: 10,
                required: 11
            }
        ));

        // Balance untouched by the rejected debit
        let account = get_account_by_id(&db, account.id).await?.unwrap();
        assert_eq!(account.coins, 10);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_coins_debit_to_exactly_zero() -> Result<()> {
        let db = setup_test_db().await?;
        let account = create_test_account(&db, "asha", Role::Worker).await?;
        adjust_coins(&db, account.id, 25).await?;

        let account = adjust_coins(&db, account.id, -25).await?;
        assert_eq!(account.coins, 0);

        Ok(())
    }

    #[tokio::test]
    async fn test_adjust_coins_account_not_found() -> Result<()> {
        let db = setup_test_db().await?;

        let result = adjust_coins(&db, 999, 5).await;
        assert!(matches!(
            result.unwrap_err(),
            Error::AccountNotFound { id: 999 }
        ));

        Ok(())
    }
}
