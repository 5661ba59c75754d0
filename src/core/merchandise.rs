//! Merchandise catalog logic - Admin CRUD over redeemable items.

use crate::{
    core::require_fields,
    entities::{Merchandise, MerchandiseRedemption, merchandise, merchandise_redemption},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, TransactionTrait, prelude::*};

/// Creates a merchandise item costing `coins` to redeem.
///
/// Name and image are required (the dashboard renders both); the cost must
/// be positive. Blank descriptions are normalized to `None`.
///
/// # Errors
/// Returns a validation error for missing fields or a non-positive cost,
/// or a database error.
pub async fn create_merchandise(
    db: &DatabaseConnection,
    name: String,
    coins: i64,
    image_url: String,
    description: Option<String>,
) -> Result<merchandise::Model> {
    require_fields(&[
        ("name", !name.trim().is_empty()),
        ("image_url", !image_url.trim().is_empty()),
    ])?;
    if coins <= 0 {
        return Err(Error::Validation {
            fields: "coins".to_string(),
        });
    }

    let model = merchandise::ActiveModel {
        name: Set(name.trim().to_string()),
        coins: Set(coins),
        image_url: Set(image_url.trim().to_string()),
        description: Set(description.filter(|d| !d.trim().is_empty())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves the full merchandise catalog, newest first.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_merchandise(db: &DatabaseConnection) -> Result<Vec<merchandise::Model>> {
    Merchandise::find()
        .order_by_desc(merchandise::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves a merchandise item by its unique ID.
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn get_merchandise_by_id<C>(
    db: &C,
    merchandise_id: i64,
) -> Result<Option<merchandise::Model>>
where
    C: ConnectionTrait,
{
    Merchandise::find_by_id(merchandise_id)
        .one(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes a merchandise item along with its redemption roster.
///
/// Runs in one transaction; balances already debited stay debited.
///
/// # Errors
/// Returns `MerchandiseNotFound` if the item is absent, or a database error.
pub async fn delete_merchandise(db: &DatabaseConnection, merchandise_id: i64) -> Result<()> {
    let txn = db.begin().await?;

    let item = Merchandise::find_by_id(merchandise_id)
        .one(&txn)
        .await?
        .ok_or(Error::MerchandiseNotFound { id: merchandise_id })?;

    MerchandiseRedemption::delete_many()
        .filter(merchandise_redemption::Column::MerchandiseId.eq(merchandise_id))
        .exec(&txn)
        .await?;
    item.delete(&txn).await?;

    txn.commit().await?;
    Ok(())
}
