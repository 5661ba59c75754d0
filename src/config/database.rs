//! Database configuration module.
//!
//! Handles `SQLite` connection setup and table creation using `SeaORM`.
//! Table creation uses `Schema::create_table_from_entity` so the database
//! schema - including the unique indexes on account identity/email and
//! coupon codes, and the composite roster keys - is generated straight from
//! the entity definitions without manual SQL.

use crate::entities::{
    Account, Booking, ContactMessage, Coupon, CouponRedemption, Merchandise,
    MerchandiseRedemption, Product,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Establishes a connection to the database at the given URL.
///
/// # Errors
/// Returns an error if the connection cannot be established.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates any missing tables from the entity definitions.
///
/// Idempotent: every statement carries `IF NOT EXISTS`, so this is safe to
/// run on every startup against an existing database file.
///
/// # Errors
/// Returns an error if any of the schema statements fail to execute.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let statements = [
        schema.create_table_from_entity(Account),
        schema.create_table_from_entity(Coupon),
        schema.create_table_from_entity(CouponRedemption),
        schema.create_table_from_entity(Merchandise),
        schema.create_table_from_entity(MerchandiseRedemption),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(Booking),
        schema.create_table_from_entity(ContactMessage),
    ];

    for mut statement in statements {
        db.execute(builder.build(statement.if_not_exists())).await?;
    }

    Ok(())
}
