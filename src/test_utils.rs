//! Shared test utilities.
//!
//! This module provides common helper functions for setting up test
//! databases and creating test entities with sensible defaults.

use crate::{
    auth::{Identity, IdentityProvider},
    config,
    core::{booking, coupon, merchandise, product},
    entities::{self, Role, account},
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use sea_orm::{DatabaseConnection, Set, prelude::*};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    config::database::create_tables(&db).await?;
    Ok(db)
}

/// Inserts an account directly in the given role.
///
/// Bypasses `register` so tests can start from any role; the auth id and
/// email are derived from the name, so names must be unique per test.
pub async fn create_test_account(
    db: &DatabaseConnection,
    name: &str,
    role: Role,
) -> Result<entities::account::Model> {
    let model = account::ActiveModel {
        auth_id: Set(format!("auth-{name}")),
        name: Set(name.to_string()),
        email: Set(format!("{name}@example.com")),
        role: Set(role),
        coins: Set(0),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Creates an active test coupon with no description or expiry.
pub async fn create_test_coupon(
    db: &DatabaseConnection,
    code: &str,
    coins: i64,
) -> Result<entities::coupon::Model> {
    coupon::create_coupon(db, code.to_string(), coins, None, None).await
}

/// Creates a test merchandise item with a placeholder image.
pub async fn create_test_merchandise(
    db: &DatabaseConnection,
    name: &str,
    coins: i64,
) -> Result<entities::merchandise::Model> {
    merchandise::create_merchandise(
        db,
        name.to_string(),
        coins,
        "https://cdn.example.com/item.png".to_string(),
        None,
    )
    .await
}

/// Creates a test product with sensible defaults.
pub async fn create_test_product(
    db: &DatabaseConnection,
    name: &str,
) -> Result<entities::product::Model> {
    product::create_product(
        db,
        name.to_string(),
        10.0,
        "https://cdn.example.com/product.png".to_string(),
        "car care".to_string(),
        None,
    )
    .await
}

/// Builds a valid booking request for the given service.
#[must_use]
pub fn test_booking(service: &str) -> booking::NewBooking {
    booking::NewBooking {
        service: service.to_string(),
        name: "Ravi".to_string(),
        email: "ravi@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap_or_default(),
        time: NaiveTime::from_hms_opt(10, 30, 0).unwrap_or_default(),
        vehicle_model: Some("Maruti Swift".to_string()),
        message: None,
    }
}

/// Sets up a complete test environment with one approved worker.
/// Returns (db, worker) for redemption test scenarios.
pub async fn setup_with_worker() -> Result<(DatabaseConnection, entities::account::Model)> {
    let db = setup_test_db().await?;
    let worker = create_test_account(&db, "asha", Role::Worker).await?;
    Ok((db, worker))
}

/// Identity provider stub: treats the token itself as the verified subject,
/// rejecting blanks. Mirrors what the gateway-facing provider does without
/// any external calls.
pub struct StubIdentityProvider;

#[async_trait]
impl IdentityProvider for StubIdentityProvider {
    async fn authenticate(&self, token: &str) -> Result<Identity> {
        let subject = token.trim();
        if subject.is_empty() {
            return Err(Error::Unauthenticated);
        }
        Ok(Identity {
            subject: subject.to_string(),
        })
    }
}
