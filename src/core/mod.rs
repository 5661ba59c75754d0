//! Core business logic - framework-agnostic ledger, catalog, and record operations.
//!
//! Each module owns one concern and talks to the database through SeaORM.
//! Nothing in here knows about HTTP; the interface layer calls these
//! functions with an already-resolved session where role gating applies.

/// Account store - registration, verification, and the coin balance
pub mod account;
/// Booking records from the public site
pub mod booking;
/// Contact form submissions
pub mod contact;
/// Coupon catalog operations
pub mod coupon;
/// Merchandise catalog operations
pub mod merchandise;
/// Shop product catalog operations
pub mod product;
/// Redemption engine - the transactional coins ledger
pub mod redemption;

use crate::errors::{Error, Result};

/// Checks a list of `(field name, present)` pairs and reports every missing
/// field in one `Validation` error, so a form submission gets all of its
/// problems back at once.
pub(crate) fn require_fields(fields: &[(&str, bool)]) -> Result<()> {
    let missing: Vec<&str> = fields
        .iter()
        .filter(|(_, present)| !present)
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::Validation {
            fields: missing.join(", "),
        })
    }
}

/// Structural email check: one `@`, non-empty local part, dotted domain.
pub(crate) fn is_well_formed_email(email: &str) -> bool {
    if email.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}
