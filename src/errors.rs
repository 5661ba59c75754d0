//! Unified error types and result handling.
//!
//! Every fallible operation in the crate returns [`Result`]. The variants map
//! one-to-one onto the user-visible failure modes of the rewards ledger:
//! validation problems are recoverable by correcting input, `AlreadyRedeemed`
//! is permanent per (account, reward) pair, and `LedgerInconsistency` is
//! reserved for genuine infrastructure partial failures that require
//! reconciliation rather than a blind retry.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Startup or bootstrap configuration problem.
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of what is misconfigured
        message: String,
    },

    /// Missing or malformed required fields on user input.
    #[error("Missing or malformed required fields: {fields}")]
    Validation {
        /// Comma-separated list of offending field names
        fields: String,
    },

    /// No account exists with the given id.
    #[error("Account {id} not found")]
    AccountNotFound {
        /// The account id that failed to resolve
        id: i64,
    },

    /// No coupon matches the given code or id.
    #[error("Coupon '{code}' not found")]
    CouponNotFound {
        /// The code (or id, for admin deletes) that failed to resolve
        code: String,
    },

    /// The coupon exists but is deactivated or past its expiry.
    #[error("Coupon '{code}' is inactive or expired")]
    CouponInactive {
        /// The coupon code
        code: String,
    },

    /// No merchandise item exists with the given id.
    #[error("Merchandise {id} not found")]
    MerchandiseNotFound {
        /// The merchandise id that failed to resolve
        id: i64,
    },

    /// A plain record (product, booking, contact message) is absent.
    #[error("{entity} {id} not found")]
    NotFound {
        /// Entity kind, e.g. "Product"
        entity: &'static str,
        /// The missing record's id
        id: i64,
    },

    /// An account already exists for this identity or email.
    #[error("An account already exists for {email}")]
    DuplicateAccount {
        /// The email the registration attempted to use
        email: String,
    },

    /// A coupon with this code already exists.
    #[error("A coupon with code '{code}' already exists")]
    DuplicateCoupon {
        /// The conflicting code
        code: String,
    },

    /// The account already appears in the reward's redemption roster.
    #[error("Reward '{reward}' was already redeemed by this account")]
    AlreadyRedeemed {
        /// Display name of the reward (coupon code or merchandise name)
        reward: String,
    },

    /// The balance cannot cover the requested debit.
    #[error("Insufficient balance: have {current} coins, need {required}")]
    InsufficientBalance {
        /// Balance observed when the debit was attempted
        current: i64,
        /// Coins the debit required
        required: i64,
    },

    /// A role change outside pending->worker / pending->deleted.
    #[error("Invalid role transition: {from} -> {to}")]
    InvalidTransition {
        /// Current role of the account
        from: String,
        /// Requested target state
        to: String,
    },

    /// Roster and balance diverged during a redemption and could not be
    /// reconciled automatically. Surfaced distinctly so operators can repair
    /// the ledger instead of retrying.
    #[error("Ledger inconsistency: {detail}")]
    LedgerInconsistency {
        /// What was applied and what failed
        detail: String,
    },

    /// No usable bearer token, or the token resolved to no account.
    #[error("Authentication required")]
    Unauthenticated,

    /// The session's account does not hold the required role.
    #[error("Requires {required} role")]
    Forbidden {
        /// Role the operation is gated on
        required: &'static str,
    },

    /// Storage backend failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// I/O failure (listener binding, bootstrap file reads).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience `Result` type.
pub type Result<T> = std::result::Result<T, Error>;
