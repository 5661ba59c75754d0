//! Route handlers, grouped by surface.

/// Admin back-office handlers
pub mod admin;
/// Public shop/contact/booking handlers
pub mod shop;
/// Worker rewards dashboard handlers
pub mod worker;
