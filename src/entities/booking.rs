//! Booking entity - Service appointment requests from the public site.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Unique identifier for the booking
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Requested garage service, e.g. "Oil Change"
    pub service: String,
    /// Customer name
    pub name: String,
    /// Customer email
    pub email: String,
    /// Customer phone number
    pub phone: String,
    /// Requested appointment date
    pub date: Date,
    /// Requested appointment time
    pub time: Time,
    /// Optional vehicle make/model
    pub vehicle_model: Option<String>,
    /// Optional free-form note from the customer
    pub message: Option<String>,
    /// When the booking was submitted
    pub created_at: DateTimeUtc,
}

/// Bookings stand alone; no relationships to other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
