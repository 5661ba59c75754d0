//! Booking logic - Appointment requests from the public site.

use crate::{
    core::{is_well_formed_email, require_fields},
    entities::{Booking, booking},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// A booking request as submitted by the public form.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBooking {
    /// Requested garage service
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
    #[serde(default)]
    pub vehicle_model: Option<String>,
    /// Optional free-form note
    #[serde(default)]
    pub message: Option<String>,
}

/// Records a booking request after validating its required fields.
///
/// # Errors
/// Returns a validation error for missing fields or a malformed email,
/// or a database error.
pub async fn create_booking(db: &DatabaseConnection, new: NewBooking) -> Result<booking::Model> {
    require_fields(&[
        ("service", !new.service.trim().is_empty()),
        ("name", !new.name.trim().is_empty()),
        ("email", !new.email.trim().is_empty()),
        ("phone", !new.phone.trim().is_empty()),
    ])?;
    if !is_well_formed_email(new.email.trim()) {
        return Err(Error::Validation {
            fields: "email".to_string(),
        });
    }

    let model = booking::ActiveModel {
        service: Set(new.service.trim().to_string()),
        name: Set(new.name.trim().to_string()),
        email: Set(new.email.trim().to_string()),
        phone: Set(new.phone.trim().to_string()),
        date: Set(new.date),
        time: Set(new.time),
        vehicle_model: Set(new.vehicle_model.filter(|v| !v.trim().is_empty())),
        message: Set(new.message.filter(|m| !m.trim().is_empty())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    model.insert(db).await.map_err(Into::into)
}

/// Retrieves all bookings, newest first (admin view).
///
/// # Errors
/// Returns an error if the database query fails.
pub async fn list_bookings(db: &DatabaseConnection) -> Result<Vec<booking::Model>> {
    Booking::find()
        .order_by_desc(booking::Column::CreatedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Hard-deletes a booking by id.
///
/// # Errors
/// Returns `NotFound` if the booking is absent, or a database error.
pub async fn delete_booking(db: &DatabaseConnection, booking_id: i64) -> Result<()> {
    let booking = Booking::find_by_id(booking_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound {
            entity: "Booking",
            id: booking_id,
        })?;

    booking.delete(db).await?;
    Ok(())
}
