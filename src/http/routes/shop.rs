//! Public surface - registration, the shop listing, bookings, and the
//! contact form. Only `/register` needs a token; it creates the pending
//! account for an identity that just signed up with the provider.

use crate::{
    core::{account, booking, contact, product},
    entities::{account as account_entity, booking as booking_entity, contact_message, product as product_entity},
    errors::Result,
    http::{authenticate_identity, state::AppState},
};
use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;

/// Payload for `POST /register`.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    /// Display name for the new account
    pub name: String,
    /// Contact email for the new account
    pub email: String,
}

/// Creates a pending account for the authenticated identity.
pub async fn register(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<account_entity::Model>)> {
    let identity = authenticate_identity(&state, &headers).await?;
    let account =
        account::register(&state.db, identity.subject, request.name, request.email).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

/// Lists the shop catalog.
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<product_entity::Model>>> {
    Ok(Json(product::list_products(&state.db).await?))
}

/// Records a booking request.
pub async fn create_booking(
    State(state): State<AppState>,
    Json(new): Json<booking::NewBooking>,
) -> Result<(StatusCode, Json<booking_entity::Model>)> {
    let booking = booking::create_booking(&state.db, new).await?;
    Ok((StatusCode::CREATED, Json(booking)))
}

/// Payload for `POST /contact`.
#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    /// Sender name
    pub name: String,
    /// Sender email
    pub email: String,
    /// Subject line
    pub subject: String,
    /// Message body
    pub message: String,
}

/// Records a contact form submission.
pub async fn submit_contact(
    State(state): State<AppState>,
    Json(request): Json<ContactRequest>,
) -> Result<(StatusCode, Json<contact_message::Model>)> {
    let message = contact::submit_message(
        &state.db,
        request.name,
        request.email,
        request.subject,
        request.message,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(message)))
}
