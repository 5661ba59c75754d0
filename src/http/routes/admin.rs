//! Admin back-office - worker verification and CRUD over every catalog and
//! record table. Every route requires a session in the `admin` role.

use crate::{
    core::{account, booking, contact, coupon, merchandise, product},
    entities::{
        account as account_entity, booking as booking_entity, contact_message,
        coupon as coupon_entity, merchandise as merchandise_entity, product as product_entity,
    },
    errors::Result,
    http::{require_session, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

// --- Worker verification ---

/// Lists accounts awaiting verification, oldest first.
pub async fn pending_workers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<account_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(account::list_pending_accounts(&state.db).await?))
}

/// Approves a pending account, promoting it to worker.
pub async fn approve_worker(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<i64>,
) -> Result<Json<account_entity::Model>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(account::approve_account(&state.db, account_id).await?))
}

/// Rejects a pending account, deleting it entirely.
pub async fn reject_worker(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(account_id): Path<i64>,
) -> Result<StatusCode> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    account::reject_account(&state.db, account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Products ---

/// Payload for `POST /admin/products`.
#[derive(Debug, Deserialize)]
pub struct NewProductRequest {
    /// Product name
    pub name: String,
    /// Retail price
    pub price: f64,
    /// Image shown on the shop page
    pub image_url: String,
    /// Shop category
    pub category: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Lists the product catalog (admin view).
pub async fn list_products(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<product_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(product::list_products(&state.db).await?))
}

/// Adds a product to the shop.
pub async fn add_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<NewProductRequest>,
) -> Result<(StatusCode, Json<product_entity::Model>)> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    let created = product::create_product(
        &state.db,
        request.name,
        request.price,
        request.image_url,
        request.category,
        request.description,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Removes a product from the shop.
pub async fn remove_product(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(product_id): Path<i64>,
) -> Result<StatusCode> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    product::delete_product(&state.db, product_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Coupons ---

/// Payload for `POST /admin/coupons`.
#[derive(Debug, Deserialize)]
pub struct NewCouponRequest {
    /// Redemption code
    pub code: String,
    /// Coins credited on redemption
    pub coins: i64,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
    /// Optional expiry instant
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Payload for `PUT /admin/coupons/{id}/active`.
#[derive(Debug, Deserialize)]
pub struct SetActiveRequest {
    /// Desired activation state
    pub active: bool,
}

/// Lists the coupon catalog.
pub async fn list_coupons(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<coupon_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(coupon::list_coupons(&state.db).await?))
}

/// Creates a coupon.
pub async fn add_coupon(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<NewCouponRequest>,
) -> Result<(StatusCode, Json<coupon_entity::Model>)> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    let created = coupon::create_coupon(
        &state.db,
        request.code,
        request.coins,
        request.description,
        request.expires_at,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes a coupon and its redemption roster.
pub async fn remove_coupon(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(coupon_id): Path<i64>,
) -> Result<StatusCode> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    coupon::delete_coupon(&state.db, coupon_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Activates or deactivates a coupon.
pub async fn set_coupon_active(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(coupon_id): Path<i64>,
    Json(request): Json<SetActiveRequest>,
) -> Result<Json<coupon_entity::Model>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(
        coupon::set_coupon_active(&state.db, coupon_id, request.active).await?,
    ))
}

// --- Merchandise ---

/// Payload for `POST /admin/merchandise`.
#[derive(Debug, Deserialize)]
pub struct NewMerchandiseRequest {
    /// Item name
    pub name: String,
    /// Cost in coins
    pub coins: i64,
    /// Image shown on the dashboard
    pub image_url: String,
    /// Optional description
    #[serde(default)]
    pub description: Option<String>,
}

/// Lists the merchandise catalog (admin view).
pub async fn list_merchandise(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<merchandise_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(merchandise::list_merchandise(&state.db).await?))
}

/// Adds a merchandise item.
pub async fn add_merchandise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<NewMerchandiseRequest>,
) -> Result<(StatusCode, Json<merchandise_entity::Model>)> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    let created = merchandise::create_merchandise(
        &state.db,
        request.name,
        request.coins,
        request.image_url,
        request.description,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Deletes a merchandise item and its redemption roster.
pub async fn remove_merchandise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(merchandise_id): Path<i64>,
) -> Result<StatusCode> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    merchandise::delete_merchandise(&state.db, merchandise_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Bookings & contact messages ---

/// Lists all bookings, newest first.
pub async fn list_bookings(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<booking_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(booking::list_bookings(&state.db).await?))
}

/// Deletes a booking.
pub async fn remove_booking(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(booking_id): Path<i64>,
) -> Result<StatusCode> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    booking::delete_booking(&state.db, booking_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Lists the contact inbox, newest first.
pub async fn list_messages(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<contact_message::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    Ok(Json(contact::list_messages(&state.db).await?))
}

/// Deletes a contact message.
pub async fn remove_message(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(message_id): Path<i64>,
) -> Result<StatusCode> {
    let session = require_session(&state, &headers).await?;
    session.require_admin()?;
    contact::delete_message(&state.db, message_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
