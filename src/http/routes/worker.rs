//! Worker dashboard - balance display, redeemed coupon history, and the two
//! redemption endpoints. Every route requires a session in the `worker` role.

use crate::{
    core::{coupon, merchandise, redemption},
    entities::{account as account_entity, coupon as coupon_entity, merchandise as merchandise_entity},
    errors::Result,
    http::{require_session, state::AppState},
};
use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde::Deserialize;

/// Returns the worker's own account, including the live coin balance.
pub async fn profile(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<account_entity::Model>> {
    let session = require_session(&state, &headers).await?;
    session.require_worker()?;
    Ok(Json(session.account))
}

/// Lists the coupons this worker has redeemed, newest first.
pub async fn my_coupons(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<coupon_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_worker()?;
    Ok(Json(
        coupon::list_redeemed_coupons(&state.db, session.account.id).await?,
    ))
}

/// Payload for `POST /worker/coupons/redeem`.
#[derive(Debug, Deserialize)]
pub struct RedeemCouponRequest {
    /// The coupon code to redeem
    pub code: String,
}

/// Redeems a coupon code for the session's account.
pub async fn redeem_coupon(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<RedeemCouponRequest>,
) -> Result<Json<redemption::CouponReceipt>> {
    let session = require_session(&state, &headers).await?;
    session.require_worker()?;
    let receipt =
        redemption::redeem_coupon(&state.db, session.account.id, request.code.trim()).await?;
    Ok(Json(receipt))
}

/// Lists the merchandise catalog shown on the dashboard.
pub async fn merchandise_catalog(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<merchandise_entity::Model>>> {
    let session = require_session(&state, &headers).await?;
    session.require_worker()?;
    Ok(Json(merchandise::list_merchandise(&state.db).await?))
}

/// Redeems a merchandise item for the session's account.
pub async fn redeem_merchandise(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(merchandise_id): Path<i64>,
) -> Result<Json<redemption::MerchandiseReceipt>> {
    let session = require_session(&state, &headers).await?;
    session.require_worker()?;
    let receipt =
        redemption::redeem_merchandise(&state.db, session.account.id, merchandise_id).await?;
    Ok(Json(receipt))
}
