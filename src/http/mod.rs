//! HTTP layer - The web interface over the core modules.
//!
//! Handlers stay thin: extract, resolve the session where the route is
//! gated, call one core function, serialize the result. Error-to-status
//! mapping lives here so the core modules remain transport-agnostic.

/// Route handlers for the public, worker, and admin surfaces
pub mod routes;
/// Shared application state
pub mod state;

use crate::{
    auth::{self, Identity, Session},
    errors::{Error, Result},
};
use axum::{
    Router,
    http::{
        HeaderMap, Method, StatusCode,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};
use state::AppState;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthenticated => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::AccountNotFound { .. }
            | Self::CouponNotFound { .. }
            | Self::MerchandiseNotFound { .. }
            | Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::DuplicateAccount { .. }
            | Self::DuplicateCoupon { .. }
            | Self::AlreadyRedeemed { .. }
            | Self::InvalidTransition { .. } => StatusCode::CONFLICT,
            Self::CouponInactive { .. } => StatusCode::GONE,
            Self::InsufficientBalance { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::LedgerInconsistency { .. }
            | Self::Config { .. }
            | Self::Database(_)
            | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("request failed: {self}");
        }

        (status, self.to_string()).into_response()
    }
}

/// Pulls the bearer token out of the Authorization header and validates it
/// with the identity provider. Used by `/register`, where the identity does
/// not have an account yet.
///
/// # Errors
/// Returns `Unauthenticated` when the header is missing or malformed, or
/// when the provider rejects the token.
pub async fn authenticate_identity(state: &AppState, headers: &HeaderMap) -> Result<Identity> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(Error::Unauthenticated)?;

    state.identity.authenticate(token).await
}

/// Resolves the request's bearer token all the way to a [`Session`].
///
/// # Errors
/// Returns `Unauthenticated` for a missing/invalid token or an identity
/// with no registered account.
pub async fn require_session(state: &AppState, headers: &HeaderMap) -> Result<Session> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(Error::Unauthenticated)?;

    auth::resolve_session(&state.db, state.identity.as_ref(), token).await
}

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .max_age(Duration::from_secs(60 * 60));

    Router::new()
        // Public surface
        .route("/register", post(routes::shop::register))
        .route("/shop/products", get(routes::shop::list_products))
        .route("/bookings", post(routes::shop::create_booking))
        .route("/contact", post(routes::shop::submit_contact))
        // Worker dashboard
        .route("/worker/profile", get(routes::worker::profile))
        .route("/worker/coupons", get(routes::worker::my_coupons))
        .route("/worker/coupons/redeem", post(routes::worker::redeem_coupon))
        .route(
            "/worker/merchandise",
            get(routes::worker::merchandise_catalog),
        )
        .route(
            "/worker/merchandise/:id/redeem",
            post(routes::worker::redeem_merchandise),
        )
        // Admin back-office
        .route("/admin/workers/pending", get(routes::admin::pending_workers))
        .route(
            "/admin/workers/:id/approve",
            post(routes::admin::approve_worker),
        )
        .route("/admin/workers/:id", delete(routes::admin::reject_worker))
        .route(
            "/admin/products",
            get(routes::admin::list_products).post(routes::admin::add_product),
        )
        .route("/admin/products/:id", delete(routes::admin::remove_product))
        .route(
            "/admin/coupons",
            get(routes::admin::list_coupons).post(routes::admin::add_coupon),
        )
        .route("/admin/coupons/:id", delete(routes::admin::remove_coupon))
        .route(
            "/admin/coupons/:id/active",
            put(routes::admin::set_coupon_active),
        )
        .route(
            "/admin/merchandise",
            get(routes::admin::list_merchandise).post(routes::admin::add_merchandise),
        )
        .route(
            "/admin/merchandise/:id",
            delete(routes::admin::remove_merchandise),
        )
        .route("/admin/bookings", get(routes::admin::list_bookings))
        .route("/admin/bookings/:id", delete(routes::admin::remove_booking))
        .route("/admin/contact", get(routes::admin::list_messages))
        .route("/admin/contact/:id", delete(routes::admin::remove_message))
        .layer(cors)
        .with_state(state)
}

/// Binds the listener and serves requests until a shutdown signal arrives.
///
/// # Errors
/// Returns an error if the listener cannot bind or the server fails.
pub async fn serve(state: AppState, port: u16) -> Result<()> {
    let app = router(state);

    let address = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(err) => {
                error!("Failed to install signal handler: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
