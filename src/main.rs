//! Binary entry point: wires settings, database, admin seeding, and the
//! HTTP server together.

use dotenvy::dotenv;
use garage_rewards::{
    auth::GatewayIdentity,
    config::{bootstrap, database, settings::Settings},
    errors::Result,
    http::{self, state::AppState},
};
use std::{path::Path, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Tracing first so every later step can log
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Env vars can also be set externally, so a missing .env is fine
    dotenv().ok();

    let settings = Settings::load();

    let db = database::create_connection(&settings.database_url).await?;
    database::create_tables(&db).await?;
    info!("Database initialized");

    if Path::new(&settings.config_path).exists() {
        let config = bootstrap::load_bootstrap(&settings.config_path)?;
        let seeded = bootstrap::seed_admin_accounts(&db, &config).await?;
        if seeded > 0 {
            info!("Seeded {seeded} admin account(s)");
        }
    } else {
        info!(
            "No bootstrap file at {}, skipping admin seeding",
            settings.config_path
        );
    }

    let state = AppState::new(db, Arc::new(GatewayIdentity));
    http::serve(state, settings.port).await
}
