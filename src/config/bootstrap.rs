//! Admin account seeding from config.toml.
//!
//! Admins are declared in a TOML file and inserted on startup when missing,
//! so a fresh database comes up with a usable back-office instead of
//! requiring a hand-provisioned row.

use crate::{
    core::account,
    entities::{Role, account as account_entity},
    errors::{Error, Result},
};
use sea_orm::{DatabaseConnection, Set, prelude::*};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct Bootstrap {
    /// Admin accounts to seed
    #[serde(default)]
    pub admins: Vec<AdminConfig>,
}

/// Configuration for a single seeded admin account
#[derive(Debug, Deserialize, Clone)]
pub struct AdminConfig {
    /// Subject the identity provider issues for this admin
    pub auth_id: String,
    /// Display name
    pub name: String,
    /// Contact email
    pub email: String,
}

/// Loads the bootstrap configuration from a TOML file.
///
/// # Errors
/// Returns an error if the file cannot be read or the TOML is invalid.
pub fn load_bootstrap<P: AsRef<Path>>(path: P) -> Result<Bootstrap> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read bootstrap file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse bootstrap file: {e}"),
    })
}

/// Inserts any configured admin accounts that are not present yet.
///
/// Matching is by `auth_id`; existing accounts are left untouched, so
/// seeding is idempotent across restarts. Returns how many accounts were
/// created.
///
/// # Errors
/// Returns an error if a lookup or insert fails.
pub async fn seed_admin_accounts(db: &DatabaseConnection, bootstrap: &Bootstrap) -> Result<usize> {
    let mut seeded = 0;

    for admin in &bootstrap.admins {
        if account::get_account_by_auth_id(db, &admin.auth_id)
            .await?
            .is_some()
        {
            continue;
        }

        let model = account_entity::ActiveModel {
            auth_id: Set(admin.auth_id.clone()),
            name: Set(admin.name.clone()),
            email: Set(admin.email.clone()),
            role: Set(Role::Admin),
            coins: Set(0),
            created_at: Set(chrono::Utc::now()),
            ..Default::default()
        };
        model.insert(db).await?;
        info!("Seeded admin account for {}", admin.email);
        seeded += 1;
    }

    Ok(seeded)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_parse_bootstrap_config() {
        let toml_str = r#"
            [[admins]]
            auth_id = "auth-omar"
            name = "Omar"
            email = "omar@satishgarage.example"

            [[admins]]
            auth_id = "auth-vera"
            name = "Vera"
            email = "vera@satishgarage.example"
        "#;

        let bootstrap: Bootstrap = toml::from_str(toml_str).unwrap();
        assert_eq!(bootstrap.admins.len(), 2);
        assert_eq!(bootstrap.admins[0].auth_id, "auth-omar");
        assert_eq!(bootstrap.admins[1].email, "vera@satishgarage.example");
    }

    #[test]
    fn test_parse_bootstrap_config_empty() {
        let bootstrap: Bootstrap = toml::from_str("").unwrap();
        assert!(bootstrap.admins.is_empty());
    }

    #[tokio::test]
    async fn test_seed_admins_idempotent() -> Result<()> {
        let db = setup_test_db().await?;
        let bootstrap = Bootstrap {
            admins: vec![AdminConfig {
                auth_id: "auth-omar".to_string(),
                name: "Omar".to_string(),
                email: "omar@satishgarage.example".to_string(),
            }],
        };

        assert_eq!(seed_admin_accounts(&db, &bootstrap).await?, 1);
        // Second run finds the account and creates nothing
        assert_eq!(seed_admin_accounts(&db, &bootstrap).await?, 0);

        let admin = account::get_account_by_auth_id(&db, "auth-omar")
            .await?
            .unwrap();
        assert_eq!(admin.role, Role::Admin);
        assert_eq!(admin.coins, 0);

        Ok(())
    }
}
