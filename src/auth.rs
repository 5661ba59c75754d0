//! Session resolution and role gating.
//!
//! Authentication itself is delegated to an external identity provider; this
//! module only consumes it through the [`IdentityProvider`] seam and turns a
//! verified identity into an explicit [`Session`] value. Handlers pass the
//! session to gated operations - there is no ambient current-user state.

use crate::{
    core::account,
    entities::{Role, account as account_entity},
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::DatabaseConnection;

/// A verified identity as reported by the external provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Stable subject identifier for the authenticated principal
    pub subject: String,
}

/// External identity provider seam.
///
/// The hosted provider validates session tokens out-of-process; deployments
/// plug in an implementation that calls it. Tests use a stub.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Validates a bearer token and returns the identity it belongs to.
    ///
    /// # Errors
    /// Returns `Unauthenticated` for an invalid or expired token.
    async fn authenticate(&self, token: &str) -> Result<Identity>;
}

/// Identity provider for deployments behind an authenticating gateway.
///
/// The reverse proxy in front of this service validates the end-user token
/// and forwards the verified subject as the bearer credential, so all that
/// remains here is to reject empty values.
#[derive(Debug, Clone, Copy, Default)]
pub struct GatewayIdentity;

#[async_trait]
impl IdentityProvider for GatewayIdentity {
    async fn authenticate(&self, token: &str) -> Result<Identity> {
        let subject = token.trim();
        if subject.is_empty() {
            return Err(Error::Unauthenticated);
        }
        Ok(Identity {
            subject: subject.to_string(),
        })
    }
}

/// An authenticated request context: the verified identity resolved to its
/// account row. Built once per request and passed explicitly to every gated
/// operation.
#[derive(Debug, Clone)]
pub struct Session {
    /// The account behind the verified identity
    pub account: account_entity::Model,
}

impl Session {
    /// Requires the session to belong to an approved worker.
    ///
    /// Pending accounts authenticate successfully but pass no role gate
    /// until an admin approves them.
    ///
    /// # Errors
    /// Returns `Forbidden` unless the account role is `worker`.
    pub fn require_worker(&self) -> Result<()> {
        if self.account.role == Role::Worker {
            Ok(())
        } else {
            Err(Error::Forbidden { required: "worker" })
        }
    }

    /// Requires the session to belong to an admin.
    ///
    /// # Errors
    /// Returns `Forbidden` unless the account role is `admin`.
    pub fn require_admin(&self) -> Result<()> {
        if self.account.role == Role::Admin {
            Ok(())
        } else {
            Err(Error::Forbidden { required: "admin" })
        }
    }
}

/// Validates a bearer token with the identity provider and resolves the
/// subject to its account.
///
/// # Errors
/// Returns `Unauthenticated` when the token is invalid or no account has
/// been registered for the subject, or a database error.
pub async fn resolve_session(
    db: &DatabaseConnection,
    provider: &dyn IdentityProvider,
    token: &str,
) -> Result<Session> {
    let identity = provider.authenticate(token).await?;

    let account = account::get_account_by_auth_id(db, &identity.subject)
        .await?
        .ok_or(Error::Unauthenticated)?;

    Ok(Session { account })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    #[tokio::test]
    async fn test_resolve_session_known_subject() -> Result<()> {
        let db = setup_test_db().await?;
        let worker = create_test_account(&db, "asha", Role::Worker).await?;
        let provider = StubIdentityProvider;

        let session = resolve_session(&db, &provider, &worker.auth_id).await?;
        assert_eq!(session.account.id, worker.id);

        Ok(())
    }

    #[tokio::test]
    async fn test_resolve_session_rejects_unknown_or_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let provider = StubIdentityProvider;

        let result = resolve_session(&db, &provider, "auth-nobody").await;
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated));

        let result = resolve_session(&db, &provider, "  ").await;
        assert!(matches!(result.unwrap_err(), Error::Unauthenticated));

        Ok(())
    }

    #[tokio::test]
    async fn test_role_gates() -> Result<()> {
        let db = setup_test_db().await?;
        let provider = StubIdentityProvider;
        let pending = create_test_account(&db, "newhire", Role::Pending).await?;
        let worker = create_test_account(&db, "asha", Role::Worker).await?;
        let admin = create_test_account(&db, "omar", Role::Admin).await?;

        // Pending accounts authenticate but pass neither gate
        let session = resolve_session(&db, &provider, &pending.auth_id).await?;
        assert!(matches!(
            session.require_worker().unwrap_err(),
            Error::Forbidden { required: "worker" }
        ));
        assert!(session.require_admin().is_err());

        let session = resolve_session(&db, &provider, &worker.auth_id).await?;
        assert!(session.require_worker().is_ok());
        assert!(matches!(
            session.require_admin().unwrap_err(),
            Error::Forbidden { required: "admin" }
        ));

        let session = resolve_session(&db, &provider, &admin.auth_id).await?;
        assert!(session.require_admin().is_ok());
        assert!(session.require_worker().is_err());

        Ok(())
    }
}
