//! # Session Repository
//!
//! Login/setup flags under the `session` key. Not a security boundary,
//! just a convenience latch for the CLI's login gate and first-run setup.

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::repository::keys;
use crate::store::Store;
use quill_core::Session;

/// Repository for the session record.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    store: Store,
}

impl SessionRepository {
    /// Creates a new SessionRepository.
    pub fn new(store: Store) -> Self {
        SessionRepository { store }
    }

    /// Loads the session, defaulting to logged-out when none is stored.
    pub async fn get(&self) -> StoreResult<Session> {
        let Some(json) = self.store.get_raw(keys::SESSION).await? else {
            return Ok(Session::default());
        };

        serde_json::from_str(&json).map_err(|source| StoreError::CorruptDocument {
            key: keys::SESSION.to_string(),
            source,
        })
    }

    /// Saves the session record.
    pub async fn save(&self, session: &Session) -> StoreResult<()> {
        let json = serde_json::to_string(session).map_err(StoreError::Encode)?;
        self.store.put_raw(keys::SESSION, &json).await
    }

    /// Marks the session as authenticated for the given email.
    pub async fn login(&self, email: &str) -> StoreResult<()> {
        let mut session = self.get().await?;
        session.is_authenticated = true;
        session.user_email = Some(email.to_string());
        self.save(&session).await?;

        debug!(email = %email, "Session logged in");
        Ok(())
    }

    /// Clears the authenticated flag. Setup state is kept.
    pub async fn logout(&self) -> StoreResult<()> {
        let mut session = self.get().await?;
        session.is_authenticated = false;
        session.user_email = None;
        self.save(&session).await?;

        debug!("Session logged out");
        Ok(())
    }

    /// Marks first-run setup as complete.
    pub async fn mark_setup_complete(&self) -> StoreResult<()> {
        let mut session = self.get().await?;
        session.setup_complete = true;
        self.save(&session).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreConfig;

    #[tokio::test]
    async fn test_default_session_is_logged_out() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let session = store.session().get().await.unwrap();

        assert!(!session.is_authenticated);
        assert!(!session.setup_complete);
        assert_eq!(session.user_email, None);
    }

    #[tokio::test]
    async fn test_login_logout_cycle() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.session();

        repo.login("owner@acme.test").await.unwrap();
        let session = repo.get().await.unwrap();
        assert!(session.is_authenticated);
        assert_eq!(session.user_email.as_deref(), Some("owner@acme.test"));

        repo.logout().await.unwrap();
        let session = repo.get().await.unwrap();
        assert!(!session.is_authenticated);
        assert_eq!(session.user_email, None);
    }

    #[tokio::test]
    async fn test_setup_flag_survives_logout() {
        let store = Store::new(StoreConfig::in_memory()).await.unwrap();
        let repo = store.session();

        repo.mark_setup_complete().await.unwrap();
        repo.login("owner@acme.test").await.unwrap();
        repo.logout().await.unwrap();

        assert!(repo.get().await.unwrap().setup_complete);
    }
}
