//! Session lifecycle: login, register, restore, logout.
//!
//! The in-memory [`SessionHandle`] is shared with the gateway connection,
//! so installing a session here is what makes subsequent requests carry
//! the bearer header. The on-disk store keeps the session across runs;
//! memory and disk are updated together on every transition.

use std::sync::Arc;

use scribe_core::Result;
use scribe_core::auth::{AuthGateway, AuthSession, RegisteredUser, SessionHandle};
use scribe_infrastructure::SessionStorage;

/// Drives session transitions over the auth gateway and session store.
pub struct SessionUseCase {
    gateway: Arc<dyn AuthGateway>,
    handle: SessionHandle,
    storage: SessionStorage,
}

impl SessionUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>, handle: SessionHandle, storage: SessionStorage) -> Self {
        Self {
            gateway,
            handle,
            storage,
        }
    }

    /// Loads the persisted session into the shared handle, if one exists.
    ///
    /// Called once at startup, before the first request.
    pub async fn restore(&self) -> Result<Option<AuthSession>> {
        match self.storage.load()? {
            Some(session) => {
                self.handle.replace(session.clone()).await;
                tracing::debug!(
                    target: "scribe::session",
                    user_id = %session.user_id,
                    "restored session"
                );
                Ok(Some(session))
            }
            None => Ok(None),
        }
    }

    /// Exchanges credentials for a session, installing and persisting it.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let session = self.gateway.login(username, password).await?;
        self.storage.save(&session)?;
        self.handle.replace(session.clone()).await;
        Ok(session)
    }

    /// Exchanges a Google ID token for a session, installing and
    /// persisting it.
    pub async fn login_with_google(&self, id_token: &str) -> Result<AuthSession> {
        let session = self.gateway.login_with_google(id_token).await?;
        self.storage.save(&session)?;
        self.handle.replace(session.clone()).await;
        Ok(session)
    }

    /// Creates a new account. The caller logs in separately afterwards.
    pub async fn register(&self, username: &str, password: &str) -> Result<RegisteredUser> {
        self.gateway.register(username, password).await
    }

    /// Drops the active session from memory and disk.
    pub async fn logout(&self) -> Result<()> {
        self.handle.clear().await;
        self.storage.clear()?;
        tracing::info!(target: "scribe::session", "logged out");
        Ok(())
    }

    /// Snapshot of the active session.
    pub async fn current(&self) -> Option<AuthSession> {
        self.handle.current().await
    }
}
