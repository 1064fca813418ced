//! Auth session types and gateway contract.
//!
//! The session is an explicit context object rather than ambient global
//! state: created on login/register success, read by every authenticated
//! call through a shared handle, cleared on logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;

use crate::error::Result;

/// Credentials proof returned by the backend on successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Bearer token attached to authenticated requests.
    pub access_token: String,
    /// Backend id of the logged-in user.
    pub user_id: String,
}

/// Account info returned by a successful registration.
///
/// Registering does not create a session; the caller logs in afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: String,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

/// Shared handle to the current session, if any.
///
/// Cloning the handle shares the same underlying slot, so the gateway
/// connection and the session usecase always observe the same state.
#[derive(Debug, Clone, Default)]
pub struct SessionHandle {
    inner: Arc<RwLock<Option<AuthSession>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current session.
    pub async fn current(&self) -> Option<AuthSession> {
        self.inner.read().await.clone()
    }

    /// Bearer token of the current session, when one exists.
    pub async fn bearer_token(&self) -> Option<String> {
        self.inner.read().await.as_ref().map(|s| s.access_token.clone())
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_some()
    }

    /// Installs a new session, replacing any previous one.
    pub async fn replace(&self, session: AuthSession) {
        *self.inner.write().await = Some(session);
    }

    /// Drops the current session.
    pub async fn clear(&self) {
        *self.inner.write().await = None;
    }
}

/// An abstract gateway to the backend's auth endpoints.
#[async_trait::async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchanges username and password for a session.
    async fn login(&self, username: &str, password: &str) -> Result<AuthSession>;

    /// Creates a new account. Does not log in.
    async fn register(&self, username: &str, password: &str) -> Result<RegisteredUser>;

    /// Exchanges a Google ID token for a session.
    async fn login_with_google(&self, id_token: &str) -> Result<AuthSession>;
}
