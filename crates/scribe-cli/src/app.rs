//! Shared wiring for every subcommand.
//!
//! Loads the config, restores any persisted session into the shared
//! handle, and hands out gateways that all ride the same connection.

use std::sync::Arc;

use anyhow::Result;
use scribe_application::SessionUseCase;
use scribe_core::agent::AgentGateway;
use scribe_core::auth::{AuthGateway, SessionHandle};
use scribe_core::config::ClientConfig;
use scribe_core::generation::GenerationGateway;
use scribe_core::image::ImageGateway;
use scribe_core::item::ItemGateway;
use scribe_gateway::{
    ApiConnection, HttpAgentGateway, HttpAuthGateway, HttpGenerationGateway, HttpImageGateway,
    HttpItemGateway,
};
use scribe_infrastructure::{ConfigStorage, SessionStorage};

/// One wired client process: configuration, session, connection.
pub struct App {
    pub config: ClientConfig,
    pub connection: ApiConnection,
    pub sessions: SessionUseCase,
}

impl App {
    /// Builds the full stack and restores the persisted session, if any.
    pub async fn init() -> Result<Self> {
        let config = ConfigStorage::new()?.load()?;
        tracing::debug!(target: "scribe::cli", base_url = %config.base_url, "loaded config");
        let handle = SessionHandle::new();
        let connection = ApiConnection::new(&config, handle.clone())?;
        let sessions = SessionUseCase::new(
            Arc::new(HttpAuthGateway::new(connection.clone())) as Arc<dyn AuthGateway>,
            handle,
            SessionStorage::new()?,
        );
        sessions.restore().await?;

        Ok(Self {
            config,
            connection,
            sessions,
        })
    }

    pub fn items(&self) -> Arc<dyn ItemGateway> {
        Arc::new(HttpItemGateway::new(self.connection.clone()))
    }

    pub fn generation(&self) -> Arc<dyn GenerationGateway> {
        Arc::new(HttpGenerationGateway::new(self.connection.clone()))
    }

    pub fn images(&self) -> Arc<dyn ImageGateway> {
        Arc::new(HttpImageGateway::new(self.connection.clone()))
    }

    pub fn agent(&self) -> Arc<dyn AgentGateway> {
        Arc::new(HttpAgentGateway::new(self.connection.clone()))
    }
}
