//! Assistant chat gateway contract.

use crate::error::Result;

/// An abstract gateway to the backend's conversational assistant.
#[async_trait::async_trait]
pub trait AgentGateway: Send + Sync {
    /// Sends one user message and returns the assistant's reply.
    async fn chat(&self, message: &str) -> Result<String>;
}
