//! HTTP implementation of the assistant chat gateway.

use async_trait::async_trait;
use reqwest::Method;
use scribe_core::Result;
use scribe_core::agent::AgentGateway;
use serde::{Deserialize, Serialize};

use crate::connection::{ApiConnection, read_json};

/// Assistant chat endpoint over the shared connection.
#[derive(Debug, Clone)]
pub struct HttpAgentGateway {
    connection: ApiConnection,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: String,
}

impl HttpAgentGateway {
    pub fn new(connection: ApiConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl AgentGateway for HttpAgentGateway {
    async fn chat(&self, message: &str) -> Result<String> {
        let request = self
            .connection
            .request(Method::POST, "/agent/chat")
            .await
            .json(&ChatRequest { message });
        let response = self.connection.send(request).await?;
        let body: ChatResponse = read_json(response).await?;
        Ok(body.response)
    }
}
