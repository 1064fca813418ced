//! HTTP implementation of the generation gateway.

use async_trait::async_trait;
use reqwest::Method;
use scribe_core::Result;
use scribe_core::generation::{GenerateRequest, GenerationGateway};
use serde::Deserialize;

use crate::connection::{ApiConnection, read_json};

/// Generation endpoint over the shared connection.
#[derive(Debug, Clone)]
pub struct HttpGenerationGateway {
    connection: ApiConnection,
}

/// The backend echoes platform and mode; only the text matters here.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    result: String,
}

impl HttpGenerationGateway {
    pub fn new(connection: ApiConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl GenerationGateway for HttpGenerationGateway {
    async fn generate(&self, request: &GenerateRequest) -> Result<String> {
        tracing::info!(
            target: "scribe::gateway",
            platform = %request.platform,
            mode = %request.mode,
            words = request.word_count,
            "requesting generation"
        );
        let call = self
            .connection
            .request(Method::POST, "/generate")
            .await
            .json(request);
        let response = self.connection.send(call).await?;
        let body: GenerateResponse = read_json(response).await?;
        Ok(body.result)
    }
}
