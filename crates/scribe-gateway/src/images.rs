//! HTTP implementation of the image gateway.
//!
//! `analyze` uploads one file as multipart form data under the `file`
//! field; `attach` folds a finished analysis into an existing item. Both
//! are per-file calls so one bad image never poisons its siblings.

use async_trait::async_trait;
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use scribe_core::image::{ImageAnalysis, ImageAttachment, ImageFile, ImageGateway};
use scribe_core::{Result, ScribeError};

use crate::connection::{ApiConnection, read_json};

/// Image endpoints over the shared connection.
#[derive(Debug, Clone)]
pub struct HttpImageGateway {
    connection: ApiConnection,
}

impl HttpImageGateway {
    pub fn new(connection: ApiConnection) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl ImageGateway for HttpImageGateway {
    async fn analyze(&self, file: &ImageFile) -> Result<ImageAnalysis> {
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.file_name.clone())
            .mime_str(&file.media_type)
            .map_err(|e| {
                ScribeError::validation(format!(
                    "\"{}\" has an unusable media type: {e}",
                    file.file_name
                ))
            })?;
        let form = Form::new().part("file", part);

        tracing::info!(
            target: "scribe::gateway",
            file = %file.file_name,
            bytes = file.size(),
            "uploading image for analysis"
        );
        let request = self
            .connection
            .request(Method::POST, "/images/analyze")
            .await
            .multipart(form);
        let response = self.connection.send(request).await?;
        read_json(response).await
    }

    async fn attach(&self, item_id: &str, attachment: &ImageAttachment) -> Result<()> {
        let request = self
            .connection
            .request(Method::POST, &format!("/images/attach/{item_id}"))
            .await
            .json(attachment);
        self.connection.send(request).await?;
        Ok(())
    }
}
