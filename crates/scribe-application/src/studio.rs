//! Studio flow: generate content, save it as an item, attach the images.
//!
//! The item create is the committing step. Image attachments are follow-up
//! calls issued concurrently once the item id exists; any of them may fail
//! without rolling back the item or the sibling attachments.

use std::sync::Arc;

use futures::future::join_all;
use scribe_core::Result;
use scribe_core::generation::{GenerationForm, GenerationGateway};
use scribe_core::image::{ImageAnalysis, ImageAttachment, ImageGateway};
use scribe_core::item::{Item, ItemGateway};

/// What a completed generate-and-save run produced.
#[derive(Debug, Clone)]
pub struct StudioOutcome {
    /// The stored item, exactly as the backend returned it.
    pub item: Item,
    /// Attachments the backend confirmed.
    pub attached: usize,
    /// Attachments that failed; the item itself is unaffected.
    pub attach_failures: usize,
}

/// Coordinates the generation, item and image gateways for one run.
pub struct StudioUseCase {
    generation: Arc<dyn GenerationGateway>,
    items: Arc<dyn ItemGateway>,
    images: Arc<dyn ImageGateway>,
}

impl StudioUseCase {
    pub fn new(
        generation: Arc<dyn GenerationGateway>,
        items: Arc<dyn ItemGateway>,
        images: Arc<dyn ImageGateway>,
    ) -> Self {
        Self {
            generation,
            items,
            images,
        }
    }

    /// Generates content without saving anything.
    pub async fn generate(
        &self,
        form: &GenerationForm,
        captions: &[String],
        tag_lists: &[Vec<String>],
    ) -> Result<String> {
        let payload = form.payload(captions, tag_lists)?;
        self.generation.generate(&payload).await
    }

    /// Full flow: generate, save the draft as an item, then attach every
    /// accumulated analysis to the new item.
    pub async fn generate_and_save(
        &self,
        form: &GenerationForm,
        analyses: &[ImageAnalysis],
    ) -> Result<StudioOutcome> {
        let captions: Vec<String> = analyses.iter().map(|a| a.caption.clone()).collect();
        let tag_lists: Vec<Vec<String>> = analyses.iter().map(|a| a.tags.clone()).collect();
        let payload = form.payload(&captions, &tag_lists)?;

        let content = self.generation.generate(&payload).await?;
        let draft = form.draft(&content);
        let item = self.items.create(&draft).await?;
        tracing::info!(target: "scribe::studio", id = %item.id, "saved generated item");

        let attachments: Vec<ImageAttachment> =
            analyses.iter().map(ImageAttachment::from).collect();
        let calls = attachments
            .iter()
            .map(|attachment| self.images.attach(&item.id, attachment));
        let outcomes = join_all(calls).await;

        let mut attached = 0;
        let mut attach_failures = 0;
        for (outcome, attachment) in outcomes.iter().zip(&attachments) {
            match outcome {
                Ok(()) => attached += 1,
                Err(e) => {
                    attach_failures += 1;
                    tracing::warn!(
                        target: "scribe::studio",
                        id = %item.id,
                        caption = %attachment.caption,
                        error = %e,
                        "image attach failed"
                    );
                }
            }
        }

        Ok(StudioOutcome {
            item,
            attached,
            attach_failures,
        })
    }
}
