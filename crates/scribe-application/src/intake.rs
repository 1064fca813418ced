//! Image intake pipeline: validate, preview, analyze, accumulate.
//!
//! A batch is validated as a whole before anything else happens; one bad
//! file means zero uploads. Valid files get a preview handle each, then go
//! to analysis one at a time in submission order, so the prompt blocks the
//! results merge into are deterministic. A failed analysis is logged and
//! skipped; it consumes no image index and does not disturb its siblings.

use std::sync::Arc;

use scribe_core::Result;
use scribe_core::generation::GenerationForm;
use scribe_core::image::{ImageAnalysis, ImageAttachment, ImageFile, ImageGateway, validate_batch};
use scribe_infrastructure::{PreviewHandle, PreviewStore};

/// Tally of one ingest run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntakeReport {
    /// Files analyzed successfully.
    pub analyzed: usize,
    /// Files whose analysis failed.
    pub failed: usize,
}

/// Accumulates image analysis results across one form session.
///
/// The image index only advances on success, and it never resets between
/// batches: ingesting two files, then one more, labels them
/// `Image 1` .. `Image 3`.
pub struct ImageIntake {
    gateway: Arc<dyn ImageGateway>,
    previews: PreviewStore,
    results: Vec<ImageAnalysis>,
    counter: usize,
}

impl ImageIntake {
    pub fn new(gateway: Arc<dyn ImageGateway>, previews: PreviewStore) -> Self {
        Self {
            gateway,
            previews,
            results: Vec::new(),
            counter: 0,
        }
    }

    /// Runs one batch through the pipeline, merging each successful result
    /// into the form's prompt.
    ///
    /// # Returns
    ///
    /// - `Ok(IntakeReport)`: Per-file analysis outcomes; failures inside
    ///   the batch do not fail the run
    /// - `Err(ScribeError::Validation)`: The batch was rejected up front
    ///   and nothing was uploaded
    pub async fn ingest(
        &mut self,
        files: &[ImageFile],
        form: &mut GenerationForm,
    ) -> Result<IntakeReport> {
        validate_batch(files)?;
        for file in files {
            self.previews.register(file)?;
        }

        let mut analyzed = 0;
        let mut failed = 0;
        for file in files {
            match self.gateway.analyze(file).await {
                Ok(analysis) => {
                    self.counter += 1;
                    form.merge_analysis_block(self.counter, &analysis);
                    tracing::info!(
                        target: "scribe::intake",
                        file = %file.file_name,
                        index = self.counter,
                        "image analyzed"
                    );
                    self.results.push(analysis);
                    analyzed += 1;
                }
                Err(e) => {
                    tracing::warn!(
                        target: "scribe::intake",
                        file = %file.file_name,
                        error = %e,
                        "image analysis failed"
                    );
                    failed += 1;
                }
            }
        }
        Ok(IntakeReport { analyzed, failed })
    }

    /// Captions accumulated so far, in analysis order.
    pub fn captions(&self) -> Vec<String> {
        self.results.iter().map(|a| a.caption.clone()).collect()
    }

    /// Tag lists parallel to [`captions`](Self::captions).
    pub fn tag_lists(&self) -> Vec<Vec<String>> {
        self.results.iter().map(|a| a.tags.clone()).collect()
    }

    /// Attachment bodies for every accumulated result.
    pub fn attachments(&self) -> Vec<ImageAttachment> {
        self.results.iter().map(ImageAttachment::from).collect()
    }

    /// All accumulated analysis results.
    pub fn results(&self) -> &[ImageAnalysis] {
        &self.results
    }

    /// Preview handles for every ingested file, in registration order.
    pub fn previews(&self) -> &[PreviewHandle] {
        self.previews.handles()
    }

    /// Releases every preview file. Accumulated results stay.
    pub fn release_previews(&mut self) {
        self.previews.release_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scribe_core::ScribeError;
    use std::collections::HashSet;
    use std::sync::Mutex;

    fn png(name: &str) -> ImageFile {
        ImageFile::new(name, "image/png", vec![0u8; 32])
    }

    // Mock ImageGateway for testing
    struct MockImageGateway {
        analyze_calls: Mutex<Vec<String>>,
        failing: Mutex<HashSet<String>>,
    }

    impl MockImageGateway {
        fn new() -> Self {
            Self {
                analyze_calls: Mutex::new(Vec::new()),
                failing: Mutex::new(HashSet::new()),
            }
        }

        fn fail_for(&self, name: &str) {
            self.failing.lock().unwrap().insert(name.to_string());
        }

        fn analyze_calls(&self) -> Vec<String> {
            self.analyze_calls.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl ImageGateway for MockImageGateway {
        async fn analyze(&self, file: &ImageFile) -> Result<ImageAnalysis> {
            self.analyze_calls.lock().unwrap().push(file.file_name.clone());
            if self.failing.lock().unwrap().contains(&file.file_name) {
                return Err(ScribeError::api(502, "vision model unavailable"));
            }
            Ok(ImageAnalysis {
                caption: format!("caption of {}", file.file_name),
                tags: vec!["office".to_string(), "team".to_string()],
                model: "vision-1".to_string(),
            })
        }

        async fn attach(&self, _item_id: &str, _attachment: &ImageAttachment) -> Result<()> {
            Err(ScribeError::internal("attach not used in these tests"))
        }
    }

    fn intake(gateway: &Arc<MockImageGateway>, dir: &std::path::Path) -> ImageIntake {
        let previews = PreviewStore::in_dir(dir).unwrap();
        ImageIntake::new(gateway.clone() as Arc<dyn ImageGateway>, previews)
    }

    #[tokio::test]
    async fn test_invalid_batch_uploads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(MockImageGateway::new());
        let mut intake = intake(&gateway, dir.path());
        let mut form = GenerationForm::new();

        let files = vec![
            png("ok.png"),
            ImageFile::new("notes.pdf", "application/pdf", vec![0u8; 32]),
        ];
        let err = intake.ingest(&files, &mut form).await.unwrap_err();
        assert!(err.is_validation());
        assert!(gateway.analyze_calls().is_empty());
        assert!(intake.previews().is_empty());
        assert_eq!(form.prompt, "");
    }

    #[tokio::test]
    async fn test_sequential_blocks_in_submission_order() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(MockImageGateway::new());
        let mut intake = intake(&gateway, dir.path());
        let mut form = GenerationForm::new();
        form.prompt = "Launch note".to_string();

        let report = intake
            .ingest(&[png("a.png"), png("b.png")], &mut form)
            .await
            .unwrap();
        assert_eq!(report, IntakeReport { analyzed: 2, failed: 0 });
        assert_eq!(gateway.analyze_calls(), vec!["a.png", "b.png"]);

        assert_eq!(
            form.prompt,
            "Launch note\n\
             Image 1: caption of a.png\n\
             Tags: office, team\n\
             ----\n\
             Image 2: caption of b.png\n\
             Tags: office, team\n\
             ----"
        );
        assert_eq!(intake.captions().len(), 2);
        assert_eq!(intake.tag_lists()[0], vec!["office", "team"]);
    }

    #[tokio::test]
    async fn test_failed_file_consumes_no_index() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(MockImageGateway::new());
        gateway.fail_for("bad.png");
        let mut intake = intake(&gateway, dir.path());
        let mut form = GenerationForm::new();

        let report = intake
            .ingest(&[png("a.png"), png("bad.png"), png("c.png")], &mut form)
            .await
            .unwrap();
        assert_eq!(report, IntakeReport { analyzed: 2, failed: 1 });

        // The failed file leaves no gap in the numbering.
        assert!(form.prompt.contains("Image 1: caption of a.png"));
        assert!(form.prompt.contains("Image 2: caption of c.png"));
        assert!(!form.prompt.contains("bad.png"));
        assert_eq!(intake.results().len(), 2);
    }

    #[tokio::test]
    async fn test_index_continues_across_batches() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(MockImageGateway::new());
        let mut intake = intake(&gateway, dir.path());
        let mut form = GenerationForm::new();

        intake.ingest(&[png("a.png")], &mut form).await.unwrap();
        intake.ingest(&[png("b.png")], &mut form).await.unwrap();

        assert!(form.prompt.contains("Image 1: caption of a.png"));
        assert!(form.prompt.contains("Image 2: caption of b.png"));
    }

    #[tokio::test]
    async fn test_previews_live_until_released() {
        let dir = tempfile::tempdir().unwrap();
        let gateway = Arc::new(MockImageGateway::new());
        let mut intake = intake(&gateway, dir.path());
        let mut form = GenerationForm::new();

        intake
            .ingest(&[png("a.png"), png("b.png")], &mut form)
            .await
            .unwrap();
        assert_eq!(intake.previews().len(), 2);
        for handle in intake.previews() {
            assert!(handle.path.exists());
        }
        let first_path = intake.previews()[0].path.clone();

        intake.release_previews();
        assert!(intake.previews().is_empty());
        assert!(!first_path.exists());
        // Results survive the release; only the preview files go.
        assert_eq!(intake.results().len(), 2);
    }
}
