use std::path::PathBuf;

use anyhow::Result;
use scribe_application::ImageIntake;
use scribe_core::generation::GenerationForm;
use scribe_core::image::ImageFile;
use scribe_infrastructure::PreviewStore;

use crate::app::App;

/// Runs the intake pipeline and prints the analyses without generating.
pub async fn run(paths: &[PathBuf]) -> Result<()> {
    let app = App::init().await?;

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        files.push(ImageFile::from_path(path)?);
    }

    // Throwaway form; only the analysis results are shown.
    let mut form = GenerationForm::new();
    let mut intake = ImageIntake::new(app.images(), PreviewStore::new()?);
    let report = intake.ingest(&files, &mut form).await?;

    for (index, analysis) in intake.results().iter().enumerate() {
        println!("Image {}: {}", index + 1, analysis.caption);
        if !analysis.tags.is_empty() {
            println!("  tags: {}", analysis.tags.join(", "));
        }
        if !analysis.model.is_empty() {
            println!("  model: {}", analysis.model);
        }
    }
    if report.failed > 0 {
        println!("{} file(s) failed to analyze", report.failed);
    }

    intake.release_previews();
    Ok(())
}
