use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use scribe_application::{ImageIntake, StudioUseCase};
use scribe_core::generation::GenerationForm;
use scribe_core::image::ImageFile;
use scribe_infrastructure::PreviewStore;

use crate::app::App;
use crate::commands::utils;

#[derive(Args)]
pub struct GenerateArgs {
    /// Topic prompt for the generator
    #[arg(long)]
    pub prompt: String,
    /// Target platform: linkedin, instagram, facebook or blog
    #[arg(long, default_value = "linkedin")]
    pub platform: String,
    /// Writing tone: professional, friendly, witty or persuasive
    #[arg(long, default_value = "professional")]
    pub tone: String,
    /// Output shape: social or blog
    #[arg(long, default_value = "social")]
    pub mode: String,
    /// Target audience description
    #[arg(long)]
    pub audience: Option<String>,
    /// Target word count
    #[arg(long)]
    pub words: Option<u32>,
    /// Sampling temperature override
    #[arg(long)]
    pub temperature: Option<f32>,
    /// Image file to analyze and fold into the prompt (repeatable)
    #[arg(long = "image")]
    pub images: Vec<PathBuf>,
    /// Print the generated text without saving an item
    #[arg(long)]
    pub no_save: bool,
}

pub async fn run(args: GenerateArgs) -> Result<()> {
    let app = App::init().await?;

    // Mode first: it snaps the word count, which --words may then override.
    let mut form = GenerationForm::new();
    form.set_mode(utils::parse_mode(&args.mode)?);
    form.prompt = args.prompt;
    form.platform = utils::parse_platform(&args.platform)?;
    form.tone = utils::parse_tone(&args.tone)?;
    if let Some(audience) = args.audience {
        form.audience = audience;
    }
    form.temperature = args.temperature;
    if let Some(words) = args.words {
        form.set_word_count(words);
    }

    let mut intake = ImageIntake::new(app.images(), PreviewStore::new()?);
    if !args.images.is_empty() {
        let mut files = Vec::with_capacity(args.images.len());
        for path in &args.images {
            files.push(ImageFile::from_path(path)?);
        }
        let report = intake.ingest(&files, &mut form).await?;
        println!(
            "🖼  Analyzed {} image(s), {} failed",
            report.analyzed, report.failed
        );
    }

    let studio = StudioUseCase::new(app.generation(), app.items(), app.images());

    if args.no_save {
        let content = studio
            .generate(&form, &intake.captions(), &intake.tag_lists())
            .await?;
        println!("{}", content);
    } else {
        let outcome = studio.generate_and_save(&form, intake.results()).await?;
        println!("{}", outcome.item.content);
        println!();
        println!("✅ Saved as {} ({})", outcome.item.id, outcome.item.title);
        if outcome.attached > 0 || outcome.attach_failures > 0 {
            println!(
                "   {} image(s) attached, {} failed",
                outcome.attached, outcome.attach_failures
            );
        }
    }

    intake.release_previews();
    Ok(())
}
