//! Generation form state and request derivation.
//!
//! The form owns the draft request fields (prompt, platform, tone,
//! audience, word count, mode) and derives three things from them: the
//! generate request payload, the item draft saved after generation, and
//! the default title for that draft.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScribeError};
use crate::image::ImageAnalysis;
use crate::item::{ItemDraft, Mode, Platform, Tone};

/// Lower bound for the requested word count.
pub const MIN_WORD_COUNT: u32 = 60;
/// Upper bound for the requested word count.
pub const MAX_WORD_COUNT: u32 = 1200;

/// Preset word counts offered per mode; the middle one is the default.
pub fn word_presets(mode: Mode) -> [u32; 3] {
    match mode {
        Mode::Blog => [400, 600, 900],
        Mode::Social => [80, 120, 180],
    }
}

/// Sampling temperature used when the form carries no override.
pub fn default_temperature(mode: Mode) -> f32 {
    match mode {
        Mode::Social => 0.7,
        Mode::Blog => 0.6,
    }
}

/// Generator label recorded on items saved in this mode.
pub fn model_label(mode: Mode) -> &'static str {
    match mode {
        Mode::Social => "llama-3.1-8b",
        Mode::Blog => "llama-3.1-70b",
    }
}

/// Derives a display title from generated text.
///
/// Takes the first segment before a newline, sentence end (`. `) or
/// question mark, trimmed; falls back to the prompt when that segment is
/// empty. Titles longer than 70 characters are cut to 67 plus an ellipsis.
pub fn derive_title(text: &str, fallback: &str) -> String {
    let cut = ["\n", ". ", "?"]
        .iter()
        .filter_map(|sep| text.find(sep))
        .min()
        .unwrap_or(text.len());
    let first = text[..cut].trim();
    let title = if first.is_empty() { fallback.trim() } else { first };

    if title.chars().count() > 70 {
        let head: String = title.chars().take(67).collect();
        return format!("{}...", head);
    }
    if title.is_empty() {
        return "Untitled".to_string();
    }
    title.to_string()
}

/// The payload of a generate call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub prompt: String,
    pub platform: Platform,
    pub tone: Tone,
    pub audience: String,
    pub word_count: u32,
    pub mode: Mode,
    pub temperature: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_captions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tags: Option<Vec<Vec<String>>>,
}

/// An abstract gateway to the backend's generation endpoint.
#[async_trait::async_trait]
pub trait GenerationGateway: Send + Sync {
    /// Requests content generation and returns the generated text.
    async fn generate(&self, request: &GenerateRequest) -> Result<String>;
}

/// Draft request fields for one generation, with derivation rules.
///
/// Word count is clamped to [`MIN_WORD_COUNT`]..=[`MAX_WORD_COUNT`] and
/// snaps to the mode's middle preset when the mode changes, so the form
/// never carries a count that makes no sense for the selected shape.
#[derive(Debug, Clone)]
pub struct GenerationForm {
    /// Free-text topic prompt; image analysis blocks are merged into it.
    pub prompt: String,
    pub platform: Platform,
    pub tone: Tone,
    /// Target audience description sent verbatim to the generator.
    pub audience: String,
    /// Explicit temperature override; `None` uses the mode default.
    pub temperature: Option<f32>,
    word_count: u32,
    mode: Mode,
}

impl GenerationForm {
    pub fn new() -> Self {
        Self {
            prompt: String::new(),
            platform: Platform::Linkedin,
            tone: Tone::Professional,
            audience: "SMBs / startups".to_string(),
            temperature: None,
            word_count: 120,
            mode: Mode::Social,
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Switches the output mode, snapping the word count to the new mode's
    /// middle preset. Setting the current mode again changes nothing.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.word_count = word_presets(mode)[1];
    }

    pub fn word_count(&self) -> u32 {
        self.word_count
    }

    /// Sets the target word count, clamped to the allowed range.
    pub fn set_word_count(&mut self, words: u32) {
        self.word_count = words.clamp(MIN_WORD_COUNT, MAX_WORD_COUNT);
    }

    /// Temperature that will actually be sent: the override when present,
    /// otherwise the mode default.
    pub fn effective_temperature(&self) -> f32 {
        self.temperature
            .unwrap_or_else(|| default_temperature(self.mode))
    }

    /// Appends one image analysis block to the prompt.
    ///
    /// Block shape: `Image {index}: {caption}`, a `Tags: a, b` line only
    /// when tags are non-empty, then a `----` separator, all joined to the
    /// existing prompt with newlines. Append-only; earlier blocks are never
    /// reordered or removed.
    pub fn merge_analysis_block(&mut self, index: usize, analysis: &ImageAnalysis) {
        let mut parts: Vec<String> = Vec::new();
        let existing = self.prompt.trim();
        if !existing.is_empty() {
            parts.push(existing.to_string());
        }
        parts.push(format!("Image {}: {}", index, analysis.caption));
        if !analysis.tags.is_empty() {
            parts.push(format!("Tags: {}", analysis.tags.join(", ")));
        }
        parts.push("----".to_string());
        self.prompt = parts.join("\n");
    }

    /// Builds the generate payload.
    ///
    /// # Arguments
    ///
    /// * `image_captions` - Captions accumulated by the intake pipeline
    /// * `image_tags` - Tag lists parallel to `image_captions`
    ///
    /// # Returns
    ///
    /// - `Ok(GenerateRequest)`: Ready to send
    /// - `Err(ScribeError::Validation)`: The prompt is empty or whitespace
    pub fn payload(
        &self,
        image_captions: &[String],
        image_tags: &[Vec<String>],
    ) -> Result<GenerateRequest> {
        if self.prompt.trim().is_empty() {
            return Err(ScribeError::validation("Prompt must not be empty."));
        }

        Ok(GenerateRequest {
            prompt: self.prompt.clone(),
            platform: self.platform,
            tone: self.tone,
            audience: self.audience.clone(),
            word_count: self.word_count,
            mode: self.mode,
            temperature: self.effective_temperature(),
            image_captions: if image_captions.is_empty() {
                None
            } else {
                Some(image_captions.to_vec())
            },
            image_tags: if image_tags.is_empty() {
                None
            } else {
                Some(image_tags.to_vec())
            },
        })
    }

    /// Builds the item draft saved after a successful generation.
    ///
    /// Title comes from [`derive_title`] with the prompt as fallback; tags
    /// are the platform and tone labels; new items are never pinned.
    pub fn draft(&self, content: &str) -> ItemDraft {
        ItemDraft {
            title: Some(derive_title(content, &self.prompt)),
            content: content.to_string(),
            platform: self.platform,
            tone: self.tone,
            mode: self.mode,
            words: self.word_count,
            model: Some(model_label(self.mode).to_string()),
            tags: vec![self.platform.to_string(), self.tone.to_string()],
            pinned: false,
        }
    }
}

impl Default for GenerationForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis(caption: &str, tags: &[&str]) -> ImageAnalysis {
        ImageAnalysis {
            caption: caption.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            model: "vision-1".to_string(),
        }
    }

    #[test]
    fn test_defaults() {
        let form = GenerationForm::new();
        assert_eq!(form.platform, Platform::Linkedin);
        assert_eq!(form.tone, Tone::Professional);
        assert_eq!(form.mode(), Mode::Social);
        assert_eq!(form.word_count(), 120);
        assert_eq!(form.audience, "SMBs / startups");
    }

    #[test]
    fn test_word_count_clamped() {
        let mut form = GenerationForm::new();
        form.set_word_count(30);
        assert_eq!(form.word_count(), MIN_WORD_COUNT);
        form.set_word_count(5000);
        assert_eq!(form.word_count(), MAX_WORD_COUNT);
        form.set_word_count(600);
        assert_eq!(form.word_count(), 600);
    }

    #[test]
    fn test_mode_switch_snaps_middle_preset() {
        let mut form = GenerationForm::new();
        form.set_mode(Mode::Blog);
        assert_eq!(form.word_count(), 600);
        form.set_mode(Mode::Social);
        assert_eq!(form.word_count(), 120);
    }

    #[test]
    fn test_same_mode_keeps_word_count() {
        let mut form = GenerationForm::new();
        form.set_word_count(180);
        form.set_mode(Mode::Social);
        assert_eq!(form.word_count(), 180);
    }

    #[test]
    fn test_temperature_default_and_override() {
        let mut form = GenerationForm::new();
        assert_eq!(form.effective_temperature(), 0.7);
        form.set_mode(Mode::Blog);
        assert_eq!(form.effective_temperature(), 0.6);
        form.temperature = Some(0.9);
        assert_eq!(form.effective_temperature(), 0.9);
    }

    #[test]
    fn test_derive_title_first_sentence() {
        assert_eq!(
            derive_title("We shipped. Here is why it matters.", "fallback"),
            "We shipped"
        );
        assert_eq!(derive_title("Line one\nLine two", "fallback"), "Line one");
        assert_eq!(derive_title("Ready to scale? Yes.", "fallback"), "Ready to scale");
    }

    #[test]
    fn test_derive_title_fallback_and_untitled() {
        assert_eq!(derive_title("", "the prompt"), "the prompt");
        assert_eq!(derive_title("   \nrest", "  "), "Untitled");
    }

    #[test]
    fn test_derive_title_truncates_long_text() {
        let long = "x".repeat(80);
        let title = derive_title(&long, "");
        assert_eq!(title.chars().count(), 70);
        assert!(title.ends_with("..."));
        assert!(title.starts_with(&"x".repeat(67)));
    }

    #[test]
    fn test_merge_blocks_in_submission_order() {
        let mut form = GenerationForm::new();
        form.merge_analysis_block(1, &analysis("C1", &["x"]));
        form.merge_analysis_block(2, &analysis("C2", &[]));

        let prompt = form.prompt.clone();
        let i1 = prompt.find("Image 1: C1").unwrap();
        let t1 = prompt.find("Tags: x").unwrap();
        let i2 = prompt.find("Image 2: C2").unwrap();
        assert!(i1 < t1 && t1 < i2);
        // no tags line for the second image
        assert_eq!(prompt.matches("Tags:").count(), 1);
    }

    #[test]
    fn test_merge_keeps_existing_prompt_text() {
        let mut form = GenerationForm::new();
        form.prompt = "Announce the beta launch".to_string();
        form.merge_analysis_block(1, &analysis("A rocket on a launchpad", &["rocket"]));

        assert_eq!(
            form.prompt,
            "Announce the beta launch\nImage 1: A rocket on a launchpad\nTags: rocket\n----"
        );
    }

    #[test]
    fn test_payload_rejects_empty_prompt() {
        let form = GenerationForm::new();
        let err = form.payload(&[], &[]).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_payload_omits_empty_image_fields() {
        let mut form = GenerationForm::new();
        form.prompt = "topic".to_string();

        let bare = form.payload(&[], &[]).unwrap();
        assert!(bare.image_captions.is_none());
        assert!(bare.image_tags.is_none());
        assert_eq!(bare.temperature, 0.7);

        let captions = vec!["C1".to_string()];
        let tags = vec![vec!["x".to_string()]];
        let with_images = form.payload(&captions, &tags).unwrap();
        assert_eq!(with_images.image_captions.as_deref(), Some(&captions[..]));
    }

    #[test]
    fn test_draft_derivation() {
        let mut form = GenerationForm::new();
        form.prompt = "Announce the beta".to_string();
        form.set_mode(Mode::Blog);

        let draft = form.draft("The beta is live. Sign up today.");
        assert_eq!(draft.title.as_deref(), Some("The beta is live"));
        assert_eq!(draft.model.as_deref(), Some("llama-3.1-70b"));
        assert_eq!(draft.tags, vec!["linkedin", "professional"]);
        assert_eq!(draft.words, 600);
        assert!(!draft.pinned);
    }
}
