//! Image intake types and validation.
//!
//! A batch of user-selected files is validated as a whole before any
//! network call: every file must be an image and fit the size ceiling, and
//! the first violation rejects the entire batch. Analysis results come back
//! from the backend per file and are ephemeral; they live only for the
//! generation-form session that produced them.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScribeError};

/// Upload size ceiling per image: 12 MiB.
pub const MAX_IMAGE_BYTES: u64 = 12 * 1024 * 1024;

/// A local image file staged for analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// Display name, usually the file name the user picked.
    pub file_name: String,
    /// MIME type guessed from the file name, e.g. `image/png`.
    pub media_type: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn new(file_name: impl Into<String>, media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            bytes,
        }
    }

    /// Reads a file from disk and guesses its media type from the name.
    pub fn from_path(path: &Path) -> Result<Self> {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ScribeError::validation(format!("\"{}\" is not a file path.", path.display()))
            })?;
        let media_type = mime_guess::from_path(path)
            .first_raw()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = std::fs::read(path)?;

        Ok(Self {
            file_name,
            media_type,
            bytes,
        })
    }

    /// True when the media type is `image/*`.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with("image/")
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Checks media type and size ceiling for this single file.
    pub fn validate(&self) -> Result<()> {
        if !self.is_image() {
            return Err(ScribeError::validation(format!(
                "\"{}\" is not an image file.",
                self.file_name
            )));
        }
        if self.size() > MAX_IMAGE_BYTES {
            return Err(ScribeError::validation(format!(
                "\"{}\" is larger than 12MB.",
                self.file_name
            )));
        }
        Ok(())
    }
}

/// Validates a whole batch before any processing starts.
///
/// All-or-nothing: the first offending file rejects the batch and no file
/// in it may be analyzed.
pub fn validate_batch(files: &[ImageFile]) -> Result<()> {
    for file in files {
        file.validate()?;
    }
    Ok(())
}

/// Backend-produced caption and tags for one uploaded image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAnalysis {
    /// Short description of the image, at most a sentence or two.
    pub caption: String,
    /// Normalized lowercase tags, typically 3 to 8.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Label of the vision model that produced the analysis.
    #[serde(default)]
    pub model: String,
}

/// Body of an attach call folding one analysis into a created item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageAttachment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub caption: String,
    pub tags: Vec<String>,
}

impl From<&ImageAnalysis> for ImageAttachment {
    fn from(analysis: &ImageAnalysis) -> Self {
        Self {
            url: None,
            caption: analysis.caption.clone(),
            tags: analysis.tags.clone(),
        }
    }
}

/// An abstract gateway to the backend's image endpoints.
#[async_trait::async_trait]
pub trait ImageGateway: Send + Sync {
    /// Uploads one image for captioning and tagging.
    ///
    /// # Returns
    ///
    /// - `Ok(ImageAnalysis)`: Caption, tags and model label for this file
    /// - `Err(ScribeError)`: Upload or analysis failure for this file only
    async fn analyze(&self, file: &ImageFile) -> Result<ImageAnalysis>;

    /// Attaches one analysis result to an already-created item.
    ///
    /// A failure here must not affect the created item or sibling
    /// attachments.
    async fn attach(&self, item_id: &str, attachment: &ImageAttachment) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(name: &str, len: usize) -> ImageFile {
        ImageFile::new(name, "image/png", vec![0u8; len])
    }

    #[test]
    fn test_batch_with_non_image_rejected() {
        let files = vec![png("a.png", 10), ImageFile::new("notes.pdf", "application/pdf", vec![0u8; 10])];
        let err = validate_batch(&files).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("notes.pdf"));
    }

    #[test]
    fn test_batch_with_oversized_file_rejected() {
        let files = vec![png("huge.png", (MAX_IMAGE_BYTES + 1) as usize)];
        let err = validate_batch(&files).unwrap_err();
        assert!(err.to_string().contains("\"huge.png\" is larger than 12MB."));
    }

    #[test]
    fn test_batch_at_ceiling_accepted() {
        let files = vec![png("exact.png", MAX_IMAGE_BYTES as usize), png("b.jpg", 1)];
        assert!(validate_batch(&files).is_ok());
    }

    #[test]
    fn test_from_path_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.jpg");
        std::fs::write(&path, b"not really a jpeg").unwrap();

        let file = ImageFile::from_path(&path).unwrap();
        assert_eq!(file.file_name, "photo.jpg");
        assert_eq!(file.media_type, "image/jpeg");
        assert!(file.is_image());
    }

    #[test]
    fn test_attachment_from_analysis_has_no_url() {
        let analysis = ImageAnalysis {
            caption: "A whiteboard covered in diagrams".to_string(),
            tags: vec!["whiteboard".to_string(), "office".to_string()],
            model: "vision-1".to_string(),
        };
        let attachment = ImageAttachment::from(&analysis);
        assert_eq!(attachment.caption, analysis.caption);
        assert_eq!(attachment.tags, analysis.tags);
        assert!(attachment.url.is_none());
    }
}
