//! Item domain model.
//!
//! An item is one generated content artifact as the backend persists it.
//! The backend is the source of truth: ids and timestamps are assigned
//! server-side, and every mutation returns the full updated record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Publication target for a generated item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Platform {
    Linkedin,
    Instagram,
    Facebook,
    Blog,
}

/// Writing tone requested from the generator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tone {
    Professional,
    Friendly,
    Witty,
    Persuasive,
}

/// Output shape: short social post or long-form blog article.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display, strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Mode {
    Social,
    Blog,
}

/// A persisted generated content record.
///
/// Instances only ever come from the backend (create, duplicate, patch and
/// list responses); the client never synthesizes one locally.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Opaque identifier, assigned by the backend on create. Immutable.
    pub id: String,
    /// Display title, possibly empty.
    #[serde(default)]
    pub title: String,
    /// Generated body text.
    pub content: String,
    /// Publication target the item was generated for.
    pub platform: Platform,
    /// Tone the item was generated with.
    pub tone: Tone,
    /// Social or blog output shape.
    pub mode: Mode,
    /// Target word count requested at generation time.
    #[serde(default)]
    pub words: u32,
    /// Label of the generator model used.
    #[serde(default)]
    pub model: Option<String>,
    /// Free-form tag list.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the item is pinned to the top of the library view.
    #[serde(default)]
    pub pinned: bool,
    /// Creation timestamp, assigned server-side. Immutable.
    pub created_at: DateTime<Utc>,
    /// Caption of the first attached image, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_caption: Option<String>,
    /// Tags of the first attached image, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tags: Option<Vec<String>>,
    /// URL of the first attached image, when any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Fields the client sends to create a new item.
///
/// The backend fills in `id` and `created_at` and returns the full record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub platform: Platform,
    pub tone: Tone,
    pub mode: Mode,
    pub words: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    pub pinned: bool,
}

/// A partial update for an existing item.
///
/// Only `title`, `content`, `tags` and `pinned` are patchable; `id` and
/// `created_at` are immutable and everything else is fixed at creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl ItemPatch {
    /// Builds a patch that only flips the pinned flag.
    pub fn pinned(value: bool) -> Self {
        Self {
            pinned: Some(value),
            ..Self::default()
        }
    }

    /// True when the patch carries no fields at all.
    ///
    /// The backend rejects empty patches with 400, so gateways check this
    /// before issuing the request.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.pinned.is_none()
    }
}
