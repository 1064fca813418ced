//! Library filter state.
//!
//! Holds the current query text, platform/tone selectors and page number.
//! Changing any selector resets the page to 1; this is a pure state
//! transition with no I/O of its own.

use serde::{Deserialize, Serialize};

use super::model::{Platform, Tone};

/// Number of items requested per paginated load.
///
/// A response with exactly this many items implies further pages exist; a
/// shorter response means the collection is exhausted.
pub const PAGE_SIZE: u32 = 20;

/// The filter a library load was issued under.
///
/// `None` selectors mean "all" and are omitted from the outgoing request
/// entirely, so the backend interprets absence as no filter. Equality on
/// this type is what the stale-response guard compares.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LibraryFilter {
    /// Free-text query matched against title and content. Empty = no query.
    #[serde(default)]
    pub query: String,
    /// Platform selector; `None` means all platforms.
    #[serde(default)]
    pub platform: Option<Platform>,
    /// Tone selector; `None` means all tones.
    #[serde(default)]
    pub tone: Option<Tone>,
}

impl LibraryFilter {
    /// True when no query text and no selectors are active.
    pub fn is_unfiltered(&self) -> bool {
        self.query.is_empty() && self.platform.is_none() && self.tone.is_none()
    }
}

/// Filter plus pagination cursor for the library view.
///
/// Any change to the filter resets the page to 1 before the next load;
/// unchanged assignments are no-ops and keep the current page.
#[derive(Debug, Clone)]
pub struct FilterState {
    filter: LibraryFilter,
    page: u32,
}

impl FilterState {
    pub fn new() -> Self {
        Self {
            filter: LibraryFilter::default(),
            page: 1,
        }
    }

    /// The active filter.
    pub fn filter(&self) -> &LibraryFilter {
        &self.filter
    }

    /// Current 1-based page number.
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Sets the free-text query. Returns true when the value changed (and
    /// the page was reset).
    pub fn set_query(&mut self, query: impl Into<String>) -> bool {
        let query = query.into();
        if self.filter.query == query {
            return false;
        }
        self.filter.query = query;
        self.page = 1;
        true
    }

    /// Sets the platform selector (`None` = all). Returns true when the
    /// value changed.
    pub fn set_platform(&mut self, platform: Option<Platform>) -> bool {
        if self.filter.platform == platform {
            return false;
        }
        self.filter.platform = platform;
        self.page = 1;
        true
    }

    /// Sets the tone selector (`None` = all). Returns true when the value
    /// changed.
    pub fn set_tone(&mut self, tone: Option<Tone>) -> bool {
        if self.filter.tone == tone {
            return false;
        }
        self.filter.tone = tone;
        self.page = 1;
        true
    }

    /// Replaces the whole filter at once, resetting the page when anything
    /// differs.
    pub fn set_filter(&mut self, filter: LibraryFilter) -> bool {
        if self.filter == filter {
            return false;
        }
        self.filter = filter;
        self.page = 1;
        true
    }

    /// Advances to the next page and returns the new page number.
    pub fn advance_page(&mut self) -> u32 {
        self.page += 1;
        self.page
    }

    /// Rewinds the cursor to the first page without touching the filter.
    pub fn reset_page(&mut self) {
        self.page = 1;
    }
}

impl Default for FilterState {
    fn default() -> Self {
        Self::new()
    }
}
