//! Item gateway trait.
//!
//! Defines the remote boundary for the item collection. One request per
//! call; no caching, no retries. The backend is authoritative: every
//! mutation returns the full record the client must adopt.

use super::filter::LibraryFilter;
use super::model::{Item, ItemDraft, ItemPatch};
use crate::error::Result;

/// An abstract gateway to the backend's item-collection endpoints.
///
/// This trait decouples the library view model from the concrete HTTP
/// client, which keeps the view model testable against in-memory fakes.
///
/// # Implementation Notes
///
/// Implementations should:
/// - Omit "all" selectors from the list request rather than sending them
/// - Attach the session's bearer token whenever a session exists
/// - Forward non-2xx response bodies as the error message text
#[async_trait::async_trait]
pub trait ItemGateway: Send + Sync {
    /// Fetches one page of items under the given filter.
    ///
    /// # Arguments
    ///
    /// * `filter` - Query text and selectors; `None` selectors are omitted
    /// * `page` - 1-based page number
    /// * `page_size` - Requested item count per page
    ///
    /// # Returns
    ///
    /// - `Ok(Vec<Item>)`: Items in backend order (newest first)
    /// - `Err(ScribeError)`: Request or transport failure
    async fn list(&self, filter: &LibraryFilter, page: u32, page_size: u32) -> Result<Vec<Item>>;

    /// Creates a new item from a draft and returns the stored record.
    async fn create(&self, draft: &ItemDraft) -> Result<Item>;

    /// Deletes the item with this id.
    ///
    /// # Returns
    ///
    /// - `Ok(())`: The backend confirmed the deletion
    /// - `Err(ScribeError)`: The item still exists as far as the client knows
    async fn delete(&self, id: &str) -> Result<()>;

    /// Requests a server-side clone of the item with this id.
    ///
    /// The clone gets a fresh id and timestamp and comes back unpinned.
    async fn duplicate(&self, id: &str) -> Result<Item>;

    /// Applies a partial update and returns the full updated record.
    ///
    /// Implementations reject an empty patch locally; the backend would
    /// answer 400 for it anyway.
    async fn update(&self, id: &str, patch: &ItemPatch) -> Result<Item>;
}
