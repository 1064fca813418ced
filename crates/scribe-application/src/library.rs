//! Library view model: a synchronized local mirror of the item collection.
//!
//! The backend owns the data; this model owns one filtered, paginated
//! slice of it. Loads either replace the slice (first page) or extend it
//! (later pages), and every mutation is confirmed-first: the local mirror
//! changes only after the backend has acknowledged the operation, using
//! the record the backend returned.
//!
//! State lives behind an async `RwLock` that is never held across a
//! network await; a load snapshots its filter before the request goes out
//! and re-checks it when the response lands, so a response issued under an
//! abandoned filter can never clobber newer results.

use std::sync::Arc;

use scribe_core::Result;
use scribe_core::item::{
    FilterState, Item, ItemGateway, ItemPatch, LibraryFilter, PAGE_SIZE, Platform, Tone,
};
use tokio::sync::RwLock;

/// What became of a completed load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The response was applied to the held sequence.
    Applied {
        /// Items this load contributed (replaced or appended).
        count: usize,
    },
    /// The filter changed while the request was in flight; the response
    /// was discarded without touching the held sequence.
    Stale,
}

#[derive(Debug)]
struct LibraryState {
    filter: FilterState,
    items: Vec<Item>,
    has_more: bool,
}

/// View model over the item collection.
pub struct LibraryViewModel {
    gateway: Arc<dyn ItemGateway>,
    state: RwLock<LibraryState>,
}

impl LibraryViewModel {
    pub fn new(gateway: Arc<dyn ItemGateway>) -> Self {
        Self {
            gateway,
            state: RwLock::new(LibraryState {
                filter: FilterState::new(),
                items: Vec::new(),
                has_more: false,
            }),
        }
    }

    /// Sets the free-text query. Returns true when it changed (which also
    /// rewinds the page cursor).
    pub async fn set_query(&self, query: impl Into<String>) -> bool {
        self.state.write().await.filter.set_query(query)
    }

    /// Sets the platform selector (`None` = all).
    pub async fn set_platform(&self, platform: Option<Platform>) -> bool {
        self.state.write().await.filter.set_platform(platform)
    }

    /// Sets the tone selector (`None` = all).
    pub async fn set_tone(&self, tone: Option<Tone>) -> bool {
        self.state.write().await.filter.set_tone(tone)
    }

    /// Loads the first page under the current filter, replacing the held
    /// sequence.
    pub async fn refresh(&self) -> Result<LoadOutcome> {
        let filter = self.state.read().await.filter.filter().clone();
        let items = self.gateway.list(&filter, 1, PAGE_SIZE).await?;

        let mut state = self.state.write().await;
        if *state.filter.filter() != filter {
            tracing::debug!(
                target: "scribe::library",
                "discarding first-page response for abandoned filter"
            );
            return Ok(LoadOutcome::Stale);
        }
        state.has_more = items.len() as u32 == PAGE_SIZE;
        state.filter.reset_page();
        let count = items.len();
        state.items = items;
        tracing::debug!(target: "scribe::library", count, "replaced library page");
        Ok(LoadOutcome::Applied { count })
    }

    /// Loads the next page under the current filter and appends it.
    ///
    /// A no-op once the collection is exhausted; callers drive pagination
    /// by checking [`has_more`](Self::has_more) after each load.
    pub async fn load_more(&self) -> Result<LoadOutcome> {
        let (filter, next_page) = {
            let state = self.state.read().await;
            if !state.has_more {
                return Ok(LoadOutcome::Applied { count: 0 });
            }
            (state.filter.filter().clone(), state.filter.page() + 1)
        };
        let items = self.gateway.list(&filter, next_page, PAGE_SIZE).await?;

        let mut state = self.state.write().await;
        if *state.filter.filter() != filter {
            tracing::debug!(
                target: "scribe::library",
                page = next_page,
                "discarding page response for abandoned filter"
            );
            return Ok(LoadOutcome::Stale);
        }
        state.has_more = items.len() as u32 == PAGE_SIZE;
        state.filter.advance_page();
        let count = items.len();
        state.items.extend(items);
        tracing::debug!(target: "scribe::library", page = next_page, count, "appended library page");
        Ok(LoadOutcome::Applied { count })
    }

    /// Deletes an item, removing it from the mirror only after the backend
    /// confirms. A failed delete leaves the mirror untouched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        self.gateway.delete(id).await?;
        let mut state = self.state.write().await;
        state.items.retain(|item| item.id != id);
        tracing::info!(target: "scribe::library", id, "deleted item");
        Ok(())
    }

    /// Duplicates an item server-side and prepends the returned clone.
    ///
    /// The clone comes back with its own id and timestamp and is never
    /// pinned, regardless of the source item.
    pub async fn duplicate(&self, id: &str) -> Result<Item> {
        let clone = self.gateway.duplicate(id).await?;
        let mut state = self.state.write().await;
        state.items.insert(0, clone.clone());
        tracing::info!(target: "scribe::library", id, clone_id = %clone.id, "duplicated item");
        Ok(clone)
    }

    /// Flips an item's pinned flag and adopts the backend's updated record
    /// in place. Position in the held sequence does not change; pinned
    /// grouping is applied at render time by [`partitioned`](Self::partitioned).
    pub async fn toggle_pin(&self, id: &str, current_pinned: bool) -> Result<Item> {
        let updated = self
            .gateway
            .update(id, &ItemPatch::pinned(!current_pinned))
            .await?;
        let mut state = self.state.write().await;
        if let Some(slot) = state.items.iter_mut().find(|item| item.id == id) {
            *slot = updated.clone();
        }
        tracing::info!(target: "scribe::library", id, pinned = updated.pinned, "toggled pin");
        Ok(updated)
    }

    /// Snapshot of the held sequence in arrival order.
    pub async fn items(&self) -> Vec<Item> {
        self.state.read().await.items.clone()
    }

    /// The held sequence split for display: pinned first, then the rest,
    /// each group preserving arrival order.
    pub async fn partitioned(&self) -> (Vec<Item>, Vec<Item>) {
        let state = self.state.read().await;
        state.items.iter().cloned().partition(|item| item.pinned)
    }

    /// Whether another page is expected under the current filter.
    pub async fn has_more(&self) -> bool {
        self.state.read().await.has_more
    }

    /// Current 1-based page cursor.
    pub async fn page(&self) -> u32 {
        self.state.read().await.filter.page()
    }

    /// Snapshot of the active filter.
    pub async fn filter(&self) -> LibraryFilter {
        self.state.read().await.filter.filter().clone()
    }
}
