//! Item domain: model, library filter and remote gateway contract.

pub mod filter;
pub mod gateway;
pub mod model;

pub use filter::{FilterState, LibraryFilter, PAGE_SIZE};
pub use gateway::ItemGateway;
pub use model::{Item, ItemDraft, ItemPatch, Mode, Platform, Tone};
