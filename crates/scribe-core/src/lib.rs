pub mod agent;
pub mod auth;
pub mod config;
pub mod error;
pub mod generation;
pub mod image;
pub mod item;

// Re-export common error type
pub use error::{Result, ScribeError};
