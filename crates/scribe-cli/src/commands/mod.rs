pub mod analyze;
pub mod auth;
pub mod chat;
pub mod config;
pub mod generate;
pub mod library;
pub mod status;
pub mod utils;
