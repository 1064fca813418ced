//! HTTP gateway implementations for the Scribe client.
//!
//! Every remote boundary trait from `scribe-core` gets one implementation
//! here, all sharing an [`ApiConnection`] so the base URL, timeout, bearer
//! header and error mapping are decided in exactly one place.

pub mod agent;
pub mod auth;
pub mod connection;
pub mod generation;
pub mod images;
pub mod items;

pub use agent::HttpAgentGateway;
pub use auth::HttpAuthGateway;
pub use connection::ApiConnection;
pub use generation::HttpGenerationGateway;
pub use images::HttpImageGateway;
pub use items::HttpItemGateway;
