//! Application layer for the Scribe client.
//!
//! View models and usecases that coordinate the core domain with the
//! gateway traits and local storage. Everything here is shell-agnostic:
//! the CLI drives these types, and a different front end could drive the
//! same ones.

pub mod intake;
pub mod library;
pub mod session;
pub mod studio;

pub use intake::{ImageIntake, IntakeReport};
pub use library::{LibraryViewModel, LoadOutcome};
pub use session::SessionUseCase;
pub use studio::{StudioOutcome, StudioUseCase};
