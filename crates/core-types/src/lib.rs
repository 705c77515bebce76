pub mod error;
pub mod race;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use race::{NewRace, REQUIRED_FIELDS, Race};
