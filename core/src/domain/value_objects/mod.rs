//! Value objects representing immutable domain concepts.

pub mod auth_response;
pub mod unix_minute;

// Re-export commonly used types
pub use auth_response::AuthResponse;
pub use unix_minute::UnixMinute;
