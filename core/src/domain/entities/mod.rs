//! Domain entities representing core objects.

pub mod media_token;
pub mod session;
pub mod token;


// Re-export commonly used types
pub use media_token::{MediaToken, MEDIA_SIGNATURE_LENGTH};
pub use session::{NewSession, Session, SessionHistoryEntry, FINGERPRINT_MAX_CHARS};
pub use token::{ExtractedToken, TokenKind, EXPIRY_FIELD};
