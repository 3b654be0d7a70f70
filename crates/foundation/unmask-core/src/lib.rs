//! # unmask core
//!
//! Shared vocabulary for the unmask workspace: the digests phone numbers are
//! hidden behind, the two shift alphabets, shift keys, the phone search range and
//! the encoded/decoded record pair.
//!
//! ```text
//! EncodedRecord ──► phone digest ──► PhoneRange scan ──► Option<u64>
//!               ──► email  ──► ENGLISH shift search ──► Option<(String, ShiftKey)>
//!               ──► address ──► RUSSIAN shift (same key) ──► AddressField
//! ```

pub mod alphabet;
pub mod digest;
pub mod domains;
pub mod phone;
pub mod record;

pub use alphabet::{Alphabet, ShiftKey, ENGLISH, RUSSIAN};
pub use digest::{Digest, DIGEST_LEN};
pub use domains::COMMON_DOMAINS;
pub use phone::{PhoneRange, DEFAULT_PHONE_END, DEFAULT_PHONE_START};
pub use record::{AddressField, DecodedRecord, EncodedRecord};

/// Result type for unmask-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building core values
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid digest '{input}': {reason}")]
    InvalidDigest { input: String, reason: String },

    #[error("Invalid phone range: start {start} must be below end {end}")]
    InvalidRange { start: u64, end: u64 },

    #[error("Unknown alphabet: {0}. Use: russian, english")]
    UnknownAlphabet(String),

    #[error("Malformed candidate: {0}")]
    MalformedCandidate(String),
}
