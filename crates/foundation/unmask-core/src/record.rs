//! Encoded input rows and their decoded counterparts

use serde::{Deserialize, Serialize};

use crate::ShiftKey;

/// One input row: three encoded fields plus its position in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodedRecord {
    /// Zero-based row position; the only identity a record has
    pub row: usize,
    /// SHA-1 hex digest of the phone number
    pub phone: String,
    /// Email shifted over the English alphabet
    pub email: String,
    /// Address shifted over the Russian alphabet with the email's key
    pub address: String,
}

impl EncodedRecord {
    pub fn new(
        row: usize,
        phone: impl Into<String>,
        email: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            row,
            phone: phone.into(),
            email: email.into(),
            address: address.into(),
        }
    }
}

/// Address output
///
/// When no shift was recovered from the email the address transform is skipped
/// and the ciphertext is carried through untouched as `Undecoded`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "text", rename_all = "snake_case")]
pub enum AddressField {
    Decoded(String),
    Undecoded(String),
}

impl AddressField {
    pub fn as_str(&self) -> &str {
        match self {
            AddressField::Decoded(text) | AddressField::Undecoded(text) => text,
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, AddressField::Decoded(_))
    }
}

/// The four derived fields of a record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedRecord {
    pub row: usize,
    pub phone: Option<u64>,
    pub email: Option<String>,
    pub address: AddressField,
    pub shift: Option<ShiftKey>,
}

impl DecodedRecord {
    /// Both shifted fields share a recovered key
    pub fn is_resolved(&self) -> bool {
        self.shift.is_some() && self.address.is_decoded()
    }

    /// Output cells in column order: phone, email, address, shift.
    /// Absent values become empty cells.
    pub fn cells(&self) -> [String; 4] {
        [
            self.phone.map(|p| p.to_string()).unwrap_or_default(),
            self.email.clone().unwrap_or_default(),
            self.address.as_str().to_string(),
            self.shift.map(|k| k.to_string()).unwrap_or_default(),
        ]
    }
}
