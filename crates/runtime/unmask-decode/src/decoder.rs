//! Single-record decoding
//!
//! Phone, email and address are decoded in that order. The key recovered from
//! the email is handed explicitly to the address step; without one the address
//! comes back untouched as [`AddressField::Undecoded`].

use unmask_cipher::{Cipher, DomainAllowList, PreimageSearch, ShiftCipherSolver, Solution};
use unmask_config::UnmaskConfig;
use unmask_core::{
    AddressField, Alphabet, DecodedRecord, Digest, EncodedRecord, PhoneRange, ShiftKey, ENGLISH,
    RUSSIAN,
};

use crate::Result;

pub struct RecordDecoder {
    phones: PreimageSearch,
    emails: ShiftCipherSolver<'static, DomainAllowList>,
    address_alphabet: &'static Alphabet,
}

impl Default for RecordDecoder {
    fn default() -> Self {
        Self::new(PhoneRange::default(), DomainAllowList::common())
    }
}

impl RecordDecoder {
    pub fn new(range: PhoneRange, domains: DomainAllowList) -> Self {
        Self {
            phones: PreimageSearch::new(range),
            emails: ShiftCipherSolver::new(&ENGLISH, domains),
            address_alphabet: &RUSSIAN,
        }
    }

    pub fn from_config(config: &UnmaskConfig) -> Result<Self> {
        let range = config.phone.range()?;
        let domains = DomainAllowList::new(config.email.allowed_tlds.iter().cloned());
        Ok(Self::new(range, domains))
    }

    pub fn phone_search(&self) -> &PreimageSearch {
        &self.phones
    }

    /// Digest held in a phone cell; `None` for blank or malformed cells
    pub fn phone_digest(&self, cell: &str) -> Option<Digest> {
        if cell.trim().is_empty() {
            tracing::warn!("empty phone cell, skipping search");
            return None;
        }
        match Digest::parse(cell) {
            Ok(digest) => Some(digest),
            Err(e) => {
                tracing::warn!(error = %e, "unreadable phone cell, skipping search");
                None
            }
        }
    }

    pub fn decode_phone(&self, cell: &str) -> Option<u64> {
        self.phone_digest(cell)
            .and_then(|digest| self.phones.search(&digest))
    }

    pub fn decode_email(&self, cell: &str) -> Option<Solution> {
        if cell.is_empty() {
            return None;
        }
        self.emails.solve(cell)
    }

    pub fn decode_address(&self, cell: &str, key: Option<ShiftKey>) -> AddressField {
        match key {
            Some(key) => AddressField::Decoded(Cipher::shift_decode(cell, self.address_alphabet, key)),
            None => AddressField::Undecoded(cell.to_string()),
        }
    }

    pub fn decode(&self, record: &EncodedRecord) -> DecodedRecord {
        let phone = self.decode_phone(&record.phone);
        self.decode_with_phone(record, phone)
    }

    /// Finish a record whose phone was resolved elsewhere
    pub fn decode_with_phone(&self, record: &EncodedRecord, phone: Option<u64>) -> DecodedRecord {
        let (email, shift) = match self.decode_email(&record.email) {
            Some(Solution { plaintext, key }) => (Some(plaintext), Some(key)),
            None => (None, None),
        };
        let address = self.decode_address(&record.address, shift);

        tracing::debug!(
            row = record.row,
            phone = phone.is_some(),
            shift = ?shift.map(|k| k.value()),
            "record decoded"
        );

        DecodedRecord {
            row: record.row,
            phone,
            email,
            address,
            shift,
        }
    }
}
