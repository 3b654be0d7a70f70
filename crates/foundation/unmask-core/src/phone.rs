//! Phone number search range

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// First 11-digit number with the `89` prefix
pub const DEFAULT_PHONE_START: u64 = 89_000_000_000;

/// Exclusive upper bound; 89999999999 itself is never scanned
pub const DEFAULT_PHONE_END: u64 = 89_999_999_999;

/// Half-open range `[start, end)` of candidate phone numbers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhoneRange {
    start: u64,
    end: u64,
}

impl PhoneRange {
    pub fn new(start: u64, end: u64) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    /// Exclusive end
    pub fn end(&self) -> u64 {
        self.end
    }

    pub fn contains(&self, n: u64) -> bool {
        (self.start..self.end).contains(&n)
    }

    /// Number of candidates in the range
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PhoneRange {
    fn default() -> Self {
        Self {
            start: DEFAULT_PHONE_START,
            end: DEFAULT_PHONE_END,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bounds() {
        let range = PhoneRange::default();
        assert!(range.contains(89_000_000_000));
        assert!(range.contains(89_999_999_998));
        assert!(!range.contains(89_999_999_999));
        assert!(!range.contains(88_999_999_999));
        assert_eq!(range.len(), 999_999_999);
    }

    #[test]
    fn test_rejects_empty_range() {
        assert!(matches!(PhoneRange::new(5, 5), Err(Error::InvalidRange { .. })));
        assert!(PhoneRange::new(6, 5).is_err());
        assert!(PhoneRange::new(5, 6).is_ok());
    }
}
