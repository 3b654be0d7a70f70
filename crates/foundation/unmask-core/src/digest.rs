//! SHA-1 digests of phone numbers

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Raw SHA-1 output length in bytes
pub const DIGEST_LEN: usize = 20;

/// A parsed SHA-1 digest
///
/// Kept as raw bytes so the pre-image scan compares 20 bytes per candidate
/// instead of hex-encoding every hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Digest([u8; DIGEST_LEN]);

impl Digest {
    /// Parse a hex digest. Surrounding whitespace is ignored, case is not significant.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        if trimmed.len() != DIGEST_LEN * 2 {
            return Err(Error::InvalidDigest {
                input: input.to_string(),
                reason: format!("expected {} hex chars, got {}", DIGEST_LEN * 2, trimmed.len()),
            });
        }

        let mut bytes = [0u8; DIGEST_LEN];
        hex::decode_to_slice(trimmed, &mut bytes).map_err(|e| Error::InvalidDigest {
            input: input.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self(bytes))
    }

    pub fn from_bytes(bytes: [u8; DIGEST_LEN]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; DIGEST_LEN] {
        &self.0
    }

    /// Lowercase hex form
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Digest {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "8a9f6d3da10ac044ed09b7421386b6017fdb95b0";

    #[test]
    fn test_parse_roundtrip_hex() {
        let digest = Digest::parse(SAMPLE).unwrap();
        assert_eq!(digest.to_hex(), SAMPLE);
        assert_eq!(digest.to_string(), SAMPLE);
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let upper = format!("  {}\n", SAMPLE.to_uppercase());
        assert_eq!(Digest::parse(&upper).unwrap(), Digest::parse(SAMPLE).unwrap());
    }

    #[test]
    fn test_rejects_wrong_length() {
        let err = Digest::parse("abcd").unwrap_err();
        assert!(matches!(err, Error::InvalidDigest { .. }));
    }

    #[test]
    fn test_rejects_non_hex() {
        let bad = "zz9f6d3da10ac044ed09b7421386b6017fdb95b0";
        assert!(bad.parse::<Digest>().is_err());
    }
}
