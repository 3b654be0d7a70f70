//! SHA-1 helpers

use sha1::{Digest as _, Sha1};
use unmask_core::{Digest, DIGEST_LEN};

pub struct Hashes;

impl Hashes {
    /// SHA-1 hash, hex encoded
    pub fn sha1(input: &[u8]) -> String {
        hex::encode(Sha1::digest(input))
    }

    /// SHA-1 hash as raw bytes
    pub fn sha1_raw(input: &[u8]) -> [u8; DIGEST_LEN] {
        let mut out = [0u8; DIGEST_LEN];
        out.copy_from_slice(&Sha1::digest(input));
        out
    }

    /// Digest of a number's decimal encoding, the form phone cells are stored in
    pub fn phone_digest(number: u64) -> Digest {
        Digest::from_bytes(Self::sha1_raw(number.to_string().as_bytes()))
    }
}
