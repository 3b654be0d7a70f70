//! Phone pre-image search
//!
//! SHA-1 is not reversible, but the phone space is small enough to enumerate:
//! every 11-digit number starting with `89` is hashed in ascending order until
//! one matches. A full miss is an ordinary outcome.

use std::collections::HashMap;
use std::ops::ControlFlow;
use std::time::{Duration, Instant};

use sha1::{Digest as _, Sha1};
use unmask_core::{Digest, PhoneRange, DIGEST_LEN};

/// Candidates between two progress events
pub const PROGRESS_INTERVAL: u64 = 100_000_000;

/// Exhaustive search over a [`PhoneRange`]
#[derive(Debug, Clone, Copy, Default)]
pub struct PreimageSearch {
    range: PhoneRange,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SearchStats {
    pub candidates_tried: u64,
    pub elapsed: Duration,
}

impl SearchStats {
    /// Hashes per second
    pub fn speed(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.candidates_tried as f64 / secs
        } else {
            0.0
        }
    }
}

impl PreimageSearch {
    pub fn new(range: PhoneRange) -> Self {
        Self { range }
    }

    pub fn range(&self) -> PhoneRange {
        self.range
    }

    /// First number in range whose decimal encoding hashes to `digest`
    pub fn search(&self, digest: &Digest) -> Option<u64> {
        self.search_with_stats(digest).0
    }

    pub fn search_with_stats(&self, digest: &Digest) -> (Option<u64>, SearchStats) {
        let target = digest.as_bytes();
        let mut found = None;

        let stats = self.scan(|number, hash| {
            if hash == target {
                found = Some(number);
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });

        match found {
            Some(number) => tracing::debug!(%digest, number, tried = stats.candidates_tried, "pre-image found"),
            None => tracing::debug!(%digest, tried = stats.candidates_tried, "pre-image not in range"),
        }
        (found, stats)
    }

    /// Resolve many digests with a single pass over the range.
    ///
    /// Stops as soon as every distinct digest has a match. Digests absent from the
    /// returned map have no pre-image in range.
    pub fn search_many(&self, digests: &[Digest]) -> HashMap<Digest, u64> {
        let mut pending: HashMap<[u8; DIGEST_LEN], Digest> = digests
            .iter()
            .map(|d| (*d.as_bytes(), *d))
            .collect();
        let mut found = HashMap::with_capacity(pending.len());

        if pending.is_empty() {
            return found;
        }

        let stats = self.scan(|number, hash| {
            if let Some(digest) = pending.remove(hash.as_slice()) {
                found.insert(digest, number);
                if pending.is_empty() {
                    return ControlFlow::Break(());
                }
            }
            ControlFlow::Continue(())
        });

        tracing::debug!(
            targets = found.len() + pending.len(),
            resolved = found.len(),
            tried = stats.candidates_tried,
            "shared scan finished"
        );
        found
    }

    /// Hash every candidate in ascending order until `visit` breaks
    fn scan<F>(&self, mut visit: F) -> SearchStats
    where
        F: FnMut(u64, &[u8; DIGEST_LEN]) -> ControlFlow<()>,
    {
        let start = Instant::now();
        let mut counter = DecimalCounter::new(self.range.start());
        let mut hash = [0u8; DIGEST_LEN];
        let mut tried = 0u64;

        for number in self.range.start()..self.range.end() {
            hash.copy_from_slice(&Sha1::digest(counter.as_bytes()));
            tried += 1;

            if visit(number, &hash).is_break() {
                break;
            }

            if tried % PROGRESS_INTERVAL == 0 {
                tracing::debug!(tried, current = number, "pre-image scan progress");
            }
            counter.increment();
        }

        SearchStats {
            candidates_tried: tried,
            elapsed: start.elapsed(),
        }
    }
}

/// ASCII decimal encoding of a number, incremented in place
#[derive(Debug, Clone)]
struct DecimalCounter {
    digits: Vec<u8>,
}

impl DecimalCounter {
    fn new(value: u64) -> Self {
        Self {
            digits: value.to_string().into_bytes(),
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.digits
    }

    fn increment(&mut self) {
        for digit in self.digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                return;
            }
        }
        // all nines rolled over
        self.digits.insert(0, b'1');
    }
}
