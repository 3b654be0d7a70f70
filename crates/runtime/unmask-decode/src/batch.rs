//! Whole-table decoding

use std::time::{Duration, Instant};

use rayon::prelude::*;
use serde::Serialize;
use unmask_config::{Strategy, UnmaskConfig};
use unmask_core::{DecodedRecord, EncodedRecord};

use crate::{RecordDecoder, Result};

/// Schedules a [`RecordDecoder`] over many records
pub struct BatchDecoder {
    decoder: RecordDecoder,
    strategy: Strategy,
    threads: Option<usize>,
}

/// Outcome counts for one batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub strategy: Strategy,
    pub records: usize,
    pub phones_found: usize,
    pub emails_found: usize,
    pub addresses_decoded: usize,
    pub elapsed: Duration,
}

impl BatchReport {
    fn tally(strategy: Strategy, decoded: &[DecodedRecord], elapsed: Duration) -> Self {
        Self {
            strategy,
            records: decoded.len(),
            phones_found: decoded.iter().filter(|d| d.phone.is_some()).count(),
            emails_found: decoded.iter().filter(|d| d.email.is_some()).count(),
            addresses_decoded: decoded.iter().filter(|d| d.address.is_decoded()).count(),
            elapsed,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push("DECODING RESULTS".to_string());
        lines.push("=".repeat(50));
        lines.push(format!("Strategy:          {:?}", self.strategy));
        lines.push(format!("Records:           {}", self.records));
        lines.push(format!("Phones found:      {}", self.phones_found));
        lines.push(format!("Emails found:      {}", self.emails_found));
        lines.push(format!("Addresses decoded: {}", self.addresses_decoded));
        lines.push(format!("Elapsed:           {:.1}s", self.elapsed.as_secs_f64()));
        lines.join("\n")
    }
}

impl BatchDecoder {
    pub fn new(decoder: RecordDecoder, strategy: Strategy) -> Self {
        Self {
            decoder,
            strategy,
            threads: None,
        }
    }

    pub fn from_config(config: &UnmaskConfig) -> Result<Self> {
        let decoder = RecordDecoder::from_config(config)?;
        Ok(Self::new(decoder, config.decode.strategy).threads(config.decode.threads))
    }

    /// Bound the worker pool used by [`Strategy::Parallel`]
    pub fn threads(mut self, threads: Option<usize>) -> Self {
        self.threads = threads;
        self
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn decoder(&self) -> &RecordDecoder {
        &self.decoder
    }

    /// Decode every record; output follows input order
    pub fn decode_all(&self, records: &[EncodedRecord]) -> Result<(Vec<DecodedRecord>, BatchReport)> {
        let start = Instant::now();
        tracing::info!(records = records.len(), strategy = ?self.strategy, "decoding batch");

        let decoded: Vec<DecodedRecord> = match self.strategy {
            Strategy::Sequential => records.iter().map(|r| self.decoder.decode(r)).collect(),
            Strategy::Parallel => self.decode_parallel(records)?,
            Strategy::SharedScan => self.decode_shared_scan(records),
        };

        let report = BatchReport::tally(self.strategy, &decoded, start.elapsed());
        tracing::info!(
            phones = report.phones_found,
            emails = report.emails_found,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "batch decoded"
        );
        Ok((decoded, report))
    }

    fn decode_parallel(&self, records: &[EncodedRecord]) -> Result<Vec<DecodedRecord>> {
        let run = || {
            records
                .par_iter()
                .map(|r| self.decoder.decode(r))
                .collect::<Vec<_>>()
        };

        match self.threads {
            Some(threads) => {
                let pool = rayon::ThreadPoolBuilder::new().num_threads(threads).build()?;
                Ok(pool.install(run))
            }
            None => Ok(run()),
        }
    }

    fn decode_shared_scan(&self, records: &[EncodedRecord]) -> Vec<DecodedRecord> {
        let digests: Vec<_> = records
            .iter()
            .map(|r| self.decoder.phone_digest(&r.phone))
            .collect();

        let targets: Vec<_> = digests.iter().flatten().copied().collect();
        let found = self.decoder.phone_search().search_many(&targets);

        records
            .iter()
            .zip(&digests)
            .map(|(record, digest)| {
                let phone = digest.and_then(|d| found.get(&d).copied());
                self.decoder.decode_with_phone(record, phone)
            })
            .collect()
    }
}
