//! Record decoding
//!
//! [`RecordDecoder`] turns one encoded row into its four decoded fields;
//! [`BatchDecoder`] schedules a whole table sequentially, over a rayon pool, or
//! around a single shared phone scan. Every strategy yields the same rows in the
//! same order.

pub mod batch;
pub mod decoder;

pub use batch::{BatchDecoder, BatchReport};
pub use decoder::RecordDecoder;
pub use unmask_config::Strategy;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] unmask_config::Error),

    #[error("Failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
