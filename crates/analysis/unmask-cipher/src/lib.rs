//! unmask cipher toolkit
//!
//! The two searches behind record decoding.
//!
//! # Modules
//! - `hashes` - SHA-1 over candidate encodings
//! - `preimage` - Exhaustive phone pre-image search over a numeric range
//! - `ciphers` - Shift (Caesar) transform over an arbitrary alphabet
//! - `solver` - Key search driven by a plaintext predicate, plus the TLD allow-list

pub mod ciphers;
pub mod hashes;
pub mod preimage;
pub mod solver;

pub use ciphers::Cipher;
pub use hashes::Hashes;
pub use preimage::{PreimageSearch, SearchStats};
pub use solver::{CandidatePredicate, DomainAllowList, ShiftCipherSolver, Solution};

pub use unmask_core::{Error, Result};
