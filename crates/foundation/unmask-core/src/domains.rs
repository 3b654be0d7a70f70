//! Top-level domains accepted as proof of a correct email shift

/// Labels a decoded email may end with
pub const COMMON_DOMAINS: &[&str] = &["ru", "com", "biz", "info", "org", "net", "io", "edu", "gov"];
