//! mentara-storage
//!
//! Keyed JSON object storage. Records are opaque blobs addressed by the
//! key layout in `mentara_core::keys`, held either in memory or as files
//! under a data directory.

pub mod error;
pub mod objects;
pub mod records;
