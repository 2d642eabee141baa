//! mentara-core
//!
//! Pure domain records and storage key conventions. No I/O: this is the
//! shared vocabulary of the Mentara backend crates.

pub mod error;
pub mod keys;
pub mod models;
