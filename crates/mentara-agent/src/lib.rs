//! mentara-agent
//!
//! The conversational pre-assessment: a client for the external AI
//! service, the per-session state machine, and the in-process session
//! store the API serves from.

pub mod client;
pub mod error;
pub mod session;
pub mod store;
