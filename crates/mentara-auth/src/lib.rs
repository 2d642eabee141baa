//! mentara-auth
//!
//! Bearer-token verification. Tokens are issued by the identity provider;
//! this crate only checks them.

pub mod error;
pub mod jwt;
