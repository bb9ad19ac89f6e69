//! `ledgerbridge-auth`: pure authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: password
//! digests, bearer tokens, and the access-tier gate. The API layer owns the
//! mapping from gate errors to transport status codes.

pub mod gate;
pub mod password;
pub mod token;

pub use gate::{AccessTier, GateError, Subject, require};
pub use password::{PasswordError, hash_password, verify_password};
pub use token::{Claims, TokenError, TokenService};
