//! Wire-format numeric normalization.
//!
//! The engine's ids, secondary identifiers, and balances are up to 128 bits
//! wide. A JSON number is only lossless up to 2^53, so wide fields travel as
//! decimal strings on the wire, while clients may still send small values as
//! native integers. [`WireUint`] is that boundary union; handlers resolve it
//! into a fixed-width unsigned integer immediately and the union never leaks
//! past the DTO layer.
//!
//! Narrow fields (`user_data_32`, `ledger`, `code`, `flags`, `timeout`) ride
//! native JSON numbers in both directions; serde's width check on `u32`/`u16`
//! is the inbound guard for them.

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A wire value that is either a native integer or a decimal-digit string.
///
/// Inbound only. Outbound rendering always goes through [`to_wire_string`]
/// for wide fields so the asymmetry of the wire contract stays in one place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WireUint {
    Int(u64),
    Text(String),
}

impl Default for WireUint {
    fn default() -> Self {
        Self::Int(0)
    }
}

impl WireUint {
    /// Resolve into a 128-bit unsigned integer (ids, user_data_128, balances).
    pub fn as_u128(&self, field: &'static str) -> Result<u128, DomainError> {
        match self {
            Self::Int(n) => Ok(u128::from(*n)),
            Self::Text(s) => parse_decimal::<u128>(s, field),
        }
    }

    /// Resolve into a 64-bit unsigned integer (amounts, user_data_64, timestamps).
    pub fn as_u64(&self, field: &'static str) -> Result<u64, DomainError> {
        match self {
            Self::Int(n) => Ok(*n),
            Self::Text(s) => parse_decimal::<u64>(s, field),
        }
    }
}

impl From<u64> for WireUint {
    fn from(value: u64) -> Self {
        Self::Int(value)
    }
}

/// Render a wide (64/128-bit) field for the wire: always a decimal string,
/// so the round-trip through [`WireUint::as_u128`] is lossless for the full
/// width.
pub fn to_wire_string<T: Into<u128>>(value: T) -> String {
    value.into().to_string()
}

fn parse_decimal<T: std::str::FromStr>(s: &str, field: &'static str) -> Result<T, DomainError> {
    // `FromStr` for unsigned integers tolerates a leading '+'; the wire
    // contract does not.
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(DomainError::validation(format!(
            "{field} must be a decimal digit string"
        )));
    }
    s.parse::<T>()
        .map_err(|_| DomainError::validation(format!("{field} is out of range")))
}
