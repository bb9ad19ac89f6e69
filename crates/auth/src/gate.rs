//! Access-tier gate.
//!
//! Capability is a strictly ordered ladder; each tier is a precondition for
//! the next. The check is pure: no I/O, no panics. Callers resolve the
//! subject first (token → credential store) and then ask for a tier.

use thiserror::Error;

/// Capability tiers, weakest first. Each tier implies every tier below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum AccessTier {
    Anonymous,
    /// Token decoded to a known subject.
    Authenticated,
    /// Subject has been activated by an administrator.
    Active,
    Superuser,
}

/// Minimal view of a resolved subject for gate decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub email: String,
    pub is_active: bool,
    pub is_superuser: bool,
}

/// Why a gate check failed. The three variants map to distinct client
/// guidance: log in again, wait for an administrator, or give up.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GateError {
    #[error("invalid or expired token")]
    Unauthenticated,

    #[error("inactive user")]
    Inactive,

    #[error("superuser privileges required")]
    InsufficientPrivilege,
}

/// Highest tier the subject qualifies for.
pub fn tier_of(subject: Option<&Subject>) -> AccessTier {
    match subject {
        None => AccessTier::Anonymous,
        Some(s) if !s.is_active => AccessTier::Authenticated,
        Some(s) if s.is_superuser => AccessTier::Superuser,
        Some(_) => AccessTier::Active,
    }
}

/// Check that the subject reaches `required`.
///
/// The error names the first rung that failed, so an inactive user asking
/// for superuser access hears "inactive", not "insufficient privilege".
pub fn require(subject: Option<&Subject>, required: AccessTier) -> Result<(), GateError> {
    if tier_of(subject) >= required {
        return Ok(());
    }
    match subject {
        None => Err(GateError::Unauthenticated),
        Some(s) if !s.is_active => Err(GateError::Inactive),
        Some(_) => Err(GateError::InsufficientPrivilege),
    }
}
