use ledgerbridge_auth::{AccessTier, Subject, gate};
use ledgerbridge_store::UserRecord;

use crate::app::errors::ApiError;

/// The authenticated user for a request, inserted by the auth middleware.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub UserRecord);

impl CurrentUser {
    pub fn subject(&self) -> Subject {
        Subject {
            email: self.0.email.clone(),
            is_active: self.0.is_active,
            is_superuser: self.0.is_superuser,
        }
    }
}

/// Gate guard for every ledger read/write endpoint.
pub fn require_active(user: &CurrentUser) -> Result<(), ApiError> {
    gate::require(Some(&user.subject()), AccessTier::Active)?;
    Ok(())
}

/// Gate guard for administrative endpoints.
pub fn require_superuser(user: &CurrentUser) -> Result<(), ApiError> {
    gate::require(Some(&user.subject()), AccessTier::Superuser)?;
    Ok(())
}
