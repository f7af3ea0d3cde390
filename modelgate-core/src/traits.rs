//! Trait definitions for modelgate.
//!
//! This module defines the seams between this crate's consumers and the
//! collaborators they depend on.

use crate::models::CredentialRecord;

/// Read access to persisted credential records.
///
/// The store owns its own synchronization; implementations must be safe to
/// call concurrently from many resolutions.
pub trait CredentialStore: Send + Sync {
    /// Looks up a credential record by its identifier.
    fn get_by_id(&self, id: &str) -> Option<CredentialRecord>;

    /// Returns the identifiers of all stored records.
    fn ids(&self) -> Vec<String>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    fn get_by_id(&self, id: &str) -> Option<CredentialRecord> {
        (**self).get_by_id(id)
    }

    fn ids(&self) -> Vec<String> {
        (**self).ids()
    }
}
