// Low-level persistence traits.

use crate::entities::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("The requested object could not be found")]
    NotFound,
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

type Result<T> = std::result::Result<T, Error>;

/// Permanent key/value store of resolved postal addresses.
///
/// The store is an optimization and never a source of truth:
/// callers are expected to tolerate every error.
pub trait AddressCacheStore: Send + Sync {
    /// Matches on the postal code alone.
    fn get(&self, postal_code: &PostalCode) -> Result<Option<AddressCacheEntry>>;

    /// Inserts or overwrites the entry of the postal code.
    ///
    /// The creation timestamp of an existing entry is preserved.
    fn upsert(&self, entry: &AddressCacheEntry) -> Result<()>;
}

impl<T> AddressCacheStore for std::sync::Arc<T>
where
    T: AddressCacheStore + ?Sized,
{
    fn get(&self, postal_code: &PostalCode) -> Result<Option<AddressCacheEntry>> {
        (**self).get(postal_code)
    }

    fn upsert(&self, entry: &AddressCacheEntry) -> Result<()> {
        (**self).upsert(entry)
    }
}
