use cepgeo_core::{
    entities::{PostalCode, PostalCodeParseError},
    gateways::postal_lookup::PostalLookupError,
};
use thiserror::Error;

/// The only failures of a resolution. Faults after the postal code
/// has been confirmed degrade the confidence of the result instead.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    InvalidInput(#[from] PostalCodeParseError),
    #[error("Unknown postal code {0}")]
    NotFound(PostalCode),
    #[error("Postal code {0} could not be verified")]
    PostalLookupUnavailable(PostalCode, #[source] PostalLookupError),
}
