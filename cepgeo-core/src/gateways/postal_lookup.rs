use async_trait::async_trait;
use cepgeo_entities::{address::PostalAddress, postal_code::PostalCode};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PostalLookupError {
    /// The postal code does not exist. Terminal.
    #[error("Unknown postal code")]
    NotFound,
    /// The lookup service could not answer.
    #[error("Postal lookup unavailable: {0}")]
    Unavailable(#[source] anyhow::Error),
}

/// Resolves a postal code into a structured address.
#[async_trait]
pub trait PostalLookupGateway: Send + Sync {
    async fn lookup(&self, postal_code: &PostalCode) -> Result<PostalAddress, PostalLookupError>;
}
