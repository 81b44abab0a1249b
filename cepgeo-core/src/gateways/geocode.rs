use async_trait::async_trait;
use cepgeo_entities::geo::MapPoint;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeocodingError {
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),
    #[error("HTTP status {0}")]
    Http(u16),
    #[error("Quota exceeded")]
    Quota,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("Malformed response: {0}")]
    Malformed(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl GeocodingError {
    /// Classifies an unsuccessful HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 | 403 => Self::Unauthorized,
            402 | 429 => Self::Quota,
            _ => Self::Http(status),
        }
    }
}

/// A single external forward geocoding service.
///
/// Candidates are returned in the ranking order of the
/// service and are not filtered by any bounding box.
#[async_trait]
pub trait GeocodingGateway: Send + Sync {
    /// Stable identifier used for attribution and logging.
    fn id(&self) -> &'static str;

    /// Resolve a free-text query constrained to Brazil.
    async fn forward(&self, query: &str) -> Result<Vec<MapPoint>, GeocodingError>;
}
