//! Forward geocoding services constrained to Brazil.

use cepgeo_core::{entities::MapPoint, gateways::geocode::GeocodingError};
use serde::de::DeserializeOwned;

mod google;
mod locationiq;
mod nominatim;
mod opencage;

pub use self::{google::*, locationiq::*, nominatim::*, opencage::*};

/// Upper bound of candidates requested per query.
const MAX_CANDIDATES: usize = 5;

async fn fetch_json<T: DeserializeOwned>(
    request: reqwest::RequestBuilder,
) -> Result<T, GeocodingError> {
    let response = request.send().await.map_err(anyhow::Error::from)?;
    let status = response.status();
    if !status.is_success() {
        return Err(GeocodingError::from_status(status.as_u16()));
    }
    let body = response.text().await.map_err(anyhow::Error::from)?;
    parse_json(&body)
}

fn parse_json<T: DeserializeOwned>(body: &str) -> Result<T, GeocodingError> {
    serde_json::from_str(body).map_err(|err| GeocodingError::Malformed(err.to_string()))
}

fn parse_point(lat: f64, lng: f64) -> Result<MapPoint, GeocodingError> {
    MapPoint::try_from_lat_lng_deg(lat, lng)
        .map_err(|err| GeocodingError::Malformed(err.to_string()))
}

// Nominatim and LocationIQ encode coordinates as strings.
fn parse_point_str(lat: &str, lng: &str) -> Result<MapPoint, GeocodingError> {
    let lat = lat
        .parse()
        .map_err(|_| GeocodingError::Malformed(format!("latitude '{lat}'")))?;
    let lng = lng
        .parse()
        .map_err(|_| GeocodingError::Malformed(format!("longitude '{lng}'")))?;
    parse_point(lat, lng)
}

/// Drops candidates with unusable coordinates, keeping all others.
fn valid_candidates(
    provider: &str,
    points: impl IntoIterator<Item = Result<MapPoint, GeocodingError>>,
) -> Vec<MapPoint> {
    points
        .into_iter()
        .filter_map(|point| {
            point
                .inspect_err(|err| log::warn!("Skipping candidate of {provider}: {err}"))
                .ok()
        })
        .collect()
}
