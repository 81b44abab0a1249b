use async_trait::async_trait;
use cepgeo_core::{
    entities::MapPoint,
    gateways::geocode::{GeocodingError, GeocodingGateway},
};
use serde::Deserialize;

use super::{fetch_json, parse_point, valid_candidates, MAX_CANDIDATES};

pub const GOOGLE_ID: &str = "google";

pub const GOOGLE_BASE_URL: &str = "https://maps.googleapis.com";

/// Google Maps Geocoding API.
#[derive(Debug, Clone)]
pub struct Google {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl Google {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: GOOGLE_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    status: String,
    #[serde(default)]
    results: Vec<Candidate>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: Location,
}

#[derive(Debug, Deserialize)]
struct Location {
    lat: f64,
    lng: f64,
}

// The API answers with 200 OK and reports failures in the status field.
fn candidates(response: Response) -> Result<Vec<MapPoint>, GeocodingError> {
    let Response {
        status,
        results,
        error_message,
    } = response;
    match status.as_str() {
        "OK" => Ok(valid_candidates(
            GOOGLE_ID,
            results.into_iter().take(MAX_CANDIDATES).map(|Candidate { geometry }| {
                parse_point(geometry.location.lat, geometry.location.lng)
            }),
        )),
        "ZERO_RESULTS" => Ok(vec![]),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(GeocodingError::Quota),
        "REQUEST_DENIED" => Err(GeocodingError::Unauthorized),
        _ => Err(GeocodingError::Malformed(format!(
            "{status}: {}",
            error_message.unwrap_or_default()
        ))),
    }
}

#[async_trait]
impl GeocodingGateway for Google {
    fn id(&self) -> &'static str {
        GOOGLE_ID
    }

    async fn forward(&self, query: &str) -> Result<Vec<MapPoint>, GeocodingError> {
        let request = self
            .client
            .get(format!("{}/maps/api/geocode/json", self.base_url))
            .query(&[
                ("address", query),
                ("components", "country:BR"),
                ("region", "br"),
                ("key", self.api_key.as_str()),
            ]);
        candidates(fetch_json(request).await?)
    }
}
