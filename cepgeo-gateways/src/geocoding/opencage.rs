use async_trait::async_trait;
use cepgeo_core::{
    entities::MapPoint,
    gateways::geocode::{GeocodingError, GeocodingGateway},
};
use serde::Deserialize;

use super::{fetch_json, parse_point, valid_candidates, MAX_CANDIDATES};

pub const OPENCAGE_ID: &str = "opencage";

pub const OPENCAGE_BASE_URL: &str = "https://api.opencagedata.com";

#[derive(Debug, Clone)]
pub struct OpenCage {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenCage {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: OPENCAGE_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Response {
    #[serde(default)]
    results: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    lat: f64,
    lng: f64,
}

fn candidates(response: Response) -> Vec<MapPoint> {
    valid_candidates(
        OPENCAGE_ID,
        response
            .results
            .into_iter()
            .map(|Candidate { geometry }| parse_point(geometry.lat, geometry.lng)),
    )
}

#[async_trait]
impl GeocodingGateway for OpenCage {
    fn id(&self) -> &'static str {
        OPENCAGE_ID
    }

    async fn forward(&self, query: &str) -> Result<Vec<MapPoint>, GeocodingError> {
        let limit = MAX_CANDIDATES.to_string();
        let request = self
            .client
            .get(format!("{}/geocode/v1/json", self.base_url))
            .query(&[
                ("q", query),
                ("key", self.api_key.as_str()),
                ("countrycode", "br"),
                ("language", "pt"),
                ("no_annotations", "1"),
                ("limit", limit.as_str()),
            ]);
        Ok(candidates(fetch_json(request).await?))
    }
}
