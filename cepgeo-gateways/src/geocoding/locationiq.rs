use async_trait::async_trait;
use cepgeo_core::{
    entities::MapPoint,
    gateways::geocode::{GeocodingError, GeocodingGateway},
};
use serde::Deserialize;

use super::{fetch_json, parse_point_str, valid_candidates, MAX_CANDIDATES};

pub const LOCATIONIQ_ID: &str = "locationiq";

pub const LOCATIONIQ_BASE_URL: &str = "https://us1.locationiq.com";

#[derive(Debug, Clone)]
pub struct LocationIq {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl LocationIq {
    pub fn new(client: reqwest::Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: LOCATIONIQ_BASE_URL.to_owned(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct Place {
    lat: String,
    lon: String,
}

fn candidates(places: Vec<Place>) -> Vec<MapPoint> {
    valid_candidates(
        LOCATIONIQ_ID,
        places
            .iter()
            .map(|Place { lat, lon }| parse_point_str(lat, lon)),
    )
}

#[async_trait]
impl GeocodingGateway for LocationIq {
    fn id(&self) -> &'static str {
        LOCATIONIQ_ID
    }

    async fn forward(&self, query: &str) -> Result<Vec<MapPoint>, GeocodingError> {
        let limit = MAX_CANDIDATES.to_string();
        let request = self
            .client
            .get(format!("{}/v1/search", self.base_url))
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("format", "json"),
                ("countrycodes", "br"),
                ("limit", limit.as_str()),
            ]);
        match fetch_json(request).await {
            Ok(places) => Ok(candidates(places)),
            // "Unable to geocode"
            Err(GeocodingError::Http(404)) => Ok(vec![]),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{super::parse_json, *};

    #[test]
    fn parse_search_response() {
        let body = r#"[
          {
            "place_id": "331708452",
            "licence": "https://locationiq.com/attribution",
            "lat": "-23.5871",
            "lon": "-46.6580",
            "display_name": "Parque Ibirapuera, São Paulo, Brasil",
            "class": "leisure",
            "type": "park",
            "importance": 0.61
          }
        ]"#;
        let points = candidates(parse_json(body).unwrap());
        assert_eq!(vec![MapPoint::from_lat_lng_deg(-23.5871, -46.658)], points);
    }

    #[test]
    fn reject_malformed_response() {
        let body = r#"[{ "lat": "-23.5871" }]"#;
        assert!(matches!(
            parse_json::<Vec<Place>>(body),
            Err(GeocodingError::Malformed(_))
        ));
    }
}
