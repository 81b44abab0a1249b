use async_trait::async_trait;
use cepgeo_core::{
    entities::MapPoint,
    gateways::geocode::{GeocodingError, GeocodingGateway},
};
use serde::Deserialize;

use super::{fetch_json, parse_point_str, valid_candidates, MAX_CANDIDATES};

pub const NOMINATIM_ID: &str = "nominatim";

pub const NOMINATIM_BASE_URL: &str = "https://nominatim.openstreetmap.org";

/// OpenStreetMap Nominatim, usable without credentials.
#[derive(Debug, Clone)]
pub struct Nominatim {
    client: reqwest::Client,
    base_url: String,
}

impl Nominatim {
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: NOMINATIM_BASE_URL.to_owned(),
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
        NOMINATIM_ID,
        places
            .iter()
            .map(|Place { lat, lon }| parse_point_str(lat, lon)),
    )
}

#[async_trait]
impl GeocodingGateway for Nominatim {
    fn id(&self) -> &'static str {
        NOMINATIM_ID
    }

    async fn forward(&self, query: &str) -> Result<Vec<MapPoint>, GeocodingError> {
        let limit = MAX_CANDIDATES.to_string();
        let request = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[
                ("q", query),
                ("format", "jsonv2"),
                ("countrycodes", "br"),
                ("limit", limit.as_str()),
            ]);
        Ok(candidates(fetch_json(request).await?))
    }
}

#[cfg(test)]
mod tests {
    use super::{super::parse_json, *};

    #[test]
    fn parse_search_response() {
        let body = r#"[
          {
            "place_id": 123,
            "lat": "-23.5614",
            "lon": "-46.6559",
            "category": "highway",
            "type": "primary",
            "display_name": "Avenida Paulista, Bela Vista, São Paulo, Brasil"
          },
          {
            "place_id": 456,
            "lat": "-23.5630",
            "lon": "-46.6543",
            "display_name": "Avenida Paulista, Consolação, São Paulo, Brasil"
          }
        ]"#;
        let points = candidates(parse_json(body).unwrap());
        assert_eq!(2, points.len());
        assert_eq!((-23.5614, -46.6559), points[0].to_lat_lng_deg());
    }

    #[test]
    fn parse_empty_response() {
        assert!(candidates(parse_json("[]").unwrap()).is_empty());
    }

    #[test]
    fn skip_place_with_invalid_coordinates() {
        let body = r#"[
          { "lat": "", "lon": "-46.6559" },
          { "lat": "-23.5630", "lon": "-46.6543" }
        ]"#;
        let points = candidates(parse_json(body).unwrap());
        assert_eq!(vec![MapPoint::from_lat_lng_deg(-23.5630, -46.6543)], points);
    }
}
