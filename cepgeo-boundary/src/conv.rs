use super::*;
use cepgeo_entities as e;

impl From<e::resolution::ConfidenceTier> for ConfidenceTier {
    fn from(from: e::resolution::ConfidenceTier) -> Self {
        use e::resolution::ConfidenceTier as E;
        match from {
            E::High => Self::High,
            E::Medium => Self::Medium,
            E::Low => Self::Low,
            E::None => Self::None,
        }
    }
}

impl From<e::resolution::ResolutionResult> for ResolutionResult {
    fn from(from: e::resolution::ResolutionResult) -> Self {
        let e::resolution::ResolutionResult {
            pos,
            confidence,
            source,
        } = from;
        let (lat, lng) = pos.to_lat_lng_deg();
        Self {
            lat,
            lng,
            confidence_tier: confidence.into(),
            source_attribution: source.attribution(),
        }
    }
}

impl From<e::cache::AddressCacheEntry> for CacheEntry {
    fn from(from: e::cache::AddressCacheEntry) -> Self {
        let e::cache::AddressCacheEntry {
            address,
            house_number,
            pos,
            confidence,
            created_at,
            updated_at,
        } = from;
        let e::address::PostalAddress {
            postal_code,
            street,
            neighborhood,
            city,
            state,
        } = address;
        Self {
            postal_code: postal_code.formatted(),
            house_number: house_number.map(|nr| nr.as_str().to_owned()),
            street,
            neighborhood,
            city,
            state,
            lat: pos.map(e::geo::MapPoint::lat),
            lng: pos.map(e::geo::MapPoint::lng),
            confidence_tier: confidence.map(Into::into),
            created: created_at.as_millis(),
            updated: updated_at.as_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialize_resolution_result() {
        let result = e::resolution::ResolutionResult {
            pos: e::geo::MapPoint::from_lat_lng_deg(-23.5613, -46.6565),
            confidence: e::resolution::ConfidenceTier::Medium,
            source: e::resolution::ResolutionSource::Providers(vec![
                "nominatim".into(),
                "google".into(),
            ]),
        };
        let json = serde_json::to_value(ResolutionResult::from(result)).unwrap();
        assert_eq!(
            serde_json::json!({
                "lat": -23.5613,
                "lng": -46.6565,
                "confidenceTier": "medium",
                "sourceAttribution": ["nominatim", "google"]
            }),
            json
        );
    }

    #[test]
    fn serialize_fallback() {
        let result = e::resolution::ResolutionResult {
            pos: e::geo::MapPoint::from_lat_lng_deg(-23.5505, -46.6333),
            confidence: e::resolution::ConfidenceTier::None,
            source: e::resolution::ResolutionSource::Fallback,
        };
        let json = serde_json::to_string(&ResolutionResult::from(result)).unwrap();
        assert!(json.contains(r#""confidenceTier":"none""#));
        assert!(json.contains(r#""sourceAttribution":["fallback"]"#));
    }
}
