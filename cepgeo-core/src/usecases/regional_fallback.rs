//! Offline approximation of a postal code position.
//!
//! The digit-derived offset is a low-confidence heuristic without any
//! geometric foundation: it only spreads distinct postal codes of the same
//! zone over distinct points. Results may be off by a few kilometres and are
//! always reported with [`ConfidenceTier::None`].

use super::prelude::*;

/// Offset per unit of the digit pairs 3-4 (latitude) and 5-6 (longitude).
const POSTAL_CODE_OFFSET_DEG: f64 = 0.0004;

/// Offset per unit of the house number modulo 100.
const HOUSE_NUMBER_OFFSET_DEG: f64 = 0.00002;

/// Digit pairs and house number residues are centered around this value.
const OFFSET_CENTER: f64 = 50.0;

#[rustfmt::skip]
const POSTAL_CODE_OVERRIDES: &[(&str, f64, f64)] = &[
    ("01310100", -23.5613, -46.6565), // Avenida Paulista
    ("01001000", -23.5503, -46.6340), // Praça da Sé
    ("04094050", -23.5874, -46.6576), // Parque Ibirapuera
    ("05508010", -23.5614, -46.7317), // Cidade Universitária
];

#[rustfmt::skip]
const ZONE_CENTROIDS: &[(&str, f64, f64)] = &[
    ("01", -23.5505, -46.6333), // Centro
    ("02", -23.4955, -46.6250), // Zona Norte
    ("03", -23.5450, -46.5700), // Zona Leste
    ("04", -23.6200, -46.6500), // Zona Sul
    ("05", -23.5600, -46.7200), // Zona Oeste
    ("08", -23.5400, -46.4500), // Extremo Leste
];

const CITY_CENTER: (f64, f64) = (-23.5505, -46.6333);

#[derive(Debug, Clone, Copy)]
pub struct RegionalFallback {
    bbox: MapBbox,
}

impl RegionalFallback {
    pub const fn new(bbox: MapBbox) -> Self {
        Self { bbox }
    }

    /// Never fails. The result always lies inside the bounding box.
    pub fn locate(&self, postal_code: &PostalCode, house_number: Option<&HouseNumber>) -> MapPoint {
        let pos = exact_override(postal_code)
            .unwrap_or_else(|| perturbed_zone_centroid(postal_code, house_number));
        self.bbox.clamp_point(pos)
    }

    pub fn resolve(
        &self,
        postal_code: &PostalCode,
        house_number: Option<&HouseNumber>,
    ) -> ResolutionResult {
        ResolutionResult {
            pos: self.locate(postal_code, house_number),
            confidence: ConfidenceTier::None,
            source: ResolutionSource::Fallback,
        }
    }
}

fn exact_override(postal_code: &PostalCode) -> Option<MapPoint> {
    POSTAL_CODE_OVERRIDES
        .iter()
        .find(|(code, _, _)| *code == postal_code.as_str())
        .map(|(_, lat, lng)| MapPoint::from_lat_lng_deg(*lat, *lng))
}

fn zone_centroid(postal_code: &PostalCode) -> (f64, f64) {
    ZONE_CENTROIDS
        .iter()
        .find(|(prefix, _, _)| *prefix == postal_code.zone_prefix())
        .map(|(_, lat, lng)| (*lat, *lng))
        .unwrap_or(CITY_CENTER)
}

fn perturbed_zone_centroid(
    postal_code: &PostalCode,
    house_number: Option<&HouseNumber>,
) -> MapPoint {
    let (lat, lng) = zone_centroid(postal_code);
    let lat_offset = (f64::from(postal_code.digit_pair(2)) - OFFSET_CENTER) * POSTAL_CODE_OFFSET_DEG;
    let lng_offset = (f64::from(postal_code.digit_pair(4)) - OFFSET_CENTER) * POSTAL_CODE_OFFSET_DEG;
    let house_offset = house_number
        .and_then(HouseNumber::numeric_value)
        .map(|nr| (f64::from(nr % 100) - OFFSET_CENTER) * HOUSE_NUMBER_OFFSET_DEG)
        .unwrap_or_default();
    MapPoint::from_lat_lng_deg(
        lat + lat_offset + house_offset,
        lng + lng_offset + house_offset,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bbox::municipal_bbox;

    fn fallback() -> RegionalFallback {
        RegionalFallback::new(municipal_bbox())
    }

    fn cep(s: &str) -> PostalCode {
        PostalCode::normalize(s).unwrap()
    }

    #[test]
    fn exact_override_ignores_house_number() {
        let nr = HouseNumber::parse("1578");
        let result = fallback().resolve(&cep("01310-100"), nr.as_ref());
        assert_eq!((-23.5613, -46.6565), result.pos.to_lat_lng_deg());
        assert_eq!(ConfidenceTier::None, result.confidence);
        assert_eq!(ResolutionSource::Fallback, result.source);
    }

    #[test]
    fn deterministic() {
        let nr = HouseNumber::parse("42");
        let a = fallback().locate(&cep("03178-200"), nr.as_ref());
        let b = fallback().locate(&cep("03178200"), nr.as_ref());
        assert_eq!(a.lat().to_bits(), b.lat().to_bits());
        assert_eq!(a.lng().to_bits(), b.lng().to_bits());
    }

    #[test]
    fn distinct_postal_codes_of_same_zone_are_spread() {
        let a = fallback().locate(&cep("02110-010"), None);
        let b = fallback().locate(&cep("02120-010"), None);
        let c = fallback().locate(&cep("02110-510"), None);
        assert_ne!(a, b);
        assert_ne!(a, c);
        assert_ne!(b, c);
    }

    #[test]
    fn house_number_shifts_position() {
        let code = cep("04520-010");
        let without = fallback().locate(&code, None);
        let with = fallback().locate(&code, HouseNumber::parse("77").as_ref());
        assert_ne!(without, with);
        // 27 * 0.00002 degrees on both axes
        assert!((with.lat() - without.lat() - 0.00054).abs() < 1e-9);
        // Non-numeric house numbers don't shift
        assert_eq!(
            without,
            fallback().locate(&code, HouseNumber::parse("s/n").as_ref())
        );
    }

    #[test]
    fn unknown_zone_uses_city_center_and_stays_in_bbox() {
        let bbox = municipal_bbox();
        let pos = fallback().locate(&cep("99999-999"), HouseNumber::parse("99").as_ref());
        assert!(bbox.contains_point(pos));
        let pos = fallback().locate(&cep("08000-000"), None);
        assert!(bbox.contains_point(pos));
        // 06 is not in the zone table
        let pos = fallback().locate(&cep("06505-000"), None);
        assert_eq!(CITY_CENTER, pos.to_lat_lng_deg());
    }
}
