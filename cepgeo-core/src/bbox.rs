use cepgeo_entities::geo::*;

// Municipality of São Paulo
const MUNICIPAL_SW_LAT_DEG: f64 = -24.01;
const MUNICIPAL_SW_LNG_DEG: f64 = -46.83;
const MUNICIPAL_NE_LAT_DEG: f64 = -23.35;
const MUNICIPAL_NE_LNG_DEG: f64 = -46.36;

/// The fixed rectangle every accepted coordinate must lie in.
pub fn municipal_bbox() -> MapBbox {
    MapBbox::new(
        MapPoint::from_lat_lng_deg(MUNICIPAL_SW_LAT_DEG, MUNICIPAL_SW_LNG_DEG),
        MapPoint::from_lat_lng_deg(MUNICIPAL_NE_LAT_DEG, MUNICIPAL_NE_LNG_DEG),
    )
}

pub trait InBBox {
    fn in_bbox(&self, bbox: &MapBbox) -> bool;
}

impl InBBox for MapPoint {
    fn in_bbox(&self, bbox: &MapBbox) -> bool {
        bbox.contains_point(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn municipal_bbox_is_valid() {
        assert!(municipal_bbox().is_valid());
    }

    #[test]
    fn filter_by_municipal_bbox() {
        let bbox = municipal_bbox();
        let points = [
            // Avenida Paulista
            (-23.5613, -46.6565),
            // Campinas
            (-22.9099, -47.0626),
            // Ipiranga
            (-23.5868, -46.6100),
            // Rio de Janeiro
            (-22.9068, -43.1729),
        ]
        .map(|(lat, lng)| MapPoint::from_lat_lng_deg(lat, lng));
        assert_eq!(2, points.iter().filter(|pt| pt.in_bbox(&bbox)).count());
        assert!(!MapPoint::from_lat_lng_deg(-23.5, -46.2).in_bbox(&bbox));
    }
}
