use crate::{geo::MapPoint, time::Timestamp};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// How a query text was derived from a postal address,
/// ordered from most to least specific.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, AsRefStr, Display, EnumIter, EnumString,
)]
#[strum(serialize_all = "snake_case")]
pub enum GeocodingStrategy {
    FullAddress,
    StreetWithNumber,
    StreetAndNeighborhood,
    StreetAndPostalCode,
    StreetAndCity,
    NeighborhoodAndCity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressVariation {
    pub strategy: GeocodingStrategy,
    pub query: String,
}

/// A single coordinate returned by one provider for one variation.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResult {
    pub provider: String,
    pub strategy: GeocodingStrategy,
    pub pos: MapPoint,
    pub received_at: Timestamp,
}
