use crate::{
    address::PostalAddress, geo::MapPoint, postal_code::HouseNumber, resolution::ConfidenceTier,
    time::Timestamp,
};

/// A permanently cached postal address.
///
/// The postal code of the address is the unique key. An entry
/// without a position is still pending geocoding.
#[derive(Debug, Clone, PartialEq)]
pub struct AddressCacheEntry {
    pub address: PostalAddress,
    pub house_number: Option<HouseNumber>,
    pub pos: Option<MapPoint>,
    pub confidence: Option<ConfidenceTier>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl AddressCacheEntry {
    /// The cached position is reusable for the requested house number
    /// if none was requested or if it matches the cached one.
    pub fn is_reusable_for(&self, house_number: Option<&HouseNumber>) -> bool {
        match (house_number, &self.house_number) {
            (None, _) => true,
            (Some(requested), Some(cached)) => requested == cached,
            (Some(_), None) => false,
        }
    }
}
