use super::prelude::*;
use itertools::Itertools;

fn join_query_parts<'a>(parts: impl IntoIterator<Item = Option<&'a str>>) -> String {
    parts.into_iter().flatten().join(", ")
}

/// Query texts for geocoding the address, from most to least specific.
///
/// Duplicate query texts are dropped, keeping the first (most specific)
/// strategy that produced them.
pub fn address_variations(
    addr: &PostalAddress,
    house_number: Option<&HouseNumber>,
) -> Vec<AddressVariation> {
    let street = addr.street();
    let neighborhood = addr.neighborhood();
    let city = addr.city();
    let state = addr.state();
    let postal_code = addr.postal_code.formatted();
    let number = house_number.map(HouseNumber::as_str);

    let candidates = [
        (
            GeocodingStrategy::FullAddress,
            street.and(number).map(|_| {
                join_query_parts([street, number, neighborhood, city, state])
            }),
        ),
        (
            GeocodingStrategy::StreetWithNumber,
            street
                .and(number)
                .map(|_| join_query_parts([street, number, city, state])),
        ),
        (
            GeocodingStrategy::StreetAndNeighborhood,
            street.map(|_| join_query_parts([street, neighborhood, city, state])),
        ),
        (
            GeocodingStrategy::StreetAndPostalCode,
            street.map(|_| join_query_parts([street, Some(postal_code.as_str()), city])),
        ),
        (
            GeocodingStrategy::StreetAndCity,
            street.map(|_| join_query_parts([street, city, state])),
        ),
        (
            GeocodingStrategy::NeighborhoodAndCity,
            neighborhood.map(|_| join_query_parts([neighborhood, city, state])),
        ),
    ];

    candidates
        .into_iter()
        .filter_map(|(strategy, query)| query.map(|query| AddressVariation { strategy, query }))
        .unique_by(|variation| variation.query.clone())
        .collect()
}
