pub mod geocode;
pub mod postal_lookup;
