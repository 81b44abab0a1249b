// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;
use diesel::prelude::*;

#[derive(Insertable)]
#[diesel(table_name = address_cache)]
pub struct NewAddressCacheEntry<'a> {
    pub postal_code: &'a str,
    pub house_number: Option<&'a str>,
    pub street: Option<&'a str>,
    pub neighborhood: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub confidence: Option<i16>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Overwritten columns on conflict, i.e. everything except
/// the key and the creation timestamp.
#[derive(AsChangeset)]
#[diesel(table_name = address_cache)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateAddressCacheEntry<'a> {
    pub house_number: Option<&'a str>,
    pub street: Option<&'a str>,
    pub neighborhood: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub confidence: Option<i16>,
    pub updated_at: i64,
}

impl<'a> From<&NewAddressCacheEntry<'a>> for UpdateAddressCacheEntry<'a> {
    fn from(from: &NewAddressCacheEntry<'a>) -> Self {
        let NewAddressCacheEntry {
            postal_code: _,
            house_number,
            street,
            neighborhood,
            city,
            state,
            lat,
            lng,
            confidence,
            created_at: _,
            updated_at,
        } = *from;
        Self {
            house_number,
            street,
            neighborhood,
            city,
            state,
            lat,
            lng,
            confidence,
            updated_at,
        }
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = address_cache)]
pub struct AddressCacheEntry {
    pub postal_code: String,
    pub house_number: Option<String>,
    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub confidence: Option<i16>,
    pub created_at: i64,
    pub updated_at: i64,
}
