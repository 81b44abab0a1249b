use anyhow::anyhow;
use diesel::{prelude::*, result::Error as DieselError};

use cepgeo_core::{
    entities::*,
    repositories::{self as repo, AddressCacheStore},
};

use super::*;

type Result<T> = std::result::Result<T, repo::Error>;

pub fn from_diesel_err(err: DieselError) -> repo::Error {
    match err {
        DieselError::NotFound => repo::Error::NotFound,
        _ => repo::Error::Other(err.into()),
    }
}

fn load_address_cache_entry(from: models::AddressCacheEntry) -> Result<AddressCacheEntry> {
    let models::AddressCacheEntry {
        postal_code,
        house_number,
        street,
        neighborhood,
        city,
        state,
        lat,
        lng,
        confidence,
        created_at,
        updated_at,
    } = from;
    let postal_code = PostalCode::normalize(&postal_code).map_err(|err| {
        // This should never happen if postal codes have been normalized on insert
        log::error!("Invalid postal code '{postal_code}' in address cache: {err}");
        anyhow!(err)
    })?;
    let pos = match (lat, lng) {
        (Some(lat), Some(lng)) => Some(
            MapPoint::try_from_lat_lng_deg(lat, lng)
                .map_err(|err| anyhow!("Invalid cached position of {postal_code}: {err}"))?,
        ),
        _ => None,
    };
    let confidence = confidence.and_then(|tier| {
        let confidence = ConfidenceTier::try_from_primitive(tier);
        if confidence.is_none() {
            log::warn!("Ignoring invalid confidence tier {tier} of {postal_code}");
        }
        confidence
    });
    Ok(AddressCacheEntry {
        address: PostalAddress {
            postal_code,
            street,
            neighborhood,
            city,
            state,
        },
        house_number: house_number.as_deref().and_then(HouseNumber::parse),
        pos,
        confidence,
        created_at: Timestamp::from_millis(created_at),
        updated_at: Timestamp::from_millis(updated_at),
    })
}

fn new_address_cache_entry(entry: &AddressCacheEntry) -> models::NewAddressCacheEntry<'_> {
    let AddressCacheEntry {
        address,
        house_number,
        pos,
        confidence,
        created_at,
        updated_at,
    } = entry;
    models::NewAddressCacheEntry {
        postal_code: address.postal_code.as_str(),
        house_number: house_number.as_ref().map(HouseNumber::as_str),
        street: address.street.as_deref(),
        neighborhood: address.neighborhood.as_deref(),
        city: address.city.as_deref(),
        state: address.state.as_deref(),
        lat: pos.map(MapPoint::lat),
        lng: pos.map(MapPoint::lng),
        confidence: confidence.map(ConfidenceTier::to_primitive),
        created_at: created_at.as_millis(),
        updated_at: updated_at.as_millis(),
    }
}

impl AddressCacheStore for Connections {
    fn get(&self, postal_code: &PostalCode) -> Result<Option<AddressCacheEntry>> {
        use schema::address_cache::dsl;
        let mut db = self.shared()?;
        schema::address_cache::table
            .filter(dsl::postal_code.eq(postal_code.as_str()))
            .select(models::AddressCacheEntry::as_select())
            .first(db.sqlite_conn())
            .optional()
            .map_err(from_diesel_err)?
            .map(load_address_cache_entry)
            .transpose()
    }

    fn upsert(&self, entry: &AddressCacheEntry) -> Result<()> {
        use schema::address_cache::dsl;
        let new_entry = new_address_cache_entry(entry);
        let changes = models::UpdateAddressCacheEntry::from(&new_entry);
        let mut db = self.exclusive()?;
        diesel::insert_into(schema::address_cache::table)
            .values(&new_entry)
            .on_conflict(dsl::postal_code)
            .do_update()
            .set(&changes)
            .execute(db.sqlite_conn())
            .map_err(from_diesel_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepgeo_entities::builders::*;

    fn connections() -> Connections {
        let connections = Connections::init(":memory:", 1).unwrap();
        run_embedded_database_migrations(connections.exclusive().unwrap()).unwrap();
        connections
    }

    fn entry(pos: Option<(f64, f64)>) -> AddressCacheEntry {
        let address = PostalAddress::build()
            .postal_code("01310-100")
            .street("Avenida Paulista")
            .neighborhood("Bela Vista")
            .city("São Paulo")
            .state("SP")
            .finish();
        AddressCacheEntry {
            address,
            house_number: HouseNumber::parse("1578"),
            pos: pos.map(|(lat, lng)| MapPoint::from_lat_lng_deg(lat, lng)),
            confidence: pos.map(|_| ConfidenceTier::High),
            created_at: Timestamp::from_millis(1_000),
            updated_at: Timestamp::from_millis(1_000),
        }
    }

    #[test]
    fn get_missing_entry() {
        let db = connections();
        let code = PostalCode::normalize("00000000").unwrap();
        assert!(db.get(&code).unwrap().is_none());
    }

    #[test]
    fn insert_and_get_entry() {
        let db = connections();
        let entry = entry(Some((-23.5613, -46.6565)));
        db.upsert(&entry).unwrap();
        let loaded = db.get(&entry.address.postal_code).unwrap().unwrap();
        assert_eq!(entry, loaded);
    }

    #[test]
    fn address_without_position_is_pending() {
        let db = connections();
        let entry = entry(None);
        db.upsert(&entry).unwrap();
        let loaded = db.get(&entry.address.postal_code).unwrap().unwrap();
        assert!(loaded.pos.is_none());
        assert!(loaded.confidence.is_none());
        assert_eq!(entry.address, loaded.address);
    }

    #[test]
    fn upsert_overwrites_all_but_creation_time() {
        let db = connections();
        let pending = entry(None);
        db.upsert(&pending).unwrap();

        let mut resolved = entry(Some((-23.5613, -46.6565)));
        resolved.house_number = None;
        resolved.address.neighborhood = None;
        resolved.created_at = Timestamp::from_millis(5_000);
        resolved.updated_at = Timestamp::from_millis(5_000);
        db.upsert(&resolved).unwrap();

        let loaded = db.get(&resolved.address.postal_code).unwrap().unwrap();
        assert_eq!(resolved.pos, loaded.pos);
        assert_eq!(Some(ConfidenceTier::High), loaded.confidence);
        assert_eq!(None, loaded.house_number);
        assert_eq!(None, loaded.address.neighborhood);
        assert_eq!(1_000, loaded.created_at.as_millis());
        assert_eq!(5_000, loaded.updated_at.as_millis());

        // Idempotent
        db.upsert(&resolved).unwrap();
        assert_eq!(loaded, db.get(&resolved.address.postal_code).unwrap().unwrap());
    }
}
