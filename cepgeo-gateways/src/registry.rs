//! Declarative list of all known geocoding providers.
//!
//! The list is evaluated once at startup against the available
//! credentials. The resulting active providers are fixed afterwards.

use cepgeo_core::gateways::geocode::GeocodingGateway;
use std::sync::Arc;

use crate::geocoding::*;

#[derive(Debug, Clone, Default)]
pub struct GeocodingCredentials {
    pub nominatim_enabled: bool,
    pub opencage_api_key: Option<String>,
    pub locationiq_api_key: Option<String>,
    pub google_maps_api_key: Option<String>,
}

fn has_key(key: &Option<String>) -> bool {
    key.as_deref().is_some_and(|key| !key.trim().is_empty())
}

fn key(key: &Option<String>) -> String {
    key.as_deref().unwrap_or_default().trim().to_owned()
}

pub struct ProviderDescriptor {
    pub id: &'static str,
    pub enabled: fn(&GeocodingCredentials) -> bool,
    pub build: fn(&GeocodingCredentials, reqwest::Client) -> Arc<dyn GeocodingGateway>,
}

impl std::fmt::Debug for ProviderDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderDescriptor")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

/// Known providers in query order.
pub const PROVIDERS: &[ProviderDescriptor] = &[
    ProviderDescriptor {
        id: NOMINATIM_ID,
        enabled: |creds| creds.nominatim_enabled,
        build: |_, client| Arc::new(Nominatim::new(client)),
    },
    ProviderDescriptor {
        id: OPENCAGE_ID,
        enabled: |creds| has_key(&creds.opencage_api_key),
        build: |creds, client| Arc::new(OpenCage::new(client, key(&creds.opencage_api_key))),
    },
    ProviderDescriptor {
        id: LOCATIONIQ_ID,
        enabled: |creds| has_key(&creds.locationiq_api_key),
        build: |creds, client| Arc::new(LocationIq::new(client, key(&creds.locationiq_api_key))),
    },
    ProviderDescriptor {
        id: GOOGLE_ID,
        enabled: |creds| has_key(&creds.google_maps_api_key),
        build: |creds, client| Arc::new(Google::new(client, key(&creds.google_maps_api_key))),
    },
];

pub fn active_provider_ids(credentials: &GeocodingCredentials) -> Vec<&'static str> {
    PROVIDERS
        .iter()
        .filter(|provider| (provider.enabled)(credentials))
        .map(|provider| provider.id)
        .collect()
}

pub fn active_providers(
    credentials: &GeocodingCredentials,
    client: &reqwest::Client,
) -> Vec<Arc<dyn GeocodingGateway>> {
    PROVIDERS
        .iter()
        .filter(|provider| (provider.enabled)(credentials))
        .map(|provider| {
            log::debug!("Activating geocoding provider {}", provider.id);
            (provider.build)(credentials, client.clone())
        })
        .collect()
}
