use anyhow::Result;
use cepgeo_application::prelude::MAX_REQUEST_TIMEOUT;
use cepgeo_core::gateways::geocode::GeocodingGateway;
use cepgeo_gateways::{http_client, registry, viacep::ViaCep};
use std::sync::Arc;

use crate::config;

pub fn postal_lookup_gateway(cfg: &config::PostalLookup) -> Result<ViaCep> {
    let client = http_client(cfg.timeout)?;
    log::info!("Use postal lookup gateway {}", cfg.base_url);
    Ok(ViaCep::new(client, cfg.base_url.clone()))
}

pub fn geocoding_gateways(cfg: &config::Geocoding) -> Result<Vec<Arc<dyn GeocodingGateway>>> {
    // Each request is bounded by the pool, the client only
    // guards against connections that are never released.
    let client = http_client(MAX_REQUEST_TIMEOUT)?;
    let providers = registry::active_providers(&cfg.credentials, &client);
    if providers.is_empty() {
        log::warn!("No geocoding provider configured: use the regional fallback only");
    } else {
        let ids: Vec<_> = providers.iter().map(|provider| provider.id()).collect();
        log::info!("Use geocoding providers: {}", ids.join(", "));
    }
    Ok(providers)
}
