use anyhow::{anyhow, Result};
use cepgeo_application::prelude::ProviderPoolConfig;
use cepgeo_core::{
    entities::{Distance, MapBbox, MapPoint},
    usecases::{ConfidenceThresholds, ConsensusConfig},
};
use cepgeo_gateways::registry::GeocodingCredentials;
use std::{env, fs, io::ErrorKind, path::Path, time::Duration};

mod raw;

const DEFAULT_CONFIG_FILE_NAME: &str = "cepgeo.toml";

const ENV_NAME_DB_URL: &str = "DATABASE_URL";
const ENV_NAME_OPENCAGE_API_KEY: &str = "OPENCAGE_API_KEY";
const ENV_NAME_LOCATIONIQ_API_KEY: &str = "LOCATIONIQ_API_KEY";
const ENV_NAME_GOOGLE_MAPS_API_KEY: &str = "GOOGLE_MAPS_API_KEY";

pub struct Config {
    pub db: Db,
    pub postal_lookup: PostalLookup,
    pub geocoding: Geocoding,
    pub consensus: ConsensusConfig,
    pub bbox: MapBbox,
}

impl Config {
    pub fn try_load_from_file_or_default<P: AsRef<Path>>(file_path: Option<P>) -> Result<Self> {
        let file_path: &Path = file_path.as_ref().map(|p| p.as_ref()).unwrap_or_else(|| {
            log::info!("No configuration file specified. load {DEFAULT_CONFIG_FILE_NAME}");
            Path::new(DEFAULT_CONFIG_FILE_NAME)
        });

        let raw_config = match fs::read_to_string(file_path) {
            Ok(cfg_string) => toml::from_str(&cfg_string)?,
            Err(err) => match err.kind() {
                ErrorKind::NotFound => {
                    log::info!(
                        "{} not found => load default configuration.",
                        file_path.display()
                    );
                    Ok(raw::Config::default())
                }
                _ => Err(err),
            }?,
        };
        let mut cfg = Self::try_from(raw_config)?;
        cfg.apply_env_overrides();
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(db_url) = env::var(ENV_NAME_DB_URL) {
            self.db.conn_sqlite = db_url;
        }
        let credentials = &mut self.geocoding.credentials;
        for (name, api_key) in [
            (ENV_NAME_OPENCAGE_API_KEY, &mut credentials.opencage_api_key),
            (ENV_NAME_LOCATIONIQ_API_KEY, &mut credentials.locationiq_api_key),
            (ENV_NAME_GOOGLE_MAPS_API_KEY, &mut credentials.google_maps_api_key),
        ] {
            if let Ok(key) = env::var(name) {
                log::debug!("Using {name} from the environment");
                *api_key = Some(key);
            }
        }
    }
}

pub struct Db {
    /// SQLite connection
    pub conn_sqlite: String,
    pub conn_pool_size: u8,
}

pub struct PostalLookup {
    pub base_url: String,
    pub timeout: Duration,
}

pub struct Geocoding {
    pub pool: ProviderPoolConfig,
    pub early_exit: bool,
    pub credentials: GeocodingCredentials,
}

fn map_point([lat, lng]: [f64; 2]) -> Result<MapPoint> {
    Ok(MapPoint::try_from_lat_lng_deg(lat, lng)?)
}

impl TryFrom<raw::Config> for Config {
    type Error = anyhow::Error;
    fn try_from(from: raw::Config) -> Result<Self> {
        let raw::Config {
            db,
            postal_lookup,
            geocoding,
            gateway,
            consensus,
            bbox,
        } = from;

        let raw::Db {
            connection_sqlite,
            connection_pool_size,
        } = db.unwrap_or_default();
        if connection_pool_size == 0 {
            return Err(anyhow!("Invalid database connection pool size"));
        }
        let db = Db {
            conn_sqlite: connection_sqlite,
            conn_pool_size: connection_pool_size,
        };

        let raw::PostalLookup { base_url, timeout } = postal_lookup.unwrap_or_default();
        let postal_lookup = PostalLookup {
            base_url: base_url.trim_end_matches('/').to_owned(),
            timeout,
        };

        let raw::Geocoding {
            timeout,
            max_concurrent_requests,
            early_exit,
            nominatim,
        } = geocoding.unwrap_or_default();
        if max_concurrent_requests == 0 {
            return Err(anyhow!("At least 1 concurrent geocoding request is required"));
        }
        let raw::Gateway {
            opencage,
            locationiq,
            google,
        } = gateway.unwrap_or_default();
        let credentials = GeocodingCredentials {
            nominatim_enabled: nominatim,
            opencage_api_key: opencage.map(|gw| gw.api_key),
            locationiq_api_key: locationiq.map(|gw| gw.api_key),
            google_maps_api_key: google.map(|gw| gw.api_key),
        };
        let geocoding = Geocoding {
            pool: ProviderPoolConfig {
                request_timeout: timeout,
                max_concurrent_requests,
            },
            early_exit,
            credentials,
        };

        let raw::Consensus {
            merge_distance_meters,
            high_min_providers,
            medium_min_providers,
        } = consensus.unwrap_or_default();
        let merge_distance = Distance::from_meters(merge_distance_meters);
        if !merge_distance.is_valid() || merge_distance_meters <= 0.0 {
            return Err(anyhow!("Invalid merge distance: {merge_distance_meters} m"));
        }
        let thresholds = ConfidenceThresholds {
            high: high_min_providers,
            medium: medium_min_providers,
        };
        if !thresholds.is_valid() {
            return Err(anyhow!(
                "Invalid confidence thresholds: high = {high_min_providers}, medium = {medium_min_providers}"
            ));
        }
        let consensus = ConsensusConfig {
            merge_distance,
            thresholds,
        };

        let raw::Bbox {
            south_west,
            north_east,
        } = bbox.unwrap_or_default();
        let bbox = MapBbox::new(map_point(south_west)?, map_point(north_east)?);
        if !bbox.is_valid() {
            return Err(anyhow!("Invalid bounding box: {bbox}"));
        }

        Ok(Self {
            db,
            postal_lookup,
            geocoding,
            consensus,
            bbox,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cepgeo_core::bbox::municipal_bbox;

    fn parse(toml: &str) -> Result<Config> {
        Config::try_from(toml::from_str::<raw::Config>(toml).unwrap())
    }

    #[test]
    fn load_default_config() {
        let file: Option<&Path> = None;
        let _: Config = Config::try_load_from_file_or_default(file).unwrap();
    }

    #[test]
    fn default_config_values() {
        let cfg = Config::try_from(raw::Config::default()).unwrap();
        assert_eq!("https://viacep.com.br/ws", cfg.postal_lookup.base_url);
        assert_eq!(ConsensusConfig::default(), cfg.consensus);
        assert_eq!(ProviderPoolConfig::default(), cfg.geocoding.pool);
        assert_eq!(municipal_bbox(), cfg.bbox);
        assert!(cfg.geocoding.credentials.nominatim_enabled);
        assert!(cfg.geocoding.credentials.opencage_api_key.is_none());
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let cfg = parse(
            r#"
[consensus]
merge-distance-meters = 50.0
high-min-providers = 4
medium-min-providers = 2

[gateway.locationiq]
api-key = "secret"
"#,
        )
        .unwrap();
        assert_eq!(50.0, cfg.consensus.merge_distance.to_meters());
        assert_eq!(4, cfg.consensus.thresholds.high);
        assert_eq!(Some("secret"), cfg.geocoding.credentials.locationiq_api_key.as_deref());
        assert_eq!(10, cfg.db.conn_pool_size);
    }

    #[test]
    fn reject_invalid_thresholds() {
        assert!(parse(
            r#"
[consensus]
merge-distance-meters = 100.0
high-min-providers = 1
medium-min-providers = 2
"#,
        )
        .is_err());
    }

    #[test]
    fn reject_invalid_bbox() {
        assert!(parse(
            r#"
[bbox]
south-west = [-23.35, -46.36]
north-east = [-24.01, -46.83]
"#,
        )
        .is_err());
        assert!(parse(
            r#"
[bbox]
south-west = [-100.0, -46.83]
north-east = [-23.35, -46.36]
"#,
        )
        .is_err());
    }
}
