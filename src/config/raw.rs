use duration_str::deserialize_duration;
use serde::Deserialize;
use std::time::Duration;

const DEFAULT_CONFIG_FILE: &str = include_str!("cepgeo.default.toml");

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
    pub db: Option<Db>,
    pub postal_lookup: Option<PostalLookup>,
    pub geocoding: Option<Geocoding>,
    pub gateway: Option<Gateway>,
    pub consensus: Option<Consensus>,
    pub bbox: Option<Bbox>,
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_FILE).expect("Default configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Db {
    pub connection_sqlite: String,
    pub connection_pool_size: u8,
}

impl Default for Db {
    fn default() -> Self {
        Config::default().db.expect("DB configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct PostalLookup {
    pub base_url: String,
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
}

impl Default for PostalLookup {
    fn default() -> Self {
        Config::default()
            .postal_lookup
            .expect("Postal lookup configuration")
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Geocoding {
    #[serde(deserialize_with = "deserialize_duration")]
    pub timeout: Duration,
    pub max_concurrent_requests: usize,
    #[serde(default)]
    pub early_exit: bool,
    #[serde(default = "nominatim_enabled")]
    pub nominatim: bool,
}

const fn nominatim_enabled() -> bool {
    true
}

impl Default for Geocoding {
    fn default() -> Self {
        Config::default()
            .geocoding
            .expect("Geocoding configuration")
    }
}

#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Gateway {
    pub opencage: Option<ApiKey>,
    pub locationiq: Option<ApiKey>,
    pub google: Option<ApiKey>,
}

#[derive(Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ApiKey {
    pub api_key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Consensus {
    pub merge_distance_meters: f64,
    pub high_min_providers: usize,
    pub medium_min_providers: usize,
}

impl Default for Consensus {
    fn default() -> Self {
        Config::default()
            .consensus
            .expect("Consensus configuration")
    }
}

/// Corners as `[lat, lng]` in degrees.
#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Bbox {
    pub south_west: [f64; 2],
    pub north_east: [f64; 2],
}

impl Default for Bbox {
    fn default() -> Self {
        Config::default().bbox.expect("Bounding box configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_config_from_file() {
        let cfg: Config = toml::from_str(DEFAULT_CONFIG_FILE).unwrap();
        assert!(cfg.db.is_some());
        assert!(cfg.postal_lookup.is_some());
        assert!(cfg.geocoding.is_some());
        assert!(cfg.gateway.is_none());
        assert!(cfg.consensus.is_some());
        assert!(cfg.bbox.is_some());
    }

    #[test]
    fn default_geocoding_config() {
        let cfg = Geocoding::default();
        assert_eq!(Duration::from_secs(10), cfg.timeout);
        assert_eq!(8, cfg.max_concurrent_requests);
        assert!(!cfg.early_exit);
        assert!(cfg.nominatim);
    }

    #[test]
    fn nominatim_enabled_unless_disabled() {
        let cfg: Config = toml::from_str(
            r#"
[geocoding]
timeout = "12s"
max-concurrent-requests = 4
"#,
        )
        .unwrap();
        let geocoding = cfg.geocoding.unwrap();
        assert!(geocoding.nominatim);
        assert!(!geocoding.early_exit);

        let cfg: Config = toml::from_str(
            r#"
[geocoding]
timeout = "12s"
max-concurrent-requests = 4
nominatim = false
"#,
        )
        .unwrap();
        assert!(!cfg.geocoding.unwrap().nominatim);
    }

    #[test]
    fn parse_gateway_credentials() {
        let cfg: Config = toml::from_str(
            r#"
[gateway.opencage]
api-key = "foo"

[gateway.google]
api-key = "bar"
"#,
        )
        .unwrap();
        let gateway = cfg.gateway.unwrap();
        assert_eq!("foo", gateway.opencage.unwrap().api_key);
        assert!(gateway.locationiq.is_none());
        assert_eq!("bar", gateway.google.unwrap().api_key);
        assert!(cfg.db.is_none());
    }
}
