use serde::{Deserialize, Serialize};

#[cfg(feature = "entity-conversions")]
mod conv;

#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, Copy, PartialEq, Eq))]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceTier {
    High,
    Medium,
    Low,
    None,
}

/// Resolved coordinate of a postal code.
///
/// Consumers must not expect `high` confidence and should treat
/// `low` and `none` as usable but approximate.
#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct ResolutionResult {
    pub lat                : f64,
    pub lng                : f64,
    pub confidence_tier    : ConfidenceTier,
    pub source_attribution : Vec<String>,
}

#[rustfmt::skip]
#[derive(Serialize, Deserialize)]
#[cfg_attr(feature = "extra-derive", derive(Debug, Clone, PartialEq))]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    pub postal_code     : String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_number    : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street          : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub neighborhood    : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city            : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state           : Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat             : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng             : Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confidence_tier : Option<ConfidenceTier>,
    pub created         : i64,
    pub updated         : i64,
}
