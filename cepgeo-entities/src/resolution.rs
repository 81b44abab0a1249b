use crate::geo::MapPoint;
use num_derive::{FromPrimitive, ToPrimitive};
use strum::{AsRefStr, Display, EnumString};

pub type ConfidenceTierPrimitive = i16;

/// Coarse trust label of a resolved coordinate.
///
/// `None` marks coordinates that are usable but approximate,
/// i.e. not backed by any agreeing geocoding provider.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    FromPrimitive,
    ToPrimitive,
    AsRefStr,
    Display,
    EnumString,
)]
#[strum(serialize_all = "lowercase")]
pub enum ConfidenceTier {
    None = 0,
    Low = 1,
    Medium = 2,
    High = 3,
}

impl ConfidenceTier {
    pub fn to_primitive(self) -> ConfidenceTierPrimitive {
        num_traits::ToPrimitive::to_i16(&self).unwrap_or_default()
    }

    pub fn try_from_primitive(from: ConfidenceTierPrimitive) -> Option<Self> {
        num_traits::FromPrimitive::from_i16(from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    /// Distinct provider ids that contributed to the winning cluster.
    Providers(Vec<String>),
    Fallback,
}

impl ResolutionSource {
    pub const CACHE: &'static str = "cache";
    pub const FALLBACK: &'static str = "fallback";

    pub fn attribution(&self) -> Vec<String> {
        match self {
            Self::Cache => vec![Self::CACHE.to_owned()],
            Self::Providers(ids) => ids.clone(),
            Self::Fallback => vec![Self::FALLBACK.to_owned()],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    pub pos: MapPoint,
    pub confidence: ConfidenceTier,
    pub source: ResolutionSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_primitives() {
        for tier in [
            ConfidenceTier::None,
            ConfidenceTier::Low,
            ConfidenceTier::Medium,
            ConfidenceTier::High,
        ] {
            assert_eq!(
                Some(tier),
                ConfidenceTier::try_from_primitive(tier.to_primitive())
            );
        }
        assert_eq!(None, ConfidenceTier::try_from_primitive(4));
        assert!(ConfidenceTier::High > ConfidenceTier::Medium);
        assert_eq!("medium", ConfidenceTier::Medium.as_ref());
    }

    #[test]
    fn attribution() {
        assert_eq!(vec!["cache"], ResolutionSource::Cache.attribution());
        assert_eq!(vec!["fallback"], ResolutionSource::Fallback.attribution());
        assert_eq!(
            vec!["nominatim", "opencage"],
            ResolutionSource::Providers(vec!["nominatim".into(), "opencage".into()]).attribution()
        );
    }
}
