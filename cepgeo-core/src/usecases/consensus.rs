//! Spatial consensus of geocoding results.
//!
//! Results are clustered in a single agglomerative pass: each result joins
//! the nearest open cluster if the haversine distance to its running-mean
//! centroid does not exceed the merge distance, otherwise it opens a new
//! cluster. The winning cluster has the most members. Ties are broken by
//! the number of distinct providers and finally by creation order.
//!
//! The confidence tier counts distinct providers in the winning cluster,
//! a provider agreeing with itself across variations counts once.

use super::prelude::*;
use itertools::Itertools;
use std::cmp::{Ordering, Reverse};

pub const DEFAULT_MERGE_DISTANCE: Distance = Distance::from_meters(100.0);
pub const DEFAULT_HIGH_MIN_MEMBERS: usize = 3;
pub const DEFAULT_MEDIUM_MIN_MEMBERS: usize = 2;

/// Minimum number of distinct agreeing providers per confidence tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceThresholds {
    pub high: usize,
    pub medium: usize,
}

impl Default for ConfidenceThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_MIN_MEMBERS,
            medium: DEFAULT_MEDIUM_MIN_MEMBERS,
        }
    }
}

impl ConfidenceThresholds {
    pub fn is_valid(&self) -> bool {
        self.medium >= 1 && self.high >= self.medium
    }

    pub fn tier(&self, providers: usize) -> ConfidenceTier {
        debug_assert!(self.is_valid());
        if providers == 0 {
            ConfidenceTier::None
        } else if providers >= self.high {
            ConfidenceTier::High
        } else if providers >= self.medium {
            ConfidenceTier::Medium
        } else {
            ConfidenceTier::Low
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsensusConfig {
    pub merge_distance: Distance,
    pub thresholds: ConfidenceThresholds,
}

impl Default for ConsensusConfig {
    fn default() -> Self {
        Self {
            merge_distance: DEFAULT_MERGE_DISTANCE,
            thresholds: Default::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsensusCluster {
    lat_sum: f64,
    lng_sum: f64,
    members: usize,
    providers: Vec<String>,
    created: usize,
}

impl ConsensusCluster {
    fn open(created: usize, result: &ProviderResult) -> Self {
        let (lat, lng) = result.pos.to_lat_lng_deg();
        Self {
            lat_sum: lat,
            lng_sum: lng,
            members: 1,
            providers: vec![result.provider.clone()],
            created,
        }
    }

    fn merge(&mut self, result: &ProviderResult) {
        let (lat, lng) = result.pos.to_lat_lng_deg();
        self.lat_sum += lat;
        self.lng_sum += lng;
        self.members += 1;
        self.providers.push(result.provider.clone());
    }

    /// The running mean of all member coordinates.
    pub fn centroid(&self) -> MapPoint {
        debug_assert!(self.members > 0);
        let n = self.members as f64;
        MapPoint::from_lat_lng_deg(self.lat_sum / n, self.lng_sum / n)
    }

    pub fn member_count(&self) -> usize {
        self.members
    }

    /// Provider ids of all members in order of arrival, including duplicates.
    pub fn providers(&self) -> &[String] {
        &self.providers
    }

    pub fn distinct_providers(&self) -> Vec<String> {
        self.providers.iter().unique().cloned().collect()
    }

    pub fn distinct_provider_count(&self) -> usize {
        self.providers.iter().unique().count()
    }

    pub fn created(&self) -> usize {
        self.created
    }

    fn rank(&self) -> (usize, usize, Reverse<usize>) {
        (
            self.members,
            self.distinct_provider_count(),
            Reverse(self.created),
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Consensus {
    Agreed {
        pos: MapPoint,
        confidence: ConfidenceTier,
        members: usize,
        providers: Vec<String>,
    },
    NoConsensus,
}

impl Consensus {
    pub fn confidence(&self) -> ConfidenceTier {
        match self {
            Self::Agreed { confidence, .. } => *confidence,
            Self::NoConsensus => ConfidenceTier::None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConsensusEngine {
    config: ConsensusConfig,
    clusters: Vec<ConsensusCluster>,
}

impl ConsensusEngine {
    pub fn new(config: ConsensusConfig) -> Self {
        Self {
            config,
            clusters: Vec::new(),
        }
    }

    pub fn push(&mut self, result: &ProviderResult) {
        let nearest = self
            .clusters
            .iter()
            .enumerate()
            .map(|(idx, cluster)| (idx, MapPoint::distance(cluster.centroid(), result.pos)))
            .min_by(|(_, lhs), (_, rhs)| lhs.partial_cmp(rhs).unwrap_or(Ordering::Equal));
        match nearest {
            Some((idx, distance)) if distance <= self.config.merge_distance => {
                self.clusters[idx].merge(result);
            }
            _ => {
                let created = self.clusters.len();
                self.clusters.push(ConsensusCluster::open(created, result));
            }
        }
    }

    pub fn clusters(&self) -> &[ConsensusCluster] {
        &self.clusters
    }

    pub fn best(&self) -> Option<&ConsensusCluster> {
        self.clusters.iter().max_by_key(|cluster| cluster.rank())
    }

    pub fn confidence(&self) -> ConfidenceTier {
        self.best()
            .map(|cluster| self.config.thresholds.tier(cluster.distinct_provider_count()))
            .unwrap_or(ConfidenceTier::None)
    }

    pub fn finish(self) -> Consensus {
        let Some(best) = self.best() else {
            return Consensus::NoConsensus;
        };
        Consensus::Agreed {
            pos: best.centroid(),
            confidence: self.config.thresholds.tier(best.distinct_provider_count()),
            members: best.member_count(),
            providers: best.distinct_providers(),
        }
    }
}

pub fn find_consensus<'a>(
    config: ConsensusConfig,
    results: impl IntoIterator<Item = &'a ProviderResult>,
) -> Consensus {
    let mut engine = ConsensusEngine::new(config);
    for result in results {
        engine.push(result);
    }
    engine.finish()
}
