use futures::StreamExt as _;
use std::{pin::pin, sync::Arc};

use crate::{provider_pool::ProviderPool, *};
use usecases::{address_variations, Consensus, ConsensusConfig, ConsensusEngine, RegionalFallback};

#[derive(Debug, Clone, Copy)]
pub struct ResolverConfig {
    pub bbox: MapBbox,
    pub consensus: ConsensusConfig,
    /// Stop consuming provider results as soon as the
    /// running consensus reaches [`ConfidenceTier::High`].
    pub early_exit: bool,
}

/// Resolves postal codes into coordinates.
///
/// Constructed once at startup and shared by all resolutions.
pub struct Resolver {
    cache: Arc<dyn AddressCacheStore>,
    postal_lookup: Arc<dyn PostalLookupGateway>,
    pool: ProviderPool,
    fallback: RegionalFallback,
    consensus: ConsensusConfig,
    early_exit: bool,
}

impl Resolver {
    pub fn new(
        cache: Arc<dyn AddressCacheStore>,
        postal_lookup: Arc<dyn PostalLookupGateway>,
        pool: ProviderPool,
        config: ResolverConfig,
    ) -> Self {
        let ResolverConfig {
            bbox,
            consensus,
            early_exit,
        } = config;
        Self {
            cache,
            postal_lookup,
            pool,
            fallback: RegionalFallback::new(bbox),
            consensus,
            early_exit,
        }
    }

    /// Fails only if the postal code is malformed, unknown
    /// or cannot be looked up.
    pub async fn resolve(
        &self,
        postal_code: &str,
        house_number: Option<&str>,
    ) -> Result<ResolutionResult> {
        let postal_code = PostalCode::normalize(postal_code)?;
        let house_number = house_number.and_then(HouseNumber::parse);
        let house_number = house_number.as_ref();

        let cached = self.read_cache(&postal_code);
        if let Some(entry) = &cached {
            if let Some(pos) = entry.pos.filter(|_| entry.is_reusable_for(house_number)) {
                debug!("Resolved {postal_code} from cache");
                return Ok(ResolutionResult {
                    pos,
                    confidence: entry.confidence.unwrap_or(ConfidenceTier::None),
                    source: ResolutionSource::Cache,
                });
            }
        }

        let (address, created_at) = match cached {
            Some(AddressCacheEntry {
                address,
                created_at,
                ..
            }) => {
                debug!("Geocoding cached address of {postal_code}");
                (address, created_at)
            }
            None => match self.postal_lookup.lookup(&postal_code).await {
                Ok(address) => {
                    let now = Timestamp::now();
                    self.write_cache(&AddressCacheEntry {
                        address: address.clone(),
                        house_number: None,
                        pos: None,
                        confidence: None,
                        created_at: now,
                        updated_at: now,
                    });
                    (address, now)
                }
                Err(PostalLookupError::NotFound) => {
                    return Err(error::ResolveError::NotFound(postal_code));
                }
                Err(err @ PostalLookupError::Unavailable(_)) => {
                    warn!("Postal lookup of {postal_code} failed: {err}");
                    return Err(error::ResolveError::PostalLookupUnavailable(
                        postal_code,
                        err,
                    ));
                }
            },
        };

        let result = if address.has_street() {
            self.geocode(&address, house_number).await
        } else {
            debug!("No street known for {postal_code}");
            None
        }
        .unwrap_or_else(|| {
            warn!("No consensus for {postal_code}, using regional fallback");
            self.fallback.resolve(&postal_code, house_number)
        });

        self.write_cache(&AddressCacheEntry {
            address,
            house_number: house_number.cloned(),
            pos: Some(result.pos),
            confidence: Some(result.confidence),
            created_at,
            updated_at: Timestamp::now(),
        });
        Ok(result)
    }

    async fn geocode(
        &self,
        address: &PostalAddress,
        house_number: Option<&HouseNumber>,
    ) -> Option<ResolutionResult> {
        if self.pool.is_empty() {
            return None;
        }
        let variations = address_variations(address, house_number);
        debug!(
            "Querying {} variation(s) of {}",
            variations.len(),
            address.postal_code
        );
        let mut engine = ConsensusEngine::new(self.consensus);
        let mut results = pin!(self.pool.stream(&variations));
        while let Some(result) = results.next().await {
            engine.push(&result);
            if self.early_exit && engine.confidence() == ConfidenceTier::High {
                debug!("Reached high confidence early for {}", address.postal_code);
                break;
            }
        }
        match engine.finish() {
            Consensus::Agreed {
                pos,
                confidence,
                members,
                providers,
            } => {
                debug!(
                    "Consensus of {members} result(s) for {} at {pos}",
                    address.postal_code
                );
                Some(ResolutionResult {
                    pos,
                    confidence,
                    source: ResolutionSource::Providers(providers),
                })
            }
            Consensus::NoConsensus => None,
        }
    }

    fn read_cache(&self, postal_code: &PostalCode) -> Option<AddressCacheEntry> {
        self.cache
            .get(postal_code)
            .inspect_err(|err| warn!("Failed to read cached address of {postal_code}: {err}"))
            .ok()
            .flatten()
    }

    fn write_cache(&self, entry: &AddressCacheEntry) {
        if let Err(err) = self.cache.upsert(entry) {
            warn!(
                "Failed to cache address of {}: {err}",
                entry.address.postal_code
            );
        }
    }
}
