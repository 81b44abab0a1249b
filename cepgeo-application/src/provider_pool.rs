use futures::{future, Stream, StreamExt as _};
use std::{sync::Arc, time::Duration};

use crate::*;

pub const MIN_REQUEST_TIMEOUT: Duration = Duration::from_secs(8);
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONCURRENT_REQUESTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderPoolConfig {
    pub request_timeout: Duration,
    pub max_concurrent_requests: usize,
}

impl Default for ProviderPoolConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            max_concurrent_requests: DEFAULT_MAX_CONCURRENT_REQUESTS,
        }
    }
}

/// Issues every address variation to every active provider.
///
/// Each (variation, provider) pair is an independent request with its
/// own timeout. Failed requests are logged and skipped, they never abort
/// the batch. Only candidates inside the bounding box are accepted.
pub struct ProviderPool {
    providers: Vec<Arc<dyn GeocodingGateway>>,
    request_timeout: Duration,
    max_concurrent_requests: usize,
    bbox: MapBbox,
}

impl ProviderPool {
    pub fn new(
        providers: Vec<Arc<dyn GeocodingGateway>>,
        config: ProviderPoolConfig,
        bbox: MapBbox,
    ) -> Self {
        let ProviderPoolConfig {
            request_timeout,
            max_concurrent_requests,
        } = config;
        let clamped_timeout = request_timeout.clamp(MIN_REQUEST_TIMEOUT, MAX_REQUEST_TIMEOUT);
        if clamped_timeout != request_timeout {
            warn!("Clamped geocoding request timeout from {request_timeout:?} to {clamped_timeout:?}");
        }
        Self {
            providers,
            request_timeout: clamped_timeout,
            max_concurrent_requests: max_concurrent_requests.max(1),
            bbox,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }

    /// Accepted results in (variation, provider) order,
    /// independent of the order in which requests complete.
    pub fn stream<'a>(
        &'a self,
        variations: &'a [AddressVariation],
    ) -> impl Stream<Item = ProviderResult> + Send + 'a {
        let requests = variations.iter().flat_map(move |variation| {
            self.providers
                .iter()
                .map(move |provider| (variation, provider))
        });
        futures::stream::iter(requests)
            .map(move |(variation, provider)| self.query(variation, &**provider))
            .buffered(self.max_concurrent_requests)
            .filter_map(future::ready)
    }

    pub async fn query_all(&self, variations: &[AddressVariation]) -> Vec<ProviderResult> {
        self.stream(variations).collect().await
    }

    async fn query(
        &self,
        variation: &AddressVariation,
        provider: &dyn GeocodingGateway,
    ) -> Option<ProviderResult> {
        let id = provider.id();
        let candidates =
            match tokio::time::timeout(self.request_timeout, provider.forward(&variation.query))
                .await
            {
                Ok(Ok(candidates)) => candidates,
                Ok(Err(err)) => {
                    warn!("Provider {id} failed to geocode '{}': {err}", variation.query);
                    return None;
                }
                Err(_) => {
                    let err = GeocodingError::Timeout(self.request_timeout);
                    warn!("Provider {id} failed to geocode '{}': {err}", variation.query);
                    return None;
                }
            };
        let received_at = Timestamp::now();
        let candidate_count = candidates.len();
        let Some(pos) = candidates.into_iter().find(|pos| pos.in_bbox(&self.bbox)) else {
            debug!(
                "Provider {id} returned no candidate inside {} for '{}' ({candidate_count} discarded)",
                self.bbox, variation.query
            );
            return None;
        };
        debug!(
            "Provider {id} located '{}' ({}) at {pos}",
            variation.query, variation.strategy
        );
        Some(ProviderResult {
            provider: id.to_owned(),
            strategy: variation.strategy,
            pos,
            received_at,
        })
    }
}
