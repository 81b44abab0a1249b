
pub mod prelude {
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::{
        sync::{
            atomic::{AtomicUsize, Ordering},
            Arc,
        },
        time::Duration,
    };

    use cepgeo_core::repositories as repo;

    use crate::{
        prelude::*, AddressCacheEntry, AddressCacheStore, GeocodingError, GeocodingGateway,
        MapPoint, PostalAddress, PostalCode, PostalLookupError, PostalLookupGateway,
    };

    pub use cepgeo_core::bbox::municipal_bbox;
    pub use cepgeo_db_sqlite::Connections;
    pub use cepgeo_entities::builders::*;

    // Avenida Paulista
    pub const PAULISTA: (f64, f64) = (-23.5613, -46.6565);
    // Museu do Ipiranga
    pub const IPIRANGA: (f64, f64) = (-23.5855, -46.6097);
    // Outside of the municipality
    pub const CAMPINAS: (f64, f64) = (-22.9056, -47.0608);

    pub enum Answer {
        Found(Vec<(f64, f64)>),
        Delayed(Duration, (f64, f64)),
        Failed,
        Hanging,
    }

    pub struct FakeProvider {
        id: &'static str,
        answer: Answer,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        pub fn new(id: &'static str, answer: Answer) -> Arc<Self> {
            Arc::new(Self {
                id,
                answer,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    fn point((lat, lng): (f64, f64)) -> MapPoint {
        MapPoint::from_lat_lng_deg(lat, lng)
    }

    #[async_trait]
    impl GeocodingGateway for FakeProvider {
        fn id(&self) -> &'static str {
            self.id
        }

        async fn forward(&self, _query: &str) -> Result<Vec<MapPoint>, GeocodingError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.answer {
                Answer::Found(points) => Ok(points.iter().copied().map(point).collect()),
                Answer::Delayed(delay, pos) => {
                    tokio::time::sleep(*delay).await;
                    Ok(vec![point(*pos)])
                }
                Answer::Failed => Err(GeocodingError::Quota),
                Answer::Hanging => {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                    Ok(vec![])
                }
            }
        }
    }

    pub fn pool(providers: Vec<Arc<FakeProvider>>) -> ProviderPool {
        let providers = providers
            .into_iter()
            .map(|provider| provider as Arc<dyn GeocodingGateway>)
            .collect();
        ProviderPool::new(providers, Default::default(), municipal_bbox())
    }

    pub struct FakePostalLookup {
        addresses: Vec<PostalAddress>,
        unavailable: bool,
        calls: AtomicUsize,
    }

    impl FakePostalLookup {
        pub fn new(addresses: Vec<PostalAddress>) -> Arc<Self> {
            Arc::new(Self {
                addresses,
                unavailable: false,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn unavailable() -> Arc<Self> {
            Arc::new(Self {
                addresses: vec![],
                unavailable: true,
                calls: AtomicUsize::new(0),
            })
        }

        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PostalLookupGateway for FakePostalLookup {
        async fn lookup(&self, postal_code: &PostalCode) -> Result<PostalAddress, PostalLookupError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.unavailable {
                return Err(PostalLookupError::Unavailable(anyhow!("connection refused")));
            }
            self.addresses
                .iter()
                .find(|address| &address.postal_code == postal_code)
                .cloned()
                .ok_or(PostalLookupError::NotFound)
        }
    }

    /// Fails on every access.
    #[derive(Default)]
    pub struct FailingCacheStore {
        reads: AtomicUsize,
        writes: AtomicUsize,
    }

    impl FailingCacheStore {
        pub fn read_count(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }

        pub fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    impl AddressCacheStore for FailingCacheStore {
        fn get(&self, _postal_code: &PostalCode) -> Result<Option<AddressCacheEntry>, repo::Error> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            Err(repo::Error::Other(anyhow!("database is locked")))
        }

        fn upsert(&self, _entry: &AddressCacheEntry) -> Result<(), repo::Error> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            Err(repo::Error::Other(anyhow!("disk I/O error")))
        }
    }

    pub fn paulista() -> PostalAddress {
        PostalAddress::build()
            .postal_code("01310-100")
            .street("Avenida Paulista")
            .neighborhood("Bela Vista")
            .city("São Paulo")
            .state("SP")
            .finish()
    }

    pub struct BackendFixture {
        pub db_connections: Connections,
        pub postal_lookup: Arc<FakePostalLookup>,
        pub providers: Vec<Arc<FakeProvider>>,
    }

    impl BackendFixture {
        pub fn new(postal_lookup: Arc<FakePostalLookup>, providers: Vec<Arc<FakeProvider>>) -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let db_connections = Connections::init(":memory:", 1).unwrap();
            cepgeo_db_sqlite::run_embedded_database_migrations(db_connections.exclusive().unwrap())
                .unwrap();
            Self {
                db_connections,
                postal_lookup,
                providers,
            }
        }

        fn build_resolver(&self, early_exit: bool) -> Resolver {
            self.resolver_with_cache(Arc::new(self.db_connections.clone()), early_exit)
        }

        pub fn resolver_with_cache(
            &self,
            cache: Arc<dyn AddressCacheStore>,
            early_exit: bool,
        ) -> Resolver {
            Resolver::new(
                cache,
                self.postal_lookup.clone(),
                pool(self.providers.clone()),
                ResolverConfig {
                    bbox: municipal_bbox(),
                    consensus: Default::default(),
                    early_exit,
                },
            )
        }

        pub fn resolver(&self) -> Resolver {
            self.build_resolver(false)
        }

        pub fn resolver_with_early_exit(&self) -> Resolver {
            self.build_resolver(true)
        }

        pub fn provider_calls(&self) -> usize {
            self.providers.iter().map(|p| p.call_count()).sum()
        }

        pub fn cached(&self, postal_code: &str) -> Option<crate::AddressCacheEntry> {
            let postal_code = PostalCode::normalize(postal_code).unwrap();
            self.db_connections.get(&postal_code).unwrap()
        }
    }
}
