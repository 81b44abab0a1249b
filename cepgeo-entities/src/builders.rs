pub trait Builder {
    type Build;
    fn build() -> Self::Build;
}

pub use self::{address_builder::*, provider_result_builder::*};

pub mod address_builder {

    use super::*;
    use crate::{address::*, postal_code::*};

    #[derive(Debug)]
    pub struct PostalAddressBuild {
        address: PostalAddress,
    }

    impl PostalAddressBuild {
        pub fn postal_code(mut self, postal_code: &str) -> Self {
            self.address.postal_code = PostalCode::normalize(postal_code).unwrap();
            self
        }
        pub fn street(mut self, street: &str) -> Self {
            self.address.street = Some(street.into());
            self
        }
        pub fn neighborhood(mut self, neighborhood: &str) -> Self {
            self.address.neighborhood = Some(neighborhood.into());
            self
        }
        pub fn city(mut self, city: &str) -> Self {
            self.address.city = Some(city.into());
            self
        }
        pub fn state(mut self, state: &str) -> Self {
            self.address.state = Some(state.into());
            self
        }
        pub fn finish(self) -> PostalAddress {
            self.address
        }
    }

    impl Builder for PostalAddress {
        type Build = PostalAddressBuild;
        fn build() -> PostalAddressBuild {
            PostalAddressBuild {
                address: PostalAddress::new(PostalCode::normalize("01310100").unwrap()),
            }
        }
    }
}

pub mod provider_result_builder {

    use super::*;
    use crate::{geo::*, geocoding::*, time::*};

    #[derive(Debug)]
    pub struct ProviderResultBuild {
        result: ProviderResult,
    }

    impl ProviderResultBuild {
        pub fn provider(mut self, provider: &str) -> Self {
            self.result.provider = provider.into();
            self
        }
        pub fn strategy(mut self, strategy: GeocodingStrategy) -> Self {
            self.result.strategy = strategy;
            self
        }
        pub fn pos(mut self, lat: f64, lng: f64) -> Self {
            self.result.pos = MapPoint::from_lat_lng_deg(lat, lng);
            self
        }
        pub fn finish(self) -> ProviderResult {
            self.result
        }
    }

    impl Builder for ProviderResult {
        type Build = ProviderResultBuild;
        fn build() -> ProviderResultBuild {
            ProviderResultBuild {
                result: ProviderResult {
                    provider: "provider".into(),
                    strategy: GeocodingStrategy::StreetAndCity,
                    pos: MapPoint::from_lat_lng_deg(-23.5505, -46.6333),
                    received_at: Timestamp::from_millis(0),
                },
            }
        }
    }
}
