#[macro_use]
extern crate log;

mod provider_pool;
mod resolve;

pub mod prelude {
    pub use super::{provider_pool::*, resolve::*};
}

pub mod error;

pub type Result<T> = std::result::Result<T, error::ResolveError>;

pub(crate) use cepgeo_core::{
    bbox::InBBox,
    entities::*,
    gateways::{geocode::*, postal_lookup::*},
    repositories::AddressCacheStore,
    usecases,
};

#[cfg(test)]
pub(crate) mod tests;
