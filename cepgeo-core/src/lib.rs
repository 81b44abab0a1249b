pub mod bbox;
pub mod gateways;
pub mod repositories;
pub mod usecases;

pub mod entities {
    pub use cepgeo_entities::{
        address::*, cache::*, geo::*, geocoding::*, postal_code::*, resolution::*, time::*,
    };
}
