#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(test, deny(warnings))]

//! # cepgeo-entities
//!
//! Reusable, agnostic domain entities for cepgeo.
//!
//! The entities only contain generic functionality that does not reveal any
//! application-specific business logic.

pub mod address;
pub mod cache;
pub mod geo;
pub mod geocoding;
pub mod postal_code;
pub mod resolution;
pub mod time;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
