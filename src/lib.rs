//! Facade crate for the globe land mask regenerator.
//!
//! This crate re-exports the feature model from `landmask-core` and the
//! fetch, merge, and write pipeline from `landmask-data`.

#![forbid(unsafe_code)]

pub use landmask_core::{
    Feature, FeatureCollection, FeatureProperties, LAKES_URL, LAND_URL, Layer, ProjectionError,
    Variant,
};
pub use landmask_data::natural_earth::{
    GeoJsonSource, HttpGeoJsonSource, HttpSourceConfig, RUST_OUTPUT, RegenerateError,
    RegenerateOptions, RegenerationReport, TS_OUTPUT, regenerate,
};
