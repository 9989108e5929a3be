//! Core domain types for the landmask regenerator.
//!
//! The regenerator reshapes Natural Earth GeoJSON into the minimal land mask
//! consumed by the globe front ends. This crate holds the pure parts of that
//! flow: the output document model, the source layers, and the projection
//! that strips a source feature down to its allow-listed properties.
//!
//! Nothing here performs I/O; fetching and writing live in `landmask-data`.

#![forbid(unsafe_code)]

mod feature;
mod layer;
mod projection;

pub use feature::{Feature, FeatureCollection, FeatureProperties};
pub use layer::{LAKES_URL, LAND_URL, Layer, ParseVariantError, Variant};
pub use projection::{ProjectionError, extract_features, project_feature};
