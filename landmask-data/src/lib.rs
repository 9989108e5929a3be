//! Fetching and materialisation for the landmask regenerator.
//!
//! Responsibilities:
//! - Fetch Natural Earth GeoJSON over HTTP behind the [`GeoJsonSource`] seam.
//! - Drive the fetch → project → serialise → write sequence.
//! - Report every failure as a typed [`RegenerateError`].
//!
//! Boundaries:
//! - Feature shaping rules live in `landmask-core`.
//! - Argument parsing and process exit codes live in `landmask-cli`.
//!
//! Invariants:
//! - Nothing is written until every source has been fetched and projected.
//! - Every destination receives the same bytes.
//!
//! [`GeoJsonSource`]: natural_earth::GeoJsonSource
//! [`RegenerateError`]: natural_earth::RegenerateError

pub mod natural_earth;
