//! Regeneration of the land mask from Natural Earth GeoJSON.
#![forbid(unsafe_code)]

mod error;
mod ops;
mod source;
mod types;

#[doc(hidden)]
pub mod test_support;

pub use error::{RegenerateError, SourceBuildError, TransportError};
pub use ops::{build_collection, fetch_layer, regenerate, write_outputs};
pub use source::{DEFAULT_USER_AGENT, GeoJsonSource, HttpGeoJsonSource, HttpSourceConfig};
pub use types::{
    RUST_OUTPUT, RegenerateOptions, RegenerationReport, SourceSpec, SourceSummary, SourceUrl,
    TS_OUTPUT,
};

#[cfg(test)]
mod tests;
