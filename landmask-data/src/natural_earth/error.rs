//! Error types produced while regenerating the land mask.

use std::io;

use camino::Utf8PathBuf;
use landmask_core::{Layer, ProjectionError};
use thiserror::Error;

/// Errors produced while fetching, shaping, or writing the land mask.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RegenerateError {
    /// No output destinations were configured.
    #[error("no output destinations configured")]
    NoDestinations,
    /// A source document could not be fetched.
    #[error("failed to fetch {layer} data: {source}")]
    Fetch {
        /// Layer being fetched.
        layer: Layer,
        /// Transport failure.
        source: TransportError,
    },
    /// A response body was not valid JSON.
    #[error("failed to parse {layer} data from {url}: {source}")]
    ParseDocument {
        /// Layer being parsed.
        layer: Layer,
        /// URL the body came from.
        url: String,
        /// Parser failure.
        source: simd_json::Error,
    },
    /// A response document had no usable `features` array.
    #[error("{layer} data from {url} is missing its features: {source}")]
    MissingFeatures {
        /// Layer being read.
        layer: Layer,
        /// URL the document came from.
        url: String,
        /// Which member was absent.
        source: ProjectionError,
    },
    /// A feature lacked a member required by the output schema.
    #[error("{layer} feature {index} from {url} is incomplete: {source}")]
    Projection {
        /// Layer being projected.
        layer: Layer,
        /// URL the feature came from.
        url: String,
        /// Position of the feature within the source `features` array.
        index: usize,
        /// Which member was absent.
        source: ProjectionError,
    },
    /// The merged collection could not be serialised.
    #[error("failed to serialise feature collection: {source}")]
    Serialise { source: serde_json::Error },
    /// Preparing an output directory failed.
    #[error("failed to create output directory for {path}: {source}")]
    CreateDir { source: io::Error, path: Utf8PathBuf },
    /// Writing an output file failed.
    #[error("failed to write {path}: {source}")]
    WriteOutput { source: io::Error, path: Utf8PathBuf },
}

/// Transport-level errors encountered while issuing HTTP requests.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TransportError {
    /// The server returned an HTTP error status.
    #[error("request to {url} failed with status {status}: {message}")]
    Http {
        /// Fully qualified request URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Short error description.
        message: String,
    },
    /// The request failed before a status was received, or the body could
    /// not be read.
    #[error("network error contacting {url}: {source}")]
    Network {
        /// Fully qualified request URL.
        url: String,
        /// I/O error reported by the transport.
        source: io::Error,
    },
}

/// Errors raised while constructing [`HttpGeoJsonSource`](super::HttpGeoJsonSource).
#[derive(Debug, Error)]
pub enum SourceBuildError {
    /// The HTTP client rejected its configuration.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The Tokio runtime could not be started.
    #[error("failed to build Tokio runtime: {0}")]
    Runtime(#[source] io::Error),
}
