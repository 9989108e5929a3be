//! Error types emitted by the landmask CLI.

use std::sync::Arc;

use landmask_core::ParseVariantError;
use landmask_data::natural_earth::{RegenerateError, SourceBuildError};
use thiserror::Error;

/// Errors emitted by the landmask CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// The variant name was not recognised.
    #[error("invalid --{field}: {source}")]
    InvalidVariant {
        field: &'static str,
        #[source]
        source: ParseVariantError,
    },
    /// A source URL could not be parsed.
    #[error("invalid --{field} {value:?}: {source}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The request timeout must be positive.
    #[error("--{field} must be greater than zero")]
    InvalidTimeout { field: &'static str },
    /// The HTTP source could not be constructed.
    #[error(transparent)]
    BuildSource(#[from] SourceBuildError),
    /// Fetching, shaping, or writing the land mask failed.
    #[error(transparent)]
    Regenerate(#[from] RegenerateError),
}
