//! Command-line interface for regenerating the globe land mask.
#![forbid(unsafe_code)]

mod error;

pub use error::CliError;

use camino::Utf8PathBuf;
use clap::Parser;
use landmask_core::{Layer, Variant};
use landmask_data::natural_earth::{
    DEFAULT_USER_AGENT, GeoJsonSource, HttpGeoJsonSource, HttpSourceConfig, RUST_OUTPUT,
    RegenerateOptions, RegenerationReport, SourceUrl, TS_OUTPUT, regenerate,
};
use log::{error, info};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use std::{io::Write, time::Duration};

const ARG_VARIANT: &str = "variant";
const ARG_LAND_URL: &str = "land-url";
const ARG_LAKES_URL: &str = "lakes-url";
const ARG_TS_OUTPUT: &str = "ts-output";
const ARG_RUST_OUTPUT: &str = "rust-output";
const ARG_TIMEOUT_SECS: &str = "timeout-secs";
const ARG_USER_AGENT: &str = "user-agent";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Run the regenerator with the current process arguments and environment.
pub fn run() -> Result<RegenerationReport, CliError> {
    let args = RegenerateArgs::try_parse().map_err(CliError::ArgumentParsing)?;
    let config = args.into_config()?;
    let source = HttpGeoJsonSource::with_config(config.http.clone())?;
    execute(&config, &source)
}

/// Report a failed run as a single `landmask: <error>` line on `out`.
///
/// The caller returns normally afterwards; the process exit status is left
/// at its default.
pub fn report_failure(err: &CliError, out: &mut dyn Write) {
    error!("regeneration failed: {err}");
    if let Err(write_err) = writeln!(out, "landmask: {err}") {
        error!("failed to print diagnostic: {write_err}");
    }
}

fn execute<S: GeoJsonSource + ?Sized>(
    config: &RegenerateConfig,
    source: &S,
) -> Result<RegenerationReport, CliError> {
    let report = regenerate(source, &config.options())?;
    info!(
        "Regeneration complete: {} features ({} bytes) written to {} destinations.",
        report.total_features,
        report.bytes_written,
        report.destinations.len()
    );
    Ok(report)
}

/// Arguments for a regeneration run.
///
/// Every value is optional; anything left unset falls back to the
/// configuration file, then `LANDMASK_*` environment variables, then the
/// built-in Natural Earth URLs and globe output paths.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    name = "landmask",
    about = "Regenerate the globe land mask from Natural Earth GeoJSON",
    long_about = "Download Natural Earth land (and optionally lake) polygons, \
                  keep only the properties the globes read, and write the \
                  merged FeatureCollection to both globe asset paths.",
    version
)]
#[ortho_config(prefix = "LANDMASK")]
struct RegenerateArgs {
    /// Which datasets to merge: "land" or "land-and-lakes".
    #[arg(long = ARG_VARIANT, value_name = "name")]
    #[serde(default)]
    variant: Option<String>,
    /// Override the land GeoJSON URL.
    #[arg(long = ARG_LAND_URL, value_name = "url")]
    #[serde(default)]
    land_url: Option<String>,
    /// Override the lakes GeoJSON URL.
    #[arg(long = ARG_LAKES_URL, value_name = "url")]
    #[serde(default)]
    lakes_url: Option<String>,
    /// Output path read by the TypeScript globe.
    #[arg(long = ARG_TS_OUTPUT, value_name = "path")]
    #[serde(default)]
    ts_output: Option<Utf8PathBuf>,
    /// Output path read by the Bevy globe.
    #[arg(long = ARG_RUST_OUTPUT, value_name = "path")]
    #[serde(default)]
    rust_output: Option<Utf8PathBuf>,
    /// Connect and request timeout in seconds.
    #[arg(long = ARG_TIMEOUT_SECS, value_name = "secs")]
    #[serde(default)]
    timeout_secs: Option<u64>,
    /// HTTP user agent string.
    #[arg(long = ARG_USER_AGENT, value_name = "agent")]
    #[serde(default)]
    user_agent: Option<String>,
}

impl RegenerateArgs {
    fn into_config(self) -> Result<RegenerateConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        RegenerateConfig::try_from(merged)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct RegenerateConfig {
    variant: Variant,
    land_url: SourceUrl,
    lakes_url: SourceUrl,
    ts_output: Utf8PathBuf,
    rust_output: Utf8PathBuf,
    http: HttpSourceConfig,
}

impl RegenerateConfig {
    fn options(&self) -> RegenerateOptions {
        RegenerateOptions::new(vec![self.ts_output.clone(), self.rust_output.clone()])
            .with_variant(self.variant)
            .with_source_url(Layer::Land, self.land_url.clone())
            .with_source_url(Layer::Lake, self.lakes_url.clone())
    }

    fn parse_url(
        value: Option<String>,
        layer: Layer,
        field: &'static str,
    ) -> Result<SourceUrl, CliError> {
        let Some(raw) = value else {
            return Ok(SourceUrl::default_for(layer));
        };
        SourceUrl::try_from(raw.as_str()).map_err(|source| CliError::InvalidUrl {
            field,
            value: raw,
            source,
        })
    }
}

impl TryFrom<RegenerateArgs> for RegenerateConfig {
    type Error = CliError;

    fn try_from(args: RegenerateArgs) -> Result<Self, Self::Error> {
        let variant = args
            .variant
            .as_deref()
            .map(str::parse::<Variant>)
            .transpose()
            .map_err(|source| CliError::InvalidVariant {
                field: ARG_VARIANT,
                source,
            })?
            .unwrap_or_default();
        let land_url = Self::parse_url(args.land_url, Layer::Land, ARG_LAND_URL)?;
        let lakes_url = Self::parse_url(args.lakes_url, Layer::Lake, ARG_LAKES_URL)?;
        let timeout_secs = args.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);
        if timeout_secs == 0 {
            return Err(CliError::InvalidTimeout {
                field: ARG_TIMEOUT_SECS,
            });
        }
        let http = HttpSourceConfig::default()
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_user_agent(
                args.user_agent
                    .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            );
        Ok(Self {
            variant,
            land_url,
            lakes_url,
            ts_output: args
                .ts_output
                .unwrap_or_else(|| Utf8PathBuf::from(TS_OUTPUT)),
            rust_output: args
                .rust_output
                .unwrap_or_else(|| Utf8PathBuf::from(RUST_OUTPUT)),
            http,
        })
    }
}

#[cfg(test)]
fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<RegenerateConfig, CliError> {
    let merged = RegenerateArgs::merge_from_layers(layers).map_err(CliError::from)?;
    RegenerateConfig::try_from(merged)
}

#[cfg(test)]
mod tests;
