//! Domain wrappers for source URLs, run options, and run reports.

use std::{fmt, ops::Deref};

use camino::Utf8PathBuf;
use landmask_core::{Layer, Variant};
use url::Url;

/// Output consumed by the TypeScript globe.
pub const TS_OUTPUT: &str = "src/utils/land.json";
/// Output consumed by the Bevy globe.
pub const RUST_OUTPUT: &str = "rust/assets/land.json";

/// Fully qualified URL of a GeoJSON document.
///
/// # Examples
/// ```
/// # use landmask_data::natural_earth::SourceUrl;
/// let url = SourceUrl::try_from("https://example.test/ne_110m_land.json")?;
/// assert!(url.as_ref().ends_with(".json"));
/// # Ok::<(), url::ParseError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrl(String);

impl SourceUrl {
    /// Wrap a URL without validating it.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Consume the wrapper and return the inner [`String`].
    pub fn into_inner(self) -> String {
        self.0
    }

    /// The built-in URL for `layer`.
    pub fn default_for(layer: Layer) -> Self {
        Self::new(layer.default_url())
    }
}

impl AsRef<str> for SourceUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for SourceUrl {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for SourceUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Url> for SourceUrl {
    fn from(value: Url) -> Self {
        Self(value.into())
    }
}

impl TryFrom<&str> for SourceUrl {
    type Error = url::ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Url::parse(value).map(Into::into)
    }
}

/// One layer and the URL it is fetched from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSpec {
    /// Layer the document provides.
    pub layer: Layer,
    /// Where the document is fetched from.
    pub url: SourceUrl,
}

/// Options controlling a regeneration run.
///
/// Defaults reproduce the fixed behaviour: land only, Natural Earth URLs, and
/// both globe outputs relative to the working directory.
///
/// # Examples
/// ```
/// # use landmask_core::{Layer, Variant};
/// # use landmask_data::natural_earth::{RegenerateOptions, SourceUrl};
/// let options = RegenerateOptions::default()
///     .with_variant(Variant::LandAndLakes)
///     .with_source_url(Layer::Lake, SourceUrl::new("https://mirror.test/lakes.json"));
/// let plan = options.plan();
/// assert_eq!(plan.len(), 2);
/// assert_eq!(plan[1].url.as_ref(), "https://mirror.test/lakes.json");
/// assert_eq!(options.destinations.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerateOptions {
    /// Which layers are fetched and how they are projected.
    pub variant: Variant,
    /// Land source URL.
    pub land_url: SourceUrl,
    /// Lake source URL, used by [`Variant::LandAndLakes`] only.
    pub lakes_url: SourceUrl,
    /// Files that receive the serialised collection, written in order.
    pub destinations: Vec<Utf8PathBuf>,
}

impl Default for RegenerateOptions {
    fn default() -> Self {
        Self::new(vec![
            Utf8PathBuf::from(TS_OUTPUT),
            Utf8PathBuf::from(RUST_OUTPUT),
        ])
    }
}

impl RegenerateOptions {
    /// Options writing to `destinations` with default sources.
    pub fn new(destinations: Vec<Utf8PathBuf>) -> Self {
        Self {
            variant: Variant::default(),
            land_url: SourceUrl::default_for(Layer::Land),
            lakes_url: SourceUrl::default_for(Layer::Lake),
            destinations,
        }
    }

    /// Select the variant.
    #[must_use]
    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    /// Override the URL fetched for `layer`.
    #[must_use]
    pub fn with_source_url(mut self, layer: Layer, url: SourceUrl) -> Self {
        match layer {
            Layer::Land => self.land_url = url,
            Layer::Lake => self.lakes_url = url,
        }
        self
    }

    /// URL configured for `layer`.
    pub fn url_for(&self, layer: Layer) -> &SourceUrl {
        match layer {
            Layer::Land => &self.land_url,
            Layer::Lake => &self.lakes_url,
        }
    }

    /// Sources fetched by the configured variant, in fetch order.
    pub fn plan(&self) -> Vec<SourceSpec> {
        self.variant
            .layers()
            .iter()
            .map(|&layer| SourceSpec {
                layer,
                url: self.url_for(layer).clone(),
            })
            .collect()
    }
}

/// Feature count contributed by one source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSummary {
    /// Layer fetched.
    pub layer: Layer,
    /// URL fetched.
    pub url: SourceUrl,
    /// Number of features projected from the source.
    pub features: usize,
}

/// Summary of a completed regeneration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegenerationReport {
    /// Variant that was produced.
    pub variant: Variant,
    /// Per-source feature counts, in fetch order.
    pub sources: Vec<SourceSummary>,
    /// Features in the written collection.
    pub total_features: usize,
    /// Length of the serialised document written to every destination.
    pub bytes_written: u64,
    /// Destinations written, in order.
    pub destinations: Vec<Utf8PathBuf>,
}
