//! Source layers and the variants that combine them.

use std::{fmt, str::FromStr};

use thiserror::Error;

/// Natural Earth 1:110m physical land polygons.
pub const LAND_URL: &str = "https://raw.githubusercontent.com/martynafford/natural-earth-geojson/master/110m/physical/ne_110m_land.json";
/// Natural Earth 1:110m physical lake polygons.
pub const LAKES_URL: &str = "https://raw.githubusercontent.com/martynafford/natural-earth-geojson/master/110m/physical/ne_110m_lakes.json";

/// A physical dataset fetched by the regenerator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Land polygons.
    Land,
    /// Lake polygons.
    Lake,
}

impl Layer {
    /// The `featurecla` value written for this layer.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Land => "Land",
            Self::Lake => "Lake",
        }
    }

    /// URL the layer is fetched from unless overridden.
    #[must_use]
    pub const fn default_url(self) -> &'static str {
        match self {
            Self::Land => LAND_URL,
            Self::Lake => LAKES_URL,
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Land => f.write_str("land"),
            Self::Lake => f.write_str("lakes"),
        }
    }
}

/// Which sources are fetched and how their properties are reduced.
///
/// # Examples
/// ```
/// use landmask_core::{Layer, Variant};
///
/// assert_eq!(Variant::SingleSource.layers(), &[Layer::Land]);
/// assert_eq!(Variant::LandAndLakes.layers(), &[Layer::Land, Layer::Lake]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Variant {
    /// Land only; keeps `featurecla`, `scalerank` and `min_zoom`.
    #[default]
    SingleSource,
    /// Land followed by lakes; `featurecla` is fixed per layer.
    LandAndLakes,
}

impl Variant {
    /// Layers fetched by this variant, in fetch order.
    #[must_use]
    pub const fn layers(self) -> &'static [Layer] {
        match self {
            Self::SingleSource => &[Layer::Land],
            Self::LandAndLakes => &[Layer::Land, Layer::Lake],
        }
    }

    /// Name accepted by [`Variant::from_str`].
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SingleSource => "land",
            Self::LandAndLakes => "land-and-lakes",
        }
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a variant name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown variant {0:?} (expected \"land\" or \"land-and-lakes\")")]
pub struct ParseVariantError(pub String);

impl FromStr for Variant {
    type Err = ParseVariantError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "land" | "single" => Ok(Self::SingleSource),
            "land-and-lakes" | "lakes" => Ok(Self::LandAndLakes),
            _ => Err(ParseVariantError(value.to_owned())),
        }
    }
}
