//! Output document model.
//!
//! Only serialisation is modelled: the regenerator never reads its own output
//! back, and downstream consumers parse the file with their own GeoJSON code.

use serde::Serialize;
use serde_json::Value;

use crate::Layer;

/// Allow-listed properties carried by an output feature.
///
/// `scalerank` and `min_zoom` are only emitted by the single-source variant;
/// the land-and-lakes variant writes `featurecla` alone.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    /// Natural Earth classification, such as `"Land"` or `"Lake"`.
    pub featurecla: Value,
    /// Source scale rank.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalerank: Option<Value>,
    /// Minimum zoom at which the source feature is drawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_zoom: Option<Value>,
}

impl FeatureProperties {
    /// Properties carrying only the fixed classification tag of `layer`.
    ///
    /// # Examples
    /// ```
    /// use landmask_core::{FeatureProperties, Layer};
    ///
    /// let props = FeatureProperties::tagged(Layer::Lake);
    /// assert_eq!(props.featurecla, "Lake");
    /// assert!(props.scalerank.is_none());
    /// ```
    #[must_use]
    pub fn tagged(layer: Layer) -> Self {
        Self {
            featurecla: Value::from(layer.tag()),
            scalerank: None,
            min_zoom: None,
        }
    }
}

/// A GeoJSON `Feature` with its geometry passed through verbatim.
///
/// Serialises as `{"type":"Feature","properties":…,"geometry":…}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "Feature")]
pub struct Feature {
    /// Reduced property set.
    pub properties: FeatureProperties,
    /// Source geometry, untouched.
    pub geometry: Value,
}

/// A GeoJSON `FeatureCollection` in fetch order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(tag = "type", rename = "FeatureCollection")]
pub struct FeatureCollection {
    /// Features in the order their sources were fetched.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Construct an empty collection.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            features: Vec::new(),
        }
    }

    /// Append the features of one source after those already collected.
    pub fn extend(&mut self, features: impl IntoIterator<Item = Feature>) {
        self.features.extend(features);
    }

    /// Number of features held.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the collection holds no features.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Serialise without any insignificant whitespace.
    ///
    /// # Errors
    ///
    /// Returns the serialiser error if a geometry value cannot be encoded.
    ///
    /// # Examples
    /// ```
    /// use landmask_core::FeatureCollection;
    ///
    /// let bytes = FeatureCollection::new().to_compact_json()?;
    /// assert_eq!(bytes, br#"{"type":"FeatureCollection","features":[]}"#);
    /// # Ok::<(), serde_json::Error>(())
    /// ```
    pub fn to_compact_json(&self) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(self)
    }
}
