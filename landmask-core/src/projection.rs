//! Reduce source features to the output schema.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{Feature, FeatureProperties, Layer, Variant};

/// Errors raised when a source document lacks a required member.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ProjectionError {
    /// The document root is not an object, or its `features` member is not
    /// an array.
    #[error("document has no \"features\" array")]
    MissingFeatures,
    /// A member of `features` is not a JSON object.
    #[error("feature is not a JSON object")]
    NotAnObject,
    /// A feature has no `geometry` member.
    #[error("feature has no \"geometry\" member")]
    MissingGeometry,
    /// A feature has no `properties` object to read from.
    #[error("feature has no \"properties\" object")]
    MissingProperties,
}

/// Take the `features` array out of a parsed GeoJSON document.
///
/// # Errors
///
/// Returns [`ProjectionError::MissingFeatures`] when the root is not an object
/// or its `features` member is present but not an array. An object without a
/// `features` member yields no features.
///
/// # Examples
/// ```
/// use landmask_core::extract_features;
/// use serde_json::json;
///
/// let doc = json!({"type": "FeatureCollection", "features": [{"a": 1}]});
/// assert_eq!(extract_features(doc)?.len(), 1);
/// # Ok::<(), landmask_core::ProjectionError>(())
/// ```
pub fn extract_features(document: Value) -> Result<Vec<Value>, ProjectionError> {
    let Value::Object(mut root) = document else {
        return Err(ProjectionError::MissingFeatures);
    };
    match root.remove("features") {
        Some(Value::Array(features)) => Ok(features),
        None => Ok(Vec::new()),
        Some(_) => Err(ProjectionError::MissingFeatures),
    }
}

/// Project one source feature from `layer` into the output schema.
///
/// The geometry is moved across unchanged. For [`Variant::SingleSource`] each
/// allow-listed property is copied when present (an explicit `null` included)
/// and defaulted otherwise; for [`Variant::LandAndLakes`] the classification is
/// fixed to the layer tag and the source properties are ignored.
///
/// # Errors
///
/// Returns a [`ProjectionError`] when the feature is not an object, lacks a
/// `geometry` member, or (single-source only) lacks a `properties` object.
///
/// # Examples
/// ```
/// use landmask_core::{Layer, Variant, project_feature};
/// use serde_json::json;
///
/// let source = json!({
///     "type": "Feature",
///     "properties": {"featurecla": "Land", "scalerank": 1, "min_zoom": 1.5},
///     "geometry": {"type": "Point", "coordinates": [0.0, 0.0]},
/// });
/// let feature = project_feature(source, Variant::LandAndLakes, Layer::Lake)?;
/// assert_eq!(feature.properties.featurecla, "Lake");
/// assert_eq!(feature.geometry["type"], "Point");
/// # Ok::<(), landmask_core::ProjectionError>(())
/// ```
pub fn project_feature(
    source: Value,
    variant: Variant,
    layer: Layer,
) -> Result<Feature, ProjectionError> {
    let Value::Object(mut members) = source else {
        return Err(ProjectionError::NotAnObject);
    };
    let geometry = members
        .remove("geometry")
        .ok_or(ProjectionError::MissingGeometry)?;
    let properties = match variant {
        Variant::SingleSource => match members.get("properties") {
            Some(Value::Object(props)) => ranked_properties(props),
            _ => return Err(ProjectionError::MissingProperties),
        },
        Variant::LandAndLakes => FeatureProperties::tagged(layer),
    };
    Ok(Feature {
        properties,
        geometry,
    })
}

fn ranked_properties(props: &Map<String, Value>) -> FeatureProperties {
    let copy_or = |key: &str, fallback: Value| props.get(key).cloned().unwrap_or(fallback);
    FeatureProperties {
        featurecla: copy_or("featurecla", Value::from(Layer::Land.tag())),
        scalerank: Some(copy_or("scalerank", Value::from(0_u64))),
        min_zoom: Some(copy_or("min_zoom", Value::from(0.0_f64))),
    }
}
