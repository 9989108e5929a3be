use camino::Utf8PathBuf;
use landmask_core::{Feature, FeatureCollection, Variant, extract_features, project_feature};
use log::{debug, info, warn};
use serde_json::Value;

use super::source::GeoJsonSource;
use super::{RegenerateError, RegenerateOptions, RegenerationReport, SourceSpec, SourceSummary};

/// Fetch every configured source, merge the projected features, and write
/// the compact document to every destination.
///
/// All fetching, parsing, projection, and serialisation finish before the
/// first byte is written, so a failure in any of them leaves existing files
/// untouched. Destinations are then written in order; a failed write stops
/// the run and earlier writes are kept.
///
/// # Examples
/// ```
/// # use camino::Utf8PathBuf;
/// # use landmask_data::natural_earth::{
/// #     RegenerateError, RegenerateOptions, regenerate, test_support::StubSource,
/// # };
/// # fn example() -> Result<(), RegenerateError> {
/// let temp = tempfile::tempdir().expect("create temp directory");
/// let root = Utf8PathBuf::from_path_buf(temp.path().to_path_buf()).expect("utf-8 path");
/// let options = RegenerateOptions::new(vec![root.join("a/land.json"), root.join("b/land.json")]);
/// let source = StubSource::new().with_body(
///     options.land_url.as_ref(),
///     br#"{"type":"FeatureCollection","features":[
///         {"type":"Feature","properties":{},"geometry":null}
///     ]}"#.to_vec(),
/// );
/// let report = regenerate(&source, &options)?;
/// assert_eq!(report.total_features, 1);
/// assert_eq!(
///     std::fs::read(root.join("a/land.json")).expect("first output"),
///     std::fs::read(root.join("b/land.json")).expect("second output"),
/// );
/// # Ok(())
/// # }
/// # example().expect("regeneration succeeds");
/// ```
pub fn regenerate<S: GeoJsonSource + ?Sized>(
    source: &S,
    options: &RegenerateOptions,
) -> Result<RegenerationReport, RegenerateError> {
    if options.destinations.is_empty() {
        return Err(RegenerateError::NoDestinations);
    }
    let plan = options.plan();
    let (collection, sources) = build_collection(source, &plan, options.variant)?;
    let bytes = collection
        .to_compact_json()
        .map_err(|source| RegenerateError::Serialise { source })?;
    debug!(
        "serialised {} features into {} bytes",
        collection.len(),
        bytes.len()
    );
    let destinations = write_outputs(&bytes, &options.destinations)?;
    Ok(RegenerationReport {
        variant: options.variant,
        sources,
        total_features: collection.len(),
        bytes_written: u64::try_from(bytes.len()).unwrap_or(u64::MAX),
        destinations,
    })
}

/// Fetch and project every source in `plan`, concatenating in plan order.
///
/// Sources are fetched one after another; the first failure aborts the run.
pub fn build_collection<S: GeoJsonSource + ?Sized>(
    source: &S,
    plan: &[SourceSpec],
    variant: Variant,
) -> Result<(FeatureCollection, Vec<SourceSummary>), RegenerateError> {
    let mut collection = FeatureCollection::new();
    let mut summaries = Vec::with_capacity(plan.len());
    for spec in plan {
        let features = fetch_layer(source, spec, variant)?;
        summaries.push(SourceSummary {
            layer: spec.layer,
            url: spec.url.clone(),
            features: features.len(),
        });
        collection.extend(features);
    }
    Ok((collection, summaries))
}

/// Fetch one source and project each of its features.
pub fn fetch_layer<S: GeoJsonSource + ?Sized>(
    source: &S,
    spec: &SourceSpec,
    variant: Variant,
) -> Result<Vec<Feature>, RegenerateError> {
    info!("Fetching {} data from {}...", spec.layer, spec.url);
    let body = source
        .fetch(&spec.url)
        .map_err(|err| RegenerateError::Fetch {
            layer: spec.layer,
            source: err,
        })?;
    let document = parse_document(body, spec)?;
    let raw_features =
        extract_features(document).map_err(|err| RegenerateError::MissingFeatures {
            layer: spec.layer,
            url: spec.url.to_string(),
            source: err,
        })?;
    if raw_features.is_empty() {
        warn!("{} data from {} contains no features", spec.layer, spec.url);
    }
    let projected = raw_features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| {
            project_feature(feature, variant, spec.layer).map_err(|err| {
                RegenerateError::Projection {
                    layer: spec.layer,
                    url: spec.url.to_string(),
                    index,
                    source: err,
                }
            })
        })
        .collect::<Result<Vec<_>, _>>()?;
    debug!("projected {} {} features", projected.len(), spec.layer);
    Ok(projected)
}

pub(crate) fn parse_document(
    mut body: Vec<u8>,
    spec: &SourceSpec,
) -> Result<Value, RegenerateError> {
    simd_json::serde::from_slice(&mut body).map_err(|err| RegenerateError::ParseDocument {
        layer: spec.layer,
        url: spec.url.to_string(),
        source: err,
    })
}

/// Write `bytes` to every destination in order, creating parent directories.
///
/// Each write replaces the whole file. Writes are independent: when one
/// fails the error is returned and files already written stay in place.
pub fn write_outputs(
    bytes: &[u8],
    destinations: &[Utf8PathBuf],
) -> Result<Vec<Utf8PathBuf>, RegenerateError> {
    let mut written = Vec::with_capacity(destinations.len());
    for path in destinations {
        landmask_fs::ensure_parent_dir(path).map_err(|source| RegenerateError::CreateDir {
            source,
            path: path.clone(),
        })?;
        landmask_fs::write_file(path, bytes).map_err(|source| RegenerateError::WriteOutput {
            source,
            path: path.clone(),
        })?;
        info!("Saved to {path}");
        written.push(path.clone());
    }
    Ok(written)
}
