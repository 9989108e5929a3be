use super::ops::parse_document;
use super::test_support::{StubSource, sample_collection};
use super::*;
use camino::Utf8PathBuf;
use landmask_core::{LAKES_URL, LAND_URL, Layer, Variant};
use rstest::{fixture, rstest};
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

struct Workspace {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl Workspace {
    fn ts_output(&self) -> Utf8PathBuf {
        self.root.join(TS_OUTPUT)
    }

    fn rust_output(&self) -> Utf8PathBuf {
        self.root.join(RUST_OUTPUT)
    }

    fn options(&self) -> RegenerateOptions {
        RegenerateOptions::new(vec![self.ts_output(), self.rust_output()])
    }
}

#[fixture]
fn workspace() -> Workspace {
    let dir = TempDir::new().expect("failed to create temporary directory");
    let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 tempdir");
    Workspace { _dir: dir, root }
}

fn read_json(path: &Utf8PathBuf) -> Value {
    let bytes = fs::read(path).expect("output should be readable");
    serde_json::from_slice(&bytes).expect("output should be JSON")
}

#[rstest]
fn single_source_writes_every_land_feature(workspace: Workspace) {
    let source = StubSource::new().with_body(LAND_URL, sample_collection(3, Some("Land")));
    let report = regenerate(&source, &workspace.options()).expect("regeneration succeeds");

    assert_eq!(report.variant, Variant::SingleSource);
    assert_eq!(report.total_features, 3);
    assert_eq!(source.requests(), vec![LAND_URL.to_owned()]);
    let output = read_json(&workspace.ts_output());
    let features = output["features"].as_array().expect("features array");
    assert_eq!(features.len(), 3);
    let first = features.first().expect("one feature");
    assert_eq!(
        first["properties"],
        serde_json::json!({"featurecla": "Land", "scalerank": 1, "min_zoom": 0.5})
    );
}

#[rstest]
fn land_and_lakes_concatenates_in_fetch_order(workspace: Workspace) {
    let source = StubSource::new()
        .with_body(LAND_URL, sample_collection(2, Some("Land")))
        .with_body(LAKES_URL, sample_collection(3, Some("Reservoir")));
    let options = workspace.options().with_variant(Variant::LandAndLakes);
    let report = regenerate(&source, &options).expect("regeneration succeeds");

    assert_eq!(report.total_features, 5);
    assert_eq!(
        source.requests(),
        vec![LAND_URL.to_owned(), LAKES_URL.to_owned()]
    );
    let counts: Vec<(Layer, usize)> = report
        .sources
        .iter()
        .map(|summary| (summary.layer, summary.features))
        .collect();
    assert_eq!(counts, vec![(Layer::Land, 2), (Layer::Lake, 3)]);

    let output = read_json(&workspace.rust_output());
    let classes: Vec<&str> = output["features"]
        .as_array()
        .expect("features array")
        .iter()
        .map(|feature| feature["properties"]["featurecla"].as_str().expect("tag"))
        .collect();
    assert_eq!(classes, vec!["Land", "Land", "Lake", "Lake", "Lake"]);
}

#[rstest]
fn outputs_are_identical_and_stable_across_runs(workspace: Workspace) {
    let source = StubSource::new().with_body(LAND_URL, sample_collection(4, None));
    let options = workspace.options();
    regenerate(&source, &options).expect("first run succeeds");
    let first = fs::read(workspace.ts_output()).expect("ts output");
    assert_eq!(first, fs::read(workspace.rust_output()).expect("rust output"));

    let report = regenerate(&source, &options).expect("second run succeeds");
    assert_eq!(first, fs::read(workspace.ts_output()).expect("ts output"));
    assert_eq!(
        report.bytes_written,
        u64::try_from(first.len()).expect("length fits")
    );
}

#[rstest]
fn geometry_bytes_pass_through_unchanged(workspace: Workspace) {
    let geometry = r#"{"type":"Polygon","coordinates":[[[180.0,-16.067133],[179.413509,-16.379054],[-180.0,-16.555217],[180.0,-16.067133]]]}"#;
    let body = format!(
        r#"{{"type":"FeatureCollection","features":[{{"type":"Feature","properties":{{"featurecla":"Land"}},"geometry":{geometry}}}]}}"#
    );
    let source = StubSource::new().with_body(LAND_URL, body.into_bytes());
    regenerate(&source, &workspace.options()).expect("regeneration succeeds");

    let written = fs::read_to_string(workspace.ts_output()).expect("ts output");
    assert!(written.contains(geometry), "geometry should survive verbatim");
    assert!(!written.contains(' '), "output should be compact");
}

#[rstest]
fn http_error_leaves_existing_outputs_untouched(workspace: Workspace) {
    fs::create_dir_all(workspace.root.join("src/utils")).expect("create ts dir");
    fs::write(workspace.ts_output(), b"previous").expect("seed ts output");
    let source = StubSource::new().with_status(LAND_URL, 404);

    let err = regenerate(&source, &workspace.options()).expect_err("404 should fail");
    match err {
        RegenerateError::Fetch {
            layer: Layer::Land,
            source: TransportError::Http { status, .. },
        } => assert_eq!(status, 404),
        other => panic!("expected an HTTP fetch error, got {other:?}"),
    }
    assert_eq!(fs::read(workspace.ts_output()).expect("ts output"), b"previous");
    assert!(!workspace.rust_output().exists());
}

#[rstest]
fn lake_failure_prevents_land_output(workspace: Workspace) {
    let source = StubSource::new()
        .with_body(LAND_URL, sample_collection(2, None))
        .with_unreachable(LAKES_URL);
    let options = workspace.options().with_variant(Variant::LandAndLakes);

    let err = regenerate(&source, &options).expect_err("lake fetch should fail");
    assert!(matches!(
        err,
        RegenerateError::Fetch {
            layer: Layer::Lake,
            source: TransportError::Network { .. },
        }
    ));
    assert!(!workspace.ts_output().exists());
    assert!(!workspace.rust_output().exists());
}

#[rstest]
fn malformed_body_is_a_parse_error(workspace: Workspace) {
    let source = StubSource::new().with_body(LAND_URL, b"<html>rate limited</html>".to_vec());
    let err = regenerate(&source, &workspace.options()).expect_err("HTML should not parse");
    assert!(matches!(err, RegenerateError::ParseDocument { layer: Layer::Land, .. }));
    assert!(!workspace.ts_output().exists());
}

#[rstest]
fn document_without_features_member_writes_empty_collection(workspace: Workspace) {
    let body = br#"{"type":"FeatureCollection"}"#;
    let source = StubSource::new().with_body(LAND_URL, body.to_vec());
    let report = regenerate(&source, &workspace.options()).expect("absent features are empty");
    assert_eq!(report.total_features, 0);
    for path in [workspace.ts_output(), workspace.rust_output()] {
        let bytes = fs::read(&path).expect("output written");
        assert_eq!(bytes, br#"{"type":"FeatureCollection","features":[]}"#);
    }
}

#[rstest]
#[case(br#"{"type":"FeatureCollection","features":null}"#.as_slice())]
#[case(br#"{"type":"FeatureCollection","features":{}}"#.as_slice())]
#[case(b"[]".as_slice())]
fn documents_with_unusable_features_are_rejected(workspace: Workspace, #[case] body: &[u8]) {
    let source = StubSource::new().with_body(LAND_URL, body.to_vec());
    let err = regenerate(&source, &workspace.options()).expect_err("features must be an array");
    assert!(matches!(err, RegenerateError::MissingFeatures { .. }));
    assert!(!workspace.ts_output().exists());
}

#[rstest]
fn incomplete_feature_reports_its_index(workspace: Workspace) {
    let body = br#"{"features":[
        {"type":"Feature","properties":{},"geometry":null},
        {"type":"Feature","properties":{}}
    ]}"#;
    let source = StubSource::new().with_body(LAND_URL, body.to_vec());
    let err = regenerate(&source, &workspace.options()).expect_err("geometry is required");
    match err {
        RegenerateError::Projection { index, source, .. } => {
            assert_eq!(index, 1);
            assert_eq!(source, landmask_core::ProjectionError::MissingGeometry);
        }
        other => panic!("expected a projection error, got {other:?}"),
    }
}

#[rstest]
fn empty_destinations_fail_before_fetching() {
    let source = StubSource::new().with_body(LAND_URL, sample_collection(1, None));
    let err = regenerate(&source, &RegenerateOptions::new(Vec::new()))
        .expect_err("destinations are required");
    assert!(matches!(err, RegenerateError::NoDestinations));
    assert!(source.requests().is_empty());
}

#[rstest]
fn failed_write_keeps_earlier_outputs(workspace: Workspace) {
    let blocked = workspace.root.join("blocked");
    fs::create_dir_all(&blocked).expect("create blocking directory");
    let options = RegenerateOptions::new(vec![workspace.ts_output(), blocked.clone()]);
    let source = StubSource::new().with_body(LAND_URL, sample_collection(1, None));

    let err = regenerate(&source, &options).expect_err("writing over a directory fails");
    match err {
        RegenerateError::WriteOutput { path, .. } => assert_eq!(path, blocked),
        other => panic!("expected a write error, got {other:?}"),
    }
    assert!(workspace.ts_output().exists(), "first write is not rolled back");
}

#[rstest]
fn overrides_source_urls() {
    let mirror = "https://mirror.test/lakes.json";
    let options = RegenerateOptions::default()
        .with_variant(Variant::LandAndLakes)
        .with_source_url(Layer::Lake, SourceUrl::new(mirror));
    let plan = options.plan();
    let urls: Vec<&str> = plan.iter().map(|spec| spec.url.as_ref()).collect();
    assert_eq!(urls, vec![LAND_URL, mirror]);
}

#[rstest]
fn default_options_target_both_globes() {
    let options = RegenerateOptions::default();
    assert_eq!(
        options.destinations,
        vec![Utf8PathBuf::from(TS_OUTPUT), Utf8PathBuf::from(RUST_OUTPUT)]
    );
    assert_eq!(options.variant, Variant::SingleSource);
    assert_eq!(options.plan().len(), 1);
}

#[rstest]
#[case("https://example.test/land.json", true)]
#[case("not a url", false)]
fn source_urls_validate(#[case] input: &str, #[case] valid: bool) {
    assert_eq!(SourceUrl::try_from(input).is_ok(), valid);
}

#[rstest]
fn parse_document_preserves_member_order() {
    let spec = SourceSpec {
        layer: Layer::Land,
        url: SourceUrl::default_for(Layer::Land),
    };
    let document = parse_document(br#"{"zeta":1,"alpha":2,"mid":3}"#.to_vec(), &spec)
        .expect("document parses");
    let keys: Vec<&str> = document
        .as_object()
        .expect("object")
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
}
