//! Test helpers for temporary output trees and stubbed datasets.

use super::*;
use landmask_core::{LAKES_URL, LAND_URL};
use landmask_data::natural_earth::test_support::{StubSource, sample_collection};
use tempfile::TempDir;

/// Temporary directory holding both globe output paths.
pub(super) struct OutputTree {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl OutputTree {
    pub(super) fn new() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root =
            Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        Self { _dir: dir, root }
    }

    pub(super) fn ts_output(&self) -> Utf8PathBuf {
        self.root.join(TS_OUTPUT)
    }

    pub(super) fn rust_output(&self) -> Utf8PathBuf {
        self.root.join(RUST_OUTPUT)
    }

    /// CLI flags directing both outputs into this tree.
    pub(super) fn output_flags(&self) -> Vec<String> {
        vec![
            format!("--{ARG_TS_OUTPUT}"),
            self.ts_output().into_string(),
            format!("--{ARG_RUST_OUTPUT}"),
            self.rust_output().into_string(),
        ]
    }
}

/// Stub serving `land` features at the default land URL and `lakes`
/// features at the default lakes URL.
pub(super) fn natural_earth_stub(land: usize, lakes: usize) -> StubSource {
    StubSource::new()
        .with_body(LAND_URL, sample_collection(land, Some("Land")))
        .with_body(LAKES_URL, sample_collection(lakes, Some("Lake")))
}

/// Parse `argv` and convert it without consulting files or the environment.
pub(super) fn config_from_argv(argv: &[String]) -> Result<RegenerateConfig, CliError> {
    let mut invocation = vec!["landmask".to_owned()];
    invocation.extend(argv.iter().cloned());
    let args = RegenerateArgs::try_parse_from(invocation).map_err(CliError::ArgumentParsing)?;
    RegenerateConfig::try_from(args)
}
