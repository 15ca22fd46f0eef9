//! Shared helpers for data crate integration tests.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// Directory containing the sample network and request files.
pub fn fixtures_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Write `contents` to `name` inside `dir` and return the file path.
pub fn write_fixture(dir: &TempDir, name: &str, contents: &str) -> Utf8PathBuf {
    let root = Utf8Path::from_path(dir.path()).unwrap_or_else(|| {
        panic!("temporary directory should be UTF-8: {:?}", dir.path());
    });
    let path = root.join(name);
    fs::write(&path, contents).unwrap_or_else(|err| {
        panic!("failed to write fixture {path}: {err}");
    });
    path
}
