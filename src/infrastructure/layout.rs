//! Legacy directory conventions - where inputs and outputs live when nothing is configured

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Ancestor directory name that anchors the monorepo
pub const MARKER_DIR: &str = "indexer";

/// Compiled artifacts, relative to the marker directory
pub const ARTIFACTS_SUBDIR: [&str; 3] = ["packages", "contracts", "artifacts"];

pub const MANIFEST_FILE: &str = "deploys.json";
pub const ABI_OUT_DIR: &str = "abis";
pub const ADDRESSES_FILE: &str = "../addresses.ts";

/// Walk upward from `start` (inclusive) to the first directory named `marker`
pub fn find_marker_ancestor(start: &Path, marker: &str) -> Result<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.file_name().and_then(|n| n.to_str()) == Some(marker))
        .map(Path::to_path_buf)
        .ok_or_else(|| Error::MarkerNotFound {
            start: start.to_path_buf(),
            marker: marker.to_string(),
        })
}

/// Default artifacts root for a working directory
pub fn default_artifacts_dir(cwd: &Path) -> Result<PathBuf> {
    let root = find_marker_ancestor(cwd, MARKER_DIR)?;
    Ok(ARTIFACTS_SUBDIR.iter().fold(root, |dir, part| dir.join(part)))
}
