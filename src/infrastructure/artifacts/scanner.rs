//! Artifact scanner - discovers compiled contract artifacts and pulls out their ABI

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::domain::RelevantContractSet;
use crate::error::{Error, Result};

/// Companion files carrying source maps, never exported
pub const DEBUG_MARKER: &str = ".dbg.json";

/// An artifact file selected for export
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactFile {
    /// Contract name (file stem)
    pub name: String,
    pub path: PathBuf,
}

/// Compiled artifact scanner
pub struct ArtifactScanner;

impl ArtifactScanner {
    /// Find every non-debug JSON artifact under `root` whose stem is relevant.
    /// Results follow a file-name-sorted walk so output order is stable.
    pub fn scan(root: impl AsRef<Path>, relevant: &RelevantContractSet) -> Result<Vec<ArtifactFile>> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(Error::MissingArtifactsDir {
                path: root.to_path_buf(),
            });
        }

        let mut found = Vec::new();
        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|source| Error::Walk {
                root: root.to_path_buf(),
                source,
            })?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }
            if Self::is_debug_artifact(path) {
                log::debug!("skipping debug artifact {}", path.display());
                continue;
            }

            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !relevant.contains(name) {
                continue;
            }

            found.push(ArtifactFile {
                name: name.to_string(),
                path: path.to_path_buf(),
            });
        }

        Ok(found)
    }

    /// Read an artifact and return its `abi` field untouched
    pub fn load_abi(path: &Path) -> Result<Value> {
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut value: Value = serde_json::from_str(&content).map_err(|source| Error::Json {
            path: path.to_path_buf(),
            source,
        })?;

        value
            .get_mut("abi")
            .map(Value::take)
            .ok_or_else(|| Error::MissingAbi {
                path: path.to_path_buf(),
            })
    }

    /// Pretty-printed ABI with 2-space indentation and a trailing newline
    pub fn render_abi(abi: &Value) -> String {
        // Serializing a Value cannot fail
        let mut out = serde_json::to_string_pretty(abi).unwrap_or_default();
        out.push('\n');
        out
    }

    /// Check if a path is a debug companion artifact
    fn is_debug_artifact(path: &Path) -> bool {
        path.to_string_lossy().contains(DEBUG_MARKER)
    }
}
