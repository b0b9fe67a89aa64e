//! ABI Export
//!
//! Copies the `abi` field of each relevant compiled artifact into its own file.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::PlannedFile;
use crate::config::AbiExtractConfig;
use crate::domain::{DeploymentManifest, RelevantContractSet};
use crate::error::{Error, Result};
use crate::infrastructure::artifacts::{ArtifactFile, ArtifactScanner};

/// Plan one `<out_dir>/<Contract>.json` per relevant, non-debug artifact.
///
/// Relevant names without an artifact are skipped unless `require_all` is set.
/// When several artifacts share a contract name the last one in walk order wins.
pub fn plan_abis(config: &AbiExtractConfig) -> Result<Vec<PlannedFile>> {
    let manifest = DeploymentManifest::load(&config.manifest)?;
    let relevant = RelevantContractSet::from_manifest(&manifest, &config.supplemental)?;
    log::debug!(
        "{} relevant contracts, scanning {}",
        relevant.len(),
        config.artifacts.display()
    );

    let artifacts = ArtifactScanner::scan(&config.artifacts, &relevant)?;

    let missing: Vec<String> = relevant
        .iter()
        .filter(|name| !artifacts.iter().any(|artifact| artifact.name == *name))
        .map(str::to_string)
        .collect();
    if !missing.is_empty() {
        if config.require_all {
            return Err(Error::MissingArtifacts { names: missing });
        }
        log::debug!("no artifact for: {}", missing.join(", "));
    }

    let mut chosen: Vec<&ArtifactFile> = Vec::with_capacity(artifacts.len());
    for artifact in &artifacts {
        match chosen.iter_mut().find(|kept| kept.name == artifact.name) {
            Some(kept) => {
                log::warn!(
                    "{} shadows {} for {}.json",
                    artifact.path.display(),
                    kept.path.display(),
                    artifact.name
                );
                *kept = artifact;
            }
            None => chosen.push(artifact),
        }
    }

    chosen
        .into_iter()
        .map(|artifact| {
            let abi = ArtifactScanner::load_abi(&artifact.path)?;
            Ok(PlannedFile {
                path: config.out_dir.join(format!("{}.json", artifact.name)),
                contents: ArtifactScanner::render_abi(&abi),
            })
        })
        .collect()
}

/// ABI files already in `out_dir` that `plan` no longer produces
pub fn orphaned_abis(out_dir: &Path, plan: &[PlannedFile]) -> Result<Vec<PathBuf>> {
    let entries = match fs::read_dir(out_dir) {
        Ok(entries) => entries,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(Error::Read {
                path: out_dir.to_path_buf(),
                source,
            })
        }
    };

    let mut orphans = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Read {
            path: out_dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if !path.is_file() || path.extension().and_then(|s| s.to_str()) != Some("json") {
            continue;
        }
        if !plan.iter().any(|file| file.path == path) {
            orphans.push(path);
        }
    }
    orphans.sort();
    Ok(orphans)
}
