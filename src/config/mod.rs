use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::domain::SUPPLEMENTAL_CONTRACTS;
use crate::infrastructure::layout;

pub const CONFIG_ENV: &str = "DEPLOYGEN_CONFIG";
pub const CONFIG_FILE: &str = "deploygen.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AbisSection {
    pub artifacts: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddressesSection {
    pub out: Option<PathBuf>,
}

/// Contents of `deploygen.toml`; every field is optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub manifest: Option<PathBuf>,
    pub supplemental: Option<Vec<String>>,
    #[serde(default)]
    pub require_all: bool,

    #[serde(default)]
    pub abis: AbisSection,

    #[serde(default)]
    pub addresses: AddressesSection,
}

/// Fully resolved settings for the ABI extractor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiExtractConfig {
    pub manifest: PathBuf,
    pub artifacts: PathBuf,
    pub out_dir: PathBuf,
    pub supplemental: Vec<String>,
    /// Fail instead of silently skipping relevant contracts without an artifact
    pub require_all: bool,
}

/// Fully resolved settings for the address-table generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTableConfig {
    pub manifest: PathBuf,
    pub out: PathBuf,
}

/// Overrides coming from the command line
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub manifest: Option<PathBuf>,
    pub artifacts: Option<PathBuf>,
    pub out_dir: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub require_all: bool,
}

/// Load the config file. An explicitly named file must exist; the implicit
/// `./deploygen.toml` is optional.
pub fn load(explicit: Option<&Path>, cwd: &Path) -> Result<FileConfig> {
    let (path, required) = config_path(explicit, cwd);
    if !required && !path.is_file() {
        return Ok(FileConfig::default());
    }

    let content =
        fs::read_to_string(&path).with_context(|| format!("read config {}", path.display()))?;
    let config = toml::from_str::<FileConfig>(&content)
        .with_context(|| format!("parse config {}", path.display()))?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

fn config_path(explicit: Option<&Path>, cwd: &Path) -> (PathBuf, bool) {
    if let Some(path) = explicit {
        return (cwd.join(path), true);
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV).map(PathBuf::from) {
        return (cwd.join(path), true);
    }
    (cwd.join(CONFIG_FILE), false)
}

impl FileConfig {
    fn manifest(&self, overrides: &Overrides, cwd: &Path) -> PathBuf {
        resolve(
            cwd,
            overrides.manifest.as_deref().or(self.manifest.as_deref()),
            layout::MANIFEST_FILE,
        )
    }

    /// Resolve ABI extractor settings: flag, then file, then legacy convention
    pub fn abi_extract(
        &self,
        overrides: &Overrides,
        cwd: &Path,
    ) -> crate::error::Result<AbiExtractConfig> {
        let artifacts = match overrides.artifacts.as_deref().or(self.abis.artifacts.as_deref()) {
            Some(path) => cwd.join(path),
            None => layout::default_artifacts_dir(cwd)?,
        };
        let supplemental = self.supplemental.clone().unwrap_or_else(|| {
            SUPPLEMENTAL_CONTRACTS
                .iter()
                .map(|name| name.to_string())
                .collect()
        });

        Ok(AbiExtractConfig {
            manifest: self.manifest(overrides, cwd),
            artifacts,
            out_dir: resolve(
                cwd,
                overrides.out_dir.as_deref().or(self.abis.out_dir.as_deref()),
                layout::ABI_OUT_DIR,
            ),
            supplemental,
            require_all: overrides.require_all || self.require_all,
        })
    }

    /// Resolve address-table generator settings
    pub fn address_table(&self, overrides: &Overrides, cwd: &Path) -> AddressTableConfig {
        AddressTableConfig {
            manifest: self.manifest(overrides, cwd),
            out: resolve(
                cwd,
                overrides.out.as_deref().or(self.addresses.out.as_deref()),
                layout::ADDRESSES_FILE,
            ),
        }
    }
}

fn resolve(cwd: &Path, configured: Option<&Path>, fallback: &str) -> PathBuf {
    cwd.join(configured.unwrap_or_else(|| Path::new(fallback)))
}
