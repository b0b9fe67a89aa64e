//! TypeScript Export
//!
//! Renders the deployment manifest as an `addresses.ts` module.

use super::PlannedFile;
use crate::config::AddressTableConfig;
use crate::domain::{AddressTable, DeploymentManifest};
use crate::error::{Error, Result};

/// Plan the address-table module; an empty manifest is an error
pub fn plan_addresses(config: &AddressTableConfig) -> Result<PlannedFile> {
    let manifest = DeploymentManifest::load(&config.manifest)?;
    if manifest.is_empty() {
        return Err(Error::EmptyManifest {
            path: manifest.path,
        });
    }

    let table = AddressTable::from_manifest(&manifest);
    log::debug!(
        "{} contracts across {} networks",
        table.len(),
        manifest.networks.len()
    );

    Ok(PlannedFile {
        path: config.out.clone(),
        contents: table.render(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn config(dir: &TempDir, manifest: &str) -> AddressTableConfig {
        fs::write(dir.path().join("deploys.json"), manifest).unwrap();
        AddressTableConfig {
            manifest: dir.path().join("deploys.json"),
            out: dir.path().join("addresses.ts"),
        }
    }

    #[test]
    fn test_plan_addresses() {
        let dir = TempDir::new().unwrap();
        let plan = plan_addresses(&config(
            &dir,
            r#"{"Ethereum": {"Foo": "0xABC"}, "Polygon": {"Foo": "0xDEF"}}"#,
        ))
        .unwrap();

        assert_eq!(plan.path, dir.path().join("addresses.ts"));
        assert!(plan.contents.contains("[Network.Ethereum]: \"0xabc\","));
        assert!(plan.contents.contains("[Network.Polygon]: \"0xdef\","));
        assert_eq!(plan.contents.matches("export const Foo:").count(), 1);
    }

    #[test]
    fn test_empty_manifest_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            plan_addresses(&config(&dir, "{}")),
            Err(Error::EmptyManifest { .. })
        ));
        assert!(matches!(
            plan_addresses(&config(&dir, r#"{"Ethereum": {}}"#)),
            Err(Error::EmptyManifest { .. })
        ));
    }

    #[test]
    fn test_missing_manifest() {
        let dir = TempDir::new().unwrap();
        let config = AddressTableConfig {
            manifest: dir.path().join("nope.json"),
            out: dir.path().join("addresses.ts"),
        };
        assert!(matches!(plan_addresses(&config), Err(Error::Read { .. })));
    }
}
