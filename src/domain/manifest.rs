//! Deployment manifest - network -> contract -> address, in file order

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};

/// Contracts deployed on a single network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkDeployments {
    /// Network name as written in the manifest (e.g., "Ethereum")
    pub name: String,
    /// (contract name, address) pairs in manifest order, address untouched
    pub contracts: Vec<(String, String)>,
}

/// Parsed `deploys.json`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentManifest {
    /// Source file, kept for error reporting
    pub path: PathBuf,
    /// Networks in manifest order
    pub networks: Vec<NetworkDeployments>,
}

impl DeploymentManifest {
    /// Read and parse a manifest file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(path, &content)
    }

    /// Parse manifest text; `path` is only used in error messages
    pub fn parse(path: impl AsRef<Path>, content: &str) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let value: Value = serde_json::from_str(content).map_err(|source| Error::Json {
            path: path.clone(),
            source,
        })?;

        let Value::Object(root) = value else {
            return Err(Error::MalformedManifest {
                path,
                reason: "top level is not an object".to_string(),
            });
        };

        let mut networks = Vec::with_capacity(root.len());
        for (name, contracts) in root {
            let contracts = Self::parse_network(&path, &name, contracts)?;
            networks.push(NetworkDeployments { name, contracts });
        }

        Ok(Self { path, networks })
    }

    fn parse_network(path: &Path, network: &str, value: Value) -> Result<Vec<(String, String)>> {
        let Value::Object(entries) = value else {
            return Err(Error::MalformedManifest {
                path: path.to_path_buf(),
                reason: format!("network `{}` is not an object", network),
            });
        };

        entries
            .into_iter()
            .map(|(contract, address)| match address {
                Value::String(address) => Ok((contract, address)),
                _ => Err(Error::MalformedManifest {
                    path: path.to_path_buf(),
                    reason: format!("address of `{}` on `{}` is not a string", contract, network),
                }),
            })
            .collect()
    }

    /// Look up a network section by exact name
    pub fn network(&self, name: &str) -> Option<&NetworkDeployments> {
        self.networks.iter().find(|network| network.name == name)
    }

    /// Contract names of a network section, failing if the section is absent
    pub fn contract_names(&self, network: &str) -> Result<Vec<&str>> {
        let section = self.network(network).ok_or_else(|| Error::MissingNetwork {
            path: self.path.clone(),
            network: network.to_string(),
        })?;
        Ok(section.contracts.iter().map(|(name, _)| name.as_str()).collect())
    }

    /// True when no network lists any contract
    pub fn is_empty(&self) -> bool {
        self.networks.iter().all(|network| network.contracts.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_preserves_order() {
        let manifest = DeploymentManifest::parse(
            "deploys.json",
            r#"{"Polygon": {"Zeta": "0x1", "Alpha": "0x2"}, "Ethereum": {"Beta": "0xAB"}}"#,
        )
        .unwrap();

        let names: Vec<&str> = manifest.networks.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["Polygon", "Ethereum"]);
        assert_eq!(
            manifest.networks[0].contracts,
            vec![
                ("Zeta".to_string(), "0x1".to_string()),
                ("Alpha".to_string(), "0x2".to_string()),
            ]
        );
        // Case is left alone at this layer
        assert_eq!(manifest.networks[1].contracts[0].1, "0xAB");
    }

    #[test]
    fn test_contract_names() {
        let manifest =
            DeploymentManifest::parse("deploys.json", r#"{"Ethereum": {"Foo": "0x1", "Bar": "0x2"}}"#)
                .unwrap();
        assert_eq!(manifest.contract_names("Ethereum").unwrap(), vec!["Foo", "Bar"]);

        let err = manifest.contract_names("Polygon").unwrap_err();
        assert!(matches!(err, Error::MissingNetwork { ref network, .. } if network == "Polygon"));
    }

    #[test]
    fn test_rejects_malformed_shapes() {
        assert!(matches!(
            DeploymentManifest::parse("m", "[1, 2]"),
            Err(Error::MalformedManifest { .. })
        ));
        assert!(matches!(
            DeploymentManifest::parse("m", r#"{"Ethereum": "0x1"}"#),
            Err(Error::MalformedManifest { .. })
        ));
        assert!(matches!(
            DeploymentManifest::parse("m", r#"{"Ethereum": {"Foo": 1}}"#),
            Err(Error::MalformedManifest { .. })
        ));
        assert!(matches!(
            DeploymentManifest::parse("m", "{not json"),
            Err(Error::Json { .. })
        ));
    }

    #[test]
    fn test_is_empty() {
        assert!(DeploymentManifest::parse("m", "{}").unwrap().is_empty());
        assert!(DeploymentManifest::parse("m", r#"{"Ethereum": {}}"#).unwrap().is_empty());
        assert!(!DeploymentManifest::parse("m", r#"{"Ethereum": {"Foo": "0x1"}}"#)
            .unwrap()
            .is_empty());
    }
}
