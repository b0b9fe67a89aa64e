//! Relevant contract set - which artifacts get their ABI exported

use std::collections::BTreeSet;

use crate::domain::manifest::DeploymentManifest;
use crate::error::Result;

/// Manifest section whose contracts are always in scope
pub const RELEVANCE_NETWORK: &str = "Ethereum";

/// Interfaces that are never deployed on their own but whose ABI the SDK needs
pub const SUPPLEMENTAL_CONTRACTS: [&str; 2] = ["IERC721", "IERC1155"];

/// Contract names considered in scope. Matching is exact, no case folding.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RelevantContractSet {
    names: BTreeSet<String>,
}

impl RelevantContractSet {
    /// Supplemental names plus every contract of the `Ethereum` section
    pub fn from_manifest<I>(manifest: &DeploymentManifest, supplemental: I) -> Result<Self>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let mut names: BTreeSet<String> = supplemental
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        names.extend(
            manifest
                .contract_names(RELEVANCE_NETWORK)?
                .into_iter()
                .map(str::to_string),
        );
        Ok(Self { names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn manifest(json: &str) -> DeploymentManifest {
        DeploymentManifest::parse("deploys.json", json).unwrap()
    }

    #[test]
    fn test_union_of_supplemental_and_ethereum() {
        let m = manifest(r#"{"Ethereum": {"Router": "0x1"}, "Polygon": {"OnlyPolygon": "0x2"}}"#);
        let set = RelevantContractSet::from_manifest(&m, &SUPPLEMENTAL_CONTRACTS).unwrap();

        assert!(set.contains("Router"));
        assert!(set.contains("IERC721"));
        assert!(set.contains("IERC1155"));
        // Other networks do not widen the set
        assert!(!set.contains("OnlyPolygon"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_membership_is_case_sensitive() {
        let m = manifest(r#"{"Ethereum": {"Router": "0x1"}}"#);
        let set = RelevantContractSet::from_manifest(&m, Vec::<String>::new()).unwrap();
        assert!(set.contains("Router"));
        assert!(!set.contains("router"));
        assert!(!set.contains("ROUTER"));
    }

    #[test]
    fn test_requires_ethereum_section() {
        let m = manifest(r#"{"Polygon": {"Router": "0x1"}}"#);
        let err = RelevantContractSet::from_manifest(&m, &SUPPLEMENTAL_CONTRACTS).unwrap_err();
        assert!(matches!(err, Error::MissingNetwork { .. }));
    }
}
