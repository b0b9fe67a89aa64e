//! Address table - manifest pivoted to contract -> network -> address

use std::collections::HashMap;

use crate::domain::manifest::DeploymentManifest;

/// Import line placed at the top of the generated module
pub const HEADER: &str = r#"import { ChainIdToAddress, Network } from "../utils";"#;

/// Addresses of one contract across networks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractAddresses {
    pub contract: String,
    /// (network, lower-cased address) in manifest order
    pub networks: Vec<(String, String)>,
}

/// Pivot of a deployment manifest, contracts in first-seen order
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AddressTable {
    entries: Vec<ContractAddresses>,
    index: HashMap<String, usize>,
}

impl AddressTable {
    /// Build the pivot in one pass over networks, then contracts
    pub fn from_manifest(manifest: &DeploymentManifest) -> Self {
        let mut table = Self::default();
        for network in &manifest.networks {
            for (contract, address) in &network.contracts {
                table.insert(contract, &network.name, address);
            }
        }
        table
    }

    fn insert(&mut self, contract: &str, network: &str, address: &str) {
        let slot = match self.index.get(contract) {
            Some(&slot) => slot,
            None => {
                self.entries.push(ContractAddresses {
                    contract: contract.to_string(),
                    networks: Vec::new(),
                });
                self.index.insert(contract.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot]
            .networks
            .push((network.to_string(), address.to_lowercase()));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Render the TypeScript module: header, then one constant per contract
    pub fn render(&self) -> String {
        let mut blocks = Vec::with_capacity(self.entries.len() + 1);
        blocks.push(HEADER.to_string());
        blocks.extend(self.entries.iter().map(render_constant));

        let mut out = blocks.join("\n\n");
        out.push('\n');
        out
    }
}

fn render_constant(entry: &ContractAddresses) -> String {
    let mut out = format!("export const {}: ChainIdToAddress = {{\n", entry.contract);
    for (network, address) in &entry.networks {
        out.push_str(&format!("  [Network.{}]: \"{}\",\n", network, address));
    }
    out.push_str("};");
    out
}
