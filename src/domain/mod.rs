//! Domain types: manifest, relevance filter, address table

pub mod address_table;
pub mod contracts;
pub mod manifest;

pub use address_table::AddressTable;
pub use contracts::{RelevantContractSet, SUPPLEMENTAL_CONTRACTS};
pub use manifest::DeploymentManifest;
