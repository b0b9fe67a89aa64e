//! Artifact infrastructure - filesystem discovery of compiled contracts

mod scanner;

pub use scanner::{ArtifactFile, ArtifactScanner};
