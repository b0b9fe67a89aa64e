use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("malformed json in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("walk error under {}: {source}", root.display())]
    Walk {
        root: PathBuf,
        source: walkdir::Error,
    },

    #[error("{}: {reason}", path.display())]
    MalformedManifest { path: PathBuf, reason: String },
    #[error("{}: manifest has no `{network}` section", path.display())]
    MissingNetwork { path: PathBuf, network: String },
    #[error("{}: manifest lists no contracts", path.display())]
    EmptyManifest { path: PathBuf },
    #[error("{}: artifact has no `abi` field", path.display())]
    MissingAbi { path: PathBuf },

    #[error("no ancestor of {} is named `{marker}`", start.display())]
    MarkerNotFound { start: PathBuf, marker: String },
    #[error("artifacts directory {} does not exist", path.display())]
    MissingArtifactsDir { path: PathBuf },
    #[error("no artifact found for: {}", names.join(", "))]
    MissingArtifacts { names: Vec<String> },
}
