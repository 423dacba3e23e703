use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to touch snapshot file")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize snapshot")]
    Serialization(#[from] serde_json::Error),
}
