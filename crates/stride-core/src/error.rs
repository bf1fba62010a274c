use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("malformed snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
