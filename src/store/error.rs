use thiserror::Error;

/// Failures a key-value substrate can report on write.
///
/// Reads never fail: an unreadable substrate reads as absent.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store misconfigured: {0}")]
    Misconfigured(String),
}
