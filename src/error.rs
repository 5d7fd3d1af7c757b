//! Error type for catalog lookups and settings loading
//!
//! The simulation itself never fails; errors only surface where names or
//! external data are turned into typed values.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    /// Effect name that is not in the bullet effect catalog
    #[error("unknown bullet effect `{0}`")]
    UnknownEffect(String),

    /// Item name or id that is not in the item catalog
    #[error("unknown item `{0}`")]
    UnknownItem(String),

    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
}
