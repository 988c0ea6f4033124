//! CLI command implementations.

pub mod quote;
pub mod wishlist;

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use shopfront_core::PricingError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Input file is not a valid cart or wishlist.
    #[error("Invalid {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Totals could not be computed.
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),

    /// Output could not be serialized.
    #[error("Failed to write JSON: {0}")]
    Output(#[source] serde_json::Error),
}

/// Read and deserialize a JSON file.
fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, CommandError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CommandError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    parse_json(path, &contents)
}

fn parse_json<T: DeserializeOwned>(path: &Path, contents: &str) -> Result<T, CommandError> {
    serde_json::from_str(contents).map_err(|source| CommandError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
