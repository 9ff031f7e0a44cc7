//! Error types for airsteer-geometry.

use thiserror::Error;

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building the site model.
#[derive(Debug, Error)]
pub enum Error {
    /// The string is not a MAC-48 address.
    #[error("invalid BSSID: {0:?}")]
    InvalidBssid(String),
}
