//! Error types for airsteer-assign.

use thiserror::Error;

/// Result type for assignment operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assigning nodes to access points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The access point set is empty; nothing to steer toward.
    #[error("no access points available")]
    NoTargetsAvailable,

    /// This machine is not listed among the nodes.
    #[error("local node {id:?} not found among nodes")]
    LocalNodeNotFound { id: String },
}
