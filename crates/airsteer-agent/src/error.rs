//! Error types for the steering agent.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for agent operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the agent.
///
/// Everything except [`Error::Env`] is recoverable in continuous mode: the
/// cycle is skipped and the next one starts after the interval.
#[derive(Debug, Error)]
pub enum Error {
    /// A site file could not be read or has a malformed row
    #[error("failed to load {path:?}: {reason}")]
    ConfigParse { path: PathBuf, reason: String },

    /// The AP set is empty
    #[error("no access points available")]
    NoTargetsAvailable,

    /// This machine is not listed among the nodes (or its id is unknown)
    #[error("local node {} not found among nodes", .id.as_deref().unwrap_or("<unknown id>"))]
    LocalNodeNotFound { id: Option<String> },

    /// The network manager refused or failed a request
    #[error("steering transport error: {0}")]
    SteeringTransport(String),

    /// The machine identity could not be determined
    #[error("machine identity unavailable: {0}")]
    Identity(String),

    /// An environment variable has an unusable value
    #[error("invalid {var}={value:?}: {reason}")]
    Env {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<airsteer_assign::Error> for Error {
    fn from(e: airsteer_assign::Error) -> Self {
        match e {
            airsteer_assign::Error::NoTargetsAvailable => Error::NoTargetsAvailable,
            airsteer_assign::Error::LocalNodeNotFound { id } => {
                Error::LocalNodeNotFound { id: Some(id) }
            }
        }
    }
}

impl Error {
    /// Whether the cycle can simply be retried after the interval.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Error::Env { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assign_errors_map_onto_taxonomy() {
        let e: Error = airsteer_assign::Error::NoTargetsAvailable.into();
        assert!(matches!(e, Error::NoTargetsAvailable));

        let e: Error = airsteer_assign::Error::LocalNodeNotFound { id: "abc".into() }.into();
        assert!(matches!(e, Error::LocalNodeNotFound { id: Some(ref id) } if id == "abc"));
        assert_eq!(e.to_string(), "local node abc not found among nodes");
    }

    #[test]
    fn unknown_identity_renders() {
        let e = Error::LocalNodeNotFound { id: None };
        assert_eq!(e.to_string(), "local node <unknown id> not found among nodes");
    }

    #[test]
    fn only_env_errors_are_fatal() {
        assert!(Error::NoTargetsAvailable.is_recoverable());
        assert!(Error::SteeringTransport("bus".into()).is_recoverable());
        assert!(!Error::Env {
            var: "INTERVAL_SECS",
            value: "soon".into(),
            reason: "not a number".into(),
        }
        .is_recoverable());
    }
}
