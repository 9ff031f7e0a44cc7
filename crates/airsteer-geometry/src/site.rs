//! Site entities: client nodes and access points.

use crate::Position;
use std::convert::Infallible;
use std::str::FromStr;

/// What kind of client a node is.
///
/// Site files are edited by hand, so unknown kinds are kept rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Desktop,
    Laptop,
    Other(String),
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Self::Desktop,
            "laptop" => Self::Laptop,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl FromStr for NodeKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Desktop => f.write_str("desktop"),
            Self::Laptop => f.write_str("laptop"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// What kind of radio an access point is.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApKind {
    Ap,
    Other(String),
}

impl From<&str> for ApKind {
    fn from(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "ap" => Self::Ap,
            _ => Self::Other(s.trim().to_string()),
        }
    }
}

impl FromStr for ApKind {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl std::fmt::Display for ApKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ap => f.write_str("ap"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// A Wi-Fi client device.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    /// Stable machine identifier (SMBIOS system UUID, usually)
    pub id: String,
    pub position: Position,
}

impl Node {
    pub fn new(kind: NodeKind, id: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            id: id.into(),
            position,
        }
    }

    /// Distance from this node to an access point.
    #[inline]
    pub fn distance_to(&self, ap: &AccessPoint) -> f64 {
        self.position.distance(&ap.position)
    }
}

/// One physical radio broadcasting the shared SSID.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessPoint {
    pub kind: ApKind,
    /// BSSID of the radio, as written in the site file
    pub id: String,
    pub position: Position,
}

impl AccessPoint {
    pub fn new(kind: ApKind, id: impl Into<String>, position: Position) -> Self {
        Self {
            kind,
            id: id.into(),
            position,
        }
    }
}
