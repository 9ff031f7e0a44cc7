//! Airsteer Site Geometry
//!
//! Static model of a Wi-Fi site: client nodes and access points placed on a
//! flat floor plan, plus the pure functions the assignment engine builds on.
//!
//! # Model
//!
//! - [`Position`]: a point on the floor plan, with Euclidean distance
//! - [`Node`] / [`AccessPoint`]: one client device / one physical radio
//! - [`capacity_per_ap`]: the static load-balancing quota, `ceil(N / M)`
//! - [`Bssid`]: MAC-formatted AP identifiers and radio-family matching
//!
//! Nothing here touches the network or the filesystem. Every node in a fleet
//! evaluates these functions over the same shared files and gets the same
//! answer, which is what lets the agents avoid talking to each other.

mod bssid;
mod capacity;
mod error;
mod position;
mod site;

pub use bssid::{candidate_aps, matches_ap, Bssid};
pub use capacity::{capacity_per_ap, is_oversubscribed, total_capacity};
pub use error::{Error, Result};
pub use position::Position;
pub use site::{AccessPoint, ApKind, Node, NodeKind};

/// Octets in a BSSID (IEEE 802 MAC-48).
pub const BSSID_OCTETS: usize = 6;

/// Width of the last-octet window a radio uses for its virtual BSSIDs.
pub const VIRTUAL_BSSID_SPAN: u8 = 16;
