//! Airsteer Assignment
//!
//! Maps every client node in a site to one access point, and finds which of
//! those nodes is the machine the agent is running on.
//!
//! # Coordination Without Messages
//!
//! Agents on different machines never talk to each other. They all read the
//! same two site files and run the same pure function, so they all agree on
//! who goes where:
//!
//! ```text
//! sources.csv ─┐
//!              ├─► assign() ─► Assignment ─► resolve_local(machine_id) ─► target AP
//! targets.csv ─┘
//! ```
//!
//! Two agents that could otherwise race for the same AP reach the same answer
//! independently.
//!
//! # Example
//!
//! ```
//! use airsteer_assign::{assign, resolve_local};
//! use airsteer_geometry::{AccessPoint, ApKind, Node, NodeKind, Position};
//!
//! let nodes = vec![
//!     Node::new(NodeKind::Desktop, "n1", Position::new(0.0, 0.0)),
//!     Node::new(NodeKind::Desktop, "n2", Position::new(2.0, 3.0)),
//! ];
//! let aps = vec![
//!     AccessPoint::new(ApKind::Ap, "a1", Position::new(0.0, 0.0)),
//!     AccessPoint::new(ApKind::Ap, "a2", Position::new(3.0, 4.0)),
//! ];
//!
//! let assignment = assign(&nodes, &aps).unwrap();
//! let me = resolve_local(&nodes, "n2").unwrap();
//! assert_eq!(assignment.target_of(&me.id), Some("a2"));
//! ```

mod engine;
mod error;
mod local;

pub use engine::{assign, assign_with_capacity, Assignment};
pub use error::{Error, Result};
pub use local::resolve_local;
