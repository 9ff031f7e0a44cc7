//! Local resolution: which node in the site file is this machine.

use crate::error::{Error, Result};
use airsteer_geometry::Node;

/// Find the node whose id equals `machine_id` exactly.
///
/// The site file is maintained outside the agent and may be stale, so a
/// missing entry is an ordinary [`Error::LocalNodeNotFound`], not a panic.
pub fn resolve_local<'a>(nodes: &'a [Node], machine_id: &str) -> Result<&'a Node> {
    nodes
        .iter()
        .find(|n| n.id == machine_id)
        .ok_or_else(|| Error::LocalNodeNotFound {
            id: machine_id.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use airsteer_geometry::{NodeKind, Position};

    fn fleet() -> Vec<Node> {
        vec![
            Node::new(
                NodeKind::Desktop,
                "4c4c4544-0042-3510-8052-b4c04f4e4d32",
                Position::new(1.0, 2.0),
            ),
            Node::new(
                NodeKind::Laptop,
                "03000200-0400-0500-0006-000700080009",
                Position::new(5.0, 5.0),
            ),
        ]
    }

    #[test]
    fn finds_matching_node() {
        let nodes = fleet();
        let local = resolve_local(&nodes, "03000200-0400-0500-0006-000700080009").unwrap();
        assert_eq!(local.kind, NodeKind::Laptop);
        assert_eq!(local.position, Position::new(5.0, 5.0));
    }

    #[test]
    fn missing_node_is_an_error() {
        let nodes = fleet();
        assert_eq!(
            resolve_local(&nodes, "deadbeef"),
            Err(Error::LocalNodeNotFound {
                id: "deadbeef".into()
            })
        );
    }

    #[test]
    fn match_is_exact() {
        let nodes = fleet();
        assert!(resolve_local(&nodes, "4C4C4544-0042-3510-8052-B4C04F4E4D32").is_err());
        assert!(resolve_local(&nodes, " 4c4c4544-0042-3510-8052-b4c04f4e4d32").is_err());
        assert!(resolve_local(&[], "").is_err());
    }
}
