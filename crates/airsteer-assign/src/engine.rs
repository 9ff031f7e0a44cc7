//! Proximity assignment: every node gets the nearest AP that still has room.
//!
//! # Determinism
//!
//! Every agent in the fleet runs this over the same two site files and must
//! reach the same answer without talking to the others. The result is a pure
//! function of the inputs:
//!
//! ```text
//! order = sort (distance, node_id, ap_id) ascending over all (node, ap) pairs
//! ```
//!
//! NO RANDOMNESS. NO INPUT ORDER. Exact distance ties fall back to string order
//! of the ids, so the answer does not depend on the order of rows in a file.
//!
//! # Greedy Walk
//!
//! 1. Each AP gets `capacity_per_ap(N, M)` slots
//! 2. Walk the sorted pairs; place a node on the first AP with a free slot
//! 3. Once placed, a node's remaining pairs are skipped
//! 4. Nodes left over (only possible when capacity is forced below the quota)
//!    go to their nearest AP regardless of load

use crate::error::{Error, Result};
use airsteer_geometry::{capacity_per_ap, AccessPoint, Node};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, warn};

/// A complete node → AP mapping for one cycle.
///
/// Iteration is ordered by node id, so two equal assignments render
/// identically.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Assignment {
    targets: BTreeMap<String, String>,
    /// Nodes placed by the over-subscription fallback
    fallback: BTreeSet<String>,
}

impl Assignment {
    /// AP assigned to `node_id`, if the node was part of the input.
    pub fn target_of(&self, node_id: &str) -> Option<&str> {
        self.targets.get(node_id).map(String::as_str)
    }

    /// Number of nodes placed.
    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// `(node_id, ap_id)` pairs in node id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.targets.iter().map(|(n, a)| (n.as_str(), a.as_str()))
    }

    /// Number of nodes placed on `ap_id`.
    pub fn load_of(&self, ap_id: &str) -> usize {
        self.targets.values().filter(|a| *a == ap_id).count()
    }

    /// Load per AP, for every AP that received at least one node.
    pub fn loads(&self) -> BTreeMap<&str, usize> {
        let mut loads = BTreeMap::new();
        for ap in self.targets.values() {
            *loads.entry(ap.as_str()).or_insert(0) += 1;
        }
        loads
    }

    /// Whether any node had to be placed without a capacity guarantee.
    pub fn is_degraded(&self) -> bool {
        !self.fallback.is_empty()
    }

    /// Nodes placed by the fallback, in id order.
    pub fn fallback_nodes(&self) -> impl Iterator<Item = &str> {
        self.fallback.iter().map(String::as_str)
    }

    /// Whether `node_id` was placed by the fallback.
    pub fn is_fallback(&self, node_id: &str) -> bool {
        self.fallback.contains(node_id)
    }
}

/// One (node, AP) pair with its distance.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    distance: f64,
    node: usize,
    ap: usize,
}

/// Assign every node to an AP using the static `ceil(N / M)` quota.
///
/// Fails with [`Error::NoTargetsAvailable`] when `aps` is empty.
pub fn assign(nodes: &[Node], aps: &[AccessPoint]) -> Result<Assignment> {
    let capacity = capacity_per_ap(nodes.len(), aps.len()).ok_or(Error::NoTargetsAvailable)?;
    assign_with_capacity(nodes, aps, capacity)
}

/// Assign every node to an AP with an explicit per-AP `capacity`.
///
/// If `capacity` is below the quota some nodes cannot be placed within it;
/// those go to their nearest AP and the assignment is marked degraded.
pub fn assign_with_capacity(
    nodes: &[Node],
    aps: &[AccessPoint],
    capacity: usize,
) -> Result<Assignment> {
    if aps.is_empty() {
        return Err(Error::NoTargetsAvailable);
    }

    let candidates = ranked_candidates(nodes, aps);

    let mut placed: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut nearest: Vec<Option<usize>> = vec![None; nodes.len()];
    let mut load = vec![0usize; aps.len()];

    for c in &candidates {
        // first pair seen for a node is its nearest AP
        if nearest[c.node].is_none() {
            nearest[c.node] = Some(c.ap);
        }

        if placed[c.node].is_some() || load[c.ap] >= capacity {
            continue;
        }
        placed[c.node] = Some(c.ap);
        load[c.ap] += 1;
    }

    let mut assignment = Assignment::default();
    for (i, node) in nodes.iter().enumerate() {
        let ap = match (placed[i], nearest[i]) {
            (Some(ap), _) => ap,
            (None, Some(ap)) => {
                assignment.fallback.insert(node.id.clone());
                ap
            }
            // unreachable with a non-empty AP set
            (None, None) => return Err(Error::NoTargetsAvailable),
        };
        assignment.targets.insert(node.id.clone(), aps[ap].id.clone());
    }

    if assignment.is_degraded() {
        warn!(
            "Over-subscribed: {} nodes, {} APs at capacity {}; {} placed on nearest AP without capacity: {:?}",
            nodes.len(),
            aps.len(),
            capacity,
            assignment.fallback.len(),
            assignment.fallback
        );
    }

    debug!(
        "Assigned {} nodes over {} APs (capacity {})",
        assignment.len(),
        aps.len(),
        capacity
    );

    Ok(assignment)
}

/// All (node, AP) pairs, nearest first, ties broken by (node id, AP id).
fn ranked_candidates(nodes: &[Node], aps: &[AccessPoint]) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(nodes.len() * aps.len());
    for (n, node) in nodes.iter().enumerate() {
        for (a, ap) in aps.iter().enumerate() {
            candidates.push(Candidate {
                distance: node.distance_to(ap),
                node: n,
                ap: a,
            });
        }
    }

    candidates.sort_by(|x, y| compare(x, y, nodes, aps));
    candidates
}

fn compare(x: &Candidate, y: &Candidate, nodes: &[Node], aps: &[AccessPoint]) -> Ordering {
    x.distance
        .total_cmp(&y.distance)
        .then_with(|| nodes[x.node].id.cmp(&nodes[y.node].id))
        .then_with(|| aps[x.ap].id.cmp(&aps[y.ap].id))
}
