//! Static per-AP capacity.
//!
//! The quota balances node *count*, not measured traffic:
//! - 0 APs → no capacity at all
//! - N nodes over M APs → ceil(N / M) per AP
//!
//! With this quota every node fits and no AP carries more than one node above
//! any other.

/// Per-AP capacity for `nodes` clients spread over `aps` access points.
///
/// Formula: ceil(N / M). Returns `None` when there are no access points.
///
/// # Examples
///
/// ```
/// use airsteer_geometry::capacity_per_ap;
///
/// assert_eq!(capacity_per_ap(0, 3), Some(0));
/// assert_eq!(capacity_per_ap(7, 3), Some(3));
/// assert_eq!(capacity_per_ap(4, 0), None);
/// ```
pub const fn capacity_per_ap(nodes: usize, aps: usize) -> Option<usize> {
    if aps == 0 {
        return None;
    }
    // ceil(n / m) = (n + m - 1) / m
    Some((nodes + aps - 1) / aps)
}

/// Total slots across `aps` access points at `capacity` each.
pub const fn total_capacity(capacity: usize, aps: usize) -> usize {
    capacity.saturating_mul(aps)
}

/// Whether `nodes` clients cannot all be placed within capacity.
pub const fn is_oversubscribed(nodes: usize, capacity: usize, aps: usize) -> bool {
    nodes > total_capacity(capacity, aps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_aps_means_no_capacity() {
        assert_eq!(capacity_per_ap(0, 0), None);
        assert_eq!(capacity_per_ap(10, 0), None);
    }

    #[test]
    fn capacity_rounds_up() {
        let test_cases = [
            (0, 1, 0),
            (1, 1, 1),
            (1, 2, 1),
            (2, 2, 1),
            (3, 2, 2),
            (7, 3, 3),
            (9, 3, 3),
            (10, 3, 4),
            (100, 7, 15),
        ];

        for (nodes, aps, expected) in test_cases {
            assert_eq!(
                capacity_per_ap(nodes, aps),
                Some(expected),
                "capacity({}, {}) should be {}",
                nodes,
                aps,
                expected
            );
        }
    }

    #[test]
    fn ceil_quota_never_oversubscribes() {
        for nodes in 0..=50 {
            for aps in 1..=12 {
                let cap = capacity_per_ap(nodes, aps).unwrap();
                assert!(
                    !is_oversubscribed(nodes, cap, aps),
                    "{} nodes over {} APs at {} each",
                    nodes,
                    aps,
                    cap
                );
            }
        }
    }

    #[test]
    fn quota_is_minimal() {
        // One less per AP would not fit everyone.
        for nodes in 1..=50 {
            for aps in 1..=12 {
                let cap = capacity_per_ap(nodes, aps).unwrap();
                assert!(is_oversubscribed(nodes, cap - 1, aps));
            }
        }
    }

    #[test]
    fn reduced_capacity_oversubscribes() {
        assert!(is_oversubscribed(5, 1, 4));
        assert!(!is_oversubscribed(4, 1, 4));
        assert!(is_oversubscribed(1, 0, 3));
    }

    #[test]
    fn total_capacity_saturates() {
        assert_eq!(total_capacity(usize::MAX, 2), usize::MAX);
        assert_eq!(total_capacity(3, 4), 12);
    }
}
