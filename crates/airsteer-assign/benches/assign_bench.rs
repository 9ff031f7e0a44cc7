//! Benchmarks for Airsteer assignment
//!
//! Measures performance of:
//! - Full assignment at fleet sizes seen in practice (tens of nodes)
//! - Assignment at sizes well beyond that, to watch the N·M log(N·M) sort
//! - Local resolution

use airsteer_assign::{assign, assign_with_capacity, resolve_local};
use airsteer_geometry::{AccessPoint, ApKind, Node, NodeKind, Position};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Nodes laid out on a square grid, one metre apart.
fn grid_nodes(count: usize) -> Vec<Node> {
    let side = (count as f64).sqrt().ceil() as usize;
    (0..count)
        .map(|i| {
            Node::new(
                NodeKind::Desktop,
                format!("node-{i:05}"),
                Position::new((i % side) as f64, (i / side) as f64),
            )
        })
        .collect()
}

/// Access points spread along the diagonal of the node grid.
fn diagonal_aps(count: usize, span: f64) -> Vec<AccessPoint> {
    (0..count)
        .map(|i| {
            let t = span * (i as f64 + 0.5) / count as f64;
            AccessPoint::new(
                ApKind::Ap,
                format!("02:00:00:00:{:02x}:00", i % 256),
                Position::new(t, t),
            )
        })
        .collect()
}

/// Benchmark assignment at typical fleet sizes
fn bench_assign_fleet(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_fleet");

    for &(nodes, aps) in &[(10usize, 2usize), (30, 4), (60, 8), (120, 12)] {
        let node_set = grid_nodes(nodes);
        let ap_set = diagonal_aps(aps, (nodes as f64).sqrt());

        group.throughput(Throughput::Elements((nodes * aps) as u64));
        group.bench_with_input(
            BenchmarkId::new(format!("{aps}_aps"), nodes),
            &(node_set, ap_set),
            |b, (n, a)| b.iter(|| assign(black_box(n), black_box(a))),
        );
    }
    group.finish();
}

/// Benchmark assignment far beyond expected sizes
fn bench_assign_scale(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign_scale");
    group.sample_size(20); // Fewer samples for expensive operations

    for &nodes in &[500usize, 2_000, 5_000] {
        let node_set = grid_nodes(nodes);
        let ap_set = diagonal_aps(32, (nodes as f64).sqrt());

        group.throughput(Throughput::Elements(nodes as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(nodes),
            &(node_set, ap_set),
            |b, (n, a)| b.iter(|| assign(black_box(n), black_box(a))),
        );
    }
    group.finish();
}

/// Benchmark the over-subscribed path
fn bench_assign_oversubscribed(c: &mut Criterion) {
    let node_set = grid_nodes(200);
    let ap_set = diagonal_aps(8, 15.0);

    c.bench_function("assign_oversubscribed", |b| {
        b.iter(|| assign_with_capacity(black_box(&node_set), black_box(&ap_set), black_box(10)))
    });
}

/// Benchmark local resolution
fn bench_resolve_local(c: &mut Criterion) {
    let node_set = grid_nodes(1_000);

    c.bench_function("resolve_local_last", |b| {
        b.iter(|| resolve_local(black_box(&node_set), black_box("node-00999")))
    });
}

criterion_group!(
    benches,
    bench_assign_fleet,
    bench_assign_scale,
    bench_assign_oversubscribed,
    bench_resolve_local,
);

criterion_main!(benches);
