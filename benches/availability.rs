//! Benchmarks for the sliding window and host ranking on the probe path.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rec_client::availability::{preferred_host, rank_available_hosts, SlidingWindow};
use std::collections::HashMap;

fn bench_window_put(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_put");
    for capacity in [10usize, 60, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            let mut window = SlidingWindow::new(cap);
            let mut i = 0u64;
            b.iter(|| {
                i += 1;
                window.put(black_box(i % 7 != 0));
                black_box(window.failure_rate())
            });
        });
    }
    group.finish();
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_available_hosts");
    for host_count in [2usize, 5, 20] {
        let hosts: Vec<String> = (0..host_count)
            .map(|i| format!("rec-{}.example.com", i))
            .collect();
        let rates: HashMap<String, f64> = hosts
            .iter()
            .enumerate()
            .map(|(i, h)| (h.clone(), (i % 4) as f64 * 0.04))
            .collect();

        group.bench_with_input(
            BenchmarkId::from_parameter(host_count),
            &hosts,
            |b, hosts| {
                b.iter(|| {
                    let available =
                        rank_available_hosts(hosts, |h| rates.get(h).copied().unwrap_or(1.0), 0.1);
                    black_box(preferred_host(&available, hosts).map(str::len))
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_window_put, bench_ranking);
criterion_main!(benches);
