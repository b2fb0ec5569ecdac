// Commit aggregation and summary statistics benchmarks

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use locscope::model::{aggregate_commits, SummaryStats};
use std::hint::black_box;

mod common;

fn bench_aggregate_commits(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_commits");
    for commits in [100, 1_000, 5_000] {
        let edits = common::generate_edits(commits, 40);

        group.bench_with_input(
            BenchmarkId::new("commits", commits),
            &edits,
            |b, edits| {
                b.iter(|| black_box(aggregate_commits(edits, "https://github.com/o/r/commit/")));
            },
        );
    }
    group.finish();
}

fn bench_summary_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("summary_stats");
    for commits in [100, 1_000, 5_000] {
        let edits = common::generate_edits(commits, 40);
        let aggregated = aggregate_commits(&edits, "");

        group.bench_with_input(
            BenchmarkId::new("commits", commits),
            &(edits, aggregated),
            |b, (edits, aggregated)| {
                b.iter(|| black_box(SummaryStats::compute(edits, aggregated)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_aggregate_commits, bench_summary_stats);
criterion_main!(benches);
