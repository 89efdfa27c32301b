// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{
    BatchSize, BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main,
};
use std::time::Duration;
use virtual_scroll::{
    ExtentModel, HeightCache, Keyed, LinearExtents, PrefixSumExtents, VirtualScroll,
    VirtualScrollConfig, compute_visible_range,
};

#[derive(Clone)]
struct Row(u32);

impl Keyed for Row {
    type Key = u32;

    fn id(&self) -> Option<u32> {
        Some(self.0)
    }
}

fn heights(len: usize) -> Vec<f64> {
    // Deterministic spread of chat-like heights: short lines, paragraphs, images.
    (0..len)
        .map(|i| match i % 7 {
            0 => 240.0,
            1 | 4 => 48.0,
            _ => 96.0,
        })
        .collect()
}

fn bench_visible_range(c: &mut Criterion) {
    let mut group = c.benchmark_group("visible_range");

    // Hypothesis: the linear scan is O(n) per scroll event and falls behind the
    // prefix-sum tree quickly once transcripts grow past a few thousand rows.
    for len in [1_000usize, 10_000, 100_000] {
        let heights = heights(len);
        let keys: Vec<Option<u32>> = (0..len as u32).map(Some).collect();
        let mut cache = HeightCache::new();
        for (key, &height) in heights.iter().enumerate() {
            cache.insert(key as u32, height);
        }
        let linear = LinearExtents::new(&keys, &cache, 80.0);
        let tree = PrefixSumExtents::from_heights(heights.iter().copied());
        // Middle of the transcript.
        let scroll = tree.total_height() / 2.0;

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::new("linear", len), &scroll, |b, &scroll| {
            b.iter(|| black_box(compute_visible_range(&linear, black_box(scroll), 800.0)));
        });
        group.bench_with_input(BenchmarkId::new("prefix_sum", len), &scroll, |b, &scroll| {
            b.iter(|| black_box(compute_visible_range(&tree, black_box(scroll), 800.0)));
        });
    }

    group.finish();
}

fn bench_measure_and_scroll(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/measure_then_scroll");
    group.sample_size(30);
    group.measurement_time(Duration::from_secs(3));

    for len in [10_000usize, 100_000] {
        let rows: Vec<Row> = (0..len as u32).map(Row).collect();
        let measured = heights(len);
        group.throughput(Throughput::Elements(64));

        group.bench_with_input(BenchmarkId::new("engine", len), &rows, |b, rows| {
            b.iter_batched(
                || {
                    let mut list =
                        VirtualScroll::with_items(VirtualScrollConfig::default(), rows.clone())
                            .unwrap();
                    list.on_container_resize(800.0);
                    list
                },
                |mut list| {
                    // One render pass worth of feedback, then a scroll step.
                    for step in 0..64 {
                        let index = (step * 131) % len;
                        list.record_measured_height(Some(index as u32), measured[index])
                            .unwrap();
                        list.on_scroll((step * 97) as f64);
                    }
                    black_box(list.virtual_items().len());
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_visible_range, bench_measure_and_scroll);
criterion_main!(benches);
