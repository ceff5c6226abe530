// File: crates/bar-core/benches/update_bench.rs
// Summary: Update-cycle throughput for both redraw policies over growing category counts.

use bar_core::{BarChart, DataView, RedrawPolicy, Scene, UpdateOptions, Viewport};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, black_box};

fn build_view(n: usize, phase: usize) -> DataView {
    let rows: Vec<[String; 2]> = (0..n)
        .map(|i| [format!("category-{i}"), format!("{}", ((i + phase) * 7919) % 1000)])
        .collect();
    DataView::from_text_rows(rows)
}

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("update");
    for &n in &[10usize, 100, 1_000] {
        let views = [build_view(n, 0), build_view(n, 1)];
        for policy in [RedrawPolicy::Incremental, RedrawPolicy::ClearAll] {
            group.bench_with_input(BenchmarkId::new(format!("{policy:?}"), n), &n, |b, _| {
                let scene = Scene::new();
                let root = scene.root();
                let mut chart: BarChart<Scene> = BarChart::construct(scene, root);
                chart.set_redraw_policy(policy);
                let mut flip = 0usize;
                b.iter(|| {
                    flip ^= 1;
                    let opts = UpdateOptions::new(Viewport::new(1200.0, 800.0), views[flip].clone());
                    chart.update(black_box(&opts));
                });
                black_box(chart.stats().records);
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
