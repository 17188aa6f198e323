//! Benchmarks for construction, layout solving, reflow and separator drags.
//!
//! Run with: cargo bench -p dockframe-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use dockframe_core::geometry::Rect;
use dockframe_layout::{
    FlexItem, LayoutConfig, NodeId, PanelBlueprint, PanelTree, resolve_flexible_lengths,
};
use std::hint::black_box;

/// A row of `n` columns, each holding three stacked panels of mixed sizing.
fn make_workbench(n: usize) -> PanelBlueprint {
    PanelBlueprint::row().children((0..n).map(|i| {
        let column = PanelBlueprint::column().attr("min-width", (20 + i % 7 * 10).to_string());
        let column = if i % 3 == 0 {
            column.attr("width", (120 + i * 5).to_string())
        } else {
            column
        };
        column
            .child(PanelBlueprint::column().attr("min-height", "40"))
            .child(PanelBlueprint::column().attr("height", "200"))
            .child(PanelBlueprint::column().attr("max-height", "400"))
    }))
}

/// Full binary split down to `depth`, alternating orientation.
fn make_nested(depth: u32) -> PanelBlueprint {
    fn split(depth: u32, row: bool) -> PanelBlueprint {
        let base = if row {
            PanelBlueprint::row()
        } else {
            PanelBlueprint::column()
        };
        if depth == 0 {
            return base.attr("min-width", "10").attr("min-height", "10");
        }
        base.child(split(depth - 1, !row)).child(split(depth - 1, !row))
    }
    split(depth, true)
}

fn rendered(blueprint: &PanelBlueprint, area: Rect) -> PanelTree {
    let mut tree = PanelTree::from_blueprint(blueprint, LayoutConfig::default());
    let layout = tree.solve_layout(area);
    let _ = tree.reflow(&layout);
    tree
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/construct");

    for n in [2, 8, 32, 128] {
        let blueprint = make_workbench(n);
        group.bench_with_input(BenchmarkId::new("workbench", n), &blueprint, |b, bp| {
            b.iter(|| black_box(PanelTree::from_blueprint(bp, LayoutConfig::default())))
        });
    }
    for depth in [2, 4, 6, 8] {
        let blueprint = make_nested(depth);
        group.bench_with_input(BenchmarkId::new("nested", depth), &blueprint, |b, bp| {
            b.iter(|| black_box(PanelTree::from_blueprint(bp, LayoutConfig::default())))
        });
    }

    group.finish();
}

fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/recompute");

    for depth in [4, 6, 8] {
        let tree = PanelTree::from_blueprint(&make_nested(depth), LayoutConfig::default());
        group.bench_with_input(BenchmarkId::new("nested", depth), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    tree.recompute();
                    black_box(tree.state_hash())
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/solve");
    let area = Rect::from_size(1920.0, 1080.0);

    for n in [8, 32, 128] {
        let tree = rendered(&make_workbench(n), area);
        group.bench_with_input(BenchmarkId::new("workbench", n), &tree, |b, tree| {
            b.iter(|| black_box(tree.solve_layout(area)))
        });
    }

    group.finish();
}

fn bench_reflow(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/reflow");
    let area = Rect::from_size(1920.0, 1080.0);

    for depth in [4, 6, 8] {
        let tree = PanelTree::from_blueprint(&make_nested(depth), LayoutConfig::default());
        let layout = tree.solve_layout(area);
        group.bench_with_input(BenchmarkId::new("nested", depth), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| black_box(tree.reflow(&layout)),
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/drag");
    let area = Rect::from_size(1920.0, 1080.0);

    for n in [8, 32] {
        let tree = rendered(&make_workbench(n), area);
        let layout = tree.solve_layout(area);
        let separator: NodeId = tree
            .separators(tree.root())
            .next()
            .expect("workbench has separators");
        group.bench_with_input(BenchmarkId::new("sweep", n), &tree, |b, tree| {
            b.iter_batched(
                || tree.clone(),
                |mut tree| {
                    let mut drag = tree.begin_drag(separator, &layout).expect("rendered");
                    for step in -40..=40 {
                        let _ = black_box(drag.update(&mut tree, f64::from(step) * 2.5));
                    }
                    drag.commit()
                },
                BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}

fn bench_flex_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/flex");

    for n in [3, 10, 50, 200] {
        let items: Vec<FlexItem> = (0..n)
            .map(|i| match i % 3 {
                0 => FlexItem::new(f64::from(i) * 4.0, 0.0, 0.0),
                1 => FlexItem::new(0.0, 1.0, 1.0).with_bounds(10.0, 300.0),
                _ => FlexItem::new(0.0, 0.25, 0.25),
            })
            .collect();
        group.bench_with_input(BenchmarkId::new("resolve", n), &items, |b, items| {
            b.iter(|| black_box(resolve_flexible_lengths(1600.0, items)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_construction,
    bench_recompute,
    bench_solve,
    bench_reflow,
    bench_drag,
    bench_flex_resolution,
);
criterion_main!(benches);
