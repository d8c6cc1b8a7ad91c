// Criterion benchmarks for the procedural generators: a typical authored
// block, a dense block with corridor filtering, and the fixed border frame.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use waymeadow_sim::geometry::Path;
use waymeadow_sim::scatter::{TreeBlock, generate_block_trees, generate_border_trees, scene_trees};

fn bench_block_trees(c: &mut Criterion) {
    let block = TreeBlock::new(400.0, 600.0, 3.0, 100.0, 100.0);
    let paths = vec![
        Path::new(500.0, 40.0, 200.0, 50.0, 15.0),
        Path::new(300.0, 40.0, 350.0, 400.0, 110.0),
    ];

    c.bench_function("block_trees_with_paths", |b| {
        b.iter(|| generate_block_trees(black_box(&block), black_box(&paths)));
    });

    let dense = TreeBlock::new(400.0, 600.0, 10.0, 100.0, 100.0);
    c.bench_function("block_trees_dense", |b| {
        b.iter(|| generate_block_trees(black_box(&dense), black_box(&paths)));
    });
}

fn bench_border_trees(c: &mut Criterion) {
    c.bench_function("border_trees", |b| {
        b.iter(generate_border_trees);
    });
}

fn bench_scene_trees(c: &mut Criterion) {
    let blocks: Vec<TreeBlock> = (0..8)
        .map(|i| TreeBlock::new(300.0, 300.0, 4.0, 50.0, f64::from(i) * 320.0))
        .collect();
    let paths = vec![Path::new(1200.0, 50.0, 180.0, 0.0, 5.0)];

    c.bench_function("scene_trees_8_blocks", |b| {
        b.iter(|| scene_trees(black_box(&blocks), black_box(&paths)));
    });
}

criterion_group!(
    benches,
    bench_block_trees,
    bench_border_trees,
    bench_scene_trees
);
criterion_main!(benches);
