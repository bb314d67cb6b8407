use criterion::{criterion_group, criterion_main, Criterion};
use mazesolver::{
    generators,
    units::{Height, Width},
};
use rand::{rngs::StdRng, SeedableRng};

fn bench_prim_maze_32(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(32);
    c.bench_function("prim_maze_32", move |b| {
        b.iter(|| generators::prim_with_rng(Width(32), Height(32), &mut rng))
    });
}

fn bench_prim_maze_320(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(320);
    let mut group = c.benchmark_group("prim_maze_320");
    group.sample_size(10);
    group.bench_function("prim_maze_320", move |b| {
        b.iter(|| generators::prim_with_rng(Width(320), Height(320), &mut rng))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_prim_maze_32,
    bench_prim_maze_320
);
criterion_main!(benches);
