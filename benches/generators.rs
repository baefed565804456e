use criterion::{criterion_group, criterion_main, Criterion};
use maze_gen::{
    generators,
    turns::TurnLayout,
    units::{Height, Width},
};
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn bench_backtracking_maze_32(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(32);
    c.bench_function("backtracking_maze_32", move |b| {
        b.iter(|| generators::carve_passages(Width(32), Height(32), &mut rng).unwrap())
    });
}

fn bench_backtracking_maze_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(128);
    c.bench_function("backtracking_maze_128", move |b| {
        b.iter(|| generators::carve_passages(Width(128), Height(128), &mut rng).unwrap())
    });
}

fn bench_backtracking_corridor_100000(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(1);
    c.bench_function("backtracking_corridor_100000", move |b| {
        b.iter(|| generators::carve_passages(Width(100_000), Height(1), &mut rng).unwrap())
    });
}

fn bench_turn_layout_128(c: &mut Criterion) {
    let mut rng = XorShiftRng::seed_from_u64(128);
    c.bench_function("turn_layout_128", move |b| {
        b.iter(|| TurnLayout::generate(Width(128), Height(128), 90.0, &mut rng).unwrap())
    });
}

criterion_group!(
    benches,
    bench_backtracking_maze_32,
    bench_backtracking_maze_128,
    bench_backtracking_corridor_100000,
    bench_turn_layout_128
);
criterion_main!(benches);
