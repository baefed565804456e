use criterion::{criterion_group, criterion_main, Criterion};
use maze_gen::{
    cells::Cartesian2DCoordinate,
    generators,
    grid::Grid,
    units::{Height, Width},
};

fn bench_grid_11(c: &mut Criterion) {
    c.bench_function("grid_11", |b| b.iter(|| Grid::new(Width(11), Height(11)).unwrap()));
}

fn bench_grid_128(c: &mut Criterion) {
    c.bench_function("grid_128", |b| b.iter(|| Grid::new(Width(128), Height(128)).unwrap()));
}

fn bench_grid_500(c: &mut Criterion) {
    c.bench_function("grid_500", |b| b.iter(|| Grid::new(Width(500), Height(500)).unwrap()));
}

fn bench_neighbours(c: &mut Criterion) {
    let g = Grid::new(Width(128), Height(128)).unwrap();
    let coord = Cartesian2DCoordinate::new(64, 64);
    c.bench_function("neighbours", move |b| b.iter(|| g.neighbours(coord)));
}

fn bench_iter_links(c: &mut Criterion) {
    let maze = generators::carve_maze(Width(128), Height(128), 7).unwrap();
    c.bench_function("iter_links_128", move |b| b.iter(|| maze.grid.iter_links().count()));
}

fn bench_to_graph(c: &mut Criterion) {
    let maze = generators::carve_maze(Width(128), Height(128), 7).unwrap();
    c.bench_function("to_graph_128", move |b| b.iter(|| maze.grid.to_graph()));
}

criterion_group!(
    benches,
    bench_grid_11,
    bench_grid_128,
    bench_grid_500,
    bench_neighbours,
    bench_iter_links,
    bench_to_graph
);
criterion_main!(benches);
