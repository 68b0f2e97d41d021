use criterion::{
    Criterion,
    criterion_group,
    criterion_main
};
use dfs_mazes::cells::MapCoordinate;
use dfs_mazes::generators::{self, Maze};
use dfs_mazes::pathing;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;

fn large_maze() -> Maze {
    generators::recursive_backtracker(350, XorShiftRng::seed_from_u64(350)).unwrap()
}

fn bench_distances(c: &mut Criterion) {
    c.bench_function("distances", |b| {
        let maze = large_maze();
        let graph = maze.passage_graph();
        let start_coord = MapCoordinate::new(250, 250);
        b.iter(|| pathing::Distances::new(&graph, maze.maze_map(), start_coord))
    });
}

fn bench_furthest_points(c: &mut Criterion) {
    c.bench_function("furthest_points", |b| {
        let maze = large_maze();
        let graph = maze.passage_graph();
        let start_coord = MapCoordinate::new(250, 250);
        let distances = pathing::Distances::new(&graph, maze.maze_map(), start_coord).unwrap();
        b.iter(|| distances.furthest_points())
    });
}

fn bench_shortest_path(c: &mut Criterion) {
    c.bench_function("shortest_path", |b| {
        let maze = large_maze();
        let graph = maze.passage_graph();
        let start_coord = MapCoordinate::new(250, 250);
        let distances = pathing::Distances::new(&graph, maze.maze_map(), start_coord).unwrap();
        let end_coord = MapCoordinate::new(0, 0);
        b.iter(|| pathing::shortest_path(&graph, maze.maze_map(), &distances, end_coord))
    });
}

fn bench_solution(c: &mut Criterion) {
    c.bench_function("solution", |b| {
        let maze = large_maze();
        b.iter(|| maze.solution())
    });
}

criterion_group!(benches,
    bench_distances,
    bench_furthest_points,
    bench_shortest_path,
    bench_solution
);
criterion_main!(benches);
