use criterion::{criterion_group, criterion_main, Criterion};
use rand::rngs::SmallRng;
use rand::SeedableRng;

use sudoku_engine::generator;
use sudoku_engine::grid::Grid;
use sudoku_engine::solver;

const CLASSIC_PUZZLE: &str = "53..7....\n\
                              6..195...\n\
                              .98....6.\n\
                              8...6...3\n\
                              4..8.3..1\n\
                              7...2...6\n\
                              .6....28.\n\
                              ...419..5\n\
                              ....8..79";

fn solve_benchmark(c: &mut Criterion) {
    let puzzle = Grid::parse_raw(CLASSIC_PUZZLE);

    c.bench_function("solve_classic", |b| {
        b.iter(|| {
            let mut grid = puzzle.clone();
            assert!(solver::solve(&mut grid));
            grid
        })
    });

    c.bench_function("solve_empty", |b| {
        b.iter(|| {
            let mut grid = Grid::new();
            assert!(solver::solve(&mut grid));
            grid
        })
    });
}

fn generate_benchmark(c: &mut Criterion) {
    c.bench_function("generate_full", |b| {
        let mut rng = SmallRng::seed_from_u64(9);
        b.iter(|| {
            let mut grid = Grid::new();
            assert!(generator::generate(&mut grid, &mut rng));
            grid
        })
    });

    c.bench_function("random_puzzle_30", |b| {
        let mut rng = SmallRng::seed_from_u64(30);
        b.iter(|| generator::random_puzzle(30, &mut rng).unwrap())
    });
}

criterion_group!(benches, solve_benchmark, generate_benchmark);
criterion_main!(benches);
