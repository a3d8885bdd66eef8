//! Criterion benchmarks for path building and envelope search.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hexmove::movement::{
    compute_envelope, compute_envelope_with_budget, find_path_to, Coord, Gear, HexBoard,
    HexDirection, MovePath, MoverProfile, PathHints, StepState,
};

/// Benchmark: Walk envelope with run MP 9 on a 30x30 board with scattered terrain.
fn bench_envelope_walk(c: &mut Criterion) {
    let mut board = HexBoard::new(30, 30);
    board.scatter_terrain(42, 0.3);
    let unit = board.add_mover(MoverProfile::new(6, 0));
    let origin = Coord::new(15, 15);
    let start =
        StepState::new(origin, HexDirection::North).with_elevation(board.elevation_at(origin));

    c.bench_function("envelope_walk_30x30", |b| {
        b.iter(|| {
            let env = compute_envelope(unit, black_box(start), Gear::Walk, &board).unwrap();
            black_box(env.len());
        });
    });
}

/// Benchmark: Jump envelope over open ground, where every hex costs the same.
fn bench_envelope_jump(c: &mut Criterion) {
    let mut board = HexBoard::new(30, 30);
    let unit = board.add_mover(MoverProfile::new(4, 8));
    let start = StepState::new(Coord::new(15, 15), HexDirection::North);

    c.bench_function("envelope_jump_open", |b| {
        b.iter(|| {
            let env =
                compute_envelope_with_budget(unit, black_box(start), Gear::Jump, 8, &board)
                    .unwrap();
            black_box(env.len());
        });
    });
}

/// Benchmark: Single path across the board, corner to corner.
fn bench_find_path(c: &mut Criterion) {
    let board_size = 40;
    let mut board = HexBoard::new(board_size, board_size);
    let unit = board.add_mover(MoverProfile::new(30, 0));
    let path = MovePath::new(unit, StepState::new(Coord::new(0, 0), HexDirection::South), 60);
    let dest = Coord::new(board_size as i32 - 1, board_size as i32 - 1);

    c.bench_function("find_path_corner_to_corner", |b| {
        b.iter(|| {
            let hints = PathHints::default();
            let result = find_path_to(&path, black_box(dest), Gear::Walk, hints, &board)
                .unwrap();
            black_box(result.cumulative_cost());
        });
    });
}

criterion_group!(benches, bench_envelope_walk, bench_envelope_jump, bench_find_path);
criterion_main!(benches);
