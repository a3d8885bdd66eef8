//! Movement engine integration tests
//!
//! Drives path building, envelopes and sessions through the public API.

use hexmove::core::config::MovementConfig;
use hexmove::core::error::{MoveError, Result};
use hexmove::core::types::{Mp, UnitId};
use hexmove::movement::*;
use proptest::prelude::*;
use std::path::Path;

fn path_to(path: &MovePath, dest: Coord, gear: Gear, board: &HexBoard) -> MovePath {
    find_path_to(path, dest, gear, PathHints::default(), board).unwrap()
}

fn flat_board(width: u32, height: u32, config: MovementConfig) -> (HexBoard, UnitId) {
    let mut board = HexBoard::new(width, height).with_config(config);
    let unit = board.add_mover(MoverProfile::new(4, 3));
    (board, unit)
}

#[test]
fn test_path_termination_on_open_ground() {
    let (board, unit) = flat_board(10, 10, MovementConfig::free_turns());
    let start = StepState::new(Coord::new(0, 0), HexDirection::North);
    let path = MovePath::new(unit, start, 6);

    let result = path_to(&path, Coord::new(2, 0), Gear::Walk, &board);
    assert_eq!(result.final_coords(), Coord::new(2, 0));
    // Two clear hexes, turns are free
    assert_eq!(result.cumulative_cost(), 2);
    assert!(result
        .steps()
        .iter()
        .all(|s| s.kind.is_turn() || s.kind == StepKind::Forward));
}

#[test]
fn test_path_termination_pays_for_turns() {
    let (board, unit) = flat_board(10, 10, MovementConfig::default());
    let start = StepState::new(Coord::new(0, 0), HexDirection::North);
    let path = MovePath::new(unit, start, 6);

    let result = path_to(&path, Coord::new(2, 0), Gear::Walk, &board);
    assert_eq!(result.final_coords(), Coord::new(2, 0));
    let turns = result.steps().iter().filter(|s| s.kind.is_turn()).count() as Mp;
    assert_eq!(result.cumulative_cost(), 2 + turns);
}

#[test]
fn test_lateral_step_for_every_hexside() {
    let (board, unit) = flat_board(12, 12, MovementConfig::default());
    let facing = HexDirection::SouthWest;
    let start = StepState::new(Coord::new(5, 5), facing);
    let path = MovePath::new(unit, start, 6);

    for relative in 0..6 {
        let dest = start.position.adjacent(facing.rotate(relative));
        let result = path_to(&path, dest, Gear::Lateral, &board);
        assert_eq!(
            result.step_kinds(),
            vec![LATERAL_STEP_TABLE[relative]],
            "hexside {relative}"
        );
        assert_eq!(result.final_facing(), facing);
        assert_eq!(result.final_coords(), dest);
    }
}

#[test]
fn test_lateral_hints_override_first_leg() {
    let (board, unit) = flat_board(12, 12, MovementConfig::default());
    let start = StepState::new(Coord::new(5, 5), HexDirection::North);
    let path = MovePath::new(unit, start, 6);
    let hints = PathHints {
        direction: Some(HexDirection::North),
        facing: None,
    };

    let result = find_path_to(&path, Coord::new(5, 3), Gear::Lateral, hints, &board)
        .unwrap();
    assert_eq!(result.step_kinds(), vec![StepKind::Forward; 2]);
}

#[test]
fn test_envelope_on_flat_board() {
    let (board, unit) = flat_board(
        DEFAULT_BOARD_WIDTH,
        DEFAULT_BOARD_HEIGHT,
        MovementConfig::free_turns(),
    );
    let origin = Coord::new(5, 5);
    let start = StepState::new(origin, HexDirection::North);
    let env = compute_envelope_with_budget(unit, start, Gear::Walk, 4, &board).unwrap();

    let expected: Vec<Coord> = origin
        .hexes_in_range(4)
        .into_iter()
        .filter(|c| board.in_bounds(*c))
        .collect();
    assert_eq!(env.len(), expected.len());
    for coord in expected {
        assert_eq!(env.cost(coord), Some(coord.distance(&origin)), "cost at {coord}");
    }
}

#[test]
fn test_clip_to_legal_drops_over_budget_tail() {
    let (board, unit) = flat_board(10, 10, MovementConfig::default());
    let start = StepState::new(Coord::new(4, 8), HexDirection::North);
    let mut path = MovePath::new(unit, start, 4);
    for _ in 0..6 {
        assert!(path.add_step(StepKind::Forward, Gear::Walk, &board).unwrap());
    }
    assert_eq!(path.cumulative_cost(), 6);

    path.clip_to_legal();
    assert_eq!(path.len(), 4);
    assert_eq!(path.cumulative_cost(), 4);
    assert_eq!(path.final_coords(), Coord::new(4, 4));
    assert!(path.is_legal());
}

#[test]
fn test_unknown_unit_propagates() {
    let (board, _) = flat_board(10, 10, MovementConfig::default());
    let stranger = UnitId::new();
    let path = MovePath::new(stranger, StepState::new(Coord::new(3, 3), HexDirection::North), 6);

    let dest = Coord::new(3, 1);
    let result = find_path_to(&path, dest, Gear::Walk, PathHints::default(), &board);
    assert!(matches!(result, Err(MoveError::UnknownUnit(id)) if id == stranger));
    assert!(compute_envelope(stranger, path.start_state(), Gear::Walk, &board).is_err());
}

#[test]
fn test_session_jump_and_commit() {
    let (board, unit) = flat_board(12, 12, MovementConfig::default());
    let start = StepState::new(Coord::new(2, 2), HexDirection::SouthEast);
    let mut session = MovementSession::new(unit, start, Gear::Walk, &board).unwrap();

    session.extend_to(Coord::new(4, 4), &board).unwrap();
    session.set_gear(Gear::Jump, &board).unwrap();
    assert!(session.path().is_empty());

    assert!(session.extend_to(Coord::new(4, 4), &board).unwrap());
    let committed = session.commit();
    assert_eq!(committed.steps[0], StepKind::StartJump);
    assert_eq!(committed.final_position, Coord::new(4, 4));
    assert!(committed.mp_used <= 3);

    let json = serde_json::to_string(&committed).unwrap();
    let decoded: CommittedMove = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, committed);
}

#[test]
fn test_session_envelope_matches_direct_computation() {
    let (mut board, unit) = flat_board(12, 12, MovementConfig::default());
    board.scatter_terrain(7, 0.3);
    let start = StepState::new(Coord::new(6, 6), HexDirection::North)
        .with_elevation(board.elevation_at(Coord::new(6, 6)));
    let mut session = MovementSession::new(unit, start, Gear::Walk, &board).unwrap();

    let cached = session.envelope(&board).unwrap();
    let direct = compute_envelope(unit, start, Gear::Walk, &board).unwrap();
    assert_eq!(cached.costs(), direct.costs());
}

#[test]
fn test_config_file_loads() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/movement.toml");
    let config = MovementConfig::load(&path).unwrap();
    assert_eq!(config, MovementConfig::default());
}

#[test]
fn test_missing_config_file_is_io_error() {
    let result = MovementConfig::load(Path::new("does/not/exist.toml"));
    assert!(matches!(result, Err(MoveError::IoError(_))));
}

/// Open marsh where every hex costs two and turning is free
struct Marsh {
    size: i32,
}

impl MovementOracle for Marsh {
    fn is_legal_step(&self, _unit: UnitId, query: &StepQuery, _gear: Gear) -> Result<StepQuote> {
        if !self.board_contains(query.target) {
            return Err(MoveError::OutOfBounds(query.target));
        }
        let from = &query.from;
        let quote = if query.kind.changes_hex() {
            StepQuote::legal(2, 0, from.facing)
        } else if query.kind.is_turn() {
            StepQuote::legal(0, 0, query.kind.facing_after(from.facing))
        } else {
            StepQuote::blocked(query)
        };
        Ok(quote)
    }

    fn movement_budget(&self, _unit: UnitId, _gear: Gear) -> Result<Mp> {
        Ok(4)
    }

    fn board_contains(&self, coord: Coord) -> bool {
        (0..self.size).contains(&coord.col) && (0..self.size).contains(&coord.row)
    }
}

#[test]
fn test_custom_oracle_drives_envelope() {
    let marsh = Marsh { size: 9 };
    let origin = Coord::new(4, 4);
    let start = StepState::new(origin, HexDirection::North);
    let env = compute_envelope(UnitId::new(), start, Gear::Walk, &marsh).unwrap();

    assert_eq!(env.budget(), 4);
    assert_eq!(env.len(), 19);
    for (coord, _) in env.iter() {
        assert_eq!(env.cost(*coord), Some(2 * coord.distance(&origin)));
    }
}

fn scattered(seed: u64, density: f32, walk_mp: Mp) -> (HexBoard, UnitId) {
    let mut board = HexBoard::new(10, 10);
    board.scatter_terrain(seed, density);
    let unit = board.add_mover(MoverProfile::new(walk_mp, 0));
    (board, unit)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_envelope_costs_never_exceed_recorded_prefixes(
        seed in any::<u64>(),
        density in 0.0f32..0.5,
        col in 0i32..10,
        row in 0i32..10,
        facing in 0usize..6,
        walk_mp in 1u32..5,
    ) {
        let (board, unit) = scattered(seed, density, walk_mp);
        let origin = Coord::new(col, row);
        let start = StepState::new(origin, HexDirection::from_index(facing))
            .with_elevation(board.elevation_at(origin));
        let env = compute_envelope(unit, start, Gear::Walk, &board).unwrap();

        prop_assert_eq!(env.cost(origin), Some(0));
        for (coord, path) in env.iter() {
            prop_assert!(path.cumulative_cost() <= env.budget());
            prop_assert!(path.cumulative_cost() >= coord.distance(&origin));
            for step in path.steps().iter().filter(|s| s.kind.changes_hex()) {
                let best = env.cost(step.position);
                prop_assert!(best.is_some());
                prop_assert!(best.unwrap_or(Mp::MAX) <= step.mp_used);
            }
        }
    }

    #[test]
    fn prop_envelope_is_deterministic(
        seed in any::<u64>(),
        density in 0.0f32..0.5,
        col in 0i32..10,
        row in 0i32..10,
    ) {
        let (board, unit) = scattered(seed, density, 4);
        let origin = Coord::new(col, row);
        let start = StepState::new(origin, HexDirection::South)
            .with_elevation(board.elevation_at(origin));
        let first = compute_envelope(unit, start, Gear::Walk, &board).unwrap();
        let second = compute_envelope(unit, start, Gear::Walk, &board).unwrap();
        prop_assert_eq!(first.costs(), second.costs());
    }

    #[test]
    fn prop_recorded_paths_replay_identically(
        seed in any::<u64>(),
        density in 0.0f32..0.5,
        col in 0i32..10,
        row in 0i32..10,
    ) {
        let (board, unit) = scattered(seed, density, 3);
        let origin = Coord::new(col, row);
        let start = StepState::new(origin, HexDirection::North)
            .with_elevation(board.elevation_at(origin));
        let env = compute_envelope(unit, start, Gear::Walk, &board).unwrap();

        for (coord, path) in env.iter() {
            let replayed = path.replay(&board, Gear::Walk).unwrap();
            prop_assert_eq!(&replayed, path);
            prop_assert_eq!(replayed.final_coords(), *coord);
        }
    }
}
