//! Hexmove - movement preview on a generated board
//!
//! Builds a random board, places one unit on it and prints the path to a
//! destination together with every hex the unit can reach this turn.

use clap::Parser;
use serde::Serialize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use hexmove::core::config::MovementConfig;
use hexmove::core::error::{MoveError, Result};
use hexmove::core::types::Mp;
use hexmove::movement::{
    compute_envelope, find_path_to, Coord, EnvelopeMap, Gear, HexBoard, HexDirection, MovePath,
    MoverProfile, PathHints, Step, StepState, DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH,
    DEFAULT_JUMP_MP, DEFAULT_WALK_MP,
};

/// Hex movement preview - path and reachable hexes for one unit
#[derive(Parser, Debug)]
#[command(name = "hexmove")]
#[command(about = "Preview a unit's movement path and envelope on a generated hex board")]
struct Args {
    /// Board width in hexes
    #[arg(long, default_value_t = DEFAULT_BOARD_WIDTH)]
    width: u32,

    /// Board height in hexes
    #[arg(long, default_value_t = DEFAULT_BOARD_HEIGHT)]
    height: u32,

    /// Random seed for terrain generation
    #[arg(long)]
    seed: Option<u64>,

    /// Chance (0.0 to 1.0) that a hex gets non-clear terrain
    #[arg(long, default_value_t = 0.25)]
    density: f32,

    /// TOML file with movement rule overrides
    #[arg(long)]
    config: Option<PathBuf>,

    /// Walking MP of the unit
    #[arg(long, default_value_t = DEFAULT_WALK_MP)]
    walk_mp: Mp,

    /// Jumping MP of the unit
    #[arg(long, default_value_t = DEFAULT_JUMP_MP)]
    jump_mp: Mp,

    /// Starting column
    #[arg(long, default_value_t = 0)]
    col: i32,

    /// Starting row
    #[arg(long, default_value_t = 0)]
    row: i32,

    /// Starting facing: n, ne, se, s, sw, nw
    #[arg(long, default_value = "s", value_parser = parse_facing)]
    facing: HexDirection,

    /// Movement gear: walk, backup, jump, swim, charge, dfa, ram, turn, lateral
    #[arg(long, default_value = "walk", value_parser = parse_gear)]
    gear: Gear,

    /// Destination as "col,row"
    #[arg(long, value_parser = parse_coord)]
    dest: Option<Coord>,

    /// Output format: text or json
    #[arg(long, default_value = "text")]
    format: String,
}

fn parse_facing(s: &str) -> std::result::Result<HexDirection, String> {
    match s.to_ascii_lowercase().as_str() {
        "n" | "north" => Ok(HexDirection::North),
        "ne" | "northeast" => Ok(HexDirection::NorthEast),
        "se" | "southeast" => Ok(HexDirection::SouthEast),
        "s" | "south" => Ok(HexDirection::South),
        "sw" | "southwest" => Ok(HexDirection::SouthWest),
        "nw" | "northwest" => Ok(HexDirection::NorthWest),
        other => Err(format!("unknown facing '{other}'")),
    }
}

fn parse_gear(s: &str) -> std::result::Result<Gear, String> {
    match s.to_ascii_lowercase().as_str() {
        "walk" => Ok(Gear::Walk),
        "backup" => Ok(Gear::BackUp),
        "jump" => Ok(Gear::Jump),
        "swim" => Ok(Gear::Swim),
        "charge" => Ok(Gear::Charge),
        "dfa" => Ok(Gear::Dfa),
        "ram" => Ok(Gear::Ram),
        "turn" => Ok(Gear::Turn),
        "lateral" => Ok(Gear::Lateral),
        other => Err(format!("unknown gear '{other}'")),
    }
}

fn parse_coord(s: &str) -> std::result::Result<Coord, String> {
    let (col, row) = s
        .split_once(',')
        .ok_or_else(|| format!("expected col,row but got '{s}'"))?;
    let col = col.trim().parse::<i32>().map_err(|e| e.to_string())?;
    let row = row.trim().parse::<i32>().map_err(|e| e.to_string())?;
    Ok(Coord::new(col, row))
}

/// JSON output structure
#[derive(Serialize)]
struct PreviewOutput {
    seed: u64,
    gear: Gear,
    budget: Mp,
    start: Coord,
    facing: HexDirection,
    path: Option<PathOutput>,
    envelope: Vec<EnvelopeEntry>,
}

#[derive(Serialize)]
struct PathOutput {
    destination: Coord,
    reached: bool,
    mp_used: Mp,
    legal: bool,
    steps: Vec<Step>,
}

#[derive(Serialize)]
struct EnvelopeEntry {
    coord: Coord,
    cost: Mp,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hexmove=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => MovementConfig::load(path)?,
        None => MovementConfig::default(),
    };

    let seed = args.seed.unwrap_or_else(rand::random);
    let mut board = HexBoard::new(args.width, args.height).with_config(config);
    board.scatter_terrain(seed, args.density);

    let start = Coord::new(args.col, args.row);
    if !board.in_bounds(start) {
        return Err(MoveError::OutOfBounds(start));
    }
    let start_state = StepState::new(start, args.facing).with_elevation(board.elevation_at(start));
    let unit = board.add_mover(MoverProfile::new(args.walk_mp, args.jump_mp));

    tracing::info!(%start, gear = ?args.gear, seed, "Previewing movement");

    let envelope = compute_envelope(unit, start_state, args.gear, &board)?;
    let path = match args.dest {
        Some(dest) => {
            let empty = MovePath::new(unit, start_state, envelope.budget());
            Some((dest, find_path_to(&empty, dest, args.gear, PathHints::default(), &board)?))
        }
        None => None,
    };

    match args.format.as_str() {
        "json" => {
            let output = PreviewOutput {
                seed,
                gear: args.gear,
                budget: envelope.budget(),
                start,
                facing: args.facing,
                path: path.as_ref().map(|(dest, p)| PathOutput {
                    destination: *dest,
                    reached: p.final_coords() == *dest,
                    mp_used: p.cumulative_cost(),
                    legal: p.is_legal(),
                    steps: p.steps().to_vec(),
                }),
                envelope: envelope
                    .costs()
                    .into_iter()
                    .map(|(coord, cost)| EnvelopeEntry { coord, cost })
                    .collect(),
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        _ => print_text(&board, &envelope, path.as_ref().map(|(d, p)| (*d, p)), seed),
    }

    Ok(())
}

/// Grid of envelope costs over the terrain, with the path marked
fn print_text(
    board: &HexBoard,
    envelope: &EnvelopeMap,
    path: Option<(Coord, &MovePath)>,
    seed: u64,
) {
    println!(
        "=== {:?} from {} (budget {} MP, seed {}) ===",
        envelope.gear(),
        envelope.start(),
        envelope.budget(),
        seed
    );

    let on_path = |c: Coord| {
        path.map(|(_, p)| p.steps().iter().any(|s| s.position == c))
            .unwrap_or(false)
    };

    for row in 0..board.height as i32 {
        let mut line = String::new();
        for col in 0..board.width as i32 {
            let c = Coord::new(col, row);
            let cell = if c == envelope.start() {
                '@'
            } else if on_path(c) {
                '*'
            } else if let Some(cost) = envelope.cost(c) {
                char::from_digit(cost, 10).unwrap_or('+')
            } else {
                board.get_hex(c).map(|h| h.terrain.symbol()).unwrap_or(' ')
            };
            line.push(cell);
            line.push(' ');
        }
        println!("{line}");
    }

    println!("{} hexes reachable", envelope.len());

    if let Some((dest, p)) = path {
        let status = if p.final_coords() == dest {
            "reached"
        } else {
            "stopped short"
        };
        println!(
            "Path to {}: {} at {} after {} MP, {} left ({} steps{})",
            dest,
            status,
            p.final_coords(),
            p.cumulative_cost(),
            p.remaining_mp(),
            p.len(),
            if p.is_legal() { "" } else { ", over budget" }
        );
        for step in p.steps() {
            println!(
                "  {:?} -> {} facing {:?} [{} MP]{}",
                step.kind,
                step.position,
                step.facing,
                step.mp_used,
                if step.hazard { " !" } else { "" }
            );
        }
    }
}
