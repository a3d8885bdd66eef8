//! Hex movement engine - path building and reachability for tabletop units
//!
//! The engine never decides what the board allows. Every step is priced
//! by a `MovementOracle`; the path builders only choose which steps to ask
//! about. `HexBoard` is a self-contained oracle for tools and tests.

pub mod board;
pub mod constants;
pub mod envelope;
pub mod gear;
pub mod hex;
pub mod oracle;
pub mod path;
pub mod pathfinder;
pub mod session;
pub mod step;
pub mod terrain;

// Re-exports for convenient access
pub use board::{BoardHex, HexBoard, MoverProfile};
pub use constants::*;
pub use envelope::{compute_envelope, compute_envelope_with_budget, EnvelopeMap, EnvelopeStats};
pub use gear::{Gear, StepKind, LATERAL_STEP_TABLE};
pub use hex::{Coord, HexDirection, TurnSide};
pub use oracle::{MovementOracle, StepQuery, StepQuote};
pub use path::MovePath;
pub use pathfinder::{find_path_to, rotate_pathfinder, PathHints};
pub use session::{CommittedMove, MovementSession};
pub use step::{Step, StepState};
pub use terrain::Terrain;
