//! Movement rule constants - all default rule numbers in one place
//!
//! Costs are whole movement points. Nothing here is fractional.

// Board defaults
pub const DEFAULT_BOARD_WIDTH: u32 = 16;
pub const DEFAULT_BOARD_HEIGHT: u32 = 17;

// Facing changes (per hexside)
pub const TURN_COST_GROUND: u32 = 1;
pub const TURN_COST_JUMP: u32 = 0;

// Hex entry
pub const LATERAL_SHIFT_SURCHARGE: u32 = 1;
pub const ELEVATION_LEVEL_COST: u32 = 1;
pub const MAX_CLIMB: u32 = 2;
pub const MAX_BACKWARD_CLIMB: u32 = 1;
pub const JUMP_HEX_COST: u32 = 1;
pub const SWIM_HEX_COST: u32 = 1;

// Stance changes
pub const GET_UP_COST: u32 = 2;
pub const GO_PRONE_COST: u32 = 1;
pub const HULL_DOWN_COST: u32 = 2;
pub const CLIMB_MODE_COST: u32 = 0;
pub const VERTICAL_STEP_COST: u32 = 1;

// Special movement attached to the end of a path
pub const CHARGE_SURCHARGE: u32 = 0;
pub const DFA_SURCHARGE: u32 = 0;
pub const RAM_SURCHARGE: u32 = 1;

// Mover defaults (run = walk * 1.5, rounded up)
pub const DEFAULT_WALK_MP: u32 = 4;
pub const DEFAULT_JUMP_MP: u32 = 0;

/// Run MP derived from walk MP
pub const fn run_mp_for(walk_mp: u32) -> u32 {
    (walk_mp * 3 + 1) / 2
}
