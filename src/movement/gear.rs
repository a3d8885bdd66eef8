//! Movement gears and the step kinds they produce

use serde::{Deserialize, Serialize};

use crate::movement::hex::{HexDirection, TurnSide};

/// Mode of movement selected for the current path-building session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gear {
    #[default]
    Walk,
    BackUp,
    Jump,
    Swim,
    Charge,
    Dfa,
    Ram,
    Turn,
    /// Sideways shifting (quads, jump boosters): one step kind per leg, no turning
    Lateral,
}

impl Gear {
    /// Gears whose paths are flown rather than walked
    pub fn is_jumping(&self) -> bool {
        matches!(self, Gear::Jump | Gear::Dfa)
    }

    /// Step kind used to enter each hex on the way
    pub fn travel_step(&self) -> StepKind {
        match self {
            Gear::BackUp => StepKind::Backward,
            _ => StepKind::Forward,
        }
    }

    /// Gear used to explore reachable hexes; attack gears move like their base gear
    pub fn envelope_gear(&self) -> Gear {
        match self {
            Gear::Charge | Gear::Ram => Gear::Walk,
            Gear::Dfa => Gear::Jump,
            other => *other,
        }
    }

    /// Step kind replacing the final hex entry, for gears ending in an attack
    pub fn terminal_step(&self) -> Option<StepKind> {
        match self {
            Gear::Charge => Some(StepKind::Charge),
            Gear::Dfa => Some(StepKind::Dfa),
            Gear::Ram => Some(StepKind::Ram),
            _ => None,
        }
    }
}

/// One atomic movement or stance-change action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepKind {
    Forward,
    Backward,
    LateralLeft,
    LateralRight,
    LateralLeftBackward,
    LateralRightBackward,
    TurnLeft,
    TurnRight,
    Up,
    Down,
    StartJump,
    GetUp,
    GoProne,
    HullDown,
    ClimbModeOn,
    ClimbModeOff,
    Charge,
    Dfa,
    Ram,
}

/// Step kind that moves towards a direction given relative to the mover's facing
///
/// Index is clockwise hexsides from the facing. Backward shifts are named
/// for the side as seen when backing up, so right-rear maps to the left one.
pub const LATERAL_STEP_TABLE: [StepKind; 6] = [
    StepKind::Forward,
    StepKind::LateralRight,
    StepKind::LateralLeftBackward,
    StepKind::Backward,
    StepKind::LateralRightBackward,
    StepKind::LateralLeft,
];

impl StepKind {
    /// Clockwise hexsides between facing and travel direction, for kinds that change hex
    fn travel_offset(&self) -> Option<usize> {
        match self {
            StepKind::Forward | StepKind::Charge | StepKind::Dfa | StepKind::Ram => Some(0),
            StepKind::LateralRight => Some(1),
            StepKind::LateralLeftBackward => Some(2),
            StepKind::Backward => Some(3),
            StepKind::LateralRightBackward => Some(4),
            StepKind::LateralLeft => Some(5),
            _ => None,
        }
    }

    /// Direction of travel for a mover facing `facing`, None for in-place kinds
    pub fn travel_direction(&self, facing: HexDirection) -> Option<HexDirection> {
        self.travel_offset().map(|offset| facing.rotate(offset))
    }

    /// Does this kind change the hex the mover stands in?
    pub fn changes_hex(&self) -> bool {
        self.travel_offset().is_some()
    }

    pub fn is_turn(&self) -> bool {
        matches!(self, StepKind::TurnLeft | StepKind::TurnRight)
    }

    pub fn is_lateral(&self) -> bool {
        matches!(
            self,
            StepKind::LateralLeft
                | StepKind::LateralRight
                | StepKind::LateralLeftBackward
                | StepKind::LateralRightBackward
        )
    }

    /// Kinds that move the mover's back first
    pub fn is_backward(&self) -> bool {
        matches!(
            self,
            StepKind::Backward | StepKind::LateralLeftBackward | StepKind::LateralRightBackward
        )
    }

    /// Attack steps that end a path
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepKind::Charge | StepKind::Dfa | StepKind::Ram)
    }

    pub fn from_turn(side: TurnSide) -> Self {
        match side {
            TurnSide::Left => StepKind::TurnLeft,
            TurnSide::Right => StepKind::TurnRight,
        }
    }

    /// Facing after the step, before any forced change reported by the oracle
    pub fn facing_after(&self, facing: HexDirection) -> HexDirection {
        match self {
            StepKind::TurnLeft => facing.rotate_left(),
            StepKind::TurnRight => facing.rotate_right(),
            _ => facing,
        }
    }

    /// Lateral-table step moving towards `relative` hexsides clockwise of facing
    pub fn for_relative_direction(relative: usize) -> Self {
        LATERAL_STEP_TABLE[relative % 6]
    }
}
