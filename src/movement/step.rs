//! Steps and the mover state they leave behind

use serde::{Deserialize, Serialize};

use crate::core::types::Mp;
use crate::movement::gear::StepKind;
use crate::movement::hex::{Coord, HexDirection};

/// Everything about a mover that a step can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub struct StepState {
    pub position: Coord,
    pub facing: HexDirection,
    pub elevation: i32,
    pub prone: bool,
    pub hull_down: bool,
    pub climb_mode: bool,
    pub jumping: bool,
}

impl StepState {
    pub fn new(position: Coord, facing: HexDirection) -> Self {
        Self {
            position,
            facing,
            ..Default::default()
        }
    }

    pub fn with_elevation(mut self, elevation: i32) -> Self {
        self.elevation = elevation;
        self
    }

    pub fn with_prone(mut self, prone: bool) -> Self {
        self.prone = prone;
        self
    }

    /// Hex a step of `kind` would end in
    pub fn target_of(&self, kind: StepKind) -> Coord {
        match kind.travel_direction(self.facing) {
            Some(dir) => self.position.adjacent(dir),
            None => self.position,
        }
    }

    /// Stance flags after a step of `kind`; position, facing and elevation come from the oracle
    pub fn stance_after(&self, kind: StepKind) -> Self {
        let mut next = *self;
        match kind {
            StepKind::GetUp => {
                next.prone = false;
            }
            StepKind::GoProne => {
                next.prone = true;
                next.hull_down = false;
            }
            StepKind::HullDown => {
                next.hull_down = true;
            }
            StepKind::ClimbModeOn => next.climb_mode = true,
            StepKind::ClimbModeOff => next.climb_mode = false,
            StepKind::StartJump => next.jumping = true,
            _ => {}
        }
        if kind.changes_hex() {
            next.hull_down = false;
        }
        next
    }
}

/// One appended step; immutable once created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub position: Coord,
    pub facing: HexDirection,
    pub elevation: i32,
    /// Cost of this step alone
    pub mp_cost: Mp,
    /// Cost of the path up to and including this step
    pub mp_used: Mp,
    /// Within the budget when appended
    pub legal: bool,
    /// Entering this step's hex is dangerous for the mover
    pub hazard: bool,
    /// Mover state after the step
    pub state: StepState,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_of_forward_and_in_place() {
        let state = StepState::new(Coord::new(2, 2), HexDirection::South);
        assert_eq!(state.target_of(StepKind::Forward), Coord::new(2, 3));
        assert_eq!(state.target_of(StepKind::Backward), Coord::new(2, 1));
        assert_eq!(state.target_of(StepKind::TurnLeft), Coord::new(2, 2));
    }

    #[test]
    fn test_stance_flags() {
        let state = StepState::new(Coord::new(0, 0), HexDirection::North).with_prone(true);
        let up = state.stance_after(StepKind::GetUp);
        assert!(!up.prone);

        let hull = up.stance_after(StepKind::HullDown);
        assert!(hull.hull_down);
        assert!(!hull.stance_after(StepKind::Forward).hull_down);

        let prone = hull.stance_after(StepKind::GoProne);
        assert!(prone.prone && !prone.hull_down);

        assert!(state.stance_after(StepKind::StartJump).jumping);
        assert!(state.stance_after(StepKind::ClimbModeOn).climb_mode);
    }
}
