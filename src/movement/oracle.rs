//! Board and unit model interface consumed by the movement engine
//!
//! The engine never hardcodes terrain rules. Legality, cost and forced
//! facing or elevation changes all come from a `MovementOracle`.

use crate::core::error::Result;
use crate::core::types::{Mp, UnitId};
use crate::movement::gear::{Gear, StepKind};
use crate::movement::hex::{Coord, HexDirection};
use crate::movement::step::StepState;

/// A single step the engine wants priced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepQuery {
    /// Mover state before the step
    pub from: StepState,
    pub kind: StepKind,
    /// Direction of travel, None for in-place kinds
    pub direction: Option<HexDirection>,
    /// Hex the mover ends in; the starting hex for in-place kinds
    pub target: Coord,
}

impl StepQuery {
    pub fn new(from: StepState, kind: StepKind) -> Self {
        Self {
            from,
            kind,
            direction: kind.travel_direction(from.facing),
            target: from.target_of(kind),
        }
    }
}

/// The oracle's answer for a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepQuote {
    pub legal: bool,
    pub mp_cost: Mp,
    pub elevation: i32,
    pub facing: HexDirection,
    pub hazard: bool,
}

impl StepQuote {
    /// Legal step at the given cost
    pub fn legal(mp_cost: Mp, elevation: i32, facing: HexDirection) -> Self {
        Self {
            legal: true,
            mp_cost,
            elevation,
            facing,
            hazard: false,
        }
    }

    /// Step blocked by terrain or by the mover's state
    pub fn blocked(query: &StepQuery) -> Self {
        Self {
            legal: false,
            mp_cost: 0,
            elevation: query.from.elevation,
            facing: query.from.facing,
            hazard: false,
        }
    }

    pub fn with_hazard(mut self, hazard: bool) -> Self {
        self.hazard = hazard;
        self
    }
}

/// The board and unit model collaborator
pub trait MovementOracle {
    /// Price a step; `Err(MoveError::OutOfBounds)` when the target is off the board
    fn is_legal_step(&self, unit: UnitId, query: &StepQuery, gear: Gear) -> Result<StepQuote>;

    /// MP pool for the gear
    fn movement_budget(&self, unit: UnitId, gear: Gear) -> Result<Mp>;

    fn board_contains(&self, coord: Coord) -> bool;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_derives_direction_and_target() {
        let from = StepState::new(Coord::new(4, 4), HexDirection::NorthEast);
        let query = StepQuery::new(from, StepKind::LateralRight);
        assert_eq!(query.direction, Some(HexDirection::SouthEast));
        assert_eq!(query.target, Coord::new(4, 4).adjacent(HexDirection::SouthEast));

        let turn = StepQuery::new(from, StepKind::TurnLeft);
        assert_eq!(turn.direction, None);
        assert_eq!(turn.target, from.position);
    }

    #[test]
    fn test_blocked_quote_keeps_state() {
        let from = StepState::new(Coord::new(0, 0), HexDirection::South).with_elevation(2);
        let quote = StepQuote::blocked(&StepQuery::new(from, StepKind::Forward));
        assert!(!quote.legal);
        assert_eq!(quote.elevation, 2);
        assert_eq!(quote.facing, HexDirection::South);
    }
}
