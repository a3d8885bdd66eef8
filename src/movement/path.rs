//! Step sequences (move paths)
//!
//! A `MovePath` is an ordered, appendable list of steps starting from a
//! fixed mover state. Each step's cost and resulting state are fixed at
//! append time, so replaying the kinds against the same board reproduces
//! the same path. Cloning is a deep copy; speculative extension works on
//! a clone and leaves the original alone.

use serde::{Deserialize, Serialize};

use crate::core::error::Result;
use crate::core::types::{Mp, UnitId};
use crate::movement::gear::{Gear, StepKind};
use crate::movement::hex::{Coord, HexDirection};
use crate::movement::oracle::{MovementOracle, StepQuery, StepQuote};
use crate::movement::step::{Step, StepState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovePath {
    unit: UnitId,
    start: StepState,
    budget: Mp,
    steps: Vec<Step>,
}

impl MovePath {
    /// Empty path for `unit` standing at `start`, allowed to spend `budget` MP
    pub fn new(unit: UnitId, start: StepState, budget: Mp) -> Self {
        Self {
            unit,
            start,
            budget,
            steps: Vec::new(),
        }
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn start_state(&self) -> StepState {
        self.start
    }

    pub fn budget(&self) -> Mp {
        self.budget
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last_step(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Mover state at the end of the path
    pub fn final_state(&self) -> StepState {
        self.steps.last().map(|s| s.state).unwrap_or(self.start)
    }

    pub fn final_coords(&self) -> Coord {
        self.final_state().position
    }

    pub fn final_facing(&self) -> HexDirection {
        self.final_state().facing
    }

    pub fn final_elevation(&self) -> i32 {
        self.final_state().elevation
    }

    /// Total MP spent by the path
    pub fn cumulative_cost(&self) -> Mp {
        self.steps.last().map(|s| s.mp_used).unwrap_or(0)
    }

    /// MP left before the budget runs out
    pub fn remaining_mp(&self) -> Mp {
        self.budget.saturating_sub(self.cumulative_cost())
    }

    pub fn is_prone(&self) -> bool {
        self.final_state().prone
    }

    pub fn is_hull_down(&self) -> bool {
        self.final_state().hull_down
    }

    pub fn is_climb_mode(&self) -> bool {
        self.final_state().climb_mode
    }

    pub fn is_jumping(&self) -> bool {
        self.final_state().jumping
    }

    /// Does any step enter a dangerous hex?
    pub fn has_hazard(&self) -> bool {
        self.steps.iter().any(|s| s.hazard)
    }

    /// Every step is legal
    pub fn is_legal(&self) -> bool {
        self.steps.iter().all(|s| s.legal)
    }

    /// Append a step priced by the oracle
    ///
    /// The step is legal when the quote is and the running total stays
    /// within the budget.
    pub fn append(&mut self, kind: StepKind, quote: StepQuote) -> &Step {
        let prev = self.final_state();
        let mut state = prev.stance_after(kind);
        state.position = prev.target_of(kind);
        state.facing = quote.facing;
        state.elevation = quote.elevation;

        let mp_used = self.cumulative_cost().saturating_add(quote.mp_cost);
        let step = Step {
            kind,
            position: state.position,
            facing: state.facing,
            elevation: state.elevation,
            mp_cost: quote.mp_cost,
            mp_used,
            legal: quote.legal && mp_used <= self.budget,
            hazard: quote.hazard,
            state,
        };
        tracing::trace!(
            ?kind,
            position = %step.position,
            mp_used,
            legal = step.legal,
            "Appended step"
        );

        self.steps.push(step);
        &self.steps[self.steps.len() - 1]
    }

    /// Query the oracle and append the step if the board allows it
    ///
    /// Returns `Ok(false)` when the step is blocked; the path is unchanged.
    /// Off-board targets surface as `MoveError::OutOfBounds`.
    pub fn add_step(
        &mut self,
        kind: StepKind,
        gear: Gear,
        oracle: &impl MovementOracle,
    ) -> Result<bool> {
        let query = StepQuery::new(self.final_state(), kind);
        let quote = oracle.is_legal_step(self.unit, &query, gear)?;
        if !quote.legal {
            return Ok(false);
        }
        self.append(kind, quote);
        Ok(true)
    }

    pub fn remove_last_step(&mut self) -> Option<Step> {
        self.steps.pop()
    }

    /// Drop every step from the first illegal one onwards
    pub fn clip_to_legal(&mut self) {
        let legal_prefix = self.steps.iter().take_while(|s| s.legal).count();
        self.steps.truncate(legal_prefix);
    }

    /// Remove all steps, keeping the start state and budget
    pub fn clear(&mut self) {
        self.steps.clear();
    }

    /// The step kinds, as transmitted when the move is committed
    pub fn step_kinds(&self) -> Vec<StepKind> {
        self.steps.iter().map(|s| s.kind).collect()
    }

    /// Rebuild the path from its start state by re-pricing each kind
    ///
    /// Stops at the first step the board now blocks.
    pub fn replay(&self, oracle: &impl MovementOracle, gear: Gear) -> Result<MovePath> {
        let mut rebuilt = MovePath::new(self.unit, self.start, self.budget);
        for kind in self.step_kinds() {
            if !rebuilt.add_step(kind, gear, oracle)? {
                break;
            }
        }
        Ok(rebuilt)
    }
}
