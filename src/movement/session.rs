//! Movement-phase session for the selected unit
//!
//! Owns the path being built for one unit. Every change publishes a new
//! `Arc<MovePath>` snapshot instead of mutating the one readers hold, so a
//! renderer can keep drawing the old path while the next one is built.
//!
//! Lifecycle: created when the unit is selected, extended by path
//! requests, cleared on gear change or cancel, consumed by `commit`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::error::Result;
use crate::core::types::{Mp, UnitId};
use crate::movement::envelope::{compute_envelope_with_budget, EnvelopeMap};
use crate::movement::gear::{Gear, StepKind};
use crate::movement::hex::{Coord, HexDirection};
use crate::movement::oracle::MovementOracle;
use crate::movement::path::MovePath;
use crate::movement::pathfinder::{find_path_to, rotate_pathfinder, PathHints};
use crate::movement::step::{Step, StepState};

/// A finished move, ready to send to the authoritative game state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommittedMove {
    pub unit: UnitId,
    pub gear: Gear,
    pub steps: Vec<StepKind>,
    pub mp_used: Mp,
    pub final_position: Coord,
    pub final_facing: HexDirection,
}

#[derive(Debug, Clone)]
pub struct MovementSession {
    unit: UnitId,
    start: StepState,
    gear: Gear,
    path: Arc<MovePath>,
    envelope: Option<Arc<EnvelopeMap>>,
}

impl MovementSession {
    /// Start a session for `unit` standing at `start`
    pub fn new(
        unit: UnitId,
        start: StepState,
        gear: Gear,
        oracle: &impl MovementOracle,
    ) -> Result<Self> {
        let budget = oracle.movement_budget(unit, gear)?;
        Ok(Self {
            unit,
            start,
            gear,
            path: Arc::new(MovePath::new(unit, start, budget)),
            envelope: None,
        })
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn gear(&self) -> Gear {
        self.gear
    }

    /// Current path snapshot
    pub fn path(&self) -> Arc<MovePath> {
        Arc::clone(&self.path)
    }

    fn publish(&mut self, path: MovePath) {
        self.path = Arc::new(path);
    }

    /// Switch gear; the path and any cached envelope are discarded
    pub fn set_gear(&mut self, gear: Gear, oracle: &impl MovementOracle) -> Result<()> {
        if gear == self.gear {
            return Ok(());
        }
        let budget = oracle.movement_budget(self.unit, gear)?;
        tracing::debug!(unit = %self.unit, from = ?self.gear, to = ?gear, budget, "Gear changed");
        self.gear = gear;
        self.envelope = None;
        self.publish(MovePath::new(self.unit, self.start, budget));
        Ok(())
    }

    /// Extend the path towards `dest`; returns whether it got there
    pub fn extend_to(&mut self, dest: Coord, oracle: &impl MovementOracle) -> Result<bool> {
        let next = find_path_to(&self.path, dest, self.gear, PathHints::default(), oracle)?;
        let reached = match self.gear {
            Gear::Turn => next.final_facing() == next.final_coords().direction_to(&dest),
            _ => next.final_coords() == dest,
        };
        self.publish(next);
        Ok(reached)
    }

    /// Turn in place to face `dir`, or to face away from it when `backward`
    pub fn rotate_to(
        &mut self,
        dir: HexDirection,
        backward: bool,
        oracle: &impl MovementOracle,
    ) -> Result<()> {
        let next = rotate_pathfinder(&self.path, dir, backward, self.gear, oracle)?;
        self.publish(next);
        Ok(())
    }

    /// Append a single step such as GetUp or HullDown; false when refused
    pub fn add_step(&mut self, kind: StepKind, oracle: &impl MovementOracle) -> Result<bool> {
        let mut next = MovePath::clone(&self.path);
        let added = next.add_step(kind, self.gear, oracle)?;
        if added {
            self.publish(next);
        }
        Ok(added)
    }

    /// Drop the last step
    pub fn undo(&mut self) -> Option<Step> {
        let mut next = MovePath::clone(&self.path);
        let removed = next.remove_last_step();
        if removed.is_some() {
            self.publish(next);
        }
        removed
    }

    /// Clear the path, keeping unit and gear
    pub fn cancel(&mut self) {
        let mut next = MovePath::clone(&self.path);
        next.clear();
        self.publish(next);
    }

    /// Reachable hexes from the start position in the current gear
    ///
    /// Cached until the gear changes.
    pub fn envelope(&mut self, oracle: &impl MovementOracle) -> Result<Arc<EnvelopeMap>> {
        if let Some(envelope) = &self.envelope {
            return Ok(Arc::clone(envelope));
        }
        let envelope = Arc::new(compute_envelope_with_budget(
            self.unit,
            self.start,
            self.gear,
            self.path.budget(),
            oracle,
        )?);
        self.envelope = Some(Arc::clone(&envelope));
        Ok(envelope)
    }

    /// Finish the move, dropping any over-budget tail
    pub fn commit(self) -> CommittedMove {
        let mut path = MovePath::clone(&self.path);
        path.clip_to_legal();
        tracing::info!(
            unit = %self.unit,
            gear = ?self.gear,
            steps = path.len(),
            mp_used = path.cumulative_cost(),
            "Committed move"
        );
        CommittedMove {
            unit: self.unit,
            gear: self.gear,
            steps: path.step_kinds(),
            mp_used: path.cumulative_cost(),
            final_position: path.final_coords(),
            final_facing: path.final_facing(),
        }
    }
}
