//! Movement rules configuration with documented defaults
//!
//! Every rule number the reference board applies is collected here so a
//! scenario can be re-tuned from a TOML file without touching the engine.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::error::{MoveError, Result};
use crate::movement::constants::*;

/// Configuration for step costs and climb limits
///
/// All costs are whole movement points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    // === FACING ===
    /// Cost of one hexside turn while on the ground
    pub turn_cost_ground: u32,

    /// Cost of one hexside turn while jumping
    ///
    /// Jumping units pick their landing facing freely, so this is normally 0.
    pub turn_cost_jump: u32,

    // === HEX ENTRY ===
    /// Extra cost of a lateral shift over the plain entry cost
    pub lateral_shift_surcharge: u32,

    /// Cost per level of elevation change when entering a hex on the ground
    pub elevation_level_cost: u32,

    /// Highest climb or drop (in levels) allowed moving forward
    pub max_climb: u32,

    /// Highest climb or drop (in levels) allowed moving backward
    ///
    /// Must not exceed `max_climb`.
    pub max_backward_climb: u32,

    /// Cost of each hex crossed in the air
    pub jump_hex_cost: u32,

    /// Cost of each water hex entered in swim gear
    pub swim_hex_cost: u32,

    // === STANCE ===
    pub get_up_cost: u32,
    pub go_prone_cost: u32,
    pub hull_down_cost: u32,
    pub climb_mode_cost: u32,

    /// Cost of one Up or Down step
    pub vertical_step_cost: u32,

    // === SPECIAL MOVEMENT ===
    pub charge_surcharge: u32,
    pub dfa_surcharge: u32,
    pub ram_surcharge: u32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            turn_cost_ground: TURN_COST_GROUND,
            turn_cost_jump: TURN_COST_JUMP,

            lateral_shift_surcharge: LATERAL_SHIFT_SURCHARGE,
            elevation_level_cost: ELEVATION_LEVEL_COST,
            max_climb: MAX_CLIMB,
            max_backward_climb: MAX_BACKWARD_CLIMB,
            jump_hex_cost: JUMP_HEX_COST,
            swim_hex_cost: SWIM_HEX_COST,

            get_up_cost: GET_UP_COST,
            go_prone_cost: GO_PRONE_COST,
            hull_down_cost: HULL_DOWN_COST,
            climb_mode_cost: CLIMB_MODE_COST,
            vertical_step_cost: VERTICAL_STEP_COST,

            charge_surcharge: CHARGE_SURCHARGE,
            dfa_surcharge: DFA_SURCHARGE,
            ram_surcharge: RAM_SURCHARGE,
        }
    }
}

impl MovementConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Config where facing changes are free, useful for distance-only previews
    pub fn free_turns() -> Self {
        Self {
            turn_cost_ground: 0,
            turn_cost_jump: 0,
            ..Self::default()
        }
    }

    /// Parse a config from TOML text; missing keys take their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: MovementConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        tracing::debug!("Loaded movement config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_backward_climb > self.max_climb {
            return Err(MoveError::InvalidConfig(format!(
                "max_backward_climb ({}) should be <= max_climb ({})",
                self.max_backward_climb, self.max_climb
            )));
        }

        // Envelope termination relies on every hex entry costing something
        if self.jump_hex_cost == 0 || self.swim_hex_cost == 0 {
            return Err(MoveError::InvalidConfig(
                "jump_hex_cost and swim_hex_cost must be at least 1".into(),
            ));
        }

        Ok(())
    }
}
