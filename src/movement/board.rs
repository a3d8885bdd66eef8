//! Reference board and unit model
//!
//! A rectangular hex board with terrain and elevation, plus the MP profile
//! of every unit on it. Implements `MovementOracle` so the engine can be
//! driven without an external game model.

use ahash::AHashMap;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::core::config::MovementConfig;
use crate::core::error::{MoveError, Result};
use crate::core::types::{Mp, UnitId};
use crate::movement::constants::{run_mp_for, DEFAULT_JUMP_MP, DEFAULT_WALK_MP};
use crate::movement::gear::{Gear, StepKind};
use crate::movement::hex::Coord;
use crate::movement::oracle::{MovementOracle, StepQuery, StepQuote};
use crate::movement::terrain::Terrain;

/// A single hex on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardHex {
    pub coord: Coord,
    pub terrain: Terrain,
    pub elevation: i32,
}

impl BoardHex {
    pub fn new(coord: Coord, terrain: Terrain) -> Self {
        Self {
            coord,
            terrain,
            elevation: 0,
        }
    }
}

/// Movement pools of a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoverProfile {
    pub walk_mp: Mp,
    pub run_mp: Mp,
    pub jump_mp: Mp,
    /// Can change altitude with Up/Down steps
    pub vertical: bool,
}

impl MoverProfile {
    /// Profile with run MP derived from walk MP
    pub fn new(walk_mp: Mp, jump_mp: Mp) -> Self {
        Self {
            walk_mp,
            run_mp: run_mp_for(walk_mp),
            jump_mp,
            vertical: false,
        }
    }

    pub fn with_vertical(mut self, vertical: bool) -> Self {
        self.vertical = vertical;
        self
    }

    /// MP pool for a gear
    pub fn budget(&self, gear: Gear) -> Mp {
        match gear {
            Gear::Walk | Gear::Charge | Gear::Ram | Gear::Turn | Gear::Lateral => self.run_mp,
            Gear::BackUp | Gear::Swim => self.walk_mp,
            Gear::Jump | Gear::Dfa => self.jump_mp,
        }
    }
}

impl Default for MoverProfile {
    fn default() -> Self {
        Self::new(DEFAULT_WALK_MP, DEFAULT_JUMP_MP)
    }
}

/// The full board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HexBoard {
    pub hexes: AHashMap<Coord, BoardHex>,
    pub width: u32,
    pub height: u32,
    pub movers: AHashMap<UnitId, MoverProfile>,
    pub config: MovementConfig,
}

impl HexBoard {
    /// Create a new board of clear terrain at elevation 0
    pub fn new(width: u32, height: u32) -> Self {
        let mut hexes = AHashMap::new();

        for col in 0..width as i32 {
            for row in 0..height as i32 {
                let coord = Coord::new(col, row);
                hexes.insert(coord, BoardHex::new(coord, Terrain::Clear));
            }
        }

        Self {
            hexes,
            width,
            height,
            movers: AHashMap::new(),
            config: MovementConfig::default(),
        }
    }

    pub fn with_config(mut self, config: MovementConfig) -> Self {
        self.config = config;
        self
    }

    /// Get a hex at the given coordinate
    pub fn get_hex(&self, coord: Coord) -> Option<&BoardHex> {
        self.hexes.get(&coord)
    }

    pub fn get_hex_mut(&mut self, coord: Coord) -> Option<&mut BoardHex> {
        self.hexes.get_mut(&coord)
    }

    /// Check if coordinate is within board bounds
    pub fn in_bounds(&self, coord: Coord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && coord.col < self.width as i32
            && coord.row < self.height as i32
    }

    /// Set terrain at a coordinate
    pub fn set_terrain(&mut self, coord: Coord, terrain: Terrain) {
        if let Some(hex) = self.get_hex_mut(coord) {
            hex.terrain = terrain;
        }
    }

    /// Set elevation at a coordinate
    pub fn set_elevation(&mut self, coord: Coord, elevation: i32) {
        if let Some(hex) = self.get_hex_mut(coord) {
            hex.elevation = elevation;
        }
    }

    /// Ground elevation, 0 off the board
    pub fn elevation_at(&self, coord: Coord) -> i32 {
        self.get_hex(coord).map(|h| h.elevation).unwrap_or(0)
    }

    /// Register a unit and return its id
    pub fn add_mover(&mut self, profile: MoverProfile) -> UnitId {
        let id = UnitId::new();
        self.movers.insert(id, profile);
        id
    }

    pub fn mover(&self, unit: UnitId) -> Result<&MoverProfile> {
        self.movers.get(&unit).ok_or(MoveError::UnknownUnit(unit))
    }

    /// Scatter random terrain and hills, deterministic for a given seed
    ///
    /// `density` is the chance (0.0 to 1.0) that a hex gets non-clear terrain.
    pub fn scatter_terrain(&mut self, seed: u64, density: f32) {
        const SCATTER: [Terrain; 7] = [
            Terrain::Rough,
            Terrain::LightWoods,
            Terrain::HeavyWoods,
            Terrain::Rubble,
            Terrain::Water(0),
            Terrain::Water(2),
            Terrain::Building,
        ];

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        // Iterate in coordinate order so the result doesn't depend on hash order
        let mut coords: Vec<Coord> = self.hexes.keys().copied().collect();
        coords.sort();

        for coord in coords {
            let terrain = if rng.gen::<f32>() < density {
                SCATTER[rng.gen_range(0..SCATTER.len())]
            } else {
                Terrain::Clear
            };
            let elevation = if rng.gen::<f32>() < density / 2.0 {
                rng.gen_range(1..=2)
            } else {
                0
            };
            self.set_terrain(coord, terrain);
            self.set_elevation(coord, elevation);
        }

        tracing::debug!(seed, density, "Scattered terrain over {} hexes", self.hexes.len());
    }

    /// Price a step that enters another hex
    fn quote_hex_entry(&self, query: &StepQuery, gear: Gear) -> Result<StepQuote> {
        let Some(hex) = self.get_hex(query.target) else {
            return Err(MoveError::OutOfBounds(query.target));
        };
        let from = &query.from;
        let config = &self.config;

        if from.prone {
            return Ok(StepQuote::blocked(query));
        }

        if from.jumping {
            if !hex.terrain.allows_landing() {
                return Ok(StepQuote::blocked(query));
            }
            let surcharge = if query.kind == StepKind::Dfa {
                config.dfa_surcharge
            } else {
                0
            };
            return Ok(StepQuote::legal(
                config.jump_hex_cost + surcharge,
                hex.elevation,
                from.facing,
            ));
        }

        if gear == Gear::Swim {
            if !hex.terrain.is_swimmable() {
                return Ok(StepQuote::blocked(query));
            }
            return Ok(StepQuote::legal(config.swim_hex_cost, hex.elevation, from.facing));
        }

        let Some(terrain_cost) = hex.terrain.ground_cost() else {
            return Ok(StepQuote::blocked(query));
        };

        let delta = hex.elevation - from.elevation;
        let climb_limit = if query.kind.is_backward() {
            config.max_backward_climb
        } else {
            config.max_climb
        };
        if delta.unsigned_abs() > climb_limit {
            return Ok(StepQuote::blocked(query));
        }

        let mut cost = terrain_cost + delta.unsigned_abs() * config.elevation_level_cost;
        if query.kind.is_lateral() {
            cost += config.lateral_shift_surcharge;
        }
        match query.kind {
            StepKind::Charge => cost += config.charge_surcharge,
            StepKind::Ram => cost += config.ram_surcharge,
            _ => {}
        }

        let hazard = hex.terrain.is_hazardous() || delta < -1;
        Ok(StepQuote::legal(cost, hex.elevation, from.facing).with_hazard(hazard))
    }

    /// Price a step that stays in the current hex
    fn quote_in_place(&self, unit: UnitId, query: &StepQuery) -> Result<StepQuote> {
        let profile = self.mover(unit)?;
        let from = &query.from;
        let config = &self.config;
        let ground = self.elevation_at(from.position);

        let quote = match query.kind {
            StepKind::TurnLeft | StepKind::TurnRight => {
                let cost = if from.jumping {
                    config.turn_cost_jump
                } else {
                    config.turn_cost_ground
                };
                StepQuote::legal(cost, from.elevation, query.kind.facing_after(from.facing))
            }
            StepKind::StartJump if profile.jump_mp > 0 && !from.prone && !from.jumping => {
                StepQuote::legal(0, from.elevation, from.facing)
            }
            StepKind::GetUp if from.prone => {
                StepQuote::legal(config.get_up_cost, from.elevation, from.facing)
            }
            StepKind::GoProne if !from.prone && !from.jumping => {
                StepQuote::legal(config.go_prone_cost, from.elevation, from.facing)
            }
            StepKind::HullDown if !from.prone && !from.hull_down && !from.jumping => {
                StepQuote::legal(config.hull_down_cost, from.elevation, from.facing)
            }
            StepKind::ClimbModeOn if !from.climb_mode => {
                StepQuote::legal(config.climb_mode_cost, from.elevation, from.facing)
            }
            StepKind::ClimbModeOff if from.climb_mode => {
                StepQuote::legal(config.climb_mode_cost, from.elevation, from.facing)
            }
            StepKind::Up if profile.vertical => {
                StepQuote::legal(config.vertical_step_cost, from.elevation + 1, from.facing)
            }
            StepKind::Down if profile.vertical && from.elevation > ground => {
                StepQuote::legal(config.vertical_step_cost, from.elevation - 1, from.facing)
            }
            _ => StepQuote::blocked(query),
        };
        Ok(quote)
    }
}

impl MovementOracle for HexBoard {
    fn is_legal_step(&self, unit: UnitId, query: &StepQuery, gear: Gear) -> Result<StepQuote> {
        self.mover(unit)?;
        if !self.in_bounds(query.target) {
            return Err(MoveError::OutOfBounds(query.target));
        }
        if query.kind.changes_hex() {
            self.quote_hex_entry(query, gear)
        } else {
            self.quote_in_place(unit, query)
        }
    }

    fn movement_budget(&self, unit: UnitId, gear: Gear) -> Result<Mp> {
        Ok(self.mover(unit)?.budget(gear))
    }

    fn board_contains(&self, coord: Coord) -> bool {
        self.in_bounds(coord)
    }
}
