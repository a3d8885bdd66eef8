//! Terrain types for the reference board and their movement effects
//!
//! Costs are whole movement points for a ground unit entering the hex.

use serde::{Deserialize, Serialize};

/// Primary terrain type for a board hex
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Terrain {
    #[default]
    Clear,
    Pavement,
    Rough,
    LightWoods,
    HeavyWoods,
    Rubble,
    Building,
    /// Water of the given depth in levels; depth 0 is a puddle
    Water(u8),
    Impassable,
}

impl Terrain {
    /// Cost for a ground unit to enter, None when it cannot be walked into
    pub fn ground_cost(&self) -> Option<u32> {
        match self {
            Terrain::Clear => Some(1),
            Terrain::Pavement => Some(1),
            Terrain::Rough => Some(2),
            Terrain::LightWoods => Some(2),
            Terrain::HeavyWoods => Some(3),
            Terrain::Rubble => Some(2),
            Terrain::Building => Some(2),
            Terrain::Water(0) => Some(1),
            Terrain::Water(_) => None,
            Terrain::Impassable => None,
        }
    }

    /// Can a swimming unit move through this hex?
    pub fn is_swimmable(&self) -> bool {
        matches!(self, Terrain::Water(depth) if *depth > 0)
    }

    /// Can a jumping unit land here?
    pub fn allows_landing(&self) -> bool {
        !matches!(self, Terrain::Impassable)
    }

    /// Entering this terrain calls for a piloting check
    pub fn is_hazardous(&self) -> bool {
        matches!(self, Terrain::Rubble | Terrain::Water(_))
    }

    /// Single-character symbol for text previews
    pub fn symbol(&self) -> char {
        match self {
            Terrain::Clear => '.',
            Terrain::Pavement => '=',
            Terrain::Rough => ',',
            Terrain::LightWoods => 't',
            Terrain::HeavyWoods => 'T',
            Terrain::Rubble => ':',
            Terrain::Building => '#',
            Terrain::Water(_) => '~',
            Terrain::Impassable => 'X',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_terrain_costs_one() {
        assert_eq!(Terrain::Clear.ground_cost(), Some(1));
    }

    #[test]
    fn test_heavy_woods_slower_than_light() {
        assert!(Terrain::HeavyWoods.ground_cost() > Terrain::LightWoods.ground_cost());
    }

    #[test]
    fn test_deep_water_only_swimmable() {
        assert_eq!(Terrain::Water(2).ground_cost(), None);
        assert!(Terrain::Water(2).is_swimmable());
        assert!(!Terrain::Water(0).is_swimmable());
        assert!(!Terrain::Clear.is_swimmable());
    }

    #[test]
    fn test_impassable_blocks_everything() {
        assert_eq!(Terrain::Impassable.ground_cost(), None);
        assert!(!Terrain::Impassable.allows_landing());
    }

    #[test]
    fn test_hazards() {
        assert!(Terrain::Rubble.is_hazardous());
        assert!(!Terrain::Pavement.is_hazardous());
    }
}
