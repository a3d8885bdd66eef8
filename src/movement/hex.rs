//! Hex coordinate system for movement boards (offset coordinates)
//!
//! Coordinates are (column, row). Odd columns sit half a hex lower than
//! even ones, so the neighbour offsets depend on column parity. Distance
//! goes through cube coordinates. No bounds checks here: every pair of
//! coordinates is valid input, on the board or not.

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_3, PI};
use std::fmt;

/// Offset hex coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    fn is_odd_col(&self) -> bool {
        self.col & 1 == 1
    }

    /// Cube coordinates (q, r, s) with q + r + s == 0
    ///
    /// Wraps at the ends of the i32 range.
    pub fn to_cube(&self) -> (i32, i32, i32) {
        let q = self.col;
        let r = self.row.wrapping_sub(self.col.wrapping_sub(self.col & 1) / 2);
        (q, r, q.wrapping_neg().wrapping_sub(r))
    }

    /// Inverse of `to_cube`
    pub fn from_cube(q: i32, r: i32) -> Self {
        Self::new(q, r.wrapping_add(q.wrapping_sub(q & 1) / 2))
    }

    /// Cube coordinates widened so differences never overflow
    fn to_wide_cube(self) -> (i64, i64, i64) {
        let q = i64::from(self.col);
        let r = i64::from(self.row) - (q - (q & 1)) / 2;
        (q, r, -q - r)
    }

    /// Neighbouring coordinate in the given direction
    ///
    /// Wraps around at the ends of the i32 range.
    pub fn adjacent(&self, dir: HexDirection) -> Coord {
        let (dc, dr) = dir.offset(self.is_odd_col());
        Coord::new(self.col.wrapping_add(dc), self.row.wrapping_add(dr))
    }

    /// Coordinate `n` hexes away in a straight line
    pub fn translate(&self, dir: HexDirection, n: u32) -> Coord {
        (0..n).fold(*self, |c, _| c.adjacent(dir))
    }

    /// Hex distance, saturating at `u32::MAX`
    pub fn distance(&self, other: &Self) -> u32 {
        let (q1, r1, s1) = self.to_wide_cube();
        let (q2, r2, s2) = other.to_wide_cube();
        let total = ((q1 - q2).abs() + (r1 - r2).abs() + (s1 - s2).abs()) / 2;
        u32::try_from(total).unwrap_or(u32::MAX)
    }

    /// All 6 neighbours, indexed by direction
    pub fn neighbors(&self) -> [Coord; 6] {
        HexDirection::all().map(|d| self.adjacent(d))
    }

    /// Centre of the ideal flat-topped hex with unit side, y growing south
    fn center(&self) -> (f64, f64) {
        let x = 1.5 * self.col as f64;
        let y = 3f64.sqrt() * (self.row as f64 + if self.is_odd_col() { 0.5 } else { 0.0 });
        (x, y)
    }

    /// Direction whose hexside best matches the angle towards `other`
    ///
    /// The clockwise angle from north is rounded to the nearest hexside.
    /// A coordinate faces North towards itself.
    pub fn direction_to(&self, other: &Self) -> HexDirection {
        if self == other {
            return HexDirection::North;
        }
        let (x1, y1) = self.center();
        let (x2, y2) = other.center();
        let mut angle = (x2 - x1).atan2(y1 - y2);
        if angle < 0.0 {
            angle += 2.0 * PI;
        }
        let sector = (angle / FRAC_PI_3).round() as usize % 6;
        HexDirection::from_index(sector)
    }

    /// Get all coordinates within range (inclusive)
    pub fn hexes_in_range(&self, range: u32) -> Vec<Coord> {
        let range = range as i32;
        let (cq, cr, _) = self.to_cube();
        let mut results = Vec::new();
        for q in -range..=range {
            for r in (-range).max(-q - range)..=range.min(-q + range) {
                results.push(Coord::from_cube(cq.wrapping_add(q), cr.wrapping_add(r)));
            }
        }
        results
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// Facing and travel direction, clockwise from north
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
pub enum HexDirection {
    #[default]
    North,
    NorthEast,
    SouthEast,
    South,
    SouthWest,
    NorthWest,
}

/// Side of a single hexside turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnSide {
    Left,
    Right,
}

impl HexDirection {
    /// Column/row offset, which depends on whether the column is odd
    pub fn offset(&self, odd_col: bool) -> (i32, i32) {
        match (self, odd_col) {
            (HexDirection::North, _) => (0, -1),
            (HexDirection::NorthEast, false) => (1, -1),
            (HexDirection::NorthEast, true) => (1, 0),
            (HexDirection::SouthEast, false) => (1, 0),
            (HexDirection::SouthEast, true) => (1, 1),
            (HexDirection::South, _) => (0, 1),
            (HexDirection::SouthWest, false) => (-1, 0),
            (HexDirection::SouthWest, true) => (-1, 1),
            (HexDirection::NorthWest, false) => (-1, -1),
            (HexDirection::NorthWest, true) => (-1, 0),
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Direction for an index, taken mod 6
    pub fn from_index(index: usize) -> Self {
        Self::all()[index % 6]
    }

    /// Get opposite direction
    pub fn opposite(&self) -> Self {
        self.rotate(3)
    }

    /// Rotate clockwise by `steps` hexsides
    pub fn rotate(&self, steps: usize) -> Self {
        Self::from_index(self.index() + steps)
    }

    pub fn rotate_right(&self) -> Self {
        self.rotate(1)
    }

    pub fn rotate_left(&self) -> Self {
        self.rotate(5)
    }

    /// Clockwise hexsides from self to `target` (0..=5)
    pub fn relative(&self, target: HexDirection) -> usize {
        (target.index() + 6 - self.index()) % 6
    }

    /// Shortest single-hexside turn towards `target`, None when already facing it
    ///
    /// A half-turn goes right.
    pub fn turn_toward(&self, target: HexDirection) -> Option<TurnSide> {
        match self.relative(target) {
            0 => None,
            1..=3 => Some(TurnSide::Right),
            _ => Some(TurnSide::Left),
        }
    }

    /// Number of hexside turns needed to face `target`
    pub fn turns_to(&self, target: HexDirection) -> u32 {
        let rel = self.relative(target) as u32;
        rel.min(6 - rel)
    }

    /// All directions
    pub fn all() -> [HexDirection; 6] {
        [
            HexDirection::North,
            HexDirection::NorthEast,
            HexDirection::SouthEast,
            HexDirection::South,
            HexDirection::SouthWest,
            HexDirection::NorthWest,
        ]
    }
}
