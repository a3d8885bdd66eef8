//! Movement envelope: cheapest known path to every reachable hex
//!
//! Grows cost-labelled paths out from the start hex. A hex keeps the
//! first path found at its lowest cost; a strictly cheaper path found
//! later replaces it and the hex is expanded again so the saving reaches
//! its neighbours. Expansion uses a cost-ordered worklist rather than
//! recursion, so large boards cannot exhaust the stack.

use ahash::{AHashMap, AHashSet};
use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::core::error::Result;
use crate::core::types::{Mp, UnitId};
use crate::movement::gear::Gear;
use crate::movement::hex::{Coord, HexDirection};
use crate::movement::oracle::MovementOracle;
use crate::movement::path::MovePath;
use crate::movement::pathfinder::{find_path_to, PathHints};
use crate::movement::step::StepState;

/// Hex waiting to be expanded
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    coord: Coord,
    cost: Mp,
    /// Discovery order, so equal costs expand first-found first
    seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cost == other.cost && self.seq == other.seq
    }
}

impl Eq for QueueEntry {}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Work done by one envelope computation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvelopeStats {
    pub expansions: usize,
    pub improvements: usize,
    pub off_board: usize,
}

/// Reachable hexes with the cheapest path found to each
#[derive(Debug, Clone)]
pub struct EnvelopeMap {
    start: Coord,
    gear: Gear,
    budget: Mp,
    paths: AHashMap<Coord, MovePath>,
    stats: EnvelopeStats,
}

impl EnvelopeMap {
    pub fn start(&self) -> Coord {
        self.start
    }

    pub fn gear(&self) -> Gear {
        self.gear
    }

    pub fn budget(&self) -> Mp {
        self.budget
    }

    pub fn stats(&self) -> EnvelopeStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.paths.contains_key(&coord)
    }

    /// Minimum MP to reach `coord`, None when it is out of reach
    pub fn cost(&self, coord: Coord) -> Option<Mp> {
        self.paths.get(&coord).map(|p| p.cumulative_cost())
    }

    /// The recorded path to `coord`
    pub fn path_to(&self, coord: Coord) -> Option<&MovePath> {
        self.paths.get(&coord)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coord, &MovePath)> {
        self.paths.iter()
    }

    /// (coord, cost) pairs in coordinate order
    pub fn costs(&self) -> Vec<(Coord, Mp)> {
        let mut costs: Vec<(Coord, Mp)> = self
            .paths
            .iter()
            .map(|(c, p)| (*c, p.cumulative_cost()))
            .collect();
        costs.sort();
        costs
    }
}

/// Envelope for `unit` standing at `start`, using the oracle's budget for `gear`
pub fn compute_envelope(
    unit: UnitId,
    start: StepState,
    gear: Gear,
    oracle: &impl MovementOracle,
) -> Result<EnvelopeMap> {
    let budget = oracle.movement_budget(unit, gear)?;
    compute_envelope_with_budget(unit, start, gear, budget, oracle)
}

/// Envelope with an explicit MP budget
///
/// Hexes whose cheapest path costs more than `budget` are left out.
pub fn compute_envelope_with_budget(
    unit: UnitId,
    start: StepState,
    gear: Gear,
    budget: Mp,
    oracle: &impl MovementOracle,
) -> Result<EnvelopeMap> {
    let explore = gear.envelope_gear();
    let mut paths: AHashMap<Coord, MovePath> = AHashMap::new();
    let mut off_board: AHashSet<Coord> = AHashSet::new();
    let mut queue = BinaryHeap::new();
    let mut stats = EnvelopeStats::default();
    let mut seq = 0u64;

    paths.insert(start.position, MovePath::new(unit, start, budget));
    queue.push(QueueEntry {
        coord: start.position,
        cost: 0,
        seq,
    });

    while let Some(entry) = queue.pop() {
        // Skip entries superseded by a cheaper path
        let center = match paths.get(&entry.coord) {
            Some(path) if path.cumulative_cost() == entry.cost => path.clone(),
            _ => continue,
        };
        stats.expansions += 1;

        for dir in HexDirection::all() {
            let neighbor = entry.coord.adjacent(dir);
            if off_board.contains(&neighbor) {
                continue;
            }
            if !oracle.board_contains(neighbor) {
                off_board.insert(neighbor);
                continue;
            }

            let candidate = find_path_to(&center, neighbor, explore, PathHints::default(), oracle)?;
            if candidate.final_coords() != neighbor || !candidate.is_legal() {
                continue;
            }
            let cost = candidate.cumulative_cost();

            let improved = match paths.get(&neighbor) {
                None => true,
                Some(old) if old.cumulative_cost() > cost => {
                    stats.improvements += 1;
                    true
                }
                Some(_) => false,
            };
            if improved {
                paths.insert(neighbor, candidate);
                seq += 1;
                queue.push(QueueEntry {
                    coord: neighbor,
                    cost,
                    seq,
                });
            }
        }
    }

    stats.off_board = off_board.len();
    tracing::debug!(
        start = %start.position,
        ?gear,
        budget,
        hexes = paths.len(),
        expansions = stats.expansions,
        improvements = stats.improvements,
        "Computed movement envelope"
    );

    Ok(EnvelopeMap {
        start: start.position,
        gear,
        budget,
        paths,
        stats,
    })
}
