//! Single-destination path building
//!
//! Extends a move path towards a destination hex the way a player moves a
//! unit on the tabletop: turn towards the target, step, repeat. This is a
//! heuristic, not a shortest-path search. Finding a cheap route is the
//! player's job; the builder only reproduces the straight-line-then-turn
//! policy for the selected gear.
//!
//! An unreachable destination is not an error. The returned path simply
//! ends somewhere else, and callers compare `final_coords()` with the
//! destination.

use crate::core::error::Result;
use crate::movement::gear::{Gear, StepKind};
use crate::movement::hex::{Coord, HexDirection};
use crate::movement::oracle::MovementOracle;
use crate::movement::path::MovePath;

/// Optional start hints for the lateral search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathHints {
    /// Direction of the first leg; defaults to the bearing to the destination
    pub direction: Option<HexDirection>,
    /// Expected facing for the lateral search; ignored unless it matches
    /// the path's final facing
    pub facing: Option<HexDirection>,
}

/// Extend `current` towards `dest` in the given gear
///
/// Returns a new path; `current` is never modified. A step off the board
/// ends the search like a blocked step does. Other oracle failures
/// (an unknown unit, say) propagate.
pub fn find_path_to(
    current: &MovePath,
    dest: Coord,
    gear: Gear,
    hints: PathHints,
    oracle: &impl MovementOracle,
) -> Result<MovePath> {
    let mut path = current.clone();

    let outcome = match gear {
        Gear::Turn => {
            let dir = path.final_coords().direction_to(&dest);
            rotate_in_place(&mut path, dir, false, gear, oracle)
        }
        Gear::Lateral => extend_lateral(&mut path, dest, hints, gear, oracle),
        _ => extend_greedy(&mut path, dest, gear, oracle),
    };

    match outcome {
        Ok(()) => {}
        Err(e) if e.is_out_of_bounds() => {
            tracing::debug!(error = %e, "Path search left the board");
        }
        Err(e) => return Err(e),
    }

    if gear != Gear::Turn && path.final_coords() != dest {
        tracing::debug!(
            ?gear,
            %dest,
            reached = %path.final_coords(),
            "Path stopped short of destination"
        );
    }

    Ok(path)
}

/// Turn in place until facing `dir` (or facing away from it when `backward`)
///
/// Each turn is one hexside, taking the shorter way round.
pub fn rotate_pathfinder(
    current: &MovePath,
    dir: HexDirection,
    backward: bool,
    gear: Gear,
    oracle: &impl MovementOracle,
) -> Result<MovePath> {
    let mut path = current.clone();
    rotate_in_place(&mut path, dir, backward, gear, oracle)?;
    Ok(path)
}

fn rotate_in_place(
    path: &mut MovePath,
    dir: HexDirection,
    backward: bool,
    gear: Gear,
    oracle: &impl MovementOracle,
) -> Result<()> {
    let target = if backward { dir.opposite() } else { dir };

    // Never more than three hexsides, unless the oracle forces a facing
    for _ in 0..6 {
        let Some(side) = path.final_facing().turn_toward(target) else {
            break;
        };
        if !path.add_step(StepKind::from_turn(side), gear, oracle)? {
            break;
        }
    }
    Ok(())
}

/// Neighbour direction that gets closest to `dest`
///
/// On-board neighbours come first. Ties go to the direction needing the
/// fewest turns from `travel_facing`, then to the bearing towards `dest`,
/// then to the lowest index.
fn choose_direction(
    from: Coord,
    travel_facing: HexDirection,
    dest: Coord,
    on_board: impl Fn(Coord) -> bool,
) -> HexDirection {
    let bearing = from.direction_to(&dest);
    HexDirection::all()
        .into_iter()
        .min_by_key(|d| {
            let next = from.adjacent(*d);
            (
                !on_board(next),
                next.distance(&dest),
                travel_facing.turns_to(*d),
                *d != bearing,
                d.index(),
            )
        })
        .unwrap_or(bearing)
}

/// Turn-then-step towards `dest` until it is reached or a step is refused
fn extend_greedy(
    path: &mut MovePath,
    dest: Coord,
    gear: Gear,
    oracle: &impl MovementOracle,
) -> Result<()> {
    if gear.is_jumping()
        && !path.is_jumping()
        && path.final_coords() != dest
        && !path.add_step(StepKind::StartJump, gear, oracle)?
    {
        return Ok(());
    }

    let travel = gear.travel_step();
    let backward = travel.is_backward();

    while path.final_coords() != dest {
        let here = path.final_coords();
        let travel_facing = if backward {
            path.final_facing().opposite()
        } else {
            path.final_facing()
        };
        let dir = choose_direction(here, travel_facing, dest, |c| oracle.board_contains(c));
        if here.adjacent(dir).distance(&dest) >= here.distance(&dest) {
            break;
        }

        rotate_in_place(path, dir, backward, gear, oracle)?;
        if travel.travel_direction(path.final_facing()) != Some(dir) {
            break;
        }

        let next = here.adjacent(dir);
        let kind = match gear.terminal_step() {
            Some(terminal) if next == dest => terminal,
            _ => travel,
        };
        if !path.add_step(kind, gear, oracle)? {
            break;
        }
        if path.final_coords() != next {
            break;
        }
    }
    Ok(())
}

/// Lateral-shift search: pick one step kind per leg from the relative bearing
///
/// Each leg repeats its step kind while that keeps closing on `dest`,
/// then a new leg starts from the bearing at the end of the previous one.
/// No turns are ever added.
fn extend_lateral(
    path: &mut MovePath,
    dest: Coord,
    hints: PathHints,
    gear: Gear,
    oracle: &impl MovementOracle,
) -> Result<()> {
    // Step kinds are relative to the path's real facing
    let facing = path.final_facing();
    if let Some(hinted) = hints.facing.filter(|f| *f != facing) {
        tracing::debug!(?hinted, ?facing, "Ignoring lateral facing hint");
    }
    let mut direction = hints
        .direction
        .unwrap_or_else(|| path.final_coords().direction_to(&dest));

    while path.final_coords() != dest {
        let kind = StepKind::for_relative_direction(facing.relative(direction));
        let mut current = path.final_coords();
        let mut moved = false;

        loop {
            let next = current.adjacent(direction);
            if next.distance(&dest) >= current.distance(&dest) {
                break;
            }
            if !path.add_step(kind, gear, oracle)? {
                return Ok(());
            }
            if path.final_coords() != next {
                path.remove_last_step();
                return Ok(());
            }
            current = next;
            moved = true;
        }

        if !moved {
            break;
        }
        direction = current.direction_to(&dest);
    }
    Ok(())
}
