//! A* pathfinding on the square grid.
//!
//! Step costs come from a `CostDecider`, so the search handles turn
//! rollover and illegal steps the same way unit movement does. An illegal
//! step is simply a missing edge.

use crate::geometry::Position;
use crate::map::Map;
use crate::movement::{CostDecider, MovingUnit};
use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

/// A position along a path and the unit's state on arrival.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathStep {
    pub position: Position,
    /// Movement points left on arrival.
    pub moves_left: u32,
    /// Turn rollovers needed to get here.
    pub turns: u32,
}

/// Result of a pathfinding operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathResult {
    /// The path from start to goal (inclusive).
    pub steps: Vec<PathStep>,
    /// Total movement cost of the path.
    pub total_cost: u32,
    /// Turn rollovers along the path.
    pub turns: u32,
}

impl PathResult {
    /// Positions along the path.
    pub fn positions(&self) -> Vec<Position> {
        self.steps.iter().map(|s| s.position).collect()
    }
}

/// Node in the A* priority queue.
#[derive(Clone, Eq, PartialEq)]
struct PathNode {
    step: PathStep,
    g_cost: u32, // Cost from start
    f_cost: u32, // g_cost + heuristic
}

impl Ord for PathNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (lowest f_cost first)
        other
            .f_cost
            .cmp(&self.f_cost)
            .then_with(|| other.g_cost.cmp(&self.g_cost))
            .then_with(|| other.step.position.cmp(&self.step.position))
    }
}

impl PartialOrd for PathNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Best known way of reaching a position.
#[derive(Clone, Copy)]
struct Visit {
    step: PathStep,
    g_cost: u32,
    came_from: Option<Position>,
}

/// Find the cheapest path between two positions using A*.
///
/// The unit starts with its current moves left. Returns None if no legal
/// path exists.
pub fn find_path(
    map: &Map,
    unit: &dyn MovingUnit,
    start: Position,
    goal: Position,
    decider: &dyn CostDecider,
) -> Option<PathResult> {
    map.get(&start)?;
    let first = PathStep {
        position: start,
        moves_left: unit.moves_left(),
        turns: 0,
    };

    let mut open_set = BinaryHeap::new();
    let mut visits: HashMap<Position, Visit> = HashMap::new();

    visits.insert(
        start,
        Visit {
            step: first,
            g_cost: 0,
            came_from: None,
        },
    );
    open_set.push(PathNode {
        step: first,
        g_cost: 0,
        f_cost: heuristic(&start, &goal),
    });

    while let Some(current) = open_set.pop() {
        let position = current.step.position;
        if position == goal {
            return Some(PathResult {
                steps: reconstruct_path(&visits, goal),
                total_cost: current.g_cost,
                turns: current.step.turns,
            });
        }

        // Skip stale entries superseded by a cheaper route.
        if visits.get(&position).is_some_and(|v| v.g_cost < current.g_cost) {
            continue;
        }

        for (next, cost) in expand(map, unit, &current.step, decider) {
            let tentative_g = current.g_cost.saturating_add(cost);
            if visits
                .get(&next.position)
                .is_some_and(|v| tentative_g >= v.g_cost)
            {
                continue;
            }

            visits.insert(
                next.position,
                Visit {
                    step: next,
                    g_cost: tentative_g,
                    came_from: Some(position),
                },
            );
            open_set.push(PathNode {
                step: next,
                g_cost: tentative_g,
                f_cost: tentative_g.saturating_add(heuristic(&next.position, &goal)),
            });
        }
    }

    None // No path found
}

/// Find every position reachable within `max_turns` turn rollovers.
///
/// Returns the cheapest arrival state per position, the start included.
pub fn find_reachable(
    map: &Map,
    unit: &dyn MovingUnit,
    start: Position,
    max_turns: u32,
    decider: &dyn CostDecider,
) -> HashMap<Position, PathStep> {
    let mut reachable: HashMap<Position, (u32, PathStep)> = HashMap::new();
    if map.get(&start).is_none() {
        return HashMap::new();
    }

    let first = PathStep {
        position: start,
        moves_left: unit.moves_left(),
        turns: 0,
    };
    let mut frontier = BinaryHeap::new();
    reachable.insert(start, (0, first));
    frontier.push(PathNode {
        step: first,
        g_cost: 0,
        f_cost: 0,
    });

    while let Some(current) = frontier.pop() {
        let position = current.step.position;
        if reachable
            .get(&position)
            .is_some_and(|(g, _)| *g < current.g_cost)
        {
            continue;
        }

        for (next, cost) in expand(map, unit, &current.step, decider) {
            if next.turns > max_turns {
                continue;
            }
            let total_cost = current.g_cost.saturating_add(cost);
            if reachable
                .get(&next.position)
                .is_some_and(|(g, _)| total_cost >= *g)
            {
                continue;
            }

            reachable.insert(next.position, (total_cost, next));
            frontier.push(PathNode {
                step: next,
                g_cost: total_cost,
                f_cost: total_cost,
            });
        }
    }

    reachable
        .into_iter()
        .map(|(pos, (_, step))| (pos, step))
        .collect()
}

/// Re-evaluate a path step by step.
///
/// Returns None if any step is illegal or the positions are not connected.
pub fn path_cost(
    map: &Map,
    unit: &dyn MovingUnit,
    path: &[Position],
    decider: &dyn CostDecider,
) -> Option<PathResult> {
    let (&start, rest) = path.split_first()?;
    let mut tile = map.get(&start)?;
    let mut step = PathStep {
        position: start,
        moves_left: unit.moves_left(),
        turns: 0,
    };
    let mut steps = vec![step];
    let mut total_cost = 0u32;

    for position in rest {
        if !step.position.is_adjacent(position) {
            return None;
        }
        let next_tile = map.get(position)?;
        let cost = decider.cost(unit, tile, next_tile, step.moves_left, step.turns)?;

        total_cost = total_cost.saturating_add(cost.cost);
        step = PathStep {
            position: *position,
            moves_left: cost.moves_left,
            turns: step.turns + u32::from(cost.new_turn),
        };
        steps.push(step);
        tile = next_tile;
    }

    Some(PathResult {
        steps,
        total_cost,
        turns: step.turns,
    })
}

/// Legal steps out of `from`, with their costs.
fn expand(
    map: &Map,
    unit: &dyn MovingUnit,
    from: &PathStep,
    decider: &dyn CostDecider,
) -> Vec<(PathStep, u32)> {
    let Some(old_tile) = map.get(&from.position) else {
        return Vec::new();
    };

    map.neighbors(&from.position)
        .into_iter()
        .filter_map(|position| {
            let new_tile = map.get(&position)?;
            let cost = decider.cost(unit, old_tile, new_tile, from.moves_left, from.turns)?;
            Some((
                PathStep {
                    position,
                    moves_left: cost.moves_left,
                    turns: from.turns + u32::from(cost.new_turn),
                },
                cost.cost,
            ))
        })
        .collect()
}

/// Heuristic for A* (grid distance * minimum cost).
fn heuristic(a: &Position, b: &Position) -> u32 {
    a.distance(b) // Minimum cost is 1
}

/// Reconstruct the path by following `came_from` links back to the start.
fn reconstruct_path(visits: &HashMap<Position, Visit>, goal: Position) -> Vec<PathStep> {
    let mut path = Vec::new();
    let mut current = Some(goal);

    while let Some(position) = current {
        let Some(visit) = visits.get(&position) else {
            break;
        };
        path.push(visit.step);
        current = visit.came_from;
    }

    path.reverse();
    path
}
