//! Movement legality and per-step cost decisions.
//!
//! A path search asks a `CostDecider` about every candidate step. The
//! decider answers with a `StepCost`, or `None` when the step is illegal and
//! should be treated as a missing edge.

use crate::map::Tile;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Sentinel cost for an illegal step, for callers that want a plain number.
pub const ILLEGAL_MOVE: u32 = u32::MAX;

/// Outcome of trying to move a unit onto an adjacent tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveType {
    /// Ordinary move.
    Move,
    /// Move onto high seas, from where the unit may sail off-map.
    MoveHighSeas,
    /// Move that has to wait for the next turn.
    MoveNextTurn,
    /// Enter another player's settlement (trade, negotiate).
    EnterForeignSettlement,
    /// Attack another player's settlement.
    AttackSettlement,
    /// Destination has not been explored.
    MoveNoTile,
    /// Naval unit trying to move onto land.
    MoveNoAccessLand,
    /// Land unit trying to move onto water.
    MoveNoAccessWater,
    /// Settlement does not allow this unit in.
    MoveNoAccessSettlement,
    /// Destination is the unit's own tile or not adjacent.
    MoveNoAccessBlocked,
    /// Any other illegal move.
    MoveIllegal,
}

impl MoveType {
    /// Get all move types.
    pub const fn all() -> &'static [MoveType] {
        &[
            MoveType::Move,
            MoveType::MoveHighSeas,
            MoveType::MoveNextTurn,
            MoveType::EnterForeignSettlement,
            MoveType::AttackSettlement,
            MoveType::MoveNoTile,
            MoveType::MoveNoAccessLand,
            MoveType::MoveNoAccessWater,
            MoveType::MoveNoAccessSettlement,
            MoveType::MoveNoAccessBlocked,
            MoveType::MoveIllegal,
        ]
    }

    /// Can the move be carried out?
    pub const fn is_legal(&self) -> bool {
        self.reason().is_none()
    }

    /// Does the unit actually change tiles?
    pub const fn is_progress(&self) -> bool {
        matches!(
            self,
            MoveType::Move | MoveType::MoveHighSeas | MoveType::MoveNextTurn
        )
    }

    /// Why an illegal move is illegal.
    pub const fn reason(&self) -> Option<&'static str> {
        match self {
            MoveType::Move
            | MoveType::MoveHighSeas
            | MoveType::MoveNextTurn
            | MoveType::EnterForeignSettlement
            | MoveType::AttackSettlement => None,
            MoveType::MoveNoTile => Some("destination is unexplored"),
            MoveType::MoveNoAccessLand => Some("ships cannot move onto land"),
            MoveType::MoveNoAccessWater => Some("land units cannot move onto water"),
            MoveType::MoveNoAccessSettlement => Some("settlement refuses entry"),
            MoveType::MoveNoAccessBlocked => Some("destination is blocked"),
            MoveType::MoveIllegal => Some("illegal move"),
        }
    }
}

/// What a cost decider needs to know about a moving unit.
pub trait MovingUnit {
    fn owner(&self) -> PlayerId;

    fn is_naval(&self) -> bool;

    /// Movement points at the start of a turn.
    fn initial_moves_left(&self) -> u32;

    /// Movement points left right now.
    fn moves_left(&self) -> u32;

    /// Points needed to step from `from` to `to` with `moves_left` points.
    fn move_cost(&self, from: &Tile, to: &Tile, moves_left: u32) -> u32;

    /// Classify a step from `from` to `to`.
    fn move_type(&self, from: &Tile, to: &Tile, moves_left: u32, is_attack: bool) -> MoveType;
}

/// The price of a legal step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepCost {
    /// Points charged for the step, including any points forfeited by
    /// ending the turn early.
    pub cost: u32,
    /// Points left after the step.
    pub moves_left: u32,
    /// Did the step roll over into a new turn?
    pub new_turn: bool,
}

impl StepCost {
    /// Collapse a decision into a cost, with `ILLEGAL_MOVE` for `None`.
    pub fn raw_cost(step: Option<StepCost>) -> u32 {
        step.map_or(ILLEGAL_MOVE, |s| s.cost)
    }
}

/// Decides the cost of single steps during a path search.
pub trait CostDecider {
    /// Cost of moving `unit` from `old_tile` to `new_tile` with
    /// `moves_left_before` points, `turns` turns into the path.
    ///
    /// Returns `None` for an illegal step. The base decider ignores `turns`;
    /// deciders wrapping it may use it to limit or weigh later turns.
    fn cost(
        &self,
        unit: &dyn MovingUnit,
        old_tile: &Tile,
        new_tile: &Tile,
        moves_left_before: u32,
        turns: u32,
    ) -> Option<StepCost>;
}

/// The standard cost decider.
///
/// Refuses unexplored tiles and other players' settlements, keeps ships off
/// land outside their owner's settlements, and rolls a step over into the
/// next turn when the unit has too few points left.
#[derive(Clone, Copy, Debug, Default)]
pub struct BaseCostDecider;

impl CostDecider for BaseCostDecider {
    fn cost(
        &self,
        unit: &dyn MovingUnit,
        old_tile: &Tile,
        new_tile: &Tile,
        moves_left_before: u32,
        _turns: u32,
    ) -> Option<StepCost> {
        if !new_tile.explored {
            return None;
        }

        let owner = unit.owner();
        let settlement_owner = new_tile.settlement_owner();
        if new_tile.is_land() && unit.is_naval() && settlement_owner != Some(owner) {
            return None;
        }
        if settlement_owner.is_some_and(|o| o != owner) {
            return None;
        }

        let cost = unit.move_cost(old_tile, new_tile, moves_left_before);
        let step = if cost <= moves_left_before {
            StepCost {
                cost,
                moves_left: moves_left_before - cost,
                new_turn: false,
            }
        } else {
            let initial = unit.initial_moves_left();
            let new_cost = unit.move_cost(old_tile, new_tile, initial);
            StepCost {
                cost: moves_left_before.saturating_add(new_cost),
                moves_left: initial.saturating_sub(new_cost),
                new_turn: true,
            }
        };

        // Only a legal move type lets the step through.
        unit.move_type(old_tile, new_tile, moves_left_before, true)
            .is_legal()
            .then_some(step)
    }
}
