//! Units and the rules for moving them.

use crate::map::Tile;
use crate::movement::{MoveType, MovingUnit};
use crate::rules::Specification;
use crate::types::PlayerId;
use serde::{Deserialize, Serialize};

/// Movement points in one full move.
pub const MOVE_POINTS: u32 = 3;

/// Types of units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    // Land
    Colonist,
    Soldier,
    Dragoon,
    Scout,
    Pioneer,
    WagonTrain,
    Artillery,
    // Naval
    Caravel,
    Merchantman,
    Galleon,
    Privateer,
    Frigate,
}

impl UnitKind {
    /// Get all unit kinds.
    pub const fn all() -> &'static [UnitKind] {
        &[
            UnitKind::Colonist,
            UnitKind::Soldier,
            UnitKind::Dragoon,
            UnitKind::Scout,
            UnitKind::Pioneer,
            UnitKind::WagonTrain,
            UnitKind::Artillery,
            UnitKind::Caravel,
            UnitKind::Merchantman,
            UnitKind::Galleon,
            UnitKind::Privateer,
            UnitKind::Frigate,
        ]
    }

    /// Full moves per turn.
    pub const fn moves(&self) -> u32 {
        match self {
            UnitKind::Colonist
            | UnitKind::Soldier
            | UnitKind::Pioneer
            | UnitKind::Artillery => 1,
            UnitKind::WagonTrain => 2,
            UnitKind::Dragoon | UnitKind::Scout | UnitKind::Caravel => 4,
            UnitKind::Merchantman => 5,
            UnitKind::Galleon | UnitKind::Frigate => 6,
            UnitKind::Privateer => 8,
        }
    }

    pub const fn is_naval(&self) -> bool {
        matches!(
            self,
            UnitKind::Caravel
                | UnitKind::Merchantman
                | UnitKind::Galleon
                | UnitKind::Privateer
                | UnitKind::Frigate
        )
    }

    /// Movement points at the start of each turn.
    pub const fn initial_moves(&self) -> u32 {
        self.moves() * MOVE_POINTS
    }
}

/// A unit on the map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    /// Owning player.
    pub owner: PlayerId,
    pub kind: UnitKind,
    /// Remaining movement points this turn.
    pub moves_left: u32,
}

impl Unit {
    /// Create a unit with a full turn of movement.
    pub fn new(owner: PlayerId, kind: UnitKind) -> Self {
        Self {
            owner,
            kind,
            moves_left: kind.initial_moves(),
        }
    }

    /// Restore movement at the start of a turn.
    pub fn new_turn(&mut self) {
        self.moves_left = self.kind.initial_moves();
    }

    /// Bind the unit to a rule table so it can be moved.
    pub fn ruled<'a>(&'a self, spec: &'a Specification) -> RuledUnit<'a> {
        RuledUnit { unit: self, spec }
    }
}

/// A unit together with the rules giving its terrain costs.
#[derive(Clone, Copy, Debug)]
pub struct RuledUnit<'a> {
    pub unit: &'a Unit,
    pub spec: &'a Specification,
}

impl RuledUnit<'_> {
    /// Cost before any allowance for a short turn.
    fn base_cost(&self, from: &Tile, to: &Tile) -> u32 {
        if from.has_river() && to.has_river() {
            return 1;
        }
        self.spec.tile_type(to.tile_type()).basic_move_cost
    }
}

impl MovingUnit for RuledUnit<'_> {
    fn owner(&self) -> PlayerId {
        self.unit.owner
    }

    fn is_naval(&self) -> bool {
        self.unit.kind.is_naval()
    }

    fn initial_moves_left(&self) -> u32 {
        self.unit.kind.initial_moves()
    }

    fn moves_left(&self) -> u32 {
        self.unit.moves_left
    }

    /// A step costing more than the points left may still use them all up,
    /// if the unit is nearly fresh, nearly able to pay, or heading into a
    /// settlement.
    fn move_cost(&self, from: &Tile, to: &Tile, moves_left: u32) -> u32 {
        let cost = self.base_cost(from, to);
        if cost > moves_left
            && moves_left != 0
            && (moves_left + 2 >= self.initial_moves_left()
                || cost <= moves_left + 2
                || to.has_settlement())
        {
            return moves_left;
        }
        cost
    }

    fn move_type(&self, from: &Tile, to: &Tile, moves_left: u32, is_attack: bool) -> MoveType {
        if self.initial_moves_left() == 0 {
            return MoveType::MoveIllegal;
        }
        if !from.position.is_adjacent(&to.position) {
            return MoveType::MoveNoAccessBlocked;
        }
        if !to.explored {
            return MoveType::MoveNoTile;
        }

        let foreign = to.settlement_owner().is_some_and(|o| o != self.unit.owner);
        if self.is_naval() {
            if to.is_land() {
                return match to.settlement_owner() {
                    None => MoveType::MoveNoAccessLand,
                    Some(_) if foreign => MoveType::MoveNoAccessSettlement,
                    Some(_) => MoveType::Move,
                };
            }
        } else {
            if !to.is_land() {
                return MoveType::MoveNoAccessWater;
            }
            if foreign {
                return if is_attack {
                    MoveType::AttackSettlement
                } else {
                    MoveType::EnterForeignSettlement
                };
            }
        }

        if self.move_cost(from, to, moves_left) > moves_left {
            MoveType::MoveNextTurn
        } else if self.spec.tile_type(to.tile_type()).can_sail_to_europe {
            MoveType::MoveHighSeas
        } else {
            MoveType::Move
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Direction, Position};
    use crate::map::{RiverSection, RiverSize, Settlement};
    use crate::types::{RiverId, TileTypeId};

    fn tile(spec: &Specification, name: &str, x: i32) -> Tile {
        let id: TileTypeId = spec.tile_type_id(name).unwrap();
        Tile::with_type(Position::new(x, 0), id, spec.tile_type(id))
    }

    fn river() -> Option<RiverSection> {
        Some(RiverSection {
            river: RiverId(0),
            direction: Direction::E,
            size: RiverSize::Minor,
        })
    }

    #[test]
    fn test_unit_kinds() {
        for kind in UnitKind::all() {
            assert!(kind.initial_moves() >= MOVE_POINTS);
        }
        assert!(UnitKind::Galleon.is_naval());
        assert!(!UnitKind::Scout.is_naval());
        assert_eq!(UnitKind::Scout.initial_moves(), 12);
    }

    #[test]
    fn test_new_turn_restores_moves() {
        let mut unit = Unit::new(0, UnitKind::Dragoon);
        unit.moves_left = 1;
        unit.new_turn();
        assert_eq!(unit.moves_left, 12);
    }

    #[test]
    fn test_terrain_cost() {
        let spec = Specification::classic();
        let unit = Unit::new(0, UnitKind::Scout);
        let ruled = unit.ruled(&spec);
        let plains = tile(&spec, "plains", 0);
        let forest = tile(&spec, "mixed", 1);
        let mountains = tile(&spec, "mountains", 1);

        assert_eq!(ruled.move_cost(&plains, &forest, 12), 6);
        assert_eq!(ruled.move_cost(&plains, &mountains, 12), 9);
    }

    #[test]
    fn test_river_cost() {
        let spec = Specification::classic();
        let unit = Unit::new(0, UnitKind::Scout);
        let ruled = unit.ruled(&spec);
        let mut from = tile(&spec, "plains", 0);
        let mut to = tile(&spec, "mixed", 1);
        from.river = river();
        assert_eq!(ruled.move_cost(&from, &to, 12), 6);
        to.river = river();
        assert_eq!(ruled.move_cost(&from, &to, 12), 1);
    }

    #[test]
    fn test_short_turn_allowance() {
        let spec = Specification::classic();
        let from = tile(&spec, "plains", 0);
        let mut forest = tile(&spec, "mixed", 1);

        // A colonist with all of its points may always spend them.
        let colonist = Unit::new(0, UnitKind::Colonist);
        assert_eq!(colonist.ruled(&spec).move_cost(&from, &forest, 3), 3);

        // A scout with one point left cannot stretch it into a forest.
        let scout = Unit::new(0, UnitKind::Scout);
        assert_eq!(scout.ruled(&spec).move_cost(&from, &forest, 1), 6);
        // But it can with four left, being within two of the cost.
        assert_eq!(scout.ruled(&spec).move_cost(&from, &forest, 4), 4);
        // Or when a settlement waits there.
        forest.settlement = Some(Settlement { owner: 0 });
        assert_eq!(scout.ruled(&spec).move_cost(&from, &forest, 1), 1);
        // Never with nothing left.
        assert_eq!(scout.ruled(&spec).move_cost(&from, &forest, 0), 6);
    }

    #[test]
    fn test_land_unit_move_types() {
        let spec = Specification::classic();
        let unit = Unit::new(0, UnitKind::Scout);
        let ruled = unit.ruled(&spec);
        let from = tile(&spec, "plains", 0);

        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "plains", 1), 12, false),
            MoveType::Move
        );
        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "ocean", 1), 12, false),
            MoveType::MoveNoAccessWater
        );
        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "plains", 2), 12, false),
            MoveType::MoveNoAccessBlocked
        );
        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "mountains", 1), 1, false),
            MoveType::MoveNextTurn
        );

        let mut unexplored = tile(&spec, "plains", 1);
        unexplored.explored = false;
        assert_eq!(
            ruled.move_type(&from, &unexplored, 12, false),
            MoveType::MoveNoTile
        );

        let mut colony = tile(&spec, "plains", 1);
        colony.settlement = Some(Settlement { owner: 5 });
        assert_eq!(
            ruled.move_type(&from, &colony, 12, true),
            MoveType::AttackSettlement
        );
        assert_eq!(
            ruled.move_type(&from, &colony, 12, false),
            MoveType::EnterForeignSettlement
        );
    }

    #[test]
    fn test_naval_move_types() {
        let spec = Specification::classic();
        let unit = Unit::new(3, UnitKind::Caravel);
        let ruled = unit.ruled(&spec);
        let from = tile(&spec, "ocean", 0);

        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "ocean", 1), 12, false),
            MoveType::Move
        );
        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "high_seas", 1), 12, false),
            MoveType::MoveHighSeas
        );
        assert_eq!(
            ruled.move_type(&from, &tile(&spec, "plains", 1), 12, false),
            MoveType::MoveNoAccessLand
        );

        let mut port = tile(&spec, "plains", 1);
        port.settlement = Some(Settlement { owner: 3 });
        assert_eq!(ruled.move_type(&from, &port, 12, false), MoveType::Move);
        port.settlement = Some(Settlement { owner: 4 });
        assert_eq!(
            ruled.move_type(&from, &port, 12, false),
            MoveType::MoveNoAccessSettlement
        );
    }
}
