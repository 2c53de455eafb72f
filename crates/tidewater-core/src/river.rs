//! River growth.
//!
//! A `River` is built from a source tile and extended one cardinal step at a
//! time until it reaches water or runs into another river. Growth only reads
//! the map; `commit` writes the finished river into the tiles and the shared
//! `RiverMap`.

use crate::geometry::{Direction, DirectionChange, Position};
use crate::map::{Map, RiverSection, RiverSize};
use crate::rules::Specification;
use crate::types::RiverId;
use rand::Rng;
use std::collections::HashMap;

/// Positions claimed by rivers, shared across one generation pass.
pub type RiverMap = HashMap<Position, RiverId>;

/// One step of a river: the water leaves `position` heading `direction`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Section {
    pub position: Position,
    pub direction: Direction,
}

/// A river under construction.
#[derive(Clone, Debug)]
pub struct River {
    id: RiverId,
    direction: Direction,
    sections: Vec<Section>,
    /// Where this river joins another one, if it does.
    junction: Option<(Position, RiverId)>,
}

impl River {
    /// Start a river heading in `direction`.
    pub fn new(id: RiverId, direction: Direction) -> Self {
        Self {
            id,
            direction,
            sections: Vec::new(),
            junction: None,
        }
    }

    pub fn id(&self) -> RiverId {
        self.id
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Does the river pass through `pos`?
    pub fn contains(&self, pos: &Position) -> bool {
        self.sections.iter().any(|s| s.position == *pos)
    }

    /// Would `pos` touch this river anywhere but at `current`?
    fn is_next_to_self(&self, pos: &Position, current: &Position) -> bool {
        Direction::CARDINAL
            .iter()
            .map(|d| pos.adjacent(*d))
            .any(|p| p != *current && self.contains(&p))
    }

    /// Grow the river from `source` until it reaches water or another river.
    ///
    /// Returns false if the river got stuck; its sections are then
    /// meaningless and nothing should be committed.
    pub fn flow_from_source<R: Rng + ?Sized>(
        &mut self,
        map: &Map,
        spec: &Specification,
        rivers: &RiverMap,
        source: Position,
        rng: &mut R,
    ) -> bool {
        let mut current = source;

        loop {
            if self.sections.len() % 2 == 0 {
                self.direction = DirectionChange::random(rng).apply(self.direction);
            }

            let mut extended = false;
            for change in DirectionChange::ALL {
                let direction = change.apply(self.direction);
                let next = current.adjacent(direction);
                let Some(tile) = map.get(&next) else {
                    continue;
                };

                if !tile.is_land() {
                    self.sections.push(Section {
                        position: current,
                        direction,
                    });
                    return true;
                }
                if let Some(&other) = rivers.get(&next) {
                    self.sections.push(Section {
                        position: current,
                        direction,
                    });
                    self.junction = Some((next, other));
                    return true;
                }
                if !spec.tile_type(tile.tile_type()).can_have_river
                    || self.contains(&next)
                    || self.is_next_to_self(&next, &current)
                {
                    continue;
                }

                self.sections.push(Section {
                    position: current,
                    direction,
                });
                self.direction = direction;
                current = next;

                if let Some(mouth) = Self::water_direction(map, &current) {
                    self.sections.push(Section {
                        position: current,
                        direction: mouth,
                    });
                    return true;
                }
                extended = true;
                break;
            }

            if !extended {
                return false;
            }
        }
    }

    /// Direction of neighboring water, preferring cardinal directions.
    fn water_direction(map: &Map, pos: &Position) -> Option<Direction> {
        Direction::CARDINAL
            .iter()
            .chain(Direction::ALL.iter())
            .copied()
            .find(|d| map.adjacent_tile(pos, *d).is_some_and(|t| !t.is_land()))
    }

    /// Write the river into the map and claim its positions.
    ///
    /// A river joining another one promotes the other river to major from
    /// the junction down to its mouth.
    pub fn commit(self, map: &mut Map, rivers: &mut RiverMap) {
        for section in &self.sections {
            if let Some(tile) = map.get_mut(&section.position) {
                tile.river = Some(RiverSection {
                    river: self.id,
                    direction: section.direction,
                    size: RiverSize::Minor,
                });
            }
            rivers.insert(section.position, self.id);
        }

        if let Some((junction, other)) = self.junction {
            let mut pos = junction;
            for _ in 0..map.tile_count() {
                let Some(section) = map
                    .get_mut(&pos)
                    .and_then(|t| t.river.as_mut())
                    .filter(|s| s.river == other)
                else {
                    break;
                };
                section.size = RiverSize::Major;
                pos = pos.adjacent(section.direction);
            }
        }
    }
}
