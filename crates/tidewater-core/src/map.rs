//! Game map structure with tiles and spatial queries.

use crate::geometry::{Direction, Position};
use crate::rules::{Specification, TileType};
use crate::types::{PlayerId, ResourceTypeId, RiverId, TileTypeId};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The game map: a fixed rectangle of tiles.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Map {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Tiles in row-major order.
    tiles: Vec<Tile>,
}

impl Map {
    /// Create a map filled with a single tile type.
    pub fn filled(width: u32, height: u32, tile_type: TileTypeId, spec: &Specification) -> Self {
        let land = spec.tile_type(tile_type).is_land();
        let mut tiles = Vec::with_capacity((width * height) as usize);
        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let mut tile = Tile::new(Position::new(x, y), tile_type, land);
                tile.explored = true;
                tiles.push(tile);
            }
        }
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Build a map from tiles already laid out in row-major order.
    pub(crate) fn from_tiles(width: u32, height: u32, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), (width * height) as usize);
        Self {
            width,
            height,
            tiles,
        }
    }

    /// Check if a position is within the map bounds.
    pub fn is_valid(&self, pos: &Position) -> bool {
        pos.in_bounds(self.width, self.height)
    }

    fn index(&self, pos: &Position) -> Option<usize> {
        if self.is_valid(pos) {
            Some(pos.y as usize * self.width as usize + pos.x as usize)
        } else {
            None
        }
    }

    /// Get the tile at a position.
    pub fn get(&self, pos: &Position) -> Option<&Tile> {
        self.index(pos).and_then(|i| self.tiles.get(i))
    }

    /// Get a mutable reference to a tile.
    pub fn get_mut(&mut self, pos: &Position) -> Option<&mut Tile> {
        self.index(pos).and_then(|i| self.tiles.get_mut(i))
    }

    /// Check a map that did not come from the generator, such as one loaded
    /// from JSON, against the rules it claims to use.
    pub fn validate(&self, spec: &Specification) -> Result<(), MapError> {
        let expected = self.width as usize * self.height as usize;
        if self.tiles.len() != expected {
            return Err(MapError::TileCount {
                found: self.tiles.len(),
                expected,
            });
        }

        let positions = (0..self.height as i32)
            .flat_map(|y| (0..self.width as i32).map(move |x| Position::new(x, y)));
        for (tile, position) in self.tiles.iter().zip(positions) {
            if tile.position != position {
                return Err(MapError::Misplaced {
                    found: tile.position,
                    expected: position,
                });
            }
            let tile_type = spec
                .try_tile_type(tile.tile_type)
                .ok_or(MapError::UnknownTileType(position))?;
            if tile.land != tile_type.is_land() {
                return Err(MapError::LandMismatch(position));
            }
            if let Some(resource) = tile.resource {
                spec.try_resource_type(resource.resource_type)
                    .ok_or(MapError::UnknownResource(position))?;
            }
        }
        Ok(())
    }

    /// Get valid neighbors of a position, in `Direction::ALL` order.
    pub fn neighbors(&self, pos: &Position) -> Vec<Position> {
        pos.neighbors()
            .into_iter()
            .filter(|p| self.is_valid(p))
            .collect()
    }

    /// Get the neighboring tile in a direction, if it exists.
    pub fn adjacent_tile(&self, pos: &Position, direction: Direction) -> Option<&Tile> {
        self.get(&pos.adjacent(direction))
    }

    /// Count total tiles in the map.
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Iterate over all tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterate over all tiles mutably in row-major order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.tiles.iter_mut()
    }

    /// Is there land at the position or within `distance` steps of it?
    pub fn is_land_within_distance(&self, pos: &Position, distance: u32) -> bool {
        pos.square(distance)
            .iter()
            .filter_map(|p| self.get(p))
            .any(|t| t.is_land())
    }

    /// Does any neighbor hold water?
    pub fn is_next_to_water(&self, pos: &Position) -> bool {
        pos.neighbors()
            .iter()
            .filter_map(|p| self.get(p))
            .any(|t| !t.is_land())
    }

    /// Pick a land position uniformly, or `None` if there is no land.
    pub fn random_land_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        let land: Vec<Position> = self
            .tiles
            .iter()
            .filter(|t| t.is_land())
            .map(|t| t.position)
            .collect();

        if land.is_empty() {
            return None;
        }
        Some(land[rng.gen_range(0..land.len())])
    }

    /// Count tiles of the given type.
    pub fn count_tiles_of_type(&self, tile_type: TileTypeId) -> usize {
        self.tiles
            .iter()
            .filter(|t| t.tile_type == tile_type)
            .count()
    }

    /// Count land tiles.
    pub fn land_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_land()).count()
    }
}

/// Problems with a map that was not built by the generator.
#[derive(Debug, Error)]
pub enum MapError {
    #[error("map has {found} tiles, expected {expected}")]
    TileCount { found: usize, expected: usize },
    #[error("tile at {found} is stored where {expected} belongs")]
    Misplaced { found: Position, expected: Position },
    #[error("tile at {0} has a type the rules do not define")]
    UnknownTileType(Position),
    #[error("tile at {0} disagrees with its type about being land")]
    LandMismatch(Position),
    #[error("tile at {0} carries a resource the rules do not define")]
    UnknownResource(Position),
    #[error("invalid map JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A bonus resource deposit on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_type: ResourceTypeId,
    /// Units left; `None` never runs out.
    pub quantity: Option<u32>,
}

/// River size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiverSize {
    #[default]
    Minor,
    Major,
}

/// The part of a river crossing one tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiverSection {
    pub river: RiverId,
    /// Direction the water leaves this tile.
    pub direction: Direction,
    pub size: RiverSize,
}

/// A settlement occupying a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub owner: PlayerId,
}

/// A single tile on the map.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    /// Position on the map; never changes.
    pub position: Position,
    tile_type: TileTypeId,
    /// Mirrors the tile type's land flag.
    land: bool,
    /// Optional bonus resource.
    pub resource: Option<Resource>,
    /// River crossing this tile.
    pub river: Option<RiverSection>,
    /// Settlement on this tile.
    pub settlement: Option<Settlement>,
    /// Has the terrain been revealed?
    pub explored: bool,
}

impl Tile {
    fn new(position: Position, tile_type: TileTypeId, land: bool) -> Self {
        Self {
            position,
            tile_type,
            land,
            resource: None,
            river: None,
            settlement: None,
            explored: false,
        }
    }

    /// Create an explored tile of the given type.
    pub fn with_type(position: Position, id: TileTypeId, tile_type: &TileType) -> Self {
        let mut tile = Self::new(position, id, tile_type.is_land());
        tile.explored = true;
        tile
    }

    pub fn tile_type(&self) -> TileTypeId {
        self.tile_type
    }

    /// Change the tile type, keeping the land flag in sync.
    pub fn set_type(&mut self, id: TileTypeId, tile_type: &TileType) {
        self.tile_type = id;
        self.land = tile_type.is_land();
    }

    pub fn is_land(&self) -> bool {
        self.land
    }

    pub fn has_river(&self) -> bool {
        self.river.is_some()
    }

    pub fn has_settlement(&self) -> bool {
        self.settlement.is_some()
    }

    /// Owner of the settlement here, if any.
    pub fn settlement_owner(&self) -> Option<PlayerId> {
        self.settlement.map(|s| s.owner)
    }
}
