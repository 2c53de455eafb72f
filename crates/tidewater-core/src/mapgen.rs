//! Terrain generation from a land mask.
//!
//! The generator uses a seed to create reproducible maps: the same seed,
//! rule table, options and mask always produce the same tiles. Every random
//! draw comes from one ChaCha stream, so the stage order below is part of
//! the output:
//!
//! 1. base tiles (climate-picked land types, ocean, bonus resources)
//! 2. high seas along the east and west edges
//! 3. mountain ranges, then scattered hills
//! 4. rivers
//!
//! Stages 2-4 are skipped when terrain is imported from another map.

use crate::climate::{latitude_percent, LandTypeChooser};
use crate::game::{Game, MapSummary};
use crate::geometry::{Direction, Position};
use crate::land::{LandMask, LandMaskError};
use crate::map::{Map, MapError, Resource, Tile};
use crate::river::{River, RiverMap};
use crate::rules::{RulesError, Specification, TerrainRoles};
use crate::settings::{MapGeneratorOptions, OptionsError};
use crate::types::{RiverId, TileTypeId};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Attempts at starting a mountain range.
const MOUNTAIN_ATTEMPTS: u32 = 100;
/// Attempts at placing a scattered hill.
const HILL_ATTEMPTS: u32 = 1000;
/// Attempts at finding a source for each river.
const RIVER_ATTEMPTS: u32 = 100;
/// River sources need all land within this radius.
const RIVER_SOURCE_RADIUS: u32 = 2;

/// Fatal generation failures.
///
/// Falling short on mountains or rivers is not an error; it is logged.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("invalid land mask: {0}")]
    InvalidLandMask(#[from] LandMaskError),
    #[error(transparent)]
    Rules(#[from] RulesError),
    #[error(transparent)]
    Options(#[from] OptionsError),
    #[error("cannot import map: {0}")]
    InvalidImport(#[from] MapError),
}

/// Generates typed terrain from a land mask.
pub struct TerrainGenerator {
    rng: ChaCha8Rng,
    options: MapGeneratorOptions,
}

impl TerrainGenerator {
    /// Create a terrain generator with the given seed and options.
    pub fn new(seed: [u8; 32], options: MapGeneratorOptions) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(seed),
            options,
        }
    }

    pub fn options(&self) -> &MapGeneratorOptions {
        &self.options
    }

    /// Build a map shaped like `mask` and attach it to `game`.
    ///
    /// With terrain import enabled, tiles are copied from `import`'s map
    /// where it agrees with the mask (or everywhere, with `land_map` set).
    pub fn create_map(
        &mut self,
        game: &mut Game,
        import: Option<&Game>,
        mask: &LandMask,
    ) -> Result<(), GenerationError> {
        if mask.is_empty() {
            return Err(LandMaskError::Empty.into());
        }
        self.options.validate()?;

        let spec = Arc::clone(&game.specification);
        let roles = spec.terrain_roles()?;
        let source = if self.options.import.terrain {
            import.and_then(|g| g.map.as_ref().map(|m| (g.specification.as_ref(), m)))
        } else {
            None
        };
        if let Some((source_spec, source_map)) = source {
            source_map.validate(source_spec)?;
        }

        let mut map = self.create_base_tiles(&spec, &roles, source, mask)?;
        info!(
            width = map.width,
            height = map.height,
            land = map.land_count(),
            imported = source.is_some(),
            "created base tiles"
        );

        if source.is_none() {
            self.create_high_seas(&mut map, &spec, &roles);
            self.create_mountains(&mut map, &spec, &roles);
            self.create_rivers(&mut map, &spec);
        }

        debug!(summary = ?MapSummary::of(&map), "generated map");
        game.map = Some(map);
        Ok(())
    }

    fn create_base_tiles(
        &mut self,
        spec: &Specification,
        roles: &TerrainRoles,
        source: Option<(&Specification, &Map)>,
        mask: &LandMask,
    ) -> Result<Map, GenerationError> {
        let (width, height) = (mask.width(), mask.height());
        let forest_chance = self.options.forest_percentage;
        let mut chooser = LandTypeChooser::new(spec);
        let mut tiles = Vec::with_capacity((width * height) as usize);

        for y in 0..height as i32 {
            for x in 0..width as i32 {
                let pos = Position::new(x, y);
                let land = mask.is_land(&pos);

                let tile = match source.and_then(|(s, m)| self.importable(spec, s, m, &pos, land)) {
                    Some((id, resource)) => {
                        let mut tile = Tile::with_type(pos, id, spec.tile_type(id));
                        if self.options.import.bonuses {
                            tile.resource = resource;
                        } else {
                            self.perhaps_add_bonus(&mut tile, spec, mask);
                        }
                        tile
                    }
                    None => {
                        let id = if land {
                            chooser.choose(
                                &mut self.rng,
                                latitude_percent(y, height),
                                forest_chance,
                            )?
                        } else {
                            roles.ocean
                        };
                        let mut tile = Tile::with_type(pos, id, spec.tile_type(id));
                        self.perhaps_add_bonus(&mut tile, spec, mask);
                        tile
                    }
                };
                tiles.push(tile);
            }
        }

        Ok(Map::from_tiles(width, height, tiles))
    }

    /// The imported tile type and resource at `pos`, translated into `spec`.
    ///
    /// `None` when the tile should be generated fresh instead.
    fn importable(
        &self,
        spec: &Specification,
        source_spec: &Specification,
        source: &Map,
        pos: &Position,
        land: bool,
    ) -> Option<(TileTypeId, Option<Resource>)> {
        let tile = source.get(pos)?;
        if !self.options.import.land_map && tile.is_land() != land {
            return None;
        }

        let id = spec.tile_type_id(&source_spec.try_tile_type(tile.tile_type())?.id)?;
        let resource = tile.resource.and_then(|r| {
            let name = &source_spec.try_resource_type(r.resource_type)?.id;
            spec.resource_type_id(name).map(|resource_type| Resource {
                resource_type,
                quantity: r.quantity,
            })
        });
        Some((id, resource))
    }

    /// Maybe give a tile a bonus resource.
    ///
    /// Land rolls against the bonus percentage. Water only gets a bonus near
    /// land, more likely the more land neighbors it has.
    fn perhaps_add_bonus(&mut self, tile: &mut Tile, spec: &Specification, mask: &LandMask) {
        if tile.is_land() {
            if self.rng.gen_range(0..100) < self.options.bonus_percentage {
                tile.resource = self.random_resource(spec, tile.tile_type());
            }
        } else if self.options.bonus_percentage > 0 {
            let adjacent_land = mask.adjacent_land_count(&tile.position);
            if adjacent_land > 1 && self.rng.gen_range(0..10 - adjacent_land) == 0 {
                tile.resource = self.random_resource(spec, tile.tile_type());
            }
        }
    }

    /// Weighted pick among the resources a tile type can carry.
    fn random_resource(&mut self, spec: &Specification, id: TileTypeId) -> Option<Resource> {
        let chances = spec.resource_chances(id);
        let total: u32 = chances.iter().map(|(_, p)| p).sum();
        if total == 0 {
            return None;
        }

        let mut roll = self.rng.gen_range(0..total);
        for &(resource_type, probability) in chances {
            if roll < probability {
                return Some(Resource {
                    resource_type,
                    quantity: spec.resource_type(resource_type).max_quantity,
                });
            }
            roll -= probability;
        }
        None
    }

    fn create_high_seas(&self, map: &mut Map, spec: &Specification, roles: &TerrainRoles) {
        let high_seas = &self.options.high_seas;
        let converted = Self::determine_high_seas(
            map,
            spec,
            roles,
            high_seas.distance_to_land as u32,
            high_seas.max_distance_to_edge as u32,
        );
        debug!(converted, "placed high seas");
    }

    /// Mark the high-seas bands along the east and west edges.
    ///
    /// Existing high seas are turned back into ocean first, so this can be
    /// rerun after the map changes. Scanning inward from each edge, a row's
    /// band stops at the first tile with land within `distance_to_land`, or
    /// after `max_distance_to_edge` columns. Returns the number of high-seas
    /// tiles.
    pub fn determine_high_seas(
        map: &mut Map,
        spec: &Specification,
        roles: &TerrainRoles,
        distance_to_land: u32,
        max_distance_to_edge: u32,
    ) -> usize {
        let ocean = spec.tile_type(roles.ocean);
        let high_seas = spec.tile_type(roles.high_seas);

        for tile in map.iter_mut() {
            if tile.tile_type() == roles.high_seas {
                tile.set_type(roles.ocean, ocean);
            }
        }

        let width = map.width as i32;
        let band = max_distance_to_edge.min(map.width) as i32;
        let mut converted = 0;

        for y in 0..map.height as i32 {
            let west = (0..band).map(|i| Position::new(i, y));
            let east = (0..band).map(|i| Position::new(width - 1 - i, y));
            for edge in [west.collect::<Vec<_>>(), east.collect::<Vec<_>>()] {
                for pos in edge {
                    if map.is_land_within_distance(&pos, distance_to_land) {
                        break;
                    }
                    if let Some(tile) = map.get_mut(&pos) {
                        if tile.tile_type() != roles.high_seas {
                            tile.set_type(roles.high_seas, high_seas);
                            tile.resource = None;
                            converted += 1;
                        }
                    }
                }
            }
        }

        converted
    }

    /// Grow mountain ranges, then scatter hills.
    fn create_mountains(&mut self, map: &mut Map, spec: &Specification, roles: &TerrainRoles) {
        let max_length = (map.width.max(map.height) / 10).max(1);
        let range_target = self.options.mountain_tile_count / 2;
        let mut placed = 0u32;

        for _ in 0..MOUNTAIN_ATTEMPTS {
            if placed >= range_target {
                break;
            }
            let Some(start) = map.random_land_position(&mut self.rng) else {
                break;
            };
            if Self::is_mountain_or_next_to_one(map, &start, roles) {
                continue;
            }

            let direction = Direction::random(&mut self.rng);
            let length = max_length - self.rng.gen_range(0..=max_length / 2);
            let (grown, stranded) = self.grow_range(map, spec, roles, start, direction, length);
            placed += grown;
            // A range that runs off the map or into water ends range building.
            if stranded {
                debug!(%start, ?direction, "mountain range ran out of land");
                break;
            }
        }
        info!(placed, target = range_target, "placed mountain ranges");
        if placed < range_target {
            warn!(placed, target = range_target, "mountain ranges fell short");
        }

        let hill_target = self.options.mountain_tile_count - range_target;
        let mut hills = 0u32;
        for _ in 0..HILL_ATTEMPTS {
            if hills >= hill_target {
                break;
            }
            let Some(pos) = map.random_land_position(&mut self.rng) else {
                break;
            };
            let Some(tile) = map.get(&pos) else {
                continue;
            };
            if tile.tile_type() == roles.hills
                || Self::is_mountain_or_next_to_one(map, &pos, roles)
            {
                continue;
            }

            let id = if self.rng.gen_range(0..4) == 0 {
                roles.mountains
            } else {
                roles.hills
            };
            if let Some(tile) = map.get_mut(&pos) {
                retype(tile, id, spec);
            }
            hills += 1;
        }
        info!(hills, target = hill_target, "scattered hills");
    }

    /// Walk one range, returning the number of new mountain tiles and
    /// whether the walk stepped off the map or onto water.
    fn grow_range(
        &mut self,
        map: &mut Map,
        spec: &Specification,
        roles: &TerrainRoles,
        start: Position,
        direction: Direction,
        length: u32,
    ) -> (u32, bool) {
        let mut placed = 0;
        let mut pos = start;

        for _ in 0..length {
            let Some(tile) = map.get_mut(&pos).filter(|t| t.is_land()) else {
                return (placed, true);
            };
            if tile.tile_type() != roles.mountains {
                retype(tile, roles.mountains, spec);
                placed += 1;
            }

            for neighbor in map.neighbors(&pos) {
                let Some(tile) = map
                    .get_mut(&neighbor)
                    .filter(|t| t.is_land() && t.tile_type() != roles.mountains)
                else {
                    continue;
                };
                if self.rng.gen_range(0..8) == 0 {
                    retype(tile, roles.mountains, spec);
                    placed += 1;
                } else if self.rng.gen_range(0..8) > 2 {
                    retype(tile, roles.hills, spec);
                }
            }

            pos = pos.adjacent(direction);
        }

        (placed, false)
    }

    fn is_mountain_or_next_to_one(map: &Map, pos: &Position, roles: &TerrainRoles) -> bool {
        std::iter::once(*pos)
            .chain(pos.neighbors())
            .filter_map(|p| map.get(&p))
            .any(|t| t.tile_type() == roles.mountains)
    }

    /// Carve the requested rivers, returning the number of sections
    /// committed.
    fn create_rivers(&mut self, map: &mut Map, spec: &Specification) -> usize {
        let requested = self.options.river_count;
        let mut rivers = RiverMap::new();
        let mut created = 0u32;
        let mut sections = 0usize;

        for index in 0..requested {
            for attempt in 0..RIVER_ATTEMPTS {
                let Some(source) = map.random_land_position(&mut self.rng) else {
                    break;
                };
                if !Self::is_river_source(map, spec, &rivers, &source) {
                    continue;
                }

                let mut river = River::new(RiverId(index), Direction::random_cardinal(&mut self.rng));
                if river.flow_from_source(map, spec, &rivers, source, &mut self.rng) {
                    debug!(river = index, %source, length = river.len(), "created river");
                    sections += river.len();
                    river.commit(map, &mut rivers);
                    created += 1;
                    break;
                }
                debug!(river = index, attempt, %source, "river got stuck");
            }
        }

        info!(created, requested, sections, "created rivers");
        if created < requested {
            warn!(created, requested, "fewer rivers than requested");
        }
        sections
    }

    fn is_river_source(
        map: &Map,
        spec: &Specification,
        rivers: &RiverMap,
        pos: &Position,
    ) -> bool {
        !rivers.contains_key(pos)
            && map
                .get(pos)
                .is_some_and(|t| spec.tile_type(t.tile_type()).can_have_river)
            && pos
                .square(RIVER_SOURCE_RADIUS)
                .iter()
                .all(|p| map.get(p).is_some_and(Tile::is_land))
    }
}

/// Change a tile's type, dropping a resource the new type cannot carry.
fn retype(tile: &mut Tile, id: TileTypeId, spec: &Specification) {
    tile.set_type(id, spec.tile_type(id));
    if let Some(resource) = tile.resource {
        if !spec
            .resource_chances(id)
            .iter()
            .any(|(r, _)| *r == resource.resource_type)
        {
            tile.resource = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{HighSeasOptions, ImportOptions};

    fn options(width: u32, height: u32) -> MapGeneratorOptions {
        MapGeneratorOptions {
            width,
            height,
            mountain_tile_count: 0,
            river_count: 0,
            ..Default::default()
        }
    }

    fn island(width: u32, height: u32, margin: i32) -> LandMask {
        let mut mask = LandMask::new(width, height);
        for y in margin..height as i32 - margin {
            for x in margin..width as i32 - margin {
                mask.set(&Position::new(x, y), true);
            }
        }
        mask
    }

    fn generate(seed: u8, options: MapGeneratorOptions, mask: &LandMask) -> Map {
        let mut game = Game::classic();
        TerrainGenerator::new([seed; 32], options)
            .create_map(&mut game, None, mask)
            .unwrap();
        game.map.unwrap()
    }

    #[test]
    fn test_generation_determinism() {
        let mask = island(30, 30, 3);
        let mut opts = options(30, 30);
        opts.mountain_tile_count = 40;
        opts.river_count = 3;

        let map1 = generate(123, opts.clone(), &mask);
        let map2 = generate(123, opts.clone(), &mask);
        assert_eq!(map1, map2);

        let map3 = generate(124, opts, &mask);
        assert_ne!(map1, map3);
    }

    #[test]
    fn test_map_follows_mask() {
        let mask = island(20, 16, 4);
        let map = generate(1, options(20, 16), &mask);

        assert_eq!((map.width, map.height), (20, 16));
        for tile in map.iter() {
            assert_eq!(tile.is_land(), mask.is_land(&tile.position));
            assert!(tile.explored);
        }
    }

    #[test]
    fn test_empty_mask_rejected() {
        let mut game = Game::classic();
        let mut generator = TerrainGenerator::new([0; 32], options(1, 1));
        let mask = LandMask::new(0, 0);
        assert!(matches!(
            generator.create_map(&mut game, None, &mask),
            Err(GenerationError::InvalidLandMask(LandMaskError::Empty))
        ));
        assert!(game.map.is_none());
    }

    #[test]
    fn test_missing_role_rejected() {
        use crate::rules::TileType;

        let spec = Specification::new(
            vec![TileType::water("ocean"), TileType::land("plains", 3)],
            vec![],
        )
        .unwrap();
        let mut game = Game::new(Arc::new(spec));
        let mut generator = TerrainGenerator::new([0; 32], options(4, 4));
        let result = generator.create_map(&mut game, None, &island(4, 4, 1));
        assert!(matches!(result, Err(GenerationError::Rules(_))));
    }

    #[test]
    fn test_invalid_options_rejected() {
        let mut opts = options(10, 10);
        opts.bonus_percentage = 150;
        let mut game = Game::classic();
        let result =
            TerrainGenerator::new([0; 32], opts).create_map(&mut game, None, &island(10, 10, 2));
        assert!(matches!(result, Err(GenerationError::Options(_))));
    }

    #[test]
    fn test_bonus_percentage_full() {
        let mut opts = options(12, 12);
        opts.bonus_percentage = 100;
        let map = generate(5, opts, &island(12, 12, 2));

        // Every classic climate type lists at least one resource.
        for tile in map.iter().filter(|t| t.is_land()) {
            assert!(tile.resource.is_some());
        }
    }

    #[test]
    fn test_high_seas_bands() {
        let mut opts = options(30, 10);
        opts.high_seas = HighSeasOptions {
            distance_to_land: 2,
            max_distance_to_edge: 5,
        };
        let mut mask = LandMask::new(30, 10);
        for y in 3..7 {
            for x in 10..20 {
                mask.set(&Position::new(x, y), true);
            }
        }
        let map = generate(9, opts, &mask);
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();

        for y in 0..10 {
            for x in 0..30 {
                let pos = Position::new(x, y);
                let is_high_seas = map.get(&pos).unwrap().tile_type() == roles.high_seas;
                // Land occupies x 10..20, so columns 0..5 and 25..30 are
                // far enough from it.
                assert_eq!(is_high_seas, x < 5 || x >= 25, "at {}", pos);
            }
        }
    }

    #[test]
    fn test_determine_high_seas_resets() {
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();
        let mut map = Map::filled(10, 3, roles.high_seas, &spec);

        let converted = TerrainGenerator::determine_high_seas(&mut map, &spec, &roles, 1, 2);
        assert_eq!(converted, 12);
        assert_eq!(map.count_tiles_of_type(roles.high_seas), 12);
        assert_eq!(map.count_tiles_of_type(roles.ocean), 18);
    }

    #[test]
    fn test_mountains_placed() {
        let mut opts = options(40, 40);
        opts.mountain_tile_count = 60;
        let map = generate(17, opts, &island(40, 40, 2));
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();

        assert!(map.count_tiles_of_type(roles.mountains) > 0);
        assert!(map.count_tiles_of_type(roles.hills) > 0);
        // Mountain growth never touches water.
        assert_eq!(map.land_count(), island(40, 40, 2).land_count());
    }

    #[test]
    fn test_stranded_range_stops_range_building() {
        // Single-tile islands: every range walk reaches water on its
        // second step.
        let mut mask = LandMask::new(40, 40);
        for y in (1..40).step_by(2) {
            for x in (1..40).step_by(2) {
                mask.set(&Position::new(x, y), true);
            }
        }
        let mut opts = options(40, 40);
        opts.mountain_tile_count = 20;
        let map = generate(31, opts, &mask);
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();

        // One range tile, then the ten scattered hills or mountains.
        let raised =
            map.count_tiles_of_type(roles.mountains) + map.count_tiles_of_type(roles.hills);
        assert_eq!(raised, 11);
    }

    #[test]
    fn test_import_rejects_malformed_map() {
        let spec = Arc::new(Specification::classic());
        let plains = spec.tile_type_id("plains").unwrap();
        let mut broken = Map::filled(2, 2, plains, &spec);
        broken.width = 3;
        broken.height = 3;
        let import = Game::with_map(Arc::clone(&spec), broken);

        let mut opts = options(3, 3);
        opts.import.terrain = true;
        let mut game = Game::new(spec);
        let result = TerrainGenerator::new([1; 32], opts).create_map(
            &mut game,
            Some(&import),
            &island(3, 3, 1),
        );
        assert!(matches!(
            result,
            Err(GenerationError::InvalidImport(MapError::TileCount { .. }))
        ));
        assert!(game.map.is_none());
    }

    #[test]
    fn test_river_sections_each_own_a_tile() {
        let mask = island(40, 40, 2);
        let mut opts = options(40, 40);
        opts.river_count = 10;
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();

        let mut generator = TerrainGenerator::new([41; 32], opts);
        let mut map = generator
            .create_base_tiles(&spec, &roles, None, &mask)
            .unwrap();
        let sections = generator.create_rivers(&mut map, &spec);

        // Two rivers sharing a tile would leave fewer river tiles than
        // committed sections.
        assert!(sections > 0);
        assert_eq!(map.iter().filter(|t| t.has_river()).count(), sections);
    }

    #[test]
    fn test_rivers_created() {
        let mut opts = options(40, 40);
        opts.river_count = 4;
        let map = generate(21, opts, &island(40, 40, 2));

        let river_tiles: Vec<&Tile> = map.iter().filter(|t| t.has_river()).collect();
        assert!(!river_tiles.is_empty());
        for tile in river_tiles {
            assert!(tile.is_land());
        }
    }

    #[test]
    fn test_import_terrain() {
        let mask = island(16, 16, 3);
        let first = generate(2, options(16, 16), &mask);
        let spec = Arc::new(Specification::classic());
        let import = Game::with_map(Arc::clone(&spec), first.clone());

        let mut opts = options(16, 16);
        opts.import = ImportOptions {
            terrain: true,
            bonuses: true,
            land_map: false,
        };
        opts.mountain_tile_count = 50;
        let mut game = Game::new(spec);
        TerrainGenerator::new([77; 32], opts)
            .create_map(&mut game, Some(&import), &mask)
            .unwrap();
        let map = game.map.unwrap();

        for tile in map.iter() {
            let original = first.get(&tile.position).unwrap();
            assert_eq!(tile.tile_type(), original.tile_type());
            assert_eq!(tile.resource, original.resource);
        }
    }

    #[test]
    fn test_import_respects_mask() {
        let spec = Arc::new(Specification::classic());
        let plains = spec.tile_type_id("plains").unwrap();
        let import = Game::with_map(Arc::clone(&spec), Map::filled(6, 6, plains, &spec));

        let mut opts = options(6, 6);
        opts.import.terrain = true;
        let mask = island(6, 6, 1);
        let mut game = Game::new(Arc::clone(&spec));
        TerrainGenerator::new([3; 32], opts.clone())
            .create_map(&mut game, Some(&import), &mask)
            .unwrap();
        let map = game.map.unwrap();
        // The imported map is all land, so mask water is generated fresh.
        for tile in map.iter() {
            assert_eq!(tile.is_land(), mask.is_land(&tile.position));
        }

        opts.import.land_map = true;
        let mut game = Game::new(spec);
        TerrainGenerator::new([3; 32], opts)
            .create_map(&mut game, Some(&import), &mask)
            .unwrap();
        assert_eq!(game.map.unwrap().land_count(), 36);
    }

    #[test]
    fn test_retype_drops_foreign_resource() {
        let spec = Specification::classic();
        let plains = spec.tile_type_id("plains").unwrap();
        let hills = spec.tile_type_id("hills").unwrap();
        let grain = spec.resource_type_id("grain").unwrap();
        let ore = spec.resource_type_id("ore").unwrap();

        let mut tile = Tile::with_type(Position::new(0, 0), plains, spec.tile_type(plains));
        tile.resource = Some(Resource {
            resource_type: grain,
            quantity: None,
        });
        retype(&mut tile, hills, &spec);
        assert!(tile.resource.is_none());

        tile.resource = Some(Resource {
            resource_type: ore,
            quantity: None,
        });
        retype(&mut tile, hills, &spec);
        assert!(tile.resource.is_some());
    }
}
