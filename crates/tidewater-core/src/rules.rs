//! Rule tables: tile types, resource types and their generation metadata.
//!
//! Terrain is not hard-coded. Every tile on a map carries a `TileTypeId`
//! pointing into a `Specification`, which is either the built-in classic
//! ruleset or one loaded from JSON.

use crate::types::{ResourceTypeId, TileTypeId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Number of latitude bands, from polar (0) to tropical (3).
pub const LATITUDE_BANDS: usize = 4;

/// Art overlay tag identifying the hills type.
pub const HILLS_OVERLAY: &str = "hills";

/// Art overlay tag identifying the mountains type.
pub const MOUNTAINS_OVERLAY: &str = "mountains";

/// Errors raised by a malformed ruleset.
///
/// These are configuration failures: generation cannot proceed and the
/// ruleset has to be fixed.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("duplicate tile type id `{0}`")]
    DuplicateTileType(String),
    #[error("duplicate resource type id `{0}`")]
    DuplicateResourceType(String),
    #[error("tile type `{tile_type}` references unknown resource `{resource}`")]
    UnknownResource { tile_type: String, resource: String },
    #[error("tile type `{0}` has an inverted generation range")]
    InvertedRange(String),
    #[error("too many tile types ({0})")]
    TooManyTypes(usize),
    #[error("no tile type fills the {0} role")]
    MissingRole(TerrainRole),
    #[error("{count} tile types compete for the {role} role")]
    AmbiguousRole { role: TerrainRole, count: usize },
    #[error("no land tile type within latitude band {0}")]
    NoLandTypeForLatitude(usize),
    #[error("invalid ruleset JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Singleton terrain roles the generator depends on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainRole {
    /// Plain navigable water.
    Ocean,
    /// Border water from which ships sail off-map.
    HighSeas,
    Hills,
    Mountains,
}

impl std::fmt::Display for TerrainRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerrainRole::Ocean => write!(f, "ocean"),
            TerrainRole::HighSeas => write!(f, "high seas"),
            TerrainRole::Hills => write!(f, "hills"),
            TerrainRole::Mountains => write!(f, "mountains"),
        }
    }
}

/// Tile types resolved for each singleton role.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TerrainRoles {
    pub ocean: TileTypeId,
    pub high_seas: TileTypeId,
    pub hills: TileTypeId,
    pub mountains: TileTypeId,
}

/// Inclusive integer range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenRange {
    pub min: i32,
    pub max: i32,
}

impl GenRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    /// Check if a value lies within the range.
    pub const fn contains(&self, value: i32) -> bool {
        self.min <= value && value <= self.max
    }
}

/// The four climate axes used to pick a land type.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RangeType {
    /// Bands 0 (polar) to 3 (tropical).
    Latitude,
    /// Tiers 1 (lowland) to 3 (highland).
    Altitude,
    /// -3 (arid) to 3 (wet).
    Humidity,
    /// -3 (cold) to 3 (hot).
    Temperature,
}

/// Climate ranges a land type may be generated in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClimateRanges {
    pub latitude: GenRange,
    pub altitude: GenRange,
    pub humidity: GenRange,
    pub temperature: GenRange,
}

impl ClimateRanges {
    /// Get the range for one axis.
    pub const fn range(&self, range_type: RangeType) -> GenRange {
        match range_type {
            RangeType::Latitude => self.latitude,
            RangeType::Altitude => self.altitude,
            RangeType::Humidity => self.humidity,
            RangeType::Temperature => self.temperature,
        }
    }

    fn is_well_formed(&self) -> bool {
        [
            self.latitude,
            self.altitude,
            self.humidity,
            self.temperature,
        ]
        .iter()
        .all(|r| r.min <= r.max)
    }
}

/// A resource a tile type can carry, with a relative weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceChance {
    pub resource: String,
    pub probability: u32,
}

/// A category of terrain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileType {
    /// Unique identifier, e.g. `"plains"`.
    pub id: String,
    #[serde(default)]
    pub is_water: bool,
    /// Ships on this type may leave the map for the home continent.
    #[serde(default)]
    pub can_sail_to_europe: bool,
    /// Artwork tag; `"hills"` and `"mountains"` identify those roles.
    #[serde(default)]
    pub art_overlay: Option<String>,
    #[serde(default)]
    pub is_forested: bool,
    /// Movement points to enter (3 per full move).
    #[serde(default = "default_move_cost")]
    pub basic_move_cost: u32,
    #[serde(default = "default_true")]
    pub can_have_river: bool,
    /// Climate ranges; types without them are never picked by climate.
    #[serde(default)]
    pub gen: Option<ClimateRanges>,
    #[serde(default)]
    pub resources: Vec<ResourceChance>,
}

fn default_move_cost() -> u32 {
    3
}

fn default_true() -> bool {
    true
}

impl TileType {
    /// Create a land type with default properties.
    pub fn land(id: &str, basic_move_cost: u32) -> Self {
        Self {
            id: id.to_string(),
            is_water: false,
            can_sail_to_europe: false,
            art_overlay: None,
            is_forested: false,
            basic_move_cost,
            can_have_river: true,
            gen: None,
            resources: Vec::new(),
        }
    }

    /// Create a water type with default properties.
    pub fn water(id: &str) -> Self {
        Self {
            is_water: true,
            can_have_river: false,
            ..Self::land(id, default_move_cost())
        }
    }

    pub fn with_climate(mut self, gen: ClimateRanges) -> Self {
        self.gen = Some(gen);
        self
    }

    pub fn with_resource(mut self, resource: &str, probability: u32) -> Self {
        self.resources.push(ResourceChance {
            resource: resource.to_string(),
            probability,
        });
        self
    }

    pub fn with_overlay(mut self, overlay: &str) -> Self {
        self.art_overlay = Some(overlay.to_string());
        self
    }

    pub fn forested(mut self) -> Self {
        self.is_forested = true;
        self
    }

    pub fn sail_to_europe(mut self) -> Self {
        self.can_sail_to_europe = true;
        self
    }

    pub fn without_rivers(mut self) -> Self {
        self.can_have_river = false;
        self
    }

    pub const fn is_land(&self) -> bool {
        !self.is_water
    }

    /// Check a climate value against this type's generation ranges.
    ///
    /// Types without ranges match nothing.
    pub fn within_range(&self, range_type: RangeType, value: i32) -> bool {
        self.gen
            .as_ref()
            .is_some_and(|g| g.range(range_type).contains(value))
    }

    fn has_overlay(&self, overlay: &str) -> bool {
        self.art_overlay.as_deref() == Some(overlay)
    }
}

/// A bonus resource kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceType {
    pub id: String,
    /// Units a deposit holds; `None` means it never runs out.
    #[serde(default)]
    pub max_quantity: Option<u32>,
}

impl ResourceType {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            max_quantity: None,
        }
    }

    pub fn limited(id: &str, max_quantity: u32) -> Self {
        Self {
            id: id.to_string(),
            max_quantity: Some(max_quantity),
        }
    }
}

#[derive(Serialize, Deserialize)]
struct RulesFile {
    tile_types: Vec<TileType>,
    #[serde(default)]
    resource_types: Vec<ResourceType>,
}

/// A validated rule table.
#[derive(Clone, Debug)]
pub struct Specification {
    tile_types: Vec<TileType>,
    resource_types: Vec<ResourceType>,
    /// Resolved resource chances, parallel to `tile_types`.
    resource_chances: Vec<Vec<(ResourceTypeId, u32)>>,
}

impl Specification {
    /// Build a specification, checking ids and cross references.
    pub fn new(
        tile_types: Vec<TileType>,
        resource_types: Vec<ResourceType>,
    ) -> Result<Self, RulesError> {
        if tile_types.len() > u16::MAX as usize {
            return Err(RulesError::TooManyTypes(tile_types.len()));
        }
        if resource_types.len() > u16::MAX as usize {
            return Err(RulesError::TooManyTypes(resource_types.len()));
        }

        let mut seen = HashSet::new();
        for resource_type in &resource_types {
            if !seen.insert(resource_type.id.as_str()) {
                return Err(RulesError::DuplicateResourceType(resource_type.id.clone()));
            }
        }

        let mut seen = HashSet::new();
        let mut resource_chances = Vec::with_capacity(tile_types.len());
        for tile_type in &tile_types {
            if !seen.insert(tile_type.id.as_str()) {
                return Err(RulesError::DuplicateTileType(tile_type.id.clone()));
            }
            if tile_type.gen.is_some_and(|g| !g.is_well_formed()) {
                return Err(RulesError::InvertedRange(tile_type.id.clone()));
            }

            let mut chances = Vec::with_capacity(tile_type.resources.len());
            for chance in &tile_type.resources {
                let index = resource_types
                    .iter()
                    .position(|r| r.id == chance.resource)
                    .ok_or_else(|| RulesError::UnknownResource {
                        tile_type: tile_type.id.clone(),
                        resource: chance.resource.clone(),
                    })?;
                chances.push((ResourceTypeId(index as u16), chance.probability));
            }
            resource_chances.push(chances);
        }

        Ok(Self {
            tile_types,
            resource_types,
            resource_chances,
        })
    }

    /// Load a ruleset from JSON with `tile_types` and `resource_types` arrays.
    pub fn from_json(json: &str) -> Result<Self, RulesError> {
        let file: RulesFile = serde_json::from_str(json)?;
        Self::new(file.tile_types, file.resource_types)
    }

    /// Serialize the ruleset back to JSON.
    pub fn to_json(&self) -> Result<String, RulesError> {
        let file = RulesFile {
            tile_types: self.tile_types.clone(),
            resource_types: self.resource_types.clone(),
        };
        Ok(serde_json::to_string_pretty(&file)?)
    }

    /// Get a tile type by id.
    ///
    /// Ids are only handed out by this specification, so lookup is direct.
    pub fn tile_type(&self, id: TileTypeId) -> &TileType {
        &self.tile_types[id.index()]
    }

    /// Get a tile type by an id that may come from elsewhere, e.g. a loaded map.
    pub fn try_tile_type(&self, id: TileTypeId) -> Option<&TileType> {
        self.tile_types.get(id.index())
    }

    /// Find a tile type id by name.
    pub fn tile_type_id(&self, name: &str) -> Option<TileTypeId> {
        self.tile_types
            .iter()
            .position(|t| t.id == name)
            .map(|i| TileTypeId(i as u16))
    }

    /// Iterate over all tile types in declaration order.
    pub fn tile_types(&self) -> impl Iterator<Item = (TileTypeId, &TileType)> {
        self.tile_types
            .iter()
            .enumerate()
            .map(|(i, t)| (TileTypeId(i as u16), t))
    }

    /// Get a resource type by id.
    pub fn resource_type(&self, id: ResourceTypeId) -> &ResourceType {
        &self.resource_types[id.index()]
    }

    pub fn try_resource_type(&self, id: ResourceTypeId) -> Option<&ResourceType> {
        self.resource_types.get(id.index())
    }

    /// Find a resource type id by name.
    pub fn resource_type_id(&self, name: &str) -> Option<ResourceTypeId> {
        self.resource_types
            .iter()
            .position(|r| r.id == name)
            .map(|i| ResourceTypeId(i as u16))
    }

    /// Weighted resources a tile type may carry.
    pub fn resource_chances(&self, id: TileTypeId) -> &[(ResourceTypeId, u32)] {
        &self.resource_chances[id.index()]
    }

    /// Land types whose latitude range includes the given band.
    pub fn land_types_for_latitude(&self, band: usize) -> Vec<TileTypeId> {
        self.tile_types()
            .filter(|(_, t)| t.is_land() && t.within_range(RangeType::Latitude, band as i32))
            .map(|(id, _)| id)
            .collect()
    }

    /// Resolve the singleton roles, failing if any is missing or ambiguous.
    pub fn terrain_roles(&self) -> Result<TerrainRoles, RulesError> {
        Ok(TerrainRoles {
            ocean: self.single_role(TerrainRole::Ocean, |t| {
                t.is_water && !t.can_sail_to_europe
            })?,
            high_seas: self.single_role(TerrainRole::HighSeas, |t| {
                t.is_water && t.can_sail_to_europe
            })?,
            hills: self.single_role(TerrainRole::Hills, |t| t.has_overlay(HILLS_OVERLAY))?,
            mountains: self.single_role(TerrainRole::Mountains, |t| {
                t.has_overlay(MOUNTAINS_OVERLAY)
            })?,
        })
    }

    fn single_role(
        &self,
        role: TerrainRole,
        matches: impl Fn(&TileType) -> bool,
    ) -> Result<TileTypeId, RulesError> {
        let found: Vec<TileTypeId> = self
            .tile_types()
            .filter(|(_, t)| matches(t))
            .map(|(id, _)| id)
            .collect();

        match found.as_slice() {
            [] => Err(RulesError::MissingRole(role)),
            [id] => Ok(*id),
            _ => Err(RulesError::AmbiguousRole {
                role,
                count: found.len(),
            }),
        }
    }

    /// The built-in classic ruleset.
    pub fn classic() -> Self {
        let climate = |lat: (i32, i32), alt: (i32, i32), hum: (i32, i32), temp: (i32, i32)| {
            ClimateRanges {
                latitude: GenRange::new(lat.0, lat.1),
                altitude: GenRange::new(alt.0, alt.1),
                humidity: GenRange::new(hum.0, hum.1),
                temperature: GenRange::new(temp.0, temp.1),
            }
        };

        // Each open land type has a forested twin sharing its climate, and
        // every latitude band has a pair reaching altitude 3.
        let pairs = [
            ("plains", "mixed", climate((1, 2), (1, 2), (-1, 1), (-1, 1)), "grain", "furs"),
            ("grassland", "conifer", climate((1, 2), (1, 1), (0, 2), (-1, 1)), "tobacco", "lumber"),
            ("prairie", "broadleaf", climate((1, 2), (1, 2), (-2, 0), (0, 2)), "cotton", "furs"),
            ("savannah", "tropical", climate((2, 3), (1, 2), (0, 2), (1, 3)), "sugar", "lumber"),
            ("marsh", "wetland", climate((1, 3), (1, 1), (2, 3), (-1, 2)), "minerals", "minerals"),
            ("swamp", "rain", climate((3, 3), (1, 1), (2, 3), (2, 3)), "minerals", "game"),
            ("desert", "scrub", climate((2, 3), (1, 3), (-3, -2), (1, 3)), "oasis", "oasis"),
            ("tundra", "boreal", climate((0, 1), (1, 3), (-3, 1), (-3, -1)), "ore", "game"),
        ];

        let mut tile_types = Vec::new();
        for (open, forest, ranges, open_resource, forest_resource) in pairs {
            tile_types.push(
                TileType::land(open, 3)
                    .with_climate(ranges)
                    .with_resource(open_resource, 100),
            );
            tile_types.push(
                TileType::land(forest, 6)
                    .forested()
                    .with_climate(ranges)
                    .with_resource(forest_resource, 100),
            );
        }

        tile_types.push(
            TileType::land("arctic", 6)
                .without_rivers()
                .with_climate(climate((0, 0), (1, 3), (-3, 3), (-3, -2))),
        );
        tile_types.push(
            TileType::land("hills", 6)
                .with_overlay(HILLS_OVERLAY)
                .without_rivers()
                .with_resource("ore", 100),
        );
        tile_types.push(
            TileType::land("mountains", 9)
                .with_overlay(MOUNTAINS_OVERLAY)
                .without_rivers()
                .with_resource("silver", 30)
                .with_resource("ore", 70),
        );
        tile_types.push(TileType::water("ocean").with_resource("fish", 100));
        tile_types.push(TileType::water("high_seas").sail_to_europe());

        let resource_types = vec![
            ResourceType::new("grain"),
            ResourceType::new("tobacco"),
            ResourceType::new("cotton"),
            ResourceType::new("sugar"),
            ResourceType::new("minerals"),
            ResourceType::new("oasis"),
            ResourceType::new("ore"),
            ResourceType::limited("silver", 300),
            ResourceType::new("fish"),
            ResourceType::new("game"),
            ResourceType::new("furs"),
            ResourceType::new("lumber"),
        ];

        // The table above is fixed and consistent.
        match Self::new(tile_types, resource_types) {
            Ok(spec) => spec,
            Err(e) => unreachable!("classic ruleset is invalid: {e}"),
        }
    }
}

impl Default for Specification {
    fn default() -> Self {
        Self::classic()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_range_contains() {
        let range = GenRange::new(-1, 2);
        assert!(range.contains(-1));
        assert!(range.contains(2));
        assert!(!range.contains(3));
        assert!(!range.contains(-2));
    }

    #[test]
    fn test_classic_roles_resolve() {
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();
        assert_eq!(spec.tile_type(roles.ocean).id, "ocean");
        assert_eq!(spec.tile_type(roles.high_seas).id, "high_seas");
        assert_eq!(spec.tile_type(roles.hills).id, "hills");
        assert_eq!(spec.tile_type(roles.mountains).id, "mountains");
    }

    #[test]
    fn test_classic_every_band_has_land() {
        let spec = Specification::classic();
        for band in 0..LATITUDE_BANDS {
            let candidates = spec.land_types_for_latitude(band);
            assert!(!candidates.is_empty(), "band {} is empty", band);
            for id in candidates {
                assert!(spec.tile_type(id).is_land());
            }
        }
    }

    #[test]
    fn test_classic_every_band_reaches_highlands() {
        let spec = Specification::classic();
        for band in 0..LATITUDE_BANDS {
            let highland = spec
                .land_types_for_latitude(band)
                .into_iter()
                .filter(|id| spec.tile_type(*id).within_range(RangeType::Altitude, 3))
                .count();
            assert!(highland >= 2, "band {} has no highland pair", band);
        }
    }

    #[test]
    fn test_roles_never_picked_by_climate() {
        let spec = Specification::classic();
        let roles = spec.terrain_roles().unwrap();
        for band in 0..LATITUDE_BANDS {
            let candidates = spec.land_types_for_latitude(band);
            assert!(!candidates.contains(&roles.hills));
            assert!(!candidates.contains(&roles.mountains));
        }
    }

    #[test]
    fn test_within_range_without_climate() {
        let hills = TileType::land("hills", 6);
        assert!(!hills.within_range(RangeType::Altitude, 1));
    }

    #[test]
    fn test_missing_high_seas_role() {
        let spec = Specification::new(
            vec![
                TileType::water("ocean"),
                TileType::land("hills", 6).with_overlay(HILLS_OVERLAY),
                TileType::land("mountains", 9).with_overlay(MOUNTAINS_OVERLAY),
            ],
            vec![],
        )
        .unwrap();

        assert!(matches!(
            spec.terrain_roles(),
            Err(RulesError::MissingRole(TerrainRole::HighSeas))
        ));
    }

    #[test]
    fn test_ambiguous_hills_role() {
        let spec = Specification::new(
            vec![
                TileType::water("ocean"),
                TileType::water("high_seas").sail_to_europe(),
                TileType::land("hills", 6).with_overlay(HILLS_OVERLAY),
                TileType::land("foothills", 6).with_overlay(HILLS_OVERLAY),
                TileType::land("mountains", 9).with_overlay(MOUNTAINS_OVERLAY),
            ],
            vec![],
        )
        .unwrap();

        assert!(matches!(
            spec.terrain_roles(),
            Err(RulesError::AmbiguousRole {
                role: TerrainRole::Hills,
                count: 2
            })
        ));
    }

    #[test]
    fn test_unknown_resource_rejected() {
        let result = Specification::new(
            vec![TileType::land("plains", 3).with_resource("unobtainium", 10)],
            vec![],
        );
        assert!(matches!(result, Err(RulesError::UnknownResource { .. })));
    }

    #[test]
    fn test_duplicate_tile_type_rejected() {
        let result = Specification::new(
            vec![TileType::land("plains", 3), TileType::land("plains", 3)],
            vec![],
        );
        assert!(matches!(result, Err(RulesError::DuplicateTileType(id)) if id == "plains"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let ranges = ClimateRanges {
            latitude: GenRange::new(2, 1),
            altitude: GenRange::new(1, 3),
            humidity: GenRange::new(-3, 3),
            temperature: GenRange::new(-3, 3),
        };
        let result = Specification::new(
            vec![TileType::land("plains", 3).with_climate(ranges)],
            vec![],
        );
        assert!(matches!(result, Err(RulesError::InvertedRange(_))));
    }

    #[test]
    fn test_json_defaults() {
        let json = r#"{
            "tile_types": [
                { "id": "plains", "resources": [{ "resource": "grain", "probability": 5 }] },
                { "id": "ocean", "is_water": true }
            ],
            "resource_types": [{ "id": "grain" }]
        }"#;
        let spec = Specification::from_json(json).unwrap();

        let plains = spec.tile_type(spec.tile_type_id("plains").unwrap());
        assert_eq!(plains.basic_move_cost, 3);
        assert!(plains.can_have_river);
        assert!(plains.gen.is_none());

        let ocean = spec.tile_type(spec.tile_type_id("ocean").unwrap());
        assert!(ocean.is_water);

        let grain = spec.resource_type_id("grain").unwrap();
        assert_eq!(
            spec.resource_chances(spec.tile_type_id("plains").unwrap()),
            &[(grain, 5)]
        );
    }

    #[test]
    fn test_json_classic_reload() {
        let spec = Specification::classic();
        let json = spec.to_json().unwrap();
        let reloaded = Specification::from_json(&json).unwrap();
        assert_eq!(reloaded.tile_types().count(), spec.tile_types().count());
        assert_eq!(reloaded.terrain_roles().unwrap(), spec.terrain_roles().unwrap());
    }

    #[test]
    fn test_bad_json() {
        assert!(matches!(
            Specification::from_json("{ not json"),
            Err(RulesError::Json(_))
        ));
    }
}
