//! Map generator options.

use crate::types::MapSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Options controlling a generation pass.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapGeneratorOptions {
    /// Map width in tiles.
    pub width: u32,
    /// Map height in tiles.
    pub height: u32,
    /// Share of the map the land generator turns into land (0-100).
    pub land_percentage: u32,
    /// Chance a fresh land tile is forested (0-100).
    pub forest_percentage: u32,
    /// Chance a land tile carries a bonus resource (0-100).
    pub bonus_percentage: u32,
    /// Target number of mountain and hill tiles.
    pub mountain_tile_count: u32,
    /// Number of rivers to attempt.
    pub river_count: u32,
    pub high_seas: HighSeasOptions,
    pub import: ImportOptions,
}

/// Where the high-seas border bands go.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighSeasOptions {
    /// High seas never lie within this many tiles of land.
    pub distance_to_land: i32,
    /// High seas extend at most this many columns in from each side.
    pub max_distance_to_edge: i32,
}

impl Default for HighSeasOptions {
    fn default() -> Self {
        Self {
            distance_to_land: 4,
            max_distance_to_edge: 12,
        }
    }
}

/// What to take from an imported map.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportOptions {
    /// Copy tile types from the imported map.
    pub terrain: bool,
    /// Copy resources from the imported map instead of rolling new ones.
    pub bonuses: bool,
    /// Trust the imported land/water layout over the land mask.
    pub land_map: bool,
}

impl MapGeneratorOptions {
    /// Options for a map size preset.
    pub fn for_size(size: MapSize) -> Self {
        let (width, height) = size.dimensions();
        let area = width * height;
        Self {
            width,
            height,
            mountain_tile_count: area / 80,
            river_count: area / 400,
            ..Self::default()
        }
    }

    /// Load options from JSON, filling gaps with defaults.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Validate options and return the first problem found.
    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.width == 0 || self.height == 0 {
            return Err(OptionsError::EmptyMap);
        }
        for (name, value) in [
            ("land", self.land_percentage),
            ("forest", self.forest_percentage),
            ("bonus", self.bonus_percentage),
        ] {
            if value > 100 {
                return Err(OptionsError::PercentageOutOfRange { name, value });
            }
        }
        if self.high_seas.distance_to_land < 0 || self.high_seas.max_distance_to_edge < 0 {
            return Err(OptionsError::NegativeHighSeasDistance);
        }
        Ok(())
    }

    /// Get the map dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for MapGeneratorOptions {
    fn default() -> Self {
        let (width, height) = MapSize::default().dimensions();
        Self {
            width,
            height,
            land_percentage: 25,
            forest_percentage: 50,
            bonus_percentage: 10,
            mountain_tile_count: 100,
            river_count: 20,
            high_seas: HighSeasOptions::default(),
            import: ImportOptions::default(),
        }
    }
}

/// Errors from invalid generator options.
#[derive(Debug, Error)]
pub enum OptionsError {
    #[error("map must be at least one tile wide and high")]
    EmptyMap,
    #[error("{name} percentage must be 0-100, got {value}")]
    PercentageOutOfRange { name: &'static str, value: u32 },
    #[error("high seas distances cannot be negative")]
    NegativeHighSeasDistance,
    #[error("invalid options JSON: {0}")]
    Json(#[from] serde_json::Error),
}
