//! Tidewater Core Library
//!
//! Terrain generation and movement costs for a turn-based colonization
//! game. A land mask and a rule table go in, a typed tile grid comes out,
//! and a cost decider prices unit steps across it for path searches.
//!
//! # Design Principles
//!
//! - **Rule-driven**: Tile types come from a `Specification`, never from code
//! - **Deterministic**: Same seed, rules and mask always produce the same map
//! - **Serializable**: Maps, options and rule tables load and save via serde
//! - **No global state**: Generation sessions own their caches and RNG

// Core modules
pub mod geometry;
pub mod map;
pub mod rules;
pub mod types;

// Game and configuration
pub mod game;
pub mod settings;

// Map generation
pub mod climate;
pub mod land;
pub mod mapgen;
pub mod river;

// Units and movement
pub mod movement;
pub mod pathfinding;
pub mod unit;

// Re-exports for convenience
pub use climate::LandTypeChooser;
pub use game::{Game, MapSummary};
pub use geometry::{Direction, DirectionChange, Position};
pub use land::{LandGenerator, LandMask, LandMaskError};
pub use map::{Map, MapError, Resource, RiverSection, RiverSize, Settlement, Tile};
pub use mapgen::{GenerationError, TerrainGenerator};
pub use movement::{BaseCostDecider, CostDecider, MoveType, MovingUnit, StepCost, ILLEGAL_MOVE};
pub use pathfinding::{find_path, find_reachable, path_cost, PathResult, PathStep};
pub use river::{River, RiverMap};
pub use rules::{
    ClimateRanges, GenRange, RangeType, ResourceType, RulesError, Specification, TerrainRole,
    TerrainRoles, TileType,
};
pub use settings::{HighSeasOptions, ImportOptions, MapGeneratorOptions, OptionsError};
pub use types::*;
pub use unit::{RuledUnit, Unit, UnitKind};
