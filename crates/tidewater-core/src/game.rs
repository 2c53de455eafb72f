//! The game a generated map is attached to.

use crate::map::{Map, MapError};
use crate::rules::Specification;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A game: its rule table and, once generated, its map.
#[derive(Clone, Debug)]
pub struct Game {
    /// Rules every tile type on the map is drawn from.
    pub specification: Arc<Specification>,
    /// The map, if one has been generated or loaded.
    pub map: Option<Map>,
}

impl Game {
    /// Create a game without a map.
    pub fn new(specification: Arc<Specification>) -> Self {
        Self {
            specification,
            map: None,
        }
    }

    /// Create a game using the classic ruleset.
    pub fn classic() -> Self {
        Self::new(Arc::new(Specification::classic()))
    }

    /// Create a game around an existing map.
    pub fn with_map(specification: Arc<Specification>, map: Map) -> Self {
        Self {
            specification,
            map: Some(map),
        }
    }

    pub fn map(&self) -> Option<&Map> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut Map> {
        self.map.as_mut()
    }

    /// Save the map as JSON.
    pub fn map_to_json(&self) -> serde_json::Result<Option<String>> {
        self.map.as_ref().map(serde_json::to_string).transpose()
    }

    /// Load a previously saved map, e.g. to import it into a new game.
    ///
    /// The map must fit this game's rules; on error the current map is kept.
    pub fn load_map_json(&mut self, json: &str) -> Result<(), MapError> {
        let map: Map = serde_json::from_str(json)?;
        map.validate(&self.specification)?;
        self.map = Some(map);
        Ok(())
    }
}

/// Serializable summary of a game's map, for logging and inspection.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSummary {
    pub width: u32,
    pub height: u32,
    pub land: usize,
    pub with_resource: usize,
    pub with_river: usize,
}

impl MapSummary {
    pub fn of(map: &Map) -> Self {
        Self {
            width: map.width,
            height: map.height,
            land: map.land_count(),
            with_resource: map.iter().filter(|t| t.resource.is_some()).count(),
            with_river: map.iter().filter(|t| t.has_river()).count(),
        }
    }
}
