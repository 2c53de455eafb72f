//! Core identifiers and presets used throughout the crate.

use serde::{Deserialize, Serialize};

/// Player index.
pub type PlayerId = u8;

/// Index of a tile type within a `Specification`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TileTypeId(pub u16);

impl TileTypeId {
    /// Position of this type in the specification's tile type list.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Index of a resource type within a `Specification`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceTypeId(pub u16);

impl ResourceTypeId {
    /// Position of this type in the specification's resource type list.
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// Identifier of a river carved during generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RiverId(pub u32);

/// Map size presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum MapSize {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Huge,
}

impl MapSize {
    /// Get the dimensions (width, height) for this map size.
    pub const fn dimensions(&self) -> (u32, u32) {
        match self {
            MapSize::Tiny => (30, 64),
            MapSize::Small => (40, 100),
            MapSize::Medium => (40, 200),
            MapSize::Large => (60, 250),
            MapSize::Huge => (80, 300),
        }
    }

    /// Get all map size variants.
    pub const fn all() -> &'static [MapSize] {
        &[
            MapSize::Tiny,
            MapSize::Small,
            MapSize::Medium,
            MapSize::Large,
            MapSize::Huge,
        ]
    }
}

impl std::fmt::Display for MapSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (w, h) = self.dimensions();
        match self {
            MapSize::Tiny => write!(f, "Tiny ({}x{})", w, h),
            MapSize::Small => write!(f, "Small ({}x{})", w, h),
            MapSize::Medium => write!(f, "Medium ({}x{})", w, h),
            MapSize::Large => write!(f, "Large ({}x{})", w, h),
            MapSize::Huge => write!(f, "Huge ({}x{})", w, h),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_dimensions() {
        assert_eq!(MapSize::Tiny.dimensions(), (30, 64));
        assert_eq!(MapSize::Medium.dimensions(), (40, 200));
    }

    #[test]
    fn test_map_sizes_grow() {
        let areas: Vec<u32> = MapSize::all()
            .iter()
            .map(|s| {
                let (w, h) = s.dimensions();
                w * h
            })
            .collect();
        assert!(areas.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_display() {
        assert_eq!(MapSize::Small.to_string(), "Small (40x100)");
    }

    #[test]
    fn test_ids_index() {
        assert_eq!(TileTypeId(4).index(), 4);
        assert_eq!(ResourceTypeId(7).index(), 7);
    }
}
