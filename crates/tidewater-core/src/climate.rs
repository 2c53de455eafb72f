//! Climate-driven choice of land tile types.
//!
//! A land tile's type is picked by narrowing the types allowed at its
//! latitude with four random draws: altitude, forest cover, humidity and
//! temperature. Each pass keeps at least one candidate, so the order of the
//! passes and of the candidate list decides the outcome for a given seed.

use crate::rules::{RangeType, RulesError, Specification, LATITUDE_BANDS};
use crate::types::TileTypeId;
use rand::Rng;

/// How close a row is to the middle of the map, 0 at the top/bottom edge and
/// 100 at the center.
pub fn latitude_percent(y: i32, height: u32) -> u32 {
    if height == 0 {
        return 0;
    }
    let from_edge = y.min(height as i32 - 1 - y).max(0) as u32;
    (from_edge * 200 / height).min(100)
}

/// Map a latitude percentage to a band, 0 (polar) to 3 (tropical).
pub const fn latitude_band(percent: u32) -> usize {
    if percent >= 75 {
        3
    } else if percent >= 50 {
        2
    } else if percent >= 25 {
        1
    } else {
        0
    }
}

/// Map a `0..10` roll to an altitude tier.
pub const fn altitude_tier(roll: u32) -> i32 {
    if roll < 6 {
        1
    } else if roll < 8 {
        2
    } else {
        3
    }
}

/// Drop candidates failing `keep`, walking in order and stopping removal
/// once a single candidate is left.
fn narrow(candidates: &mut Vec<TileTypeId>, keep: impl Fn(TileTypeId) -> bool) {
    let mut i = 0;
    while i < candidates.len() && candidates.len() > 1 {
        if keep(candidates[i]) {
            i += 1;
        } else {
            candidates.remove(i);
        }
    }
}

/// Picks land types for one generation pass.
///
/// Holds the per-band candidate lists, built on first use and reused for
/// the rest of the pass.
pub struct LandTypeChooser<'a> {
    spec: &'a Specification,
    bands: [Option<Vec<TileTypeId>>; LATITUDE_BANDS],
}

impl<'a> LandTypeChooser<'a> {
    pub fn new(spec: &'a Specification) -> Self {
        Self {
            spec,
            bands: Default::default(),
        }
    }

    /// Land types allowed in a latitude band.
    pub fn candidates(&mut self, band: usize) -> Result<&[TileTypeId], RulesError> {
        let band = band.min(LATITUDE_BANDS - 1);
        if self.bands[band].is_none() {
            let found = self.spec.land_types_for_latitude(band);
            if found.is_empty() {
                return Err(RulesError::NoLandTypeForLatitude(band));
            }
            self.bands[band] = Some(found);
        }
        Ok(self.bands[band].as_deref().unwrap_or_default())
    }

    /// Choose a land type for a tile at `latitude_percent`.
    ///
    /// Always draws altitude, forest, humidity and temperature in that order,
    /// then a final pick only if several candidates survive.
    pub fn choose<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        latitude_percent: u32,
        forest_chance: u32,
    ) -> Result<TileTypeId, RulesError> {
        let spec = self.spec;
        let mut candidates = self.candidates(latitude_band(latitude_percent))?.to_vec();

        let altitude = altitude_tier(rng.gen_range(0..10));
        narrow(&mut candidates, |id| {
            spec.tile_type(id).within_range(RangeType::Altitude, altitude)
        });

        let forested = rng.gen_range(0..100) < forest_chance;
        narrow(&mut candidates, |id| spec.tile_type(id).is_forested == forested);

        let humidity = rng.gen_range(-3..=3);
        narrow(&mut candidates, |id| {
            spec.tile_type(id).within_range(RangeType::Humidity, humidity)
        });

        let temperature = rng.gen_range(-3..=3);
        narrow(&mut candidates, |id| {
            spec.tile_type(id)
                .within_range(RangeType::Temperature, temperature)
        });

        Ok(match candidates.as_slice() {
            [only] => *only,
            _ => candidates[rng.gen_range(0..candidates.len())],
        })
    }
}
