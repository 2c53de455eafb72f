//! Land/water masks and a seeded land-mass grower.
//!
//! The terrain generator only needs to know which cells are land. Masks can
//! be drawn by hand (handy in tests) or grown by `LandGenerator`.

use crate::geometry::{Direction, Position};
use crate::settings::MapGeneratorOptions;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Errors from malformed land masks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LandMaskError {
    #[error("land mask is empty")]
    Empty,
    #[error("land mask row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        found: usize,
        expected: usize,
    },
    #[error("unexpected character {0:?} in land mask picture")]
    BadCharacter(char),
}

/// A rectangular grid of land (`true`) and water (`false`) cells.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandMask {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl LandMask {
    /// Create an all-water mask.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![false; (width * height) as usize],
        }
    }

    /// Build a mask from rows (outer index is `y`).
    pub fn from_rows(rows: &[Vec<bool>]) -> Result<Self, LandMaskError> {
        let expected = rows.first().map_or(0, Vec::len);
        if expected == 0 {
            return Err(LandMaskError::Empty);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, cells_in_row) in rows.iter().enumerate() {
            if cells_in_row.len() != expected {
                return Err(LandMaskError::Ragged {
                    row,
                    found: cells_in_row.len(),
                    expected,
                });
            }
            cells.extend_from_slice(cells_in_row);
        }

        Ok(Self {
            width: expected as u32,
            height: rows.len() as u32,
            cells,
        })
    }

    /// Parse a picture where `#` is land and `.` is water.
    ///
    /// Leading and trailing whitespace on each line is ignored, as are blank
    /// lines.
    pub fn from_ascii(picture: &str) -> Result<Self, LandMaskError> {
        let mut rows = Vec::new();
        for line in picture.lines().map(str::trim).filter(|l| !l.is_empty()) {
            let row = line
                .chars()
                .map(|c| match c {
                    '#' => Ok(true),
                    '.' => Ok(false),
                    other => Err(LandMaskError::BadCharacter(other)),
                })
                .collect::<Result<Vec<bool>, _>>()?;
            rows.push(row);
        }
        Self::from_rows(&rows)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Is the cell land? Out-of-bounds cells count as water.
    pub fn is_land(&self, pos: &Position) -> bool {
        pos.in_bounds(self.width, self.height)
            && self.cells[pos.y as usize * self.width as usize + pos.x as usize]
    }

    /// Mark a cell as land or water. Out-of-bounds positions are ignored.
    pub fn set(&mut self, pos: &Position, land: bool) {
        if pos.in_bounds(self.width, self.height) {
            self.cells[pos.y as usize * self.width as usize + pos.x as usize] = land;
        }
    }

    /// Number of land cells.
    pub fn land_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Number of land cells among the eight neighbors.
    pub fn adjacent_land_count(&self, pos: &Position) -> u32 {
        pos.neighbors().iter().filter(|p| self.is_land(p)).count() as u32
    }
}

/// Share of growth steps that start a new land mass instead.
const NEW_CONTINENT_PERCENT: u32 = 3;

/// Grows land masses on an all-water mask until a target share is land.
pub struct LandGenerator {
    rng: ChaCha8Rng,
    width: u32,
    height: u32,
    land_percentage: u32,
}

impl LandGenerator {
    /// Create a land generator with the given seed and options.
    pub fn new(seed: [u8; 32], options: &MapGeneratorOptions) -> Self {
        Self {
            rng: ChaCha8Rng::from_seed(seed),
            width: options.width,
            height: options.height,
            land_percentage: options.land_percentage.min(100),
        }
    }

    /// Generate a mask. The outermost ring of cells always stays water.
    pub fn generate(&mut self) -> LandMask {
        let mut mask = LandMask::new(self.width, self.height);
        if self.width < 3 || self.height < 3 {
            return mask;
        }

        let interior = ((self.width - 2) * (self.height - 2)) as usize;
        let target = (self.width * self.height * self.land_percentage / 100) as usize;
        let target = target.min(interior);
        let max_steps = interior * 50;

        let mut frontier: Vec<Position> = Vec::new();
        let mut land = 0usize;
        let mut steps = 0usize;

        while land < target && steps < max_steps {
            steps += 1;

            if frontier.is_empty() || self.rng.gen_range(0..100) < NEW_CONTINENT_PERCENT {
                let seed = Position::new(
                    self.rng.gen_range(1..self.width as i32 - 1),
                    self.rng.gen_range(1..self.height as i32 - 1),
                );
                if !mask.is_land(&seed) {
                    mask.set(&seed, true);
                    frontier.push(seed);
                    land += 1;
                }
                continue;
            }

            let index = self.rng.gen_range(0..frontier.len());
            let from = frontier[index];
            let next = from.adjacent(Direction::random(&mut self.rng));

            if self.is_interior(&next) && !mask.is_land(&next) {
                mask.set(&next, true);
                frontier.push(next);
                land += 1;
            } else if !self.can_grow(&mask, &from) {
                frontier.swap_remove(index);
            }
        }

        debug!(land, target, steps, "grew land mask");
        mask
    }

    fn is_interior(&self, pos: &Position) -> bool {
        pos.x >= 1
            && pos.y >= 1
            && pos.x < self.width as i32 - 1
            && pos.y < self.height as i32 - 1
    }

    fn can_grow(&self, mask: &LandMask, pos: &Position) -> bool {
        pos.neighbors()
            .iter()
            .any(|p| self.is_interior(p) && !mask.is_land(p))
    }
}
