//! Square-grid geometry for the game map.
//!
//! Tiles are addressed by `(x, y)` with `x` growing east and `y` growing
//! south. Every tile has up to eight neighbors; the map does not wrap.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// A position on the map grid.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub struct Position {
    /// Column coordinate
    pub x: i32,
    /// Row coordinate
    pub y: i32,
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Row-major ordering for deterministic iteration
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl Position {
    /// Create a new position.
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Get the position one step away in the given direction.
    #[inline]
    pub const fn adjacent(&self, direction: Direction) -> Position {
        let (dx, dy) = direction.offset();
        Position::new(self.x + dx, self.y + dy)
    }

    /// Get all 8 neighboring positions in `Direction::ALL` order.
    pub fn neighbors(&self) -> [Position; 8] {
        Direction::ALL.map(|d| self.adjacent(d))
    }

    /// Distance in steps, where a diagonal step counts as one.
    pub fn distance(&self, other: &Position) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Check if another position is exactly one step away.
    pub fn is_adjacent(&self, other: &Position) -> bool {
        self.distance(other) == 1
    }

    /// Get the direction leading from this position to an adjacent one.
    pub fn direction_to(&self, other: &Position) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|d| self.adjacent(*d) == *other)
    }

    /// Check if this position is within bounds of a rectangular map.
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as u32) < width && (self.y as u32) < height
    }

    /// Get every position at most `radius` steps away, center included.
    ///
    /// Positions are returned in row-major order.
    pub fn square(&self, radius: u32) -> Vec<Position> {
        let r = radius as i32;
        let mut result = Vec::with_capacity(((2 * r + 1) * (2 * r + 1)) as usize);

        for dy in -r..=r {
            for dx in -r..=r {
                result.push(Position::new(self.x + dx, self.y + dy));
            }
        }

        result
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The eight compass directions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl Direction {
    /// All directions, clockwise from north.
    pub const ALL: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    /// The four directions rivers flow along.
    pub const CARDINAL: [Direction; 4] = [Direction::N, Direction::E, Direction::S, Direction::W];

    /// Get the `(dx, dy)` step for this direction.
    pub const fn offset(&self) -> (i32, i32) {
        match self {
            Direction::N => (0, -1),
            Direction::NE => (1, -1),
            Direction::E => (1, 0),
            Direction::SE => (1, 1),
            Direction::S => (0, 1),
            Direction::SW => (-1, 1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, -1),
        }
    }

    /// Get the opposite direction.
    pub const fn reverse(&self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
        }
    }

    /// Is this one of N, E, S, W?
    pub const fn is_cardinal(&self) -> bool {
        matches!(
            self,
            Direction::N | Direction::E | Direction::S | Direction::W
        )
    }

    /// Rotate 90 degrees clockwise.
    pub const fn right(&self) -> Direction {
        match self {
            Direction::N => Direction::E,
            Direction::NE => Direction::SE,
            Direction::E => Direction::S,
            Direction::SE => Direction::SW,
            Direction::S => Direction::W,
            Direction::SW => Direction::NW,
            Direction::W => Direction::N,
            Direction::NW => Direction::NE,
        }
    }

    /// Rotate 90 degrees counter-clockwise.
    pub const fn left(&self) -> Direction {
        self.right().reverse()
    }

    /// Pick one of the eight directions uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    /// Pick one of the four cardinal directions uniformly.
    pub fn random_cardinal<R: Rng + ?Sized>(rng: &mut R) -> Direction {
        Self::CARDINAL[rng.gen_range(0..Self::CARDINAL.len())]
    }
}

/// A change of heading while a river grows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DirectionChange {
    StraightAhead,
    RightTurn,
    LeftTurn,
}

impl DirectionChange {
    /// All changes in the order they are tried.
    pub const ALL: [DirectionChange; 3] = [
        DirectionChange::StraightAhead,
        DirectionChange::RightTurn,
        DirectionChange::LeftTurn,
    ];

    /// Apply this change to a heading.
    pub const fn apply(&self, direction: Direction) -> Direction {
        match self {
            DirectionChange::StraightAhead => direction,
            DirectionChange::RightTurn => direction.right(),
            DirectionChange::LeftTurn => direction.left(),
        }
    }

    /// Pick a change uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> DirectionChange {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}
