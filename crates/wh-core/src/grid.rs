//! The 10×10 room grid: positions, cardinal directions, and bounds checks.
//!
//! [`GridWorld`] is a pure coordinate space. It knows nothing about traps or
//! who is standing where; it only answers whether a step stays on the board.

use serde::{Deserialize, Serialize};

/// Number of rows and columns on the board.
pub const GRID_SIZE: u8 = 10;

/// A room on the grid, addressed by `(row, col)` with row 0 at the top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Row index, 0 at the top.
    pub row: u8,
    /// Column index, 0 on the left.
    pub col: u8,
}

impl Position {
    /// Create a position. Use [`GridWorld::contains`] to check bounds.
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Manhattan distance to another position.
    pub fn manhattan_distance(self, other: Position) -> u32 {
        u32::from(self.row.abs_diff(other.row)) + u32::from(self.col.abs_diff(other.col))
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// One of the four cardinal directions.
///
/// The declaration order (`Up`, `Down`, `Left`, `Right`) is the fixed
/// enumeration order used everywhere directions are listed, including the
/// pursuit tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Row − 1.
    Up,
    /// Row + 1.
    Down,
    /// Column − 1.
    Left,
    /// Column + 1.
    Right,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The `(row, col)` unit delta for this direction.
    pub fn delta(self) -> (i8, i8) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// Parse a direction from user input (`up`, `u`, `w`, `north`, ...).
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" | "w" | "north" | "n" => Some(Self::Up),
            "down" | "d" | "s" | "south" => Some(Self::Down),
            "left" | "l" | "a" | "west" => Some(Self::Left),
            "right" | "r" | "east" | "e" => Some(Self::Right),
            _ => None,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Left => write!(f, "LEFT"),
            Self::Right => write!(f, "RIGHT"),
        }
    }
}

/// The static room grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct GridWorld;

impl GridWorld {
    /// Whether `(row, col)` lies within `[0, GRID_SIZE)²`.
    pub fn in_bounds(row: i16, col: i16) -> bool {
        let size = i16::from(GRID_SIZE);
        (0..size).contains(&row) && (0..size).contains(&col)
    }

    /// Whether a position lies on the grid.
    pub fn contains(position: Position) -> bool {
        Self::in_bounds(i16::from(position.row), i16::from(position.col))
    }

    /// Whether stepping from `position` in `direction` stays on the grid.
    pub fn can_step(position: Position, direction: Direction) -> bool {
        Self::step(position, direction).is_some()
    }

    /// The room reached by stepping in `direction`, or `None` if it is off-grid.
    pub fn step(position: Position, direction: Direction) -> Option<Position> {
        let (dr, dc) = direction.delta();
        let row = i16::from(position.row) + i16::from(dr);
        let col = i16::from(position.col) + i16::from(dc);
        if Self::in_bounds(row, col) {
            // Both coordinates are in 0..GRID_SIZE, so they fit in a u8.
            Some(Position::new(row as u8, col as u8))
        } else {
            None
        }
    }

    /// The directions that keep a mover on the grid, in enumeration order.
    pub fn valid_directions(position: Position) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|d| Self::can_step(position, *d))
            .collect()
    }

    /// Every on-grid neighbour paired with the direction that reaches it.
    pub fn neighbors(position: Position) -> Vec<(Direction, Position)> {
        Direction::ALL
            .into_iter()
            .filter_map(|d| Self::step(position, d).map(|p| (d, p)))
            .collect()
    }

    /// Every position on the grid, row by row.
    pub fn positions() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position::new(row, col)))
    }
}
