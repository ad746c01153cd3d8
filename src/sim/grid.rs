//! Grid coordinates and snake movement

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer cell coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPos {
    pub x: i32,
    pub y: i32,
}

impl GridPos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell one step in `dir` (may be off the grid)
    #[inline]
    pub fn step(self, dir: Direction) -> Self {
        let (dx, dy) = dir.delta();
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn in_bounds(self, width: u32, height: u32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < width as i32 && self.y < height as i32
    }

    /// Pixel-space center of the cell
    pub fn center(self, cell_size: f32) -> Vec2 {
        Vec2::new(
            self.x as f32 * cell_size + cell_size / 2.0,
            self.y as f32 * cell_size + cell_size / 2.0,
        )
    }

    pub fn manhattan(self, other: GridPos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for GridPos {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Direction of travel (screen coordinates, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    #[default]
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// The snake body, head first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    body: VecDeque<GridPos>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// One-segment snake
    pub fn new(head: GridPos, direction: Direction) -> Self {
        Self::from_cells([head], direction)
    }

    /// Build from explicit cells, head first
    pub fn from_cells(cells: impl IntoIterator<Item = GridPos>, direction: Direction) -> Self {
        Self {
            body: cells.into_iter().collect(),
            direction,
            pending_direction: direction,
        }
    }

    pub fn head(&self) -> GridPos {
        // Never empty: constructors seed it and moves push before popping
        self.body.front().copied().unwrap_or(GridPos::new(0, 0))
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn cells(&self) -> impl Iterator<Item = GridPos> + '_ {
        self.body.iter().copied()
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.body.contains(&pos)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Buffer a turn for the next step. Reversals are rejected.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.direction.opposite() {
            return false;
        }
        self.pending_direction = dir;
        true
    }

    /// Commit the buffered turn and return the cell the head moves into
    pub fn next_head(&mut self) -> GridPos {
        if self.pending_direction != self.direction.opposite() {
            self.direction = self.pending_direction;
        }
        self.head().step(self.direction)
    }

    /// Where the head would go without committing anything
    pub fn peek_head(&self, dir: Direction) -> GridPos {
        self.head().step(dir)
    }

    pub fn push_head(&mut self, pos: GridPos) {
        self.body.push_front(pos);
    }

    pub fn pop_tail(&mut self) -> Option<GridPos> {
        self.body.pop_back()
    }
}
