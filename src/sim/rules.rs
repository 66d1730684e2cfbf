//! Grid geometry rules
//!
//! Pure functions the engine calls once per step: turn validity, toroidal
//! movement, collision tests and coordinate rescaling. No state lives here.

use serde::{Deserialize, Serialize};

/// A cell on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: u32,
    pub y: u32,
}

impl Position {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// True if the cell lies inside a `width` x `height` grid
    pub fn in_bounds(&self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}

impl From<(u32, u32)> for Position {
    fn from((x, y): (u32, u32)) -> Self {
        Self { x, y }
    }
}

/// Heading of the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

/// A turn is valid unless it reverses the snake onto itself.
/// Turning to the current heading is a valid no-op.
#[inline]
pub fn is_valid_turn(current: Direction, requested: Direction) -> bool {
    requested != current.opposite()
}

/// Move one cell, wrapping around both axes (toroidal grid)
pub fn next_position(head: Position, direction: Direction, width: u32, height: u32) -> Position {
    debug_assert!(width > 0 && height > 0, "grid must be non-empty");
    // Normalize first so an out-of-grid head still lands inside.
    let x = head.x % width;
    let y = head.y % height;
    match direction {
        Direction::Up => Position::new(x, (y + height - 1) % height),
        Direction::Down => Position::new(x, (y + 1) % height),
        Direction::Left => Position::new((x + width - 1) % width, y),
        Direction::Right => Position::new((x + 1) % width, y),
    }
}

/// True if `candidate` hits any segment of `body`.
///
/// The whole body is tested, including the tail cell that would be vacated
/// this step; the tail only moves after the check passes.
pub fn is_self_collision<'a, I>(candidate: Position, body: I) -> bool
where
    I: IntoIterator<Item = &'a Position>,
{
    body.into_iter().any(|segment| *segment == candidate)
}

#[inline]
pub fn is_food_collision(candidate: Position, food: Position) -> bool {
    candidate == food
}

/// Rescale a position proportionally from an old grid to a new one.
///
/// Each axis becomes `round(axis * new / old)` (half away from zero) and is
/// clamped to `[0, new - 1]`.
pub fn scale_position(pos: Position, old_w: u32, old_h: u32, new_w: u32, new_h: u32) -> Position {
    Position::new(
        scale_axis(pos.x, old_w, new_w),
        scale_axis(pos.y, old_h, new_h),
    )
}

fn scale_axis(value: u32, old_dim: u32, new_dim: u32) -> u32 {
    if old_dim == 0 || new_dim == 0 {
        return 0;
    }
    let scaled = (f64::from(value) * f64::from(new_dim) / f64::from(old_dim)).round();
    (scaled as u32).min(new_dim - 1)
}

/// Shortest Manhattan distance between two cells on a toroidal grid
pub fn wrapped_distance(a: Position, b: Position, width: u32, height: u32) -> u32 {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    dx.min(width.saturating_sub(dx)) + dy.min(height.saturating_sub(dy))
}
