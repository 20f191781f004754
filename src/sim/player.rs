//! Player movement
//!
//! Grid-quantized hops plus continuous drift while riding a log.

use serde::{Deserialize, Serialize};

use super::state::{LogRide, Position};
use crate::consts::GRID_SIZE;

/// Directional intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];
}

/// Position after one hop. `Down` stops at lane 0; sideways hops stop at
/// the world edges and never move against the pressed direction, even when
/// a log has already carried the player past the edge clamp.
pub fn hop(from: Position, direction: Direction) -> Position {
    match direction {
        Direction::Up => Position {
            x: from.x,
            y: from.y.saturating_add(1),
        },
        Direction::Down => Position {
            x: from.x,
            y: from.y.saturating_sub(1),
        },
        Direction::Left => Position {
            x: crate::clamp_player_x(from.x - GRID_SIZE).min(from.x),
            y: from.y,
        },
        Direction::Right => Position {
            x: crate::clamp_player_x(from.x + GRID_SIZE).max(from.x),
            y: from.y,
        },
    }
}

/// Carry the player along with a log for one tick. No clamping: drifting
/// off-screen is for the resolver to judge.
#[inline]
pub fn drift(x: f32, ride: &LogRide, dt_multiplier: f32) -> f32 {
    x + ride.speed * ride.direction as f32 * dt_multiplier
}
