//! Hazard motion
//!
//! Cars and logs slide along their lanes and wrap around the world edges.
//! No randomness here; a tick is a pure function of the previous positions.

use super::state::Lane;
use crate::consts::GAME_WIDTH;

/// Next x for an entity whose left edge is at `x`.
///
/// Once an entity has fully left the world on its leading side it
/// re-enters from the opposite edge.
#[inline]
pub fn step_x(x: f32, speed: f32, direction: i8, width: f32, dt_multiplier: f32) -> f32 {
    let next = x + speed * direction as f32 * dt_multiplier;
    if direction > 0 && next > GAME_WIDTH + width {
        -width
    } else if direction < 0 && next < -width {
        GAME_WIDTH + width
    } else {
        next
    }
}

/// Advance every car and log by one tick.
///
/// `dt_multiplier` is 1.0 normally and the slow-mo factor while slow-mo is
/// active. It scales hazards only, never the player.
pub fn advance(lanes: &mut [Lane], dt_multiplier: f32) {
    for lane in lanes.iter_mut() {
        for car in &mut lane.cars {
            car.x = step_x(car.x, car.speed, car.direction, car.width, dt_multiplier);
        }
        for log in &mut lane.logs {
            log.x = step_x(log.x, log.speed, log.direction, log.width, dt_multiplier);
        }
    }
}
