//! Collision and safety resolution
//!
//! Decides, for the player's resting position, whether a car hit them,
//! whether they are standing on a log or drowning, and which pickups they
//! touched. Hitboxes are 1D: lanes are discrete, so only x spans overlap.

use super::state::{DeathCause, Lane, LaneKind, LogRide, Position, PowerUpKind};
use crate::consts::*;

/// Outcome of a safety check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub dead: bool,
    pub cause: Option<DeathCause>,
    /// Log the player is standing on (water lanes only)
    pub on_log: Option<LogRide>,
}

impl Resolution {
    pub fn safe() -> Self {
        Self {
            dead: false,
            cause: None,
            on_log: None,
        }
    }

    pub fn riding(ride: LogRide) -> Self {
        Self {
            on_log: Some(ride),
            ..Self::safe()
        }
    }

    pub fn death(cause: DeathCause) -> Self {
        Self {
            dead: true,
            cause: Some(cause),
            on_log: None,
        }
    }
}

/// Half-width of the player's collision box
#[inline]
fn player_half_width() -> f32 {
    PLAYER_SIZE / 2.0 - PLAYER_HITBOX_INSET
}

/// Resolve the player's safety against the lane they stand in.
///
/// Invincibility protects against cars and drowning, but drifting off the
/// world edge on a water lane is always lethal.
pub fn resolve(player: Position, lanes: &[Lane], invincible: bool) -> Resolution {
    let Some(lane) = lanes.get(player.y as usize) else {
        return Resolution::safe();
    };

    match lane.kind {
        LaneKind::Grass => Resolution::safe(),
        LaneKind::Road => {
            if !invincible && hits_car(player.x, lane) {
                Resolution::death(DeathCause::Car)
            } else {
                Resolution::safe()
            }
        }
        LaneKind::Water => {
            if out_of_bounds(player.x) {
                return Resolution::death(DeathCause::Water);
            }
            match log_under(player.x, lane) {
                Some(ride) => Resolution::riding(ride),
                None if invincible => Resolution::safe(),
                None => Resolution::death(DeathCause::Water),
            }
        }
    }
}

/// True if the player's inset box overlaps any car's inset box
pub fn hits_car(player_x: f32, lane: &Lane) -> bool {
    let half = player_half_width();
    let (left, right) = (player_x - half, player_x + half);
    lane.cars.iter().any(|car| {
        let car_left = car.x + CAR_HITBOX_INSET;
        let car_right = car.x + car.width - CAR_HITBOX_INSET;
        left < car_right && right > car_left
    })
}

/// The log whose safe span contains the player's centre, if any
pub fn log_under(player_x: f32, lane: &Lane) -> Option<LogRide> {
    lane.logs
        .iter()
        .find(|log| {
            let (left, right) = log.safe_span(LOG_SAFE_INSET);
            player_x >= left && player_x <= right
        })
        .map(|log| log.ride())
}

/// Player centre has left the world
#[inline]
pub fn out_of_bounds(player_x: f32) -> bool {
    !(0.0..=GAME_WIDTH).contains(&player_x)
}

/// Pickups collected by one evaluation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pickups {
    /// (lane, coin id)
    pub coins: Vec<(u32, u32)>,
    /// (lane, pickup id, kind)
    pub power_ups: Vec<(u32, u32, PowerUpKind)>,
}

impl Pickups {
    pub fn is_empty(&self) -> bool {
        self.coins.is_empty() && self.power_ups.is_empty()
    }
}

/// Collect coins and power-ups the player is touching, marking them
/// collected. Already-collected items are skipped, so repeated calls never
/// report the same item twice.
///
/// With the magnet active, lanes within reach above and below are scanned
/// too and the capture half-width widens to the magnet radius.
pub fn collect_pickups(player: Position, lanes: &mut [Lane], magnet: bool) -> Pickups {
    let (first, last, reach) = if magnet {
        (
            player.y.saturating_sub(MAGNET_LANE_REACH),
            player.y.saturating_add(MAGNET_LANE_REACH),
            MAGNET_RADIUS,
        )
    } else {
        (player.y, player.y, PLAYER_SIZE / 2.0)
    };

    let mut found = Pickups::default();
    let end = (last as usize + 1).min(lanes.len());
    let start = (first as usize).min(end);

    for lane in lanes[start..end].iter_mut().filter(|l| l.kind == LaneKind::Grass) {
        for coin in lane.coins.iter_mut().filter(|c| !c.collected) {
            if (coin.x - player.x).abs() < reach {
                coin.collected = true;
                found.coins.push((lane.y, coin.id));
            }
        }
        for power_up in lane.power_ups.iter_mut().filter(|p| !p.collected) {
            if (power_up.x - player.x).abs() < reach {
                power_up.collected = true;
                found.power_ups.push((lane.y, power_up.id, power_up.kind));
            }
        }
    }

    found
}
