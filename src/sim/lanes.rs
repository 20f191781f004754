//! Procedural lane generation
//!
//! Lanes are built lazily in batches and only ever appended. Lane 0 is
//! always empty grass so the player never spawns in danger.

use super::rng::RandomSource;
use super::state::{Car, CarColor, Coin, EntityIds, Lane, LaneKind, Log, PowerUpKind, PowerUpPickup};
use crate::consts::*;
use crate::settings::Settings;

/// Lane kinds in the order of [`Settings::lane_weights`]
const WEIGHTED_KINDS: [LaneKind; 3] = [LaneKind::Road, LaneKind::Grass, LaneKind::Water];

/// Builds lanes from settings and a random source
#[derive(Debug, Clone)]
pub struct LaneGenerator {
    settings: Settings,
}

impl LaneGenerator {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: settings.sanitized(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build `count` lanes starting at index `start`
    pub fn generate<R: RandomSource>(
        &self,
        rng: &mut R,
        ids: &mut EntityIds,
        start: u32,
        count: u32,
    ) -> Vec<Lane> {
        (start..start + count)
            .map(|y| self.create_lane(rng, ids, y))
            .collect()
    }

    /// Append `count` lanes after the current frontier. Returns the index of
    /// the first new lane.
    pub fn extend<R: RandomSource>(
        &self,
        lanes: &mut Vec<Lane>,
        rng: &mut R,
        ids: &mut EntityIds,
        count: u32,
    ) -> u32 {
        let start = lanes.len() as u32;
        lanes.extend(self.generate(rng, ids, start, count));
        log::debug!("Generated lanes {}..{}", start, start + count);
        start
    }

    /// Grow the world in batches until lane `y` exists. Returns the number
    /// of lanes appended (0 if `y` was already generated).
    pub fn ensure_lane<R: RandomSource>(
        &self,
        lanes: &mut Vec<Lane>,
        rng: &mut R,
        ids: &mut EntityIds,
        y: u32,
    ) -> u32 {
        let mut added = 0;
        while lanes.len() as u32 <= y {
            self.extend(lanes, rng, ids, LANE_BATCH as u32);
            added += LANE_BATCH as u32;
        }
        added
    }

    /// Pick the terrain for lane `y`
    pub fn roll_kind<R: RandomSource>(&self, rng: &mut R, y: u32) -> LaneKind {
        if y == 0 {
            return LaneKind::Grass;
        }
        WEIGHTED_KINDS[rng.weighted_index(&self.settings.lane_weights())]
    }

    fn create_lane<R: RandomSource>(&self, rng: &mut R, ids: &mut EntityIds, y: u32) -> Lane {
        if y == 0 {
            return Lane::grass(0);
        }
        match self.roll_kind(rng, y) {
            LaneKind::Grass => self.grass_lane(rng, ids, y),
            LaneKind::Road => self.road_lane(rng, ids, y),
            LaneKind::Water => self.water_lane(rng, ids, y),
        }
    }

    fn grass_lane<R: RandomSource>(&self, rng: &mut R, ids: &mut EntityIds, y: u32) -> Lane {
        let s = &self.settings;
        let mut lane = Lane::grass(y);
        let (min_x, max_x) = (s.edge_margin, GAME_WIDTH - s.edge_margin);

        if rng.chance(s.coin_chance) {
            let count = rng.range_usize(s.coins_min, s.coins_max);
            for _ in 0..count {
                lane.coins.push(Coin {
                    id: ids.next_id(),
                    x: rng.range_f32(min_x, max_x),
                    collected: false,
                });
            }
        }

        if rng.chance(s.power_up_chance) {
            let kind = PowerUpKind::ALL[rng.range_usize(0, PowerUpKind::ALL.len() - 1)];
            lane.power_ups.push(PowerUpPickup {
                id: ids.next_id(),
                x: rng.range_f32(min_x, max_x),
                kind,
                collected: false,
            });
        }

        lane
    }

    fn road_lane<R: RandomSource>(&self, rng: &mut R, ids: &mut EntityIds, y: u32) -> Lane {
        let s = &self.settings;
        // Shared by every car so traffic in a lane never overlaps itself
        let speed = rng.range_f32(s.car_speed_min, s.car_speed_max) * s.difficulty.speed_scale();
        let direction = rng.sign();
        let count = rng.range_usize(s.cars_min, s.cars_max);

        let cars = (0..count)
            .map(|_| {
                let x = rng.range_f32(0.0, GAME_WIDTH);
                let width = rng.range_f32(s.car_width_min, s.car_width_max);
                let color = CarColor::ALL[rng.range_usize(0, CarColor::ALL.len() - 1)];
                Car {
                    id: ids.next_id(),
                    x,
                    speed,
                    direction,
                    width,
                    color,
                }
            })
            .collect();

        Lane {
            kind: LaneKind::Road,
            cars,
            speed,
            direction,
            ..Lane::grass(y)
        }
    }

    fn water_lane<R: RandomSource>(&self, rng: &mut R, ids: &mut EntityIds, y: u32) -> Lane {
        let s = &self.settings;
        let speed = rng.range_f32(s.log_speed_min, s.log_speed_max) * s.difficulty.speed_scale();
        let direction = rng.sign();
        let count = rng.range_usize(s.logs_min, s.logs_max);
        let spacing = GAME_WIDTH / count as f32;

        let logs = (0..count)
            .map(|i| {
                let jitter = rng.range_f32(-s.log_jitter, s.log_jitter);
                let width = rng.range_f32(s.log_width_min, s.log_width_max);
                Log {
                    id: ids.next_id(),
                    x: i as f32 * spacing + jitter,
                    width,
                    speed,
                    direction,
                }
            })
            .collect();

        Lane {
            kind: LaneKind::Water,
            logs,
            speed,
            direction,
            ..Lane::grass(y)
        }
    }
}
