//! Game balance settings
//!
//! Persisted under their own key, separately from lifetime progress.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, keys};
use crate::sim::PowerUpKind;

/// Upper bound for any per-lane entity count
pub const MAX_PER_LANE: usize = 8;

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "normal" | "medium" => Some(Difficulty::Normal),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Multiplier applied to generated car and log speeds
    pub fn speed_scale(&self) -> f32 {
        match self {
            Difficulty::Easy => 0.75,
            Difficulty::Normal => 1.0,
            Difficulty::Hard => 1.3,
        }
    }
}

/// Tunable generation and power-up parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub difficulty: Difficulty,

    // === Lane mix (relative weights) ===
    pub road_weight: u32,
    pub grass_weight: u32,
    pub water_weight: u32,

    // === Grass pickups ===
    /// Chance a grass lane holds coins
    pub coin_chance: f32,
    pub coins_min: usize,
    pub coins_max: usize,
    /// Chance a grass lane holds a power-up (independent of coins)
    pub power_up_chance: f32,
    /// Pickups never spawn closer than this to either world edge
    pub edge_margin: f32,

    // === Roads (speeds in pixels per tick) ===
    pub cars_min: usize,
    pub cars_max: usize,
    pub car_speed_min: f32,
    pub car_speed_max: f32,
    pub car_width_min: f32,
    pub car_width_max: f32,

    // === Water ===
    pub logs_min: usize,
    pub logs_max: usize,
    pub log_speed_min: f32,
    pub log_speed_max: f32,
    pub log_width_min: f32,
    pub log_width_max: f32,
    /// Max offset from the evenly spaced slot
    pub log_jitter: f32,

    // === Power-up durations ===
    pub invincibility_ms: u64,
    pub magnet_ms: u64,
    pub slow_mo_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Normal,

            road_weight: 50,
            grass_weight: 30,
            water_weight: 20,

            coin_chance: 0.3,
            coins_min: 1,
            coins_max: 2,
            power_up_chance: 0.1,
            edge_margin: 50.0,

            cars_min: 1,
            cars_max: 2,
            car_speed_min: 1.0,
            car_speed_max: 4.0,
            car_width_min: 60.0,
            car_width_max: 100.0,

            logs_min: 2,
            logs_max: 3,
            log_speed_min: 1.0,
            log_speed_max: 2.5,
            log_width_min: 100.0,
            log_width_max: 160.0,
            log_jitter: 20.0,

            invincibility_ms: 5_000,
            magnet_ms: 8_000,
            slow_mo_ms: 5_000,
        }
    }
}

impl Settings {
    /// Create settings from a difficulty preset
    pub fn from_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Weights in `[road, grass, water]` order
    pub fn lane_weights(&self) -> [u32; 3] {
        [self.road_weight, self.grass_weight, self.water_weight]
    }

    /// How long a freshly activated power-up lasts
    pub fn duration_ms(&self, kind: PowerUpKind) -> u64 {
        match kind {
            PowerUpKind::Invincibility => self.invincibility_ms,
            PowerUpKind::Magnet => self.magnet_ms,
            PowerUpKind::SlowMo => self.slow_mo_ms,
        }
    }

    /// Repair out-of-range values so generation never misbehaves
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        let total: u64 = self.lane_weights().iter().map(|&w| w as u64).sum();
        if total == 0 {
            self.road_weight = defaults.road_weight;
            self.grass_weight = defaults.grass_weight;
            self.water_weight = defaults.water_weight;
        }

        self.coin_chance = sanitize_chance(self.coin_chance, defaults.coin_chance);
        self.power_up_chance = sanitize_chance(self.power_up_chance, defaults.power_up_chance);
        self.edge_margin = if self.edge_margin.is_finite() {
            self.edge_margin.clamp(0.0, crate::consts::GAME_WIDTH / 2.0)
        } else {
            defaults.edge_margin
        };

        order_counts(&mut self.coins_min, &mut self.coins_max);
        order_counts(&mut self.cars_min, &mut self.cars_max);
        order_counts(&mut self.logs_min, &mut self.logs_max);
        self.cars_min = self.cars_min.max(1);
        self.cars_max = self.cars_max.max(self.cars_min);
        self.logs_min = self.logs_min.max(1);
        self.logs_max = self.logs_max.max(self.logs_min);

        order_range(&mut self.car_speed_min, &mut self.car_speed_max);
        order_range(&mut self.car_width_min, &mut self.car_width_max);
        order_range(&mut self.log_speed_min, &mut self.log_speed_max);
        order_range(&mut self.log_width_min, &mut self.log_width_max);
        self.log_jitter = self.log_jitter.max(0.0);

        self
    }

    /// Load settings from the store, falling back to defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(keys::SETTINGS) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings ({})", settings.difficulty.as_str());
                    return settings.sanitized();
                }
                Err(e) => log::warn!("Malformed settings, using defaults: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Settings unavailable, using defaults: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to the store
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        match serde_json::to_string(self) {
            Ok(json) => {
                if let Err(e) = store.set(keys::SETTINGS, &json) {
                    log::warn!("Failed to save settings: {}", e);
                } else {
                    log::info!("Settings saved");
                }
            }
            Err(e) => log::warn!("Failed to encode settings: {}", e),
        }
    }
}

fn sanitize_chance(value: f32, fallback: f32) -> f32 {
    if value.is_finite() {
        value.clamp(0.0, 1.0)
    } else {
        fallback
    }
}

fn order_counts(min: &mut usize, max: &mut usize) {
    *min = (*min).min(MAX_PER_LANE);
    *max = (*max).min(MAX_PER_LANE);
    if *min > *max {
        std::mem::swap(min, max);
    }
}

fn order_range(min: &mut f32, max: &mut f32) {
    *min = min.max(0.0);
    *max = max.max(0.0);
    if *min > *max {
        std::mem::swap(min, max);
    }
}
