//! Crossy Sim - simulation core for an endless lane-crossing game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (lanes, hazards, collisions, power-ups, game state)
//! - `progression`: Skins and lifetime progress
//! - `persistence`: Key/value storage back ends
//! - `settings`: Data-driven game balance
//! - `platform`: Input mapping and fixed-step timing
//! - `ambience`: Score-driven time of day and weather for renderers

pub mod ambience;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use persistence::{KeyValueStore, MemoryStore, StoreError};
pub use progression::{Progress, SkinCard, SkinId, SkinRequirement, UnlockableSkin};
pub use settings::{Difficulty, Settings};
pub use sim::{Command, Direction, Game, GameState};

/// World configuration constants
pub mod consts {
    /// Simulation tick interval (~60 Hz)
    pub const TICK_MS: u64 = 16;
    /// Maximum ticks per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// World dimensions
    pub const GAME_WIDTH: f32 = 600.0;
    pub const GRID_SIZE: f32 = 50.0;
    pub const VISIBLE_LANES: usize = 12;

    /// Player footprint (square)
    pub const PLAYER_SIZE: f32 = 40.0;
    /// Shrinks the player hitbox on each side to forgive edge grazes
    pub const PLAYER_HITBOX_INSET: f32 = 5.0;
    /// Shrinks car hitboxes on each side
    pub const CAR_HITBOX_INSET: f32 = 5.0;
    /// Shrinks the safe span of a log on each side
    pub const LOG_SAFE_INSET: f32 = 5.0;

    /// Lanes generated at run start
    pub const INITIAL_LANES: usize = 50;
    /// Grow the world when the player gets this close to the frontier
    pub const FRONTIER_MARGIN: usize = 10;
    /// Lanes appended per growth step
    pub const LANE_BATCH: usize = 10;

    /// Input lockout after each hop
    pub const HOP_COOLDOWN_MS: u64 = 150;
    /// Interval of the power-up expiry sweep
    pub const POWER_UP_SWEEP_MS: u64 = 100;

    /// Score bonus per coin
    pub const COIN_SCORE_BONUS: u64 = 5;
    /// Capture half-width while the magnet is active
    pub const MAGNET_RADIUS: f32 = 100.0;
    /// Lanes above and below the player scanned by the magnet
    pub const MAGNET_LANE_REACH: u32 = 2;
    /// Hazard speed multiplier during slow-mo
    pub const SLOW_MO_FACTOR: f32 = 0.4;
}

/// Player x at spawn (centre of the world)
#[inline]
pub fn spawn_x() -> f32 {
    consts::GAME_WIDTH / 2.0
}

/// Clamp a player centre x so the whole footprint stays on screen
#[inline]
pub fn clamp_player_x(x: f32) -> f32 {
    let half = consts::PLAYER_SIZE / 2.0;
    x.clamp(half, consts::GAME_WIDTH - half)
}
