//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only, and only during lane generation
//! - Time comes from the host as a millisecond clock
//! - Stable iteration order (lanes by index, entities in generation order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod hazards;
pub mod lanes;
pub mod player;
pub mod powerups;
pub mod rng;
pub mod state;
pub mod tick;

pub use collision::{Pickups, Resolution, collect_pickups, resolve};
pub use lanes::LaneGenerator;
pub use player::Direction;
pub use powerups::ActivePowerUps;
pub use rng::{RandomSource, SeededRng};
pub use state::{
    ActivePowerUp, Car, CarColor, Coin, DeathCause, GameEvent, GameState, Lane, LaneKind, Log,
    LogRide, PlayerPhase, Position, PowerUpKind, PowerUpPickup, RunSummary,
};
pub use tick::{Command, Game};
