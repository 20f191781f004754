//! Score-driven ambience
//!
//! Time of day and weather are pure functions of the current score so a
//! renderer can derive them from any snapshot without extra state.

use serde::{Deserialize, Serialize};

/// Points per time-of-day phase
pub const POINTS_PER_PHASE: u64 = 25;
/// Points per weather change
pub const POINTS_PER_WEATHER: u64 = 50;
/// Weather stays clear below this score
pub const CLEAR_UNTIL: u64 = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Dawn,
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    const CYCLE: [TimeOfDay; 4] = [TimeOfDay::Dawn, TimeOfDay::Day, TimeOfDay::Dusk, TimeOfDay::Night];

    pub fn for_score(score: u64) -> Self {
        Self::CYCLE[((score / POINTS_PER_PHASE) % Self::CYCLE.len() as u64) as usize]
    }

    /// Darkening overlay strength (0 = none)
    pub fn overlay_opacity(&self) -> f32 {
        match self {
            TimeOfDay::Dawn => 0.15,
            TimeOfDay::Day => 0.0,
            TimeOfDay::Dusk => 0.2,
            TimeOfDay::Night => 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rain,
    Snow,
    Fog,
}

impl Weather {
    const PATTERN: [Weather; 6] = [
        Weather::Clear,
        Weather::Clear,
        Weather::Clear,
        Weather::Rain,
        Weather::Snow,
        Weather::Fog,
    ];

    pub fn for_score(score: u64) -> Self {
        if score < CLEAR_UNTIL {
            return Weather::Clear;
        }
        Self::PATTERN[((score / POINTS_PER_WEATHER) % Self::PATTERN.len() as u64) as usize]
    }
}
