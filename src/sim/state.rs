//! Game state and core simulation types
//!
//! Everything a renderer needs lives in [`GameState`]; it is handed out
//! read-only and serializes to a JSON snapshot.

use serde::{Deserialize, Serialize};

use super::powerups::ActivePowerUps;
use crate::progression::Progress;

/// Lane terrain. Decides which entity lists a lane may populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaneKind {
    /// Safe ground; may hold coins and power-ups
    Grass,
    /// Holds cars
    Road,
    /// Holds logs; lethal without one underfoot
    Water,
}

/// Car paint, chosen at generation time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CarColor {
    Red,
    Blue,
    Yellow,
    Green,
    Purple,
}

impl CarColor {
    pub const ALL: [CarColor; 5] = [
        CarColor::Red,
        CarColor::Blue,
        CarColor::Yellow,
        CarColor::Green,
        CarColor::Purple,
    ];
}

/// A car. `x` is the left edge; it wraps around the world forever.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: u32,
    pub x: f32,
    /// Pixels per tick
    pub speed: f32,
    /// +1 moves right, -1 moves left
    pub direction: i8,
    pub width: f32,
    pub color: CarColor,
}

/// A floating log. Same wraparound rule as cars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Log {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub speed: f32,
    pub direction: i8,
}

impl Log {
    /// Horizontal span the player can stand on
    pub fn safe_span(&self, inset: f32) -> (f32, f32) {
        (self.x + inset, self.x + self.width - inset)
    }

    pub fn ride(&self) -> LogRide {
        LogRide {
            log_id: self.id,
            speed: self.speed,
            direction: self.direction,
        }
    }
}

/// Coin pickup. Only `collected` ever changes after generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    /// Centre x
    pub x: f32,
    pub collected: bool,
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerUpKind {
    /// Immune to cars and drowning
    Invincibility,
    /// Wider pickup radius across neighbouring lanes
    Magnet,
    /// Hazards move at reduced speed
    #[serde(rename = "slowmo")]
    SlowMo,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Invincibility,
        PowerUpKind::Magnet,
        PowerUpKind::SlowMo,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PowerUpKind::Invincibility => "SHIELD",
            PowerUpKind::Magnet => "MAGNET",
            PowerUpKind::SlowMo => "SLOW-MO",
        }
    }
}

/// Power-up lying in a grass lane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpPickup {
    pub id: u32,
    pub x: f32,
    pub kind: PowerUpKind,
    pub collected: bool,
}

/// One row of the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lane {
    pub kind: LaneKind,
    pub y: u32,
    pub cars: Vec<Car>,
    pub logs: Vec<Log>,
    pub coins: Vec<Coin>,
    pub power_ups: Vec<PowerUpPickup>,
    /// Lane-wide hazard speed (0 on grass)
    pub speed: f32,
    /// Lane-wide hazard direction
    pub direction: i8,
}

impl Lane {
    /// Empty grass lane
    pub fn grass(y: u32) -> Self {
        Self {
            kind: LaneKind::Grass,
            y,
            cars: Vec::new(),
            logs: Vec::new(),
            coins: Vec::new(),
            power_ups: Vec::new(),
            speed: 0.0,
            direction: 1,
        }
    }
}

/// Player position: centre x in pixels, lane index
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: u32,
}

/// Movement imparted by the log the player stands on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogRide {
    pub log_id: u32,
    pub speed: f32,
    pub direction: i8,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeathCause {
    Car,
    Water,
}

impl DeathCause {
    pub fn label(&self) -> &'static str {
        match self {
            DeathCause::Car => "HIT BY CAR",
            DeathCause::Water => "DROWNED",
        }
    }
}

/// Timed power-up effect. At most one entry per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePowerUp {
    pub kind: PowerUpKind,
    pub end_time_ms: u64,
}

/// Player state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerPhase {
    /// Accepting input
    Alive,
    /// Mid-hop; input is dropped until the deadline passes
    Hopping { until_ms: u64 },
    /// Run over; only reset is honoured
    Dead,
}

/// Notable things that happened since the host last drained events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Hopped { to: Position },
    LanesGenerated { from: u32, count: u32 },
    CoinCollected { lane: u32, id: u32 },
    PowerUpCollected { lane: u32, id: u32, kind: PowerUpKind },
    PowerUpExpired { kind: PowerUpKind },
    Died { cause: DeathCause },
    NewHighScore { score: u64 },
    SkinUnlocked { skin: crate::progression::SkinId },
    Reset,
}

/// End-of-run report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub score: u64,
    pub high_score: u64,
    pub coins_collected: u64,
    pub total_coins_ever: u64,
    pub death_cause: DeathCause,
    pub new_high_score: bool,
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityIds {
    next: u32,
}

impl EntityIds {
    pub fn next_id(&mut self) -> u32 {
        self.next += 1;
        self.next
    }
}

/// Complete game state (read-only for renderers)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub player: Position,
    pub phase: PlayerPhase,
    /// Exactly one lane per index, `lanes[i].y == i`
    pub lanes: Vec<Lane>,
    /// Furthest-progress score plus coin bonuses
    pub score: u64,
    /// Highest lane reached this run
    pub furthest_lane: u32,
    /// Coins picked up this run
    pub coins_collected: u64,
    pub death_cause: Option<DeathCause>,
    pub active_power_ups: ActivePowerUps,
    /// Set while standing on a log in a water lane
    pub riding: Option<LogRide>,
    /// Lifetime high score, coins, and skins
    pub progress: Progress,
    pub last_run: Option<RunSummary>,
    /// Pending events, drained by the host
    pub events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub(crate) ids: EntityIds,
}

impl GameState {
    /// Fresh run state around existing lifetime progress
    pub fn new(progress: Progress) -> Self {
        Self {
            player: Position {
                x: crate::spawn_x(),
                y: 0,
            },
            phase: PlayerPhase::Alive,
            lanes: Vec::new(),
            score: 0,
            furthest_lane: 0,
            coins_collected: 0,
            death_cause: None,
            active_power_ups: ActivePowerUps::new(),
            riding: None,
            progress,
            last_run: None,
            events: Vec::new(),
            time_ticks: 0,
            ids: EntityIds::default(),
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == PlayerPhase::Dead
    }

    pub fn is_hopping(&self) -> bool {
        matches!(self.phase, PlayerPhase::Hopping { .. })
    }

    pub fn is_on_log(&self) -> bool {
        self.riding.is_some()
    }

    pub fn high_score(&self) -> u64 {
        self.progress.high_score
    }

    pub fn total_coins_ever(&self) -> u64 {
        self.progress.total_coins_ever
    }

    /// Index one past the last generated lane
    pub fn frontier(&self) -> u32 {
        self.lanes.len() as u32
    }

    /// Lanes in view, from `first` upward
    pub fn visible_lanes(&self, first: u32) -> &[Lane] {
        let start = (first as usize).min(self.lanes.len());
        let end = (start + crate::consts::VISIBLE_LANES).min(self.lanes.len());
        &self.lanes[start..end]
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
