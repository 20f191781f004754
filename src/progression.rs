//! Lifetime progression: high score, coin total, and unlockable skins
//!
//! Persisted through a [`KeyValueStore`] and carried across runs. Everything
//! here is monotonic: the high score and coin total only grow, and an
//! unlocked skin never locks again.

use serde::{Deserialize, Serialize};

use crate::persistence::{KeyValueStore, keys};

/// Player skins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkinId {
    Base,
    Duck,
    Penguin,
    Frog,
    Robot,
    Golden,
}

impl SkinId {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkinId::Base => "base",
            SkinId::Duck => "duck",
            SkinId::Penguin => "penguin",
            SkinId::Frog => "frog",
            SkinId::Robot => "robot",
            SkinId::Golden => "golden",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "base" => Some(SkinId::Base),
            "duck" => Some(SkinId::Duck),
            "penguin" => Some(SkinId::Penguin),
            "frog" => Some(SkinId::Frog),
            "robot" => Some(SkinId::Robot),
            "golden" => Some(SkinId::Golden),
            _ => None,
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            SkinId::Base => "CHICKEN",
            SkinId::Duck => "DUCK",
            SkinId::Penguin => "PENGUIN",
            SkinId::Frog => "FROG",
            SkinId::Robot => "ROBOT",
            SkinId::Golden => "GOLDEN",
        }
    }

    /// Preview colour (CSS hex)
    pub fn color(&self) -> &'static str {
        match self {
            SkinId::Base => "#f5f5f5",
            SkinId::Duck => "#ffd93d",
            SkinId::Penguin => "#1b263b",
            SkinId::Frog => "#4ade80",
            SkinId::Robot => "#94a3b8",
            SkinId::Golden => "#f59e0b",
        }
    }
}

/// What it takes to unlock a skin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum SkinRequirement {
    /// Lifetime coins collected
    Coins(u64),
    /// Best score reached
    Score(u64),
}

impl SkinRequirement {
    pub fn is_met(&self, score: u64, total_coins: u64) -> bool {
        match *self {
            SkinRequirement::Coins(value) => total_coins >= value,
            SkinRequirement::Score(value) => score >= value,
        }
    }

    /// Progress toward the requirement in [0, 1]
    pub fn fraction(&self, score: u64, total_coins: u64) -> f32 {
        let (have, need) = match *self {
            SkinRequirement::Coins(value) => (total_coins, value),
            SkinRequirement::Score(value) => (score, value),
        };
        if need == 0 {
            return 1.0;
        }
        (have as f32 / need as f32).min(1.0)
    }
}

/// A skin and its lock state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockableSkin {
    pub id: SkinId,
    pub requirement: SkinRequirement,
    pub unlocked: bool,
}

impl UnlockableSkin {
    pub fn new(id: SkinId, requirement: SkinRequirement) -> Self {
        Self {
            id,
            requirement,
            unlocked: false,
        }
    }
}

/// The stock skin table; only the base skin starts unlocked
pub fn default_skins() -> Vec<UnlockableSkin> {
    vec![
        UnlockableSkin {
            id: SkinId::Base,
            requirement: SkinRequirement::Coins(0),
            unlocked: true,
        },
        UnlockableSkin::new(SkinId::Duck, SkinRequirement::Coins(35)),
        UnlockableSkin::new(SkinId::Penguin, SkinRequirement::Score(50)),
        UnlockableSkin::new(SkinId::Frog, SkinRequirement::Coins(100)),
        UnlockableSkin::new(SkinId::Robot, SkinRequirement::Score(150)),
        UnlockableSkin::new(SkinId::Golden, SkinRequirement::Coins(500)),
    ]
}

/// Skin selector entry for renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkinCard {
    pub id: SkinId,
    pub name: &'static str,
    pub color: &'static str,
    pub requirement: SkinRequirement,
    pub unlocked: bool,
    pub selected: bool,
    /// Progress toward unlocking, 1.0 once unlocked
    pub progress: f32,
}

/// Lifetime progress carried across runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub high_score: u64,
    pub total_coins_ever: u64,
    pub skins: Vec<UnlockableSkin>,
    pub selected_skin: SkinId,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            high_score: 0,
            total_coins_ever: 0,
            skins: default_skins(),
            selected_skin: SkinId::Base,
        }
    }
}

impl Progress {
    /// Record a finished run's score. Returns true on a new high score.
    pub fn record_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            true
        } else {
            false
        }
    }

    pub fn add_coins(&mut self, coins: u64) {
        self.total_coins_ever = self.total_coins_ever.saturating_add(coins);
    }

    /// Unlock every locked skin whose requirement is met.
    /// Returns the skins unlocked by this call.
    pub fn check_unlocks(&mut self, score: u64, total_coins: u64) -> Vec<SkinId> {
        let mut unlocked = Vec::new();
        for skin in self.skins.iter_mut().filter(|s| !s.unlocked) {
            if skin.requirement.is_met(score, total_coins) {
                skin.unlocked = true;
                unlocked.push(skin.id);
            }
        }
        unlocked
    }

    pub fn is_unlocked(&self, id: SkinId) -> bool {
        self.skins.iter().any(|s| s.id == id && s.unlocked)
    }

    /// Select a skin. Locked or unknown skins are rejected.
    pub fn select_skin(&mut self, id: SkinId) -> bool {
        if !self.is_unlocked(id) {
            log::debug!("Rejected locked skin {}", id.as_str());
            return false;
        }
        self.selected_skin = id;
        true
    }

    /// Selector entries in table order
    pub fn skin_cards(&self) -> Vec<SkinCard> {
        self.skins
            .iter()
            .map(|skin| SkinCard {
                id: skin.id,
                name: skin.id.name(),
                color: skin.id.color(),
                requirement: skin.requirement,
                unlocked: skin.unlocked,
                selected: skin.id == self.selected_skin,
                progress: if skin.unlocked {
                    1.0
                } else {
                    skin.requirement.fraction(self.high_score, self.total_coins_ever)
                },
            })
            .collect()
    }

    /// Load progress from the store. Missing or malformed values fall back
    /// to their defaults individually.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut progress = Self {
            high_score: load_count(store, keys::HIGH_SCORE),
            total_coins_ever: load_count(store, keys::TOTAL_COINS),
            ..Self::default()
        };

        if let Some(stored) = load_json::<Vec<UnlockableSkin>>(store, keys::SKINS) {
            progress.skins = merge_skins(stored);
        }

        if let Some(selected) = load_json::<SkinId>(store, keys::SELECTED_SKIN) {
            if !progress.select_skin(selected) {
                log::warn!("Stored skin {} is locked, using base", selected.as_str());
            }
        }

        log::info!(
            "Loaded progress: high score {}, {} coins, {} skins unlocked",
            progress.high_score,
            progress.total_coins_ever,
            progress.skins.iter().filter(|s| s.unlocked).count()
        );
        progress
    }

    /// Save progress to the store. Failures are logged, never fatal.
    pub fn save(&self, store: &mut dyn KeyValueStore) {
        let skins = serde_json::to_string(&self.skins);
        let selected = serde_json::to_string(&self.selected_skin);
        let (skins, selected) = match (skins, selected) {
            (Ok(skins), Ok(selected)) => (skins, selected),
            (Err(e), _) | (_, Err(e)) => {
                log::warn!("Failed to encode progress: {}", e);
                return;
            }
        };

        let writes = [
            (keys::HIGH_SCORE, self.high_score.to_string()),
            (keys::TOTAL_COINS, self.total_coins_ever.to_string()),
            (keys::SKINS, skins),
            (keys::SELECTED_SKIN, selected),
        ];
        for (key, value) in writes {
            if let Err(e) = store.set(key, &value) {
                log::warn!("Failed to save {}: {}", key, e);
                return;
            }
        }
        log::debug!("Progress saved");
    }
}

/// Carry stored unlock flags onto the default table by id. The base skin
/// stays unlocked regardless of what was stored.
fn merge_skins(stored: Vec<UnlockableSkin>) -> Vec<UnlockableSkin> {
    let mut skins = default_skins();
    for skin in &mut skins {
        if stored.iter().any(|s| s.id == skin.id && s.unlocked) {
            skin.unlocked = true;
        }
    }
    skins
}

fn load_count(store: &dyn KeyValueStore, key: &str) -> u64 {
    match store.get(key) {
        Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Malformed {} ({:?}), using 0", key, raw);
            0
        }),
        Ok(None) => 0,
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            0
        }
    }
}

fn load_json<T: serde::de::DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<T> {
    match store.get(key) {
        Ok(Some(raw)) => match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Malformed {}, using default: {}", key, e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Failed to read {}: {}", key, e);
            None
        }
    }
}
