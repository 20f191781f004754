//! Power-up timers and coin accounting
//!
//! Timers are absolute deadlines in host milliseconds. Expired entries are
//! purged by a periodic sweep; queries never report an entry past its
//! deadline even if the sweep has not run yet.

use serde::{Deserialize, Serialize};

use super::state::{ActivePowerUp, GameState, PowerUpKind};
use crate::consts::{COIN_SCORE_BONUS, SLOW_MO_FACTOR};

/// Active power-up effects, at most one per kind
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActivePowerUps(Vec<ActivePowerUp>);

impl ActivePowerUps {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a power-up. Re-activating replaces the deadline
    /// instead of stacking a second entry.
    pub fn activate(&mut self, kind: PowerUpKind, now_ms: u64, duration_ms: u64) {
        let end_time_ms = now_ms.saturating_add(duration_ms);
        match self.0.iter_mut().find(|p| p.kind == kind) {
            Some(existing) => existing.end_time_ms = end_time_ms,
            None => self.0.push(ActivePowerUp { kind, end_time_ms }),
        }
        log::debug!("{} active until {}", kind.label(), end_time_ms);
    }

    /// Purge entries whose deadline has passed. Returns the expired kinds.
    pub fn expire(&mut self, now_ms: u64) -> Vec<PowerUpKind> {
        let mut expired = Vec::new();
        self.0.retain(|p| {
            let live = p.end_time_ms > now_ms;
            if !live {
                expired.push(p.kind);
            }
            live
        });
        expired
    }

    /// True iff an entry of this kind is still running
    pub fn has(&self, kind: PowerUpKind, now_ms: u64) -> bool {
        self.0.iter().any(|p| p.kind == kind && p.end_time_ms > now_ms)
    }

    /// Time left on a power-up, if running
    pub fn remaining_ms(&self, kind: PowerUpKind, now_ms: u64) -> Option<u64> {
        self.0
            .iter()
            .find(|p| p.kind == kind && p.end_time_ms > now_ms)
            .map(|p| p.end_time_ms - now_ms)
    }

    /// Hazard speed multiplier for this instant
    pub fn hazard_time_scale(&self, now_ms: u64) -> f32 {
        if self.has(PowerUpKind::SlowMo, now_ms) {
            SLOW_MO_FACTOR
        } else {
            1.0
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &ActivePowerUp> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

/// Credit collected coins: score bonus, run count, and lifetime total
pub fn credit_coins(state: &mut GameState, count: u64) {
    if count == 0 {
        return;
    }
    state.score += COIN_SCORE_BONUS * count;
    state.coins_collected += count;
    state.progress.add_coins(count);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::Progress;

    #[test]
    fn test_activate_then_query() {
        let mut active = ActivePowerUps::new();
        active.activate(PowerUpKind::Magnet, 1_000, 8_000);
        assert!(active.has(PowerUpKind::Magnet, 1_000));
        assert!(active.has(PowerUpKind::Magnet, 8_999));
        assert!(!active.has(PowerUpKind::Magnet, 9_000));
        assert!(!active.has(PowerUpKind::SlowMo, 1_000));
    }

    #[test]
    fn test_reactivation_resets_instead_of_stacking() {
        let mut active = ActivePowerUps::new();
        active.activate(PowerUpKind::Invincibility, 0, 5_000);
        active.activate(PowerUpKind::Invincibility, 3_000, 5_000);
        assert_eq!(active.len(), 1);
        assert_eq!(active.remaining_ms(PowerUpKind::Invincibility, 3_000), Some(5_000));
        assert!(active.has(PowerUpKind::Invincibility, 7_999));
    }

    #[test]
    fn test_expire_purges_only_finished() {
        let mut active = ActivePowerUps::new();
        active.activate(PowerUpKind::SlowMo, 0, 100);
        active.activate(PowerUpKind::Magnet, 0, 1_000);
        let expired = active.expire(100);
        assert_eq!(expired, vec![PowerUpKind::SlowMo]);
        assert_eq!(active.len(), 1);
        assert!(active.expire(500).is_empty());
    }

    #[test]
    fn test_query_ignores_unswept_expired_entry() {
        let mut active = ActivePowerUps::new();
        active.activate(PowerUpKind::SlowMo, 0, 100);
        assert_eq!(active.len(), 1);
        assert!(!active.has(PowerUpKind::SlowMo, 150));
        assert_eq!(active.hazard_time_scale(150), 1.0);
        assert_eq!(active.hazard_time_scale(50), SLOW_MO_FACTOR);
    }

    #[test]
    fn test_credit_coins() {
        let mut state = GameState::new(Progress::default());
        state.score = 3;
        credit_coins(&mut state, 2);
        assert_eq!(state.score, 13);
        assert_eq!(state.coins_collected, 2);
        assert_eq!(state.total_coins_ever(), 2);
    }
}
