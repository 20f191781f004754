//! Game controller and fixed-rate tick
//!
//! [`Game`] owns the state, the random source, and the backing store. The
//! host feeds it two things, both stamped with a monotonic millisecond clock:
//! - commands from input (`handle_command`)
//! - ticks at ~60 Hz (`tick`)
//!
//! Ordering within a tick: finish the previous hop's deferred evaluation,
//! advance hazards, carry the player on their log, then resolve safety at
//! the resting position.

use serde::{Deserialize, Serialize};

use super::collision::{collect_pickups, resolve};
use super::hazards;
use super::lanes::LaneGenerator;
use super::player::{self, Direction};
use super::rng::{RandomSource, SeededRng};
use super::state::{DeathCause, GameEvent, GameState, Lane, PlayerPhase, PowerUpKind, RunSummary};
use super::powerups::credit_coins;
use crate::consts::*;
use crate::persistence::KeyValueStore;
use crate::progression::{Progress, SkinId};
use crate::settings::Settings;

/// Input commands. Keyboard and on-screen buttons both map onto these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Move(Direction),
    Reset,
}

/// A single run plus lifetime progress
pub struct Game<S: KeyValueStore, R: RandomSource = SeededRng> {
    state: GameState,
    generator: LaneGenerator,
    rng: R,
    store: S,
    /// Last hop still needs its collision and pickup evaluation
    pending_hop: bool,
    /// When the next power-up expiry sweep is due
    next_sweep_ms: u64,
}

impl<S: KeyValueStore> Game<S, SeededRng> {
    /// Start a game with a seeded RNG, loading settings and progress from
    /// the store
    pub fn new(seed: u64, store: S) -> Self {
        let settings = Settings::load(&store);
        log::info!("New game (seed {}, {})", seed, settings.difficulty.as_str());
        Self::with_parts(settings, SeededRng::new(seed), store)
    }
}

impl<S: KeyValueStore, R: RandomSource> Game<S, R> {
    /// Start a game from explicit parts. Progress is loaded from the store.
    pub fn with_parts(settings: Settings, rng: R, store: S) -> Self {
        let progress = Progress::load(&store);
        let mut game = Self {
            state: GameState::new(progress),
            generator: LaneGenerator::new(settings),
            rng,
            store,
            pending_hop: false,
            next_sweep_ms: 0,
        };
        game.generate_initial_lanes();
        game
    }

    /// Read-only snapshot for renderers
    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn settings(&self) -> &Settings {
        self.generator.settings()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Take events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn has_power_up(&self, kind: PowerUpKind, now_ms: u64) -> bool {
        self.state.active_power_ups.has(kind, now_ms)
    }

    /// Lane `y`, generating up to it first if needed
    pub fn lane(&mut self, y: u32) -> &Lane {
        self.ensure_lane(y);
        &self.state.lanes[y as usize]
    }

    /// Apply a command. Returns false when it was dropped (dead or mid-hop).
    pub fn handle_command(&mut self, command: Command, now_ms: u64) -> bool {
        match command {
            Command::Move(direction) => self.move_player(direction, now_ms),
            Command::Reset => {
                self.reset();
                true
            }
        }
    }

    /// Hop one cell. Score and world growth happen now; collision and
    /// pickups for the new cell are evaluated at the next tick.
    pub fn move_player(&mut self, direction: Direction, now_ms: u64) -> bool {
        match self.state.phase {
            PlayerPhase::Dead => return false,
            PlayerPhase::Hopping { until_ms } if now_ms < until_ms => return false,
            _ => {}
        }

        // Previous cell must be judged before leaving it
        if self.pending_hop {
            self.pending_hop = false;
            self.evaluate_landing(now_ms);
            if self.state.phase == PlayerPhase::Dead {
                return false;
            }
        }

        let to = player::hop(self.state.player, direction);
        self.grow_world_near(to.y);

        if to.y > self.state.furthest_lane {
            self.state.furthest_lane = to.y;
            self.state.score += 1;
        }

        self.state.player = to;
        self.state.riding = None;
        self.pending_hop = true;
        self.state.phase = PlayerPhase::Hopping {
            until_ms: now_ms + HOP_COOLDOWN_MS,
        };
        self.state.events.push(GameEvent::Hopped { to });
        true
    }

    /// Start a new run. Lifetime progress survives; everything else,
    /// including pending timers, is discarded.
    pub fn reset(&mut self) {
        let progress = self.state.progress.clone();
        self.state = GameState::new(progress);
        self.pending_hop = false;
        self.next_sweep_ms = 0;
        self.state.events.push(GameEvent::Reset);
        self.generate_initial_lanes();
        log::info!("Run reset");
    }

    /// Select a skin and persist the choice. Locked skins are rejected.
    pub fn select_skin(&mut self, skin: SkinId) -> bool {
        if !self.state.progress.select_skin(skin) {
            return false;
        }
        self.state.progress.save(&mut self.store);
        true
    }

    /// Purge expired power-ups
    pub fn sweep_power_ups(&mut self, now_ms: u64) {
        for kind in self.state.active_power_ups.expire(now_ms) {
            log::debug!("{} expired", kind.label());
            self.state.events.push(GameEvent::PowerUpExpired { kind });
        }
    }

    /// Advance the simulation by one fixed tick
    pub fn tick(&mut self, now_ms: u64) {
        if self.state.phase == PlayerPhase::Dead {
            return;
        }
        self.state.time_ticks += 1;

        if let PlayerPhase::Hopping { until_ms } = self.state.phase {
            if now_ms >= until_ms {
                self.state.phase = PlayerPhase::Alive;
            }
        }

        if now_ms >= self.next_sweep_ms {
            self.sweep_power_ups(now_ms);
            self.next_sweep_ms = now_ms + POWER_UP_SWEEP_MS;
        }

        // The hop landed before hazards moved this tick
        if self.pending_hop {
            self.pending_hop = false;
            self.evaluate_landing(now_ms);
            if self.state.phase == PlayerPhase::Dead {
                return;
            }
        }

        let time_scale = self.state.active_power_ups.hazard_time_scale(now_ms);
        hazards::advance(&mut self.state.lanes, time_scale);

        if let Some(ride) = self.state.riding {
            self.state.player.x = player::drift(self.state.player.x, &ride, time_scale);
        }

        let invincible = self.has_power_up(PowerUpKind::Invincibility, now_ms);
        let outcome = resolve(self.state.player, &self.state.lanes, invincible);
        match outcome.cause {
            Some(cause) if outcome.dead => self.die(cause),
            _ => self.state.riding = outcome.on_log,
        }
    }

    /// Collision and pickups for the cell the player just hopped into
    fn evaluate_landing(&mut self, now_ms: u64) {
        let invincible = self.has_power_up(PowerUpKind::Invincibility, now_ms);
        let outcome = resolve(self.state.player, &self.state.lanes, invincible);
        if let Some(cause) = outcome.cause.filter(|_| outcome.dead) {
            self.die(cause);
            return;
        }
        self.state.riding = outcome.on_log;

        let magnet = self.has_power_up(PowerUpKind::Magnet, now_ms);
        let found = collect_pickups(self.state.player, &mut self.state.lanes, magnet);

        credit_coins(&mut self.state, found.coins.len() as u64);
        for (lane, id) in found.coins {
            self.state.events.push(GameEvent::CoinCollected { lane, id });
        }

        for (lane, id, kind) in found.power_ups {
            let duration = self.generator.settings().duration_ms(kind);
            self.state.active_power_ups.activate(kind, now_ms, duration);
            log::info!("Picked up {} ({} ms)", kind.label(), duration);
            self.state.events.push(GameEvent::PowerUpCollected { lane, id, kind });
        }
    }

    /// End the run: freeze, bank the score, evaluate unlocks, persist
    fn die(&mut self, cause: DeathCause) {
        let state = &mut self.state;
        state.phase = PlayerPhase::Dead;
        state.death_cause = Some(cause);
        state.riding = None;
        self.pending_hop = false;

        let previous_high = state.progress.high_score;
        let improved = state.progress.record_score(state.score);
        let (high, coins) = (state.progress.high_score, state.progress.total_coins_ever);
        let unlocked = state.progress.check_unlocks(high, coins);

        log::info!(
            "Died ({}) with score {} and {} coins",
            cause.label(),
            state.score,
            state.coins_collected
        );
        state.events.push(GameEvent::Died { cause });
        if improved {
            log::info!("New high score: {}", state.score);
            state.events.push(GameEvent::NewHighScore { score: state.score });
        }
        for skin in unlocked {
            log::info!("Unlocked skin {}", skin.as_str());
            state.events.push(GameEvent::SkinUnlocked { skin });
        }

        state.last_run = Some(RunSummary {
            score: state.score,
            high_score: high,
            coins_collected: state.coins_collected,
            total_coins_ever: coins,
            death_cause: cause,
            new_high_score: state.score >= previous_high && state.score > 0,
        });

        self.state.progress.save(&mut self.store);
    }

    fn generate_initial_lanes(&mut self) {
        let start = self.generator.extend(
            &mut self.state.lanes,
            &mut self.rng,
            &mut self.state.ids,
            INITIAL_LANES as u32,
        );
        self.state.events.push(GameEvent::LanesGenerated {
            from: start,
            count: INITIAL_LANES as u32,
        });
    }

    /// Extend the frontier when `y` comes within the margin of it
    fn grow_world_near(&mut self, y: u32) {
        if y as usize + FRONTIER_MARGIN > self.state.lanes.len() {
            let start = self.generator.extend(
                &mut self.state.lanes,
                &mut self.rng,
                &mut self.state.ids,
                LANE_BATCH as u32,
            );
            log::debug!("World grew to {} lanes", self.state.lanes.len());
            self.state.events.push(GameEvent::LanesGenerated {
                from: start,
                count: LANE_BATCH as u32,
            });
        }
        self.ensure_lane(y);
    }

    fn ensure_lane(&mut self, y: u32) {
        let before = self.state.frontier();
        let added = self.generator.ensure_lane(
            &mut self.state.lanes,
            &mut self.rng,
            &mut self.state.ids,
            y,
        );
        if added > 0 {
            self.state.events.push(GameEvent::LanesGenerated {
                from: before,
                count: added,
            });
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemoryStore, keys};
    use crate::sim::state::{Car, CarColor, Coin, LaneKind, Log, PowerUpPickup};
    use proptest::prelude::*;

    fn game() -> Game<MemoryStore> {
        Game::new(12345, MemoryStore::new())
    }

    /// Game whose world is all empty grass
    fn grass_game() -> Game<MemoryStore> {
        let mut game = game();
        game.state_mut().lanes = (0..INITIAL_LANES as u32).map(Lane::grass).collect();
        game
    }

    fn road_lane(y: u32, car_x: f32, speed: f32) -> Lane {
        Lane {
            kind: LaneKind::Road,
            cars: vec![Car {
                id: 900 + y,
                x: car_x,
                speed,
                direction: 1,
                width: 100.0,
                color: CarColor::Green,
            }],
            speed,
            direction: 1,
            ..Lane::grass(y)
        }
    }

    fn water_lane(y: u32, log_x: f32, speed: f32, direction: i8) -> Lane {
        Lane {
            kind: LaneKind::Water,
            logs: vec![Log {
                id: 800 + y,
                x: log_x,
                width: 150.0,
                speed,
                direction,
            }],
            speed,
            direction,
            ..Lane::grass(y)
        }
    }

    /// Hop and land, keeping the clock past the cooldown
    fn hop(game: &mut Game<MemoryStore>, direction: Direction, now: &mut u64) {
        assert!(game.move_player(direction, *now));
        *now += HOP_COOLDOWN_MS;
        game.tick(*now);
    }

    #[test]
    fn test_new_game_world() {
        let game = game();
        let state = game.state();
        assert_eq!(state.lanes.len(), INITIAL_LANES);
        assert_eq!(state.lanes[0].kind, LaneKind::Grass);
        assert_eq!(state.player.y, 0);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_furthest_progress_scoring() {
        let mut game = grass_game();
        let mut now = 0;
        hop(&mut game, Direction::Up, &mut now);
        hop(&mut game, Direction::Up, &mut now);
        assert_eq!(game.state().score, 2);

        hop(&mut game, Direction::Down, &mut now);
        hop(&mut game, Direction::Up, &mut now);
        assert_eq!(game.state().score, 2);

        hop(&mut game, Direction::Up, &mut now);
        assert_eq!(game.state().score, 3);
        assert_eq!(game.state().furthest_lane, 3);
    }

    #[test]
    fn test_hop_cooldown_drops_commands() {
        let mut game = grass_game();
        assert!(game.move_player(Direction::Up, 1_000));
        assert!(!game.move_player(Direction::Up, 1_100));
        assert_eq!(game.state().player.y, 1);
        assert!(game.state().is_hopping());
        assert!(game.move_player(Direction::Up, 1_150));
        assert_eq!(game.state().player.y, 2);
    }

    #[test]
    fn test_back_to_back_hops_judge_each_cell() {
        let mut game = grass_game();
        game.state_mut().lanes[1] = road_lane(1, 250.0, 0.0);
        game.state_mut().lanes[2].coins.push(Coin {
            id: 31,
            x: 300.0,
            collected: false,
        });
        assert!(game.move_player(Direction::Up, 0));
        assert!(!game.move_player(Direction::Up, HOP_COOLDOWN_MS));
        assert_eq!(game.state().death_cause, Some(DeathCause::Car));
        assert_eq!(game.state().player.y, 1);
    }

    #[test]
    fn test_back_to_back_hops_collect_each_cell() {
        let mut game = grass_game();
        game.state_mut().lanes[1].coins.push(Coin {
            id: 32,
            x: 300.0,
            collected: false,
        });
        assert!(game.move_player(Direction::Up, 0));
        assert!(game.move_player(Direction::Up, HOP_COOLDOWN_MS));
        assert!(game.state().lanes[1].coins[0].collected);
        assert_eq!(game.state().coins_collected, 1);
    }

    #[test]
    fn test_tick_ends_hop() {
        let mut game = grass_game();
        game.move_player(Direction::Right, 0);
        game.tick(16);
        assert!(game.state().is_hopping());
        game.tick(160);
        assert_eq!(game.state().phase, PlayerPhase::Alive);
    }

    #[test]
    fn test_frontier_grows_ahead_of_player() {
        let mut game = grass_game();
        let mut now = 0;
        for _ in 0..45 {
            hop(&mut game, Direction::Up, &mut now);
        }
        let state = game.state();
        assert!(state.lanes.len() >= 45 + FRONTIER_MARGIN);
        for (i, lane) in state.lanes.iter().enumerate() {
            assert_eq!(lane.y, i as u32);
        }
    }

    #[test]
    fn test_lane_lookup_generates_on_demand() {
        let mut game = game();
        let lane = game.lane(120);
        assert_eq!(lane.y, 120);
        assert!(game.state().lanes.len() > 120);
    }

    #[test]
    fn test_car_kills_and_freezes() {
        let mut game = grass_game();
        game.state_mut().lanes[1] = road_lane(1, 250.0, 2.0);
        game.move_player(Direction::Up, 0);
        game.tick(16);

        let state = game.state();
        assert!(state.is_game_over());
        assert_eq!(state.death_cause, Some(DeathCause::Car));

        let car_x = state.lanes[1].cars[0].x;
        game.tick(32);
        assert_eq!(game.state().lanes[1].cars[0].x, car_x);
        assert!(!game.move_player(Direction::Up, 1_000));
    }

    #[test]
    fn test_landing_evaluated_before_hazards_move() {
        // Car box [185, 275] covers the landing cell but would clear it
        // after this tick's movement
        let mut game = grass_game();
        game.state_mut().player.x = 225.0;
        game.state_mut().lanes[1] = road_lane(1, 180.0, 100.0);
        game.move_player(Direction::Up, 0);
        game.tick(16);
        assert_eq!(game.state().death_cause, Some(DeathCause::Car));
        assert_eq!(game.state().lanes[1].cars[0].x, 180.0);
    }

    #[test]
    fn test_invincibility_survives_car() {
        let mut game = grass_game();
        game.state_mut().lanes[1] = road_lane(1, 250.0, 0.0);
        game.state_mut()
            .active_power_ups
            .activate(PowerUpKind::Invincibility, 0, 5_000);
        game.move_player(Direction::Up, 0);
        game.tick(16);
        assert!(!game.state().is_game_over());
        game.tick(5_000);
        assert_eq!(game.state().death_cause, Some(DeathCause::Car));
    }

    #[test]
    fn test_log_carries_player() {
        let mut game = grass_game();
        game.state_mut().lanes[1] = water_lane(1, 200.0, 2.0, 1);
        game.move_player(Direction::Up, 0);
        game.tick(16);

        let state = game.state();
        assert!(state.is_on_log());
        assert_eq!(state.player.x, 302.0);
        assert_eq!(state.lanes[1].logs[0].x, 202.0);

        game.tick(32);
        assert_eq!(game.state().player.x, 304.0);
    }

    #[test]
    fn test_missing_log_drowns() {
        let mut game = grass_game();
        game.state_mut().lanes[1] = water_lane(1, 0.0, 1.0, 1);
        game.move_player(Direction::Up, 0);
        game.tick(16);
        assert_eq!(game.state().death_cause, Some(DeathCause::Water));
    }

    #[test]
    fn test_drifting_off_edge_drowns_even_when_invincible() {
        let mut game = grass_game();
        game.state_mut().player.x = 580.0;
        game.state_mut().lanes[1] = water_lane(1, 480.0, 10.0, 1);
        game.state_mut()
            .active_power_ups
            .activate(PowerUpKind::Invincibility, 0, 60_000);
        game.move_player(Direction::Up, 0);

        let mut now = 0;
        while !game.state().is_game_over() && now < 1_000 {
            now += TICK_MS;
            game.tick(now);
        }
        assert_eq!(game.state().death_cause, Some(DeathCause::Water));
        assert!(game.state().player.x > GAME_WIDTH);
    }

    #[test]
    fn test_slow_mo_slows_hazards() {
        let mut game = grass_game();
        game.state_mut().lanes[5] = road_lane(5, 0.0, 2.0);
        game.state_mut()
            .active_power_ups
            .activate(PowerUpKind::SlowMo, 0, 5_000);
        game.tick(16);
        let x = game.state().lanes[5].cars[0].x;
        assert!((x - 2.0 * SLOW_MO_FACTOR).abs() < 1e-6);
    }

    #[test]
    fn test_coin_pickup_deferred_to_tick() {
        let mut game = grass_game();
        game.state_mut().lanes[1].coins.push(Coin {
            id: 77,
            x: 300.0,
            collected: false,
        });
        game.move_player(Direction::Up, 0);
        assert!(!game.state().lanes[1].coins[0].collected);
        assert_eq!(game.state().score, 1);

        game.tick(16);
        let state = game.state();
        assert!(state.lanes[1].coins[0].collected);
        assert_eq!(state.score, 1 + COIN_SCORE_BONUS);
        assert_eq!(state.coins_collected, 1);
        assert_eq!(state.total_coins_ever(), 1);
    }

    #[test]
    fn test_power_up_pickup_and_expiry() {
        let mut game = grass_game();
        game.state_mut().lanes[1].power_ups.push(PowerUpPickup {
            id: 55,
            x: 310.0,
            kind: PowerUpKind::Magnet,
            collected: false,
        });
        game.move_player(Direction::Up, 1_000);
        game.tick(1_016);
        assert!(game.has_power_up(PowerUpKind::Magnet, 1_016));
        assert_eq!(game.state().score, 1);

        game.drain_events();
        game.tick(1_016 + 8_000);
        assert!(!game.has_power_up(PowerUpKind::Magnet, 9_016));
        assert!(game.state().active_power_ups.is_empty());
        assert!(game
            .drain_events()
            .contains(&GameEvent::PowerUpExpired { kind: PowerUpKind::Magnet }));
    }

    #[test]
    fn test_expiry_sweep_runs_every_100ms() {
        let mut game = grass_game();
        game.state_mut()
            .active_power_ups
            .activate(PowerUpKind::Magnet, 0, 130);

        // Sweeps land at 16, 128, 240
        let mut now = 0;
        while now < 224 {
            now += TICK_MS;
            game.tick(now);
            if now >= 130 {
                assert!(!game.has_power_up(PowerUpKind::Magnet, now));
                assert_eq!(game.state().active_power_ups.len(), 1, "purged early at {now}");
            }
        }

        game.drain_events();
        game.tick(240);
        assert!(game.state().active_power_ups.is_empty());
        assert_eq!(
            game.drain_events(),
            vec![GameEvent::PowerUpExpired { kind: PowerUpKind::Magnet }]
        );
    }

    #[test]
    fn test_magnet_collects_neighbouring_lanes() {
        let mut game = grass_game();
        for y in [2, 3] {
            game.state_mut().lanes[y].coins.push(Coin {
                id: 60 + y as u32,
                x: 360.0,
                collected: false,
            });
        }
        game.state_mut()
            .active_power_ups
            .activate(PowerUpKind::Magnet, 0, 8_000);
        game.move_player(Direction::Up, 0);
        game.tick(16);
        assert_eq!(game.state().coins_collected, 2);
    }

    #[test]
    fn test_death_banks_progress() {
        let mut game = grass_game();
        game.state_mut().score = 60;
        game.state_mut().progress.total_coins_ever = 35;
        game.state_mut().lanes[1] = road_lane(1, 250.0, 0.0);
        game.move_player(Direction::Up, 0);
        game.tick(16);

        let state = game.state();
        assert_eq!(state.high_score(), 61);
        assert!(state.progress.is_unlocked(SkinId::Duck));
        assert!(state.progress.is_unlocked(SkinId::Penguin));
        let summary = state.last_run.as_ref().unwrap();
        assert!(summary.new_high_score);
        assert_eq!(summary.death_cause, DeathCause::Car);

        let stored = game.store().get(keys::HIGH_SCORE).unwrap();
        assert_eq!(stored.as_deref(), Some("61"));
        assert_eq!(Progress::load(game.store()), game.state().progress);
    }

    #[test]
    fn test_reset_preserves_lifetime_progress() {
        let mut game = grass_game();
        game.state_mut().score = 42;
        game.state_mut().progress.total_coins_ever = 10;
        game.state_mut().progress.check_unlocks(0, 35);
        game.state_mut().lanes[1] = road_lane(1, 250.0, 0.0);
        game.move_player(Direction::Up, 0);
        game.tick(16);
        assert!(game.state().is_game_over());

        assert!(game.handle_command(Command::Reset, 100));
        let state = game.state();
        assert_eq!(state.score, 0);
        assert_eq!(state.coins_collected, 0);
        assert_eq!(state.total_coins_ever(), 10);
        assert_eq!(state.high_score(), 43);
        assert!(state.progress.is_unlocked(SkinId::Duck));
        assert_eq!(state.phase, PlayerPhase::Alive);
        assert_eq!(state.death_cause, None);
        assert_eq!(state.player.y, 0);
        assert_eq!(state.lanes.len(), INITIAL_LANES);
        assert_eq!(state.lanes[0].kind, LaneKind::Grass);
        assert!(state.active_power_ups.is_empty());
    }

    #[test]
    fn test_reset_clears_pending_hop() {
        let mut game = grass_game();
        game.move_player(Direction::Up, 0);
        game.reset();
        assert!(game.move_player(Direction::Up, 1));
    }

    #[test]
    fn test_select_skin_persists_only_unlocked() {
        let mut game = game();
        assert!(!game.select_skin(SkinId::Golden));
        assert_eq!(game.store().get(keys::SELECTED_SKIN).unwrap(), None);
        assert!(game.select_skin(SkinId::Base));
        assert_eq!(
            game.store().get(keys::SELECTED_SKIN).unwrap().as_deref(),
            Some("\"base\"")
        );
    }

    #[test]
    fn test_progress_loaded_from_store() {
        let store = MemoryStore::with_entries([
            (keys::HIGH_SCORE, "99"),
            (keys::TOTAL_COINS, "7"),
        ]);
        let game = Game::new(1, store);
        assert_eq!(game.state().high_score(), 99);
        assert_eq!(game.state().total_coins_ever(), 7);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = game();
        let mut b = game();
        let mut now = 0;
        for step in 0..200u64 {
            now += TICK_MS;
            if step % 10 == 0 {
                a.move_player(Direction::Up, now);
                b.move_player(Direction::Up, now);
            }
            a.tick(now);
            b.tick(now);
        }
        assert_eq!(a.state().score, b.state().score);
        assert_eq!(a.state().lanes, b.state().lanes);
        assert_eq!(a.state().death_cause, b.state().death_cause);
    }

    proptest! {
        #[test]
        fn prop_score_tracks_progress_and_coins(
            seed in any::<u64>(),
            moves in proptest::collection::vec(0usize..4, 1..80),
        ) {
            let mut game = Game::new(seed, MemoryStore::new());
            let mut now = 0;
            let mut last_score = 0;
            for m in moves {
                game.move_player(Direction::ALL[m], now);
                for _ in 0..10 {
                    now += TICK_MS;
                    game.tick(now);
                }
                let state = game.state();
                prop_assert!(state.score >= last_score);
                prop_assert_eq!(
                    state.score,
                    state.furthest_lane as u64 + COIN_SCORE_BONUS * state.coins_collected
                );
                last_score = state.score;
            }
        }
    }
}
