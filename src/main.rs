//! Crossy Sim entry point
//!
//! Native builds run a headless autopilot session and log the result; the
//! browser build is driven from JS through `crossy_sim::web`.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Crossy Sim (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0xC0FFEE);

    match args.next() {
        Some(path) => match crossy_sim::persistence::FileStore::open(&path) {
            Ok(store) => {
                log::info!("Progress file: {}", store.path().display());
                autopilot::run(seed, store)
            }
            Err(e) => {
                log::warn!("Cannot open {}: {}; progress will not persist", path, e);
                autopilot::run(seed, crossy_sim::MemoryStore::new());
            }
        },
        None => autopilot::run(seed, crossy_sim::MemoryStore::new()),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is crossy_sim::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use crossy_sim::consts::*;
    use crossy_sim::platform::FixedStep;
    use crossy_sim::sim::{Direction, Game, GameState, Position, collision, hazards, player};
    use crossy_sim::KeyValueStore;

    /// Simulated session length
    const SESSION_MS: u64 = 120_000;
    /// Frame time fed to the stepper (60 fps)
    const FRAME_MS: f64 = 1000.0 / 60.0;

    pub fn run<S: KeyValueStore>(seed: u64, store: S) {
        let mut game = Game::new(seed, store);
        let mut clock = FixedStep::new();

        while clock.now_ms() < SESSION_MS && !game.state().is_game_over() {
            for now in clock.advance(FRAME_MS) {
                if let Some(direction) = choose(game.state()) {
                    game.move_player(direction, now);
                }
                game.tick(now);
            }
        }

        let state = game.state();
        match &state.last_run {
            Some(run) => println!(
                "seed {}: {} after {:.1}s, score {} (best {}), coins {} (lifetime {})",
                seed,
                run.death_cause.label(),
                clock.now_ms() as f64 / 1000.0,
                run.score,
                run.high_score,
                run.coins_collected,
                run.total_coins_ever
            ),
            None => println!(
                "seed {}: survived {}s, score {}, lane {}",
                seed,
                SESSION_MS / 1000,
                state.score,
                state.furthest_lane
            ),
        }
    }

    /// Hop forward when the next lane is safe after one tick of traffic,
    /// otherwise try sidestepping, otherwise wait.
    fn choose(state: &GameState) -> Option<Direction> {
        if state.is_hopping() || state.is_game_over() {
            return None;
        }
        [Direction::Up, Direction::Left, Direction::Right]
            .into_iter()
            .find(|&d| is_safe(state, player::hop(state.player, d)))
            .filter(|&d| d == Direction::Up || !is_safe(state, state.player))
    }

    fn is_safe(state: &GameState, at: Position) -> bool {
        let Some(lane) = state.lanes.get(at.y as usize) else {
            return false;
        };
        let mut ahead = [lane.clone()];
        // Lookahead covers the whole hop cooldown
        for _ in 0..=(HOP_COOLDOWN_MS / TICK_MS) {
            hazards::advance(&mut ahead, 1.0);
            let probe = Position { x: at.x, y: 0 };
            if collision::resolve(probe, &ahead, false).dead {
                return false;
            }
        }
        true
    }
}
