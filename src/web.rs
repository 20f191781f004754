//! Browser bindings (wasm32 only)
//!
//! A renderer in JS drives [`WebGame`]: it forwards key presses and
//! animation-frame timestamps, then reads a JSON snapshot to draw.

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::ambience::{TimeOfDay, Weather};
use crate::persistence::{KeyValueStore, LocalStorageStore, MemoryStore, Result};
use crate::platform::{FixedStep, command_for_button, command_for_key};
use crate::progression::{SkinCard, SkinId};
use crate::sim::{Command, Game, GameState};

/// LocalStorage when the browser allows it, memory otherwise
enum WebStore {
    Local(LocalStorageStore),
    Memory(MemoryStore),
}

impl KeyValueStore for WebStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match self {
            WebStore::Local(s) => s.get(key),
            WebStore::Memory(s) => s.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match self {
            WebStore::Local(s) => s.set(key, value),
            WebStore::Memory(s) => s.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        match self {
            WebStore::Local(s) => s.remove(key),
            WebStore::Memory(s) => s.remove(key),
        }
    }
}

#[derive(Serialize)]
struct Snapshot<'a> {
    state: &'a GameState,
    time_of_day: TimeOfDay,
    overlay_opacity: f32,
    weather: Weather,
    skins: Vec<SkinCard>,
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Crossy Sim (wasm) starting...");
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    game: Game<WebStore>,
    clock: FixedStep,
    last_frame_ms: Option<f64>,
}

#[wasm_bindgen]
impl WebGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>) -> WebGame {
        let seed = seed.unwrap_or_else(|| js_sys::Math::random() * u32::MAX as f64) as u64;
        let store = match LocalStorageStore::open() {
            Ok(local) => WebStore::Local(local),
            Err(e) => {
                log::warn!("{}; progress will not persist", e);
                WebStore::Memory(MemoryStore::new())
            }
        };
        WebGame {
            game: Game::new(seed, store),
            clock: FixedStep::new(),
            last_frame_ms: None,
        }
    }

    /// Forward a `KeyboardEvent.key`. Returns true if the key was consumed.
    pub fn key(&mut self, key: &str) -> bool {
        command_for_key(key).is_some_and(|c| self.apply(c))
    }

    /// Forward an on-screen control press
    pub fn button(&mut self, id: &str) -> bool {
        command_for_button(id).is_some_and(|c| self.apply(c))
    }

    /// Call once per animation frame with its timestamp
    pub fn frame(&mut self, timestamp_ms: f64) {
        let elapsed = self.last_frame_ms.map_or(0.0, |last| timestamp_ms - last);
        self.last_frame_ms = Some(timestamp_ms);
        for now in self.clock.advance(elapsed) {
            self.game.tick(now);
        }
    }

    pub fn select_skin(&mut self, id: &str) -> bool {
        SkinId::from_str(id).is_some_and(|skin| self.game.select_skin(skin))
    }

    /// Current state as JSON
    pub fn snapshot(&self) -> String {
        let state = self.game.state();
        let time_of_day = TimeOfDay::for_score(state.score);
        let snapshot = Snapshot {
            state,
            time_of_day,
            overlay_opacity: time_of_day.overlay_opacity(),
            weather: Weather::for_score(state.score),
            skins: state.progress.skin_cards(),
        };
        serde_json::to_string(&snapshot).unwrap_or_else(|e| {
            log::warn!("Snapshot encoding failed: {}", e);
            "null".to_string()
        })
    }

    /// Events since the last call, as a JSON array
    pub fn drain_events(&mut self) -> String {
        let events = self.game.drain_events();
        serde_json::to_string(&events).unwrap_or_else(|_| "[]".to_string())
    }
}

impl WebGame {
    fn apply(&mut self, command: Command) -> bool {
        // Space/enter only restart a finished run
        if command == Command::Reset && !self.game.state().is_game_over() {
            return false;
        }
        self.game.handle_command(command, self.clock.now_ms())
    }
}
