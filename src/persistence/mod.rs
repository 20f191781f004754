//! Key/value persistence
//!
//! The simulation only ever talks to a [`KeyValueStore`]; the concrete
//! backing store is chosen by the host:
//! - `MemoryStore` for tests and ephemeral sessions
//! - `FileStore` (native) writes a JSON map with tmp-then-rename
//! - `LocalStorageStore` (wasm32) wraps browser LocalStorage

mod memory;
pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
mod file;
#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

#[cfg(target_arch = "wasm32")]
mod local;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

use thiserror::Error;

/// Storage keys
pub mod keys {
    pub const HIGH_SCORE: &str = "crossyHighScore";
    pub const TOTAL_COINS: &str = "crossyTotalCoins";
    pub const SKINS: &str = "crossySkins";
    pub const SELECTED_SKIN: &str = "crossySelectedSkin";
    pub const SETTINGS: &str = "crossySettings";
}

/// Errors surfaced by store implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String key/value storage
pub trait KeyValueStore {
    /// Read a value; `Ok(None)` when the key is absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete a key (absent keys are not an error)
    fn remove(&mut self, key: &str) -> Result<()>;
}
