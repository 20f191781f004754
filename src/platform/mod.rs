//! Platform abstraction layer
//!
//! Glue between a host (browser, native loop, tests) and the simulation:
//! - Input events to commands
//! - Frame time to fixed ticks

pub mod input;
pub mod time;

pub use input::{command_for_button, command_for_key};
pub use time::FixedStep;
