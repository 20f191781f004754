//! Input mapping
//!
//! Keyboard keys and on-screen buttons funnel into the same [`Command`]s.

use crate::sim::{Command, Direction};

/// Map a DOM-style key name to a command.
///
/// Arrows and WASD move; space and enter reset.
pub fn command_for_key(key: &str) -> Option<Command> {
    let command = match key {
        "ArrowUp" | "w" | "W" => Command::Move(Direction::Up),
        "ArrowDown" | "s" | "S" => Command::Move(Direction::Down),
        "ArrowLeft" | "a" | "A" => Command::Move(Direction::Left),
        "ArrowRight" | "d" | "D" => Command::Move(Direction::Right),
        " " | "Space" | "Enter" => Command::Reset,
        _ => return None,
    };
    Some(command)
}

/// Map an on-screen control id to a command
pub fn command_for_button(id: &str) -> Option<Command> {
    match id.to_lowercase().as_str() {
        "up" => Some(Command::Move(Direction::Up)),
        "down" => Some(Command::Move(Direction::Down)),
        "left" => Some(Command::Move(Direction::Left)),
        "right" => Some(Command::Move(Direction::Right)),
        "reset" | "restart" => Some(Command::Reset),
        _ => None,
    }
}
