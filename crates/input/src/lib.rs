//! Terminal input module.
//!
//! Maps `crossterm` key events into board [`Command`]s and keeps the cursor
//! the player moves around the grid. Picking turns the cursor position into a
//! [`crate::types::GameAction::Pick`] for the engine.

pub mod cursor;
pub mod map;

pub use emoji_crush_types as types;

pub use cursor::Cursor;
pub use map::{handle_key_event, should_quit, Command, Direction};
