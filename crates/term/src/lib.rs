//! Terminal rendering module.
//!
//! Rendering for playing in a terminal:
//!
//! - [`game_view`] turns a [`crate::core::GridSnapshot`] plus HUD values into
//!   plain text lines. It is pure and unit-tested.
//! - [`renderer`] flushes those lines to a real terminal through crossterm.
//!
//! There is no animation: the engine's settle windows are simply visible as
//! the board holding still between steps.

pub mod game_view;
pub mod renderer;

pub use emoji_crush_core as core;
pub use emoji_crush_types as types;

pub use game_view::{GameView, Hud};
pub use renderer::TerminalRenderer;
