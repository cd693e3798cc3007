//! Emoji Crush (workspace facade crate).
//!
//! Re-exports the workspace crates as `emoji_crush::{core,engine,input,term,types}`
//! so integration tests and the binary share one import path.

pub use emoji_crush_core as core;
pub use emoji_crush_engine as engine;
pub use emoji_crush_input as input;
pub use emoji_crush_term as term;
pub use emoji_crush_types as types;
