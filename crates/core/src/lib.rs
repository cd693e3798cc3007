//! Core engine module - pure, deterministic, and testable
//!
//! This crate contains the match-three rules: the grid model, board
//! generation, match detection, scoring and the cascade state machine.
//! It has **no dependencies** on terminal, input or timing code, making it:
//!
//! - **Deterministic**: Same seed produces identical boards and refills
//! - **Testable**: Every rule is exercised by unit tests
//! - **Portable**: Can run in any environment (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: 8x8 token grid with gravity/refill compaction
//! - [`generator`]: match-free initial boards
//! - [`matcher`]: sliding-window run detection
//! - [`resolver`]: swap / match / cascade state machine
//! - [`rng`]: seeded LCG and token minting
//! - [`scoring`]: points per cleared match set
//! - [`config`]: engine tunables and their validation
//! - [`snapshot`]: observer view of the resolver state
//!
//! # Example
//!
//! ```
//! use emoji_crush_core::{EngineConfig, Resolver, PickOutcome};
//! use emoji_crush_types::Position;
//!
//! let mut resolver = Resolver::new(EngineConfig::default(), 12345).unwrap();
//!
//! // Pick two adjacent cells to attempt a swap
//! resolver.pick(Position::new(0, 0));
//! let outcome = resolver.pick(Position::new(0, 1));
//! assert!(matches!(outcome, PickOutcome::Swapped { .. }));
//!
//! // Let the swap revert or the cascade play out
//! resolver.run_to_idle();
//! assert!(resolver.is_idle());
//! ```
//!
//! # Timing
//!
//! Presentation pauses are settle windows counted down by
//! [`Resolver::tick`](resolver::Resolver::tick). Call it every frame with the
//! elapsed milliseconds, or use
//! [`Resolver::run_to_idle`](resolver::Resolver::run_to_idle) to skip them.

pub mod config;
pub mod generator;
pub mod grid;
pub mod matcher;
pub mod resolver;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use emoji_crush_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, EngineConfig};
pub use generator::generate_board;
pub use grid::{Collapse, Grid, GridError, MAX_PLACED_ID};
pub use matcher::{find_matches, is_quiescent, MatchSet};
pub use resolver::{Lifecycle, Phase, PickOutcome, ResolveStep, Resolver};
pub use rng::{SimpleRng, TokenSource};
pub use scoring::{calculate_score, ScoreResult};
pub use snapshot::{GridSnapshot, PhaseKind, TokenView};
