//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are plain data with no behaviour beyond small helpers, making them
//! usable in any context (cascade engine, session glue, terminal rendering).
//!
//! # Board Dimensions
//!
//! The board is a fixed 8x8 square:
//!
//! - **Rows**: 0-7, row 0 is the top edge (refilled tokens drop in from above it)
//! - **Columns**: 0-7, left to right
//! - Cells are stored row-major (`row * BOARD_SIZE + col`)
//!
//! # Timing Constants
//!
//! Settle windows are presentation pauses in milliseconds. The engine promises
//! not to mutate the grid again until the window has elapsed:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `SWAP_SETTLE_MS` | 300 | Pause between swap commit and match detection |
//! | `CLEAR_SETTLE_MS` | 300 | Pause while matched tokens disappear |
//! | `DROP_SETTLE_MS` | 500 | Pause while survivors fall and refills drop in |
//! | `GAME_DURATION_SECS` | 60 | Length of a round on the countdown |
//!
//! # Examples
//!
//! ```
//! use emoji_crush_types::{Position, TokenKind, BOARD_SIZE};
//!
//! let kind = TokenKind::from_str("grape").unwrap();
//! assert_eq!(kind, TokenKind::Grape);
//! assert_eq!(kind.glyph(), '🍇');
//!
//! let a = Position::new(3, 2);
//! let b = Position::new(3, 3);
//! assert!(a.is_adjacent(b));
//! assert!(!a.is_adjacent(Position::new(4, 3)));
//!
//! assert_eq!(BOARD_SIZE, 8);
//! ```

use serde::{Deserialize, Serialize};

/// Board side length in cells (8x8)
pub const BOARD_SIZE: u8 = 8;

/// Total number of cells on the board
pub const CELL_COUNT: usize = (BOARD_SIZE as usize) * (BOARD_SIZE as usize);

/// Minimum run length that counts as a match
pub const MIN_RUN: usize = 3;

/// Number of token kinds in the default alphabet
pub const KIND_COUNT: u8 = 6;

/// Smallest alphabet for which match-free generation always terminates
pub const MIN_KIND_COUNT: u8 = 3;

/// Points awarded per cleared token
pub const POINTS_PER_TOKEN: u32 = 10;

/// Extra points per cascade pass beyond the first (disabled by default)
pub const CASCADE_BONUS: u32 = 0;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Pause between committing a swap and running the detector
pub const SWAP_SETTLE_MS: u32 = 300;

/// Pause while matched tokens are shown before removal
pub const CLEAR_SETTLE_MS: u32 = 300;

/// Pause after gravity and refill before re-detecting
pub const DROP_SETTLE_MS: u32 = 500;

/// Round length for the external countdown
pub const GAME_DURATION_SECS: u32 = 60;

/// The countdown is considered urgent at or below this many seconds
pub const WARNING_SECS: u32 = 10;


/// The six token kinds of the default alphabet
///
/// Kinds only matter for match comparison. A configured alphabet of `n` kinds
/// uses the first `n` entries of [`TokenKind::ALL`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Apple,
    Grape,
    Orange,
    Lemon,
    Blueberry,
    Coconut,
}

impl TokenKind {
    /// Every kind, in alphabet order
    pub const ALL: [TokenKind; 6] = [
        TokenKind::Apple,
        TokenKind::Grape,
        TokenKind::Orange,
        TokenKind::Lemon,
        TokenKind::Blueberry,
        TokenKind::Coconut,
    ];

    /// Position of this kind in [`TokenKind::ALL`]
    pub fn index(&self) -> u8 {
        match self {
            TokenKind::Apple => 0,
            TokenKind::Grape => 1,
            TokenKind::Orange => 2,
            TokenKind::Lemon => 3,
            TokenKind::Blueberry => 4,
            TokenKind::Coconut => 5,
        }
    }

    /// Kind at `index` in [`TokenKind::ALL`]
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Parse kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use emoji_crush_types::TokenKind;
    ///
    /// assert_eq!(TokenKind::from_str("Apple"), Some(TokenKind::Apple));
    /// assert_eq!(TokenKind::from_str("COCONUT"), Some(TokenKind::Coconut));
    /// assert_eq!(TokenKind::from_str("kiwi"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "apple" => Some(TokenKind::Apple),
            "grape" => Some(TokenKind::Grape),
            "orange" => Some(TokenKind::Orange),
            "lemon" => Some(TokenKind::Lemon),
            "blueberry" => Some(TokenKind::Blueberry),
            "coconut" => Some(TokenKind::Coconut),
            _ => None,
        }
    }

    /// Emoji used by the terminal view
    pub fn glyph(&self) -> char {
        match self {
            TokenKind::Apple => '🍎',
            TokenKind::Grape => '🍇',
            TokenKind::Orange => '🍊',
            TokenKind::Lemon => '🍋',
            TokenKind::Blueberry => '🫐',
            TokenKind::Coconut => '🥥',
        }
    }
}

/// Stable token identity
///
/// Minted once per token and never reused by the same engine, so an observer
/// can key visual elements by id across swaps and falls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(pub u32);

/// A placed game piece: identity plus an immutable kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub id: TokenId,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(id: TokenId, kind: TokenKind) -> Self {
        Self { id, kind }
    }
}

/// A cell coordinate, 0-indexed, row 0 at the top
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: u8,
    pub col: u8,
}

impl Position {
    pub const fn new(row: u8, col: u8) -> Self {
        Self { row, col }
    }

    /// Whether the position lies on the board
    pub fn in_bounds(&self) -> bool {
        self.row < BOARD_SIZE && self.col < BOARD_SIZE
    }

    /// Row-major flat index. Only meaningful for in-bounds positions.
    #[inline(always)]
    pub fn index(&self) -> usize {
        (self.row as usize) * (BOARD_SIZE as usize) + (self.col as usize)
    }

    /// Inverse of [`Position::index`]
    pub fn from_index(index: usize) -> Option<Self> {
        if index >= CELL_COUNT {
            return None;
        }
        let size = BOARD_SIZE as usize;
        Some(Self::new((index / size) as u8, (index % size) as u8))
    }

    /// Orthogonal neighbour check (Manhattan distance exactly 1)
    pub fn is_adjacent(&self, other: Position) -> bool {
        is_adjacent(*self, other)
    }
}

/// True iff exactly one of the row/col deltas is 1 and the other is 0.
pub fn is_adjacent(a: Position, b: Position) -> bool {
    let dr = a.row.abs_diff(b.row);
    let dc = a.col.abs_diff(b.col);
    (dr == 1 && dc == 0) || (dr == 0 && dc == 1)
}

/// Player-facing actions accepted by the engine
///
/// These are emitted by the input layer (or any other collaborator) and fed to
/// the resolver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Select the cell at the given position
    Pick(Position),
    /// Discard the current round and deal a fresh board
    Restart,
}

/// Engine-side events, queued by the resolver and drained by observers.
///
/// `Cleared::score_delta` is the additive score for that match set; the
/// aggregator that owns the running total sums these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "camelCase")]
pub enum EngineEvent {
    /// A tentative swap was applied to the grid
    Swapped { first: Position, second: Position },
    /// The swap produced no match and was undone
    SwapReverted { first: Position, second: Position },
    /// A match set was confirmed and scored (removal follows after the settle window)
    Cleared {
        pass: u32,
        tokens: u32,
        score_delta: u32,
    },
    /// Matched tokens were removed, survivors fell, and the gaps were refilled
    Refilled { pass: u32, spawned: u32 },
    /// The grid is quiescent again after `passes` resolving passes
    Settled { passes: u32 },
    /// Input is locked for the rest of the round
    GameOver,
}
