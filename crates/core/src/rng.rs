//! RNG module - seeded token generation
//!
//! Every random draw in the engine goes through a [`SimpleRng`], so the same
//! seed produces the same boards and the same refills (for replays and tests).
//! [`TokenSource`] pairs the RNG with the monotonic identity counter so that
//! board generation and refill mint tokens the same way.

use crate::types::{Token, TokenId, TokenKind, KIND_COUNT, MIN_KIND_COUNT};

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Uses the high bits; the low bits of a power-of-two LCG cycle with a
    /// very short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Mints fresh tokens: random kind from the configured alphabet plus a new id
#[derive(Debug, Clone)]
pub struct TokenSource {
    rng: SimpleRng,
    kind_count: u8,
    next_id: u32,
}

impl TokenSource {
    /// Create a source drawing from the first `kind_count` kinds.
    ///
    /// `kind_count` must already be validated (see `EngineConfig::validate`).
    pub fn new(seed: u32, kind_count: u8) -> Self {
        debug_assert!(
            (MIN_KIND_COUNT..=KIND_COUNT).contains(&kind_count),
            "unvalidated alphabet size {kind_count}"
        );
        Self {
            rng: SimpleRng::new(seed),
            kind_count,
            next_id: 0,
        }
    }

    /// Continue minting ids strictly after `id`.
    ///
    /// Grids only hold ids up to `MAX_PLACED_ID`, so there is always room.
    pub fn with_ids_after(mut self, id: TokenId) -> Self {
        let after = id.0.checked_add(1).unwrap_or(u32::MAX);
        self.next_id = self.next_id.max(after);
        self
    }

    /// Draw a uniformly random kind
    pub fn draw_kind(&mut self) -> TokenKind {
        let idx = self.rng.next_range(self.kind_count as u32) as u8;
        // In range because kind_count <= ALL.len()
        TokenKind::ALL[idx as usize]
    }

    /// Mint a token of the given kind with a fresh identity
    pub fn mint(&mut self, kind: TokenKind) -> Token {
        let id = TokenId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        Token::new(id, kind)
    }

    /// Draw a random kind and mint it
    pub fn draw(&mut self) -> Token {
        let kind = self.draw_kind();
        self.mint(kind)
    }

    /// Id the next minted token will receive
    pub fn next_id(&self) -> TokenId {
        TokenId(self.next_id)
    }
}
