//! Engine configuration
//!
//! Defaults come from the shared constants in the types crate. Presentation
//! timing (settle windows) lives here rather than in the resolver so the
//! cascade logic stays free of animation concerns.

use thiserror::Error;

use crate::types::{
    CASCADE_BONUS, CLEAR_SETTLE_MS, DROP_SETTLE_MS, GAME_DURATION_SECS, KIND_COUNT,
    MIN_KIND_COUNT, POINTS_PER_TOKEN, SWAP_SETTLE_MS,
};

/// Errors raised when an [`EngineConfig`] is rejected at startup
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("alphabet of {0} kinds is too small (need at least {min})", min = MIN_KIND_COUNT)]
    AlphabetTooSmall(u8),

    #[error("alphabet of {0} kinds exceeds the {max} available kinds", max = KIND_COUNT)]
    AlphabetTooLarge(u8),

    #[error("points_per_token must be > 0")]
    ZeroPointsPerToken,

    #[error("game duration must be > 0 seconds")]
    ZeroDuration,
}

/// Tunables for one engine instance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of kinds drawn from, taken from the front of `TokenKind::ALL`
    pub kind_count: u8,
    /// Score per cleared token
    pub points_per_token: u32,
    /// Extra points per resolving pass beyond the first
    pub cascade_bonus: u32,
    /// Settle window between a swap and the match check
    pub swap_settle_ms: u32,
    /// Settle window while matched tokens are shown
    pub clear_settle_ms: u32,
    /// Settle window after gravity and refill
    pub drop_settle_ms: u32,
    /// Countdown length for a round (used by the session layer)
    pub game_duration_secs: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            kind_count: KIND_COUNT,
            points_per_token: POINTS_PER_TOKEN,
            cascade_bonus: CASCADE_BONUS,
            swap_settle_ms: SWAP_SETTLE_MS,
            clear_settle_ms: CLEAR_SETTLE_MS,
            drop_settle_ms: DROP_SETTLE_MS,
            game_duration_secs: GAME_DURATION_SECS,
        }
    }
}

impl EngineConfig {
    /// A configuration with every settle window set to zero.
    ///
    /// Each structural step then happens on the next tick.
    pub fn instant() -> Self {
        Self::default().with_settle_ms(0, 0, 0)
    }

    pub fn with_kind_count(mut self, kind_count: u8) -> Self {
        self.kind_count = kind_count;
        self
    }

    pub fn with_points_per_token(mut self, points: u32) -> Self {
        self.points_per_token = points;
        self
    }

    pub fn with_cascade_bonus(mut self, bonus: u32) -> Self {
        self.cascade_bonus = bonus;
        self
    }

    pub fn with_settle_ms(mut self, swap: u32, clear: u32, drop: u32) -> Self {
        self.swap_settle_ms = swap;
        self.clear_settle_ms = clear;
        self.drop_settle_ms = drop;
        self
    }

    pub fn with_game_duration_secs(mut self, secs: u32) -> Self {
        self.game_duration_secs = secs;
        self
    }

    /// Reject configurations the engine cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.kind_count < MIN_KIND_COUNT {
            return Err(ConfigError::AlphabetTooSmall(self.kind_count));
        }
        if self.kind_count > KIND_COUNT {
            return Err(ConfigError::AlphabetTooLarge(self.kind_count));
        }
        if self.points_per_token == 0 {
            return Err(ConfigError::ZeroPointsPerToken);
        }
        if self.game_duration_secs == 0 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}
