//! Scoring module - points for a cleared match set
//!
//! Every cleared token is worth `points_per_token`. Passes after the first in
//! one cascade can earn a flat `cascade_bonus` each; the default bonus is 0, in
//! which case the delta is exactly `tokens * points_per_token`.

use crate::config::EngineConfig;

/// Score calculation result for one cleared match set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScoreResult {
    /// `tokens * points_per_token`
    pub base: u32,
    /// Bonus for chained passes (0 on the first pass)
    pub cascade_bonus: u32,
    pub total: u32,
}

/// Base points for clearing `tokens` tokens
pub fn calculate_base_score(tokens: usize, points_per_token: u32) -> u32 {
    (tokens as u32).saturating_mul(points_per_token)
}

/// Cascade bonus for the given 1-based pass number
pub fn calculate_cascade_bonus(pass: u32, bonus: u32) -> u32 {
    pass.saturating_sub(1).saturating_mul(bonus)
}

/// Calculate the score delta for clearing `tokens` tokens on `pass`
pub fn calculate_score(tokens: usize, pass: u32, config: &EngineConfig) -> ScoreResult {
    let base = calculate_base_score(tokens, config.points_per_token);
    let cascade_bonus = if tokens == 0 {
        0
    } else {
        calculate_cascade_bonus(pass, config.cascade_bonus)
    };

    ScoreResult {
        base,
        cascade_bonus,
        total: base.saturating_add(cascade_bonus),
    }
}
