//! Session layer - the collaborators around the cascade engine
//!
//! The resolver owns neither time nor the running score. A
//! [`Session`] supplies both: a [`Countdown`] that expires the round, and a
//! score total fed by the resolver's `Cleared` events. It also implements the
//! reset command (new board, full timer, zero score).

pub mod countdown;

pub use emoji_crush_core as core;
pub use emoji_crush_types as types;

pub use countdown::Countdown;

use tracing::info;

use crate::core::{ConfigError, EngineConfig, GridSnapshot, PickOutcome, Resolver};
use crate::types::{EngineEvent, GameAction, Position};

/// One player's round: resolver + countdown + score
#[derive(Debug, Clone)]
pub struct Session {
    resolver: Resolver,
    countdown: Countdown,
    score: u32,
    /// Events already applied to the score, waiting for an observer
    events: Vec<EngineEvent>,
}

impl Session {
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        let resolver = Resolver::new(config, seed)?;
        Ok(Self::from_resolver(resolver))
    }

    /// Wrap an existing resolver (e.g. one built from a fixed grid)
    pub fn from_resolver(resolver: Resolver) -> Self {
        let countdown = Countdown::new(resolver.config().game_duration_secs);
        Self {
            resolver,
            countdown,
            score: 0,
            events: Vec::new(),
        }
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.remaining_secs()
    }

    pub fn is_game_over(&self) -> bool {
        self.resolver.is_game_over()
    }

    pub fn pick(&mut self, pos: Position) -> PickOutcome {
        let outcome = self.resolver.pick(pos);
        self.collect_events();
        outcome
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pick(pos) => self.pick(pos) != PickOutcome::Ignored,
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    /// Reset command: new board, zero score, full countdown
    pub fn restart(&mut self) {
        self.resolver.restart();
        self.countdown.reset(self.resolver.config().game_duration_secs);
        self.score = 0;
        self.events.clear();
        info!(episode = self.resolver.episode_id(), "session restarted");
    }

    /// Advance the countdown and the resolver by `elapsed_ms`.
    ///
    /// Returns true if the resolver performed a structural step.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let stepped = self.resolver.tick(elapsed_ms);

        if self.countdown.tick(elapsed_ms) {
            info!(score = self.score, "countdown reached zero");
            self.resolver.expire();
        }

        self.collect_events();
        stepped
    }

    /// Take events produced since the last drain (scores already applied)
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GridSnapshot {
        self.resolver.snapshot()
    }

    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        self.resolver.snapshot_into(out);
    }

    fn collect_events(&mut self) {
        for event in self.resolver.drain_events() {
            if let EngineEvent::Cleared { score_delta, .. } = event {
                self.score = self.score.saturating_add(score_delta);
            }
            self.events.push(event);
        }
    }
}
