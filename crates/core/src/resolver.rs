//! Resolver module - the swap / match / cascade state machine
//!
//! The resolver owns the grid and is the only thing that mutates it. Player
//! input arrives as single cell picks; two adjacent picks form a move. A move
//! is applied tentatively, checked by the detector, and either reverted or
//! handed to the cascade loop:
//!
//! ```text
//! Idle --pick,pick--> Swapping --no match--> Idle (swap reverted)
//!                         |
//!                       match
//!                         v
//!              Resolving::Clearing --remove+gravity+refill--> Resolving::Dropping
//!                         ^                                          |
//!                         +---------------- match -------------------+
//!                                                                    |
//!                                                    no match ---> Idle
//! ```
//!
//! Each arrow out of `Swapping` and `Resolving` waits for the settle window
//! configured for that step, counted down by [`Resolver::tick`]. The grid is
//! guaranteed not to change while a window is open. [`Resolver::advance`] and
//! [`Resolver::run_to_idle`] skip the windows for headless callers.
//!
//! Game over is tracked separately in [`Lifecycle`]: an expiry that lands
//! mid-cascade is held as `Expiring` until the resolver is back in `Idle`.

use tracing::{debug, info, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::generator::generate_board;
use crate::grid::Grid;
use crate::matcher::{find_matches, MatchSet};
use crate::rng::TokenSource;
use crate::scoring::calculate_score;
use crate::types::{EngineEvent, GameAction, Position};

/// What the resolver is doing right now
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for input; the grid is quiescent
    Idle { selection: Option<Position> },
    /// A tentative swap is on the grid, waiting for the match check
    Swapping {
        first: Position,
        second: Position,
        settle_ms: u32,
    },
    /// A cascade pass is in flight
    Resolving {
        step: ResolveStep,
        /// 1-based pass number within this cascade
        pass: u32,
        settle_ms: u32,
    },
}

/// Sub-step of a resolving pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveStep {
    /// Match confirmed and scored; tokens are removed when the window closes
    Clearing { matched: MatchSet },
    /// Gravity and refill done; the grid is re-checked when the window closes
    Dropping,
}

/// Round lifecycle, orthogonal to [`Phase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Playing,
    /// Time ran out while a cascade was in flight
    Expiring,
    /// Input is locked until restart
    Over,
}

/// Result of a single cell pick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickOutcome {
    /// Not idle, game over, or out of bounds
    Ignored,
    /// First cell of a move recorded
    Selected(Position),
    /// The selected cell was picked again
    Deselected,
    /// Non-adjacent pick replaced the selection
    Reselected(Position),
    /// Adjacent pick; the swap is now pending the match check
    Swapped { first: Position, second: Position },
}

/// The cascade engine
#[derive(Debug, Clone)]
pub struct Resolver {
    grid: Grid,
    source: TokenSource,
    config: EngineConfig,
    phase: Phase,
    lifecycle: Lifecycle,
    /// Monotonic round id (increments on restart)
    episode_id: u32,
    events: Vec<EngineEvent>,
}

impl Resolver {
    /// Validate `config` and deal a fresh match-free board from `seed`
    pub fn new(config: EngineConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut source = TokenSource::new(seed, config.kind_count);
        let grid = generate_board(&mut source);
        Ok(Self::from_parts(grid, source, config))
    }

    /// Start from a caller-provided grid.
    ///
    /// Ids minted later (refills, restarts) start above the grid's largest id.
    /// The grid is not required to be quiescent; call [`Resolver::resolve_existing`]
    /// to clear any runs it already contains.
    pub fn with_grid(config: EngineConfig, seed: u32, grid: Grid) -> Result<Self, ConfigError> {
        config.validate()?;
        let source = TokenSource::new(seed, config.kind_count).with_ids_after(grid.max_id());
        Ok(Self::from_parts(grid, source, config))
    }

    fn from_parts(grid: Grid, source: TokenSource, config: EngineConfig) -> Self {
        Self {
            grid,
            source,
            config,
            phase: Phase::Idle { selection: None },
            lifecycle: Lifecycle::Playing,
            episode_id: 0,
            events: Vec::new(),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.phase, Phase::Idle { .. })
    }

    pub fn is_game_over(&self) -> bool {
        self.lifecycle == Lifecycle::Over
    }

    /// Currently selected cell (only ever set while idle)
    pub fn selection(&self) -> Option<Position> {
        match self.phase {
            Phase::Idle { selection } => selection,
            _ => None,
        }
    }

    /// Time left in the current settle window (0 when idle)
    pub fn settle_remaining_ms(&self) -> u32 {
        match self.phase {
            Phase::Idle { .. } => 0,
            Phase::Swapping { settle_ms, .. } | Phase::Resolving { settle_ms, .. } => settle_ms,
        }
    }

    /// Take every queued event, oldest first
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    /// Handle a single cell pick
    pub fn pick(&mut self, pos: Position) -> PickOutcome {
        if self.lifecycle != Lifecycle::Playing || !pos.in_bounds() {
            return PickOutcome::Ignored;
        }
        let Phase::Idle { selection } = self.phase else {
            return PickOutcome::Ignored;
        };

        match selection {
            None => {
                self.phase = Phase::Idle {
                    selection: Some(pos),
                };
                PickOutcome::Selected(pos)
            }
            Some(first) if first == pos => {
                self.phase = Phase::Idle { selection: None };
                PickOutcome::Deselected
            }
            Some(first) if !first.is_adjacent(pos) => {
                self.phase = Phase::Idle {
                    selection: Some(pos),
                };
                PickOutcome::Reselected(pos)
            }
            Some(first) => {
                self.begin_swap(first, pos);
                PickOutcome::Swapped { first, second: pos }
            }
        }
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

    fn begin_swap(&mut self, first: Position, second: Position) {
        // Both positions were bounds-checked by pick()
        self.grid.swap(first, second);
        debug!(?first, ?second, "swap applied");
        self.events.push(EngineEvent::Swapped { first, second });
        self.phase = Phase::Swapping {
            first,
            second,
            settle_ms: self.config.swap_settle_ms,
        };
    }

    /// Start resolving runs already present on the grid (e.g. a hand-built
    /// puzzle passed to [`Resolver::with_grid`]). Returns false if the grid is
    /// quiescent or the resolver is busy.
    pub fn resolve_existing(&mut self) -> bool {
        if !self.is_idle() {
            return false;
        }
        let matched = find_matches(&self.grid);
        if matched.is_empty() {
            return false;
        }
        self.begin_clear(matched, 1);
        true
    }

    fn begin_clear(&mut self, matched: MatchSet, pass: u32) {
        let score = calculate_score(matched.len(), pass, &self.config);
        debug!(
            pass,
            tokens = matched.len(),
            score = score.total,
            "match confirmed"
        );
        self.events.push(EngineEvent::Cleared {
            pass,
            tokens: matched.len() as u32,
            score_delta: score.total,
        });
        self.phase = Phase::Resolving {
            step: ResolveStep::Clearing { matched },
            pass,
            settle_ms: self.config.clear_settle_ms,
        };
    }

    fn enter_idle(&mut self) {
        self.phase = Phase::Idle { selection: None };
        if self.lifecycle == Lifecycle::Expiring {
            self.lifecycle = Lifecycle::Over;
            info!(episode = self.episode_id, "cascade finished after time ran out");
            self.events.push(EngineEvent::GameOver);
        }
    }

    /// Advance timers by `elapsed_ms`.
    ///
    /// When the current settle window closes, the next structural step runs.
    /// Returns true if a step ran on this tick.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        let settle = match &mut self.phase {
            Phase::Idle { .. } => return false,
            Phase::Swapping { settle_ms, .. } | Phase::Resolving { settle_ms, .. } => settle_ms,
        };

        if *settle > 0 {
            *settle = settle.saturating_sub(elapsed_ms);
            if *settle > 0 {
                return false;
            }
        }

        self.advance()
    }

    /// Run the next structural step now, regardless of the settle window.
    /// Returns false if there was nothing to do (idle).
    pub fn advance(&mut self) -> bool {
        let phase = std::mem::replace(&mut self.phase, Phase::Idle { selection: None });

        match phase {
            Phase::Idle { selection } => {
                self.phase = Phase::Idle { selection };
                false
            }
            Phase::Swapping { first, second, .. } => {
                let matched = find_matches(&self.grid);
                if matched.is_empty() {
                    self.grid.swap(first, second);
                    debug!(?first, ?second, "no match, swap reverted");
                    self.events.push(EngineEvent::SwapReverted { first, second });
                    self.enter_idle();
                } else {
                    self.begin_clear(matched, 1);
                }
                true
            }
            Phase::Resolving {
                step: ResolveStep::Clearing { matched },
                pass,
                ..
            } => {
                let collapse = self.grid.collapse(&matched, &mut self.source);
                trace!(pass, per_col = ?collapse.removed_per_col, "columns compacted");
                self.events.push(EngineEvent::Refilled {
                    pass,
                    spawned: collapse.removed,
                });
                self.phase = Phase::Resolving {
                    step: ResolveStep::Dropping,
                    pass,
                    settle_ms: self.config.drop_settle_ms,
                };
                true
            }
            Phase::Resolving {
                step: ResolveStep::Dropping,
                pass,
                ..
            } => {
                let matched = find_matches(&self.grid);
                if matched.is_empty() {
                    debug!(passes = pass, "grid settled");
                    self.events.push(EngineEvent::Settled { passes: pass });
                    self.enter_idle();
                } else {
                    self.begin_clear(matched, pass + 1);
                }
                true
            }
        }
    }

    /// Step until idle, ignoring settle windows.
    ///
    /// Returns the number of resolving passes completed (0 for a reverted swap
    /// or when already idle).
    pub fn run_to_idle(&mut self) -> u32 {
        let mut passes = 0;
        while !self.is_idle() {
            if matches!(
                self.phase,
                Phase::Resolving {
                    step: ResolveStep::Clearing { .. },
                    ..
                }
            ) {
                passes += 1;
            }
            self.advance();
        }
        passes
    }

    /// The external countdown reached zero.
    ///
    /// Locks input at once when idle; otherwise the in-flight swap or cascade
    /// finishes first so the final score is complete.
    pub fn expire(&mut self) {
        if self.lifecycle != Lifecycle::Playing {
            return;
        }
        if self.is_idle() {
            self.phase = Phase::Idle { selection: None };
            self.lifecycle = Lifecycle::Over;
            info!(episode = self.episode_id, "time up");
            self.events.push(EngineEvent::GameOver);
        } else {
            debug!(episode = self.episode_id, "time up mid-cascade, deferring game over");
            self.lifecycle = Lifecycle::Expiring;
        }
    }

    /// Hard reset: drop any in-flight cascade and deal a new board.
    ///
    /// The RNG and id counter carry on, so ids from the previous round are
    /// never reused.
    pub fn restart(&mut self) {
        self.grid = generate_board(&mut self.source);
        self.phase = Phase::Idle { selection: None };
        self.lifecycle = Lifecycle::Playing;
        self.events.clear();
        self.episode_id = self.episode_id.wrapping_add(1);
        info!(episode = self.episode_id, "board restarted");
    }
}
