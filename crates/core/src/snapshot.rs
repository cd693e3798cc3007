use serde::{Deserialize, Serialize};

use crate::resolver::{Lifecycle, Phase, ResolveStep, Resolver};
use crate::types::{Position, TokenId, TokenKind, CELL_COUNT};

/// One token as seen by an observer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TokenView {
    pub id: TokenId,
    pub kind: TokenKind,
    pub row: u8,
    pub col: u8,
}

/// Coarse resolver state for observers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhaseKind {
    Idle,
    Swapping,
    Resolving,
}

impl PhaseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PhaseKind::Idle => "idle",
            PhaseKind::Swapping => "swapping",
            PhaseKind::Resolving => "resolving",
        }
    }
}

impl From<&Phase> for PhaseKind {
    fn from(value: &Phase) -> Self {
        match value {
            Phase::Idle { .. } => PhaseKind::Idle,
            Phase::Swapping { .. } => PhaseKind::Swapping,
            Phase::Resolving { .. } => PhaseKind::Resolving,
        }
    }
}

/// Full observable state after a structural change
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSnapshot {
    /// Every token, row-major
    pub tokens: Vec<TokenView>,
    pub selection: Option<Position>,
    pub phase: PhaseKind,
    /// Ids confirmed as matched and about to be removed
    pub pending: Vec<TokenId>,
    pub game_over: bool,
    pub episode_id: u32,
}

impl GridSnapshot {
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.selection = None;
        self.phase = PhaseKind::Idle;
        self.pending.clear();
        self.game_over = false;
        self.episode_id = 0;
    }

    /// Whether the observer may currently send picks
    pub fn accepts_input(&self) -> bool {
        !self.game_over && self.phase == PhaseKind::Idle
    }

    /// Token at `(row, col)`, if present in the snapshot
    pub fn token_at(&self, row: u8, col: u8) -> Option<&TokenView> {
        self.tokens.iter().find(|t| t.row == row && t.col == col)
    }
}

impl Default for GridSnapshot {
    fn default() -> Self {
        Self {
            tokens: Vec::with_capacity(CELL_COUNT),
            selection: None,
            phase: PhaseKind::Idle,
            pending: Vec::new(),
            game_over: false,
            episode_id: 0,
        }
    }
}

impl Resolver {
    /// Fill `out` with the current state, reusing its buffers.
    pub fn snapshot_into(&self, out: &mut GridSnapshot) {
        out.clear();
        out.tokens.extend(self.grid().iter().map(|(pos, token)| TokenView {
            id: token.id,
            kind: token.kind,
            row: pos.row,
            col: pos.col,
        }));
        out.selection = self.selection();
        out.phase = PhaseKind::from(self.phase());
        if let Phase::Resolving {
            step: ResolveStep::Clearing { matched },
            ..
        } = self.phase()
        {
            out.pending.extend(matched.iter());
        }
        out.game_over = self.lifecycle() == Lifecycle::Over;
        out.episode_id = self.episode_id();
    }

    pub fn snapshot(&self) -> GridSnapshot {
        let mut s = GridSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
