//! Match detection - sliding-window scan for runs of three or more
//!
//! Every row is scanned left to right, then every column top to bottom, with a
//! window of three cells. Each window whose three kinds agree contributes its
//! three token ids. Longer runs are covered by overlapping windows, and a token
//! in both a horizontal and a vertical run is reported once.
//!
//! The detector is pure: it never mutates the grid and keeps no state between
//! calls, so the resolver can re-run it after every structural change.

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::types::{TokenId, BOARD_SIZE, CELL_COUNT, MIN_RUN};

/// Ordered set of token identities taking part in at least one run.
///
/// Iteration order is the order in which ids were first found by the scan.
/// Capacity is the board size, so inserting never allocates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSet {
    ids: ArrayVec<TokenId, CELL_COUNT>,
}

impl MatchSet {
    pub fn new() -> Self {
        Self {
            ids: ArrayVec::new(),
        }
    }

    /// Add `id` unless already present. Returns true if it was added.
    pub fn insert(&mut self, id: TokenId) -> bool {
        if self.contains(id) || self.ids.is_full() {
            return false;
        }
        self.ids.push(id);
        true
    }

    pub fn contains(&self, id: TokenId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.ids.iter().copied()
    }

    pub fn as_slice(&self) -> &[TokenId] {
        &self.ids
    }
}

/// Scan `grid` and return the ids of every token in a run of three or more.
///
/// # Panics
///
/// If the grid holds the same token id twice. The resolver is the only writer
/// of grids and must never produce one.
pub fn find_matches(grid: &Grid) -> MatchSet {
    assert!(
        grid.first_duplicate_id().is_none(),
        "grid invariant broken: duplicate token id {:?}",
        grid.first_duplicate_id()
    );

    let size = BOARD_SIZE as usize;
    // Marks by flat index so the id set only sees each cell once
    let mut marked = [false; CELL_COUNT];
    let mut out = MatchSet::new();

    let mut mark = |out: &mut MatchSet, row: usize, col: usize| {
        let idx = row * size + col;
        if !marked[idx] {
            marked[idx] = true;
            out.insert(grid.id_at_rc(row, col));
        }
    };

    // Horizontal windows
    for row in 0..size {
        for col in 0..=size - MIN_RUN {
            let kind = grid.kind_at_rc(row, col);
            if grid.kind_at_rc(row, col + 1) == kind && grid.kind_at_rc(row, col + 2) == kind {
                for dc in 0..MIN_RUN {
                    mark(&mut out, row, col + dc);
                }
            }
        }
    }

    // Vertical windows
    for col in 0..size {
        for row in 0..=size - MIN_RUN {
            let kind = grid.kind_at_rc(row, col);
            if grid.kind_at_rc(row + 1, col) == kind && grid.kind_at_rc(row + 2, col) == kind {
                for dr in 0..MIN_RUN {
                    mark(&mut out, row + dr, col);
                }
            }
        }
    }

    out
}

/// True if the grid has no run of three (a quiescent grid)
pub fn is_quiescent(grid: &Grid) -> bool {
    find_matches(grid).is_empty()
}
