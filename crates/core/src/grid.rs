//! Grid module - the 8x8 token arrangement
//!
//! The grid is a total, injective map from [`Position`] to [`Token`]. It is
//! stored as a flat row-major array of tokens, so an observable grid can never
//! have an empty or doubly-occupied cell. Empty cells only exist inside
//! [`Grid::collapse`], in a per-column scratch buffer.
//!
//! Coordinates: (row, col), row 0 is the top edge and gravity pulls toward
//! row `BOARD_SIZE - 1`.

use thiserror::Error;

use crate::matcher::MatchSet;
use crate::rng::TokenSource;
use crate::types::{Position, Token, TokenId, TokenKind, BOARD_SIZE, CELL_COUNT};

/// Reasons a set of placements does not form a valid grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("position ({}, {}) is outside the board", .0.row, .0.col)]
    OutOfBounds(Position),

    #[error("position ({}, {}) is occupied twice", .0.row, .0.col)]
    DuplicatePosition(Position),

    #[error("position ({}, {}) has no token", .0.row, .0.col)]
    MissingPosition(Position),

    #[error("token id {} is placed more than once", .0 .0)]
    DuplicateId(TokenId),

    #[error("token id {} is above {}, leaving no room for fresh ids", .0 .0, MAX_PLACED_ID.0)]
    IdSpaceExhausted(TokenId),
}

/// Largest id a caller-built grid may carry.
///
/// Everything above it is reserved for tokens minted during play, so refills
/// can never run into an id that is already on the board.
pub const MAX_PLACED_ID: TokenId = TokenId(u32::MAX >> 1);

/// Per-column outcome of a gravity + refill step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Collapse {
    /// Tokens removed (and therefore refilled) in each column
    pub removed_per_col: [u8; BOARD_SIZE as usize],
    /// Total tokens removed across the board
    pub removed: u32,
}

/// The game grid - 8x8 tokens using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Row-major tokens (row * BOARD_SIZE + col)
    tokens: [Token; CELL_COUNT],
}

impl Grid {
    /// Build a grid by asking `f` for the token at every position, row-major.
    ///
    /// The caller is responsible for id uniqueness.
    pub(crate) fn from_fn(mut f: impl FnMut(Position) -> Token) -> Self {
        let mut tokens = [Token::new(TokenId(0), TokenKind::Apple); CELL_COUNT];
        for (idx, slot) in tokens.iter_mut().enumerate() {
            // idx < CELL_COUNT
            let pos = Position::new(
                (idx / BOARD_SIZE as usize) as u8,
                (idx % BOARD_SIZE as usize) as u8,
            );
            *slot = f(pos);
        }
        Self { tokens }
    }

    /// Build a grid from a kind layout, assigning ids `0..64` row-major.
    ///
    /// Handy for fixed puzzles and tests. A resolver started from this grid
    /// mints later ids above 63.
    pub fn from_kinds(kinds: [[TokenKind; BOARD_SIZE as usize]; BOARD_SIZE as usize]) -> Self {
        Self::from_fn(|pos| {
            Token::new(
                TokenId(pos.index() as u32),
                kinds[pos.row as usize][pos.col as usize],
            )
        })
    }

    /// Build a grid from arbitrary placements, rejecting anything that breaks
    /// the one-token-per-cell invariant.
    pub fn from_placements<I>(placements: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = (Position, Token)>,
    {
        let mut cells: [Option<Token>; CELL_COUNT] = [None; CELL_COUNT];
        for (pos, token) in placements {
            if !pos.in_bounds() {
                return Err(GridError::OutOfBounds(pos));
            }
            if token.id > MAX_PLACED_ID {
                return Err(GridError::IdSpaceExhausted(token.id));
            }
            let slot = &mut cells[pos.index()];
            if slot.is_some() {
                return Err(GridError::DuplicatePosition(pos));
            }
            *slot = Some(token);
        }

        let mut tokens = [Token::new(TokenId(0), TokenKind::Apple); CELL_COUNT];
        for (idx, cell) in cells.iter().enumerate() {
            match cell {
                Some(token) => tokens[idx] = *token,
                None => {
                    // idx < CELL_COUNT, so from_index always succeeds
                    let pos = Position::from_index(idx).unwrap_or(Position::new(0, 0));
                    return Err(GridError::MissingPosition(pos));
                }
            }
        }

        let grid = Self { tokens };
        if let Some(id) = grid.first_duplicate_id() {
            return Err(GridError::DuplicateId(id));
        }
        Ok(grid)
    }

    /// Get the token at `pos`, or None if out of bounds
    pub fn get(&self, pos: Position) -> Option<Token> {
        if !pos.in_bounds() {
            return None;
        }
        Some(self.tokens[pos.index()])
    }

    #[inline(always)]
    pub(crate) fn kind_at_rc(&self, row: usize, col: usize) -> TokenKind {
        self.tokens[row * BOARD_SIZE as usize + col].kind
    }

    #[inline(always)]
    pub(crate) fn id_at_rc(&self, row: usize, col: usize) -> TokenId {
        self.tokens[row * BOARD_SIZE as usize + col].id
    }

    /// Find where a token currently sits
    pub fn position_of(&self, id: TokenId) -> Option<Position> {
        self.tokens
            .iter()
            .position(|t| t.id == id)
            .and_then(Position::from_index)
    }

    /// Exchange the tokens at `a` and `b`.
    /// Returns false if either position is out of bounds.
    pub fn swap(&mut self, a: Position, b: Position) -> bool {
        if !a.in_bounds() || !b.in_bounds() {
            return false;
        }
        self.tokens.swap(a.index(), b.index());
        true
    }

    /// Tokens in row-major order
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Iterate `(position, token)` pairs row-major
    pub fn iter(&self) -> impl Iterator<Item = (Position, Token)> + '_ {
        self.tokens
            .iter()
            .enumerate()
            .filter_map(|(idx, t)| Position::from_index(idx).map(|p| (p, *t)))
    }

    /// Tokens of one column, top to bottom
    pub fn column(&self, col: u8) -> Option<[Token; BOARD_SIZE as usize]> {
        if col >= BOARD_SIZE {
            return None;
        }
        let mut out = [self.tokens[0]; BOARD_SIZE as usize];
        for (row, slot) in out.iter_mut().enumerate() {
            *slot = self.tokens[row * BOARD_SIZE as usize + col as usize];
        }
        Some(out)
    }

    /// Largest id present on the board
    pub fn max_id(&self) -> TokenId {
        self.tokens
            .iter()
            .map(|t| t.id)
            .max()
            .unwrap_or(TokenId(0))
    }

    /// First id that appears more than once, if any
    pub fn first_duplicate_id(&self) -> Option<TokenId> {
        let mut ids = [TokenId(0); CELL_COUNT];
        for (slot, token) in ids.iter_mut().zip(self.tokens.iter()) {
            *slot = token.id;
        }
        ids.sort_unstable();
        ids.windows(2).find(|w| w[0] == w[1]).map(|w| w[0])
    }

    /// Remove every token in `matched`, let survivors fall, and refill from above.
    ///
    /// Each column is compacted with a two-pointer pass from the bottom: a
    /// surviving token keeps its order relative to the other survivors and
    /// lands on the lowest free row. The `n` rows left open at the top are then
    /// filled with fresh tokens from `source`; the first one minted lands in row
    /// `n - 1` and the last in row 0, so new tokens appear to drop in from above
    /// the top edge.
    pub fn collapse(&mut self, matched: &MatchSet, source: &mut TokenSource) -> Collapse {
        let size = BOARD_SIZE as usize;
        let mut out = Collapse::default();

        for col in 0..size {
            let mut write_row = size;

            // Scan from bottom to top
            for read_row in (0..size).rev() {
                let token = self.tokens[read_row * size + col];
                if matched.contains(token.id) {
                    continue;
                }
                write_row -= 1;
                if write_row != read_row {
                    self.tokens[write_row * size + col] = token;
                }
            }

            // Rows 0..write_row are now stale; refill them top-down from write_row - 1.
            let missing = write_row;
            for i in 0..missing {
                let row = missing - 1 - i;
                self.tokens[row * size + col] = source.draw();
            }

            out.removed_per_col[col] = missing as u8;
            out.removed += missing as u32;
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TokenKind::*;

    /// A match-free checkerboard of two kinds shifted by row
    fn striped() -> Grid {
        let pattern = [Apple, Grape, Orange, Lemon, Blueberry, Coconut];
        let mut kinds = [[Apple; 8]; 8];
        for (r, row) in kinds.iter_mut().enumerate() {
            for (c, cell) in row.iter_mut().enumerate() {
                *cell = pattern[(r + c) % pattern.len()];
            }
        }
        Grid::from_kinds(kinds)
    }

    #[test]
    fn test_from_kinds_assigns_row_major_ids() {
        let grid = striped();
        assert_eq!(grid.get(Position::new(0, 0)).unwrap().id, TokenId(0));
        assert_eq!(grid.get(Position::new(1, 0)).unwrap().id, TokenId(8));
        assert_eq!(grid.get(Position::new(7, 7)).unwrap().id, TokenId(63));
        assert_eq!(grid.get(Position::new(8, 0)), None);
        assert_eq!(grid.max_id(), TokenId(63));
        assert_eq!(grid.first_duplicate_id(), None);
    }

    #[test]
    fn test_swap_exchanges_tokens() {
        let mut grid = striped();
        let a = Position::new(2, 2);
        let b = Position::new(2, 3);
        let ta = grid.get(a).unwrap();
        let tb = grid.get(b).unwrap();

        assert!(grid.swap(a, b));
        assert_eq!(grid.get(a), Some(tb));
        assert_eq!(grid.get(b), Some(ta));
        assert_eq!(grid.position_of(ta.id), Some(b));

        assert!(!grid.swap(a, Position::new(0, 8)));
    }

    #[test]
    fn test_from_placements_rejects_broken_layouts() {
        let grid = striped();
        let mut placements: Vec<(Position, Token)> = grid.iter().collect();

        assert_eq!(Grid::from_placements(placements.clone()), Ok(grid.clone()));

        let last = placements.pop().unwrap();
        assert_eq!(
            Grid::from_placements(placements.clone()),
            Err(GridError::MissingPosition(last.0))
        );

        placements.push((placements[0].0, last.1));
        assert_eq!(
            Grid::from_placements(placements.clone()),
            Err(GridError::DuplicatePosition(placements[0].0))
        );

        placements.pop();
        placements.push((Position::new(9, 9), last.1));
        assert_eq!(
            Grid::from_placements(placements.clone()),
            Err(GridError::OutOfBounds(Position::new(9, 9)))
        );

        placements.pop();
        placements.push((last.0, Token::new(TokenId(5), last.1.kind)));
        assert_eq!(
            Grid::from_placements(placements),
            Err(GridError::DuplicateId(TokenId(5)))
        );
    }

    #[test]
    fn test_from_placements_reserves_fresh_id_space() {
        let grid = striped();
        let rekey = |id: TokenId| -> Vec<(Position, Token)> {
            grid.iter()
                .map(|(pos, token)| {
                    if pos == Position::new(0, 7) {
                        (pos, Token::new(id, token.kind))
                    } else {
                        (pos, token)
                    }
                })
                .collect()
        };

        assert_eq!(
            Grid::from_placements(rekey(TokenId(u32::MAX))),
            Err(GridError::IdSpaceExhausted(TokenId(u32::MAX)))
        );
        let next = TokenId(MAX_PLACED_ID.0 + 1);
        assert_eq!(
            Grid::from_placements(rekey(next)),
            Err(GridError::IdSpaceExhausted(next))
        );

        let grid = Grid::from_placements(rekey(MAX_PLACED_ID)).unwrap();
        assert_eq!(grid.max_id(), MAX_PLACED_ID);
    }

    #[test]
    fn test_grid_error_display() {
        let err = GridError::MissingPosition(Position::new(3, 4));
        assert_eq!(err.to_string(), "position (3, 4) has no token");
        let err = GridError::DuplicateId(TokenId(12));
        assert_eq!(err.to_string(), "token id 12 is placed more than once");
    }

    #[test]
    fn test_collapse_without_matches_is_identity() {
        let mut grid = striped();
        let before = grid.clone();
        let mut source = TokenSource::new(5, 6).with_ids_after(grid.max_id());

        let out = grid.collapse(&MatchSet::new(), &mut source);

        assert_eq!(out.removed, 0);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_collapse_single_column() {
        let mut grid = striped();
        let column_before = grid.column(4).unwrap();
        let mut matched = MatchSet::new();
        matched.insert(column_before[2].id);
        matched.insert(column_before[5].id);
        let mut source = TokenSource::new(5, 6).with_ids_after(grid.max_id());

        let out = grid.collapse(&matched, &mut source);
        let column_after = grid.column(4).unwrap();

        assert_eq!(out.removed, 2);
        assert_eq!(out.removed_per_col[4], 2);
        // Survivors keep order and sit at the bottom
        let survivors = [0usize, 1, 3, 4, 6, 7].map(|r| column_before[r].id);
        let landed: Vec<TokenId> = column_after[2..].iter().map(|t| t.id).collect();
        assert_eq!(landed, survivors.to_vec());
        // Refills: first minted lands in row 1, second in row 0
        assert_eq!(column_after[1].id, TokenId(64));
        assert_eq!(column_after[0].id, TokenId(65));
        // Other columns untouched
        assert_eq!(grid.column(3), striped().column(3));
    }
}
