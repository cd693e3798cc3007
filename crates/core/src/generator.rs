//! Board generation - a fresh 8x8 grid with no runs of three
//!
//! Cells are filled row-major. For each cell a kind is drawn and redrawn while
//! it would complete a run with the two cells to its left or the two cells
//! above it. At most two kinds can be forbidden at once, so with three or more
//! kinds a legal draw always exists. Ids are minted only for accepted kinds.

use crate::grid::Grid;
use crate::rng::TokenSource;
use crate::types::{TokenKind, BOARD_SIZE, CELL_COUNT};

/// Generate a match-free grid from `source`
pub fn generate_board(source: &mut TokenSource) -> Grid {
    let size = BOARD_SIZE as usize;
    // Kinds placed so far, row-major
    let mut kinds = [TokenKind::Apple; CELL_COUNT];

    Grid::from_fn(|pos| {
        let row = pos.row as usize;
        let col = pos.col as usize;

        let completes_run = |kind: TokenKind| {
            let row_run = col >= 2
                && kinds[row * size + col - 1] == kind
                && kinds[row * size + col - 2] == kind;
            let col_run = row >= 2
                && kinds[(row - 1) * size + col] == kind
                && kinds[(row - 2) * size + col] == kind;
            row_run || col_run
        };

        let mut kind = source.draw_kind();
        while completes_run(kind) {
            kind = source.draw_kind();
        }

        kinds[pos.index()] = kind;
        source.mint(kind)
    })
}
