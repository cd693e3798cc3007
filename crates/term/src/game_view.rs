//! GameView: maps a `GridSnapshot` into terminal text lines.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GridSnapshot, PhaseKind};
use crate::types::{Position, BOARD_SIZE, WARNING_SECS};

/// Values owned outside the engine that the view displays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    pub score: u32,
    pub time_left: u32,
    pub cursor: Position,
}

/// A lightweight text view of the board.
///
/// Each cell is four columns wide: a left marker, the emoji (two columns in
/// most terminals) and a right marker. The cursor is drawn as `[..]`, the
/// selection as `<..>` and tokens about to be cleared as `*..*`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GameView;

impl GameView {
    pub fn new() -> Self {
        Self
    }

    /// Render the snapshot and HUD to lines, top to bottom.
    pub fn render(&self, snap: &GridSnapshot, hud: &Hud) -> Vec<String> {
        let mut lines = Vec::with_capacity(BOARD_SIZE as usize + 6);

        lines.push("EMOJI CRUSH".to_string());
        lines.push(format!(
            "Score: {:>6}   Time: {:>3}s{}",
            hud.score,
            hud.time_left,
            if hud.time_left <= WARNING_SECS { " !" } else { "" }
        ));
        lines.push(String::new());

        let mut by_cell = [' '; (BOARD_SIZE as usize) * (BOARD_SIZE as usize)];
        let mut pending = [false; (BOARD_SIZE as usize) * (BOARD_SIZE as usize)];
        for t in &snap.tokens {
            let idx = Position::new(t.row, t.col).index();
            if let Some(slot) = by_cell.get_mut(idx) {
                *slot = t.kind.glyph();
                pending[idx] = snap.pending.contains(&t.id);
            }
        }

        for row in 0..BOARD_SIZE {
            let mut line = String::with_capacity(BOARD_SIZE as usize * 8);
            for col in 0..BOARD_SIZE {
                let pos = Position::new(row, col);
                let idx = pos.index();
                let (open, close) = if hud.cursor == pos {
                    ('[', ']')
                } else if snap.selection == Some(pos) {
                    ('<', '>')
                } else if pending[idx] {
                    ('*', '*')
                } else {
                    (' ', ' ')
                };
                line.push(open);
                line.push(by_cell[idx]);
                line.push(close);
            }
            lines.push(line);
        }

        lines.push(String::new());
        lines.push(self.status_line(snap));
        lines.push("arrows/hjkl move  space pick  r restart  q quit".to_string());
        lines
    }

    fn status_line(&self, snap: &GridSnapshot) -> String {
        if snap.game_over {
            return "GAME OVER - press r to play again".to_string();
        }
        match snap.phase {
            PhaseKind::Idle => match snap.selection {
                Some(p) => format!("selected ({}, {})", p.row, p.col),
                None => "pick a cell".to_string(),
            },
            PhaseKind::Swapping | PhaseKind::Resolving => format!("{}...", snap.phase.as_str()),
        }
    }
}
