//! Board cursor, clamped to the grid.

use crate::map::{Command, Direction};
use crate::types::{GameAction, Position, BOARD_SIZE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pos: Position,
}

impl Cursor {
    pub fn new(pos: Position) -> Self {
        let clamped = Position::new(pos.row.min(BOARD_SIZE - 1), pos.col.min(BOARD_SIZE - 1));
        Self { pos: clamped }
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    /// Move one cell, stopping at the board edge
    pub fn step(&mut self, dir: Direction) {
        let Position { row, col } = self.pos;
        self.pos = match dir {
            Direction::Up => Position::new(row.saturating_sub(1), col),
            Direction::Down => Position::new((row + 1).min(BOARD_SIZE - 1), col),
            Direction::Left => Position::new(row, col.saturating_sub(1)),
            Direction::Right => Position::new(row, (col + 1).min(BOARD_SIZE - 1)),
        };
    }

    /// Apply a command; returns the engine action it produces, if any
    pub fn apply(&mut self, command: Command) -> Option<GameAction> {
        match command {
            Command::Move(dir) => {
                self.step(dir);
                None
            }
            Command::Pick => Some(GameAction::Pick(self.pos)),
            Command::Restart => Some(GameAction::Restart),
        }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new(Position::new(BOARD_SIZE / 2, BOARD_SIZE / 2))
    }
}
