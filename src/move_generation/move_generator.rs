use std::error::Error;
use std::fmt;

use crate::game_state::board::Board;
use crate::game_state::chess_types::{Color, Move, Square};

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveGenerationError {
    NoPieceOnSquare(Square),
    InvalidState(String),
}

impl fmt::Display for MoveGenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveGenerationError::NoPieceOnSquare(square) => {
                write!(f, "no matching piece on {square}")
            }
            MoveGenerationError::InvalidState(msg) => write!(f, "invalid board state: {msg}"),
        }
    }
}

impl Error for MoveGenerationError {}

/// Source of fully legal moves for one side of a position.
pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, board: &Board, turn: Color) -> MoveGenResult<Vec<Move>>;
}
