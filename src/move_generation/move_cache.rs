//! Bounded legal-move cache owned by a game.
//!
//! Keys carry every field that affects legality: piece placement, side to
//! move, castling rights and the en-passant window. Move clocks are left out
//! because they never change which moves are legal.

use std::collections::HashMap;

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PositionKey {
    cells: [u8; 64],
    turn: Color,
    castling_rights: CastlingRights,
    en_passant: Option<EnPassant>,
}

impl PositionKey {
    pub fn new(board: &Board, turn: Color) -> Self {
        Self {
            cells: board.encode_squares(),
            turn,
            castling_rights: board.castling_rights,
            en_passant: board.en_passant,
        }
    }
}

#[derive(Debug, Clone)]
pub struct MoveCache {
    entries: HashMap<PositionKey, Vec<Move>>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl MoveCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.min(1024)),
            capacity,
            hits: 0,
            misses: 0,
        }
    }

    /// Returns the cached moves for `(board, turn)` or computes and stores them.
    pub fn get_or_compute<F>(&mut self, board: &Board, turn: Color, compute: F) -> Vec<Move>
    where
        F: FnOnce() -> Vec<Move>,
    {
        let key = PositionKey::new(board, turn);
        if let Some(moves) = self.entries.get(&key) {
            self.hits += 1;
            return moves.clone();
        }

        self.misses += 1;
        let moves = compute();
        if self.capacity == 0 {
            return moves;
        }
        if self.entries.len() >= self.capacity {
            self.entries.clear();
        }
        self.entries.insert(key, moves.clone());
        moves
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// `(hits, misses)` since creation.
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}
