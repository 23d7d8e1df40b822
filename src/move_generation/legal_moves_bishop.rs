//! Bishop moves: diagonal rays, stopping at the first piece.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::bishop_moves::bishop_attacks;

pub fn generate_bishop_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    push_target_moves(board, piece, from, bishop_attacks(from, board.occupancy()), out);
}
