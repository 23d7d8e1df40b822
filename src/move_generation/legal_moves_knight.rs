use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    push_target_moves(board, piece, from, knight_attacks(from), out);
}
