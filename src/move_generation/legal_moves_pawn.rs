//! Pseudo-legal pawn moves.
//!
//! Pushes, double pushes from the start rank, diagonal captures and en
//! passant. A pawn reaching the last rank is emitted as a plain `Move` or
//! `Capture`; the game upgrades it to `Promote` when the move is applied.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{en_passant_rank, pawn_start_rank};
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::enemy_piece_on;
use crate::moves::pawn_moves::{pawn_attacks, pawn_push_square};

pub fn generate_pawn_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    let side = piece.color;

    if let Some(one_step) = pawn_push_square(side, from) {
        if board.is_empty(one_step) {
            out.push(Move::new(from, one_step, piece, MoveKind::Move));

            if from.rank() == pawn_start_rank(side) {
                if let Some(two_step) = pawn_push_square(side, one_step) {
                    if board.is_empty(two_step) {
                        out.push(Move::new(from, two_step, piece, MoveKind::DoubleMove));
                    }
                }
            }
        }
    }

    for to in mask_squares(pawn_attacks(side, from)) {
        if enemy_piece_on(board, side, to).is_some() {
            out.push(Move::new(from, to, piece, MoveKind::Capture));
        } else if board.is_empty(to) && is_en_passant_target(board, side, from, to) {
            out.push(Move::new(from, to, piece, MoveKind::EnPassant));
        }
    }
}

/// The window only exists for the move right after the enemy double move,
/// because `Board::en_passant` is cleared by every other move.
fn is_en_passant_target(board: &Board, side: Color, from: Square, to: Square) -> bool {
    if from.rank() != en_passant_rank(side) {
        return false;
    }

    let Some(window) = board.en_passant else {
        return false;
    };

    window.target_square == to
        && board.get(window.capture_square) == Some(Piece::new(PieceKind::Pawn, side.opposite()))
}
