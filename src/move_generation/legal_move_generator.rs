//! Legal move generation.
//!
//! Pseudo-legal moves come from the per-piece generators. Each candidate is
//! applied to a scratch copy of the board and dropped when it leaves the
//! mover's own king attacked.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};

pub struct LegalMoveGenerator;

impl MoveGenerator for LegalMoveGenerator {
    fn generate_legal_moves(&self, board: &Board, turn: Color) -> MoveGenResult<Vec<Move>> {
        Ok(all_legal_moves(turn, board))
    }
}

/// Moves for `piece` on `square`, ignoring whether they expose its own king.
pub fn pseudo_legal_moves(piece: Piece, square: Square, board: &Board) -> Vec<Move> {
    let mut out = Vec::with_capacity(28);
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, piece, square, &mut out),
        PieceKind::Knight => generate_knight_moves(board, piece, square, &mut out),
        PieceKind::Bishop => generate_bishop_moves(board, piece, square, &mut out),
        PieceKind::Rook => generate_rook_moves(board, piece, square, &mut out),
        PieceKind::Queen => generate_queen_moves(board, piece, square, &mut out),
        PieceKind::King => generate_king_moves(board, piece, square, &mut out),
    }
    out
}

/// Legal moves for `piece` on `square` when `color` is to move.
///
/// Panics if `piece` is not on `square`; callers look the piece up first.
pub fn legal_moves(color: Color, piece: Piece, square: Square, board: &Board) -> Vec<Move> {
    assert_eq!(
        board.get(square),
        Some(piece),
        "legal_moves asked for a piece that is not on {square}"
    );

    if piece.color != color {
        return Vec::new();
    }

    pseudo_legal_moves(piece, square, board)
        .into_iter()
        .filter(|mv| leaves_king_safe(board, mv, color))
        .collect()
}

/// Every legal move for `color`, in square order.
pub fn all_legal_moves(color: Color, board: &Board) -> Vec<Move> {
    board
        .pieces_of(color)
        .flat_map(|(square, piece)| legal_moves(color, piece, square, board))
        .collect()
}

/// Stops at the first legal move found.
pub fn has_any_legal_move(color: Color, board: &Board) -> bool {
    board.pieces_of(color).any(|(square, piece)| {
        pseudo_legal_moves(piece, square, board)
            .iter()
            .any(|mv| leaves_king_safe(board, mv, color))
    })
}

fn leaves_king_safe(board: &Board, mv: &Move, color: Color) -> bool {
    match apply_move(board, mv) {
        Ok(next) => !is_king_in_check(&next, color),
        Err(_) => false,
    }
}
