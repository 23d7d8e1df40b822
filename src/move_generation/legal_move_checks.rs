//! Attack and check queries.
//!
//! Pure functions over a board. A board without a king of the asked color is
//! a valid input and is simply never in check.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::bishop_attacks;
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::queen_moves::queen_attacks;
use crate::moves::rook_moves::rook_attacks;

/// Squares `piece` standing on `from` attacks. Pawns attack diagonally only.
#[inline]
pub fn attack_mask(piece: Piece, from: Square, occupancy: u64) -> u64 {
    match piece.kind {
        PieceKind::Pawn => pawn_attacks(piece.color, from),
        PieceKind::Knight => knight_attacks(from),
        PieceKind::Bishop => bishop_attacks(from, occupancy),
        PieceKind::Rook => rook_attacks(from, occupancy),
        PieceKind::Queen => queen_attacks(from, occupancy),
        PieceKind::King => king_attacks(from),
    }
}

#[inline]
pub fn king_square(board: &Board, color: Color) -> Option<Square> {
    board.king_square(color)
}

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = king_square(board, color) else {
        return false;
    };
    is_square_attacked(board, king_sq, color.opposite())
}

pub fn is_square_attacked(board: &Board, square: Square, attacker_color: Color) -> bool {
    let occupancy = board.occupancy();
    board
        .pieces_of(attacker_color)
        .any(|(from, piece)| attack_mask(piece, from, occupancy) & square.bit() != 0)
}

pub fn attackers_to_square(
    board: &Board,
    square: Square,
    attacker_color: Color,
) -> Vec<(Square, PieceKind)> {
    let occupancy = board.occupancy();
    board
        .pieces_of(attacker_color)
        .filter(|(from, piece)| attack_mask(*piece, *from, occupancy) & square.bit() != 0)
        .map(|(from, piece)| (from, piece.kind))
        .collect()
}
