//! Applies a generated move to a copy of a board.
//!
//! Handles every board side effect of a move: en-passant pawn removal, rook
//! relocation when castling, castling-right revocation, the en-passant window
//! and the move clocks. Promotion piece choice is not part of a move; a pawn
//! reaching the last rank stays a pawn until `promote_in_place` is called.

use crate::game_state::board::Board;
use crate::game_state::chess_rules::{castle_path_to, castling_right_of_corner};
use crate::game_state::chess_types::*;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};

pub fn apply_move(board: &Board, mv: &Move) -> MoveGenResult<Board> {
    if board.get(mv.from) != Some(mv.piece) {
        return Err(MoveGenerationError::NoPieceOnSquare(mv.from));
    }

    let captured = captured_piece(board, mv);
    let mut next = board.clone_snapshot();

    next.set(mv.from, None);
    if mv.kind == MoveKind::EnPassant {
        next.set(en_passant_victim_square(mv), None);
    }
    next.set(mv.to, Some(mv.piece));

    if mv.kind == MoveKind::Castling {
        let path = castle_path_to(mv.piece.color, mv.to).ok_or_else(|| {
            MoveGenerationError::InvalidState(format!("no castling path ends on {}", mv.to))
        })?;
        let rook = next.get(path.rook_from);
        next.set(path.rook_from, None);
        next.set(path.rook_to, rook);
    }

    update_castling_rights(&mut next, mv);

    next.en_passant = if mv.kind == MoveKind::DoubleMove {
        let skipped = Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2);
        Some(EnPassant {
            capture_square: mv.to,
            target_square: skipped,
        })
    } else {
        None
    };

    if mv.piece.kind == PieceKind::Pawn || captured.is_some() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if mv.piece.color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    Ok(next)
}

/// Piece removed from the board by `mv`, if any.
pub fn captured_piece(board: &Board, mv: &Move) -> Option<Piece> {
    match mv.kind {
        MoveKind::EnPassant => board.get(en_passant_victim_square(mv)),
        MoveKind::Castling => None,
        _ => board.get(mv.to).filter(|piece| piece.color != mv.piece.color),
    }
}

/// Replaces the pawn on `square` with `kind` of the same color.
pub fn promote_in_place(board: &mut Board, square: Square, kind: PieceKind) -> MoveGenResult<()> {
    match board.get(square) {
        Some(Piece {
            kind: PieceKind::Pawn,
            color,
        }) => {
            board.set(square, Some(Piece::new(kind, color)));
            Ok(())
        }
        _ => Err(MoveGenerationError::InvalidState(format!(
            "no pawn to promote on {square}"
        ))),
    }
}

/// The captured pawn sits beside the origin, on the target file.
#[inline]
fn en_passant_victim_square(mv: &Move) -> Square {
    Square::new(mv.to.file(), mv.from.rank())
}

fn update_castling_rights(board: &mut Board, mv: &Move) {
    if mv.piece.kind == PieceKind::King {
        board.castling_rights &= !castling_flags_for(mv.piece.color);
    }

    // A rook leaving its corner, or anything landing there, ends that side.
    board.castling_rights &= !castling_right_of_corner(mv.from);
    board.castling_rights &= !castling_right_of_corner(mv.to);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::fen_parser::parse_fen;

    fn find_square(name: &str) -> Square {
        crate::utils::algebraic::algebraic_to_square(name).expect("square name should parse")
    }

    #[test]
    fn double_move_opens_en_passant_window() {
        let board = Board::starting_position();
        let pawn = Piece::new(PieceKind::Pawn, Color::Light);
        let mv = Move::new(find_square("e2"), find_square("e4"), pawn, MoveKind::DoubleMove);

        let next = apply_move(&board, &mv).expect("move should apply");
        assert_eq!(
            next.en_passant,
            Some(EnPassant {
                capture_square: find_square("e4"),
                target_square: find_square("e3"),
            })
        );
        assert_eq!(next.get(find_square("e4")), Some(pawn));
        assert!(next.is_empty(find_square("e2")));
        assert_eq!(next.halfmove_clock, 0);
        assert_eq!(next.fullmove_number, 1);
        // The original snapshot is untouched.
        assert_eq!(board, Board::starting_position());
    }

    #[test]
    fn en_passant_removes_the_skipping_pawn() {
        let (board, _) =
            parse_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("FEN should parse");
        let pawn = Piece::new(PieceKind::Pawn, Color::Dark);
        let mv = Move::new(find_square("d4"), find_square("e3"), pawn, MoveKind::EnPassant);

        assert_eq!(
            captured_piece(&board, &mv),
            Some(Piece::new(PieceKind::Pawn, Color::Light))
        );
        let next = apply_move(&board, &mv).expect("move should apply");
        assert!(next.is_empty(find_square("e4")));
        assert_eq!(next.get(find_square("e3")), Some(pawn));
        assert_eq!(next.en_passant, None);
        assert_eq!(next.fullmove_number, 2);
    }

    #[test]
    fn castling_relocates_rook_and_revokes_rights() {
        let (board, _) =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("FEN should parse");
        let king = Piece::new(PieceKind::King, Color::Light);
        let mv = Move::new(find_square("e1"), find_square("c1"), king, MoveKind::Castling);

        let next = apply_move(&board, &mv).expect("move should apply");
        assert_eq!(next.get(find_square("c1")), Some(king));
        assert_eq!(
            next.get(find_square("d1")),
            Some(Piece::new(PieceKind::Rook, Color::Light))
        );
        assert!(next.is_empty(find_square("a1")));
        assert!(!next.can_castle(Color::Light));
        assert!(next.can_castle(Color::Dark));
        assert_eq!(next.halfmove_clock, 4);
    }

    #[test]
    fn rook_move_and_rook_capture_revoke_one_side() {
        let (board, _) =
            parse_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("FEN should parse");
        let rook = Piece::new(PieceKind::Rook, Color::Light);
        let mv = Move::new(find_square("h1"), find_square("h8"), rook, MoveKind::Capture);

        let next = apply_move(&board, &mv).expect("move should apply");
        assert_eq!(next.castling_rights, CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE);
    }

    #[test]
    fn mismatched_origin_is_rejected() {
        let board = Board::starting_position();
        let pawn = Piece::new(PieceKind::Pawn, Color::Light);
        let mv = Move::new(find_square("e3"), find_square("e4"), pawn, MoveKind::Move);
        assert_eq!(
            apply_move(&board, &mv),
            Err(MoveGenerationError::NoPieceOnSquare(find_square("e3")))
        );
    }

    #[test]
    fn promotion_swaps_pawn_for_chosen_piece() {
        let mut board = Board::empty();
        let h8 = find_square("h8");
        board.set(h8, Some(Piece::new(PieceKind::Pawn, Color::Light)));

        promote_in_place(&mut board, h8, PieceKind::Knight).expect("pawn should promote");
        assert_eq!(board.get(h8), Some(Piece::new(PieceKind::Knight, Color::Light)));
        assert!(promote_in_place(&mut board, h8, PieceKind::Queen).is_err());
    }
}
