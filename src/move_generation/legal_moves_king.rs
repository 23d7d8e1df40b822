use crate::game_state::board::Board;
use crate::game_state::chess_rules::castle_paths;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::king_moves::king_attacks;

pub fn generate_king_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    push_target_moves(board, piece, from, king_attacks(from), out);
    generate_castling_moves(board, piece, from, out);
}

fn generate_castling_moves(board: &Board, piece: Piece, king_from: Square, out: &mut Vec<Move>) {
    let side = piece.color;
    if !board.can_castle(side) {
        return;
    }

    let enemy = side.opposite();
    let rook = Some(Piece::new(PieceKind::Rook, side));

    for path in castle_paths(side) {
        if king_from != path.king_from || !board.has_castling_right(path.right) {
            continue;
        }
        if board.get(path.rook_from) != rook {
            continue;
        }
        if path
            .must_be_empty
            .iter()
            .any(|&index| !board.is_empty(Square::from_index(index as usize)))
        {
            continue;
        }
        // Covers castling out of, through, and into check.
        if path
            .king_walk
            .iter()
            .any(|&square| is_square_attacked(board, square, enemy))
        {
            continue;
        }

        out.push(Move::new(king_from, path.king_to, piece, MoveKind::Castling));
    }
}

#[cfg(test)]
mod tests {
    use super::generate_king_moves;
    use crate::game_state::chess_types::*;
    use crate::utils::fen_parser::parse_fen;

    fn castling_targets(fen: &str, color: Color) -> Vec<String> {
        let (board, _) = parse_fen(fen).expect("FEN should parse");
        let from = board.king_square(color).expect("king should be on the board");
        let king = Piece::new(PieceKind::King, color);
        let mut out = Vec::new();
        generate_king_moves(&board, king, from, &mut out);

        let mut targets: Vec<String> = out
            .iter()
            .filter(|mv| mv.kind == MoveKind::Castling)
            .map(|mv| mv.to.to_string())
            .collect();
        targets.sort();
        targets
    }

    #[test]
    fn both_sides_available_when_clear() {
        assert_eq!(
            castling_targets("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", Color::Light),
            vec!["c1", "g1"]
        );
        assert_eq!(
            castling_targets("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", Color::Dark),
            vec!["c8", "g8"]
        );
    }

    #[test]
    fn no_castling_without_rights() {
        assert!(castling_targets("r3k2r/8/8/8/8/8/8/R3K2R w kq - 0 1", Color::Light).is_empty());
        assert_eq!(
            castling_targets("r3k2r/8/8/8/8/8/8/R3K2R w K - 0 1", Color::Light),
            vec!["g1"]
        );
    }

    #[test]
    fn no_castling_through_attacked_square() {
        // Dark rook on f8 covers f1.
        assert_eq!(
            castling_targets("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1", Color::Light),
            vec!["c1"]
        );
    }

    #[test]
    fn no_castling_onto_attacked_square() {
        // Dark rook on g8 covers g1 while e1 and f1 stay safe.
        assert_eq!(
            castling_targets("4k1r1/8/8/8/8/8/8/R3K2R w KQ - 0 1", Color::Light),
            vec!["c1"]
        );
        // Dark rook on c8 covers c1 while d1 stays safe.
        assert_eq!(
            castling_targets("2r1k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", Color::Light),
            vec!["g1"]
        );
    }

    #[test]
    fn no_castling_out_of_check() {
        assert!(castling_targets("4r1k1/8/8/8/8/8/8/R3K2R w KQ - 0 1", Color::Light).is_empty());
    }

    #[test]
    fn queenside_b_file_may_be_attacked_but_not_occupied() {
        // Dark rook on b8 attacks b1 only; queenside castling stays legal.
        assert_eq!(
            castling_targets("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1", Color::Light),
            vec!["c1"]
        );
        assert!(castling_targets("4k3/8/8/8/8/8/8/RN2K3 w Q - 0 1", Color::Light).is_empty());
    }

    #[test]
    fn missing_rook_disables_that_side() {
        assert_eq!(
            castling_targets("4k3/8/8/8/8/8/8/4K2R w KQ - 0 1", Color::Light),
            vec!["g1"]
        );
    }
}
