use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub fn generate_fen(board: &Board, turn: Color) -> String {
    let placement = generate_board_field(board);
    let side_to_move = match turn {
        Color::Light => "w",
        Color::Dark => "b",
    };
    let castling = generate_castling_field(board.castling_rights);
    let en_passant = board
        .en_passant
        .map(|ep| ep.target_square.to_string())
        .unwrap_or_else(|| "-".to_owned());

    format!(
        "{} {} {} {} {} {}",
        placement, side_to_move, castling, en_passant, board.halfmove_clock, board.fullmove_number
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::new();

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            if let Some(piece) = board.get(Square::new(file, rank)) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece_to_fen_char(piece));
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

pub(crate) fn piece_to_fen_char(piece: Piece) -> char {
    let base = match piece.kind {
        PieceKind::Pawn => 'p',
        PieceKind::Knight => 'n',
        PieceKind::Bishop => 'b',
        PieceKind::Rook => 'r',
        PieceKind::Queen => 'q',
        PieceKind::King => 'k',
    };

    match piece.color {
        Color::Light => base.to_ascii_uppercase(),
        Color::Dark => base,
    }
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    for (flag, letter) in [
        (CASTLE_LIGHT_KINGSIDE, 'K'),
        (CASTLE_LIGHT_QUEENSIDE, 'Q'),
        (CASTLE_DARK_KINGSIDE, 'k'),
        (CASTLE_DARK_QUEENSIDE, 'q'),
    ] {
        if rights & flag != 0 {
            out.push(letter);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}

#[cfg(test)]
mod tests {
    use super::generate_fen;
    use crate::game_state::board::Board;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;
    use crate::move_generation::legal_move_apply::apply_move;
    use crate::utils::fen_parser::parse_fen;

    #[test]
    fn starting_position_fen() {
        assert_eq!(
            generate_fen(&Board::starting_position(), Color::Light),
            STARTING_POSITION_FEN
        );
    }

    #[test]
    fn custom_position_fen_survives_reparse() {
        let fen = "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/2N2N2/PPPP1PPP/R1BQ1RK1 b kq - 4 6";
        let (board, turn) = parse_fen(fen).expect("custom FEN should parse");

        assert_eq!(generate_fen(&board, turn), fen);
        assert_eq!(turn, Color::Dark);
        assert_eq!(board.castling_rights, CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert!(!board.can_castle(Color::Light));
    }

    #[test]
    fn double_move_shows_skipped_square() {
        let board = Board::starting_position();
        let pawn = Piece::new(PieceKind::Pawn, Color::Light);
        let mv = Move::new(Square::new(4, 1), Square::new(4, 3), pawn, MoveKind::DoubleMove);
        let next = apply_move(&board, &mv).expect("move should apply");

        assert_eq!(
            generate_fen(&next, Color::Dark),
            "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
        );
    }
}
