use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::push_target_moves;
use crate::moves::queen_moves::queen_attacks;

pub fn generate_queen_moves(board: &Board, piece: Piece, from: Square, out: &mut Vec<Move>) {
    push_target_moves(board, piece, from, queen_attacks(from, board.occupancy()), out);
}

#[cfg(test)]
mod tests {
    use super::generate_queen_moves;
    use crate::game_state::board::Board;
    use crate::game_state::chess_types::*;

    #[test]
    fn centralized_queen_has_twenty_seven_moves() {
        let mut board = Board::empty();
        let queen = Piece::new(PieceKind::Queen, Color::Dark);
        let d4 = Square::new(3, 3);
        board.set(d4, Some(queen));

        let mut out = Vec::new();
        generate_queen_moves(&board, queen, d4, &mut out);
        assert_eq!(out.len(), 27);
    }
}
