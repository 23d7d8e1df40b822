use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Enemy piece on `square` from the point of view of `color`.
#[inline]
pub fn enemy_piece_on(board: &Board, color: Color, square: Square) -> Option<Piece> {
    board.get(square).filter(|piece| piece.color != color)
}

/// Emits a `Move` or `Capture` for every square in `targets` not held by the mover.
///
/// `targets` is an attack mask from one of the step or ray tables.
pub fn push_target_moves(
    board: &Board,
    piece: Piece,
    from: Square,
    targets: u64,
    out: &mut Vec<Move>,
) {
    let own_occ = board.occupancy_of(piece.color);

    for to in mask_squares(targets & !own_occ) {
        let kind = if enemy_piece_on(board, piece.color, to).is_some() {
            MoveKind::Capture
        } else {
            MoveKind::Move
        };
        out.push(Move::new(from, to, piece, kind));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn own_pieces_are_skipped_and_enemies_captured() {
        let mut board = Board::empty();
        let rook = Piece::new(PieceKind::Rook, Color::Light);
        let a1 = Square::new(0, 0);
        let a2 = Square::new(0, 1);
        let b1 = Square::new(1, 0);
        board.set(a1, Some(rook));
        board.set(a2, Some(Piece::new(PieceKind::Pawn, Color::Light)));
        board.set(b1, Some(Piece::new(PieceKind::Knight, Color::Dark)));

        let mut out = Vec::new();
        push_target_moves(&board, rook, a1, a2.bit() | b1.bit(), &mut out);

        assert_eq!(out, vec![Move::new(a1, b1, rook, MoveKind::Capture)]);
    }
}
