use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// One history entry pushed per accepted move.
///
/// Holds the board as it was before the move, so undo is a plain restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub board_before: Board,
    pub turn_before: Color,
    pub mv: Move,
    pub captured: Option<Piece>,
    /// Piece chosen for a `Promote` move once the promotion is resolved.
    pub promotion: Option<PieceKind>,
}
