//! Mailbox board: 64 optional piece slots plus castling, en-passant and clock state.
//!
//! A `Board` is a plain value. Move application always works on a copy, so a
//! snapshot held by the game history is never touched again.

use crate::game_state::chess_rules::BACK_RANK;
use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
    pub castling_rights: CastlingRights,
    pub en_passant: Option<EnPassant>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            castling_rights: 0,
            en_passant: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl Board {
    /// Board with no pieces and no rights.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard 32-piece setup with full castling rights.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for (file, kind) in BACK_RANK.iter().copied().enumerate() {
            let file = file as u8;
            board.set(Square::new(file, 0), Some(Piece::new(kind, Color::Light)));
            board.set(Square::new(file, 1), Some(Piece::new(PieceKind::Pawn, Color::Light)));
            board.set(Square::new(file, 6), Some(Piece::new(PieceKind::Pawn, Color::Dark)));
            board.set(Square::new(file, 7), Some(Piece::new(kind, Color::Dark)));
        }
        board.castling_rights = CASTLE_ALL;
        board
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    #[inline]
    pub fn set(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
    }

    #[inline]
    pub fn is_empty(&self, square: Square) -> bool {
        self.squares[square.index()].is_none()
    }

    /// Deep copy used before applying or probing a move.
    #[inline]
    pub fn clone_snapshot(&self) -> Board {
        self.clone()
    }

    /// All occupied squares with their pieces, a1 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| self.get(square).map(|piece| (square, piece)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces().filter(move |(_, piece)| piece.color == color)
    }

    /// Bitmask of occupied squares.
    pub fn occupancy(&self) -> u64 {
        self.pieces().fold(0u64, |acc, (square, _)| acc | square.bit())
    }

    pub fn occupancy_of(&self, color: Color) -> u64 {
        self.pieces_of(color)
            .fold(0u64, |acc, (square, _)| acc | square.bit())
    }

    /// Scans the board; there is no cached king square.
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|(_, piece)| piece.kind == PieceKind::King && piece.color == color)
            .map(|(square, _)| square)
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        (self.castling_rights & right) != 0
    }

    /// True while `color` keeps at least one castling side.
    #[inline]
    pub fn can_castle(&self, color: Color) -> bool {
        self.has_castling_right(castling_flags_for(color))
    }

    /// Compact per-square encoding (0 = empty, 1..=12 = piece) for cache keys.
    pub fn encode_squares(&self) -> [u8; 64] {
        let mut cells = [0u8; 64];
        for (square, piece) in self.pieces() {
            cells[square.index()] = 1 + (piece.color.index() * 6 + piece.kind.index()) as u8;
        }
        cells
    }
}
