//! Value types shared by every layer of the rules engine.
//!
//! Squares, colors, pieces, and move records are small `Copy` values so that
//! board snapshots and history entries never alias each other.

use std::fmt;

/// Side of the board. Light moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Color::Light => 0,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Rank step a pawn of this color advances by.
    #[inline]
    pub const fn forward(self) -> i8 {
        match self {
            Color::Light => 1,
            Color::Dark => -1,
        }
    }

    /// Zero-based rank of this color's back rank.
    #[inline]
    pub const fn home_rank(self) -> u8 {
        match self {
            Color::Light => 0,
            Color::Dark => 7,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Light => write!(f, "light"),
            Color::Dark => write!(f, "dark"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Conventional material value used for the captured-piece score.
    #[inline]
    pub const fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight | PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub const fn is_promotion_choice(self) -> bool {
        matches!(
            self,
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen
        )
    }

    /// Upper-case letter used by SAN (`None` for pawns).
    pub const fn san_letter(self) -> Option<char> {
        match self {
            PieceKind::Pawn => None,
            PieceKind::Knight => Some('N'),
            PieceKind::Bishop => Some('B'),
            PieceKind::Rook => Some('R'),
            PieceKind::Queen => Some('Q'),
            PieceKind::King => Some('K'),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
}

impl Piece {
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Self {
        Self { kind, color }
    }
}

/// One of the 64 board squares, stored as `rank * 8 + file` (a1 = 0, h8 = 63).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(u8);

impl Square {
    /// Panics when `file` or `rank` is outside `0..=7`.
    #[inline]
    pub const fn new(file: u8, rank: u8) -> Self {
        assert!(file < 8 && rank < 8, "square coordinates out of range");
        Self(rank * 8 + file)
    }

    #[inline]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < 64, "square index out of range");
        Self(index as u8)
    }

    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// Square reached by stepping `(file_step, rank_step)`, or `None` off the board.
    #[inline]
    pub fn offset(self, file_step: i8, rank_step: i8) -> Option<Square> {
        let file = self.file() as i8 + file_step;
        let rank = self.rank() as i8 + rank_step;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    pub fn all() -> impl Iterator<Item = Square> {
        (0u8..64).map(Square)
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            char::from(b'a' + self.file()),
            char::from(b'1' + self.rank())
        )
    }
}

/// Iterate the squares whose bits are set in `mask`, lowest index first.
pub fn mask_squares(mask: u64) -> impl Iterator<Item = Square> {
    let mut remaining = mask;
    std::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let square = Square(remaining.trailing_zeros() as u8);
        remaining &= remaining - 1;
        Some(square)
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoveKind {
    Move,
    Capture,
    DoubleMove,
    EnPassant,
    Castling,
    Promote,
}

/// A move as generated and as recorded into history.
///
/// Squares and the moving piece are held by value, so a recorded move stays
/// meaningful after the board it was generated from has changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
    pub kind: MoveKind,
}

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, kind: MoveKind) -> Self {
        Self {
            from,
            to,
            piece,
            kind,
        }
    }

    /// True when a pawn move lands on the far rank and must be promoted.
    #[inline]
    pub fn reaches_last_rank(&self) -> bool {
        self.piece.kind == PieceKind::Pawn
            && self.to.rank() == crate::game_state::chess_rules::promotion_rank(self.piece.color)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {:?} {}",
            self.from, self.piece.color, self.piece.kind, self.kind, self.to
        )
    }
}

/// Castling rights bitmask, one bit per color and side.
pub type CastlingRights = u8;

pub const CASTLE_LIGHT_KINGSIDE: CastlingRights = 1 << 0;
pub const CASTLE_LIGHT_QUEENSIDE: CastlingRights = 1 << 1;
pub const CASTLE_DARK_KINGSIDE: CastlingRights = 1 << 2;
pub const CASTLE_DARK_QUEENSIDE: CastlingRights = 1 << 3;
pub const CASTLE_ALL: CastlingRights =
    CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE;

#[inline]
pub const fn castling_flags_for(color: Color) -> CastlingRights {
    match color {
        Color::Light => CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE,
        Color::Dark => CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE,
    }
}

/// En-passant window opened by the immediately preceding double move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnPassant {
    /// Square of the pawn that may be captured.
    pub capture_square: Square,
    /// Square the pawn skipped over; the capturing pawn lands here.
    pub target_square: Square,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_coordinates_round_trip() {
        let e4 = Square::new(4, 3);
        assert_eq!(e4.index(), 28);
        assert_eq!(e4.file(), 4);
        assert_eq!(e4.rank(), 3);
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::from_index(63).to_string(), "h8");
    }

    #[test]
    fn offset_stops_at_board_edge() {
        let a1 = Square::new(0, 0);
        assert_eq!(a1.offset(-1, 0), None);
        assert_eq!(a1.offset(1, 2), Some(Square::new(1, 2)));
        assert_eq!(Square::new(7, 7).offset(0, 1), None);
    }

    #[test]
    #[should_panic(expected = "square coordinates out of range")]
    fn out_of_range_square_panics() {
        let _ = Square::new(8, 0);
    }

    #[test]
    fn mask_squares_lists_set_bits() {
        let squares: Vec<Square> = mask_squares((1 << 3) | (1 << 40)).collect();
        assert_eq!(squares, vec![Square::from_index(3), Square::from_index(40)]);
    }

    #[test]
    fn pawn_on_far_rank_needs_promotion() {
        let pawn = Piece::new(PieceKind::Pawn, Color::Dark);
        let mv = Move::new(Square::new(0, 1), Square::new(0, 0), pawn, MoveKind::Move);
        assert!(mv.reaches_last_rank());

        let light = Piece::new(PieceKind::Pawn, Color::Light);
        let mv = Move::new(Square::new(0, 5), Square::new(0, 6), light, MoveKind::Move);
        assert!(!mv.reaches_last_rank());
    }
}
