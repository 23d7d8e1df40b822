//! Canonical chess-rule constants.
//!
//! Starting layout, castling geometry, and pawn rank landmarks used by the
//! board, the move generators, and the notation helpers.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Back-rank layout from the a-file to the h-file.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

pub const PROMOTION_CHOICES: [PieceKind; 4] = [
    PieceKind::Queen,
    PieceKind::Rook,
    PieceKind::Bishop,
    PieceKind::Knight,
];

pub const KING_HOME_FILE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CastleSide {
    Kingside,
    Queenside,
}

/// Geometry of one castling option for one color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlePath {
    pub side: CastleSide,
    pub right: CastlingRights,
    pub king_from: Square,
    pub king_to: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares between king and rook that must be empty.
    pub must_be_empty: &'static [u8],
    /// Squares the king stands on, crosses, or lands on; none may be attacked.
    pub king_walk: [Square; 3],
}

const LIGHT_KINGSIDE_EMPTY: [u8; 2] = [5, 6];
const LIGHT_QUEENSIDE_EMPTY: [u8; 3] = [1, 2, 3];
const DARK_KINGSIDE_EMPTY: [u8; 2] = [61, 62];
const DARK_QUEENSIDE_EMPTY: [u8; 3] = [57, 58, 59];

pub const fn castle_paths(color: Color) -> [CastlePath; 2] {
    let rank = color.home_rank();
    let (kingside_right, queenside_right, kingside_empty, queenside_empty): (
        CastlingRights,
        CastlingRights,
        &'static [u8],
        &'static [u8],
    ) = match color {
        Color::Light => (
            CASTLE_LIGHT_KINGSIDE,
            CASTLE_LIGHT_QUEENSIDE,
            &LIGHT_KINGSIDE_EMPTY,
            &LIGHT_QUEENSIDE_EMPTY,
        ),
        Color::Dark => (
            CASTLE_DARK_KINGSIDE,
            CASTLE_DARK_QUEENSIDE,
            &DARK_KINGSIDE_EMPTY,
            &DARK_QUEENSIDE_EMPTY,
        ),
    };

    [
        CastlePath {
            side: CastleSide::Kingside,
            right: kingside_right,
            king_from: Square::new(KING_HOME_FILE, rank),
            king_to: Square::new(6, rank),
            rook_from: Square::new(7, rank),
            rook_to: Square::new(5, rank),
            must_be_empty: kingside_empty,
            king_walk: [
                Square::new(KING_HOME_FILE, rank),
                Square::new(5, rank),
                Square::new(6, rank),
            ],
        },
        CastlePath {
            side: CastleSide::Queenside,
            right: queenside_right,
            king_from: Square::new(KING_HOME_FILE, rank),
            king_to: Square::new(2, rank),
            rook_from: Square::new(0, rank),
            rook_to: Square::new(3, rank),
            must_be_empty: queenside_empty,
            king_walk: [
                Square::new(KING_HOME_FILE, rank),
                Square::new(3, rank),
                Square::new(2, rank),
            ],
        },
    ]
}

/// Castling option whose king destination is `king_to`, if any.
pub fn castle_path_to(color: Color, king_to: Square) -> Option<CastlePath> {
    castle_paths(color)
        .into_iter()
        .find(|path| path.king_to == king_to)
}

/// Castling right lost when a piece leaves or lands on `square`.
pub const fn castling_right_of_corner(square: Square) -> CastlingRights {
    match square.index() {
        0 => CASTLE_LIGHT_QUEENSIDE,
        7 => CASTLE_LIGHT_KINGSIDE,
        56 => CASTLE_DARK_QUEENSIDE,
        63 => CASTLE_DARK_KINGSIDE,
        _ => 0,
    }
}

#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

/// Rank a pawn must stand on to capture en passant.
#[inline]
pub const fn en_passant_rank(color: Color) -> u8 {
    match color {
        Color::Light => 4,
        Color::Dark => 3,
    }
}

#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    color.opposite().home_rank()
}
