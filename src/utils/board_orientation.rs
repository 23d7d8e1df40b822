//! Screen grid <-> square mapping for a board drawn from either side.
//!
//! Grid coordinates are `(file_index, rank_index)` with `rank_index == 0` the
//! top row on screen. Seen from Light, a8 is top-left; seen from Dark the
//! grid is turned 180 degrees and h1 is top-left.

use crate::game_state::chess_types::{Color, Square};

/// Square drawn at grid cell `(file_index, rank_index)` for viewer `pov`.
///
/// Panics if either index is outside `0..8`.
pub fn square_at(file_index: u8, rank_index: u8, pov: Color) -> Square {
    assert!(
        file_index < 8 && rank_index < 8,
        "grid coordinate out of range: ({file_index}, {rank_index})"
    );
    match pov {
        Color::Light => Square::new(file_index, 7 - rank_index),
        Color::Dark => Square::new(7 - file_index, rank_index),
    }
}

/// Inverse of [`square_at`].
pub fn grid_coord_of(square: Square, pov: Color) -> (u8, u8) {
    match pov {
        Color::Light => (square.file(), 7 - square.rank()),
        Color::Dark => (7 - square.file(), square.rank()),
    }
}

/// Checkerboard shade of `square`; a1 and h8 are dark.
#[inline]
pub fn square_color(square: Square) -> Color {
    if (square.file() + square.rank()) % 2 == 1 {
        Color::Light
    } else {
        Color::Dark
    }
}
