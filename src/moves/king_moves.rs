//! King step table. Castling is generated separately.

use crate::game_state::chess_types::Square;
use crate::moves::knight_moves::generate_step_table;

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_ATTACKS: [u64; 64] = generate_step_table(&KING_OFFSETS);

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index()]
}
