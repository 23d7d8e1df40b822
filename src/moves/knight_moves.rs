//! Knight step table.

use crate::game_state::chess_types::Square;

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [u64; 64] = generate_step_table(&KNIGHT_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index()]
}

/// Builds a per-square mask of every on-board target of a fixed offset set.
pub const fn generate_step_table(offsets: &[(i32, i32)]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut attacks = 0u64;
        let mut i = 0usize;

        while i < offsets.len() {
            attacks |= set_if_valid(file + offsets[i].0, rank + offsets[i].1);
            i += 1;
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

const fn set_if_valid(file: i32, rank: i32) -> u64 {
    if file < 0 || file > 7 || rank < 0 || rank > 7 {
        return 0;
    }

    let square = (rank as usize) * 8 + (file as usize);
    1u64 << square
}

#[cfg(test)]
mod tests {
    use super::{knight_attacks, KNIGHT_ATTACKS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = Square::new(3, 3);
        assert_eq!(KNIGHT_ATTACKS[d4.index()].count_ones(), 8);
        assert_eq!(knight_attacks(d4).count_ones(), 8);
    }

    #[test]
    fn knight_attacks_from_b1_reach_a3_c3_d2() {
        let b1 = Square::new(1, 0);
        let expected = Square::new(0, 2).bit() | Square::new(2, 2).bit() | Square::new(3, 1).bit();
        assert_eq!(knight_attacks(b1), expected);
    }
}
