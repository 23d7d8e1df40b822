use crate::game_state::chess_types::{Color, Square};

pub const LIGHT_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(1);
pub const DARK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(-1);

/// Diagonal squares a pawn attacks; never its forward squares.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::Light => LIGHT_PAWN_ATTACKS[square.index()],
        Color::Dark => DARK_PAWN_ATTACKS[square.index()],
    }
}

/// Square directly in front of a pawn.
#[inline]
pub fn pawn_push_square(color: Color, square: Square) -> Option<Square> {
    square.offset(0, color.forward())
}

const fn generate_pawn_attacks(rank_step: i32) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let target_rank = rank + rank_step;
        let mut attacks = 0u64;

        if target_rank >= 0 && target_rank < 8 {
            if file > 0 {
                attacks |= 1u64 << (target_rank * 8 + file - 1);
            }
            if file < 7 {
                attacks |= 1u64 << (target_rank * 8 + file + 1);
            }
        }

        table[sq] = attacks;
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{pawn_attacks, pawn_push_square, DARK_PAWN_ATTACKS, LIGHT_PAWN_ATTACKS};
    use crate::game_state::chess_types::{Color, Square};

    #[test]
    fn light_pawn_attacks_from_e2() {
        let e2 = Square::new(4, 1);
        let expected = (1u64 << 19) | (1u64 << 21);
        assert_eq!(LIGHT_PAWN_ATTACKS[e2.index()], expected);
        assert_eq!(pawn_attacks(Color::Light, e2), expected);
    }

    #[test]
    fn dark_pawn_attacks_from_e7() {
        let e7 = Square::new(4, 6);
        let expected = (1u64 << 43) | (1u64 << 45);
        assert_eq!(DARK_PAWN_ATTACKS[e7.index()], expected);
        assert_eq!(pawn_attacks(Color::Dark, e7), expected);
    }

    #[test]
    fn edge_pawn_attacks_one_square() {
        assert_eq!(pawn_attacks(Color::Light, Square::new(0, 1)).count_ones(), 1);
        assert_eq!(pawn_attacks(Color::Dark, Square::new(7, 6)).count_ones(), 1);
    }

    #[test]
    fn push_square_follows_color_direction() {
        assert_eq!(
            pawn_push_square(Color::Light, Square::new(4, 1)),
            Some(Square::new(4, 2))
        );
        assert_eq!(
            pawn_push_square(Color::Dark, Square::new(4, 6)),
            Some(Square::new(4, 5))
        );
        assert_eq!(pawn_push_square(Color::Light, Square::new(4, 7)), None);
    }
}
