use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bit_utils::{NOT_FILE_A, NOT_FILE_AB, NOT_FILE_GH, NOT_FILE_H};

#[inline]
pub const fn knight_attacks_from(square: Square) -> Bitboard {
    let piece = 1u64 << square;

    (((piece << 17) | (piece >> 15)) & NOT_FILE_A)
        | (((piece << 10) | (piece >> 6)) & NOT_FILE_AB)
        | (((piece << 15) | (piece >> 17)) & NOT_FILE_H)
        | (((piece << 6) | (piece >> 10)) & NOT_FILE_GH)
}

pub const fn generate_knight_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = knight_attacks_from(sq as Square);
        sq += 1;
    }

    table
}

#[cfg(test)]
mod tests {
    use super::{generate_knight_attacks, knight_attacks_from};

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = 27u8;
        assert_eq!(knight_attacks_from(d4).count_ones(), 8);
    }

    #[test]
    fn knight_on_g1_sees_e2_f3_h3() {
        let g1 = 6u8;
        let expected = (1u64 << 12) | (1u64 << 21) | (1u64 << 23);
        assert_eq!(knight_attacks_from(g1), expected);
    }

    #[test]
    fn corner_knights_have_two_targets() {
        let table = generate_knight_attacks();
        for corner in [0usize, 7, 56, 63] {
            assert_eq!(table[corner].count_ones(), 2, "corner {corner}");
        }
    }
}
