use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::moves::bit_utils::{NOT_FILE_A, NOT_FILE_H};

/// Diagonal capture targets of a `color` pawn on `square` (pushes excluded).
#[inline]
pub const fn pawn_attacks_from(color: Color, square: Square) -> Bitboard {
    let piece = 1u64 << square;

    match color {
        Color::Light => ((piece << 9) & NOT_FILE_A) | ((piece << 7) & NOT_FILE_H),
        Color::Dark => ((piece >> 7) & NOT_FILE_A) | ((piece >> 9) & NOT_FILE_H),
    }
}

pub const fn generate_pawn_attacks() -> [[Bitboard; 64]; 2] {
    let mut table = [[0u64; 64]; 2];
    let mut sq = 0usize;

    while sq < 64 {
        table[Color::Light.index()][sq] = pawn_attacks_from(Color::Light, sq as Square);
        table[Color::Dark.index()][sq] = pawn_attacks_from(Color::Dark, sq as Square);
        sq += 1;
    }

    table
}
