//! King attack bitboards.
//!
//! Computed once per square by shifting a single bit in all eight directions
//! and masking off the files a shift would wrap onto.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bit_utils::{NOT_FILE_A, NOT_FILE_H};

#[inline]
pub const fn king_attacks_from(square: Square) -> Bitboard {
    let piece = 1u64 << square;

    (piece << 8)
        | (piece >> 8)
        | (((piece << 9) | (piece << 1) | (piece >> 7)) & NOT_FILE_A)
        | (((piece << 7) | (piece >> 1) | (piece >> 9)) & NOT_FILE_H)
}

pub const fn generate_king_attacks() -> [Bitboard; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        table[sq] = king_attacks_from(sq as Square);
        sq += 1;
    }

    table
}
