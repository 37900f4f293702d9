//! Bishop rays traced square by square, used to fill and check the magic
//! tables.

use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::rook_moves::trace_ray;

const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];

pub fn bishop_attacks_slow(square: Square, occupancy: Bitboard) -> Bitboard {
    BISHOP_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

/// Diagonal squares that can block a bishop, board rim excluded.
pub fn bishop_relevant_mask(square: Square) -> Bitboard {
    let mut mask = 0u64;

    for &(df, dr) in &BISHOP_DIRECTIONS {
        let mut file = (square % 8) as i32 + df;
        let mut rank = (square / 8) as i32 + dr;
        while (1..7).contains(&file) && (1..7).contains(&rank) {
            mask |= 1u64 << (rank * 8 + file);
            file += df;
            rank += dr;
        }
    }

    mask
}
