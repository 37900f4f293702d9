//! Rook rays traced square by square.
//!
//! These are the slow reference routines the magic tables are filled from;
//! move generation never calls them directly.

use crate::game_state::chess_types::{Bitboard, Square};

const ROOK_DIRECTIONS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Squares a rook on `square` attacks given blockers in `occupancy`.
/// The first blocker on each ray is included.
pub fn rook_attacks_slow(square: Square, occupancy: Bitboard) -> Bitboard {
    ROOK_DIRECTIONS
        .iter()
        .fold(0u64, |acc, &(df, dr)| acc | trace_ray(square, df, dr, occupancy))
}

/// Squares whose occupancy can change a rook's attack set: the rook's rays
/// without the origin and without the last square before each board edge.
pub fn rook_relevant_mask(square: Square) -> Bitboard {
    let file = (square % 8) as i32;
    let rank = (square / 8) as i32;
    let mut mask = 0u64;

    for r in (rank + 1)..7 {
        mask |= 1u64 << (r * 8 + file);
    }
    for r in 1..rank {
        mask |= 1u64 << (r * 8 + file);
    }
    for f in (file + 1)..7 {
        mask |= 1u64 << (rank * 8 + f);
    }
    for f in 1..file {
        mask |= 1u64 << (rank * 8 + f);
    }

    mask
}

pub(crate) fn trace_ray(square: Square, file_step: i32, rank_step: i32, occupancy: Bitboard) -> Bitboard {
    let mut file = (square % 8) as i32 + file_step;
    let mut rank = (square / 8) as i32 + rank_step;
    let mut attacks = 0u64;

    while (0..8).contains(&file) && (0..8).contains(&rank) {
        let bit = 1u64 << (rank * 8 + file);
        attacks |= bit;

        if (occupancy & bit) != 0 {
            break;
        }

        file += file_step;
        rank += rank_step;
    }

    attacks
}

#[cfg(test)]
mod tests {
    use super::{rook_attacks_slow, rook_relevant_mask};

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        let d4 = 27u8;
        assert_eq!(rook_attacks_slow(d4, 0).count_ones(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a1 = 0u8;
        let blocker_on_a4 = 1u64 << 24;
        let attacks = rook_attacks_slow(a1, blocker_on_a4);

        assert_ne!(attacks & (1u64 << 24), 0);
        assert_eq!(attacks & (1u64 << 32), 0);
    }

    #[test]
    fn relevant_mask_sizes() {
        assert_eq!(rook_relevant_mask(0).count_ones(), 12);
        assert_eq!(rook_relevant_mask(27).count_ones(), 10);
        assert_eq!(rook_relevant_mask(63).count_ones(), 12);
        assert_eq!(rook_relevant_mask(1).count_ones(), 11);
    }

    #[test]
    fn relevant_mask_excludes_edges_and_origin() {
        let a1_mask = rook_relevant_mask(0);
        assert_eq!(a1_mask & 1, 0);
        assert_eq!(a1_mask & (1u64 << 7), 0);
        assert_eq!(a1_mask & (1u64 << 56), 0);
        assert_ne!(a1_mask & (1u64 << 6), 0);
    }
}
