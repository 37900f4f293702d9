use crate::game_state::chess_types::{Bitboard, Square};
use crate::moves::bishop_moves::bishop_attacks_slow;
use crate::moves::rook_moves::rook_attacks_slow;

/// Ray-traced queen attacks: the union of the rook and bishop rays.
#[inline]
pub fn queen_attacks_slow(square: Square, occupancy: Bitboard) -> Bitboard {
    bishop_attacks_slow(square, occupancy) | rook_attacks_slow(square, occupancy)
}
