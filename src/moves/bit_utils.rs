//! Primitive single-bit operations on 64-bit square masks.

use crate::game_state::chess_types::{Bitboard, Square};

pub const FILE_A: Bitboard = 0x0101_0101_0101_0101;
pub const FILE_B: Bitboard = FILE_A << 1;
pub const FILE_G: Bitboard = FILE_A << 6;
pub const FILE_H: Bitboard = FILE_A << 7;
pub const NOT_FILE_A: Bitboard = !FILE_A;
pub const NOT_FILE_H: Bitboard = !FILE_H;
pub const NOT_FILE_AB: Bitboard = !(FILE_A | FILE_B);
pub const NOT_FILE_GH: Bitboard = !(FILE_G | FILE_H);

#[inline]
pub const fn square_mask(square: Square) -> Bitboard {
    1u64 << square
}

#[inline]
pub const fn get_bit(bitboard: Bitboard, square: Square) -> bool {
    bitboard & square_mask(square) != 0
}

#[inline]
pub const fn set_bit(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard | square_mask(square)
}

#[inline]
pub const fn clear_bit(bitboard: Bitboard, square: Square) -> Bitboard {
    bitboard & !square_mask(square)
}

/// Index of the least significant set bit, `None` for an empty board.
#[inline]
pub const fn lsb_index(bitboard: Bitboard) -> Option<Square> {
    if bitboard == 0 {
        None
    } else {
        Some(bitboard.trailing_zeros() as Square)
    }
}

/// Removes and returns the least significant set bit.
#[inline]
pub fn pop_lsb(bitboard: &mut Bitboard) -> Option<Square> {
    let square = lsb_index(*bitboard)?;
    *bitboard &= *bitboard - 1;
    Some(square)
}

/// Iterates the set squares of a bitboard from a1 towards h8.
#[derive(Debug, Clone, Copy)]
pub struct BitIter(pub Bitboard);

impl Iterator for BitIter {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        pop_lsb(&mut self.0)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for BitIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_get_clear() {
        let bb = set_bit(0, 27);
        assert!(get_bit(bb, 27));
        assert!(!get_bit(bb, 28));
        assert_eq!(clear_bit(bb, 27), 0);
        assert_eq!(clear_bit(bb, 5), bb);
    }

    #[test]
    fn pop_lsb_walks_low_to_high() {
        let mut bb = square_mask(3) | square_mask(40) | square_mask(63);
        assert_eq!(pop_lsb(&mut bb), Some(3));
        assert_eq!(pop_lsb(&mut bb), Some(40));
        assert_eq!(pop_lsb(&mut bb), Some(63));
        assert_eq!(pop_lsb(&mut bb), None);
        assert_eq!(bb, 0);
    }

    #[test]
    fn bit_iter_matches_popcount() {
        let bb = 0x8100_0000_0000_0081u64;
        let squares: Vec<Square> = BitIter(bb).collect();
        assert_eq!(squares, vec![0, 7, 56, 63]);
        assert_eq!(BitIter(bb).len(), 4);
    }

    #[test]
    fn lsb_of_empty_board_is_none() {
        assert_eq!(lsb_index(0), None);
        assert_eq!(lsb_index(1 << 9), Some(9));
    }
}
