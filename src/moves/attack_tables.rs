//! Square-indexed attack lookups for every piece type.
//!
//! `AttackTables` is built once by whoever owns engine initialization and then
//! only read. Leaper tables are straight arrays; slider tables are indexed by
//! a per-square magic multiply over the relevant blockers.

use tracing::debug;

use crate::game_state::chess_types::{Bitboard, Color, Square};
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::bishop_moves::{bishop_attacks_slow, bishop_relevant_mask};
use crate::moves::king_moves::generate_king_attacks;
use crate::moves::knight_moves::generate_knight_attacks;
use crate::moves::magic_numbers::{BISHOP_MAGICS, ROOK_MAGICS};
use crate::moves::pawn_moves::generate_pawn_attacks;
use crate::moves::rook_moves::{rook_attacks_slow, rook_relevant_mask};

/// Sliding piece families that own a magic table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SliderKind {
    Bishop,
    Rook,
}

impl SliderKind {
    #[inline]
    pub fn relevant_mask(self, square: Square) -> Bitboard {
        match self {
            SliderKind::Bishop => bishop_relevant_mask(square),
            SliderKind::Rook => rook_relevant_mask(square),
        }
    }

    #[inline]
    pub fn attacks_slow(self, square: Square, occupancy: Bitboard) -> Bitboard {
        match self {
            SliderKind::Bishop => bishop_attacks_slow(square, occupancy),
            SliderKind::Rook => rook_attacks_slow(square, occupancy),
        }
    }

    #[inline]
    pub fn embedded_magic(self, square: Square) -> u64 {
        match self {
            SliderKind::Bishop => BISHOP_MAGICS[square as usize],
            SliderKind::Rook => ROOK_MAGICS[square as usize],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SliderKind::Bishop => "bishop",
            SliderKind::Rook => "rook",
        }
    }
}

/// Every subset of `mask`, starting with the empty set (carry-rippler walk).
pub fn occupancy_subsets(mask: Bitboard) -> impl Iterator<Item = Bitboard> {
    let mut subset = 0u64;
    let mut done = false;
    std::iter::from_fn(move || {
        if done {
            return None;
        }
        let current = subset;
        subset = subset.wrapping_sub(mask) & mask;
        done = subset == 0;
        Some(current)
    })
}

/// Fills a table for `square` with `magic`, or returns `None` if two subsets
/// with different attack sets land on the same slot.
pub fn fill_magic_table(slider: SliderKind, square: Square, magic: u64) -> Option<Box<[Bitboard]>> {
    let mask = slider.relevant_mask(square);
    let bits = mask.count_ones();
    let shift = 64 - bits;
    // A slider always attacks at least one square, so 0 marks an unused slot.
    let mut table = vec![0u64; 1usize << bits];

    for subset in occupancy_subsets(mask) {
        let index = (subset.wrapping_mul(magic) >> shift) as usize;
        let attacks = slider.attacks_slow(square, subset);
        match table[index] {
            0 => table[index] = attacks,
            existing if existing == attacks => {}
            _ => return None,
        }
    }

    Some(table.into_boxed_slice())
}

#[derive(Debug, Clone)]
struct MagicEntry {
    mask: Bitboard,
    magic: u64,
    shift: u32,
    table: Box<[Bitboard]>,
}

impl MagicEntry {
    fn build(slider: SliderKind, square: Square) -> MoveGenResult<Self> {
        let mask = slider.relevant_mask(square);
        let magic = slider.embedded_magic(square);
        let table = fill_magic_table(slider, square, magic).ok_or(
            MoveGenerationError::InvalidMagic {
                slider: slider.name(),
                square,
            },
        )?;

        Ok(Self {
            mask,
            magic,
            shift: 64 - mask.count_ones(),
            table,
        })
    }

    #[inline]
    fn lookup(&self, occupancy: Bitboard) -> Bitboard {
        let index = ((occupancy & self.mask).wrapping_mul(self.magic) >> self.shift) as usize;
        self.table[index]
    }
}

/// Immutable attack lookup tables shared by generation and check detection.
#[derive(Debug, Clone)]
pub struct AttackTables {
    pawn: [[Bitboard; 64]; 2],
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    bishop: Vec<MagicEntry>,
    rook: Vec<MagicEntry>,
}

impl AttackTables {
    /// Builds every table and verifies each embedded magic constant.
    pub fn new() -> MoveGenResult<Self> {
        let bishop = (0..64u8)
            .map(|sq| MagicEntry::build(SliderKind::Bishop, sq))
            .collect::<MoveGenResult<Vec<_>>>()?;
        let rook = (0..64u8)
            .map(|sq| MagicEntry::build(SliderKind::Rook, sq))
            .collect::<MoveGenResult<Vec<_>>>()?;

        debug!(
            bishop_slots = bishop.iter().map(|e| e.table.len()).sum::<usize>(),
            rook_slots = rook.iter().map(|e| e.table.len()).sum::<usize>(),
            "built attack tables"
        );

        Ok(Self {
            pawn: generate_pawn_attacks(),
            knight: generate_knight_attacks(),
            king: generate_king_attacks(),
            bishop,
            rook,
        })
    }

    #[inline]
    pub fn pawn_attacks(&self, color: Color, square: Square) -> Bitboard {
        self.pawn[color.index()][square as usize]
    }

    #[inline]
    pub fn knight_attacks(&self, square: Square) -> Bitboard {
        self.knight[square as usize]
    }

    #[inline]
    pub fn king_attacks(&self, square: Square) -> Bitboard {
        self.king[square as usize]
    }

    #[inline]
    pub fn bishop_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop[square as usize].lookup(occupancy)
    }

    #[inline]
    pub fn rook_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.rook[square as usize].lookup(occupancy)
    }

    #[inline]
    pub fn queen_attacks(&self, square: Square, occupancy: Bitboard) -> Bitboard {
        self.bishop_attacks(square, occupancy) | self.rook_attacks(square, occupancy)
    }

    #[inline]
    pub fn slider_attacks(&self, slider: SliderKind, square: Square, occupancy: Bitboard) -> Bitboard {
        match slider {
            SliderKind::Bishop => self.bishop_attacks(square, occupancy),
            SliderKind::Rook => self.rook_attacks(square, occupancy),
        }
    }

    /// Number of table slots for `slider` on `square` (`2^relevant bits`).
    pub fn slot_count(&self, slider: SliderKind, square: Square) -> usize {
        match slider {
            SliderKind::Bishop => self.bishop[square as usize].table.len(),
            SliderKind::Rook => self.rook[square as usize].table.len(),
        }
    }
}
