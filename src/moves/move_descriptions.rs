//! Packed move encoding.
//!
//! Layout of the 32-bit value:
//!
//! | bits  | field                      |
//! |-------|----------------------------|
//! | 0-5   | origin square              |
//! | 6-11  | destination square         |
//! | 12-15 | moving piece (`Piece` code)|
//! | 16-19 | `MoveClass`                |
//!
//! A move never references a position; what it affects is resolved only when
//! it is applied.

use std::fmt;

use crate::game_state::chess_types::{Piece, PieceKind, Square};
use crate::utils::algebraic::square_name;

const FROM_SHIFT: u32 = 0;
const TO_SHIFT: u32 = 6;
const PIECE_SHIFT: u32 = 12;
const CLASS_SHIFT: u32 = 16;

const SQUARE_MASK: u32 = 0x3F;
const NIBBLE_MASK: u32 = 0xF;

/// Four-bit move class. Bit 2 marks captures, bit 3 marks promotions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveClass {
    Quiet = 0,
    DoublePawnPush = 1,
    KingCastle = 2,
    QueenCastle = 3,
    Capture = 4,
    EnPassantCapture = 5,
    KnightPromotion = 8,
    BishopPromotion = 9,
    RookPromotion = 10,
    QueenPromotion = 11,
    KnightPromotionCapture = 12,
    BishopPromotionCapture = 13,
    RookPromotionCapture = 14,
    QueenPromotionCapture = 15,
}

impl MoveClass {
    pub const fn from_code(code: u8) -> Option<Self> {
        Some(match code {
            0 => MoveClass::Quiet,
            1 => MoveClass::DoublePawnPush,
            2 => MoveClass::KingCastle,
            3 => MoveClass::QueenCastle,
            4 => MoveClass::Capture,
            5 => MoveClass::EnPassantCapture,
            8 => MoveClass::KnightPromotion,
            9 => MoveClass::BishopPromotion,
            10 => MoveClass::RookPromotion,
            11 => MoveClass::QueenPromotion,
            12 => MoveClass::KnightPromotionCapture,
            13 => MoveClass::BishopPromotionCapture,
            14 => MoveClass::RookPromotionCapture,
            15 => MoveClass::QueenPromotionCapture,
            _ => return None,
        })
    }

    /// Promotion class for `kind`; kinds that cannot be promoted to give `None`.
    pub const fn promotion(kind: PieceKind, capture: bool) -> Option<Self> {
        let quiet = match kind {
            PieceKind::Knight => MoveClass::KnightPromotion,
            PieceKind::Bishop => MoveClass::BishopPromotion,
            PieceKind::Rook => MoveClass::RookPromotion,
            PieceKind::Queen => MoveClass::QueenPromotion,
            _ => return None,
        };
        if capture {
            MoveClass::from_code(quiet as u8 | 4)
        } else {
            Some(quiet)
        }
    }

    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    #[inline]
    pub const fn is_capture(self) -> bool {
        self.code() & 4 != 0
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.code() & 8 != 0
    }

    #[inline]
    pub const fn is_castle(self) -> bool {
        matches!(self, MoveClass::KingCastle | MoveClass::QueenCastle)
    }

    pub const fn promotion_kind(self) -> Option<PieceKind> {
        if !self.is_promotion() {
            return None;
        }
        match self.code() & 3 {
            0 => Some(PieceKind::Knight),
            1 => Some(PieceKind::Bishop),
            2 => Some(PieceKind::Rook),
            _ => Some(PieceKind::Queen),
        }
    }
}

/// A single packed move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u32);

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, piece: Piece, class: MoveClass) -> Self {
        debug_assert!(from < 64 && to < 64, "move squares must be on the board");
        let mut out = 0u32;
        out |= ((from as u32) & SQUARE_MASK) << FROM_SHIFT;
        out |= ((to as u32) & SQUARE_MASK) << TO_SHIFT;
        out |= (piece.code() as u32) << PIECE_SHIFT;
        out |= (class.code() as u32) << CLASS_SHIFT;
        Move(out)
    }

    /// Decodes a raw packed value, rejecting unused piece or class codes.
    pub const fn from_raw(raw: u32) -> Option<Self> {
        if raw >> 20 != 0 {
            return None;
        }
        let piece_ok = Piece::from_code(((raw >> PIECE_SHIFT) & NIBBLE_MASK) as u8).is_some();
        let class_ok = MoveClass::from_code(((raw >> CLASS_SHIFT) & NIBBLE_MASK) as u8).is_some();
        if piece_ok && class_ok {
            Some(Move(raw))
        } else {
            None
        }
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn from(self) -> Square {
        ((self.0 >> FROM_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub const fn to(self) -> Square {
        ((self.0 >> TO_SHIFT) & SQUARE_MASK) as Square
    }

    #[inline]
    pub fn piece(self) -> Piece {
        match Piece::from_code(((self.0 >> PIECE_SHIFT) & NIBBLE_MASK) as u8) {
            Some(piece) => piece,
            None => unreachable!("Move values are only built from valid piece codes"),
        }
    }

    #[inline]
    pub fn class(self) -> MoveClass {
        match MoveClass::from_code(((self.0 >> CLASS_SHIFT) & NIBBLE_MASK) as u8) {
            Some(class) => class,
            None => unreachable!("Move values are only built from valid class codes"),
        }
    }
}

/// Long algebraic form, e.g. `e2e4` or `e7e8q`.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", square_name(self.from()), square_name(self.to()))?;
        if let Some(kind) = self.class().promotion_kind() {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}
