//! Canonical chess-rule constants.
//!
//! Static literals for the standard start position and the fixed squares the
//! castling rules refer to.

use crate::game_state::chess_types::*;

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

pub const A1: Square = 0;
pub const C1: Square = 2;
pub const D1: Square = 3;
pub const E1: Square = 4;
pub const F1: Square = 5;
pub const G1: Square = 6;
pub const H1: Square = 7;
pub const A8: Square = 56;
pub const C8: Square = 58;
pub const D8: Square = 59;
pub const E8: Square = 60;
pub const F8: Square = 61;
pub const G8: Square = 62;
pub const H8: Square = 63;

/// Geometry of one castling option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastlingLane {
    pub right: CastlingRights,
    pub color: Color,
    pub king_from: Square,
    pub king_to: Square,
    /// Square the king crosses on its way to `king_to`.
    pub king_transit: Square,
    pub rook_from: Square,
    pub rook_to: Square,
    /// Squares strictly between king and rook.
    pub must_be_empty: Bitboard,
}

pub const LIGHT_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_LIGHT_KINGSIDE,
    color: Color::Light,
    king_from: E1,
    king_to: G1,
    king_transit: F1,
    rook_from: H1,
    rook_to: F1,
    must_be_empty: (1 << F1) | (1 << G1),
};

pub const LIGHT_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_LIGHT_QUEENSIDE,
    color: Color::Light,
    king_from: E1,
    king_to: C1,
    king_transit: D1,
    rook_from: A1,
    rook_to: D1,
    must_be_empty: (1 << 1) | (1 << C1) | (1 << D1),
};

pub const DARK_KINGSIDE: CastlingLane = CastlingLane {
    right: CASTLE_DARK_KINGSIDE,
    color: Color::Dark,
    king_from: E8,
    king_to: G8,
    king_transit: F8,
    rook_from: H8,
    rook_to: F8,
    must_be_empty: (1 << F8) | (1 << G8),
};

pub const DARK_QUEENSIDE: CastlingLane = CastlingLane {
    right: CASTLE_DARK_QUEENSIDE,
    color: Color::Dark,
    king_from: E8,
    king_to: C8,
    king_transit: D8,
    rook_from: A8,
    rook_to: D8,
    must_be_empty: (1 << 57) | (1 << C8) | (1 << D8),
};

pub const CASTLING_LANES: [CastlingLane; 4] =
    [LIGHT_KINGSIDE, LIGHT_QUEENSIDE, DARK_KINGSIDE, DARK_QUEENSIDE];

/// Castling lanes available to `color`, kingside first.
#[inline]
pub const fn castling_lanes_for(color: Color) -> [CastlingLane; 2] {
    match color {
        Color::Light => [LIGHT_KINGSIDE, LIGHT_QUEENSIDE],
        Color::Dark => [DARK_KINGSIDE, DARK_QUEENSIDE],
    }
}

/// Rank (0-based) pawns of `color` start on.
#[inline]
pub const fn pawn_start_rank(color: Color) -> u8 {
    match color {
        Color::Light => 1,
        Color::Dark => 6,
    }
}

/// Rank (0-based) on which pawns of `color` promote.
#[inline]
pub const fn promotion_rank(color: Color) -> u8 {
    match color {
        Color::Light => 7,
        Color::Dark => 0,
    }
}
