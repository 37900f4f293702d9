//! Core board state representation.
//!
//! `GameState` is a plain value: cloning it is the only way to explore a
//! hypothetical move, and the move applier is the only code that mutates
//! the bitboards after construction.

use crate::game_state::chess_rules::CASTLING_LANES;
use crate::game_state::chess_types::*;
use crate::game_state::position_description::{PositionDescription, PositionError};
use crate::moves::bishop_moves::bishop_attacks_slow;
use crate::moves::bit_utils::{get_bit, lsb_index, square_mask};
use crate::moves::king_moves::king_attacks_from;
use crate::moves::knight_moves::knight_attacks_from;
use crate::moves::pawn_moves::pawn_attacks_from;
use crate::moves::rook_moves::rook_attacks_slow;
use crate::utils::fen_parser::parse_fen;

const START_PIECES: [[Bitboard; 6]; 2] = [
    [
        0x0000_0000_0000_FF00,
        0x0000_0000_0000_0042,
        0x0000_0000_0000_0024,
        0x0000_0000_0000_0081,
        0x0000_0000_0000_0008,
        0x0000_0000_0000_0010,
    ],
    [
        0x00FF_0000_0000_0000,
        0x4200_0000_0000_0000,
        0x2400_0000_0000_0000,
        0x8100_0000_0000_0000,
        0x0800_0000_0000_0000,
        0x1000_0000_0000_0000,
    ],
];

/// Complete chess position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    // [color][piece_kind]
    pub(crate) pieces: [[Bitboard; 6]; 2],

    // Occupancy caches, recomputed from `pieces` after every change.
    pub(crate) occupancy_by_color: [Bitboard; 2],
    pub(crate) occupancy_all: Bitboard,

    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_square: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial position.
    pub fn new_game() -> Self {
        let mut state = Self {
            pieces: START_PIECES,
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: Color::Light,
            castling_rights: CASTLE_ALL,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        };
        state.recalc_occupancy();
        state
    }

    #[inline]
    pub fn from_fen(fen: &str) -> Result<Self, PositionError> {
        parse_fen(fen)
    }

    /// Validates a structured description and builds the position from it.
    pub fn from_description(description: &PositionDescription) -> Result<Self, PositionError> {
        let mut pieces = [[0u64; 6]; 2];
        let mut occupied = 0u64;

        for &(square, piece) in &description.placement {
            if square > 63 {
                return Err(PositionError::SquareOutOfRange(square));
            }
            if get_bit(occupied, square) {
                return Err(PositionError::SquareOccupiedTwice(square));
            }
            if piece.kind == PieceKind::Pawn && (square < 8 || square > 55) {
                return Err(PositionError::PawnOnBackRank(square));
            }
            occupied |= square_mask(square);
            pieces[piece.color.index()][piece.kind.index()] |= square_mask(square);
        }

        for color in Color::ALL {
            let count = pieces[color.index()][PieceKind::King.index()].count_ones();
            if count != 1 {
                return Err(PositionError::KingCount { color, count });
            }
        }

        if let Some(square) = description.en_passant_square {
            if square > 63 {
                return Err(PositionError::SquareOutOfRange(square));
            }
            // The target sits behind the pawn that just moved, so it is on
            // rank 6 when light is to move and on rank 3 when dark is.
            let expected_rank = match description.side_to_move {
                Color::Light => 5,
                Color::Dark => 2,
            };
            if square / 8 != expected_rank || get_bit(occupied, square) {
                return Err(PositionError::InvalidEnPassant(square));
            }

            // The pushed pawn stands one rank past the target and its start
            // square one rank before it is empty again.
            let pusher = description.side_to_move.opposite();
            let (pawn_square, start_square) = match pusher {
                Color::Light => (square + 8, square - 8),
                Color::Dark => (square - 8, square + 8),
            };
            let pushed_pawn = pieces[pusher.index()][PieceKind::Pawn.index()];
            if !get_bit(pushed_pawn, pawn_square) || get_bit(occupied, start_square) {
                return Err(PositionError::InvalidEnPassant(square));
            }
        }

        for lane in CASTLING_LANES {
            if description.castling_rights & lane.right == 0 {
                continue;
            }
            let side = lane.color.index();
            let king_home = get_bit(pieces[side][PieceKind::King.index()], lane.king_from);
            let rook_home = get_bit(pieces[side][PieceKind::Rook.index()], lane.rook_from);
            if !king_home || !rook_home {
                return Err(PositionError::InconsistentCastling(lane.right));
            }
        }
        if description.castling_rights & !CASTLE_ALL != 0 {
            return Err(PositionError::InvalidCastling(format!(
                "{:#06b}",
                description.castling_rights
            )));
        }

        if description.fullmove_number == 0 {
            return Err(PositionError::InvalidCounter {
                field: "fullmove number",
                value: "0".to_owned(),
            });
        }

        let waiting = description.side_to_move.opposite();
        let waiting_king = pieces[waiting.index()][PieceKind::King.index()];
        if let Some(king_square) = lsb_index(waiting_king) {
            if attacked_by(&pieces, occupied, king_square, description.side_to_move) {
                return Err(PositionError::WaitingKingInCheck(waiting));
            }
        }

        let mut state = Self {
            pieces,
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
            side_to_move: description.side_to_move,
            castling_rights: description.castling_rights,
            en_passant_square: description.en_passant_square,
            halfmove_clock: description.halfmove_clock,
            fullmove_number: description.fullmove_number,
        };
        state.recalc_occupancy();
        Ok(state)
    }

    /// Inverse of `from_description`; placement is listed a1 to h8.
    pub fn to_description(&self) -> PositionDescription {
        let placement = (0..64u8)
            .filter_map(|square| self.piece_on(square).map(|piece| (square, piece)))
            .collect();

        PositionDescription {
            placement,
            side_to_move: self.side_to_move,
            castling_rights: self.castling_rights,
            en_passant_square: self.en_passant_square,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
    }

    #[inline]
    pub fn pieces(&self, color: Color, kind: PieceKind) -> Bitboard {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy_all(&self) -> Bitboard {
        self.occupancy_all
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn has_castling_right(&self, right: CastlingRights) -> bool {
        self.castling_rights & right != 0
    }

    #[inline]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.en_passant_square
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    pub fn piece_on_for_color(&self, color: Color, square: Square) -> Option<PieceKind> {
        let mask = square_mask(square);
        PieceKind::ALL
            .into_iter()
            .find(|kind| self.pieces[color.index()][kind.index()] & mask != 0)
    }

    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        if !get_bit(self.occupancy_all, square) {
            return None;
        }
        Color::ALL.into_iter().find_map(|color| {
            self.piece_on_for_color(color, square)
                .map(|kind| Piece::new(color, kind))
        })
    }

    /// Checks the bitboard invariants: per-color piece sets are disjoint,
    /// caches equal the unions, and the two colors never share a square.
    pub fn is_consistent(&self) -> bool {
        let mut union = [0u64; 2];
        for color in Color::ALL {
            for kind in PieceKind::ALL {
                let bb = self.pieces[color.index()][kind.index()];
                if union[color.index()] & bb != 0 {
                    return false;
                }
                union[color.index()] |= bb;
            }
        }

        union == self.occupancy_by_color
            && union[0] & union[1] == 0
            && self.occupancy_all == union[0] | union[1]
    }

    pub(crate) fn recalc_occupancy(&mut self) {
        for color in Color::ALL {
            self.occupancy_by_color[color.index()] = self.pieces[color.index()]
                .iter()
                .fold(0u64, |acc, bb| acc | bb);
        }
        self.occupancy_all = self.occupancy_by_color[Color::Light.index()]
            | self.occupancy_by_color[Color::Dark.index()];
    }
}

/// Attack test for ingestion, before any `AttackTables` exist.
fn attacked_by(pieces: &[[Bitboard; 6]; 2], occupied: Bitboard, square: Square, attacker: Color) -> bool {
    let by = &pieces[attacker.index()];
    let queens = by[PieceKind::Queen.index()];

    pawn_attacks_from(attacker.opposite(), square) & by[PieceKind::Pawn.index()] != 0
        || knight_attacks_from(square) & by[PieceKind::Knight.index()] != 0
        || king_attacks_from(square) & by[PieceKind::King.index()] != 0
        || bishop_attacks_slow(square, occupied) & (by[PieceKind::Bishop.index()] | queens) != 0
        || rook_attacks_slow(square, occupied) & (by[PieceKind::Rook.index()] | queens) != 0
}
