//! Structured position input and its validation errors.
//!
//! A `PositionDescription` is what outer layers (FEN, tests, GUIs) hand the
//! engine. `GameState::from_description` rejects anything that would leave
//! the engine with an undefined position.

use thiserror::Error;

use crate::game_state::chess_types::*;

/// Every way a position description can be malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("missing {0} field")]
    MissingField(&'static str),
    #[error("position description has extra trailing fields")]
    ExtraFields,
    #[error("invalid board layout: {0}")]
    InvalidBoard(String),
    #[error("invalid side-to-move token '{0}'")]
    InvalidSideToMove(String),
    #[error("invalid castling rights token '{0}'")]
    InvalidCastling(String),
    #[error("invalid square token '{0}'")]
    InvalidSquare(String),
    #[error("invalid {field}: '{value}'")]
    InvalidCounter { field: &'static str, value: String },
    #[error("square index {0} is off the board")]
    SquareOutOfRange(u8),
    #[error("square {0} holds more than one piece")]
    SquareOccupiedTwice(Square),
    #[error("pawn on square {0} sits on a back rank")]
    PawnOnBackRank(Square),
    #[error("{color:?} has {count} kings, expected exactly one")]
    KingCount { color: Color, count: u32 },
    #[error("en-passant square {0} is not on the rank behind a double-pushed pawn")]
    InvalidEnPassant(Square),
    #[error("castling right {0:#06b} has no king and rook on their home squares")]
    InconsistentCastling(CastlingRights),
    #[error("{0:?} king is in check but it is not {0:?} to move")]
    WaitingKingInCheck(Color),
}

/// Piece placement plus the five state fields of a chess position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionDescription {
    pub placement: Vec<(Square, Piece)>,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_square: Option<Square>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

impl Default for PositionDescription {
    fn default() -> Self {
        Self {
            placement: Vec::new(),
            side_to_move: Color::Light,
            castling_rights: 0,
            en_passant_square: None,
            halfmove_clock: 0,
            fullmove_number: 1,
        }
    }
}

impl PositionDescription {
    pub fn with_piece(mut self, square: Square, piece: Piece) -> Self {
        self.placement.push((square, piece));
        self
    }
}
