//! Square conversions for long algebraic coordinates (e.g. `e4`).

use crate::game_state::chess_types::Square;
use crate::game_state::position_description::PositionError;

/// Convert long algebraic notation (for example: "e4") to a square index.
pub fn algebraic_to_square(square: &str) -> Result<Square, PositionError> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(PositionError::InvalidSquare(square.to_owned()));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return Err(PositionError::InvalidSquare(square.to_owned()));
    }

    Ok((rank - b'1') * 8 + (file - b'a'))
}

/// Convert a square index (`0..=63`) to long algebraic notation.
pub fn square_name(square: Square) -> String {
    debug_assert!(square < 64, "square index {square} is off the board");
    let file_char = char::from(b'a' + square % 8);
    let rank_char = char::from(b'1' + square / 8);
    format!("{file_char}{rank_char}")
}
