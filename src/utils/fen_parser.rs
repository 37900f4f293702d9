//! FEN-to-GameState parser.
//!
//! Splits a Forsyth-Edwards Notation string into a `PositionDescription` and
//! hands it to `GameState::from_description` for validation.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::game_state::position_description::{PositionDescription, PositionError};
use crate::utils::algebraic::algebraic_to_square;

pub fn parse_fen(fen: &str) -> Result<GameState, PositionError> {
    GameState::from_description(&parse_fen_description(fen)?)
}

pub fn parse_fen_description(fen: &str) -> Result<PositionDescription, PositionError> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(PositionError::MissingField("board layout"))?;
    let side_part = parts.next().ok_or(PositionError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(PositionError::MissingField("castling rights"))?;
    let en_passant_part = parts.next().ok_or(PositionError::MissingField("en-passant square"))?;
    let halfmove_part = parts.next().ok_or(PositionError::MissingField("halfmove clock"))?;
    let fullmove_part = parts.next().ok_or(PositionError::MissingField("fullmove number"))?;

    if parts.next().is_some() {
        return Err(PositionError::ExtraFields);
    }

    Ok(PositionDescription {
        placement: parse_board(board_part)?,
        side_to_move: parse_side_to_move(side_part)?,
        castling_rights: parse_castling_rights(castling_part)?,
        en_passant_square: parse_en_passant_square(en_passant_part)?,
        halfmove_clock: parse_counter("halfmove clock", halfmove_part)?,
        fullmove_number: parse_counter("fullmove number", fullmove_part)?,
    })
}

fn parse_board(board_part: &str) -> Result<Vec<(Square, Piece)>, PositionError> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(PositionError::InvalidBoard(format!(
            "expected 8 ranks, found {}",
            ranks.len()
        )));
    }

    let mut placement = Vec::with_capacity(32);
    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let board_rank = 7 - fen_rank_idx;
        let mut file = 0usize;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(PositionError::InvalidBoard(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                file += empty_count as usize;
                continue;
            }

            let piece = Piece::from_fen_char(ch).ok_or_else(|| {
                PositionError::InvalidBoard(format!("invalid piece character '{ch}'"))
            })?;

            if file >= 8 {
                return Err(PositionError::InvalidBoard(format!(
                    "rank {} has too many files",
                    board_rank + 1
                )));
            }

            placement.push(((board_rank * 8 + file) as Square, piece));
            file += 1;
        }

        if file != 8 {
            return Err(PositionError::InvalidBoard(format!(
                "rank {} does not sum to 8 files",
                board_rank + 1
            )));
        }
    }

    Ok(placement)
}

fn parse_side_to_move(side_part: &str) -> Result<Color, PositionError> {
    match side_part {
        "w" => Ok(Color::Light),
        "b" => Ok(Color::Dark),
        _ => Err(PositionError::InvalidSideToMove(side_part.to_owned())),
    }
}

fn parse_castling_rights(castling_part: &str) -> Result<CastlingRights, PositionError> {
    if castling_part == "-" {
        return Ok(0);
    }

    let mut rights: CastlingRights = 0;
    for ch in castling_part.chars() {
        let right = match ch {
            'K' => CASTLE_LIGHT_KINGSIDE,
            'Q' => CASTLE_LIGHT_QUEENSIDE,
            'k' => CASTLE_DARK_KINGSIDE,
            'q' => CASTLE_DARK_QUEENSIDE,
            _ => return Err(PositionError::InvalidCastling(castling_part.to_owned())),
        };
        if rights & right != 0 {
            return Err(PositionError::InvalidCastling(castling_part.to_owned()));
        }
        rights |= right;
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> Result<Option<Square>, PositionError> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    algebraic_to_square(en_passant_part).map(Some)
}

fn parse_counter(field: &'static str, value: &str) -> Result<u16, PositionError> {
    value.parse::<u16>().map_err(|_| PositionError::InvalidCounter {
        field,
        value: value.to_owned(),
    })
}
