//! Attack and check queries.
//!
//! Every query is read-only over `GameState` and answers from the same
//! `AttackTables` the generator uses, so a square is "attacked" exactly when
//! some pseudo-legal capture onto it would exist.

use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_generator::generate_legal;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerationError};
use crate::moves::attack_tables::AttackTables;
use crate::moves::bit_utils::{lsb_index, BitIter};

/// Terminal classification of a position for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Checkmate,
    Stalemate,
}

#[inline]
pub fn king_square(game_state: &GameState, color: Color) -> MoveGenResult<Square> {
    lsb_index(game_state.pieces[color.index()][PieceKind::King.index()])
        .ok_or(MoveGenerationError::MissingKing(color))
}

/// True iff any piece of `attacker_color` attacks `square`.
///
/// Places each piece type on `square` in turn and intersects its attack set
/// with the attacker's pieces of that type. Pawns use the defender's pawn
/// table because pawn attacks are mirror images across colors.
pub fn is_square_attacked(
    tables: &AttackTables,
    game_state: &GameState,
    square: Square,
    attacker_color: Color,
) -> bool {
    let attacker = &game_state.pieces[attacker_color.index()];
    let occupancy = game_state.occupancy_all;

    if tables.pawn_attacks(attacker_color.opposite(), square) & attacker[PieceKind::Pawn.index()] != 0 {
        return true;
    }
    if tables.knight_attacks(square) & attacker[PieceKind::Knight.index()] != 0 {
        return true;
    }
    if tables.king_attacks(square) & attacker[PieceKind::King.index()] != 0 {
        return true;
    }

    let queens = attacker[PieceKind::Queen.index()];
    let bishops_queens = attacker[PieceKind::Bishop.index()] | queens;
    if tables.bishop_attacks(square, occupancy) & bishops_queens != 0 {
        return true;
    }

    let rooks_queens = attacker[PieceKind::Rook.index()] | queens;
    tables.rook_attacks(square, occupancy) & rooks_queens != 0
}

#[inline]
pub fn is_king_in_check(tables: &AttackTables, game_state: &GameState, color: Color) -> MoveGenResult<bool> {
    let king_sq = king_square(game_state, color)?;
    Ok(is_square_attacked(tables, game_state, king_sq, color.opposite()))
}

/// Union of every square `color` attacks, own pieces included.
pub fn attacked_squares(tables: &AttackTables, game_state: &GameState, color: Color) -> Bitboard {
    let pieces = &game_state.pieces[color.index()];
    let occupancy = game_state.occupancy_all;
    let mut attacked = 0u64;

    for from in BitIter(pieces[PieceKind::Pawn.index()]) {
        attacked |= tables.pawn_attacks(color, from);
    }
    for from in BitIter(pieces[PieceKind::Knight.index()]) {
        attacked |= tables.knight_attacks(from);
    }
    for from in BitIter(pieces[PieceKind::Bishop.index()]) {
        attacked |= tables.bishop_attacks(from, occupancy);
    }
    for from in BitIter(pieces[PieceKind::Rook.index()]) {
        attacked |= tables.rook_attacks(from, occupancy);
    }
    for from in BitIter(pieces[PieceKind::Queen.index()]) {
        attacked |= tables.queen_attacks(from, occupancy);
    }
    for from in BitIter(pieces[PieceKind::King.index()]) {
        attacked |= tables.king_attacks(from);
    }

    attacked
}

pub fn game_status(tables: &AttackTables, game_state: &GameState) -> MoveGenResult<GameStatus> {
    if !generate_legal(tables, game_state)?.is_empty() {
        return Ok(GameStatus::Ongoing);
    }
    if is_king_in_check(tables, game_state, game_state.side_to_move)? {
        Ok(GameStatus::Checkmate)
    } else {
        Ok(GameStatus::Stalemate)
    }
}

#[inline]
pub fn is_checkmate(tables: &AttackTables, game_state: &GameState) -> MoveGenResult<bool> {
    Ok(game_status(tables, game_state)? == GameStatus::Checkmate)
}

#[inline]
pub fn is_stalemate(tables: &AttackTables, game_state: &GameState) -> MoveGenResult<bool> {
    Ok(game_status(tables, game_state)? == GameStatus::Stalemate)
}
