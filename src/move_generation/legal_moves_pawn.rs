//! Pawn move generation: pushes, double pushes, captures, en passant, and
//! promotion expansion.

use crate::game_state::chess_rules::{pawn_start_rank, promotion_rank};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::attack_tables::AttackTables;
use crate::moves::bit_utils::BitIter;
use crate::moves::move_descriptions::{Move, MoveClass};

pub fn generate_pawn_moves(tables: &AttackTables, game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    let piece = Piece::new(side, PieceKind::Pawn);
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let empty = !game_state.occupancy_all;
    let last_rank = promotion_rank(side);

    for from in BitIter(game_state.pieces[side.index()][PieceKind::Pawn.index()]) {
        // A pawn on its promotion rank cannot exist, so the step stays on the board.
        let one_step = match side {
            Color::Light => from + 8,
            Color::Dark => from - 8,
        };

        if empty & (1u64 << one_step) != 0 {
            if one_step / 8 == last_rank {
                push_promotions(from, one_step, piece, false, out);
            } else {
                out.push(Move::new(from, one_step, piece, MoveClass::Quiet));

                if from / 8 == pawn_start_rank(side) {
                    let two_step = match side {
                        Color::Light => from + 16,
                        Color::Dark => from - 16,
                    };
                    if empty & (1u64 << two_step) != 0 {
                        out.push(Move::new(from, two_step, piece, MoveClass::DoublePawnPush));
                    }
                }
            }
        }

        let attacks = tables.pawn_attacks(side, from);
        for to in BitIter(attacks & enemy_occ) {
            if to / 8 == last_rank {
                push_promotions(from, to, piece, true, out);
            } else {
                out.push(Move::new(from, to, piece, MoveClass::Capture));
            }
        }

        if let Some(ep) = game_state.en_passant_square {
            if attacks & (1u64 << ep) != 0 {
                out.push(Move::new(from, ep, piece, MoveClass::EnPassantCapture));
            }
        }
    }
}

fn push_promotions(from: Square, to: Square, piece: Piece, capture: bool, out: &mut Vec<Move>) {
    for kind in PieceKind::PROMOTIONS {
        if let Some(class) = MoveClass::promotion(kind, capture) {
            out.push(Move::new(from, to, piece, class));
        }
    }
}
