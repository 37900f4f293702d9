use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_tables::AttackTables;
use crate::moves::bit_utils::BitIter;
use crate::moves::move_descriptions::Move;

pub fn generate_queen_moves(tables: &AttackTables, game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    for from in BitIter(game_state.pieces[side.index()][PieceKind::Queen.index()]) {
        let attacks = tables.queen_attacks(from, game_state.occupancy_all);
        push_targets(game_state, from, PieceKind::Queen, attacks, out);
    }
}
