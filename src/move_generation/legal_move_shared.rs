use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bit_utils::BitIter;
use crate::moves::move_descriptions::{Move, MoveClass};

/// Emits one move per target square, split into quiet moves (empty target)
/// and captures (enemy-occupied target). Own-occupied targets are dropped.
#[inline]
pub fn push_targets(
    game_state: &GameState,
    from: Square,
    kind: PieceKind,
    targets: Bitboard,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let piece = Piece::new(side, kind);
    let enemy_occ = game_state.occupancy_by_color[side.opposite().index()];
    let targets = targets & !game_state.occupancy_by_color[side.index()];

    for to in BitIter(targets) {
        let class = if enemy_occ & (1u64 << to) != 0 {
            MoveClass::Capture
        } else {
            MoveClass::Quiet
        };
        out.push(Move::new(from, to, piece, class));
    }
}
