use crate::game_state::chess_rules::castling_lanes_for;
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::move_generation::legal_move_checks::is_square_attacked;
use crate::move_generation::legal_move_shared::push_targets;
use crate::moves::attack_tables::AttackTables;
use crate::moves::bit_utils::BitIter;
use crate::moves::move_descriptions::{Move, MoveClass};

pub fn generate_king_moves(tables: &AttackTables, game_state: &GameState, out: &mut Vec<Move>) {
    let side = game_state.side_to_move;
    for from in BitIter(game_state.pieces[side.index()][PieceKind::King.index()]) {
        push_targets(game_state, from, PieceKind::King, tables.king_attacks(from), out);
        generate_castling_moves(tables, game_state, from, out);
    }
}

/// Castling needs the right, an empty lane between king and rook, and a king
/// that neither starts on nor crosses an attacked square. Safety of the
/// destination square is left to the legality filter.
fn generate_castling_moves(
    tables: &AttackTables,
    game_state: &GameState,
    king_from: Square,
    out: &mut Vec<Move>,
) {
    let side = game_state.side_to_move;
    let enemy = side.opposite();
    let king = Piece::new(side, PieceKind::King);

    for lane in castling_lanes_for(side) {
        if !game_state.has_castling_right(lane.right) || lane.king_from != king_from {
            continue;
        }
        if game_state.occupancy_all & lane.must_be_empty != 0 {
            continue;
        }
        if is_square_attacked(tables, game_state, lane.king_from, enemy)
            || is_square_attacked(tables, game_state, lane.king_transit, enemy)
        {
            continue;
        }

        let class = if lane.king_to > lane.king_from {
            MoveClass::KingCastle
        } else {
            MoveClass::QueenCastle
        };
        out.push(Move::new(lane.king_from, lane.king_to, king, class));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{C1, G1};
    use test_case::test_case;

    fn castles(fen: &str) -> Vec<(Square, MoveClass)> {
        let tables = AttackTables::new().expect("tables build");
        let game = GameState::from_fen(fen).expect("valid FEN");
        let mut out = Vec::new();
        generate_king_moves(&tables, &game, &mut out);
        out.into_iter()
            .filter(|m| m.class().is_castle())
            .map(|m| (m.to(), m.class()))
            .collect()
    }

    #[test]
    fn both_castles_available_on_open_back_rank() {
        assert_eq!(
            castles("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1"),
            vec![(G1, MoveClass::KingCastle), (C1, MoveClass::QueenCastle)]
        );
    }

    #[test_case("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1"; "no rights")]
    #[test_case("r3k2r/8/8/8/8/8/8/RN2K1NR w KQkq - 0 1"; "lanes occupied")]
    fn no_castling(fen: &str) {
        assert!(castles(fen).is_empty());
    }

    #[test]
    fn cannot_castle_out_of_check() {
        assert!(castles("r3k2r/8/8/8/8/8/4q3/R3K2R w KQkq - 0 1").is_empty());
    }

    #[test]
    fn transit_square_attack_blocks_only_that_side() {
        // Rook on f8 covers f1, the kingside transit square.
        assert_eq!(
            castles("r3kr2/8/8/8/8/8/8/R3K2R w KQq - 0 1"),
            vec![(C1, MoveClass::QueenCastle)]
        );
    }

    #[test]
    fn attacked_destination_is_left_to_the_legality_filter() {
        // Rook on g8 covers only g1, the kingside destination.
        assert_eq!(
            castles("r3k1r1/8/8/8/8/8/8/R3K2R w KQq - 0 1"),
            vec![(G1, MoveClass::KingCastle), (C1, MoveClass::QueenCastle)]
        );
    }

    #[test]
    fn attacked_b1_does_not_block_queenside() {
        // b1 must be empty but the king never crosses it.
        assert_eq!(
            castles("1r2k2r/8/8/8/8/8/8/R3K2R w KQk - 0 1"),
            vec![(G1, MoveClass::KingCastle), (C1, MoveClass::QueenCastle)]
        );
    }
}
