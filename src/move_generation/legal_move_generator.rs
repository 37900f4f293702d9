//! Full legal move generation pipeline.
//!
//! Runs the piece-wise pseudo-legal generators in a fixed order (pawn,
//! knight, bishop, rook, queen, king), applies every candidate to its own
//! copy of the position, and keeps those that leave the mover's king safe.

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;
use crate::move_generation::move_generator::{
    GeneratedMove, MoveAnnotations, MoveGenResult, MoveGenerator,
};
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::Move;

/// Every pseudo-legal move for the side to move, in a deterministic order.
pub fn generate_pseudo_legal(tables: &AttackTables, game_state: &GameState) -> Vec<Move> {
    let mut pseudo = Vec::<Move>::with_capacity(128);

    generate_pawn_moves(tables, game_state, &mut pseudo);
    generate_knight_moves(tables, game_state, &mut pseudo);
    generate_bishop_moves(tables, game_state, &mut pseudo);
    generate_rook_moves(tables, game_state, &mut pseudo);
    generate_queen_moves(tables, game_state, &mut pseudo);
    generate_king_moves(tables, game_state, &mut pseudo);

    pseudo
}

/// Pseudo-legal moves that do not leave the mover's own king attacked.
pub fn generate_legal(tables: &AttackTables, game_state: &GameState) -> MoveGenResult<Vec<Move>> {
    Ok(legal_successors(tables, game_state)?
        .into_iter()
        .map(|(mv, _)| mv)
        .collect())
}

fn legal_successors(
    tables: &AttackTables,
    game_state: &GameState,
) -> MoveGenResult<Vec<(Move, GameState)>> {
    let mover = game_state.side_to_move;
    let pseudo = generate_pseudo_legal(tables, game_state);

    let mut legal = Vec::with_capacity(pseudo.len());
    for mv in pseudo {
        let next = apply_move(game_state, mv);
        // Illegal if own king is in check after move.
        if is_king_in_check(tables, &next, mover)? {
            continue;
        }
        legal.push((mv, next));
    }

    Ok(legal)
}

/// Legal moves with their resulting positions and check/mate annotations.
pub struct LegalMoveGenerator<'a> {
    tables: &'a AttackTables,
}

/// Same moves as `LegalMoveGenerator`, without annotations.
pub struct FastLegalMoveGenerator<'a> {
    tables: &'a AttackTables,
}

impl<'a> LegalMoveGenerator<'a> {
    pub fn new(tables: &'a AttackTables) -> Self {
        Self { tables }
    }
}

impl<'a> FastLegalMoveGenerator<'a> {
    pub fn new(tables: &'a AttackTables) -> Self {
        Self { tables }
    }
}

impl MoveGenerator for LegalMoveGenerator<'_> {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        legal_successors(self.tables, game_state)?
            .into_iter()
            .map(|(mv, next)| -> MoveGenResult<GeneratedMove> {
                let annotations = classify_move_annotations(self.tables, &next)?;
                Ok(GeneratedMove {
                    mv,
                    game_after_move: next,
                    annotations,
                })
            })
            .collect()
    }
}

impl MoveGenerator for FastLegalMoveGenerator<'_> {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
        Ok(legal_successors(self.tables, game_state)?
            .into_iter()
            .map(|(mv, next)| GeneratedMove {
                mv,
                game_after_move: next,
                annotations: MoveAnnotations::default(),
            })
            .collect())
    }
}

fn classify_move_annotations(tables: &AttackTables, next: &GameState) -> MoveGenResult<MoveAnnotations> {
    if !is_king_in_check(tables, next, next.side_to_move)? {
        return Ok(MoveAnnotations::default());
    }

    let has_reply = !legal_successors(tables, next)?.is_empty();
    Ok(MoveAnnotations {
        gives_check: true,
        is_checkmate: !has_reply,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::{C1, E1, G1};
    use crate::game_state::chess_types::*;
    use crate::moves::move_descriptions::MoveClass;

    fn tables() -> AttackTables {
        AttackTables::new().expect("tables build")
    }

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("valid FEN")
    }

    #[test]
    fn fast_generator_matches_legal_move_count_on_startpos() {
        let tables = tables();
        let game = GameState::new_game();
        let annotated = LegalMoveGenerator::new(&tables)
            .generate_legal_moves(&game)
            .expect("annotated move generation should succeed");
        let fast = FastLegalMoveGenerator::new(&tables)
            .generate_legal_moves(&game)
            .expect("fast move generation should succeed");
        assert_eq!(annotated.len(), fast.len());
        assert_eq!(fast.len(), 20);
    }

    #[test]
    fn ordering_is_deterministic() {
        let tables = tables();
        let game = game("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1");
        let first = generate_pseudo_legal(&tables, &game);
        let second = generate_pseudo_legal(&tables, &game);
        assert_eq!(first, second);
        assert_eq!(first[0].piece().kind, PieceKind::Pawn);
        assert_eq!(first[first.len() - 1].piece().kind, PieceKind::King);
    }

    #[test]
    fn en_passant_scenario() {
        let tables = tables();
        let before = game("4k3/8/8/8/4pP2/8/8/4K3 b - f3 0 1");
        let legal = generate_legal(&tables, &before).expect("kings present");

        let ep: Vec<Move> = legal
            .iter()
            .copied()
            .filter(|m| m.class() == MoveClass::EnPassantCapture)
            .collect();
        assert_eq!(ep.len(), 1);
        assert_eq!(ep[0].from(), 28);

        let after = apply_move(&before, ep[0]);
        assert_eq!(after.piece_on(29), None);
        assert_eq!(after.piece_on(21), Some(Piece::new(Color::Dark, PieceKind::Pawn)));
    }

    #[test]
    fn castling_scenario() {
        let tables = tables();
        let before = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let legal = generate_legal(&tables, &before).expect("kings present");
        let castles: Vec<Move> = legal.into_iter().filter(|m| m.class().is_castle()).collect();
        assert_eq!(castles.len(), 2);

        for mv in castles {
            let after = apply_move(&before, mv);
            assert_eq!(after.castling_rights(), CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
            let rook_square = if mv.to() == G1 { 5 } else { 3 };
            assert_eq!(after.piece_on(rook_square), Some(Piece::new(Color::Light, PieceKind::Rook)));
            assert!(mv.to() == G1 || mv.to() == C1);
            assert_eq!(mv.from(), E1);
        }
    }

    #[test]
    fn castling_into_check_is_filtered() {
        let tables = tables();
        // Rook on g8 covers the kingside destination.
        let before = game("r3k1r1/8/8/8/8/8/8/R3K2R w KQq - 0 1");
        let legal = generate_legal(&tables, &before).expect("kings present");
        let castles: Vec<Square> = legal
            .iter()
            .filter(|m| m.class().is_castle())
            .map(|m| m.to())
            .collect();
        assert_eq!(castles, vec![C1]);
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        let tables = tables();
        // Knight on e2 is pinned by the rook on e8.
        let before = game("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1");
        let legal = generate_legal(&tables, &before).expect("kings present");
        assert!(legal.iter().all(|m| m.piece().kind == PieceKind::King));
    }

    #[test]
    fn occupancy_invariant_holds_along_a_line() {
        let tables = tables();
        let mut state = GameState::new_game();
        for _ in 0..40 {
            let legal = generate_legal(&tables, &state).expect("kings present");
            let Some(&mv) = legal.last() else {
                break;
            };
            state = apply_move(&state, mv);
            assert!(state.is_consistent());
            assert_eq!(state.occupancy_all(), state.occupancy(Color::Light) | state.occupancy(Color::Dark));
            assert_eq!(state.occupancy(Color::Light) & state.occupancy(Color::Dark), 0);
        }
    }

    #[test]
    fn annotations_flag_check_and_mate() {
        let tables = tables();
        // Black to play Qh4#.
        let before = game("rnbqkbnr/pppp1ppp/8/4p3/6P1/5P2/PPPPP2P/RNBQKBNR b KQkq - 0 2");
        let moves = LegalMoveGenerator::new(&tables)
            .generate_legal_moves(&before)
            .expect("kings present");

        let mate: Vec<&GeneratedMove> = moves.iter().filter(|g| g.annotations.is_checkmate).collect();
        assert_eq!(mate.len(), 1);
        assert_eq!(mate[0].mv.to_string(), "d8h4");
        assert!(mate[0].annotations.gives_check);
    }
}
