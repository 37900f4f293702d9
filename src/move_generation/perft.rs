//! Perft: exhaustive leaf counting used to validate move generation.
//!
//! `perft` walks any `MoveGenerator` and aggregates per-leaf statistics from
//! the move that reached each leaf. `perft_nodes`, `divide` and
//! `perft_parallel` count nodes only and skip the annotation work.

use std::thread;

use tracing::{debug, trace};

use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_move;
use crate::move_generation::legal_move_generator::generate_legal;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::moves::attack_tables::AttackTables;
use crate::moves::move_descriptions::{Move, MoveClass};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl PerftCounts {
    pub fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }

    fn record_leaf(&mut self, leaf: &GeneratedMove) {
        let class = leaf.mv.class();
        self.nodes += 1;
        if class.is_capture() {
            self.captures += 1;
        }
        if class == MoveClass::EnPassantCapture {
            self.en_passant += 1;
        }
        if class.is_castle() {
            self.castles += 1;
        }
        if class.is_promotion() {
            self.promotions += 1;
        }
        if leaf.annotations.gives_check {
            self.checks += 1;
        }
        if leaf.annotations.is_checkmate {
            self.checkmates += 1;
        }
    }
}

pub fn perft<G: MoveGenerator + ?Sized>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut total = PerftCounts::default();
    for mv in generator.generate_legal_moves(game_state)? {
        perft_recurse(generator, &mv, depth - 1, &mut total)?;
    }

    debug!(depth, nodes = total.nodes, "perft finished");
    Ok(total)
}

fn perft_recurse<G: MoveGenerator + ?Sized>(
    generator: &G,
    mv: &GeneratedMove,
    remaining: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if remaining == 0 {
        counts.record_leaf(mv);
        return Ok(());
    }

    for child in generator.generate_legal_moves(&mv.game_after_move)? {
        perft_recurse(generator, &child, remaining - 1, counts)?;
    }
    Ok(())
}

/// Leaf count only. The last ply is counted without applying its moves.
pub fn perft_nodes(tables: &AttackTables, game_state: &GameState, depth: u8) -> MoveGenResult<usize> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = generate_legal(tables, game_state)?;
    if depth == 1 {
        return Ok(moves.len());
    }

    let mut nodes = 0;
    for mv in moves {
        nodes += perft_nodes(tables, &apply_move(game_state, mv), depth - 1)?;
    }
    Ok(nodes)
}

/// Node count below each root move, in generation order.
pub fn divide(tables: &AttackTables, game_state: &GameState, depth: u8) -> MoveGenResult<Vec<(Move, usize)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let mut lines = Vec::new();
    for mv in generate_legal(tables, game_state)? {
        let nodes = perft_nodes(tables, &apply_move(game_state, mv), depth - 1)?;
        trace!(%mv, nodes, "divide");
        lines.push((mv, nodes));
    }
    Ok(lines)
}

/// Splits the root moves across `threads` scoped workers. The tables are
/// shared; every branch works on its own `GameState`.
pub fn perft_parallel(
    tables: &AttackTables,
    game_state: &GameState,
    depth: u8,
    threads: usize,
) -> MoveGenResult<usize> {
    if depth <= 1 || threads <= 1 {
        return perft_nodes(tables, game_state, depth);
    }

    let children: Vec<GameState> = generate_legal(tables, game_state)?
        .into_iter()
        .map(|mv| apply_move(game_state, mv))
        .collect();
    let chunk_size = children.len().div_ceil(threads).max(1);
    debug!(depth, threads, roots = children.len(), "parallel perft");

    thread::scope(|scope| -> MoveGenResult<usize> {
        let handles: Vec<_> = children
            .chunks(chunk_size)
            .map(|chunk| {
                scope.spawn(move || {
                    chunk.iter().try_fold(0usize, |acc, child| -> MoveGenResult<usize> {
                        Ok(acc + perft_nodes(tables, child, depth - 1)?)
                    })
                })
            })
            .collect();

        let mut total = 0;
        for handle in handles {
            match handle.join() {
                Ok(result) => total += result?,
                Err(payload) => std::panic::resume_unwind(payload),
            }
        }
        Ok(total)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::{Color, Piece, PieceKind};
    use crate::move_generation::legal_move_generator::{FastLegalMoveGenerator, LegalMoveGenerator};
    use crate::move_generation::move_generator::MoveAnnotations;
    use test_case::test_case;

    const KIWIPETE: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    const POSITION_3: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1";
    const POSITION_4: &str = "r2q1rk1/pP1p2pp/Q4n2/bbp1p3/Np6/1B3NBn/pPPP1PPP/R3K2R b KQ - 0 1";
    const POSITION_5: &str = "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8";

    /// Two root moves, each with two scripted replies, keyed on the halfmove clock.
    struct MockMoveGenerator;

    impl MoveGenerator for MockMoveGenerator {
        fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>> {
            let pawn = Piece::new(Color::Light, PieceKind::Pawn);
            let king = Piece::new(Color::Light, PieceKind::King);
            let check = MoveAnnotations {
                gives_check: true,
                is_checkmate: false,
            };
            let mate = MoveAnnotations {
                gives_check: true,
                is_checkmate: true,
            };

            Ok(match game_state.halfmove_clock {
                0 => vec![
                    next_move(game_state, Move::new(12, 28, pawn, MoveClass::DoublePawnPush), MoveAnnotations::default(), 1),
                    next_move(game_state, Move::new(4, 6, king, MoveClass::KingCastle), MoveAnnotations::default(), 2),
                ],
                1 => vec![
                    next_move(game_state, Move::new(28, 35, pawn, MoveClass::Capture), check, 3),
                    next_move(game_state, Move::new(28, 37, pawn, MoveClass::EnPassantCapture), check, 3),
                ],
                2 => vec![
                    next_move(game_state, Move::new(6, 7, king, MoveClass::Quiet), MoveAnnotations::default(), 3),
                    next_move(game_state, Move::new(48, 56, pawn, MoveClass::QueenPromotion), mate, 3),
                ],
                _ => Vec::new(),
            })
        }
    }

    fn next_move(game_state: &GameState, mv: Move, annotations: MoveAnnotations, next_halfmove: u16) -> GeneratedMove {
        let mut game_after_move = game_state.clone();
        game_after_move.halfmove_clock = next_halfmove;
        GeneratedMove {
            mv,
            game_after_move,
            annotations,
        }
    }

    fn tables() -> AttackTables {
        AttackTables::new().expect("tables build")
    }

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("valid FEN")
    }

    #[test]
    fn perft_depth_zero_counts_single_node() {
        let counts = perft(&MockMoveGenerator, &GameState::new_game(), 0).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 1,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn perft_depth_two_aggregates_leaf_metrics() {
        let counts = perft(&MockMoveGenerator, &GameState::new_game(), 2).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 4,
                captures: 2,
                en_passant: 1,
                castles: 0,
                promotions: 1,
                checks: 3,
                checkmates: 1,
            }
        );
    }

    #[test_case(STARTING_POSITION_FEN, &[20, 400, 8902, 197_281]; "start position")]
    #[test_case(KIWIPETE, &[48, 2039, 97_862]; "kiwipete")]
    #[test_case(POSITION_3, &[14, 191, 2812, 43_238]; "rook endgame")]
    #[test_case(POSITION_4, &[6, 264, 9467]; "promotion tangle")]
    #[test_case(POSITION_5, &[44, 1486, 62_379]; "position 5")]
    fn perft_node_counts(fen: &str, expected: &[usize]) {
        let tables = tables();
        let state = game(fen);
        for (depth, &nodes) in expected.iter().enumerate() {
            let depth = depth as u8 + 1;
            assert_eq!(perft_nodes(&tables, &state, depth), Ok(nodes), "depth {depth}");
        }
    }

    #[test]
    fn start_position_depth_three_statistics() {
        let tables = tables();
        let counts = perft(&LegalMoveGenerator::new(&tables), &GameState::new_game(), 3).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 8902,
                captures: 34,
                checks: 12,
                ..PerftCounts::default()
            }
        );
    }

    #[test]
    fn kiwipete_depth_two_statistics() {
        let tables = tables();
        let counts = perft(&LegalMoveGenerator::new(&tables), &game(KIWIPETE), 2).expect("perft should run");
        assert_eq!(
            counts,
            PerftCounts {
                nodes: 2039,
                captures: 351,
                en_passant: 1,
                castles: 91,
                promotions: 0,
                checks: 3,
                checkmates: 0,
            }
        );
    }

    #[test]
    fn fast_generator_perft_matches_node_count() {
        let tables = tables();
        let state = game(POSITION_4);
        let counts = perft(&FastLegalMoveGenerator::new(&tables), &state, 2).expect("perft should run");
        assert_eq!(counts.nodes, 264);
        assert_eq!(counts.promotions, 48);
        assert_eq!(counts.castles, 6);
        assert_eq!(counts.checks, 0);
    }

    #[test]
    fn divide_sums_to_perft() {
        let tables = tables();
        let state = game(KIWIPETE);
        let lines = divide(&tables, &state, 2).expect("divide should run");
        assert_eq!(lines.len(), 48);
        assert_eq!(lines.iter().map(|(_, n)| n).sum::<usize>(), 2039);
    }

    #[test_case(1; "single thread")]
    #[test_case(3; "three threads")]
    #[test_case(64; "more threads than roots")]
    fn parallel_perft_matches_serial(threads: usize) {
        let tables = tables();
        let state = game(KIWIPETE);
        assert_eq!(perft_parallel(&tables, &state, 3, threads), Ok(97_862));
    }
}
