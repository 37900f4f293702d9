//! Move application.
//!
//! `apply_move` never mutates its input: it clones the position, edits the
//! clone's piece bitboards, and recomputes the occupancy caches before
//! handing it back. The move must be pseudo-legal for `game_state`; legality
//! is not re-checked here.

use crate::game_state::chess_rules::{CastlingLane, CASTLING_LANES};
use crate::game_state::{chess_types::*, game_state::GameState};
use crate::moves::bit_utils::square_mask;
use crate::moves::move_descriptions::{Move, MoveClass};

pub fn apply_move(game_state: &GameState, mv: Move) -> GameState {
    let from = mv.from();
    let to = mv.to();
    let class = mv.class();
    let moving_color = game_state.side_to_move;
    let enemy_color = moving_color.opposite();
    let moved_kind = mv.piece().kind;

    let mut next = game_state.clone();

    next.en_passant_square = None;

    // Remove moved piece from origin.
    next.pieces[moving_color.index()][moved_kind.index()] &= !square_mask(from);

    // Handle captures.
    match class {
        MoveClass::EnPassantCapture => {
            // The captured pawn sits beside the origin, on the destination file.
            let victim = match moving_color {
                Color::Light => to - 8,
                Color::Dark => to + 8,
            };
            next.pieces[enemy_color.index()][PieceKind::Pawn.index()] &= !square_mask(victim);
        }
        _ if class.is_capture() => {
            for bb in next.pieces[enemy_color.index()].iter_mut() {
                *bb &= !square_mask(to);
            }
        }
        _ => {}
    }

    // Place moved or promoted piece on destination.
    let placed_kind = class.promotion_kind().unwrap_or(moved_kind);
    next.pieces[moving_color.index()][placed_kind.index()] |= square_mask(to);

    if class.is_castle() {
        if let Some(lane) = castling_lane(moving_color, to) {
            let rooks = &mut next.pieces[moving_color.index()][PieceKind::Rook.index()];
            *rooks &= !square_mask(lane.rook_from);
            *rooks |= square_mask(lane.rook_to);
        }
    }

    if class == MoveClass::DoublePawnPush {
        next.en_passant_square = Some((from + to) / 2);
    }

    next.castling_rights &= !revoked_castling_rights(moving_color, moved_kind, from, to);

    if moved_kind == PieceKind::Pawn || class.is_capture() {
        next.halfmove_clock = 0;
    } else {
        next.halfmove_clock = next.halfmove_clock.saturating_add(1);
    }
    if moving_color == Color::Dark {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }

    next.side_to_move = enemy_color;
    next.recalc_occupancy();
    next
}

fn castling_lane(color: Color, king_to: Square) -> Option<CastlingLane> {
    CASTLING_LANES
        .into_iter()
        .find(|lane| lane.color == color && lane.king_to == king_to)
}

/// Rights lost by this move: both of the mover's rights on a king move, and
/// the right tied to any rook home corner the move leaves or lands on.
fn revoked_castling_rights(color: Color, kind: PieceKind, from: Square, to: Square) -> CastlingRights {
    let mut revoked = 0;
    for lane in CASTLING_LANES {
        if kind == PieceKind::King && lane.color == color {
            revoked |= lane.right;
        }
        if lane.rook_from == from || lane.rook_from == to {
            revoked |= lane.right;
        }
    }
    revoked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::*;

    fn game(fen: &str) -> GameState {
        GameState::from_fen(fen).expect("valid FEN")
    }

    fn light(kind: PieceKind) -> Piece {
        Piece::new(Color::Light, kind)
    }

    fn dark(kind: PieceKind) -> Piece {
        Piece::new(Color::Dark, kind)
    }

    #[test]
    fn double_push_sets_en_passant_and_flips_side() {
        let start = GameState::new_game();
        let next = apply_move(&start, Move::new(12, 28, light(PieceKind::Pawn), MoveClass::DoublePawnPush));

        assert_eq!(next.en_passant_square(), Some(20));
        assert_eq!(next.side_to_move(), Color::Dark);
        assert_eq!(next.piece_on(28), Some(light(PieceKind::Pawn)));
        assert_eq!(next.piece_on(12), None);
        assert_eq!(next.halfmove_clock(), 0);
        assert_eq!(next.fullmove_number(), 1);
        assert!(next.is_consistent());
        // Input untouched.
        assert_eq!(start, GameState::new_game());
    }

    #[test]
    fn en_passant_removes_pawn_beside_origin() {
        let before = game("4k3/8/8/8/4pP2/8/8/4K3 b - f3 0 1");
        let next = apply_move(&before, Move::new(28, 21, dark(PieceKind::Pawn), MoveClass::EnPassantCapture));

        assert_eq!(next.piece_on(21), Some(dark(PieceKind::Pawn)));
        assert_eq!(next.piece_on(29), None);
        assert_eq!(next.piece_on(28), None);
        assert_eq!(next.pieces(Color::Light, PieceKind::Pawn), 0);
        assert_eq!(next.en_passant_square(), None);
        assert_eq!(next.fullmove_number(), 2);
        assert!(next.is_consistent());
    }

    #[test]
    fn kingside_castle_moves_rook_and_revokes_own_rights() {
        let before = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = apply_move(&before, Move::new(E1, G1, light(PieceKind::King), MoveClass::KingCastle));

        assert_eq!(next.piece_on(G1), Some(light(PieceKind::King)));
        assert_eq!(next.piece_on(F1), Some(light(PieceKind::Rook)));
        assert_eq!(next.piece_on(H1), None);
        assert_eq!(next.castling_rights(), CASTLE_DARK_KINGSIDE | CASTLE_DARK_QUEENSIDE);
        assert_eq!(next.halfmove_clock(), 1);
    }

    #[test]
    fn queenside_castle_moves_rook_for_dark() {
        let before = game("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1");
        let next = apply_move(&before, Move::new(E8, C8, dark(PieceKind::King), MoveClass::QueenCastle));

        assert_eq!(next.piece_on(C8), Some(dark(PieceKind::King)));
        assert_eq!(next.piece_on(D8), Some(dark(PieceKind::Rook)));
        assert_eq!(next.piece_on(A8), None);
        assert_eq!(next.castling_rights(), CASTLE_LIGHT_KINGSIDE | CASTLE_LIGHT_QUEENSIDE);
    }

    #[test]
    fn rook_move_revokes_only_its_corner() {
        let before = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = apply_move(&before, Move::new(A1, 8, light(PieceKind::Rook), MoveClass::Quiet));
        assert_eq!(next.castling_rights(), CASTLE_ALL & !CASTLE_LIGHT_QUEENSIDE);
    }

    #[test]
    fn capturing_a_home_rook_revokes_the_victims_right() {
        let before = game("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let next = apply_move(&before, Move::new(H1, H8, light(PieceKind::Rook), MoveClass::Capture));

        assert_eq!(
            next.castling_rights(),
            CASTLE_LIGHT_QUEENSIDE | CASTLE_DARK_QUEENSIDE
        );
        assert_eq!(next.pieces(Color::Dark, PieceKind::Rook).count_ones(), 1);
        assert_eq!(next.halfmove_clock(), 0);
        assert!(next.is_consistent());
    }

    #[test]
    fn promotion_places_promoted_piece() {
        let before = game("r1n1k3/1P6/8/8/8/8/8/4K3 w - - 3 1");
        let next = apply_move(
            &before,
            Move::new(49, 58, light(PieceKind::Pawn), MoveClass::KnightPromotionCapture),
        );

        assert_eq!(next.piece_on(58), Some(light(PieceKind::Knight)));
        assert_eq!(next.pieces(Color::Light, PieceKind::Pawn), 0);
        assert_eq!(next.pieces(Color::Dark, PieceKind::Knight), 0);
        assert_eq!(next.halfmove_clock(), 0);
        assert!(next.is_consistent());
    }
}
