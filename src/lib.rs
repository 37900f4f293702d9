//! Crate root module declarations for the Plum chess rules core.
//!
//! Exposes the position model, the attack tables and move encoding, and the
//! move generation pipeline (generation, application, legality, perft) so
//! binaries, benches and downstream crates can import stable module paths.

pub mod game_state {
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod position_description;
}

pub mod moves {
    pub mod attack_tables;
    pub mod bishop_moves;
    pub mod bit_utils;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod magic_numbers;
    pub mod magic_search;
    pub mod move_descriptions;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod move_generator;
    pub mod perft;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_parser;
}
