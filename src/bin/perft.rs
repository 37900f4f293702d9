use std::error::Error;
use std::time::Instant;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_core::game_state::chess_rules::STARTING_POSITION_FEN;
use plum_core::game_state::game_state::GameState;
use plum_core::move_generation::legal_move_generator::LegalMoveGenerator;
use plum_core::move_generation::perft::{divide, perft, perft_parallel};
use plum_core::moves::attack_tables::AttackTables;

/// Count leaf positions reachable from a FEN position.
#[derive(Debug, Parser)]
#[command(name = "perft", version)]
struct Args {
    /// Position to search from.
    #[arg(long, default_value = STARTING_POSITION_FEN)]
    fen: String,

    #[arg(long, short, default_value_t = 4)]
    depth: u8,

    /// Print the node count below every root move.
    #[arg(long)]
    divide: bool,

    /// Worker threads for the node count.
    #[arg(long, default_value_t = 1)]
    threads: usize,

    /// Also report capture, castle, check and mate counts (single-threaded).
    #[arg(long)]
    stats: bool,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let tables = AttackTables::new()?;
    let game = GameState::from_fen(&args.fen)?;
    info!(fen = %args.fen, depth = args.depth, threads = args.threads, "starting perft");

    let start = Instant::now();

    if args.divide {
        let lines = divide(&tables, &game, args.depth)?;
        for (mv, nodes) in &lines {
            println!("{mv}: {nodes}");
        }
        println!();
        println!("Moves: {}", lines.len());
    }

    if args.stats {
        let counts = perft(&LegalMoveGenerator::new(&tables), &game, args.depth)?;
        println!("Nodes:      {}", counts.nodes);
        println!("Captures:   {}", counts.captures);
        println!("E.p.:       {}", counts.en_passant);
        println!("Castles:    {}", counts.castles);
        println!("Promotions: {}", counts.promotions);
        println!("Checks:     {}", counts.checks);
        println!("Checkmates: {}", counts.checkmates);
    } else {
        let nodes = perft_parallel(&tables, &game, args.depth, args.threads)?;
        println!("Nodes: {nodes}");
    }

    let elapsed = start.elapsed();
    info!(elapsed_ms = elapsed.as_millis() as u64, "perft finished");
    Ok(())
}
