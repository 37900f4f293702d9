use std::error::Error;

use chrono::Utc;
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use plum_core::moves::attack_tables::SliderKind;
use plum_core::moves::magic_search::{find_all_magics, MagicSearchConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SliderArg {
    Rook,
    Bishop,
    Both,
}

/// Search for slider magic numbers and print them as Rust constants.
#[derive(Debug, Parser)]
#[command(name = "find_magics", version)]
struct Args {
    #[arg(long, default_value_t = MagicSearchConfig::default().seed)]
    seed: u64,

    /// Candidates tried per square before giving up.
    #[arg(long, default_value_t = MagicSearchConfig::default().max_attempts)]
    max_attempts: u32,

    #[arg(long, value_enum, default_value_t = SliderArg::Both)]
    slider: SliderArg,
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let config = MagicSearchConfig {
        seed: args.seed,
        max_attempts: args.max_attempts,
        ..MagicSearchConfig::default()
    };

    let sliders: &[(SliderKind, &str)] = match args.slider {
        SliderArg::Rook => &[(SliderKind::Rook, "ROOK_MAGICS")],
        SliderArg::Bishop => &[(SliderKind::Bishop, "BISHOP_MAGICS")],
        SliderArg::Both => &[(SliderKind::Rook, "ROOK_MAGICS"), (SliderKind::Bishop, "BISHOP_MAGICS")],
    };

    println!(
        "// Generated by find_magics at {} with seed {}.",
        Utc::now().format("%Y-%m-%d %H:%M:%S UTC"),
        config.seed
    );

    for &(slider, name) in sliders {
        info!(slider = slider.name(), "searching");
        let magics = find_all_magics(slider, &config)?;

        println!();
        println!("pub const {name}: [Bitboard; 64] = [");
        for magic in magics {
            println!("    {magic:#018x},");
        }
        println!("];");
    }

    Ok(())
}
