//! Offline randomized search for slider magic numbers.
//!
//! Nothing in move generation calls this: the `find_magics` binary runs it
//! and prints constants for `magic_numbers.rs`.

use rand::{rngs::StdRng, Rng, SeedableRng};
use thiserror::Error;
use tracing::debug;

use crate::game_state::chess_types::Square;
use crate::moves::attack_tables::{fill_magic_table, SliderKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MagicSearchError {
    #[error("no {slider} magic for square {square} within {attempts} attempts")]
    Exhausted {
        slider: &'static str,
        square: Square,
        attempts: u32,
    },
}

/// Knobs for the randomized search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MagicSearchConfig {
    pub seed: u64,
    pub max_attempts: u32,
    /// Candidates whose product with the mask sets fewer bits than this in
    /// the top byte are skipped without building a table.
    pub min_high_bits: u32,
}

impl Default for MagicSearchConfig {
    fn default() -> Self {
        Self {
            seed: 123_456_789,
            max_attempts: 1_000_000,
            min_high_bits: 6,
        }
    }
}

/// Sparse random candidate: ANDing three draws leaves about 8 bits set.
fn sparse_candidate(rng: &mut StdRng) -> u64 {
    rng.random::<u64>() & rng.random::<u64>() & rng.random::<u64>()
}

/// Searches for a collision-free magic for `slider` on `square`, drawing
/// candidates from `rng`.
pub fn find_magic_with_rng(
    slider: SliderKind,
    square: Square,
    config: &MagicSearchConfig,
    rng: &mut StdRng,
) -> Result<u64, MagicSearchError> {
    let mask = slider.relevant_mask(square);

    for attempt in 0..config.max_attempts {
        let magic = sparse_candidate(rng);
        if (mask.wrapping_mul(magic) & 0xFF00_0000_0000_0000).count_ones() < config.min_high_bits {
            continue;
        }
        if fill_magic_table(slider, square, magic).is_some() {
            debug!(slider = slider.name(), square, attempt, "found magic");
            return Ok(magic);
        }
    }

    Err(MagicSearchError::Exhausted {
        slider: slider.name(),
        square,
        attempts: config.max_attempts,
    })
}

/// Single-square search seeded from `config.seed`.
pub fn find_magic(slider: SliderKind, square: Square, config: &MagicSearchConfig) -> Result<u64, MagicSearchError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    find_magic_with_rng(slider, square, config, &mut rng)
}

/// Magics for all 64 squares, drawn from one seeded stream.
pub fn find_all_magics(slider: SliderKind, config: &MagicSearchConfig) -> Result<[u64; 64], MagicSearchError> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut magics = [0u64; 64];
    for square in 0..64u8 {
        magics[square as usize] = find_magic_with_rng(slider, square, config, &mut rng)?;
    }
    Ok(magics)
}
