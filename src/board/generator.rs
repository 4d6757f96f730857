//! Board generation: two of each symbol, uniformly shuffled.

use crate::core::GameRng;

use super::{Board, Symbol, Tile};

/// Deal a fresh board of `pair_count` symbol pairs.
///
/// Every tile starts face down and unmatched. The shuffle is Fisher-Yates,
/// so each ordering of the tiles is equally likely.
pub fn generate(pair_count: usize, rng: &mut GameRng) -> Board {
    let mut tiles: Vec<Tile> = (0..pair_count as u8)
        .flat_map(|id| [Tile::new(Symbol::new(id)), Tile::new(Symbol::new(id))])
        .collect();

    rng.shuffle(&mut tiles);

    Board::from_tiles(tiles)
}
