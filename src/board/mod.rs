//! The tile board.
//!
//! A board is an ordered sequence of tiles holding each symbol exactly
//! twice. Tiles live in an `im::Vector` so a session can be cloned into
//! its next state in O(1).

mod generator;
mod tile;

pub use generator::generate;
pub use tile::{Symbol, Tile, TileFace, TileIndex, GLYPHS, HIDDEN_GLYPH};

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Ordered sequence of tiles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vector<Tile>,
}

impl Board {
    /// Build a board from tiles in display order.
    pub fn from_tiles(tiles: impl IntoIterator<Item = Tile>) -> Self {
        Self {
            tiles: tiles.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: TileIndex) -> Option<&Tile> {
        self.tiles.get(index.get())
    }

    /// Iterate over tiles in display order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Iterate over (index, tile) pairs.
    pub fn indexed(&self) -> impl Iterator<Item = (TileIndex, &Tile)> {
        self.tiles
            .iter()
            .enumerate()
            .map(|(i, t)| (TileIndex::new(i), t))
    }

    /// Positions holding `symbol`.
    pub fn positions_of(&self, symbol: Symbol) -> impl Iterator<Item = TileIndex> + '_ {
        self.indexed()
            .filter(move |(_, t)| t.symbol == symbol)
            .map(|(i, _)| i)
    }

    #[must_use]
    pub fn matched_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.matched).count()
    }

    /// True once every tile is matched.
    #[must_use]
    pub fn is_cleared(&self) -> bool {
        !self.tiles.is_empty() && self.matched_count() == self.tiles.len()
    }

    /// How many tiles carry each symbol.
    #[must_use]
    pub fn symbol_counts(&self) -> FxHashMap<Symbol, usize> {
        let mut counts = FxHashMap::default();
        for tile in &self.tiles {
            *counts.entry(tile.symbol).or_insert(0) += 1;
        }
        counts
    }

    /// Every symbol on the board appears exactly twice.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.symbol_counts().values().all(|&n| n == 2)
    }

    /// Turn a tile face up. Returns false if the index is off the board.
    pub fn reveal(&mut self, index: TileIndex) -> bool {
        self.update(index, |t| t.revealed = true)
    }

    /// Turn a tile face down again.
    pub fn hide(&mut self, index: TileIndex) -> bool {
        self.update(index, |t| t.revealed = false)
    }

    /// Mark a tile as matched. Matched tiles stay face up.
    pub fn mark_matched(&mut self, index: TileIndex) -> bool {
        self.update(index, |t| {
            t.revealed = true;
            t.matched = true;
        })
    }

    fn update(&mut self, index: TileIndex, f: impl FnOnce(&mut Tile)) -> bool {
        match self.tiles.get_mut(index.get()) {
            Some(tile) => {
                f(tile);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_board() -> Board {
        Board::from_tiles([0, 1, 1, 0].map(|s| Tile::new(Symbol::new(s))))
    }

    #[test]
    fn test_reveal_hide_match() {
        let mut board = small_board();
        let idx = TileIndex::new(1);

        assert!(board.reveal(idx));
        assert!(board.get(idx).is_some_and(|t| t.revealed));

        assert!(board.hide(idx));
        assert!(board.get(idx).is_some_and(|t| !t.revealed));

        assert!(board.mark_matched(idx));
        assert!(board.get(idx).is_some_and(|t| t.matched && t.revealed));
        assert_eq!(board.matched_count(), 1);
    }

    #[test]
    fn test_out_of_range() {
        let mut board = small_board();
        assert!(!board.reveal(TileIndex::new(4)));
        assert!(board.get(TileIndex::new(4)).is_none());
    }

    #[test]
    fn test_cleared() {
        let mut board = small_board();
        assert!(!board.is_cleared());
        for i in 0..4 {
            board.mark_matched(TileIndex::new(i));
        }
        assert!(board.is_cleared());
    }

    #[test]
    fn test_positions_and_counts() {
        let board = small_board();
        let zeros: Vec<_> = board.positions_of(Symbol::new(0)).collect();
        assert_eq!(zeros, vec![TileIndex::new(0), TileIndex::new(3)]);
        assert!(board.is_well_formed());

        let lopsided = Board::from_tiles([0, 0, 0, 1].map(|s| Tile::new(Symbol::new(s))));
        assert!(!lopsided.is_well_formed());
    }

    #[test]
    fn test_clone_is_independent() {
        let board = small_board();
        let mut next = board.clone();
        next.reveal(TileIndex::new(0));

        assert!(!board.get(TileIndex::new(0)).is_some_and(|t| t.revealed));
        assert!(next.get(TileIndex::new(0)).is_some_and(|t| t.revealed));
    }
}
