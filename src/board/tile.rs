//! Tiles, their symbols and how they look.

use serde::{Deserialize, Serialize};

/// Glyphs for symbols `0..8`, in symbol order.
pub const GLYPHS: [&str; 8] = ["🐶", "🐱", "🐭", "🐹", "🐰", "🦊", "🐻", "🐼"];

/// What a face-down tile shows.
pub const HIDDEN_GLYPH: &str = "?";

/// Identity of a tile. Exactly two tiles on a board share each symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Symbol(pub u8);

impl Symbol {
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// The emoji drawn on the tile face.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        GLYPHS[self.0 as usize % GLYPHS.len()]
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Position of a tile on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileIndex(pub usize);

impl TileIndex {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

impl std::fmt::Display for TileIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    pub symbol: Symbol,
    pub revealed: bool,
    pub matched: bool,
}

impl Tile {
    /// A face-down, unmatched tile.
    #[must_use]
    pub const fn new(symbol: Symbol) -> Self {
        Self {
            symbol,
            revealed: false,
            matched: false,
        }
    }

    /// How the presenter should draw this tile.
    #[must_use]
    pub fn face(&self) -> TileFace {
        if self.matched {
            TileFace::Matched(self.symbol)
        } else if self.revealed {
            TileFace::Revealed(self.symbol)
        } else {
            TileFace::Hidden
        }
    }
}

/// Visible state of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileFace {
    Hidden,
    Revealed(Symbol),
    Matched(Symbol),
}

impl TileFace {
    /// Text drawn on the tile.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            TileFace::Hidden => HIDDEN_GLYPH,
            TileFace::Revealed(symbol) | TileFace::Matched(symbol) => symbol.glyph(),
        }
    }
}
