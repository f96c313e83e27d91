//! Meld shapes (chi/pon/kan) and the raw hand input they attach to.

use serde::{Deserialize, Serialize};

use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KanKind {
    /// Declared from the wall before anyone could object; concealed.
    Closed,
    /// Called from a discard; open.
    Open,
    /// An existing open pon upgraded by drawing the fourth tile; open.
    Added,
}

impl KanKind {
    pub fn is_open(self) -> bool {
        !matches!(self, KanKind::Closed)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MeldKind {
    Chi,
    Pon,
    Kan(KanKind),
}

/// A called or declared meld. `tiles` holds the meld's physical tiles in
/// ascending order; for a chi that is the three consecutive values, for a
/// pon/kan the (3 or 4) copies of one tile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    pub kind: MeldKind,
    pub tiles: Vec<Tile>,
}

impl Meld {
    pub fn chi(tiles: Vec<Tile>) -> Self {
        Meld { kind: MeldKind::Chi, tiles }
    }

    pub fn pon(tile: Tile) -> Self {
        Meld { kind: MeldKind::Pon, tiles: vec![tile; 3] }
    }

    pub fn kan(tile: Tile, kan_kind: KanKind) -> Self {
        Meld { kind: MeldKind::Kan(kan_kind), tiles: vec![tile; 4] }
    }

    /// Whether this meld is visible to the other players (chi/pon/open kan/
    /// added kan); a closed kan stays concealed.
    pub fn is_open(&self) -> bool {
        match self.kind {
            MeldKind::Chi | MeldKind::Pon => true,
            MeldKind::Kan(k) => k.is_open(),
        }
    }

    pub fn is_triplet_or_kan(&self) -> bool {
        matches!(self.kind, MeldKind::Pon | MeldKind::Kan(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, MeldKind::Chi)
    }

    /// The tile identifying the meld: the lowest tile of a chi, or the
    /// repeated tile of a pon/kan.
    pub fn tile(&self) -> Tile {
        self.tiles[0]
    }

    pub fn is_kan(&self) -> bool {
        matches!(self.kind, MeldKind::Kan(_))
    }
}

/// A hand as submitted for scoring: the concealed tiles plus any called
/// melds, and the tile that completed it. `closed_tiles` always includes
/// the winning tile, whether it came by ron or tsumo; `win_tile` just
/// identifies which one it was.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HandInput {
    pub closed_tiles: Vec<Tile>,
    pub melds: Vec<Meld>,
    pub win_tile: Tile,
}

impl HandInput {
    /// All tiles in the hand, closed and called.
    pub fn all_tiles(&self) -> Vec<Tile> {
        let mut tiles = self.closed_tiles.clone();
        for meld in &self.melds {
            tiles.extend(meld.tiles.iter().copied());
        }
        tiles
    }

    /// Closed tiles with the winning tile set aside, used by wait
    /// classification and the kokushi 13-wait check.
    pub fn closed_tiles_before_win(&self) -> Vec<Tile> {
        let mut tiles = self.closed_tiles.clone();
        if let Some(pos) = tiles.iter().position(|&t| t == self.win_tile) {
            tiles.remove(pos);
        }
        tiles
    }

    pub fn is_open(&self) -> bool {
        self.melds.iter().any(Meld::is_open)
    }

    pub fn kan_count(&self) -> usize {
        self.melds.iter().filter(|m| m.is_kan()).count()
    }
}
