//! Enumeration of every way a winning hand's tiles decompose into groups and
//! a pair (or into the chiitoitsu/kokushi special shapes).
//!
//! A `Group` is `(shape, anchor_tile)`: for a sequence the anchor is its
//! lowest tile, for a triplet/kan the anchor is the repeated tile. This
//! mirrors a called meld without needing to carry all of its tiles around.

use std::collections::HashMap;

use crate::context::WinType;
use crate::meld::{HandInput, KanKind, Meld, MeldKind};
use crate::tile::{to_counts, Tile, TileCounts, KOKUSHI_TILES};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupShape {
    Sequence,
    Triplet,
    Kan(KanKind),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrigin {
    /// Found by decomposing the concealed tiles; concealed unless the fu/yaku
    /// rules say otherwise for a ron-completed triplet.
    Closed,
    /// Came from `HandInput.melds`: a call declared at the table.
    Called,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Group {
    pub shape: GroupShape,
    pub tile: Tile,
    pub origin: GroupOrigin,
}

impl Group {
    pub fn is_sequence(&self) -> bool {
        matches!(self.shape, GroupShape::Sequence)
    }

    pub fn is_triplet_or_kan(&self) -> bool {
        matches!(self.shape, GroupShape::Triplet | GroupShape::Kan(_))
    }

    pub fn is_kan(&self) -> bool {
        matches!(self.shape, GroupShape::Kan(_))
    }

    /// Whether this group is visible to the other players. A closed kan
    /// found among the concealed tiles is still open in the fu-table sense
    /// only when declared as such via `HandInput.melds`.
    pub fn is_open(&self) -> bool {
        match self.origin {
            GroupOrigin::Closed => false,
            GroupOrigin::Called => match self.shape {
                GroupShape::Kan(k) => k.is_open(),
                GroupShape::Sequence | GroupShape::Triplet => true,
            },
        }
    }

    /// Whether this group counts as concealed for fu/yaku purposes.
    ///
    /// A concealed triplet is only downgraded to open when the winning tile
    /// was needed to complete it, i.e. fewer than 3 copies of its tile were
    /// already in hand before the win. A triplet that was already complete
    /// before the win (a 4th copy of its tile sitting in another group, such
    /// as a sequence) stays a genuine ankou even when won by ron.
    pub fn is_concealed(&self, hand: &HandInput, win_type: WinType) -> bool {
        if self.is_open() {
            return false;
        }
        let ron_could_have_completed = self.origin == GroupOrigin::Closed
            && matches!(self.shape, GroupShape::Triplet)
            && self.tile == hand.win_tile
            && win_type == WinType::Ron;
        if !ron_could_have_completed {
            return true;
        }
        let copies_before = hand.closed_tiles_before_win().iter().filter(|&&t| t == self.tile).count();
        copies_before >= 3
    }

    /// The three tiles of a sequence group, in ascending order.
    pub fn sequence_tiles(&self) -> Option<[Tile; 3]> {
        if !self.is_sequence() {
            return None;
        }
        let suit = self.tile.suit()?;
        let value = self.tile.value()?;
        Some([
            Tile::suited(suit, value),
            Tile::suited(suit, value + 1),
            Tile::suited(suit, value + 2),
        ])
    }

    fn from_meld(meld: &Meld) -> Group {
        let shape = match meld.kind {
            MeldKind::Chi => GroupShape::Sequence,
            MeldKind::Pon => GroupShape::Triplet,
            MeldKind::Kan(k) => GroupShape::Kan(k),
        };
        Group { shape, tile: meld.tile(), origin: GroupOrigin::Called }
    }
}

#[derive(Debug, Clone)]
pub enum HandStructure {
    Standard { groups: Vec<Group>, pair: Tile },
    SevenPairs { pairs: Vec<Tile> },
    ThirteenOrphans { pair: Tile },
}

/// All candidate decompositions of `closed_tiles` combined with the
/// already-declared `called_melds`. Ambiguous hands legitimately produce
/// more than one `Standard` entry; the yaku/fu stage picks whichever scores
/// highest.
pub fn enumerate(closed_tiles: &[Tile], called_melds: &[Meld]) -> Vec<HandStructure> {
    let mut structures = Vec::new();
    let called: Vec<Group> = called_melds.iter().map(Group::from_meld).collect();

    if called_melds.is_empty() {
        let counts = to_counts(closed_tiles);
        if is_chiitoitsu(&counts) {
            let mut pairs: Vec<Tile> = counts
                .iter()
                .filter(|&(_, &c)| c == 2)
                .map(|(&t, _)| t)
                .collect();
            pairs.sort_by_key(|t| t.to_index());
            structures.push(HandStructure::SevenPairs { pairs });
        }
        if let Some(pair) = check_kokushi(&counts) {
            structures.push(HandStructure::ThirteenOrphans { pair });
        }
    }

    let counts = to_counts(closed_tiles);
    let needed_groups = 4 - called_melds.len();
    let mut pair_candidates: Vec<Tile> = counts
        .iter()
        .filter(|&(_, &c)| c >= 2)
        .map(|(&t, _)| t)
        .collect();
    pair_candidates.sort_by_key(|t| t.to_index());

    for candidate_pair in pair_candidates {
        let mut remaining = counts.clone();
        decrement(&mut remaining, candidate_pair);
        decrement(&mut remaining, candidate_pair);
        for closed_groups in find_all_group_combinations(&remaining, needed_groups) {
            let mut groups = called.clone();
            groups.extend(closed_groups);
            structures.push(HandStructure::Standard { groups, pair: candidate_pair });
        }
    }

    structures
}

fn is_chiitoitsu(counts: &TileCounts) -> bool {
    counts.len() == 7 && counts.values().all(|&c| c == 2)
}

/// Returns the pair tile if `counts` is a complete kokushi (thirteen orphans)
/// hand, otherwise `None`.
fn check_kokushi(counts: &TileCounts) -> Option<Tile> {
    if counts.keys().any(|t| !t.is_terminal_or_honor()) {
        return None;
    }
    let mut pair = None;
    for &kind in KOKUSHI_TILES.iter() {
        match counts.get(&kind) {
            None | Some(0) => return None,
            Some(&c) if c >= 2 => pair = Some(kind),
            _ => {}
        }
    }
    pair
}

/// Whether the 13 concealed tiles (before the winning tile) are each a
/// distinct kokushi kind with no pair yet formed: the "13-sided wait" shape
/// that doubles the kokushi yakuman.
pub fn is_kokushi_13_wait(closed_tiles_before_win: &[Tile]) -> bool {
    if closed_tiles_before_win.len() != 13 {
        return false;
    }
    let counts = to_counts(closed_tiles_before_win);
    KOKUSHI_TILES.iter().all(|t| counts.get(t) == Some(&1))
}

/// Recursively finds every way to split `counts` into exactly `needed`
/// groups, trying the lowest remaining tile as a triplet before a sequence.
fn find_all_group_combinations(counts: &TileCounts, needed: usize) -> Vec<Vec<Group>> {
    if needed == 0 {
        return if counts.values().all(|&c| c == 0) {
            vec![Vec::new()]
        } else {
            Vec::new()
        };
    }

    let mut lowest: Option<Tile> = None;
    for (&tile, &c) in counts.iter() {
        if c == 0 {
            continue;
        }
        if lowest.is_none_or(|cur| tile.to_index() < cur.to_index()) {
            lowest = Some(tile);
        }
    }
    let Some(tile) = lowest else { return Vec::new() };

    let mut results = Vec::new();

    if *counts.get(&tile).unwrap_or(&0) >= 3 {
        let mut remaining = counts.clone();
        decrement(&mut remaining, tile);
        decrement(&mut remaining, tile);
        decrement(&mut remaining, tile);
        for mut rest in find_all_group_combinations(&remaining, needed - 1) {
            rest.push(Group { shape: GroupShape::Triplet, tile, origin: GroupOrigin::Closed });
            results.push(rest);
        }
    }

    if let (Some(suit), Some(value)) = (tile.suit(), tile.value()) {
        if value <= 7 {
            let second = Tile::suited(suit, value + 1);
            let third = Tile::suited(suit, value + 2);
            if *counts.get(&second).unwrap_or(&0) > 0 && *counts.get(&third).unwrap_or(&0) > 0 {
                let mut remaining = counts.clone();
                decrement(&mut remaining, tile);
                decrement(&mut remaining, second);
                decrement(&mut remaining, third);
                for mut rest in find_all_group_combinations(&remaining, needed - 1) {
                    rest.push(Group { shape: GroupShape::Sequence, tile, origin: GroupOrigin::Closed });
                    results.push(rest);
                }
            }
        }
    }

    results
}

fn decrement(counts: &mut HashMap<Tile, u8>, tile: Tile) {
    if let Some(c) = counts.get_mut(&tile) {
        *c -= 1;
        if *c == 0 {
            counts.remove(&tile);
        }
    }
}

/// Whether `closed_tiles` (given `called_melds` already set aside) can form
/// any winning shape at all: used by the shape validator.
pub fn is_winning_hand(closed_tiles: &[Tile], called_melds: &[Meld]) -> bool {
    !enumerate(closed_tiles, called_melds).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::Suit;

    fn m(suit: Suit, value: u8) -> Tile {
        Tile::suited(suit, value)
    }

    #[test]
    fn standard_hand_decomposes() {
        let tiles = vec![
            m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 3),
            m(Suit::Man, 4), m(Suit::Man, 5), m(Suit::Man, 6),
            m(Suit::Pin, 7), m(Suit::Pin, 7), m(Suit::Pin, 7),
            m(Suit::Sou, 1), m(Suit::Sou, 2), m(Suit::Sou, 3),
            m(Suit::Sou, 9), m(Suit::Sou, 9),
        ];
        assert!(is_winning_hand(&tiles, &[]));
    }

    #[test]
    fn chiitoitsu_detected() {
        let mut tiles = Vec::new();
        for v in 1..=7u8 {
            tiles.push(m(Suit::Man, v));
            tiles.push(m(Suit::Man, v));
        }
        let structures = enumerate(&tiles, &[]);
        assert!(structures.iter().any(|s| matches!(s, HandStructure::SevenPairs { .. })));
    }

    #[test]
    fn kokushi_detected() {
        let mut tiles: Vec<Tile> = KOKUSHI_TILES.to_vec();
        tiles.push(Tile::honor(crate::tile::Honor::East));
        let structures = enumerate(&tiles, &[]);
        assert!(structures.iter().any(|s| matches!(s, HandStructure::ThirteenOrphans { .. })));
    }

    #[test]
    fn ambiguous_shape_yields_multiple_structures() {
        let tiles = vec![
            m(Suit::Sou, 2), m(Suit::Sou, 2), m(Suit::Sou, 2),
            m(Suit::Sou, 3), m(Suit::Sou, 4), m(Suit::Sou, 5),
            m(Suit::Sou, 6), m(Suit::Sou, 7), m(Suit::Sou, 8),
            m(Suit::Pin, 1), m(Suit::Pin, 1), m(Suit::Pin, 1),
            m(Suit::Man, 9), m(Suit::Man, 9),
        ];
        let structures = enumerate(&tiles, &[]);
        let standard_count = structures
            .iter()
            .filter(|s| matches!(s, HandStructure::Standard { .. }))
            .count();
        assert!(standard_count >= 1);
    }

    #[test]
    fn not_winning_shape_is_empty() {
        let tiles = vec![m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 4)];
        assert!(!is_winning_hand(&tiles, &[]));
    }

    #[test]
    fn triplet_with_a_spare_copy_elsewhere_stays_concealed_on_ron() {
        // 555p555p is impossible (max 4 copies); model the spare copy via a
        // sequence instead: 555p triplet + 567p sequence, won by ron on 5p.
        // The triplet already had 3 copies before the win (the 4th 5p went
        // into the sequence), so it stays a genuine ankou.
        let hand = HandInput {
            closed_tiles: vec![
                m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 5),
                m(Suit::Pin, 6), m(Suit::Pin, 7),
            ],
            melds: vec![],
            win_tile: m(Suit::Pin, 5),
        };
        let triplet = Group { shape: GroupShape::Triplet, tile: m(Suit::Pin, 5), origin: GroupOrigin::Closed };
        assert!(triplet.is_concealed(&hand, crate::context::WinType::Ron));
    }

    #[test]
    fn shanpon_triplet_is_downgraded_on_ron() {
        // Only 2 copies of 5p before the win: the ron tile itself completed
        // the triplet, so it is a minkou for fu/yaku purposes.
        let hand = HandInput {
            closed_tiles: vec![m(Suit::Pin, 5), m(Suit::Pin, 5)],
            melds: vec![],
            win_tile: m(Suit::Pin, 5),
        };
        let triplet = Group { shape: GroupShape::Triplet, tile: m(Suit::Pin, 5), origin: GroupOrigin::Closed };
        assert!(!triplet.is_concealed(&hand, crate::context::WinType::Ron));
    }

    #[test]
    fn kokushi_13_wait_requires_thirteen_distinct_singles() {
        let tiles: Vec<Tile> = KOKUSHI_TILES.to_vec();
        assert!(is_kokushi_13_wait(&tiles));

        let mut not_wait = tiles.clone();
        not_wait.pop();
        not_wait.push(Tile::honor(crate::tile::Honor::East));
        assert!(!is_kokushi_13_wait(&not_wait));
    }
}
