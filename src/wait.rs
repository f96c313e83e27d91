//! Classifies how the winning tile completed the hand: the wait shape
//! affects both fu (kanchan/penchan/tanki each add 2) and pinfu eligibility.

use crate::context::ContextInput;
use crate::partition::HandStructure;
use crate::tile::Tile;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitType {
    /// Two-sided sequence wait, e.g. 34m waiting on 2m/5m.
    Ryanmen,
    /// Closed sequence wait, e.g. 35m waiting on 4m.
    Kanchan,
    /// Edge sequence wait, e.g. 12m waiting on 3m, or 89m waiting on 7m.
    Penchan,
    /// Waiting on either of two pairs to complete a triplet.
    Shanpon,
    /// Waiting to pair the single remaining tile.
    Tanki,
}

impl WaitType {
    pub fn fu(self) -> u8 {
        match self {
            WaitType::Ryanmen | WaitType::Shanpon => 0,
            WaitType::Kanchan | WaitType::Penchan | WaitType::Tanki => 2,
        }
    }

    pub fn is_good_wait(self) -> bool {
        matches!(self, WaitType::Ryanmen)
    }
}

/// Every wait shape the winning tile could be read as within this structure.
/// A tile can legitimately match more than one component (e.g. it completes
/// both the pair and a sequence) when the hand shape is ambiguous.
pub fn detect_wait_types(structure: &HandStructure, winning_tile: Tile) -> Vec<WaitType> {
    let mut waits = Vec::new();

    let HandStructure::Standard { groups, pair } = structure else {
        return waits;
    };

    if *pair == winning_tile {
        waits.push(WaitType::Tanki);
    }

    for group in groups {
        if group.is_triplet_or_kan() && group.tile == winning_tile {
            waits.push(WaitType::Shanpon);
            continue;
        }
        if let Some([low, mid, high]) = group.sequence_tiles() {
            if winning_tile == mid {
                waits.push(WaitType::Kanchan);
            } else if winning_tile == low {
                if low.value() == Some(7) {
                    waits.push(WaitType::Penchan);
                } else {
                    waits.push(WaitType::Ryanmen);
                }
            } else if winning_tile == high {
                if high.value() == Some(3) {
                    waits.push(WaitType::Penchan);
                } else {
                    waits.push(WaitType::Ryanmen);
                }
            }
        }
    }

    waits
}

/// The wait reading that yields the most fu, since scoring always takes the
/// most favourable consistent interpretation of an ambiguous hand.
pub fn best_wait_type(structure: &HandStructure, winning_tile: Tile) -> Option<WaitType> {
    detect_wait_types(structure, winning_tile)
        .into_iter()
        .max_by_key(|w| w.fu())
}

/// Pinfu requires: a standard hand of all sequences, a non-yakuhai pair, and
/// a genuine two-sided wait.
pub fn is_pinfu(structure: &HandStructure, winning_tile: Tile, context: &ContextInput) -> bool {
    let HandStructure::Standard { groups, pair } = structure else {
        return false;
    };
    if groups.iter().any(|g| !g.is_sequence()) {
        return false;
    }
    if pair.is_dragon() {
        return false;
    }
    if let Tile::Honor(h) = pair {
        if context.is_value_wind(*h) {
            return false;
        }
    }
    detect_wait_types(structure, winning_tile).contains(&WaitType::Ryanmen)
}
