//! Tile model and codec: the 34 distinct tile kinds, red-five aliasing, and
//! the 0..=33 index space used by the shape validator and dora cycling.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Suit {
    Man,
    Pin,
    Sou,
}

impl Suit {
    fn index(self) -> u8 {
        match self {
            Suit::Man => 0,
            Suit::Pin => 1,
            Suit::Sou => 2,
        }
    }

    fn letter(self) -> char {
        match self {
            Suit::Man => 'm',
            Suit::Pin => 'p',
            Suit::Sou => 's',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Honor {
    East,
    South,
    West,
    North,
    White,
    Green,
    Red,
}

impl Honor {
    /// Cycle used by both yakuhai triplet checks and dora-indicator advance:
    /// winds E->S->W->N->E, dragons White->Green->Red->White. The two groups
    /// never cross over.
    pub fn next(self) -> Honor {
        match self {
            Honor::East => Honor::South,
            Honor::South => Honor::West,
            Honor::West => Honor::North,
            Honor::North => Honor::East,
            Honor::White => Honor::Green,
            Honor::Green => Honor::Red,
            Honor::Red => Honor::White,
        }
    }
}

/// One of the 34 distinct tile kinds. Red fives are represented by the same
/// `Tile` as their base five (`Tile::Suited { value: 5, .. }`); a separate
/// `aka` flag elsewhere tracks how many physical red fives were present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tile {
    Suited { suit: Suit, value: u8 },
    Honor(Honor),
}

/// All 13 terminal and honor kinds, used by the kokushi (thirteen orphans) check.
pub const KOKUSHI_TILES: [Tile; 13] = [
    Tile::Suited { suit: Suit::Man, value: 1 },
    Tile::Suited { suit: Suit::Man, value: 9 },
    Tile::Suited { suit: Suit::Pin, value: 1 },
    Tile::Suited { suit: Suit::Pin, value: 9 },
    Tile::Suited { suit: Suit::Sou, value: 1 },
    Tile::Suited { suit: Suit::Sou, value: 9 },
    Tile::Honor(Honor::East),
    Tile::Honor(Honor::South),
    Tile::Honor(Honor::West),
    Tile::Honor(Honor::North),
    Tile::Honor(Honor::White),
    Tile::Honor(Honor::Green),
    Tile::Honor(Honor::Red),
];

impl Tile {
    pub fn suited(suit: Suit, value: u8) -> Self {
        Tile::Suited { suit, value }
    }

    pub fn honor(honor: Honor) -> Self {
        Tile::Honor(honor)
    }

    pub fn is_simple(&self) -> bool {
        match self {
            Tile::Suited { value, .. } => *value >= 2 && *value <= 8,
            Tile::Honor(_) => false,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Tile::Suited { value: 1 | 9, .. })
    }

    pub fn is_honor(&self) -> bool {
        matches!(self, Tile::Honor(_))
    }

    pub fn is_terminal_or_honor(&self) -> bool {
        self.is_terminal() || self.is_honor()
    }

    pub fn is_dragon(&self) -> bool {
        matches!(self, Tile::Honor(Honor::White | Honor::Green | Honor::Red))
    }

    pub fn is_wind(&self) -> bool {
        matches!(
            self,
            Tile::Honor(Honor::East | Honor::South | Honor::West | Honor::North)
        )
    }

    /// Green-set membership for Ryuuiisou: 2s,3s,4s,6s,8s, Green dragon.
    pub fn is_green(&self) -> bool {
        match self {
            Tile::Suited { suit: Suit::Sou, value } => matches!(value, 2 | 3 | 4 | 6 | 8),
            Tile::Honor(Honor::Green) => true,
            _ => false,
        }
    }

    pub fn suit(&self) -> Option<Suit> {
        match self {
            Tile::Suited { suit, .. } => Some(*suit),
            Tile::Honor(_) => None,
        }
    }

    pub fn value(&self) -> Option<u8> {
        match self {
            Tile::Suited { value, .. } => Some(*value),
            Tile::Honor(_) => None,
        }
    }

    /// 0..=26 for numbered suits (m,p,s in that order), 27..=33 for honors
    /// (E,S,W,N,P,F,C).
    pub fn to_index(self) -> u8 {
        match self {
            Tile::Suited { suit, value } => suit.index() * 9 + (value - 1),
            Tile::Honor(h) => {
                27 + match h {
                    Honor::East => 0,
                    Honor::South => 1,
                    Honor::West => 2,
                    Honor::North => 3,
                    Honor::White => 4,
                    Honor::Green => 5,
                    Honor::Red => 6,
                }
            }
        }
    }

    pub fn from_index(index: u8) -> Option<Tile> {
        match index {
            0..=26 => {
                let suit = match index / 9 {
                    0 => Suit::Man,
                    1 => Suit::Pin,
                    _ => Suit::Sou,
                };
                Some(Tile::Suited { suit, value: (index % 9) + 1 })
            }
            27 => Some(Tile::Honor(Honor::East)),
            28 => Some(Tile::Honor(Honor::South)),
            29 => Some(Tile::Honor(Honor::West)),
            30 => Some(Tile::Honor(Honor::North)),
            31 => Some(Tile::Honor(Honor::White)),
            32 => Some(Tile::Honor(Honor::Green)),
            33 => Some(Tile::Honor(Honor::Red)),
            _ => None,
        }
    }

    /// The dora tile for this indicator: numbered tiles advance by one
    /// (wrapping 9 -> 1 within the suit); winds and dragons follow their
    /// own independent cycles (never cross-linked, per spec.md §9).
    pub fn indicator_to_dora(self) -> Tile {
        match self {
            Tile::Suited { suit, value } => {
                let next = if value == 9 { 1 } else { value + 1 };
                Tile::suited(suit, next)
            }
            Tile::Honor(h) => Tile::honor(h.next()),
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tile::Suited { suit, value } => write!(f, "{}{}", value, suit.letter()),
            Tile::Honor(h) => {
                let c = match h {
                    Honor::East => 'E',
                    Honor::South => 'S',
                    Honor::West => 'W',
                    Honor::North => 'N',
                    Honor::White => 'P',
                    Honor::Green => 'F',
                    Honor::Red => 'C',
                };
                write!(f, "{}", c)
            }
        }
    }
}

/// Parse one tile literal per the wire grammar in spec.md §6:
/// `[1-9][mps] | 5[mps]r | [ESWNPFC]`. Returns the normalised tile plus
/// whether the literal denoted a red five.
pub fn parse_tile_token(token: &str) -> Result<(Tile, bool), ScoringError> {
    let invalid = || ScoringError::InvalidTile { token: token.to_string() };

    let chars: Vec<char> = token.chars().collect();
    match chars.as_slice() {
        [c] => match c {
            'E' => Ok((Tile::honor(Honor::East), false)),
            'S' => Ok((Tile::honor(Honor::South), false)),
            'W' => Ok((Tile::honor(Honor::West), false)),
            'N' => Ok((Tile::honor(Honor::North), false)),
            'P' => Ok((Tile::honor(Honor::White), false)),
            'F' => Ok((Tile::honor(Honor::Green), false)),
            'C' => Ok((Tile::honor(Honor::Red), false)),
            _ => Err(invalid()),
        },
        [d, s] if d.is_ascii_digit() && matches!(s, 'm' | 'p' | 's') => {
            let value = d.to_digit(10).ok_or_else(invalid)? as u8;
            if !(1..=9).contains(&value) {
                return Err(invalid());
            }
            let suit = match s {
                'm' => Suit::Man,
                'p' => Suit::Pin,
                _ => Suit::Sou,
            };
            Ok((Tile::suited(suit, value), false))
        }
        [d, s, r] if *d == '5' && matches!(s, 'm' | 'p' | 's') && *r == 'r' => {
            let suit = match s {
                'm' => Suit::Man,
                'p' => Suit::Pin,
                _ => Suit::Sou,
            };
            Ok((Tile::suited(suit, 5), true))
        }
        _ => Err(invalid()),
    }
}

pub type TileCounts = HashMap<Tile, u8>;

pub fn to_counts(tiles: &[Tile]) -> TileCounts {
    let mut counts = HashMap::new();
    for &tile in tiles {
        *counts.entry(tile).or_insert(0) += 1;
    }
    counts
}
