//! Human-readable hand notation: space-optional tile literals, and bracketed
//! meld groups for melds declared at the table.
//!
//! Tile literals follow the wire grammar from `tile::parse_tile_token`
//! (`1m`..`9m`/`p`/`s`, `5mr` for a red five, `E`/`S`/`W`/`N`/`P`/`F`/`C` for
//! honors) and need no separator between them since the grammar is
//! self-delimiting. Melds are marked with brackets around their tiles:
//! `(123m)` open chi, `(111m)` open pon, `[1111m]` closed kan (ankan),
//! `<1111m>` open kan (daiminkan), `{1111m}` added kan (kakan).

use crate::error::ScoringError;
use crate::meld::{KanKind, Meld, MeldKind};
use crate::tile::{parse_tile_token, Tile};

/// The result of parsing tile literals: the tiles themselves plus how many
/// were written as a red five.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTiles {
    pub tiles: Vec<Tile>,
    pub aka_count: u8,
}

/// Scans a run of concatenated tile literals with no separators required.
pub fn parse_tiles(input: &str) -> Result<ParsedTiles, ScoringError> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let mut tiles = Vec::new();
    let mut aka_count = 0u8;
    let mut i = 0;

    while i < chars.len() {
        let (token, consumed) = next_token(&chars, i)?;
        let (tile, is_aka) = parse_tile_token(&token)?;
        tiles.push(tile);
        if is_aka {
            aka_count += 1;
        }
        i += consumed;
    }

    Ok(ParsedTiles { tiles, aka_count })
}

/// Reads the next self-delimited tile token starting at `chars[start]`.
fn next_token(chars: &[char], start: usize) -> Result<(String, usize), ScoringError> {
    let invalid = || ScoringError::InvalidTile { token: chars[start..].iter().collect() };
    let first = *chars.get(start).ok_or_else(invalid)?;

    if first.is_ascii_digit() {
        let suit = *chars.get(start + 1).ok_or_else(invalid)?;
        if !matches!(suit, 'm' | 'p' | 's') {
            return Err(invalid());
        }
        if first == '5' && chars.get(start + 2) == Some(&'r') {
            return Ok((chars[start..start + 3].iter().collect(), 3));
        }
        return Ok((chars[start..start + 2].iter().collect(), 2));
    }

    if matches!(first, 'E' | 'S' | 'W' | 'N' | 'P' | 'F' | 'C') {
        return Ok((first.to_string(), 1));
    }

    Err(invalid())
}

fn meld_kind_from_tiles(tiles: &[Tile], bracket: char) -> Result<MeldKind, ScoringError> {
    let bracket_label = |b: char| match b {
        '[' => "ankan",
        '<' => "kan",
        '{' => "kakan",
        _ => "meld",
    };
    let invalid_count = |expected, actual| ScoringError::BadMeldArity {
        kind: bracket_label(bracket).to_string(),
        expected,
        actual,
    };

    match bracket {
        '[' | '<' | '{' => {
            if tiles.len() != 4 {
                return Err(invalid_count(4, tiles.len()));
            }
            let kind = match bracket {
                '[' => KanKind::Closed,
                '<' => KanKind::Open,
                _ => KanKind::Added,
            };
            Ok(MeldKind::Kan(kind))
        }
        '(' => {
            if tiles.len() != 3 {
                return Err(invalid_count(3, tiles.len()));
            }
            if tiles.iter().all(|&t| t == tiles[0]) {
                Ok(MeldKind::Pon)
            } else {
                Ok(MeldKind::Chi)
            }
        }
        _ => unreachable!("caller only passes a recognised bracket character"),
    }
}

/// Parses one bracketed meld group, e.g. `(123m)` or `[1111m]`.
pub fn parse_meld(input: &str) -> Result<(Meld, u8), ScoringError> {
    let chars: Vec<char> = input.chars().filter(|c| !c.is_whitespace()).collect();
    let invalid = || ScoringError::InvalidTile { token: input.to_string() };
    let open = *chars.first().ok_or_else(invalid)?;
    let close = *chars.last().ok_or_else(invalid)?;
    let expected_close = match open {
        '(' => ')',
        '[' => ']',
        '<' => '>',
        '{' => '}',
        _ => return Err(invalid()),
    };
    if close != expected_close || chars.len() < 2 {
        return Err(invalid());
    }

    let inner: String = chars[1..chars.len() - 1].iter().collect();
    let parsed = parse_tiles(&inner)?;
    let mut tiles = parsed.tiles;
    if open == '(' && tiles.len() == 3 {
        tiles.sort_by_key(|t| t.to_index());
    }
    let kind = meld_kind_from_tiles(&tiles, open)?;
    Ok((Meld { kind, tiles }, parsed.aka_count))
}

/// Parses a full hand notation string: zero or more bracketed melds followed
/// by the concealed tiles, with the winning tile as the final literal.
///
/// Example: `(1m2m3m)4p5p6p7p8p9p1s2s3sEE2m` parses a chi of 1m2m3m, concealed
/// tiles 4p5p6p7p8p9p 1s2s3s EE, and a win on 2m.
pub fn parse_hand_notation(input: &str) -> Result<(Vec<Meld>, ParsedTiles), ScoringError> {
    let mut melds = Vec::new();
    let mut rest = input;
    let mut aka_count = 0u8;

    while let Some(start) = rest.trim_start().chars().next().filter(|c| "([<{".contains(*c)) {
        let rest_trimmed = rest.trim_start();
        let close = match start {
            '(' => ')',
            '[' => ']',
            '<' => '>',
            '{' => '}',
            _ => unreachable!(),
        };
        let end = rest_trimmed
            .find(close)
            .ok_or_else(|| ScoringError::InvalidTile { token: rest_trimmed.to_string() })?;
        let (meld, meld_aka) = parse_meld(&rest_trimmed[..=end])?;
        melds.push(meld);
        aka_count += meld_aka;
        rest = &rest_trimmed[end + 1..];
    }

    let mut parsed = parse_tiles(rest)?;
    parsed.aka_count += aka_count;
    Ok((melds, parsed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tile::{Honor, Suit};

    fn m(suit: Suit, value: u8) -> Tile {
        Tile::suited(suit, value)
    }

    #[test]
    fn parses_plain_numbered_run() {
        let parsed = parse_tiles("1m2m3m").unwrap();
        assert_eq!(parsed.tiles, vec![m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 3)]);
        assert_eq!(parsed.aka_count, 0);
    }

    #[test]
    fn parses_red_five_and_honors() {
        let parsed = parse_tiles("5mrEP").unwrap();
        assert_eq!(parsed.tiles, vec![m(Suit::Man, 5), Tile::honor(Honor::East), Tile::honor(Honor::White)]);
        assert_eq!(parsed.aka_count, 1);
    }

    #[test]
    fn parses_whitespace_separated_tokens() {
        let parsed = parse_tiles("1m 2m 3m").unwrap();
        assert_eq!(parsed.tiles.len(), 3);
    }

    #[test]
    fn rejects_garbage_token() {
        assert!(parse_tiles("9z").is_err());
    }

    #[test]
    fn parses_open_chi_meld() {
        let (meld, aka) = parse_meld("(1m2m3m)").unwrap();
        assert!(matches!(meld.kind, MeldKind::Chi));
        assert_eq!(meld.tiles, vec![m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 3)]);
        assert_eq!(aka, 0);
    }

    #[test]
    fn parses_open_pon_meld() {
        let (meld, _) = parse_meld("(5p5p5p)").unwrap();
        assert!(matches!(meld.kind, MeldKind::Pon));
    }

    #[test]
    fn parses_closed_and_open_kans() {
        let (closed, _) = parse_meld("[1m1m1m1m]").unwrap();
        assert!(matches!(closed.kind, MeldKind::Kan(KanKind::Closed)));
        let (open, _) = parse_meld("<1m1m1m1m>").unwrap();
        assert!(matches!(open.kind, MeldKind::Kan(KanKind::Open)));
        let (added, _) = parse_meld("{1m1m1m1m}").unwrap();
        assert!(matches!(added.kind, MeldKind::Kan(KanKind::Added)));
    }

    #[test]
    fn parses_full_hand_notation_with_meld_and_win_tile() {
        let (melds, parsed) = parse_hand_notation("(1m2m3m)4p5p6p7p8p9p1s2s3sEE2m").unwrap();
        assert_eq!(melds.len(), 1);
        assert_eq!(parsed.tiles.last(), Some(&m(Suit::Man, 2)));
    }
}
