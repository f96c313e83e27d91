//! Human-readable formatting: Unicode mahjong glyphs or ASCII notation for
//! tiles and structures, and a short textual score report.

use crate::partition::{Group, GroupShape, HandStructure};
use crate::scoring::ScoreResult;
use crate::tile::{Honor, Suit, Tile};

/// The Unicode mahjong tile glyph, with a trailing space for spacing.
pub fn tile_to_unicode(tile: Tile) -> String {
    match tile {
        Tile::Suited { suit, value } => {
            let base = match suit {
                Suit::Man => 0x1F007,
                Suit::Pin => 0x1F019,
                Suit::Sou => 0x1F010,
            };
            let c = char::from_u32(base + (value as u32) - 1).unwrap_or('?');
            format!("{c} ")
        }
        Tile::Honor(honor) => {
            let s = match honor {
                Honor::East => "🀀 ",
                Honor::South => "🀁 ",
                Honor::West => "🀂 ",
                Honor::North => "🀃 ",
                Honor::White => "🀆 ",
                Honor::Green => "🀅 ",
                Honor::Red => "🀄︎ ",
            };
            s.to_string()
        }
    }
}

/// The ASCII notation for a tile, e.g. `1m`, `E`.
pub fn tile_to_ascii(tile: Tile) -> String {
    tile.to_string()
}

pub fn tiles_to_unicode(tiles: &[Tile]) -> String {
    tiles.iter().copied().map(tile_to_unicode).collect()
}

pub fn tiles_to_ascii(tiles: &[Tile]) -> String {
    tiles.iter().map(|t| tile_to_ascii(*t)).collect::<Vec<_>>().join(" ")
}

fn group_tiles(group: &Group) -> Vec<Tile> {
    match group.shape {
        GroupShape::Sequence => group.sequence_tiles().expect("sequence group").to_vec(),
        GroupShape::Triplet => vec![group.tile; 3],
        GroupShape::Kan(_) => vec![group.tile; 4],
    }
}

fn format_group(group: &Group, use_unicode: bool) -> String {
    let tiles = group_tiles(group);
    if use_unicode {
        tiles_to_unicode(&tiles)
    } else {
        format!("[{}]", tiles.iter().map(|t| tile_to_ascii(*t)).collect::<Vec<_>>().join(""))
    }
}

/// Formats a decomposed hand structure as bracketed groups, e.g.
/// `[123m] [456p] [789s] [111z] [99p]`.
pub fn format_structure(structure: &HandStructure, use_unicode: bool) -> String {
    match structure {
        HandStructure::SevenPairs { pairs } => pairs
            .iter()
            .map(|&t| {
                if use_unicode {
                    let uni = tile_to_unicode(t);
                    format!("{uni}{uni}")
                } else {
                    format!("[{}{}]", tile_to_ascii(t), tile_to_ascii(t))
                }
            })
            .collect::<Vec<_>>()
            .join(" "),
        HandStructure::ThirteenOrphans { pair } => {
            use crate::tile::KOKUSHI_TILES;
            KOKUSHI_TILES
                .iter()
                .map(|&t| {
                    let count = if t == *pair { 2 } else { 1 };
                    if use_unicode {
                        tile_to_unicode(t).repeat(count)
                    } else {
                        format!("[{}]", tile_to_ascii(t).repeat(count))
                    }
                })
                .collect::<Vec<_>>()
                .join(" ")
        }
        HandStructure::Standard { groups, pair } => {
            let mut parts: Vec<String> = groups.iter().map(|g| format_group(g, use_unicode)).collect();
            parts.push(if use_unicode {
                let uni = tile_to_unicode(*pair);
                format!("{uni}{uni}")
            } else {
                format!("[{}{}]", tile_to_ascii(*pair), tile_to_ascii(*pair))
            });
            parts.join(" ")
        }
    }
}

pub fn honor_name(honor: Honor) -> &'static str {
    match honor {
        Honor::East => "East",
        Honor::South => "South",
        Honor::West => "West",
        Honor::North => "North",
        Honor::White => "White Dragon",
        Honor::Green => "Green Dragon",
        Honor::Red => "Red Dragon",
    }
}

pub fn suit_name(suit: Suit) -> &'static str {
    match suit {
        Suit::Man => "Man (Characters)",
        Suit::Pin => "Pin (Dots)",
        Suit::Sou => "Sou (Bamboo)",
    }
}

/// A short human-readable score report: yaku/yakuman lines, han/fu, and the
/// payment. Intended for terminal output; `main` layers color on top.
pub fn format_score_report(result: &ScoreResult) -> String {
    let mut lines = Vec::new();

    if !result.yakuman.is_empty() {
        for hit in &result.yakuman {
            let suffix = if hit.multiplier > 1 { format!(" x{}", hit.multiplier) } else { String::new() };
            lines.push(format!("{}{suffix}", hit.name));
        }
    } else {
        for hit in &result.yaku {
            lines.push(format!("{} ({} han)", hit.name, hit.han));
        }
        lines.push(format!("{} han {} fu", result.han, result.fu));
    }

    lines.push(result.point_label.clone());

    if let Some(ron) = result.points.ron {
        lines.push(format!("Ron: {ron} points"));
    }
    if let (Some(dealer_pay), Some(non_dealer_pay)) =
        (result.points.tsumo_dealer_pay, result.points.tsumo_non_dealer_pay)
    {
        if dealer_pay == non_dealer_pay {
            lines.push(format!("Tsumo: {dealer_pay} all"));
        } else {
            lines.push(format!("Tsumo: {dealer_pay} / {non_dealer_pay}"));
        }
    }
    lines.push(format!("Total received: {}", result.payments.total_received));

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_to_unicode_matches_known_glyphs() {
        assert_eq!(tile_to_unicode(Tile::suited(Suit::Man, 1)), "🀇 ");
        assert_eq!(tile_to_unicode(Tile::honor(Honor::East)), "🀀 ");
    }

    #[test]
    fn tile_to_ascii_round_trips_notation() {
        assert_eq!(tile_to_ascii(Tile::suited(Suit::Pin, 5)), "5p");
        assert_eq!(tile_to_ascii(Tile::honor(Honor::Red)), "C");
    }
}
