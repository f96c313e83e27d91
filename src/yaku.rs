//! Yaku and yakuman detection, plus dora/aka/ura counting.
//!
//! Yakuman are tested first, independent of partition (they either look at
//! the raw tile multiset or, for suuankou/suukantsu, at whichever `Standard`
//! partition satisfies them). If any fire, ordinary yaku are suppressed
//! entirely. Otherwise every partition is scored independently by
//! `detect_ordinary`, and the caller (the scoring facade) picks whichever
//! partition pays the most.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::context::{ContextInput, RuleSet, WinType};
use crate::meld::HandInput;
use crate::partition::{is_kokushi_13_wait, Group, GroupShape, HandStructure};
use crate::tile::{to_counts, Honor, Suit, Tile, TileCounts};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakuHit {
    pub name: &'static str,
    pub han: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YakumanHit {
    pub name: &'static str,
    pub multiplier: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoraBreakdown {
    pub dora: u32,
    pub aka_dora: u32,
    pub ura_dora: u32,
}

impl DoraBreakdown {
    pub fn total(&self) -> u32 {
        self.dora + self.aka_dora + self.ura_dora
    }
}

fn y(name: &'static str, han: u8) -> YakuHit {
    YakuHit { name, han }
}

fn all_tiles_counts(hand: &HandInput) -> TileCounts {
    to_counts(&hand.all_tiles())
}

/// Counts actual occurrences of dora tiles in the hand (not indicators),
/// plus ura dora (only if riichi) and aka dora, gated by the rule set.
pub fn count_dora(hand: &HandInput, context: &ContextInput, rules: &RuleSet) -> DoraBreakdown {
    let counts = all_tiles_counts(hand);
    let mut breakdown = DoraBreakdown::default();

    for &indicator in &context.dora_indicators {
        let dora = indicator.indicator_to_dora();
        breakdown.dora += *counts.get(&dora).unwrap_or(&0) as u32;
    }

    if context.riichi || context.double_riichi {
        for &indicator in &context.ura_dora_indicators {
            let dora = indicator.indicator_to_dora();
            breakdown.ura_dora += *counts.get(&dora).unwrap_or(&0) as u32;
        }
    }

    if rules.aka_ari {
        breakdown.aka_dora = context.aka_count as u32;
    }

    breakdown
}

fn chuuren_kind(hand: &HandInput) -> Option<bool> {
    if !hand.melds.is_empty() || hand.closed_tiles.len() != 14 {
        return None;
    }
    let suit = hand.closed_tiles[0].suit()?;
    if hand.closed_tiles.iter().any(|t| t.suit() != Some(suit)) {
        return None;
    }
    let mut counts = [0u8; 9];
    for t in &hand.closed_tiles {
        counts[(t.value()? - 1) as usize] += 1;
    }
    if counts[0] < 3 || counts[8] < 3 {
        return None;
    }
    if counts[1..8].iter().any(|&c| c < 1) {
        return None;
    }
    let mut base = [1u8; 9];
    base[0] = 3;
    base[8] = 3;
    let mut without_win = counts;
    without_win[(hand.win_tile.value()? - 1) as usize] -= 1;
    Some(without_win == base)
}

/// Evaluates the yakuman tier. If this returns non-empty, ordinary yaku must
/// not be evaluated at all.
pub fn detect_yakuman(
    hand: &HandInput,
    context: &ContextInput,
    rules: &RuleSet,
    structures: &[HandStructure],
) -> Vec<YakumanHit> {
    let mut hits = Vec::new();

    if context.tenhou {
        hits.push(YakumanHit { name: "天和", multiplier: 1 });
    }
    if context.chiihou {
        hits.push(YakumanHit { name: "地和", multiplier: 1 });
    }

    if structures.iter().any(|s| matches!(s, HandStructure::ThirteenOrphans { .. })) {
        let thirteen_wait = rules.double_yakuman_ari && is_kokushi_13_wait(&hand.closed_tiles_before_win());
        if thirteen_wait {
            hits.push(YakumanHit { name: "国士無双十三面待ち", multiplier: 2 });
        } else {
            hits.push(YakumanHit { name: "国士無双", multiplier: 1 });
        }
    }

    if let Some(is_pure) = chuuren_kind(hand) {
        if is_pure && rules.double_yakuman_ari {
            hits.push(YakumanHit { name: "純正九蓮宝燈", multiplier: 2 });
        } else {
            hits.push(YakumanHit { name: "九蓮宝燈", multiplier: 1 });
        }
    }

    let counts = all_tiles_counts(hand);
    let winds = [Honor::East, Honor::South, Honor::West, Honor::North];
    let wind_triplets = winds.iter().filter(|h| counts.get(&Tile::honor(**h)).copied().unwrap_or(0) >= 3).count();
    let wind_pairs = winds.iter().filter(|h| counts.get(&Tile::honor(**h)).copied().unwrap_or(0) == 2).count();
    if wind_triplets == 4 {
        let multiplier = if rules.double_yakuman_ari { 2 } else { 1 };
        hits.push(YakumanHit { name: "大四喜", multiplier });
    } else if wind_triplets == 3 && wind_pairs == 1 {
        hits.push(YakumanHit { name: "小四喜", multiplier: 1 });
    }

    let dragons = [Honor::White, Honor::Green, Honor::Red];
    if dragons.iter().all(|h| counts.get(&Tile::honor(*h)).copied().unwrap_or(0) >= 3) {
        hits.push(YakumanHit { name: "大三元", multiplier: 1 });
    }

    for structure in structures {
        if let HandStructure::Standard { groups, .. } = structure {
            let concealed_quads = groups.len() == 4
                && groups.iter().all(|g| g.is_triplet_or_kan())
                && groups.iter().all(|g| g.is_concealed(hand, context.win_type));
            if concealed_quads {
                hits.push(YakumanHit { name: "四暗刻", multiplier: 1 });
                break;
            }
        }
    }

    if hand.melds.iter().filter(|m| m.is_kan()).count() == 4 {
        hits.push(YakumanHit { name: "四槓子", multiplier: 1 });
    }

    let all_tiles = hand.all_tiles();
    if all_tiles.iter().all(|t| t.is_honor()) {
        hits.push(YakumanHit { name: "字一色", multiplier: 1 });
    }
    if all_tiles.iter().all(|t| t.is_green()) {
        hits.push(YakumanHit { name: "緑一色", multiplier: 1 });
    }
    if all_tiles.iter().all(|t| t.is_terminal()) {
        hits.push(YakumanHit { name: "清老頭", multiplier: 1 });
    }

    hits
}

fn group_has_terminal_or_honor(g: &Group) -> bool {
    match g.shape {
        GroupShape::Sequence => {
            let [low, _, high] = g.sequence_tiles().expect("sequence group");
            low.is_terminal() || high.is_terminal()
        }
        _ => g.tile.is_terminal_or_honor(),
    }
}

fn group_has_terminal_no_honor(g: &Group) -> bool {
    match g.shape {
        GroupShape::Sequence => {
            let [low, _, high] = g.sequence_tiles().expect("sequence group");
            low.is_terminal() || high.is_terminal()
        }
        _ => g.tile.is_terminal(),
    }
}

/// Evaluates the ordinary tier against one partition. The caller is
/// responsible for iterating every partition from `partition::enumerate`
/// and picking whichever scores highest.
pub fn detect_ordinary(
    structure: &HandStructure,
    hand: &HandInput,
    context: &ContextInput,
    rules: &RuleSet,
) -> Vec<YakuHit> {
    let mut hits = Vec::new();
    let all_tiles = hand.all_tiles();
    let is_closed = !hand.is_open();

    if context.double_riichi {
        hits.push(y("ダブル立直", 2));
    } else if context.riichi {
        hits.push(y("立直", 1));
    }
    if context.ippatsu {
        hits.push(y("一発", 1));
    }
    if context.haitei {
        hits.push(y("海底摸月", 1));
    }
    if context.houtei {
        hits.push(y("河底撈魚", 1));
    }
    if context.rinshan {
        hits.push(y("嶺上開花", 1));
    }
    if context.chankan {
        hits.push(y("槍槓", 1));
    }
    if context.win_type == WinType::Tsumo && is_closed {
        hits.push(y("門前清自摸和", 1));
    }

    if all_tiles.iter().all(|t| t.is_simple()) && (is_closed || rules.kuitan_ari) {
        hits.push(y("断么九", 1));
    }

    let suits_present: HashSet<Suit> = all_tiles.iter().filter_map(|t| t.suit()).collect();
    let has_honor = all_tiles.iter().any(|t| t.is_honor());
    if suits_present.len() == 1 {
        if has_honor {
            hits.push(y("混一色", if is_closed { 3 } else { 2 }));
        } else {
            hits.push(y("清一色", if is_closed { 6 } else { 5 }));
        }
    }

    if all_tiles.iter().all(|t| t.is_terminal_or_honor()) {
        hits.push(y("混老頭", 2));
    }

    match structure {
        HandStructure::SevenPairs { .. } => {
            hits.push(y("七対子", 2));
        }
        HandStructure::ThirteenOrphans { .. } => {}
        HandStructure::Standard { groups, pair } => {
            for g in groups.iter().filter(|g| g.is_triplet_or_kan()) {
                if g.tile.is_dragon() {
                    let name = match g.tile {
                        Tile::Honor(Honor::White) => "役牌 白",
                        Tile::Honor(Honor::Green) => "役牌 發",
                        Tile::Honor(Honor::Red) => "役牌 中",
                        _ => unreachable!(),
                    };
                    hits.push(y(name, 1));
                } else if let Tile::Honor(h) = g.tile {
                    if h == context.round_wind {
                        hits.push(y(round_wind_name(h), 1));
                    }
                    if h == context.seat_wind {
                        hits.push(y(seat_wind_name(h), 1));
                    }
                }
            }

            if crate::wait::is_pinfu(structure, hand.win_tile, context) {
                hits.push(y("平和", 1));
            }

            if is_closed {
                let mut seq_values: Vec<(Suit, u8)> = groups
                    .iter()
                    .filter(|g| g.is_sequence())
                    .map(|g| (g.tile.suit().unwrap(), g.tile.value().unwrap()))
                    .collect();
                seq_values.sort();
                if seq_values.windows(2).any(|w| w[0] == w[1]) {
                    hits.push(y("一盃口", 1));
                }
            }

            let seq_anchors: HashSet<(Suit, u8)> = groups
                .iter()
                .filter(|g| g.is_sequence())
                .map(|g| (g.tile.suit().unwrap(), g.tile.value().unwrap()))
                .collect();

            if (1..=7).any(|v| [Suit::Man, Suit::Pin, Suit::Sou].iter().all(|&s| seq_anchors.contains(&(s, v)))) {
                hits.push(y("三色同順", if is_closed { 2 } else { 1 }));
            }

            if [Suit::Man, Suit::Pin, Suit::Sou].iter().any(|&suit| {
                [1u8, 4, 7].iter().all(|&v| seq_anchors.contains(&(suit, v)))
            }) {
                hits.push(y("一気通貫", if is_closed { 2 } else { 1 }));
            }

            let junchan_ok = groups.iter().all(group_has_terminal_no_honor) && pair.is_terminal() && !has_honor;
            let chanta_ok = groups.iter().all(group_has_terminal_or_honor) && pair.is_terminal_or_honor();
            if junchan_ok {
                hits.push(y("純全帯么九", if is_closed { 3 } else { 2 }));
            } else if chanta_ok && has_honor {
                hits.push(y("混全帯么九", if is_closed { 2 } else { 1 }));
            }

            if groups.iter().all(|g| g.is_triplet_or_kan()) {
                hits.push(y("対々和", 2));
            }

            let triplet_anchors: HashSet<(Suit, u8)> = groups
                .iter()
                .filter(|g| g.is_triplet_or_kan())
                .filter_map(|g| g.tile.suit().zip(g.tile.value()))
                .collect();
            if (1..=9).any(|v| [Suit::Man, Suit::Pin, Suit::Sou].iter().all(|&s| triplet_anchors.contains(&(s, v)))) {
                hits.push(y("三色同刻", 2));
            }

            let concealed_triplets = groups
                .iter()
                .filter(|g| g.is_triplet_or_kan() && g.is_concealed(hand, context.win_type))
                .count();
            if concealed_triplets >= 3 {
                hits.push(y("三暗刻", 2));
            }

            let dragon_triplets = groups.iter().filter(|g| g.is_triplet_or_kan() && g.tile.is_dragon()).count();
            if dragon_triplets == 2 && pair.is_dragon() {
                hits.push(y("小三元", 2));
            }

            if groups.iter().filter(|g| g.is_kan()).count() == 3 {
                hits.push(y("三槓子", 2));
            }
        }
    }

    hits
}

fn round_wind_name(h: Honor) -> &'static str {
    match h {
        Honor::East => "場風 東",
        Honor::South => "場風 南",
        Honor::West => "場風 西",
        Honor::North => "場風 北",
        _ => unreachable!(),
    }
}

fn seat_wind_name(h: Honor) -> &'static str {
    match h {
        Honor::East => "自風 東",
        Honor::South => "自風 南",
        Honor::West => "自風 西",
        Honor::North => "自風 北",
        _ => unreachable!(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meld::Meld;
    use crate::partition::enumerate;
    use crate::tile::Suit;

    fn m(suit: Suit, value: u8) -> Tile {
        Tile::suited(suit, value)
    }

    #[test]
    fn yakuman_suppresses_ordinary_detection_at_facade_level() {
        // The suppression itself lives in the scoring facade; here we just
        // confirm a hand with no open melds and all honors is correctly
        // flagged both ways so the facade has something to suppress.
        let tiles = vec![
            Tile::honor(Honor::East), Tile::honor(Honor::East), Tile::honor(Honor::East),
            Tile::honor(Honor::South), Tile::honor(Honor::South), Tile::honor(Honor::South),
            Tile::honor(Honor::West), Tile::honor(Honor::West), Tile::honor(Honor::West),
            Tile::honor(Honor::North), Tile::honor(Honor::North), Tile::honor(Honor::North),
            Tile::honor(Honor::White), Tile::honor(Honor::White),
        ];
        let hand = HandInput { closed_tiles: tiles, melds: vec![], win_tile: Tile::honor(Honor::White) };
        let ctx = ContextInput::new(WinType::Tsumo, Honor::East, Honor::East);
        let rules = RuleSet::default();
        let structures = enumerate(&hand.closed_tiles, &hand.melds);
        let yakuman = detect_yakuman(&hand, &ctx, &rules, &structures);
        assert!(yakuman.iter().any(|h| h.name == "大四喜"));
        assert!(yakuman.iter().any(|h| h.name == "字一色"));
    }

    #[test]
    fn tanyao_requires_kuitan_ari_when_open() {
        let tiles = vec![
            m(Suit::Man, 2), m(Suit::Man, 3), m(Suit::Man, 4),
            m(Suit::Pin, 2), m(Suit::Pin, 2),
            m(Suit::Sou, 3), m(Suit::Sou, 4), m(Suit::Sou, 5),
        ];
        let hand = HandInput {
            closed_tiles: tiles,
            melds: vec![Meld::pon(m(Suit::Pin, 6))],
            win_tile: m(Suit::Sou, 3),
        };
        let ctx = ContextInput::new(WinType::Ron, Honor::East, Honor::East);
        let structures = enumerate(&hand.closed_tiles, &hand.melds);
        let standard = structures.iter().find(|s| matches!(s, HandStructure::Standard { .. })).unwrap();

        let closed_rules = RuleSet { kuitan_ari: false, ..RuleSet::default() };
        let hits = detect_ordinary(standard, &hand, &ctx, &closed_rules);
        assert!(!hits.iter().any(|h| h.name == "断么九"));

        let open_rules = RuleSet { kuitan_ari: true, ..RuleSet::default() };
        let hits = detect_ordinary(standard, &hand, &ctx, &open_rules);
        assert!(hits.iter().any(|h| h.name == "断么九"));
    }

    #[test]
    fn double_east_gives_both_round_and_seat_wind_yaku() {
        let tiles = vec![
            Tile::honor(Honor::East), Tile::honor(Honor::East), Tile::honor(Honor::East),
            m(Suit::Man, 2), m(Suit::Man, 3), m(Suit::Man, 4),
            m(Suit::Pin, 2), m(Suit::Pin, 3), m(Suit::Pin, 4),
            m(Suit::Sou, 2), m(Suit::Sou, 3), m(Suit::Sou, 4),
            m(Suit::Sou, 9), m(Suit::Sou, 9),
        ];
        let hand = HandInput { closed_tiles: tiles, melds: vec![], win_tile: m(Suit::Sou, 9) };
        let ctx = ContextInput::new(WinType::Ron, Honor::East, Honor::East);
        let rules = RuleSet::default();
        let structures = enumerate(&hand.closed_tiles, &hand.melds);
        let standard = structures.iter().find(|s| matches!(s, HandStructure::Standard { .. })).unwrap();
        let hits = detect_ordinary(standard, &hand, &ctx, &rules);
        assert!(hits.iter().any(|h| h.name == "場風 東"));
        assert!(hits.iter().any(|h| h.name == "自風 東"));
    }

    #[test]
    fn sanankou_survives_a_ron_tile_that_could_also_complete_a_sequence() {
        // 555p has a 4th copy spent on the 567p sequence, so the ron on 5p
        // is read as completing the sequence, leaving all three triplets
        // (555p, 111m, 999s) genuinely concealed.
        let tiles = vec![
            m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 5),
            m(Suit::Pin, 6), m(Suit::Pin, 7),
            m(Suit::Man, 1), m(Suit::Man, 1), m(Suit::Man, 1),
            m(Suit::Sou, 9), m(Suit::Sou, 9), m(Suit::Sou, 9),
            Tile::honor(Honor::East), Tile::honor(Honor::East),
        ];
        let hand = HandInput { closed_tiles: tiles, melds: vec![], win_tile: m(Suit::Pin, 5) };
        let ctx = ContextInput::new(WinType::Ron, Honor::South, Honor::South);
        let rules = RuleSet::default();
        let structures = enumerate(&hand.closed_tiles, &hand.melds);
        let standard = structures
            .iter()
            .find(|s| matches!(s, HandStructure::Standard { groups, .. } if groups.len() == 4))
            .expect("a 4-group standard decomposition");
        let hits = detect_ordinary(standard, &hand, &ctx, &rules);
        assert!(hits.iter().any(|h| h.name == "三暗刻"));
    }

    #[test]
    fn no_yaku_when_only_dora_present() {
        let tiles = vec![
            m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 3),
            m(Suit::Man, 4), m(Suit::Man, 5), m(Suit::Man, 6),
            m(Suit::Pin, 7), m(Suit::Pin, 7), m(Suit::Pin, 7),
            m(Suit::Sou, 1), m(Suit::Sou, 2), m(Suit::Sou, 3),
            m(Suit::Sou, 9), m(Suit::Sou, 9),
        ];
        let hand = HandInput { closed_tiles: tiles, melds: vec![], win_tile: m(Suit::Sou, 9) };
        let ctx = ContextInput::new(WinType::Ron, Honor::South, Honor::South);
        let rules = RuleSet::default();
        let structures = enumerate(&hand.closed_tiles, &hand.melds);
        let standard = structures.iter().find(|s| matches!(s, HandStructure::Standard { .. })).unwrap();
        let hits = detect_ordinary(standard, &hand, &ctx, &rules);
        assert!(hits.is_empty());
    }
}
