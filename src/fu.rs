//! Fu (minipoints) calculation: wait-sensitive and meld-sensitive, rounded
//! up to the next multiple of 10.

use serde::{Deserialize, Serialize};

use crate::context::{ContextInput, RuleSet, WinType};
use crate::meld::HandInput;
use crate::partition::{Group, HandStructure};
use crate::tile::Tile;
use crate::wait::best_wait_type;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuBreakdown {
    pub base: u16,
    pub menzen_ron: u16,
    pub tsumo: u16,
    pub groups: u16,
    pub pair: u16,
    pub wait: u16,
    pub raw_total: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuResult {
    pub total: u16,
    pub breakdown: FuBreakdown,
}

pub fn round_up_to_10(value: u16) -> u16 {
    value.div_ceil(10) * 10
}

pub fn calculate_fu(
    structure: &HandStructure,
    hand: &HandInput,
    context: &ContextInput,
    rules: &RuleSet,
    has_pinfu: bool,
) -> FuResult {
    match structure {
        HandStructure::SevenPairs { .. } => FuResult {
            total: 25,
            breakdown: FuBreakdown { base: 25, raw_total: 25, ..Default::default() },
        },
        HandStructure::ThirteenOrphans { .. } => {
            FuResult { total: 0, breakdown: FuBreakdown::default() }
        }
        HandStructure::Standard { groups, pair } => {
            if has_pinfu && context.win_type == WinType::Tsumo {
                return FuResult {
                    total: 20,
                    breakdown: FuBreakdown { base: 20, raw_total: 20, ..Default::default() },
                };
            }
            calculate_standard_fu(groups, *pair, hand, context, rules, has_pinfu)
        }
    }
}

fn calculate_standard_fu(
    groups: &[Group],
    pair: Tile,
    hand: &HandInput,
    context: &ContextInput,
    rules: &RuleSet,
    has_pinfu: bool,
) -> FuResult {
    let base = 20u16;
    let menzen_ron = if context.win_type == WinType::Ron && !hand.is_open() { 10 } else { 0 };
    let tsumo = if context.win_type == WinType::Tsumo && !has_pinfu { 2 } else { 0 };
    let pair_fu_value = pair_fu(pair, context, rules);
    let groups_fu: u16 = groups.iter().map(|g| group_fu(g, hand, context.win_type)).sum();

    let structure = HandStructure::Standard { groups: groups.to_vec(), pair };
    let wait_fu = if has_pinfu {
        0
    } else {
        best_wait_type(&structure, hand.win_tile).map(|w| w.fu() as u16).unwrap_or(0)
    };

    let raw_total = base + menzen_ron + tsumo + pair_fu_value + groups_fu + wait_fu;
    let total = round_up_to_10(raw_total);

    FuResult {
        total,
        breakdown: FuBreakdown {
            base,
            menzen_ron,
            tsumo,
            groups: groups_fu,
            pair: pair_fu_value,
            wait: wait_fu,
            raw_total,
        },
    }
}

fn pair_fu(pair: Tile, context: &ContextInput, rules: &RuleSet) -> u16 {
    if pair.is_dragon() {
        return 2;
    }
    if let Tile::Honor(h) = pair {
        let is_round = h == context.round_wind;
        let is_seat = h == context.seat_wind;
        if is_round && is_seat {
            return rules.renpu_fu as u16;
        }
        if is_round || is_seat {
            return 2;
        }
    }
    0
}

fn group_fu(group: &Group, hand: &HandInput, win_type: WinType) -> u16 {
    if group.is_sequence() {
        return 0;
    }
    let terminal_or_honor = group.tile.is_terminal_or_honor();
    let open = !group.is_concealed(hand, win_type);
    let value = if group.is_kan() {
        if open { 8 } else { 16 }
    } else if open {
        2
    } else {
        4
    };
    if terminal_or_honor {
        value * 2
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ContextInput;
    use crate::partition::{GroupOrigin, GroupShape};
    use crate::tile::{Honor, Suit};

    fn m(suit: Suit, value: u8) -> Tile {
        Tile::suited(suit, value)
    }

    fn seq(low: Tile) -> Group {
        Group { shape: GroupShape::Sequence, tile: low, origin: GroupOrigin::Closed }
    }

    fn closed_triplet(tile: Tile) -> Group {
        Group { shape: GroupShape::Triplet, tile, origin: GroupOrigin::Closed }
    }

    fn hand_with(closed_tiles: Vec<Tile>, win_tile: Tile) -> HandInput {
        HandInput { closed_tiles, melds: vec![], win_tile }
    }

    #[test]
    fn chiitoitsu_is_flat_25() {
        let structure = HandStructure::SevenPairs { pairs: vec![] };
        let hand = HandInput { closed_tiles: vec![], melds: vec![], win_tile: m(Suit::Man, 1) };
        let ctx = ContextInput::new(crate::context::WinType::Ron, Honor::East, Honor::East);
        let rules = RuleSet::default();
        let result = calculate_fu(&structure, &hand, &ctx, &rules, false);
        assert_eq!(result.total, 25);
    }

    #[test]
    fn pinfu_tsumo_is_flat_20() {
        let structure = HandStructure::Standard {
            groups: vec![seq(m(Suit::Man, 1)), seq(m(Suit::Pin, 1)), seq(m(Suit::Sou, 1)), seq(m(Suit::Sou, 5))],
            pair: m(Suit::Pin, 9),
        };
        let hand = HandInput { closed_tiles: vec![], melds: vec![], win_tile: m(Suit::Man, 1) };
        let ctx = ContextInput::new(crate::context::WinType::Tsumo, Honor::East, Honor::East);
        let rules = RuleSet::default();
        let result = calculate_fu(&structure, &hand, &ctx, &rules, true);
        assert_eq!(result.total, 20);
    }

    #[test]
    fn menzen_ron_adds_ten() {
        let structure = HandStructure::Standard {
            groups: vec![seq(m(Suit::Man, 1)), seq(m(Suit::Pin, 1)), seq(m(Suit::Sou, 1)), seq(m(Suit::Sou, 5))],
            pair: m(Suit::Pin, 9),
        };
        let hand = HandInput { closed_tiles: vec![], melds: vec![], win_tile: m(Suit::Man, 3) };
        let ctx = ContextInput::new(crate::context::WinType::Ron, Honor::East, Honor::East);
        let rules = RuleSet::default();
        let result = calculate_fu(&structure, &hand, &ctx, &rules, false);
        assert_eq!(result.breakdown.menzen_ron, 10);
        assert_eq!(result.total, round_up_to_10(20 + 10 + result.breakdown.wait));
    }

    #[test]
    fn open_kan_terminal_is_sixteen() {
        let group = Group { shape: GroupShape::Kan(crate::meld::KanKind::Open), tile: m(Suit::Man, 1), origin: GroupOrigin::Called };
        let hand = hand_with(vec![m(Suit::Sou, 1)], m(Suit::Sou, 1));
        assert_eq!(group_fu(&group, &hand, crate::context::WinType::Ron), 16);
    }

    #[test]
    fn closed_kan_terminal_is_thirtytwo() {
        let group = Group { shape: GroupShape::Kan(crate::meld::KanKind::Closed), tile: m(Suit::Man, 1), origin: GroupOrigin::Closed };
        let hand = hand_with(vec![m(Suit::Sou, 1)], m(Suit::Sou, 1));
        assert_eq!(group_fu(&group, &hand, crate::context::WinType::Ron), 32);
    }

    #[test]
    fn shanpon_ron_downgrades_triplet_to_minkou() {
        // Only 2 copies of 5p before the win: the ron tile itself is the one
        // that completed the triplet, so it prices as a minkou (2 fu).
        let group = closed_triplet(m(Suit::Pin, 5));
        let hand = hand_with(vec![m(Suit::Pin, 5), m(Suit::Pin, 5)], m(Suit::Pin, 5));
        assert_eq!(group_fu(&group, &hand, crate::context::WinType::Ron), 2);
    }

    #[test]
    fn tsumo_never_downgrades_a_closed_triplet() {
        let group = closed_triplet(m(Suit::Pin, 5));
        let hand = hand_with(vec![m(Suit::Pin, 5), m(Suit::Pin, 5)], m(Suit::Pin, 5));
        assert_eq!(group_fu(&group, &hand, crate::context::WinType::Tsumo), 4);
    }

    #[test]
    fn ron_completing_a_sequence_leaves_the_matching_triplet_a_genuine_ankou() {
        // 555p5p6p7p... won by ron on 5p: 3 copies of 5p were already in
        // hand before the win (the 4th went into the 567p sequence), so the
        // winning tile is read as completing the sequence, not the triplet.
        let group = closed_triplet(m(Suit::Pin, 5));
        let hand = hand_with(
            vec![m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 5), m(Suit::Pin, 6), m(Suit::Pin, 7)],
            m(Suit::Pin, 5),
        );
        assert_eq!(group_fu(&group, &hand, crate::context::WinType::Ron), 4);
    }

    #[test]
    fn double_wind_pair_uses_rule_set_value() {
        let ctx = ContextInput::new(crate::context::WinType::Ron, Honor::East, Honor::East);
        let rules = RuleSet { renpu_fu: 4, ..RuleSet::default() };
        assert_eq!(pair_fu(Tile::honor(Honor::East), &ctx, &rules), 4);
    }

    #[test]
    fn called_pon_of_a_simple_tile_is_two_fu() {
        let group = Group { shape: GroupShape::Triplet, tile: m(Suit::Pin, 5), origin: GroupOrigin::Called };
        let hand = hand_with(vec![m(Suit::Man, 1)], m(Suit::Man, 1));
        assert_eq!(group_fu(&group, &hand, crate::context::WinType::Ron), 2);
    }
}
