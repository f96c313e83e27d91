//! Han/fu to points conversion, limit labels, and the engine facade that
//! wires together every earlier stage into a single `score` call.

use serde::{Deserialize, Serialize};

use crate::context::{ContextInput, RuleSet, WinType};
use crate::error::ScoringError;
use crate::fu::{calculate_fu, FuBreakdown, FuResult};
use crate::meld::HandInput;
use crate::partition::{enumerate, HandStructure};
use crate::validate::validate_shape;
use crate::wait::is_pinfu;
use crate::yaku::{count_dora, detect_ordinary, detect_yakuman, DoraBreakdown, YakuHit};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Points {
    pub ron: Option<u32>,
    pub tsumo_dealer_pay: Option<u32>,
    pub tsumo_non_dealer_pay: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payments {
    pub hand_points_received: u32,
    pub hand_points_with_honba: u32,
    pub honba_bonus: u32,
    pub kyotaku_bonus: u32,
    pub total_received: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub han: u32,
    pub fu: u16,
    pub yaku: Vec<YakuHit>,
    pub yakuman: Vec<crate::yaku::YakumanHit>,
    pub dora: DoraBreakdown,
    pub point_label: String,
    pub points: Points,
    pub payments: Payments,
    pub fu_breakdown: FuBreakdown,
    pub explanation: Vec<String>,
}

fn round_up_to_100(value: u32) -> u32 {
    value.div_ceil(100) * 100
}

fn point_label_from_han_fu(han: u32, fu: u16, rules: &RuleSet) -> &'static str {
    if han >= 13 && rules.kazoe_yakuman_ari {
        return "数え役満";
    }
    if han >= 11 {
        return "三倍満";
    }
    if han >= 8 {
        return "倍満";
    }
    if han >= 6 {
        return "跳満";
    }
    if han == 5 || (han == 4 && fu >= 40) || (han == 3 && fu >= 70) {
        return "満貫";
    }
    "通常"
}

fn base_points(han: u32, fu: u16, rules: &RuleSet) -> u32 {
    match point_label_from_han_fu(han, fu, rules) {
        "満貫" => 2000,
        "跳満" => 3000,
        "倍満" => 4000,
        "三倍満" => 6000,
        "数え役満" => 8000,
        _ => fu as u32 * 2u32.pow(han + 2),
    }
}

fn yakuman_label(total_multiplier: u8) -> String {
    match total_multiplier {
        1 => "役満".to_string(),
        2 => "ダブル役満".to_string(),
        3 => "トリプル役満".to_string(),
        n => format!("{n}倍役満"),
    }
}

fn calc_points(context: &ContextInput, base: u32) -> (Points, Payments) {
    let honba_bonus = context.honba * 300;
    let kyotaku_bonus = context.kyotaku * 1000;

    if context.win_type == WinType::Ron {
        let multiplier = if context.is_dealer { 6 } else { 4 };
        let received = round_up_to_100(base * multiplier);
        let with_honba = received + honba_bonus;
        let total = with_honba + kyotaku_bonus;
        return (
            Points { ron: Some(received), ..Default::default() },
            Payments {
                hand_points_received: received,
                hand_points_with_honba: with_honba,
                honba_bonus,
                kyotaku_bonus,
                total_received: total,
            },
        );
    }

    if context.is_dealer {
        let each = round_up_to_100(base * 2);
        let received = each * 3;
        let with_honba = received + honba_bonus;
        let total = with_honba + kyotaku_bonus;
        return (
            Points { tsumo_dealer_pay: Some(each), tsumo_non_dealer_pay: Some(each), ..Default::default() },
            Payments {
                hand_points_received: received,
                hand_points_with_honba: with_honba,
                honba_bonus,
                kyotaku_bonus,
                total_received: total,
            },
        );
    }

    let pay_dealer = round_up_to_100(base * 2);
    let pay_non_dealer = round_up_to_100(base);
    let received = pay_dealer + pay_non_dealer * 2;
    let with_honba = received + honba_bonus;
    let total = with_honba + kyotaku_bonus;
    (
        Points { tsumo_dealer_pay: Some(pay_dealer), tsumo_non_dealer_pay: Some(pay_non_dealer), ..Default::default() },
        Payments {
            hand_points_received: received,
            hand_points_with_honba: with_honba,
            honba_bonus,
            kyotaku_bonus,
            total_received: total,
        },
    )
}

/// One partition's worth of yaku, fu and payment, used to pick the best
/// of several ambiguous decompositions of the same hand.
struct Candidate {
    han: u32,
    fu: u16,
    yaku: Vec<YakuHit>,
    fu_result: FuResult,
}

fn score_candidate(
    structure: &HandStructure,
    hand: &HandInput,
    context: &ContextInput,
    rules: &RuleSet,
    dora_han: u32,
) -> Candidate {
    let has_pinfu = is_pinfu(structure, hand.win_tile, context);
    let yaku = detect_ordinary(structure, hand, context, rules);
    let fu_result = calculate_fu(structure, hand, context, rules, has_pinfu);
    let yaku_han: u32 = yaku.iter().map(|h| h.han as u32).sum();
    Candidate { han: yaku_han + dora_han, fu: fu_result.total, yaku, fu_result }
}

fn candidate_value(candidate: &Candidate, context: &ContextInput, rules: &RuleSet) -> u32 {
    let base = base_points(candidate.han, candidate.fu, rules);
    calc_points(context, base).1.total_received
}

/// Runs every stage of the engine: validation, yakuman detection, partition
/// enumeration, per-partition yaku/fu scoring, best-partition selection,
/// dora counting, limits, and payment calculation.
pub fn score(hand: &HandInput, context: &ContextInput, rules: &RuleSet) -> Result<ScoreResult, ScoringError> {
    validate_shape(hand)?;
    context.validate()?;

    let structures = enumerate(&hand.closed_tiles, &hand.melds);
    let dora_breakdown = count_dora(hand, context, rules);
    let dora_han = dora_breakdown.total();

    let yakuman_hits = detect_yakuman(hand, context, rules, &structures);
    if !yakuman_hits.is_empty() {
        let total_multiplier: u32 = yakuman_hits.iter().map(|h| h.multiplier as u32).sum();
        let han = 13 * total_multiplier;
        let base = 8000 * total_multiplier;
        let (points, payments) = calc_points(context, base);
        return Ok(ScoreResult {
            han,
            fu: 0,
            yaku: Vec::new(),
            yakuman: yakuman_hits,
            dora: dora_breakdown,
            point_label: yakuman_label(total_multiplier as u8),
            points,
            payments,
            fu_breakdown: FuBreakdown::default(),
            explanation: vec!["Yakuman hand: ordinary yaku and dora are not added.".to_string()],
        });
    }

    let candidates: Vec<Candidate> = structures
        .iter()
        .filter(|s| !matches!(s, HandStructure::ThirteenOrphans { .. }))
        .map(|s| score_candidate(s, hand, context, rules, dora_han))
        .collect();

    let best = candidates
        .into_iter()
        .max_by_key(|c| (candidate_value(c, context, rules), c.han, c.fu))
        .ok_or(ScoringError::NotAWinningShape)?;

    if best.han == dora_han {
        return Err(ScoringError::NoYaku);
    }

    let mut yaku = best.yaku;
    if dora_breakdown.dora > 0 {
        yaku.push(YakuHit { name: "ドラ", han: dora_breakdown.dora as u8 });
    }
    if dora_breakdown.aka_dora > 0 {
        yaku.push(YakuHit { name: "赤ドラ", han: dora_breakdown.aka_dora as u8 });
    }
    if dora_breakdown.ura_dora > 0 {
        yaku.push(YakuHit { name: "裏ドラ", han: dora_breakdown.ura_dora as u8 });
    }

    let point_label = point_label_from_han_fu(best.han, best.fu, rules).to_string();
    let base = base_points(best.han, best.fu, rules);
    let (points, payments) = calc_points(context, base);

    Ok(ScoreResult {
        han: best.han,
        fu: best.fu,
        yaku,
        yakuman: Vec::new(),
        dora: dora_breakdown,
        point_label,
        points,
        payments,
        fu_breakdown: best.fu_result.breakdown,
        explanation: vec![format!(
            "{} han, {} fu, {} points.",
            best.han, best.fu, payments.total_received
        )],
    })
}
