//! Situational context surrounding a win: seat/round wind, riichi state,
//! dora indicators, and the rule-set knobs that gate table-specific scoring
//! variations.

use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::tile::{Honor, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinType {
    Ron,
    Tsumo,
}

/// Table rules that vary between groups and change how a hand is scored.
/// Every field defaults to the most common convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    /// Whether red fives count as dora.
    pub aka_ari: bool,
    /// Whether tanyao is allowed on an open hand.
    pub kuitan_ari: bool,
    /// Whether a second yakuman (e.g. suuankou tanki) counts double.
    pub double_yakuman_ari: bool,
    /// Whether 13+ han is scored as counted yakuman rather than sanbaiman.
    pub kazoe_yakuman_ari: bool,
    /// Fu awarded per matching round/seat wind in the pair: 2 single, 4 double.
    /// Stored as the per-match value; a double wind pair counts it twice.
    pub renpu_fu: u8,
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet {
            aka_ari: true,
            kuitan_ari: true,
            double_yakuman_ari: false,
            kazoe_yakuman_ari: true,
            renpu_fu: 2,
        }
    }
}

/// Everything about the situation of a win that isn't the hand shape itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextInput {
    pub win_type: WinType,
    pub round_wind: Honor,
    pub seat_wind: Honor,
    /// Always re-derived as `seat_wind == East` at construction time; a
    /// caller-supplied value is never trusted.
    pub is_dealer: bool,
    pub riichi: bool,
    pub double_riichi: bool,
    pub ippatsu: bool,
    pub haitei: bool,
    pub houtei: bool,
    pub rinshan: bool,
    pub chankan: bool,
    pub tenhou: bool,
    pub chiihou: bool,
    pub dora_indicators: Vec<Tile>,
    pub ura_dora_indicators: Vec<Tile>,
    pub aka_count: u8,
    pub honba: u32,
    pub kyotaku: u32,
}

impl ContextInput {
    pub fn new(win_type: WinType, round_wind: Honor, seat_wind: Honor) -> Self {
        ContextInput {
            win_type,
            round_wind,
            seat_wind,
            is_dealer: seat_wind == Honor::East,
            riichi: false,
            double_riichi: false,
            ippatsu: false,
            haitei: false,
            houtei: false,
            rinshan: false,
            chankan: false,
            tenhou: false,
            chiihou: false,
            dora_indicators: Vec::new(),
            ura_dora_indicators: Vec::new(),
            aka_count: 0,
            honba: 0,
            kyotaku: 0,
        }
    }

    pub fn riichi(mut self) -> Self {
        self.riichi = true;
        self
    }

    pub fn double_riichi(mut self) -> Self {
        self.double_riichi = true;
        self
    }

    pub fn ippatsu(mut self) -> Self {
        self.ippatsu = true;
        self
    }

    pub fn rinshan(mut self) -> Self {
        self.rinshan = true;
        self
    }

    pub fn chankan(mut self) -> Self {
        self.chankan = true;
        self
    }

    pub fn tenhou(mut self) -> Self {
        self.tenhou = true;
        self
    }

    pub fn chiihou(mut self) -> Self {
        self.chiihou = true;
        self
    }

    pub fn with_dora(mut self, indicators: Vec<Tile>) -> Self {
        self.dora_indicators = indicators;
        self
    }

    pub fn with_ura_dora(mut self, indicators: Vec<Tile>) -> Self {
        self.ura_dora_indicators = indicators;
        self
    }

    pub fn with_aka(mut self, count: u8) -> Self {
        self.aka_count = count;
        self
    }

    pub fn with_honba(mut self, honba: u32) -> Self {
        self.honba = honba;
        self
    }

    pub fn with_kyotaku(mut self, kyotaku: u32) -> Self {
        self.kyotaku = kyotaku;
        self
    }

    pub fn is_value_wind(&self, honor: Honor) -> bool {
        honor == self.round_wind || honor == self.seat_wind
    }

    /// Checks the context-only conflicts from the external interface; shape
    /// conflicts (tile multiplicity, meld arity, total count) are the shape
    /// validator's job.
    pub fn validate(&self) -> Result<(), ScoringError> {
        if self.riichi && self.double_riichi {
            return Err(ScoringError::RiichiDoubleRiichiBoth);
        }
        if self.ippatsu && !(self.riichi || self.double_riichi) {
            return Err(ScoringError::IppatsuWithoutRiichi);
        }
        if self.win_type == WinType::Ron && self.haitei {
            return Err(ScoringError::HaiteiOnRon);
        }
        if self.win_type == WinType::Tsumo && self.houtei {
            return Err(ScoringError::HouteiOnTsumo);
        }
        if self.tenhou && self.chiihou {
            return Err(ScoringError::TenhouChiihouBoth);
        }
        if (self.tenhou || self.chiihou) && self.win_type != WinType::Tsumo {
            return Err(ScoringError::TenhouChiihouRequireTsumo);
        }
        if self.tenhou && !self.is_dealer {
            return Err(ScoringError::TenhouRequiresDealer);
        }
        if self.chiihou && self.is_dealer {
            return Err(ScoringError::ChiihouRequiresNonDealer);
        }
        Ok(())
    }
}
