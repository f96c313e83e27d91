//! Error taxonomy for shape validation, context validation, and scoring.

use thiserror::Error;

use crate::tile::Tile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoringError {
    #[error("invalid tile literal: {token}")]
    InvalidTile { token: String },

    #[error("{kind} meld must contain exactly {expected} tiles, got {actual}")]
    BadMeldArity {
        kind: String,
        expected: usize,
        actual: usize,
    },

    #[error("tile appears {count} times in hand, maximum is 4: {tile}")]
    BadTileMultiplicity { tile: Tile, count: u8 },

    #[error("total tile count must be {expected} (14 + number of kans), got {actual}")]
    WrongTotalTiles { expected: usize, actual: usize },

    #[error("riichi and double_riichi cannot both be true")]
    RiichiDoubleRiichiBoth,

    #[error("ippatsu cannot be true when riichi/double_riichi is false")]
    IppatsuWithoutRiichi,

    #[error("haitei cannot be true on ron")]
    HaiteiOnRon,

    #[error("houtei cannot be true on tsumo")]
    HouteiOnTsumo,

    #[error("chiihou and tenhou cannot both be true")]
    TenhouChiihouBoth,

    #[error("tenhou/chiihou require tsumo")]
    TenhouChiihouRequireTsumo,

    #[error("tenhou requires dealer")]
    TenhouRequiresDealer,

    #[error("chiihou requires non-dealer")]
    ChiihouRequiresNonDealer,

    #[error("hand is not a valid winning shape")]
    NotAWinningShape,

    #[error("no yaku: a hand cannot win on dora alone")]
    NoYaku,
}
