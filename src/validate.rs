//! Shape validation: tile multiplicity, meld arity, total tile count, and
//! whether the resulting shape can actually win.

use crate::error::ScoringError;
use crate::meld::{HandInput, MeldKind};
use crate::partition::is_winning_hand;
use crate::tile::to_counts;

fn meld_kind_label(kind: MeldKind) -> &'static str {
    match kind {
        MeldKind::Chi => "chi",
        MeldKind::Pon => "pon",
        MeldKind::Kan(crate::meld::KanKind::Open) => "kan",
        MeldKind::Kan(crate::meld::KanKind::Closed) => "ankan",
        MeldKind::Kan(crate::meld::KanKind::Added) => "kakan",
    }
}

pub fn validate_shape(hand: &HandInput) -> Result<(), ScoringError> {
    for meld in &hand.melds {
        let expected = if matches!(meld.kind, MeldKind::Kan(_)) { 4 } else { 3 };
        if meld.tiles.len() != expected {
            return Err(ScoringError::BadMeldArity {
                kind: meld_kind_label(meld.kind).to_string(),
                expected,
                actual: meld.tiles.len(),
            });
        }
    }

    let all_tiles = hand.all_tiles();
    let counts = to_counts(&all_tiles);
    for (&tile, &count) in counts.iter() {
        if count > 4 {
            return Err(ScoringError::BadTileMultiplicity { tile, count });
        }
    }

    let kan_count = hand.kan_count();
    let expected_total = 14 + kan_count;
    if all_tiles.len() != expected_total {
        return Err(ScoringError::WrongTotalTiles {
            expected: expected_total,
            actual: all_tiles.len(),
        });
    }

    if !is_winning_hand(&hand.closed_tiles, &hand.melds) {
        return Err(ScoringError::NotAWinningShape);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::meld::Meld;
    use crate::tile::{Suit, Tile};

    fn m(suit: Suit, value: u8) -> Tile {
        Tile::suited(suit, value)
    }

    fn winning_closed_tiles() -> Vec<Tile> {
        vec![
            m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 3),
            m(Suit::Man, 4), m(Suit::Man, 5), m(Suit::Man, 6),
            m(Suit::Pin, 7), m(Suit::Pin, 7), m(Suit::Pin, 7),
            m(Suit::Sou, 1), m(Suit::Sou, 2), m(Suit::Sou, 3),
            m(Suit::Sou, 9), m(Suit::Sou, 9),
        ]
    }

    #[test]
    fn accepts_valid_standard_hand() {
        let hand = HandInput { closed_tiles: winning_closed_tiles(), melds: vec![], win_tile: m(Suit::Sou, 9) };
        assert!(validate_shape(&hand).is_ok());
    }

    #[test]
    fn rejects_wrong_meld_arity() {
        let hand = HandInput {
            closed_tiles: vec![m(Suit::Man, 1); 11],
            melds: vec![Meld::chi(vec![m(Suit::Man, 2), m(Suit::Man, 3)])],
            win_tile: m(Suit::Man, 1),
        };
        assert_eq!(
            validate_shape(&hand),
            Err(ScoringError::BadMeldArity { kind: "chi".into(), expected: 3, actual: 2 })
        );
    }

    #[test]
    fn rejects_five_copies_of_a_tile() {
        let mut tiles = winning_closed_tiles();
        tiles[0] = m(Suit::Pin, 7);
        let hand = HandInput { closed_tiles: tiles, melds: vec![], win_tile: m(Suit::Sou, 9) };
        assert_eq!(
            validate_shape(&hand),
            Err(ScoringError::BadTileMultiplicity { tile: m(Suit::Pin, 7), count: 5 })
        );
    }

    #[test]
    fn rejects_wrong_total_count() {
        let mut tiles = winning_closed_tiles();
        tiles.pop();
        let hand = HandInput { closed_tiles: tiles, melds: vec![], win_tile: m(Suit::Sou, 9) };
        assert_eq!(
            validate_shape(&hand),
            Err(ScoringError::WrongTotalTiles { expected: 14, actual: 13 })
        );
    }

    #[test]
    fn rejects_non_winning_shape() {
        let hand = HandInput {
            closed_tiles: vec![m(Suit::Man, 1), m(Suit::Man, 2), m(Suit::Man, 4), m(Suit::Man, 5),
                m(Suit::Man, 7), m(Suit::Man, 8), m(Suit::Pin, 1), m(Suit::Pin, 2),
                m(Suit::Pin, 4), m(Suit::Pin, 5), m(Suit::Pin, 7), m(Suit::Pin, 8),
                m(Suit::Sou, 1), m(Suit::Sou, 3)],
            melds: vec![],
            win_tile: m(Suit::Sou, 3),
        };
        assert_eq!(validate_shape(&hand), Err(ScoringError::NotAWinningShape));
    }
}
