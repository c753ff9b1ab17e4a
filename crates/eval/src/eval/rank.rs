// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand categories and hand comparison.
use serde::{Deserialize, Serialize};
use std::{cmp::Ordering, fmt};

use phoenix_cards::Card;

/// The ace bit in a ranks mask.
const ACE_MASK: u16 = 1 << 12;

/// A poker hand category, ordered from the weakest to the strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HandRank {
    /// High card.
    HighCard = 0,
    /// One pair.
    OnePair,
    /// Two pairs.
    TwoPair,
    /// Three of a kind.
    ThreeOfAKind,
    /// Five cards in sequence.
    Straight,
    /// Five cards of the same suit.
    Flush,
    /// Three of a kind and a pair.
    FullHouse,
    /// Four of a kind.
    FourOfAKind,
    /// Five cards in sequence of the same suit.
    StraightFlush,
}

impl HandRank {
    /// Evaluates a 5, 6, or 7 cards hand.
    ///
    /// For 6 and 7 cards hands the returned rank is the rank of the best 5 cards
    /// hand that can be made from the given cards.
    ///
    /// Panics if the hand has less than 5 or more than 7 cards.
    pub fn eval(cards: &[Card]) -> HandRank {
        assert!(
            (5..=7).contains(&cards.len()),
            "hand must have 5 to 7 cards, got {}",
            cards.len()
        );

        let mut rank_counts = [0u8; 13];
        let mut suit_masks = [0u16; 4];
        let mut ranks_mask = 0u16;

        for card in cards {
            rank_counts[card.rank_bits() as usize] += 1;
            suit_masks[card.suit_bits().trailing_zeros() as usize] |= card.rank_mask();
            ranks_mask |= card.rank_mask();
        }

        // With at most 7 cards a flush excludes quads and full houses.
        if let Some(&flush) = suit_masks.iter().find(|m| m.count_ones() >= 5) {
            return if has_straight(flush) {
                HandRank::StraightFlush
            } else {
                HandRank::Flush
            };
        }

        let count_of = |n: u8| rank_counts.iter().filter(|&&c| c == n).count();
        let (quads, trips, pairs) = (count_of(4), count_of(3), count_of(2));

        if quads > 0 {
            HandRank::FourOfAKind
        } else if trips > 0 && (pairs > 0 || trips > 1) {
            HandRank::FullHouse
        } else if has_straight(ranks_mask) {
            HandRank::Straight
        } else if trips > 0 {
            HandRank::ThreeOfAKind
        } else if pairs > 1 {
            HandRank::TwoPair
        } else if pairs == 1 {
            HandRank::OnePair
        } else {
            HandRank::HighCard
        }
    }

    /// Compares two evaluated hands.
    ///
    /// Hands are compared by rank first, hands with the same rank are compared
    /// by their card ranks sorted in descending order. The second step looks at
    /// all the cards in the hands, not only at the best five, so that it doesn't
    /// always agree with kickers rules (for example two pairs with different
    /// pairs but the same high card).
    pub fn compare(
        rank_a: HandRank,
        cards_a: &[Card],
        rank_b: HandRank,
        cards_b: &[Card],
    ) -> Ordering {
        rank_a
            .cmp(&rank_b)
            .then_with(|| ranks_desc(cards_a).cmp(&ranks_desc(cards_b)))
    }

    /// The rank label.
    pub fn label(&self) -> &'static str {
        match self {
            HandRank::HighCard => "High Card",
            HandRank::OnePair => "One Pair",
            HandRank::TwoPair => "Two Pair",
            HandRank::ThreeOfAKind => "Three of a Kind",
            HandRank::Straight => "Straight",
            HandRank::Flush => "Flush",
            HandRank::FullHouse => "Full House",
            HandRank::FourOfAKind => "Four of a Kind",
            HandRank::StraightFlush => "Straight Flush",
        }
    }
}

impl fmt::Display for HandRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Checks if a ranks mask contains five consecutive ranks, ace can be low.
fn has_straight(mask: u16) -> bool {
    // Shift ranks up by one and put the low ace in bit 0.
    let m = (mask << 1) | ((mask & ACE_MASK) >> 12);
    m & (m >> 1) & (m >> 2) & (m >> 3) & (m >> 4) != 0
}

fn ranks_desc(cards: &[Card]) -> Vec<u8> {
    let mut ranks = cards.iter().map(|c| c.rank_bits()).collect::<Vec<_>>();
    ranks.sort_unstable_by(|a, b| b.cmp(a));
    ranks
}
