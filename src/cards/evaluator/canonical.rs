//! Suit canonicalization, spec §3: collapses the ~47x redundant suit-labelings of a
//! non-flush 7-card hand down to one representative, so the rank map only needs one
//! entry per rank multiset rather than one per (rank multiset, suit assignment) pair.
//!
//! Two hands that differ only in *which* suit holds *how many* cards of a rank, but not
//! in the multiset of counts, are indistinguishable for a non-flush hand's strength — so
//! the canonical form is built purely from a per-rank count, never from the original
//! suits. The fixed permutation below is the identity; any permutation works as long as
//! it's applied consistently, so we take the simplest one.

use super::super::hand::Hand;
use super::super::suit::Suit;

const P: [Suit; 4] = [Suit::Club, Suit::Diamond, Suit::Heart, Suit::Spade];

/// rewrites `hand` so that, for each rank, its `count` occurrences occupy suits
/// `P[0..count]` — any two hands sharing a rank multiset map to the same value.
pub fn canonicalize(hand: &Hand) -> Hand {
    Hand::from(bits_from_counts(&hand.rank_counts()))
}

/// builds the canonical packed representation directly from a rank-count histogram,
/// skipping the round trip through a concrete `Hand` — used by the rank-map builder,
/// which only ever has counts on hand in the first place.
pub fn bits_from_counts(counts: &[u8; 13]) -> u64 {
    let mut bits: u64 = 0;
    for (r, &count) in counts.iter().enumerate() {
        for k in 0..count as usize {
            let suit = P[k];
            bits |= 1u64 << (16 * suit as u64 + r as u64);
        }
    }
    bits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::cards::rank::Rank;

    #[test]
    fn idempotent() {
        let hand: Hand = vec![
            Card::from((Rank::Ace, Suit::Club)),
            Card::from((Rank::Ace, Suit::Diamond)),
            Card::from((Rank::King, Suit::Heart)),
            Card::from((Rank::Queen, Suit::Spade)),
            Card::from((Rank::Two, Suit::Club)),
            Card::from((Rank::Three, Suit::Diamond)),
            Card::from((Rank::Four, Suit::Heart)),
        ]
        .into();
        let once = canonicalize(&hand);
        let twice = canonicalize(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn shares_key_across_suit_relabelings() {
        let a: Hand = vec![
            Card::from((Rank::Ace, Suit::Club)),
            Card::from((Rank::Ace, Suit::Diamond)),
            Card::from((Rank::King, Suit::Heart)),
        ]
        .into();
        let b: Hand = vec![
            Card::from((Rank::Ace, Suit::Spade)),
            Card::from((Rank::Ace, Suit::Heart)),
            Card::from((Rank::King, Suit::Club)),
        ]
        .into();
        assert_eq!(canonicalize(&a), canonicalize(&b));
    }

    #[test]
    fn distinguishes_different_multisets() {
        let pair_of_aces: Hand = vec![
            Card::from((Rank::Ace, Suit::Club)),
            Card::from((Rank::Ace, Suit::Diamond)),
        ]
        .into();
        let pair_of_kings: Hand = vec![
            Card::from((Rank::King, Suit::Club)),
            Card::from((Rank::King, Suit::Diamond)),
        ]
        .into();
        assert_ne!(canonicalize(&pair_of_aces), canonicalize(&pair_of_kings));
    }
}
