//! The 7-card hand-strength evaluator, spec §4. Tables are built once at startup and
//! shared by reference across every solver worker (`EvaluatorContext`, never a
//! process-wide static) — see `lib.rs` for how it's constructed and handed out.

mod builder;
mod canonical;
mod primes;
pub mod products;
mod rank_map;
mod score;

use super::hand::Hand;
use crate::error::SolverError;
use rank_map::RankMap;

pub const TABLE_SIZE: usize = 1 << 13;

/// Owns the precomputed structures a hand evaluation consults: the flush table, the
/// 5-unique-rank table, the non-flush rank map (7-card hot path), and the sorted
/// prime-product table (alternate 5-card path, and the only piece of this that the
/// `handranks.dat` wire format needs alongside the two flat tables). Construction
/// (`build`) walks every reachable hand category once; afterward lookups are O(1)
/// amortized.
pub struct Evaluator {
    flush_table: Box<[u16; TABLE_SIZE]>,
    unique5_table: Box<[u16; TABLE_SIZE]>,
    rank_map: RankMap,
    products: Vec<(u64, u16)>,
}

impl Evaluator {
    pub fn build() -> Self {
        Self {
            flush_table: builder::build_flush_table(),
            unique5_table: builder::build_unique5_table(),
            rank_map: RankMap::build(),
            products: products::build_product_table(),
        }
    }

    /// reconstructs an evaluator from the three `handranks.dat` tables plus a freshly
    /// built rank map — the rank map is large and cheap to rebuild deterministically
    /// from the flat tables' own scoring logic, so the wire format doesn't carry it
    /// (spec §6.1's table list is exactly flush_table/unique5_table/products).
    pub fn from_tables(flush_table: Box<[u16; TABLE_SIZE]>, unique5_table: Box<[u16; TABLE_SIZE]>, products: Vec<(u64, u16)>) -> Self {
        Self {
            flush_table,
            unique5_table,
            rank_map: RankMap::build(),
            products,
        }
    }

    pub fn flush_table(&self) -> &[u16; TABLE_SIZE] {
        &self.flush_table
    }
    pub fn unique5_table(&self) -> &[u16; TABLE_SIZE] {
        &self.unique5_table
    }
    pub fn products(&self) -> &[(u64, u16)] {
        &self.products
    }

    /// Recommended core algorithm (spec §4.3, steps 1-2): two table lookups, no
    /// fallback to the slower 21-subset scan. `hand` must carry exactly 7 cards — the
    /// two hole cards plus the five-card board at showdown.
    pub fn evaluate(&self, hand: &Hand) -> Result<u16, SolverError> {
        for mask in hand.suit_masks() {
            if mask.count_ones() >= 5 {
                return Ok(self.flush_table[mask as usize]);
            }
        }
        let canonical = canonical::canonicalize(hand);
        self.rank_map
            .get(canonical.bits())
            .ok_or(SolverError::RankMapMiss)
    }

    /// The alternate algorithm spec §4.3 describes: enumerate all C(7,5)=21 five-card
    /// subsets and take the best. Three to four times slower than `evaluate`; kept as a
    /// cross-check oracle for tests, not used on the solver's hot path.
    pub fn evaluate_by_subsets(&self, hand: &Hand) -> u16 {
        let cards = all_cards(hand);
        debug_assert_eq!(cards.len(), 7, "evaluate_by_subsets expects a 7-card hand");
        let mut best = 0u16;
        for subset in five_card_subsets(&cards) {
            let five: Hand = subset.to_vec().into();
            let strength = self.evaluate_five(&five);
            best = best.max(strength);
        }
        best
    }

    fn evaluate_five(&self, hand: &Hand) -> u16 {
        for mask in hand.suit_masks() {
            if mask.count_ones() >= 5 {
                return self.flush_table[mask as usize];
            }
        }
        let rank_mask = hand.rank_mask();
        if rank_mask.count_ones() == 5 {
            return self.unique5_table[rank_mask as usize];
        }
        score::score_nonflush(&hand.rank_counts(), rank_mask)
    }

    /// the same 21-subset evaluator, but scoring each non-flush/non-unique-rank subset
    /// via the sorted product table (spec §4.3's alternate algorithm and the one
    /// `handranks.dat`'s wire format actually serializes) instead of recomputing the
    /// scoring formulas directly. Exercised by tests to confirm the wire-format tables
    /// agree with the hot-path rank map.
    pub fn evaluate_by_products(&self, hand: &Hand) -> u16 {
        let cards = all_cards(hand);
        debug_assert_eq!(cards.len(), 7, "evaluate_by_products expects a 7-card hand");
        let mut best = 0u16;
        for subset in five_card_subsets(&cards) {
            let five: Hand = subset.to_vec().into();
            best = best.max(self.score_five_via_products(&five));
        }
        best
    }

    fn score_five_via_products(&self, hand: &Hand) -> u16 {
        for mask in hand.suit_masks() {
            if mask.count_ones() >= 5 {
                return self.flush_table[mask as usize];
            }
        }
        let rank_mask = hand.rank_mask();
        if rank_mask.count_ones() == 5 {
            return self.unique5_table[rank_mask as usize];
        }
        let product = primes::prime_product(&hand.rank_counts());
        products::lookup(&self.products, product).expect("every non-flush, non-unique-rank 5-card hand has a product entry")
    }
}

fn all_cards(hand: &Hand) -> Vec<super::card::Card> {
    let mut cards = Vec::with_capacity(7);
    for suit in super::suit::Suit::all() {
        let mask = hand.suit_mask(suit);
        for r in 0..13u8 {
            if mask & (1 << r) != 0 {
                cards.push(super::card::Card::from((super::rank::Rank::from(r), suit)));
            }
        }
    }
    cards
}

/// all C(7,5)=21 five-element subsets of a 7-element slice, in no particular order.
fn five_card_subsets(cards: &[super::card::Card]) -> Vec<[super::card::Card; 5]> {
    let mut out = Vec::with_capacity(21);
    let n = cards.len();
    for a in 0..n {
        for b in (a + 1)..n {
            let mut combo = [cards[0]; 5];
            let mut idx = 0;
            for (i, &c) in cards.iter().enumerate() {
                if i != a && i != b {
                    combo[idx] = c;
                    idx += 1;
                }
            }
            out.push(combo);
        }
    }
    out
}
