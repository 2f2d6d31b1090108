//! Open-addressed infoset store, spec §4.5 "Infoset storage" and spec §9's explicit
//! symmetry note: the same "hash + linear probe + zero-is-empty" discipline as
//! `cards::evaluator::rank_map::RankMap`, but mutable and growable rather than built
//! once from an exhaustive enumeration.

use super::action::Action;
use crate::cards::Street;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Tuple key of spec §3 "Information Set": board (restricted to the cards visible at
/// this node's street), street, acting player, and the action history on the *current*
/// street. Pot/bet scalars are quantized to two decimal places of a big blind so that
/// floating noise never splits what should be one infoset.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InfosetKey {
    pub board: u64,
    pub street: Street,
    pub acting: u8,
    pub history: Vec<Action>,
    pub pot_cents: i64,
    pub bet_cents: i64,
}

/// Per-infoset regret vector, strategy-sum vector, and visit count (spec §3
/// "Information-Set Data"). Both vectors are sized to the infoset's legal-action count
/// at creation time; every node sharing a key has the same legal action set by
/// construction of the betting tree.
#[derive(Debug, Clone)]
pub struct InfosetData {
    pub regret: Vec<f64>,
    pub strategy_sum: Vec<f64>,
    pub visits: u64,
}

impl InfosetData {
    fn new(n_actions: usize) -> Self {
        Self {
            regret: vec![0.0; n_actions],
            strategy_sum: vec![0.0; n_actions],
            visits: 0,
        }
    }

    /// regret-matching (spec §4.5 "Regret matching"): positive-regret-normalized
    /// distribution, falling back to uniform when every regret is non-positive.
    pub fn current_strategy(&self) -> Vec<f64> {
        regret_match(&self.regret)
    }

    /// final strategy extraction (spec §4.5 "Strategy extraction"): the normalized
    /// strategy-sum, uniform if the sum is exactly zero (never visited with positive
    /// reach).
    pub fn average_strategy(&self) -> Vec<f64> {
        normalize_nonnegative(&self.strategy_sum)
    }
}

/// regret-matching: positive part of each regret, normalized; uniform if all are ≤ 0.
pub fn regret_match(regret: &[f64]) -> Vec<f64> {
    let positive: Vec<f64> = regret.iter().map(|&r| r.max(0.0)).collect();
    normalize_nonnegative(&positive)
}

fn normalize_nonnegative(values: &[f64]) -> Vec<f64> {
    let sum: f64 = values.iter().sum();
    let n = values.len();
    if sum > 0.0 {
        values.iter().map(|&v| v / sum).collect()
    } else {
        vec![1.0 / n as f64; n]
    }
}

struct Slot {
    hash: u64, // 0 marks an empty slot
    key: InfosetKey,
    data: InfosetData,
}

const INITIAL_CAPACITY: usize = 1 << 16;
const MAX_CAPACITY: usize = 1 << 22;
const LOAD_FACTOR_LIMIT: f64 = 0.7;

pub struct InfosetStore {
    slots: Vec<Option<Slot>>,
    capacity: usize,
    len: usize,
    at_cap: bool,
    warned_full: bool,
}

impl InfosetStore {
    pub fn new() -> Self {
        Self {
            slots: (0..INITIAL_CAPACITY).map(|_| None).collect(),
            capacity: INITIAL_CAPACITY,
            len: 0,
            at_cap: false,
            warned_full: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    fn hash_of(key: &InfosetKey) -> u64 {
        let mut hasher = DefaultHasher::new();
        key.hash(&mut hasher);
        match hasher.finish() {
            0 => 1, // zero is reserved for "empty"; rehash to a nonzero sentinel
            h => h,
        }
    }

    fn home(hash: u64, capacity: usize) -> usize {
        (hash as usize) % capacity
    }

    /// finds or inserts the infoset for `key`, growing the table on load-factor breach
    /// up to `MAX_CAPACITY`. Returns `None` only when the table is at capacity and full
    /// (spec §7 "Infoset table full at cap": non-fatal, caller falls back to uniform
    /// strategy for that node).
    pub fn get_or_create(&mut self, key: &InfosetKey, n_actions: usize) -> Option<&mut InfosetData> {
        if !self.at_cap && (self.len + 1) as f64 > self.capacity as f64 * LOAD_FACTOR_LIMIT {
            self.grow();
        }
        let hash = Self::hash_of(key);
        let mut idx = Self::home(hash, self.capacity);
        for _ in 0..self.capacity {
            match &self.slots[idx] {
                None => {
                    self.slots[idx] = Some(Slot {
                        hash,
                        key: key.clone(),
                        data: InfosetData::new(n_actions),
                    });
                    self.len += 1;
                    return self.slots[idx].as_mut().map(|s| &mut s.data);
                }
                Some(slot) if slot.hash == hash && &slot.key == key => {
                    return self.slots[idx].as_mut().map(|s| &mut s.data);
                }
                _ => idx = (idx + 1) % self.capacity,
            }
        }
        if !self.warned_full {
            log::warn!("infoset table full at capacity {}; falling back to uniform strategy for new nodes", self.capacity);
            self.warned_full = true;
        }
        None
    }

    pub fn get(&self, key: &InfosetKey) -> Option<&InfosetData> {
        let hash = Self::hash_of(key);
        let mut idx = Self::home(hash, self.capacity);
        for _ in 0..self.capacity {
            match &self.slots[idx] {
                None => return None,
                Some(slot) if slot.hash == hash && &slot.key == key => return Some(&slot.data),
                _ => idx = (idx + 1) % self.capacity,
            }
        }
        None
    }

    fn grow(&mut self) {
        let new_capacity = (self.capacity * 2).min(MAX_CAPACITY);
        if new_capacity == self.capacity {
            self.at_cap = true;
            return;
        }
        let old = std::mem::replace(&mut self.slots, (0..new_capacity).map(|_| None).collect());
        self.capacity = new_capacity;
        self.len = 0;
        for slot in old.into_iter().flatten() {
            let mut idx = Self::home(slot.hash, self.capacity);
            loop {
                if self.slots[idx].is_none() {
                    self.slots[idx] = Some(slot);
                    self.len += 1;
                    break;
                }
                idx = (idx + 1) % self.capacity;
            }
        }
    }
}

impl Default for InfosetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(tag: i64) -> InfosetKey {
        InfosetKey {
            board: 0,
            street: Street::Flop,
            acting: 0,
            history: Vec::new(),
            pot_cents: tag,
            bet_cents: 0,
        }
    }

    #[test]
    fn regret_matching_uniform_when_nonpositive() {
        let strategy = regret_match(&[-1.0, -2.0, 0.0]);
        assert!(strategy.iter().all(|&p| (p - 1.0 / 3.0).abs() < 1e-12));
    }

    #[test]
    fn regret_matching_normalizes_positive_part() {
        let strategy = regret_match(&[3.0, 1.0, -5.0]);
        assert!((strategy[0] - 0.75).abs() < 1e-12);
        assert!((strategy[1] - 0.25).abs() < 1e-12);
        assert!((strategy[2] - 0.0).abs() < 1e-12);
        let sum: f64 = strategy.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn get_or_create_is_idempotent() {
        let mut store = InfosetStore::new();
        let k = key(1);
        store.get_or_create(&k, 3).unwrap().visits = 5;
        assert_eq!(store.get_or_create(&k, 3).unwrap().visits, 5);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_entries() {
        let mut store = InfosetStore::new();
        store.get_or_create(&key(1), 2).unwrap().visits = 1;
        store.get_or_create(&key(2), 2).unwrap().visits = 2;
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&key(1)).unwrap().visits, 1);
        assert_eq!(store.get(&key(2)).unwrap().visits, 2);
    }

    #[test]
    fn grows_past_initial_load_factor() {
        let mut store = InfosetStore::new();
        for i in 0..(INITIAL_CAPACITY as i64) {
            store.get_or_create(&key(i), 2).unwrap();
        }
        assert!(store.capacity > INITIAL_CAPACITY);
        assert_eq!(store.len(), INITIAL_CAPACITY);
    }

    #[test]
    fn two_infosets_with_identical_regrets_yield_identical_strategies() {
        let mut a = InfosetData::new(3);
        let mut b = InfosetData::new(3);
        a.regret = vec![2.0, 1.0, 0.0];
        b.regret = vec![2.0, 1.0, 0.0];
        assert_eq!(a.current_strategy(), b.current_strategy());
    }
}
