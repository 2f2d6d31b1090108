//! Action encoding, spec §4.5: with `n` configured bet sizes, actions are integers
//! `0..(3+2n)`: 0=CHECK, 1..=n=BET_i, n+1=FOLD, n+2=CALL, n+3..=2n+2=RAISE_i.
//!
//! We keep the enum rather than bare integers for readability at call sites; `index`
//! and `from_index` are the two directions of the bijection the spec actually cares
//! about (e.g. for sizing a regret vector).

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Check,
    Bet(usize),
    Fold,
    Call,
    Raise(usize),
}

impl Action {
    pub fn index(&self, n_sizes: usize) -> usize {
        match *self {
            Action::Check => 0,
            Action::Bet(i) => 1 + i,
            Action::Fold => n_sizes + 1,
            Action::Call => n_sizes + 2,
            Action::Raise(i) => n_sizes + 3 + i,
        }
    }

    pub fn from_index(index: usize, n_sizes: usize) -> Self {
        match index {
            0 => Action::Check,
            i if i >= 1 && i <= n_sizes => Action::Bet(i - 1),
            i if i == n_sizes + 1 => Action::Fold,
            i if i == n_sizes + 2 => Action::Call,
            i if i >= n_sizes + 3 && i <= 2 * n_sizes + 2 => Action::Raise(i - (n_sizes + 3)),
            other => panic!("action index {other} out of range for {n_sizes} bet sizes"),
        }
    }

    pub fn is_aggressive(&self) -> bool {
        matches!(self, Action::Bet(_) | Action::Raise(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_index() {
        let n = 2;
        let actions = [
            Action::Check,
            Action::Bet(0),
            Action::Bet(1),
            Action::Fold,
            Action::Call,
            Action::Raise(0),
            Action::Raise(1),
        ];
        for (expected_idx, action) in actions.iter().enumerate() {
            assert_eq!(action.index(n), expected_idx);
            assert_eq!(Action::from_index(expected_idx, n), *action);
        }
    }
}
