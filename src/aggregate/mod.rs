//! Aggregator, spec §4.6: groups per-combination root strategies into the 169-cell
//! hand-class grid (pairs on the diagonal, suited above, offsuit below) that the range
//! parser's `HandClass` already indexes.

use crate::cfr::Action;
use crate::range::combo::{Combo, HandClass};
use crate::range::parser::ParsedRange;
use serde::Serialize;

/// per-cell averages the driver reports: bet/check/fold/call/raise frequencies plus how
/// many sampled combinations landed in this cell.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct CellStats {
    pub samples: usize,
    pub check: f64,
    pub bet: f64,
    pub fold: f64,
    pub call: f64,
    pub raise: f64,
}

impl CellStats {
    fn accumulate(&mut self, strategy: &[(Action, f64)], weight: f64) {
        for &(action, p) in strategy {
            let contribution = p * weight;
            match action {
                Action::Check => self.check += contribution,
                Action::Bet(_) => self.bet += contribution,
                Action::Fold => self.fold += contribution,
                Action::Call => self.call += contribution,
                Action::Raise(_) => self.raise += contribution,
            }
        }
        self.samples += 1;
    }

    /// the accumulated sums divided by total sampled weight, so the four buckets sum to
    /// ~1 regardless of how many combinations landed in this cell.
    fn finalize(&mut self, total_weight: f64) {
        if total_weight <= 0.0 {
            return;
        }
        self.check /= total_weight;
        self.bet /= total_weight;
        self.fold /= total_weight;
        self.call /= total_weight;
        self.raise /= total_weight;
    }
}

/// the full 13x13 grid, row/column 0 (deuce) .. 12 (ace), matching `HandClass::grid_index`.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateReport {
    pub cells: Vec<Vec<CellStats>>,
}

impl AggregateReport {
    fn empty() -> Self {
        Self {
            cells: vec![vec![CellStats::default(); 13]; 13],
        }
    }

    pub fn cell(&self, class: HandClass) -> &CellStats {
        let (row, col) = class.grid_index();
        &self.cells[row][col]
    }
}

/// one hero combination's contribution: its hand class and the root strategy solved for
/// it (spec §4.6: "the driver calls the CFR engine once per combination and reads the
/// root-node strategy").
pub struct Sample {
    pub combo: Combo,
    pub strategy: Vec<(Action, f64)>,
}

/// Accumulates per-combination strategies into the 169-cell grid, weighting each sample
/// by its combo weight times the range's overall weight (spec §4.6: "when a range
/// carries per-hand weights, the aggregator ... deterministically weights the
/// average").
pub struct Aggregator {
    report: AggregateReport,
    weight_totals: Vec<Vec<f64>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            report: AggregateReport::empty(),
            weight_totals: vec![vec![0.0; 13]; 13],
        }
    }

    pub fn ingest(&mut self, sample: &Sample, range: &ParsedRange) {
        let class = HandClass::from_combo(&sample.combo);
        let (row, col) = class.grid_index();
        let weight = sample.combo.weight * range.overall_weight;
        self.report.cells[row][col].accumulate(&sample.strategy, weight);
        self.weight_totals[row][col] += weight;
    }

    pub fn finish(mut self) -> AggregateReport {
        for row in 0..13 {
            for col in 0..13 {
                let total = self.weight_totals[row][col];
                self.report.cells[row][col].finalize(total);
            }
        }
        self.report
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, Rank};

    fn combo(a: &str, b: &str, weight: f64) -> Combo {
        Combo::new(Card::try_from(a).unwrap(), Card::try_from(b).unwrap(), weight)
    }

    #[test]
    fn aggregates_bet_frequency_into_correct_cell() {
        let mut aggregator = Aggregator::new();
        let range = ParsedRange { combos: vec![], overall_weight: 1.0 };
        let sample = Sample {
            combo: combo("Ah", "Ad", 1.0),
            strategy: vec![(Action::Check, 0.3), (Action::Bet(0), 0.7)],
        };
        aggregator.ingest(&sample, &range);
        let report = aggregator.finish();
        let cell = report.cell(HandClass::Pair(Rank::Ace));
        assert!((cell.bet - 0.7).abs() < 1e-9);
        assert!((cell.check - 0.3).abs() < 1e-9);
        assert_eq!(cell.samples, 1);
    }

    #[test]
    fn weighted_average_accounts_for_combo_and_overall_weight() {
        let mut aggregator = Aggregator::new();
        let range = ParsedRange { combos: vec![], overall_weight: 0.5 };
        let full_weight = Sample {
            combo: combo("Kh", "Kd", 1.0),
            strategy: vec![(Action::Bet(0), 1.0)],
        };
        let half_weight = Sample {
            combo: combo("Kc", "Ks", 0.5),
            strategy: vec![(Action::Check, 1.0)],
        };
        aggregator.ingest(&full_weight, &range);
        aggregator.ingest(&half_weight, &range);
        let report = aggregator.finish();
        let cell = report.cell(HandClass::Pair(Rank::King));
        // weights (post overall_weight): 0.5 and 0.25, total 0.75
        assert!((cell.bet - (0.5 / 0.75)).abs() < 1e-9);
        assert!((cell.check - (0.25 / 0.75)).abs() < 1e-9);
        assert_eq!(cell.samples, 2);
    }
}
