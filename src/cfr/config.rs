//! Knobs the driver exposes over the CLI (spec §6.2) that shape the betting tree and the
//! recursion guards of spec §4.5/§5.

#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// pot-fraction bet sizes, e.g. `[0.5, 1.0]` for half-pot and pot-sized bets.
    pub bet_sizes: Vec<f64>,
    /// per-street cap on the number of RAISE actions (spec §4.5, default 2).
    pub max_raises: usize,
    /// recursion depth cap (spec §4.5 "Recursion guards", default 20).
    pub depth_cap: usize,
    /// both-reach cutoff below which a branch contributes zero (spec default 1e-10).
    pub reach_epsilon: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            bet_sizes: vec![0.5, 1.0],
            max_raises: 2,
            depth_cap: 20,
            reach_epsilon: 1e-10,
        }
    }
}

impl SolverConfig {
    pub fn n_sizes(&self) -> usize {
        self.bet_sizes.len()
    }
    /// total action-space width at any node, per spec §4.5's `3 + 2n` encoding.
    pub fn n_actions(&self) -> usize {
        3 + 2 * self.n_sizes()
    }
}
