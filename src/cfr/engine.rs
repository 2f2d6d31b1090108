//! The CFR engine itself, spec §4.5: recursive vanilla counterfactual regret
//! minimization over the betting tree rooted at the flop, consulting the evaluator only
//! at showdown terminals.

use super::action::Action;
use super::config::SolverConfig;
use super::infoset::{InfosetKey, InfosetStore};
use super::state::{GameState, Transition};
use crate::cards::{Card, Evaluator, Hand, Street};
use crate::error::SolverError;

/// Owns one solver's infoset table for one (hero_hand, villain_hand, board) sample.
/// Evaluator tables are shared by reference (spec §5 "Shared resources"); the infoset
/// store is exclusive to this solver.
pub struct Solver<'a> {
    evaluator: &'a Evaluator,
    config: SolverConfig,
    store: InfosetStore,
    hero: [Card; 2],
    villain: [Card; 2],
    board: [Card; 5],
}

impl<'a> Solver<'a> {
    pub fn new(
        evaluator: &'a Evaluator,
        hero: [Card; 2],
        villain: [Card; 2],
        board: [Card; 5],
        config: SolverConfig,
    ) -> Result<Self, SolverError> {
        let mut seen = Hand::empty();
        for &c in hero.iter().chain(villain.iter()).chain(board.iter()) {
            if seen.contains(c) {
                return Err(SolverError::CardOverlap);
            }
            seen.add(c);
        }
        Ok(Self {
            evaluator,
            config,
            store: InfosetStore::new(),
            hero,
            villain,
            board,
        })
    }

    /// runs `iterations` full tree traversals from the root, checking `cancel` between
    /// iterations (spec §5 "Cancellation and timeouts"). Returns the number of
    /// iterations actually completed.
    pub fn solve(&mut self, iterations: usize, mut cancel: impl FnMut() -> bool) -> usize {
        let pot_bb = 3.0; // blinds already posted; out of scope per spec §1
        let mut completed = 0;
        for _ in 0..iterations {
            if cancel() {
                break;
            }
            let root = GameState::root(pot_bb);
            self.cfr(&root, [1.0, 1.0], 0);
            completed += 1;
        }
        completed
    }

    /// the root infoset's final strategy (spec §4.5 "Strategy extraction"), as
    /// `(action, probability)` pairs in the legal action order.
    pub fn root_strategy(&self) -> Vec<(Action, f64)> {
        let pot_bb = 3.0;
        let root = GameState::root(pot_bb);
        let legal = root.legal_actions(&self.config);
        let key = self.infoset_key(&root);
        let probabilities = match self.store.get(&key) {
            Some(data) => data.average_strategy(),
            None => vec![1.0 / legal.len() as f64; legal.len()],
        };
        legal.into_iter().zip(probabilities).collect()
    }

    fn infoset_key(&self, state: &GameState) -> InfosetKey {
        let n_board = state.street.n_board();
        let visible: Hand = self.board[..n_board].iter().copied().collect();
        InfosetKey {
            board: visible.bits(),
            street: state.street,
            acting: state.acting,
            history: state.history.clone(),
            pot_cents: state.quantized_pot(),
            bet_cents: state.quantized_bet(),
        }
    }

    /// recursive vanilla CFR (spec §4.5 "CFR update (vanilla)"). Returns the node's
    /// value from player 0's perspective. `reach` holds each player's reach probability
    /// into this node; `depth` feeds the recursion guard.
    fn cfr(&mut self, state: &GameState, reach: [f64; 2], depth: usize) -> f64 {
        if depth >= self.config.depth_cap || (reach[0] < self.config.reach_epsilon && reach[1] < self.config.reach_epsilon) {
            return 0.0;
        }

        let legal = state.legal_actions(&self.config);
        let key = self.infoset_key(state);
        let strategy = match self.store.get_or_create(&key, legal.len()) {
            Some(data) => data.current_strategy(),
            None => vec![1.0 / legal.len() as f64; legal.len()],
        };

        let actor = state.acting as usize;
        let mut action_values = Vec::with_capacity(legal.len());
        let mut node_value = 0.0;
        for (prob, action) in strategy.iter().zip(legal.iter()) {
            let mut child_reach = reach;
            child_reach[actor] *= prob;
            let value = match state.apply(*action, &self.config) {
                Transition::Continue(next) => self.cfr(&next, child_reach, depth + 1),
                Transition::FoldedBy(folder) => self.fold_payoff(state, folder),
                Transition::Showdown(final_state) => self.showdown_payoff(&final_state),
            };
            action_values.push(value);
            node_value += prob * value;
        }

        if let Some(data) = self.store.get_or_create(&key, legal.len()) {
            let cf_reach = reach[1 - actor];
            let own_reach = reach[actor];
            let perspective = |u: f64| if actor == 0 { u } else { -u };
            let node_for_actor = perspective(node_value);
            for (i, &value) in action_values.iter().enumerate() {
                data.regret[i] += cf_reach * (perspective(value) - node_for_actor);
                data.strategy_sum[i] += own_reach * strategy[i];
            }
            data.visits += 1;
        }

        node_value
    }

    /// terminal payoff on a fold (spec §4.5 "Terminal payoff"), from player 0's view.
    /// `state` is the pre-action state; the fold amounts are whatever `state` had
    /// accumulated, since folding adds nothing further to the pot.
    fn fold_payoff(&self, state: &GameState, folder: u8) -> f64 {
        if folder == 0 {
            -state.p0_put_bb
        } else {
            state.pot_bb - state.p0_put_bb
        }
    }

    /// terminal payoff at showdown (spec §4.5 "Terminal payoff"): evaluate both hands
    /// against the full river board and split the pot on a tie. `state` is the
    /// already-finalized state `GameState::apply` produced — its pot and contribution
    /// money movement for the terminal call (if any) is already folded in.
    fn showdown_payoff(&self, state: &GameState) -> f64 {
        let hero_hand: Hand = self.hero.iter().chain(self.board.iter()).copied().collect();
        let villain_hand: Hand = self.villain.iter().chain(self.board.iter()).copied().collect();
        let s0 = self.evaluator.evaluate(&hero_hand).expect("legal showdown hand");
        let s1 = self.evaluator.evaluate(&villain_hand).expect("legal showdown hand");

        let winnings = match s0.cmp(&s1) {
            std::cmp::Ordering::Greater => state.pot_bb,
            std::cmp::Ordering::Less => 0.0,
            std::cmp::Ordering::Equal => state.pot_bb / 2.0,
        };
        winnings - state.p0_put_bb
    }
}
