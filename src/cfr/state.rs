//! The betting-tree state a `Solver` recurses over, spec §3 "Information Set" and §4.5
//! "Pot accounting"/"Street advancement"/"Terminal detection". `GameState` carries
//! everything CFR needs to decide legality, apply an action, and detect a terminal —
//! the board cards and hole cards themselves live on the `Solver`, not here, since
//! they're fixed for the whole traversal and only the evaluator needs them.

use super::action::Action;
use super::config::SolverConfig;
use crate::cards::Street;

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub street: Street,
    pub acting: u8,
    pub history: Vec<Action>,
    pub pot_bb: f64,
    pub current_bet_bb: f64,
    pub p0_put_bb: f64,
    pub p1_put_bb: f64,
    pub raises_this_street: usize,
}

/// outcome of applying an action: either the game continues at a new state, or it has
/// reached one of the two terminal shapes spec §4.5 distinguishes.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    Continue(GameState),
    FoldedBy(u8),
    /// carries the fully-updated state (pot and both contributions already include the
    /// terminal action's own money movement) so callers never re-derive the pot math
    /// `apply` already computed.
    Showdown(GameState),
}

impl GameState {
    /// starting state for heads-up postflop play: flop street, player 0 first to act,
    /// blinds already posted and folded into `pot_bb` by the caller (spec treats the
    /// preflop blind structure as out of scope; the driver seeds `pot_bb` directly).
    pub fn root(pot_bb: f64) -> Self {
        Self {
            street: Street::Flop,
            acting: 0,
            history: Vec::new(),
            pot_bb,
            current_bet_bb: 0.0,
            p0_put_bb: 0.0,
            p1_put_bb: 0.0,
            raises_this_street: 0,
        }
    }

    fn facing_bet(&self) -> bool {
        self.current_bet_bb > 0.0
    }

    /// legal action set for the acting player, spec §4.5.
    pub fn legal_actions(&self, config: &SolverConfig) -> Vec<Action> {
        if self.facing_bet() {
            let mut actions = vec![Action::Fold, Action::Call];
            if self.raises_this_street < config.max_raises {
                actions.extend((0..config.n_sizes()).map(Action::Raise));
            }
            actions
        } else {
            let mut actions = vec![Action::Check];
            actions.extend((0..config.n_sizes()).map(Action::Bet));
            actions
        }
    }

    fn contribution_mut(&mut self, player: u8) -> &mut f64 {
        if player == 0 {
            &mut self.p0_put_bb
        } else {
            &mut self.p1_put_bb
        }
    }

    /// applies `action` taken by the current acting player, returning either the next
    /// state or a terminal classification (spec §4.5 "Pot accounting"/"Terminal
    /// detection"/"Street advancement").
    pub fn apply(&self, action: Action, config: &SolverConfig) -> Transition {
        let actor = self.acting;
        let mut next = self.clone();

        match action {
            Action::Fold => return Transition::FoldedBy(actor),

            Action::Check => {
                let was_check = matches!(self.history.last(), Some(Action::Check));
                if was_check {
                    if self.street.is_river() {
                        return Transition::Showdown(next);
                    }
                    return Transition::Continue(next.advance_street());
                }
                next.history.push(Action::Check);
                next.acting = 1 - actor;
            }

            Action::Call => {
                let amount = self.current_bet_bb;
                next.pot_bb += amount;
                *next.contribution_mut(actor) += amount;
                next.current_bet_bb = 0.0;
                if self.street.is_river() {
                    return Transition::Showdown(next);
                }
                return Transition::Continue(next.advance_street());
            }

            Action::Bet(i) => {
                let size = config.bet_sizes[i];
                next.pot_bb += size;
                *next.contribution_mut(actor) += size;
                next.current_bet_bb = size;
                next.history.push(action);
                next.acting = 1 - actor;
            }

            Action::Raise(i) => {
                let size = config.bet_sizes[i];
                let total = self.current_bet_bb + size;
                next.pot_bb += total;
                *next.contribution_mut(actor) += total;
                next.current_bet_bb = size;
                next.raises_this_street += 1;
                next.history.push(action);
                next.acting = 1 - actor;
            }
        }

        Transition::Continue(next)
    }

    /// two consecutive checks, or a call that doesn't end the hand, open the next
    /// street: action history resets and player 0 acts first (spec §4.5).
    fn advance_street(&mut self) -> Self {
        Self {
            street: self.street.next().expect("advance_street called at the river"),
            acting: 0,
            history: Vec::new(),
            pot_bb: self.pot_bb,
            current_bet_bb: 0.0,
            p0_put_bb: self.p0_put_bb,
            p1_put_bb: self.p1_put_bb,
            raises_this_street: 0,
        }
    }

    /// pot/bet scalars quantized to two decimal places of a big blind, per spec §3's
    /// infoset-key note for multi-bet-size mode.
    pub fn quantized_pot(&self) -> i64 {
        (self.pot_bb * 100.0).round() as i64
    }
    pub fn quantized_bet(&self) -> i64 {
        (self.current_bet_bb * 100.0).round() as i64
    }
}
