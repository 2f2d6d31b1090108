//! Rock-paper-scissors sanity game, spec §8 scenario 4: a three-action symmetric
//! zero-sum game run through the same regret-matching primitive the postflop engine
//! uses, as a cheap end-to-end check that the CFR machinery converges to the known
//! uniform equilibrium before trusting it on the real betting tree.

use super::infoset::regret_match;

const ACTIONS: usize = 3;

/// `utility(i, j)`: payoff to the row player playing action `i` against column action
/// `j`. 0 on a tie, +1 if `i` beats `j` (`(j+1) % 3 == i`), else -1.
fn utility(i: usize, j: usize) -> f64 {
    if i == j {
        0.0
    } else if (j + 1) % ACTIONS == i {
        1.0
    } else {
        -1.0
    }
}

/// Runs `iterations` rounds of self-play vanilla CFR for both players simultaneously
/// and returns each player's average strategy over the three actions.
pub fn solve(iterations: usize) -> [f64; ACTIONS] {
    let mut regret_p1 = [0.0f64; ACTIONS];
    let mut regret_p2 = [0.0f64; ACTIONS];
    let mut sum_p1 = [0.0f64; ACTIONS];
    let mut sum_p2 = [0.0f64; ACTIONS];

    for _ in 0..iterations {
        let strategy_p1 = regret_match(&regret_p1);
        let strategy_p2 = regret_match(&regret_p2);

        for i in 0..ACTIONS {
            sum_p1[i] += strategy_p1[i];
            sum_p2[i] += strategy_p2[i];
        }

        let expected_p1: [f64; ACTIONS] =
            std::array::from_fn(|i| (0..ACTIONS).map(|j| strategy_p2[j] * utility(i, j)).sum());
        let expected_p2: [f64; ACTIONS] =
            std::array::from_fn(|i| (0..ACTIONS).map(|j| strategy_p1[j] * utility(i, j)).sum());
        let value_p1: f64 = (0..ACTIONS).map(|i| strategy_p1[i] * expected_p1[i]).sum();
        let value_p2: f64 = (0..ACTIONS).map(|i| strategy_p2[i] * expected_p2[i]).sum();

        for i in 0..ACTIONS {
            regret_p1[i] += expected_p1[i] - value_p1;
            regret_p2[i] += expected_p2[i] - value_p2;
        }
    }

    let mut average = [0.0f64; ACTIONS];
    let total_p1: f64 = sum_p1.iter().sum();
    for i in 0..ACTIONS {
        average[i] = sum_p1[i] / total_p1;
    }
    average
}
