use crate::history::History;
use crate::model::{Overrides, Player};

/// Tunable cost constants. The pairing penalties steer the solver away
/// from repeat partners, same-organisation pairs and repeated roles;
/// the exclusion costs decide how reluctantly players sit out.
///
/// All costs are integers. `paired_last_round` should stay far above
/// everything else so that back-to-back repeats only happen when no
/// alternative exists at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostParams {
    /// Cost of pairing two players matched in the immediately
    /// preceding round.
    pub paired_last_round: i64,
    /// Cost of pairing two players matched between 2 and
    /// `recent_window` rounds ago.
    pub paired_recently: i64,
    /// Cost of pairing within the same organisation. Should be lower
    /// than `exclusion`.
    pub same_organisation: i64,
    /// Cost of pairing two players whose previous roles were the same,
    /// forcing one of them to repeat.
    pub same_role: i64,
    /// Cost of taking a player out of the round.
    pub exclusion: i64,
    /// Extra cost when the player already sat out within the window.
    pub excluded_recently: i64,
    /// Number of trailing rounds over which repeats are penalized.
    pub recent_window: u32,
}

impl Default for CostParams {
    fn default() -> Self {
        Self {
            paired_last_round: 1_000_000,
            paired_recently: 50,
            same_organisation: 10,
            same_role: 1,
            exclusion: 50,
            excluded_recently: 50,
            recent_window: 10,
        }
    }
}

/// Symmetric cost table over player indices 0..n, diagonal included.
/// Entry (i, i) is the cost of excluding player i from the round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    n: usize,
    weights: Vec<i64>,
}

impl CostMatrix {
    pub fn new(n: usize) -> Self {
        Self {
            n,
            weights: vec![0; n * (n + 1) / 2],
        }
    }

    /// Number of players the matrix covers.
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    fn index(&self, a: usize, b: usize) -> usize {
        let (i, j) = if a <= b { (a, b) } else { (b, a) };
        debug_assert!(j < self.n);
        // Row i starts after the i previous rows of n-k entries each.
        i * (2 * self.n - i + 1) / 2 + (j - i)
    }

    pub fn set(&mut self, a: usize, b: usize, weight: i64) {
        let idx = self.index(a, b);
        self.weights[idx] = weight;
    }

    pub fn get(&self, a: usize, b: usize) -> i64 {
        self.weights[self.index(a, b)]
    }
}

/// Computes the cost of every candidate pair and every exclusion for
/// the given players. Indices in the returned matrix refer to
/// positions in `players`, so callers should pass the roster in a
/// stable order.
///
/// The result is a pure function of roster, history, overrides and
/// constants: the same inputs always produce the same matrix.
pub fn build_cost_matrix(
    players: &[&Player],
    history: &History,
    overrides: &Overrides,
    params: &CostParams,
) -> CostMatrix {
    let n = players.len();
    let mut matrix = CostMatrix::new(n);

    for i in 0..n {
        let a = players[i];

        let mut self_cost = params.exclusion;
        if within_window(history.rounds_since_excluded(&a.id), params.recent_window) {
            self_cost += params.excluded_recently;
        }
        matrix.set(i, i, self_cost);

        for j in (i + 1)..n {
            let b = players[j];
            let mut cost = 0;

            match history.rounds_since_paired(&a.id, &b.id) {
                Some(1) => cost += params.paired_last_round,
                rounds if within_window(rounds, params.recent_window) => {
                    cost += params.paired_recently
                }
                _ => {}
            }

            if a.organisation == b.organisation {
                cost += params.same_organisation;
            }

            if let (Some(role_a), Some(role_b)) =
                (history.last_role(&a.id), history.last_role(&b.id))
            {
                if role_a == role_b {
                    cost += params.same_role;
                }
            }

            if let Some(weight) = overrides.get(&a.id, &b.id) {
                cost += weight;
            }

            matrix.set(i, j, cost);
        }
    }

    matrix
}

fn within_window(rounds_since: Option<u32>, window: u32) -> bool {
    rounds_since.map(|r| r <= window).unwrap_or(false)
}
