use std::time::{Duration, Instant};

use log::debug;

use crate::error::RoundError;
use super::costs::CostMatrix;

/// Resource limits for a single solve. With no budget the search runs
/// to completion; pathological inputs can be bounded by setting one.
#[derive(Debug, Clone, Default)]
pub struct SolverLimits {
    pub time_budget: Option<Duration>,
}

/// A minimum-cost partition of players into pairs and self-pairs.
/// Entries hold `(i, j)` with `i <= j`; `i == j` means player i sits
/// out. Entries are ordered by ascending first index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matching {
    pub pairs: Vec<(usize, usize)>,
    pub total_cost: i64,
}

/// Finds the cheapest way to give every player exactly one slot:
/// matched with exactly one other player, or self-paired out of the
/// round. Exhaustive branch-and-bound over the cost matrix.
///
/// The all-self-paired assignment is always feasible, so this only
/// fails on a timeout, or on the internal-invariant violation of the
/// search finishing empty-handed.
///
/// Determinism: candidates are explored in (cost, partner index)
/// order and an equal-cost solution never replaces the incumbent, so
/// identical inputs always produce the identical matching.
pub fn find_optimal_pairs(
    costs: &CostMatrix,
    limits: &SolverLimits,
) -> Result<Matching, RoundError> {
    let n = costs.len();
    if n == 0 {
        return Ok(Matching {
            pairs: Vec::new(),
            total_cost: 0,
        });
    }

    // Rescale weights so that every entry is non-negative without
    // changing which partition is optimal. A pair edge covers two
    // players and a self edge one, so adding 2C to each pair weight
    // and C to each self weight shifts every complete partition's
    // (doubled) total by the same C * n.
    let mut min_weight = 0;
    for i in 0..n {
        for j in i..n {
            min_weight = min_weight.min(costs.get(i, j));
        }
    }
    let shift = if min_weight < 0 { -2 * min_weight } else { 0 };

    let mut scaled = vec![vec![0i64; n]; n];
    for i in 0..n {
        scaled[i][i] = 2 * costs.get(i, i) + shift;
        for j in (i + 1)..n {
            let weight = 2 * costs.get(i, j) + 2 * shift;
            scaled[i][j] = weight;
            scaled[j][i] = weight;
        }
    }

    // Cheapest scaled option per player, for the lower bound: any
    // completion costs at least half the sum over unmatched players.
    let cheapest: Vec<i64> = (0..n)
        .map(|k| {
            let mut best = 2 * scaled[k][k];
            for j in 0..n {
                if j != k {
                    best = best.min(scaled[k][j]);
                }
            }
            best
        })
        .collect();
    let bound_sum: i64 = cheapest.iter().sum();

    let deadline = limits.time_budget.map(|budget| Instant::now() + budget);
    let budget_ms = limits
        .time_budget
        .map(|budget| budget.as_millis() as u64)
        .unwrap_or(0);

    let mut search = Search {
        scaled: &scaled,
        cheapest: &cheapest,
        matched: vec![false; n],
        chosen: Vec::with_capacity(n / 2 + 1),
        best: None,
        deadline,
        budget_ms,
        nodes: 0,
    };
    search.run(0, bound_sum)?;

    let nodes = search.nodes;
    let Some((pairs, _)) = search.best else {
        return Err(RoundError::SolverInfeasible { players: n });
    };

    // Report the cost in original units.
    let total_cost = pairs.iter().map(|&(i, j)| costs.get(i, j)).sum();
    debug!(
        "matched {} players at cost {} ({} nodes explored)",
        n, total_cost, nodes
    );

    Ok(Matching { pairs, total_cost })
}

struct Search<'a> {
    scaled: &'a [Vec<i64>],
    cheapest: &'a [i64],
    matched: Vec<bool>,
    chosen: Vec<(usize, usize)>,
    best: Option<(Vec<(usize, usize)>, i64)>,
    deadline: Option<Instant>,
    budget_ms: u64,
    nodes: u64,
}

impl Search<'_> {
    /// Branches on the lowest unmatched player. `bound_sum` is the sum
    /// of the cheapest scaled option of every unmatched player.
    fn run(&mut self, cost_so_far: i64, bound_sum: i64) -> Result<(), RoundError> {
        self.nodes += 1;
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(RoundError::SolverTimeout {
                    budget_ms: self.budget_ms,
                });
            }
        }

        if let Some((_, best_cost)) = &self.best {
            if cost_so_far + bound_sum / 2 >= *best_cost {
                return Ok(());
            }
        }

        let Some(i) = self.matched.iter().position(|m| !m) else {
            // Every player has a slot; keep strictly better solutions
            // only, so the first optimum found wins ties.
            if self
                .best
                .as_ref()
                .map(|(_, best_cost)| cost_so_far < *best_cost)
                .unwrap_or(true)
            {
                self.best = Some((self.chosen.clone(), cost_so_far));
            }
            return Ok(());
        };

        // Candidate slots for player i: every unmatched later player,
        // plus sitting out, tried cheapest first. The index breaks
        // ties, and indices follow player id order.
        let mut candidates = vec![(self.scaled[i][i], i)];
        for j in (i + 1)..self.matched.len() {
            if !self.matched[j] {
                candidates.push((self.scaled[i][j], j));
            }
        }
        candidates.sort_unstable();

        for (weight, j) in candidates {
            self.matched[i] = true;
            let mut remaining = bound_sum - self.cheapest[i];
            if j != i {
                self.matched[j] = true;
                remaining -= self.cheapest[j];
            }
            self.chosen.push((i, j));

            self.run(cost_so_far + weight, remaining)?;

            self.chosen.pop();
            self.matched[i] = false;
            if j != i {
                self.matched[j] = false;
            }
        }

        Ok(())
    }
}
