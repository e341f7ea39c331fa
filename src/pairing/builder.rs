use std::collections::HashSet;

use chrono::NaiveDate;
use log::{debug, warn};

use crate::error::RoundError;
use crate::history::History;
use crate::model::{Overrides, Pair, Player, Round};
use super::costs::{build_cost_matrix, CostParams};
use super::roles::assign_roles;
use super::solver::{find_optimal_pairs, SolverLimits};
use super::types::{PairingWarning, RoundOutcome};

/// Generates the next round: validates the inputs, prices every
/// candidate pair, solves for the cheapest partition, assigns roles
/// and appends the finished round to the history.
///
/// Either a fully valid round is appended and returned, or an error
/// is reported and the history is left untouched. Warnings never
/// abort generation; they ride along on the outcome and go through
/// `log::warn!`.
pub fn build_round(
    players: &[Player],
    overrides: &Overrides,
    history: &mut History,
    params: &CostParams,
    limits: &SolverLimits,
    date: NaiveDate,
) -> Result<RoundOutcome, RoundError> {
    validate_inputs(players, overrides)?;

    let mut active: Vec<&Player> = players.iter().filter(|p| p.active).collect();
    active.sort_by(|a, b| a.id.cmp(&b.id));
    if active.is_empty() {
        return Err(RoundError::EmptyRound);
    }

    let number = history.last_index() + 1;
    debug!("building round {} for {} active players", number, active.len());

    let costs = build_cost_matrix(&active, history, overrides, params);
    let matching = find_optimal_pairs(&costs, limits)?;

    let mut warnings = Vec::new();
    let mut pairs = Vec::with_capacity(matching.pairs.len());
    for &(i, j) in &matching.pairs {
        if i == j {
            let player = active[i];
            if let Some(rounds_since) = history.rounds_since_excluded(&player.id) {
                if rounds_since <= params.recent_window {
                    warnings.push(PairingWarning::RepeatedExclusion {
                        player: player.id.clone(),
                        rounds_since,
                    });
                }
            }
            pairs.push(Pair::Excluded {
                player: player.id.clone(),
            });
        } else {
            pairs.push(assign_roles(active[i], active[j], history, &mut warnings));
        }
    }

    for warning in &warnings {
        warn!("round {}: {}", number, warning);
    }

    let round = Round {
        number,
        date,
        pairs,
    };
    history.append(round.clone())?;

    Ok(RoundOutcome {
        round,
        total_cost: matching.total_cost,
        warnings,
    })
}

/// Rejects rosters with duplicate ids and overrides that reference
/// unknown players or pair a player with themself. Runs before any
/// cost computation so bad input is never partially processed.
fn validate_inputs(players: &[Player], overrides: &Overrides) -> Result<(), RoundError> {
    let mut ids = HashSet::new();
    for player in players {
        if !ids.insert(player.id.as_str()) {
            return Err(RoundError::Validation(format!(
                "duplicate player id {:?}",
                player.id
            )));
        }
    }

    for (pair, _) in overrides.iter() {
        let (a, b) = pair;
        if a == b {
            return Err(RoundError::Validation(format!(
                "override pairs {a:?} with itself"
            )));
        }
        for id in [a, b] {
            if !ids.contains(id.as_str()) {
                return Err(RoundError::Validation(format!(
                    "override references unknown player {id:?}"
                )));
            }
        }
    }

    Ok(())
}
