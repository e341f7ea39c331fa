use std::fmt;

use crate::model::{PlayerId, Role, Round};

/// A successfully generated round, the summed cost of its pairing, and
/// the non-fatal warnings collected along the way.
#[derive(Debug, Clone)]
pub struct RoundOutcome {
    pub round: Round,
    pub total_cost: i64,
    pub warnings: Vec<PairingWarning>,
}

/// Conditions worth reporting back to the organiser. These never abort
/// round generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PairingWarning {
    /// Both players held the same role in their previous pairing, so
    /// one of them has to repeat it.
    SameRoleRepeat { a: PlayerId, b: PlayerId, role: Role },
    /// Neither player has a prior role; roles fall back to id order.
    NoRoleHistory { a: PlayerId, b: PlayerId },
    /// The player already sat out a recent round.
    RepeatedExclusion { player: PlayerId, rounds_since: u32 },
}

impl fmt::Display for PairingWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PairingWarning::SameRoleRepeat { a, b, role } => write!(
                f,
                "{a} and {b} were both {role} last time; roles assigned by id"
            ),
            PairingWarning::NoRoleHistory { a, b } => {
                write!(f, "{a} and {b} have no role history; roles assigned by id")
            }
            PairingWarning::RepeatedExclusion {
                player,
                rounds_since,
            } => write!(
                f,
                "{player} sits out again, {rounds_since} round(s) after last time"
            ),
        }
    }
}
