use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Stable identifier for a player. Rosters are supplied fresh each
/// round but ids must stay the same for history lookups to work.
pub type PlayerId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub organisation: String,
    pub active: bool,
}

/// The two sides of a pair. Roles alternate between rounds where the
/// history allows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Buyer,
    Organiser,
}

impl Role {
    pub fn opposite(self) -> Role {
        match self {
            Role::Buyer => Role::Organiser,
            Role::Organiser => Role::Buyer,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Buyer => write!(f, "buyer"),
            Role::Organiser => write!(f, "organiser"),
        }
    }
}

/// One entry of a round: either two players matched with assigned
/// roles, or a single player sat out of the round. Excluded entries
/// carry no role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pair {
    Matched { buyer: PlayerId, organiser: PlayerId },
    Excluded { player: PlayerId },
}

impl Pair {
    pub fn contains(&self, id: &str) -> bool {
        match self {
            Pair::Matched { buyer, organiser } => buyer == id || organiser == id,
            Pair::Excluded { player } => player == id,
        }
    }

    /// The other side of a matched pair, or None for excluded entries.
    pub fn partner_of(&self, id: &str) -> Option<&PlayerId> {
        match self {
            Pair::Matched { buyer, organiser } if buyer == id => Some(organiser),
            Pair::Matched { buyer, organiser } if organiser == id => Some(buyer),
            _ => None,
        }
    }

    /// The role a player held in this pair, if they were matched.
    pub fn role_of(&self, id: &str) -> Option<Role> {
        match self {
            Pair::Matched { buyer, .. } if buyer == id => Some(Role::Buyer),
            Pair::Matched { organiser, .. } if organiser == id => Some(Role::Organiser),
            _ => None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Pair::Excluded { .. })
    }
}

/// One complete partition of the active players into pairs and
/// excluded players. Numbers start at 1 and increase by one per round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub date: NaiveDate,
    pub pairs: Vec<Pair>,
}

impl Round {
    pub fn pair_containing(&self, id: &str) -> Option<&Pair> {
        self.pairs.iter().find(|p| p.contains(id))
    }
}

/// Manual cost adjustments for specific pairs, keyed by unordered id
/// pair. Negative weights make a pair preferred. Absent pairs
/// contribute zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    weights: BTreeMap<(PlayerId, PlayerId), i64>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    fn key(a: &str, b: &str) -> (PlayerId, PlayerId) {
        if a <= b {
            (a.to_string(), b.to_string())
        } else {
            (b.to_string(), a.to_string())
        }
    }

    /// Sets the weight for a pair, replacing any previous entry for
    /// the same pair in either order.
    pub fn set(&mut self, a: &str, b: &str, weight: i64) {
        self.weights.insert(Self::key(a, b), weight);
    }

    pub fn get(&self, a: &str, b: &str) -> Option<i64> {
        self.weights.get(&Self::key(a, b)).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&(PlayerId, PlayerId), i64)> {
        self.weights.iter().map(|(k, w)| (k, *w))
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

/// A player sitting out: either indefinitely, until a given round
/// number, or until a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Removal {
    pub player: PlayerId,
    pub until: Option<RemovalEnd>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RemovalEnd {
    Round(u32),
    Date(NaiveDate),
}

/// Deactivates every player with a removal still in force for the
/// round being built. A removal is in force when it has no end, or
/// when its end round/date lies after the round being built.
pub fn apply_removals(
    players: &mut [Player],
    removals: &[Removal],
    round_number: u32,
    date: NaiveDate,
) {
    for removal in removals {
        let in_force = match removal.until {
            None => true,
            Some(RemovalEnd::Round(n)) => n > round_number,
            Some(RemovalEnd::Date(d)) => d > date,
        };
        if !in_force {
            continue;
        }
        for player in players.iter_mut() {
            if player.id == removal.player {
                player.active = false;
            }
        }
    }
}
