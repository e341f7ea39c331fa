use crate::error::RoundError;
use crate::model::{PlayerId, Role, Round};

/// Append-only log of generated rounds. All recency queries scan the
/// log backwards from the most recent round; mutation happens only
/// through [`History::append`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    rounds: Vec<Round>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from previously generated rounds, checking
    /// that numbering starts at 1 and increases by one per round.
    pub fn from_rounds(rounds: Vec<Round>) -> Result<Self, RoundError> {
        let mut history = Self::new();
        for round in rounds {
            history.append(round)?;
        }
        Ok(history)
    }

    pub fn rounds(&self) -> &[Round] {
        &self.rounds
    }

    /// Number of the most recent round, or 0 when empty.
    pub fn last_index(&self) -> u32 {
        self.rounds.last().map(|r| r.number).unwrap_or(0)
    }

    /// Adds a round to the log. The round number must be exactly one
    /// past the current last index.
    pub fn append(&mut self, round: Round) -> Result<(), RoundError> {
        let last = self.last_index();
        if round.number != last + 1 {
            return Err(RoundError::HistoryOrder {
                last,
                got: round.number,
            });
        }
        self.rounds.push(round);
        Ok(())
    }

    /// Role the player held the last time they were genuinely matched.
    /// Rounds where they were excluded or absent are skipped.
    pub fn last_role(&self, id: &str) -> Option<Role> {
        self.rounds.iter().rev().find_map(|r| {
            r.pair_containing(id).and_then(|p| p.role_of(id))
        })
    }

    /// Partner in the most recent round the player appears in, or None
    /// if they were excluded there or have never appeared.
    pub fn last_partner(&self, id: &str) -> Option<&PlayerId> {
        self.rounds
            .iter()
            .rev()
            .find_map(|r| r.pair_containing(id))
            .and_then(|p| p.partner_of(id))
    }

    /// Rounds since a and b were last matched together: 1 means the
    /// immediately preceding round, None means never.
    pub fn rounds_since_paired(&self, a: &str, b: &str) -> Option<u32> {
        self.rounds
            .iter()
            .rev()
            .position(|r| {
                r.pair_containing(a)
                    .map(|p| !p.is_excluded() && p.contains(b))
                    .unwrap_or(false)
            })
            .map(|back| back as u32 + 1)
    }

    /// Rounds since the player was last excluded from a round, or None
    /// if that has never happened.
    pub fn rounds_since_excluded(&self, id: &str) -> Option<u32> {
        self.rounds
            .iter()
            .rev()
            .position(|r| {
                r.pair_containing(id)
                    .map(|p| p.is_excluded())
                    .unwrap_or(false)
            })
            .map(|back| back as u32 + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Pair;
    use chrono::NaiveDate;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, day).unwrap()
    }

    fn matched(buyer: &str, organiser: &str) -> Pair {
        Pair::Matched {
            buyer: buyer.to_string(),
            organiser: organiser.to_string(),
        }
    }

    fn excluded(player: &str) -> Pair {
        Pair::Excluded {
            player: player.to_string(),
        }
    }

    fn round(number: u32, pairs: Vec<Pair>) -> Round {
        Round {
            number,
            date: date(number),
            pairs,
        }
    }

    fn sample_history() -> History {
        // Round 1: alice buys from bob, carol sits out.
        // Round 2: carol buys from alice, bob sits out.
        History::from_rounds(vec![
            round(1, vec![matched("alice", "bob"), excluded("carol")]),
            round(2, vec![matched("carol", "alice"), excluded("bob")]),
        ])
        .unwrap()
    }

    #[test]
    fn append_enforces_round_numbering() {
        let mut history = History::new();
        assert_eq!(history.last_index(), 0);

        history.append(round(1, vec![excluded("alice")])).unwrap();
        let err = history.append(round(3, vec![excluded("alice")])).unwrap_err();
        assert!(matches!(err, RoundError::HistoryOrder { last: 1, got: 3 }));

        // The failed append must not have touched the log.
        assert_eq!(history.last_index(), 1);
        history.append(round(2, vec![excluded("alice")])).unwrap();
        assert_eq!(history.last_index(), 2);
    }

    #[test]
    fn from_rounds_rejects_gaps() {
        let err = History::from_rounds(vec![round(2, vec![excluded("alice")])]).unwrap_err();
        assert!(matches!(err, RoundError::HistoryOrder { last: 0, got: 2 }));
    }

    #[test]
    fn last_role_skips_exclusions() {
        let history = sample_history();
        // Alice organised in round 2, bought in round 1.
        assert_eq!(history.last_role("alice"), Some(Role::Organiser));
        // Bob sat out round 2, so his last role comes from round 1.
        assert_eq!(history.last_role("bob"), Some(Role::Organiser));
        assert_eq!(history.last_role("carol"), Some(Role::Buyer));
        assert_eq!(history.last_role("dave"), None);
    }

    #[test]
    fn last_partner_reads_most_recent_appearance() {
        let history = sample_history();
        assert_eq!(history.last_partner("alice").unwrap(), "carol");
        // Bob appears most recently as excluded, which has no partner.
        assert_eq!(history.last_partner("bob"), None);
        assert_eq!(history.last_partner("dave"), None);
    }

    #[test]
    fn rounds_since_paired() {
        let history = sample_history();
        assert_eq!(history.rounds_since_paired("alice", "carol"), Some(1));
        assert_eq!(history.rounds_since_paired("alice", "bob"), Some(2));
        assert_eq!(history.rounds_since_paired("bob", "carol"), None);
    }

    #[test]
    fn rounds_since_excluded() {
        let history = sample_history();
        assert_eq!(history.rounds_since_excluded("bob"), Some(1));
        assert_eq!(history.rounds_since_excluded("carol"), Some(2));
        assert_eq!(history.rounds_since_excluded("alice"), None);
    }
}
