//! Joint outcome enumeration and the bet/outcome incidence relation.
//!
//! The outcome space Ω is the Cartesian product of the outcome alphabet taken
//! once per event. Its size is `|alphabet|^k`, which is the scalability
//! ceiling of every optimization in this crate.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::bet::Bet;
use super::error::DomainError;
use super::id::OutcomeLabel;

/// Ordered set of result labels shared by every event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OutcomeLabel>", into = "Vec<OutcomeLabel>")]
pub struct OutcomeAlphabet(Vec<OutcomeLabel>);

impl OutcomeAlphabet {
    /// Create an alphabet from distinct labels.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidAlphabet`] if `labels` is empty or
    /// contains duplicates.
    pub fn try_new<L>(labels: impl IntoIterator<Item = L>) -> Result<Self, DomainError>
    where
        L: Into<OutcomeLabel>,
    {
        let labels: Vec<OutcomeLabel> = labels.into_iter().map(Into::into).collect();
        if labels.is_empty() {
            return Err(DomainError::InvalidAlphabet {
                reason: "at least one label is required",
            });
        }
        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(DomainError::InvalidAlphabet {
                    reason: "labels must be distinct",
                });
            }
        }
        Ok(Self(labels))
    }

    /// Home / Draw / Away.
    #[must_use]
    pub fn home_draw_away() -> Self {
        Self(vec!["H".into(), "D".into(), "A".into()])
    }

    #[must_use]
    pub fn labels(&self) -> &[OutcomeLabel] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn contains(&self, label: &OutcomeLabel) -> bool {
        self.0.contains(label)
    }

    /// Number of joint outcomes over `events` events, or `None` on overflow.
    #[must_use]
    pub fn space_size(&self, events: usize) -> Option<usize> {
        let events = u32::try_from(events).ok()?;
        self.0.len().checked_pow(events)
    }
}

impl Default for OutcomeAlphabet {
    fn default() -> Self {
        Self::home_draw_away()
    }
}

impl TryFrom<Vec<OutcomeLabel>> for OutcomeAlphabet {
    type Error = DomainError;

    fn try_from(labels: Vec<OutcomeLabel>) -> Result<Self, Self::Error> {
        Self::try_new(labels)
    }
}

impl From<OutcomeAlphabet> for Vec<OutcomeLabel> {
    fn from(alphabet: OutcomeAlphabet) -> Self {
        alphabet.0
    }
}

/// One element of Ω: a result label for every event, indexed by event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JointOutcome(Vec<OutcomeLabel>);

impl JointOutcome {
    /// Result of `event` in this joint outcome.
    #[must_use]
    pub fn label(&self, event: usize) -> Option<&OutcomeLabel> {
        self.0.get(event)
    }

    #[must_use]
    pub fn labels(&self) -> &[OutcomeLabel] {
        &self.0
    }
}

impl fmt::Display for JointOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, label) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("-")?;
            }
            write!(f, "{label}")?;
        }
        Ok(())
    }
}

/// The joint outcome universe for a fixed number of events.
#[derive(Debug, Clone)]
pub struct OutcomeSpace {
    events: usize,
    outcomes: Vec<JointOutcome>,
}

impl OutcomeSpace {
    /// Enumerate every joint outcome over `events` events.
    ///
    /// Outcomes are ordered lexicographically by alphabet position with
    /// event 0 most significant. Zero events yields the single empty outcome.
    #[must_use]
    pub fn build(alphabet: &OutcomeAlphabet, events: usize) -> Self {
        let base = alphabet.len();
        let total = alphabet.space_size(events).unwrap_or(0);
        let mut outcomes = Vec::with_capacity(total);
        let mut digits = vec![0usize; events];

        for _ in 0..total {
            outcomes.push(JointOutcome(
                digits
                    .iter()
                    .map(|&d| alphabet.labels()[d].clone())
                    .collect(),
            ));

            // Mixed-radix increment, least significant event last.
            for digit in digits.iter_mut().rev() {
                *digit += 1;
                if *digit < base {
                    break;
                }
                *digit = 0;
            }
        }

        Self { events, outcomes }
    }

    #[must_use]
    pub const fn events(&self) -> usize {
        self.events
    }

    #[must_use]
    pub fn outcomes(&self) -> &[JointOutcome] {
        &self.outcomes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

/// One more than the largest event index referenced by `bets`.
#[must_use]
pub fn infer_event_count(bets: &[Bet]) -> usize {
    bets.iter().map(|b| b.event() + 1).max().unwrap_or(0)
}

/// Dense incidence matrix: `wins(i, w)` iff bet `i` pays out under outcome `w`.
#[derive(Debug, Clone)]
pub struct Incidence {
    rows: Vec<Vec<bool>>,
}

impl Incidence {
    /// Evaluate every (bet, outcome) pair.
    ///
    /// A bet on an event outside the space never wins.
    #[must_use]
    pub fn build(bets: &[Bet], space: &OutcomeSpace) -> Self {
        let rows = bets
            .iter()
            .map(|bet| {
                space
                    .outcomes()
                    .iter()
                    .map(|w| w.label(bet.event()).is_some_and(|l| bet.covers(l)))
                    .collect()
            })
            .collect();
        Self { rows }
    }

    #[must_use]
    pub fn wins(&self, bet: usize, outcome: usize) -> bool {
        self.rows
            .get(bet)
            .and_then(|row| row.get(outcome))
            .copied()
            .unwrap_or(false)
    }
}
