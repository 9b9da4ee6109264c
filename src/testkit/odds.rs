//! Scripted odds source.

use parking_lot::Mutex;

use crate::domain::bet::{Bet, UpdatedOdds};
use crate::port::outbound::odds::OddsSource;

/// Returns pre-defined quotes in order, repeating the last one once the
/// script is exhausted. An empty script quotes nothing.
#[derive(Debug)]
pub struct ScriptedOdds {
    quotes: Vec<UpdatedOdds>,
    next: Mutex<usize>,
}

impl ScriptedOdds {
    pub fn new(quotes: Vec<UpdatedOdds>) -> Self {
        Self {
            quotes,
            next: Mutex::new(0),
        }
    }

    /// Number of quotes served so far.
    pub fn served(&self) -> usize {
        *self.next.lock()
    }
}

impl OddsSource for ScriptedOdds {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn quote(&self, _bets: &[Bet]) -> UpdatedOdds {
        let mut next = self.next.lock();
        let index = (*next).min(self.quotes.len().saturating_sub(1));
        *next += 1;
        self.quotes.get(index).cloned().unwrap_or_default()
    }
}
