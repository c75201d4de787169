use log::debug;
use std::collections::HashMap;

use crate::config::{ContestErrors, StateId};

/// The raw votes given by one state, per recipient.
///
/// A recipient with no votes has no entry: a count never drops to a stored zero.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct VoteLedger {
    counts: HashMap<StateId, u64>,
}

impl VoteLedger {
    pub fn new() -> VoteLedger {
        VoteLedger {
            counts: HashMap::new(),
        }
    }

    /// Adds one vote for the recipient.
    pub fn increment(&mut self, recipient: StateId) {
        *self.counts.entry(recipient).or_insert(0) += 1;
    }

    /// Adds `count` votes for the recipient.
    ///
    /// Adding zero votes does not create an entry. Fails without changing the
    /// ledger if the count would overflow.
    pub fn add_votes(&mut self, recipient: StateId, count: u64) -> Result<(), ContestErrors> {
        if count == 0 {
            return Ok(());
        }
        let total = self
            .count_for(recipient)
            .checked_add(count)
            .ok_or_else(|| {
                ContestErrors::InvalidArgument(format!(
                    "too many votes for {}: {} more than {}",
                    recipient,
                    count,
                    self.count_for(recipient)
                ))
            })?;
        self.counts.insert(recipient, total);
        Ok(())
    }

    /// Removes one vote for the recipient.
    ///
    /// The entry disappears when its count reaches zero. Decrementing a
    /// recipient without votes does nothing.
    pub fn decrement(&mut self, recipient: StateId) {
        match self.counts.get_mut(&recipient) {
            Some(count) if *count > 1 => {
                *count -= 1;
            }
            Some(_) => {
                self.counts.remove(&recipient);
            }
            None => {
                debug!("decrement: no votes for {:?}, nothing to remove", recipient);
            }
        }
    }

    /// The number of votes for the recipient, 0 if none were given.
    pub fn count_for(&self, recipient: StateId) -> u64 {
        self.counts.get(&recipient).cloned().unwrap_or(0)
    }

    /// Removes all the votes for the recipient and returns how many there were.
    pub fn clear_pair(&mut self, recipient: StateId) -> Result<u64, ContestErrors> {
        self.counts.remove(&recipient).ok_or(ContestErrors::NotFound)
    }

    /// All the (recipient, count) pairs, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (StateId, u64)> + '_ {
        self.counts.iter().map(|(sid, count)| (*sid, *count))
    }

    /// Number of recipients with at least one vote.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Deep copy that reserves its storage first.
    pub fn try_clone(&self) -> Result<VoteLedger, ContestErrors> {
        let mut counts: HashMap<StateId, u64> = HashMap::new();
        counts.try_reserve(self.counts.len())?;
        counts.extend(self.iter());
        Ok(VoteLedger { counts })
    }
}
