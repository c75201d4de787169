use log::debug;

use crate::config::{ContestErrors, StateId};
use crate::ledger::VoteLedger;
use crate::ranking::{RankedResult, Ranking};

/// A participating state: it performs a song, votes for the others and
/// collects points.
#[derive(PartialEq, Debug, Clone)]
pub struct State {
    id: StateId,
    name: String,
    song: String,
    votes: VoteLedger,
    results: RankedResult,
    total_score: f64,
    friendlied: bool,
}

impl State {
    pub fn new(id: StateId, name: &str, song: &str) -> State {
        State {
            id,
            name: name.to_string(),
            song: song.to_string(),
            votes: VoteLedger::new(),
            results: Ranking::EMPTY,
            total_score: 0.0,
            friendlied: false,
        }
    }

    pub fn id(&self) -> StateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn song(&self) -> &str {
        &self.song
    }

    /// The raw votes given by this state.
    pub fn votes(&self) -> &VoteLedger {
        &self.votes
    }

    /// The ranking computed by the last call to `finalize`.
    pub fn results(&self) -> &RankedResult {
        &self.results
    }

    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    pub fn set_total_score(&mut self, total_score: f64) {
        self.total_score = total_score;
    }

    /// Whether this state was already counted in a pair of friendly states.
    pub fn is_friendlied(&self) -> bool {
        self.friendlied
    }

    pub fn set_friendlied(&mut self, value: bool) {
        self.friendlied = value;
    }

    pub fn add_vote(&mut self, taker: StateId) {
        self.votes.increment(taker);
    }

    pub fn add_votes(&mut self, taker: StateId, count: u64) -> Result<(), ContestErrors> {
        self.votes.add_votes(taker, count)
    }

    pub fn remove_vote(&mut self, taker: StateId) {
        self.votes.decrement(taker);
    }

    pub fn remove_all_votes(&mut self, taker: StateId) -> Result<u64, ContestErrors> {
        self.votes.clear_pair(taker)
    }

    /// Replaces the ranked result with the current top ten of the votes.
    pub fn finalize(&mut self) -> &RankedResult {
        self.results = Ranking::finalize(&self.votes);
        debug!(
            "finalize: {:?} {} -> {:?}",
            self.id,
            self.name,
            self.results.awarded()
        );
        &self.results
    }

    /// Points given to the taker by the last finalized ranking.
    pub fn points_to(&self, taker: StateId) -> u32 {
        self.results.points_for(taker)
    }

    /// Raw votes currently recorded for the taker.
    pub fn votes_to(&self, taker: StateId) -> u64 {
        self.votes.count_for(taker)
    }

    /// Deep copy that either completes or leaves nothing behind.
    pub fn try_clone(&self) -> Result<State, ContestErrors> {
        let mut name = String::new();
        name.try_reserve_exact(self.name.len())?;
        name.push_str(&self.name);
        let mut song = String::new();
        song.try_reserve_exact(self.song.len())?;
        song.push_str(&self.song);
        Ok(State {
            id: self.id,
            name,
            song,
            votes: self.votes.try_clone()?,
            results: self.results,
            total_score: self.total_score,
            friendlied: self.friendlied,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_is_blank() {
        let s = State::new(StateId(3), "israel", "toy");
        assert_eq!(s.id(), StateId(3));
        assert_eq!(s.name(), "israel");
        assert_eq!(s.song(), "toy");
        assert!(s.votes().is_empty());
        assert!(s.results().is_empty());
        assert_eq!(s.total_score(), 0.0);
        assert!(!s.is_friendlied());
    }

    #[test]
    fn votes_and_points() {
        let mut s = State::new(StateId(1), "france", "la vie");
        s.add_vote(StateId(2));
        s.add_vote(StateId(2));
        s.add_vote(StateId(3));
        // Not finalized yet.
        assert_eq!(s.points_to(StateId(2)), 0);
        s.finalize();
        assert_eq!(s.points_to(StateId(2)), 12);
        assert_eq!(s.points_to(StateId(3)), 10);
        assert_eq!(s.votes_to(StateId(2)), 2);

        s.remove_vote(StateId(2));
        s.remove_vote(StateId(2));
        assert_eq!(s.votes_to(StateId(2)), 0);
        // The previous ranking stays until the next finalize.
        assert_eq!(s.points_to(StateId(2)), 12);
        s.finalize();
        assert_eq!(s.points_to(StateId(2)), 0);
        assert_eq!(s.points_to(StateId(3)), 12);
    }

    #[test]
    fn remove_all_votes() {
        let mut s = State::new(StateId(1), "spain", "ole");
        s.add_vote(StateId(4));
        s.add_vote(StateId(4));
        assert_eq!(s.remove_all_votes(StateId(4)), Ok(2));
        assert_eq!(s.remove_all_votes(StateId(4)), Err(ContestErrors::NotFound));
    }

    #[test]
    fn copy_is_independent() {
        let mut s = State::new(StateId(1), "malta", "sea");
        s.add_vote(StateId(2));
        s.finalize();
        s.set_total_score(4.5);
        let copy = s.try_clone().unwrap();
        assert_eq!(copy, s);

        s.add_vote(StateId(3));
        s.add_vote(StateId(3));
        s.finalize();
        s.set_friendlied(true);
        assert_eq!(copy.votes_to(StateId(3)), 0);
        assert_eq!(copy.votes_to(StateId(2)), 1);
        assert_eq!(copy.points_to(StateId(2)), 12);
        assert_eq!(copy.points_to(StateId(3)), 0);
        assert_eq!(copy.total_score(), 4.5);
        assert!(!copy.is_friendlied());
    }
}
