/*!
Points-based scoring for song contests.

Every participating state votes for the others. Once voting closes, the ten
states with the most votes from a given state receive 12, 10, 8, 7, 6, 5, 4,
3, 2 and 1 points, and everyone else gets nothing. A panel of judges hands in
complete top-ten rankings that are scored with the same table.

```
use contest_ranking::*;

let mut contest = Contest::new();
contest.add_state(StateId(1), "france", "la vie")?;
contest.add_state(StateId(2), "israel", "toy")?;
contest.add_vote(StateId(1), StateId(2))?;
contest.finalize(StateId(1))?;

assert_eq!(contest.points_from_to(StateId(1), StateId(2))?, 12);
assert_eq!(contest.raw_votes_from_to(StateId(1), StateId(2))?, 1);
# Ok::<(), ContestErrors>(())
```
*/
mod config;
mod judge;
mod ledger;
pub mod manual;
mod ranking;
mod state;

use log::{debug, info};
use std::collections::{BTreeMap, HashSet};

pub use crate::config::*;
pub use crate::judge::Judge;
pub use crate::ledger::VoteLedger;
pub use crate::ranking::{
    finalize, points_from_judge, points_from_to, raw_votes_from_to, JudgeSubmission, RankedResult,
    Ranking,
};
pub use crate::state::State;

/// All the states and judges of a contest, indexed by id.
///
/// Operations that name a state or a judge that is not registered fail with
/// `ContestErrors::InvalidArgument`. Queries on registered givers never fail.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct Contest {
    states: BTreeMap<StateId, State>,
    judges: BTreeMap<JudgeId, Judge>,
}

// Names and songs are lowercase words separated by spaces.
fn check_name(kind: &str, name: &str) -> Result<(), ContestErrors> {
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_lowercase() || c == ' ') {
        return Err(ContestErrors::InvalidArgument(format!(
            "invalid {} {:?}",
            kind, name
        )));
    }
    Ok(())
}

fn missing_state(id: StateId) -> ContestErrors {
    ContestErrors::InvalidArgument(format!("{} is not registered", id))
}

fn missing_judge(id: JudgeId) -> ContestErrors {
    ContestErrors::InvalidArgument(format!("{} is not registered", id))
}

impl Contest {
    pub fn new() -> Contest {
        Contest {
            states: BTreeMap::new(),
            judges: BTreeMap::new(),
        }
    }

    // ******** Registration *********

    pub fn add_state(&mut self, id: StateId, name: &str, song: &str) -> Result<(), ContestErrors> {
        check_name("state name", name)?;
        check_name("song name", song)?;
        if self.states.contains_key(&id) {
            return Err(ContestErrors::InvalidArgument(format!(
                "{} is already registered",
                id
            )));
        }
        self.states.insert(id, State::new(id, name, song));
        Ok(())
    }

    /// Removes a state, the votes it received and every judge that ranked it.
    ///
    /// Rankings already computed by other states are left as they are until
    /// they are finalized again.
    pub fn remove_state(&mut self, id: StateId) -> Result<State, ContestErrors> {
        let removed = self.states.remove(&id).ok_or_else(|| missing_state(id))?;
        for s in self.states.values_mut() {
            if let Ok(count) = s.remove_all_votes(id) {
                debug!(
                    "remove_state: dropped {} votes from {:?} to {:?}",
                    count,
                    s.id(),
                    id
                );
            }
        }
        let before = self.judges.len();
        self.judges.retain(|_, j| !j.ranks(id));
        if self.judges.len() < before {
            info!(
                "remove_state: removed {} judges that ranked {:?}",
                before - self.judges.len(),
                id
            );
        }
        Ok(removed)
    }

    /// Registers a judge with its complete ranking of registered states.
    pub fn add_judge(
        &mut self,
        id: JudgeId,
        name: &str,
        results: &[StateId],
    ) -> Result<(), ContestErrors> {
        check_name("judge name", name)?;
        if self.judges.contains_key(&id) {
            return Err(ContestErrors::InvalidArgument(format!(
                "{} is already registered",
                id
            )));
        }
        let mut seen: HashSet<StateId> = HashSet::new();
        for sid in results.iter() {
            if !self.states.contains_key(sid) {
                return Err(missing_state(*sid));
            }
            if !seen.insert(*sid) {
                return Err(ContestErrors::InvalidArgument(format!(
                    "{} ranks {} more than once",
                    id, sid
                )));
            }
        }
        let judge = Judge::new(id, name, results)?;
        self.judges.insert(id, judge);
        Ok(())
    }

    pub fn remove_judge(&mut self, id: JudgeId) -> Result<Judge, ContestErrors> {
        self.judges.remove(&id).ok_or_else(|| missing_judge(id))
    }

    // ******** Vote intake *********

    fn check_pair(&self, giver: StateId, taker: StateId) -> Result<(), ContestErrors> {
        if !self.states.contains_key(&taker) {
            return Err(missing_state(taker));
        }
        if giver == taker {
            return Err(ContestErrors::InvalidArgument(format!(
                "{} cannot vote for itself",
                giver
            )));
        }
        Ok(())
    }

    pub fn add_vote(&mut self, giver: StateId, taker: StateId) -> Result<(), ContestErrors> {
        self.check_pair(giver, taker)?;
        self.state_mut(giver)?.add_vote(taker);
        Ok(())
    }

    /// Adds `count` votes at once. Fails if the total for the pair would overflow.
    pub fn add_votes(
        &mut self,
        giver: StateId,
        taker: StateId,
        count: u64,
    ) -> Result<(), ContestErrors> {
        self.check_pair(giver, taker)?;
        self.state_mut(giver)?.add_votes(taker, count)
    }

    pub fn remove_vote(&mut self, giver: StateId, taker: StateId) -> Result<(), ContestErrors> {
        self.check_pair(giver, taker)?;
        self.state_mut(giver)?.remove_vote(taker);
        Ok(())
    }

    /// Removes every vote from the giver to the taker, returning how many there were.
    pub fn clear_votes(&mut self, giver: StateId, taker: StateId) -> Result<u64, ContestErrors> {
        self.check_pair(giver, taker)?;
        self.state_mut(giver)?.remove_all_votes(taker)
    }

    // ******** Ranking and queries *********

    pub fn finalize(&mut self, giver: StateId) -> Result<RankedResult, ContestErrors> {
        Ok(*self.state_mut(giver)?.finalize())
    }

    pub fn finalize_all(&mut self) {
        for s in self.states.values_mut() {
            s.finalize();
        }
    }

    pub fn points_from_to(&self, giver: StateId, taker: StateId) -> Result<u32, ContestErrors> {
        Ok(self.state(giver)?.points_to(taker))
    }

    pub fn raw_votes_from_to(&self, giver: StateId, taker: StateId) -> Result<u64, ContestErrors> {
        Ok(self.state(giver)?.votes_to(taker))
    }

    pub fn points_from_judge(&self, judge: JudgeId, taker: StateId) -> Result<u32, ContestErrors> {
        Ok(self.judge(judge)?.points_to(taker))
    }

    pub fn state(&self, id: StateId) -> Result<&State, ContestErrors> {
        self.states.get(&id).ok_or_else(|| missing_state(id))
    }

    pub fn state_mut(&mut self, id: StateId) -> Result<&mut State, ContestErrors> {
        self.states.get_mut(&id).ok_or_else(|| missing_state(id))
    }

    pub fn judge(&self, id: JudgeId) -> Result<&Judge, ContestErrors> {
        self.judges.get(&id).ok_or_else(|| missing_judge(id))
    }

    /// The states, by increasing id.
    pub fn states(&self) -> impl Iterator<Item = &State> {
        self.states.values()
    }

    /// The judges, by increasing id.
    pub fn judges(&self) -> impl Iterator<Item = &Judge> {
        self.judges.values()
    }

    /// Deep copy of all the states and judges.
    pub fn try_clone(&self) -> Result<Contest, ContestErrors> {
        let mut states: BTreeMap<StateId, State> = BTreeMap::new();
        for (sid, s) in self.states.iter() {
            states.insert(*sid, s.try_clone()?);
        }
        let mut judges: BTreeMap<JudgeId, Judge> = BTreeMap::new();
        for (jid, j) in self.judges.iter() {
            judges.insert(*jid, j.try_clone()?);
        }
        Ok(Contest { states, judges })
    }

    // ******** Aggregate scoring *********

    /// Finalizes every state and computes the final standings.
    ///
    /// The score of a state is the weighted sum of the average points it got
    /// from the other states and the average points it got from the judges.
    /// The scores are also recorded in each state.
    pub fn run_contest(&mut self, rules: &ContestRules) -> Result<ContestResult, ContestErrors> {
        rules.validate()?;
        info!(
            "run_contest: {} states, {} judges, rules: {:?}",
            self.states.len(),
            self.judges.len(),
            rules
        );
        self.finalize_all();

        // Scores are compared as exact fractions over a common denominator:
        // p/100 * sp/ns + (100-p)/100 * jp/nj = (p*sp*nj + (100-p)*jp*ns) / (100*ns*nj)
        let percent = rules.audience_percent as u64;
        let num_states = self.states.len() as u64;
        let num_judges = self.judges.len().max(1) as u64;
        let denominator = 100 * num_states * num_judges;

        let mut scores: Vec<(StateId, u64)> = Vec::new();
        for sid in self.states.keys() {
            let state_points: u64 = self.states.values().map(|g| g.points_to(*sid) as u64).sum();
            let judge_points: u64 = self.judges.values().map(|j| j.points_to(*sid) as u64).sum();
            let numerator = percent * state_points * num_judges
                + (100 - percent) * judge_points * num_states;
            debug!(
                "run_contest: {:?} state points: {} judge points: {} total: {}/{}",
                sid, state_points, judge_points, numerator, denominator
            );
            scores.push((*sid, numerator));
        }
        scores.sort_by(|(sid1, n1), (sid2, n2)| n2.cmp(n1).then(sid1.cmp(sid2)));

        let mut standings: Vec<Standing> = Vec::new();
        for (sid, numerator) in scores {
            let total = numerator as f64 / denominator as f64;
            let s = self.state_mut(sid)?;
            s.set_total_score(total);
            standings.push(Standing {
                state: sid,
                name: s.name().to_string(),
                score: total,
            });
        }
        for (idx, st) in standings.iter().enumerate() {
            info!("{:>3}. {:<20} {:.3}", idx + 1, st.name, st.score);
        }

        Ok(ContestResult {
            standings,
            audience_percent: rules.audience_percent,
        })
    }

    /// The standings computed from the state votes only.
    pub fn run_audience_favorite(&mut self) -> Result<ContestResult, ContestErrors> {
        self.run_contest(&ContestRules {
            audience_percent: 100,
        })
    }

    /// Pairs of states that gave each other 12 points, smaller id first.
    ///
    /// Every state is finalized first. The states that belong to a pair are
    /// flagged as friendlied, all the others are cleared.
    pub fn friendly_states(&mut self) -> Vec<(StateId, StateId)> {
        self.finalize_all();
        let favorites: BTreeMap<StateId, StateId> = self
            .states
            .values()
            .filter_map(|s| s.results().favorite().map(|fav| (s.id(), fav)))
            .collect();
        let pairs: Vec<(StateId, StateId)> = favorites
            .iter()
            .filter(|(sid, fav)| sid < fav && favorites.get(*fav) == Some(*sid))
            .map(|(sid, fav)| (*sid, *fav))
            .collect();
        for s in self.states.values_mut() {
            let sid = s.id();
            s.set_friendlied(pairs.iter().any(|(a, b)| *a == sid || *b == sid));
        }
        debug!("friendly_states: {:?}", pairs);
        pairs
    }
}
