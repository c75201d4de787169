use log::debug;

use crate::config::{points_for_position, ContestErrors, StateId, RANKING_SIZE};
use crate::ledger::VoteLedger;

/// An ordered list of at most ten recipients that are eligible for points.
///
/// Slot 0 gets 12 points, slot 9 gets 1 point. An empty slot awards nothing.
/// Rankings are produced either by selecting the top of a vote ledger
/// (`finalize`) or directly from a judge submission.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct Ranking {
    slots: [Option<StateId>; RANKING_SIZE],
}

/// The ranking derived from a state's votes.
pub type RankedResult = Ranking;

impl Ranking {
    pub const EMPTY: Ranking = Ranking {
        slots: [None; RANKING_SIZE],
    };

    /// Selects the ten recipients with the most votes.
    ///
    /// Recipients are ordered by decreasing count. On equal counts, the smaller
    /// id ranks higher, so the outcome does not depend on the iteration order
    /// of the ledger.
    pub fn finalize(ledger: &VoteLedger) -> Ranking {
        let mut tally: Vec<(StateId, u64)> = ledger.iter().filter(|(_, c)| *c > 0).collect();
        tally.sort_by(|(sid1, c1), (sid2, c2)| c2.cmp(c1).then(sid1.cmp(sid2)));
        debug!("finalize: sorted tally: {:?}", tally);

        let mut slots = [None; RANKING_SIZE];
        for (slot, (sid, _)) in slots.iter_mut().zip(tally.into_iter()) {
            *slot = Some(sid);
        }
        Ranking { slots }
    }

    fn from_ordered(recipients: &[StateId]) -> Result<Ranking, ContestErrors> {
        if recipients.len() != RANKING_SIZE {
            return Err(ContestErrors::InvalidArgument(format!(
                "a ranking needs exactly {} recipients, got {}",
                RANKING_SIZE,
                recipients.len()
            )));
        }
        let mut slots = [None; RANKING_SIZE];
        for (slot, sid) in slots.iter_mut().zip(recipients.iter()) {
            *slot = Some(*sid);
        }
        Ok(Ranking { slots })
    }

    /// The position of the recipient, if it was ranked.
    pub fn position_of(&self, recipient: StateId) -> Option<usize> {
        self.slots.iter().position(|s| *s == Some(recipient))
    }

    /// Points awarded to the recipient, 0 if not ranked.
    pub fn points_for(&self, recipient: StateId) -> u32 {
        self.position_of(recipient)
            .map(points_for_position)
            .unwrap_or(0)
    }

    pub fn slots(&self) -> &[Option<StateId>; RANKING_SIZE] {
        &self.slots
    }

    /// The recipient in the top slot, which receives 12 points.
    pub fn favorite(&self) -> Option<StateId> {
        self.slots[0]
    }

    /// The ranked recipients with their points, best first.
    pub fn awarded(&self) -> Vec<(StateId, u32)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(idx, s)| s.map(|sid| (sid, points_for_position(idx))))
            .collect()
    }

    pub fn contains(&self, recipient: StateId) -> bool {
        self.position_of(recipient).is_some()
    }

    /// Number of filled slots.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Ranking {
    fn default() -> Self {
        Ranking::EMPTY
    }
}

/// The complete ranking supplied by a judge.
///
/// Judges do not count votes: they hand in the ten recipients in order.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub struct JudgeSubmission(Ranking);

impl JudgeSubmission {
    /// Fails unless exactly ten recipients are given.
    pub fn new(recipients: &[StateId]) -> Result<JudgeSubmission, ContestErrors> {
        Ranking::from_ordered(recipients).map(JudgeSubmission)
    }

    pub fn ranking(&self) -> &Ranking {
        &self.0
    }

    /// The submitted recipients, best first.
    pub fn recipients(&self) -> Vec<StateId> {
        self.0.slots.iter().filter_map(|s| *s).collect()
    }
}

/// Computes the ranked result of a ledger. The ledger is not modified.
pub fn finalize(ledger: &VoteLedger) -> RankedResult {
    Ranking::finalize(ledger)
}

/// Points given by a finalized state to the recipient.
pub fn points_from_to(ranked: &RankedResult, recipient: StateId) -> u32 {
    ranked.points_for(recipient)
}

/// Raw votes recorded in the ledger for the recipient.
pub fn raw_votes_from_to(ledger: &VoteLedger, recipient: StateId) -> u64 {
    ledger.count_for(recipient)
}

/// Points given by a judge to the recipient.
pub fn points_from_judge(submission: &JudgeSubmission, recipient: StateId) -> u32 {
    submission.ranking().points_for(recipient)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ledger_with(votes: &[(u32, u64)]) -> VoteLedger {
        let mut ledger = VoteLedger::new();
        for (sid, count) in votes {
            for _ in 0..*count {
                ledger.increment(StateId(*sid));
            }
        }
        ledger
    }

    fn ids(xs: &[u32]) -> Vec<StateId> {
        xs.iter().map(|x| StateId(*x)).collect()
    }

    #[test]
    fn short_ledger_is_padded() {
        // A=1, B=2, C=3, D=4
        let ledger = ledger_with(&[(2, 5), (1, 5), (3, 3), (4, 1)]);
        let res = finalize(&ledger);
        assert_eq!(
            &res.slots()[..5],
            &[
                Some(StateId(1)),
                Some(StateId(2)),
                Some(StateId(3)),
                Some(StateId(4)),
                None
            ]
        );
        assert_eq!(res.len(), 4);
        assert!(res.slots()[4..].iter().all(|s| s.is_none()));
        assert_eq!(points_from_to(&res, StateId(1)), 12);
        assert_eq!(points_from_to(&res, StateId(2)), 10);
        assert_eq!(points_from_to(&res, StateId(4)), 7);
        assert_eq!(points_from_to(&res, StateId(99)), 0);
    }

    #[test]
    fn empty_ledger() {
        let res = finalize(&VoteLedger::new());
        assert_eq!(res, Ranking::EMPTY);
        assert!(res.is_empty());
        assert_eq!(res.favorite(), None);
        assert_eq!(points_from_to(&res, StateId(0)), 0);
    }

    #[test]
    fn state_zero_is_not_a_sentinel() {
        let ledger = ledger_with(&[(0, 1)]);
        let res = finalize(&ledger);
        assert_eq!(res.favorite(), Some(StateId(0)));
        assert_eq!(points_from_to(&res, StateId(0)), 12);
        assert_eq!(res.len(), 1);
    }

    #[test]
    fn keeps_top_ten_only() {
        // Recipient i gets i votes, for i in 1..=15
        let votes: Vec<(u32, u64)> = (1..=15).map(|i| (i, i as u64)).collect();
        let ledger = ledger_with(&votes);
        let res = finalize(&ledger);
        assert_eq!(res.len(), 10);
        assert_eq!(res.favorite(), Some(StateId(15)));
        assert_eq!(points_from_to(&res, StateId(6)), 1);
        assert_eq!(points_from_to(&res, StateId(5)), 0);

        let counts: Vec<u64> = res
            .slots()
            .iter()
            .map(|s| ledger.count_for(s.unwrap()))
            .collect();
        assert!(counts.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn ties_broken_by_smaller_id() {
        let votes: Vec<(u32, u64)> = (0..12).rev().map(|i| (i * 7 % 13, 3)).collect();
        let ledger = ledger_with(&votes);
        let first = finalize(&ledger);
        let mut expected: Vec<u32> = (0..12).map(|i| i * 7 % 13).collect();
        expected.sort();
        let expected: Vec<Option<StateId>> =
            expected.into_iter().take(10).map(|x| Some(StateId(x))).collect();
        assert_eq!(first.slots().to_vec(), expected);
        for _ in 0..5 {
            assert_eq!(finalize(&ledger), first);
        }
    }

    #[test]
    fn ranked_result_is_a_snapshot() {
        let mut ledger = ledger_with(&[(1, 2), (2, 1)]);
        let res = finalize(&ledger);
        ledger.increment(StateId(2));
        ledger.increment(StateId(2));
        assert_eq!(res.favorite(), Some(StateId(1)));
        assert_eq!(finalize(&ledger).favorite(), Some(StateId(2)));
    }

    #[test]
    fn judge_submission_length() {
        assert!(matches!(
            JudgeSubmission::new(&ids(&[1, 2, 3])),
            Err(ContestErrors::InvalidArgument(_))
        ));
        assert!(matches!(
            JudgeSubmission::new(&ids(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11])),
            Err(ContestErrors::InvalidArgument(_))
        ));
        assert!(JudgeSubmission::new(&[]).is_err());
        assert!(JudgeSubmission::new(&ids(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10])).is_ok());
    }

    #[test]
    fn judge_points_by_position() {
        let sub = JudgeSubmission::new(&ids(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1])).unwrap();
        assert_eq!(points_from_judge(&sub, StateId(10)), 12);
        assert_eq!(points_from_judge(&sub, StateId(9)), 10);
        assert_eq!(points_from_judge(&sub, StateId(8)), 8);
        assert_eq!(points_from_judge(&sub, StateId(1)), 1);
        assert_eq!(points_from_judge(&sub, StateId(11)), 0);
        assert_eq!(sub.recipients(), ids(&[10, 9, 8, 7, 6, 5, 4, 3, 2, 1]));
    }

    #[test]
    fn judge_and_votes_share_point_table() {
        let order = ids(&[3, 1, 4, 15, 9, 2, 6, 5, 35, 8]);
        let sub = JudgeSubmission::new(&order).unwrap();
        let votes: Vec<(u32, u64)> = order
            .iter()
            .enumerate()
            .map(|(idx, sid)| (sid.0, 100 - idx as u64))
            .collect();
        let res = finalize(&ledger_with(&votes));
        for sid in order.iter() {
            assert_eq!(points_from_judge(&sub, *sid), points_from_to(&res, *sid));
        }
        assert_eq!(res.awarded(), sub.ranking().awarded());
    }

    #[test]
    fn raw_votes() {
        let ledger = ledger_with(&[(4, 3)]);
        assert_eq!(raw_votes_from_to(&ledger, StateId(4)), 3);
        assert_eq!(raw_votes_from_to(&ledger, StateId(5)), 0);
    }
}
