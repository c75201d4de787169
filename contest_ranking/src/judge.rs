use crate::config::{ContestErrors, JudgeId, StateId};
use crate::ranking::JudgeSubmission;

/// A member of the professional jury.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Judge {
    id: JudgeId,
    name: String,
    submission: JudgeSubmission,
}

impl Judge {
    /// Fails if the results do not rank exactly ten states.
    pub fn new(id: JudgeId, name: &str, results: &[StateId]) -> Result<Judge, ContestErrors> {
        Ok(Judge {
            id,
            name: name.to_string(),
            submission: JudgeSubmission::new(results)?,
        })
    }

    pub fn id(&self) -> JudgeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn submission(&self) -> &JudgeSubmission {
        &self.submission
    }

    pub fn points_to(&self, state: StateId) -> u32 {
        self.submission.ranking().points_for(state)
    }

    pub fn ranks(&self, state: StateId) -> bool {
        self.submission.ranking().contains(state)
    }

    pub fn try_clone(&self) -> Result<Judge, ContestErrors> {
        let mut name = String::new();
        name.try_reserve_exact(self.name.len())?;
        name.push_str(&self.name);
        Ok(Judge {
            id: self.id,
            name,
            submission: self.submission,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn results() -> Vec<StateId> {
        (1..=10).map(StateId).collect()
    }

    #[test]
    fn judge_points() {
        let j = Judge::new(JudgeId(7), "simon", &results()).unwrap();
        assert_eq!(j.id(), JudgeId(7));
        assert_eq!(j.name(), "simon");
        assert_eq!(j.points_to(StateId(1)), 12);
        assert_eq!(j.points_to(StateId(3)), 8);
        assert_eq!(j.points_to(StateId(10)), 1);
        assert_eq!(j.points_to(StateId(11)), 0);
        assert!(j.ranks(StateId(5)));
        assert!(!j.ranks(StateId(0)));
    }

    #[test]
    fn incomplete_results_rejected() {
        let res = Judge::new(JudgeId(1), "paula", &results()[..9]);
        assert!(matches!(res, Err(ContestErrors::InvalidArgument(_))));
    }

    #[test]
    fn copy() {
        let j = Judge::new(JudgeId(2), "randy", &results()).unwrap();
        let copy = j.try_clone().unwrap();
        assert_eq!(copy, j);
        drop(j);
        assert_eq!(copy.points_to(StateId(2)), 10);
    }
}
