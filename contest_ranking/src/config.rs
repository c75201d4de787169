// ********* Identifiers ***********

use std::error::Error;
use std::fmt::Display;

/// The identity of a participating state.
///
/// States are both givers (they vote) and recipients (they get points).
/// Only equality is meaningful to a contest; the numeric order is used
/// by the ranking engine to break ties deterministically.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct StateId(pub u32);

/// The identity of a judge. Judges only give points.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub struct JudgeId(pub u32);

impl Display for StateId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "state #{}", self.0)
    }
}

impl Display for JudgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "judge #{}", self.0)
    }
}

// ********* Point table ***********

/// Number of recipients that receive points from a single giver.
pub const RANKING_SIZE: usize = 10;

/// Points awarded by rank position. Slot 0 is the favourite.
pub const POINT_TABLE: [u32; RANKING_SIZE] = [12, 10, 8, 7, 6, 5, 4, 3, 2, 1];

/// Points awarded to the recipient at the given position, 0 outside the table.
pub fn points_for_position(position: usize) -> u32 {
    POINT_TABLE.get(position).cloned().unwrap_or(0)
}

// ******** Output data structures *********

/// The final position of one state.
#[derive(PartialEq, Debug, Clone)]
pub struct Standing {
    pub state: StateId,
    pub name: String,
    pub score: f64,
}

/// The outcome of a full contest run.
#[derive(PartialEq, Debug, Clone)]
pub struct ContestResult {
    /// Sorted by decreasing score, ties by increasing state id.
    pub standings: Vec<Standing>,
    pub audience_percent: u32,
}

impl ContestResult {
    /// The names of the states, from the winner down.
    pub fn ranked_names(&self) -> Vec<String> {
        self.standings.iter().map(|s| s.name.clone()).collect()
    }
}

/// Errors reported by the ranking engine and the contest registry.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum ContestErrors {
    /// An absent giver, a malformed judge submission or an invalid record.
    InvalidArgument(String),
    /// Clearing a vote pair that was never recorded.
    NotFound,
    /// Storage could not be obtained while creating or copying data.
    AllocationFailure,
}

impl Error for ContestErrors {}

impl Display for ContestErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContestErrors::InvalidArgument(reason) => {
                write!(f, "ContestError: invalid argument: {}", reason)
            }
            ContestErrors::NotFound => write!(f, "ContestError: no such vote pair"),
            ContestErrors::AllocationFailure => write!(f, "ContestError: allocation failure"),
        }
    }
}

impl From<std::collections::TryReserveError> for ContestErrors {
    fn from(_: std::collections::TryReserveError) -> Self {
        ContestErrors::AllocationFailure
    }
}

// ********* Configuration **********

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ContestRules {
    /// Weight (in percent) of the state votes in the final score.
    /// The judges get the remainder.
    pub audience_percent: u32,
}

impl ContestRules {
    pub const DEFAULT_RULES: ContestRules = ContestRules {
        audience_percent: 50,
    };

    pub fn validate(&self) -> Result<(), ContestErrors> {
        if self.audience_percent == 0 || self.audience_percent > 100 {
            return Err(ContestErrors::InvalidArgument(format!(
                "audience percent must be within 1..=100, got {}",
                self.audience_percent
            )));
        }
        Ok(())
    }
}

impl Default for ContestRules {
    fn default() -> Self {
        ContestRules::DEFAULT_RULES
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_table_positions() {
        assert_eq!(points_for_position(0), 12);
        assert_eq!(points_for_position(1), 10);
        assert_eq!(points_for_position(9), 1);
        assert_eq!(points_for_position(10), 0);
        assert_eq!(POINT_TABLE.iter().sum::<u32>(), 58);
    }

    #[test]
    fn audience_percent_bounds() {
        assert!(ContestRules::DEFAULT_RULES.validate().is_ok());
        assert!(ContestRules { audience_percent: 100 }.validate().is_ok());
        assert!(ContestRules { audience_percent: 0 }.validate().is_err());
        assert!(ContestRules { audience_percent: 101 }.validate().is_err());
    }
}
