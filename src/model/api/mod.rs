//! Types exchanged with collaborators through the [`Platform`](crate::Platform) operations.

mod filter;
mod registration;
mod statistics;

pub use filter::VoteFilter;
pub use registration::{NewVoter, VoterProfile, MIN_PASSWORD_LEN};
pub use statistics::{CandidateResult, Statistics};

use serde::{Deserialize, Serialize};

use crate::model::db::Voter;

/// The outcome of a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Login {
    /// Signed session token, also stored in the chosen session scope.
    pub token: String,
    pub voter: Voter,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStatus {
    pub has_voted: bool,
}
