use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::common::{age_on, AgeBucket, Gender, Municipality};
use crate::model::db::{Candidate, Vote, Voter};

/// A conjunction of optional restrictions on the vote set. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteFilter {
    /// Where the vote was cast.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<Municipality>,
    /// The voter's gender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    /// The candidate's party label, matched exactly.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub party: Option<String>,
    /// The voter's current age range.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age_range: Option<AgeBucket>,
}

impl VoteFilter {
    pub fn municipality(mut self, municipality: Municipality) -> Self {
        self.municipality = Some(municipality);
        self
    }

    pub fn gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn party(mut self, party: impl Into<String>) -> Self {
        self.party = Some(party.into());
        self
    }

    pub fn age_range(mut self, age_range: AgeBucket) -> Self {
        self.age_range = Some(age_range);
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Does the vote pass every set restriction?
    ///
    /// `voter` and `candidate` are the records the vote refers to, if they exist.
    /// A restriction on a missing record does not apply.
    pub fn matches(
        &self,
        vote: &Vote,
        voter: Option<&Voter>,
        candidate: Option<&Candidate>,
        today: NaiveDate,
    ) -> bool {
        if let Some(municipality) = self.municipality {
            if vote.municipality != municipality {
                return false;
            }
        }
        if let (Some(gender), Some(voter)) = (self.gender, voter) {
            if voter.gender != gender {
                return false;
            }
        }
        if let (Some(party), Some(candidate)) = (&self.party, candidate) {
            if &candidate.party != party {
                return false;
            }
        }
        if let (Some(bucket), Some(voter)) = (self.age_range, voter) {
            if !bucket.contains(age_on(voter.birth_date, today)) {
                return false;
            }
        }
        true
    }
}
