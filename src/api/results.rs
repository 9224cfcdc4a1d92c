use std::collections::{BTreeMap, HashMap};

use chrono::Utc;

use crate::error::Result;
use crate::logging::Operation;
use crate::model::{
    api::{Statistics, VoteFilter},
    common::{AgeBucket, CandidateId, Gender, Municipality, VoterId},
    db::{Candidate, Vote, Voter},
    substrate::Substrate,
};
use crate::Platform;

/// Lookup of the voter and candidate a vote refers to.
#[derive(Debug)]
pub struct Join<'a> {
    voters: HashMap<&'a VoterId, &'a Voter>,
    candidates: HashMap<&'a CandidateId, &'a Candidate>,
}

impl<'a> Join<'a> {
    pub fn new(voters: &'a [Voter], candidates: &'a [Candidate]) -> Self {
        Self {
            voters: voters.iter().map(|voter| (&voter.id, voter)).collect(),
            candidates: candidates
                .iter()
                .map(|candidate| (&candidate.id, candidate))
                .collect(),
        }
    }

    pub fn voter(&self, vote: &Vote) -> Option<&'a Voter> {
        self.voters.get(&vote.voter_id).copied()
    }

    pub fn candidate(&self, vote: &Vote) -> Option<&'a Candidate> {
        self.candidates.get(&vote.candidate_id).copied()
    }
}

impl<S> Platform<S>
where
    S: Substrate,
{
    /// Votes passing the filter, in the order they were cast.
    pub fn list_votes(&mut self, filter: Option<&VoteFilter>) -> Result<Vec<Vote>> {
        let op = Operation::start("list_votes");
        op.finish(self.filtered_votes(filter))
    }

    fn filtered_votes(&mut self, filter: Option<&VoteFilter>) -> Result<Vec<Vote>> {
        self.store.ensure_seed()?;
        let votes = self.store.read::<Vote>()?;
        let filter = match filter {
            Some(filter) if !filter.is_empty() => filter,
            _ => return Ok(votes),
        };

        let voters = self.store.read::<Voter>()?;
        let candidates = self.store.read::<Candidate>()?;
        let join = Join::new(&voters, &candidates);
        let today = Utc::now().date_naive();

        Ok(votes
            .into_iter()
            .filter(|vote| filter.matches(vote, join.voter(vote), join.candidate(vote), today))
            .collect())
    }

    /// Statistics over every vote.
    pub fn statistics(&mut self) -> Result<Statistics> {
        let op = Operation::start("statistics");
        op.finish(self.tally(None))
    }

    /// Statistics over the votes passing the filter. Participation is still relative
    /// to the whole electorate.
    pub fn statistics_for(&mut self, filter: &VoteFilter) -> Result<Statistics> {
        let op = Operation::start("statistics_for");
        op.finish(self.tally(Some(filter)))
    }

    fn tally(&mut self, filter: Option<&VoteFilter>) -> Result<Statistics> {
        let votes = self.filtered_votes(filter)?;
        let registered = self.store.read::<Voter>()?.len();
        Ok(Statistics::tally(&votes, registered))
    }

    pub fn votes_by_candidate(&mut self) -> Result<BTreeMap<CandidateId, u64>> {
        let op = Operation::start("votes_by_candidate");
        op.finish(self.tally(None).map(|stats| stats.votes_by_candidate))
    }

    pub fn votes_by_municipality(&mut self) -> Result<BTreeMap<Municipality, u64>> {
        let op = Operation::start("votes_by_municipality");
        op.finish(self.tally(None).map(|stats| stats.votes_by_municipality))
    }

    /// Vote counts by the voter's gender. Votes from missing voters are skipped.
    pub fn votes_by_gender(&mut self) -> Result<BTreeMap<Gender, u64>> {
        let op = Operation::start("votes_by_gender");
        op.finish(self.breakdown(|voter| Some(voter.gender)))
    }

    /// Vote counts by the voter's current age range. Votes from missing voters are skipped.
    pub fn votes_by_age_range(&mut self) -> Result<BTreeMap<AgeBucket, u64>> {
        let op = Operation::start("votes_by_age_range");
        op.finish(self.breakdown(|voter| AgeBucket::for_age(voter.age())))
    }

    fn breakdown<K, F>(&mut self, key: F) -> Result<BTreeMap<K, u64>>
    where
        K: Ord,
        F: Fn(&Voter) -> Option<K>,
    {
        self.store.ensure_seed()?;
        let votes = self.store.read::<Vote>()?;
        let voters = self.store.read::<Voter>()?;
        let join = Join::new(&voters, &[]);

        let mut counts = BTreeMap::<K, u64>::new();
        for group in votes.iter().filter_map(|vote| join.voter(vote)).filter_map(&key) {
            *counts.entry(group).or_default() += 1;
        }
        Ok(counts)
    }
}
