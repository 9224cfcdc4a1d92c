use chrono::Utc;

use crate::error::{Error, Result};
use crate::logging::Operation;
use crate::model::{
    api::VoteStatus,
    common::VoteId,
    db::{Candidate, Vote, VoteMetadata, Voter},
    substrate::Substrate,
};
use crate::Platform;

use super::common::has_vote;

impl<S> Platform<S>
where
    S: Substrate,
{
    /// All candidates, in seeding order.
    pub fn list_candidates(&mut self) -> Result<Vec<Candidate>> {
        let op = Operation::start("list_candidates");
        let result = self
            .store
            .ensure_seed()
            .and_then(|()| self.store.read::<Candidate>());
        op.finish(result)
    }

    /// Get a single candidate.
    pub fn candidate(&mut self, candidate_id: &str) -> Result<Candidate> {
        let op = Operation::start("candidate");
        op.finish(self.candidate_by_id(candidate_id))
    }

    fn candidate_by_id(&mut self, candidate_id: &str) -> Result<Candidate> {
        self.store.ensure_seed()?;
        self.store
            .read::<Candidate>()?
            .into_iter()
            .find(|candidate| candidate.id == *candidate_id)
            .ok_or_else(|| Error::not_found(format!("No candidate found with ID {candidate_id}")))
    }

    /// Cast the current voter's one and only vote.
    pub fn submit_vote(
        &mut self,
        candidate_id: &str,
        metadata: Option<VoteMetadata>,
    ) -> Result<Vote> {
        let op = Operation::start("submit_vote");
        op.finish(self.cast_vote(candidate_id, metadata))
    }

    fn cast_vote(&mut self, candidate_id: &str, metadata: Option<VoteMetadata>) -> Result<Vote> {
        let voter = self.session_voter()?;

        let mut votes = self.store.read::<Vote>()?;
        if has_vote(&votes, &voter.id) {
            warn!("Voter {} attempted to vote twice", voter.id);
            return Err(Error::conflict(format!("Voter {} has already voted", voter.id)));
        }
        let candidate = self.candidate_by_id(candidate_id)?;

        let vote = Vote {
            id: VoteId::generate(),
            voter_id: voter.id.clone(),
            candidate_id: candidate.id,
            municipality: voter.municipality,
            timestamp: Utc::now(),
            metadata,
        };
        votes.push(vote.clone());
        self.store.write(&votes)?;

        let mut voters = self.store.read::<Voter>()?;
        if let Some(stored) = voters.iter_mut().find(|stored| stored.id == voter.id) {
            stored.has_voted = true;
            stored.touch();
        }
        self.store.write(&voters)?;

        info!("Accepted vote {} from {}", vote.id, vote.municipality);
        Ok(vote)
    }

    /// Has the current voter voted?
    pub fn vote_status(&mut self) -> Result<VoteStatus> {
        let op = Operation::start("vote_status");
        let result = self.session_voter().and_then(|voter| {
            let votes = self.store.read::<Vote>()?;
            Ok(VoteStatus {
                has_voted: has_vote(&votes, &voter.id),
            })
        });
        op.finish(result)
    }

    /// Delete every vote and mark every voter as not having voted.
    pub fn reset_all(&mut self) -> Result<()> {
        let op = Operation::start("reset_all");
        op.finish(self.reset_votes())
    }

    fn reset_votes(&mut self) -> Result<()> {
        self.store.ensure_seed()?;
        self.store.write::<Vote>(&[])?;

        let mut voters = self.store.read::<Voter>()?;
        for voter in voters.iter_mut() {
            voter.has_voted = false;
            voter.touch();
        }
        self.store.write(&voters)?;

        info!("Reset all votes for {} voter(s)", voters.len());
        Ok(())
    }
}
