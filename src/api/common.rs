use crate::error::{Error, Result};
use crate::model::{
    common::VoterId,
    db::{Vote, Voter},
    substrate::Substrate,
};
use crate::Platform;

/// Has the given voter got a vote in `votes`?
pub(crate) fn has_vote(votes: &[Vote], voter_id: &VoterId) -> bool {
    votes.iter().any(|vote| &vote.voter_id == voter_id)
}

impl<S> Platform<S>
where
    S: Substrate,
{
    /// Look up a voter from the store by ID.
    pub(crate) fn voter_by_id(&mut self, voter_id: &VoterId) -> Result<Voter> {
        self.store.ensure_seed()?;
        self.store
            .read::<Voter>()?
            .into_iter()
            .find(|voter| &voter.id == voter_id)
            .ok_or_else(|| Error::not_found(format!("No voter found with ID {voter_id}")))
    }

    /// Return the voter behind the current session.
    pub(crate) fn session_voter(&mut self) -> Result<Voter> {
        let token = self
            .sessions
            .resolve(&self.config)?
            .ok_or_else(|| Error::unauthenticated("No active session"))?;
        self.voter_by_id(&token.voter_id)
    }
}
