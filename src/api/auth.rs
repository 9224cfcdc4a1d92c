use chrono::Utc;

use crate::error::{Error, Result};
use crate::logging::Operation;
use crate::model::{
    api::{Login, VoterProfile},
    auth::{AuthToken, SessionScope},
    common::VoterId,
    db::{Vote, Voter},
    substrate::Substrate,
};
use crate::Platform;

use super::common::has_vote;

impl<S> Platform<S>
where
    S: Substrate,
{
    /// Register a new voter, who has not voted yet.
    pub fn register(&mut self, profile: VoterProfile) -> Result<Voter> {
        let op = Operation::start("register");
        op.finish(self.register_voter(profile))
    }

    fn register_voter(&mut self, profile: VoterProfile) -> Result<Voter> {
        // Validate before touching the store.
        let new = profile.validate(Utc::now().date_naive())?;

        self.store.ensure_seed()?;
        let mut voters = self.store.read::<Voter>()?;
        if voters.iter().any(|voter| voter.cedula == new.cedula) {
            return Err(Error::conflict(format!(
                "A voter with cedula {} is already registered",
                new.cedula
            )));
        }
        if voters.iter().any(|voter| voter.email == new.email) {
            return Err(Error::conflict(format!(
                "A voter with email {} is already registered",
                new.email
            )));
        }

        let voter = new.into_voter(VoterId::generate(), Utc::now())?;
        voters.push(voter.clone());
        self.store.write(&voters)?;

        info!("Registered voter {} in {}", voter.id, voter.municipality);
        Ok(voter)
    }

    /// Check a voter's credentials and start a session for them.
    ///
    /// A remembered session goes in the persistent scope, anything else in the
    /// ephemeral one. The other scope is cleared either way.
    pub fn login(&mut self, cedula: &str, password: &str, remember: bool) -> Result<Login> {
        let op = Operation::start("login");
        op.finish(self.login_voter(cedula, password, remember))
    }

    fn login_voter(&mut self, cedula: &str, password: &str, remember: bool) -> Result<Login> {
        self.store.ensure_seed()?;
        let votes = self.store.read::<Vote>()?;
        let mut voters = self.store.read::<Voter>()?;

        let Some(voter) = voters.iter_mut().find(|voter| voter.cedula == cedula) else {
            return Err(Error::unauthorized("Invalid cedula or password"));
        };
        if !voter.verify_password(password)? {
            return Err(Error::unauthorized("Invalid cedula or password"));
        }

        // Reconcile the flag with the ledger.
        voter.has_voted = has_vote(&votes, &voter.id);
        voter.touch();
        let voter = voter.clone();
        self.store.write(&voters)?;

        let scope = SessionScope::for_remember(remember);
        let token = AuthToken::new(voter.id.clone(), scope).encode(&self.config)?;
        self.sessions.set(scope, token.clone())?;
        self.sessions.clear(scope.other())?;

        info!("Voter {} logged in with a {scope} session", voter.id);
        Ok(Login { token, voter })
    }

    /// End the session in both scopes.
    pub fn logout(&mut self) -> Result<()> {
        let op = Operation::start("logout");
        op.finish(self.sessions.clear_all())
    }

    /// The voter behind the current session.
    pub fn current_user(&mut self) -> Result<Voter> {
        let op = Operation::start("current_user");
        op.finish(self.session_voter())
    }

    /// The stored session token, persistent scope first, whether or not it is still valid.
    pub fn token(&self) -> Result<Option<String>> {
        for scope in SessionScope::ALL {
            if let Some(token) = self.sessions.get(scope)? {
                return Ok(Some(token));
            }
        }
        Ok(None)
    }

    /// Is there a valid session?
    pub fn is_authenticated(&self) -> Result<bool> {
        Ok(self.sessions.resolve(&self.config)?.is_some())
    }

    /// Resolve a voter from a token presented directly, ignoring the session slots.
    pub fn voter_for_token(&mut self, token: &str) -> Result<Voter> {
        let op = Operation::start("voter_for_token");
        let result = AuthToken::decode(token, &self.config)
            .map_err(|e| Error::unauthenticated(format!("Invalid session token: {e}")))
            .and_then(|token| self.voter_by_id(&token.voter_id));
        op.finish(result)
    }
}
