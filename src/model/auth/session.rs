use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::model::substrate::{MemorySubstrate, Substrate};

use super::token::AuthToken;

/// Where a session token is kept.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionScope {
    /// Survives a restart, for "remember me" logins.
    Persistent,
    /// Lost when the process exits.
    Ephemeral,
}

impl SessionScope {
    /// Scopes in the order sessions are resolved.
    pub const ALL: [Self; 2] = [Self::Persistent, Self::Ephemeral];

    /// The substrate key of this scope's session slot.
    pub fn key(self) -> &'static str {
        match self {
            Self::Persistent => "session_persistent",
            Self::Ephemeral => "session_ephemeral",
        }
    }

    pub fn for_remember(remember: bool) -> Self {
        if remember {
            Self::Persistent
        } else {
            Self::Ephemeral
        }
    }

    pub fn other(self) -> Self {
        match self {
            Self::Persistent => Self::Ephemeral,
            Self::Ephemeral => Self::Persistent,
        }
    }
}

impl Display for SessionScope {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Persistent => "persistent",
            Self::Ephemeral => "ephemeral",
        })
    }
}

/// The two session slots, each holding at most one signed token.
#[derive(Debug)]
pub struct Sessions<S> {
    persistent: S,
    ephemeral: MemorySubstrate,
}

impl<S> Sessions<S>
where
    S: Substrate,
{
    pub fn new(persistent: S) -> Self {
        Self {
            persistent,
            ephemeral: MemorySubstrate::new(),
        }
    }

    fn slot(&self, scope: SessionScope) -> &dyn Substrate {
        match scope {
            SessionScope::Persistent => &self.persistent,
            SessionScope::Ephemeral => &self.ephemeral,
        }
    }

    fn slot_mut(&mut self, scope: SessionScope) -> &mut dyn Substrate {
        match scope {
            SessionScope::Persistent => &mut self.persistent,
            SessionScope::Ephemeral => &mut self.ephemeral,
        }
    }

    /// The raw token stored in the given scope.
    pub fn get(&self, scope: SessionScope) -> Result<Option<String>> {
        self.slot(scope).get(scope.key())
    }

    pub fn set(&mut self, scope: SessionScope, token: String) -> Result<()> {
        self.slot_mut(scope).put(scope.key(), token)
    }

    pub fn clear(&mut self, scope: SessionScope) -> Result<()> {
        self.slot_mut(scope).remove(scope.key())
    }

    pub fn clear_all(&mut self) -> Result<()> {
        for scope in SessionScope::ALL {
            self.clear(scope)?;
        }
        Ok(())
    }

    /// The first valid session, persistent scope first.
    ///
    /// Tokens that fail verification, or that were issued for the other scope, are skipped.
    pub fn resolve(&self, config: &Config) -> Result<Option<AuthToken>> {
        for scope in SessionScope::ALL {
            let Some(raw) = self.get(scope)? else {
                continue;
            };
            match AuthToken::decode(&raw, config) {
                Ok(token) if token.scope == scope => return Ok(Some(token)),
                Ok(token) => warn!("Ignoring {} token found in the {scope} slot", token.scope),
                Err(e) => warn!("Ignoring invalid {scope} session token: {e}"),
            }
        }
        Ok(None)
    }

    pub fn persistent(&self) -> &S {
        &self.persistent
    }
}
