use chrono::{serde::ts_seconds, DateTime, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::model::common::VoterId;

use super::session::SessionScope;

/// An authentication token representing a specific voter in a specific session scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    #[serde(rename = "sub")]
    pub voter_id: VoterId,
    #[serde(rename = "scp")]
    pub scope: SessionScope,
}

impl AuthToken {
    pub fn new(voter_id: VoterId, scope: SessionScope) -> Self {
        Self { voter_id, scope }
    }

    /// Sign this token, valid for the lifetime configured for its scope.
    pub fn encode(self, config: &Config) -> Result<String> {
        let ttl = match self.scope {
            SessionScope::Persistent => config.remember_ttl(),
            SessionScope::Ephemeral => config.session_ttl(),
        };
        let claims = Claims {
            token: self,
            expire_at: Utc::now() + ttl,
        };
        claims.sign(config)
    }

    /// Verify a signed token and check it has not expired.
    pub fn decode(token: &str, config: &Config) -> Result<Self> {
        let token = jsonwebtoken::decode(
            token,
            &DecodingKey::from_secret(config.jwt_secret()),
            &Validation::default(),
        )
        .map(|claims: TokenData<Claims>| claims.claims.token)?;
        Ok(token)
    }
}

/// Token claims: the token itself plus an expiry datetime.
#[derive(Serialize, Deserialize)]
struct Claims {
    #[serde(flatten)]
    token: AuthToken,
    #[serde(rename = "exp", with = "ts_seconds")]
    expire_at: DateTime<Utc>,
}

impl Claims {
    fn sign(&self, config: &Config) -> Result<String> {
        Ok(jsonwebtoken::encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(config.jwt_secret()),
        )?)
    }
}
