use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::{CandidateId, Municipality, VoteId, VoterId};

/// An immutable record of one voter choosing one candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub id: VoteId,
    pub voter_id: VoterId,
    pub candidate_id: CandidateId,
    /// Copied from the voter when the vote was cast.
    pub municipality: Municipality,
    /// When the core accepted the vote.
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<VoteMetadata>,
}

/// Optional information about the client a vote was cast from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<DeviceClass>,
}

impl VoteMetadata {
    /// Record the user agent and classify the device from it.
    pub fn from_user_agent(user_agent: &str) -> Self {
        Self {
            browser: Some(user_agent.to_string()),
            device: Some(DeviceClass::from_user_agent(user_agent)),
        }
    }
}

/// Coarse class of client device.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

impl DeviceClass {
    /// Classify a user agent string. Anything not mobile or tablet is a desktop.
    pub fn from_user_agent(user_agent: &str) -> Self {
        let user_agent = user_agent.to_lowercase();
        if user_agent.contains("mobile") {
            Self::Mobile
        } else if user_agent.contains("tablet") {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }
}
