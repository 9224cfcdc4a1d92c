use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::common::CandidateId;

/// A contestant in the election.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub first_name: String,
    pub last_name: String,
    /// Party label, matched exactly by the party filter.
    pub party: String,
    /// Platform summary.
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Candidate {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The slate written to an empty candidates collection, all timestamped `now`.
    pub fn default_slate(now: DateTime<Utc>) -> Vec<Self> {
        let candidate = |id: &str, first: &str, last: &str, party: &str, platform: &str| Self {
            id: CandidateId::from(id),
            first_name: first.to_string(),
            last_name: last.to_string(),
            party: party.to_string(),
            platform: platform.to_string(),
            photo: None,
            website: None,
            twitter: None,
            created_at: now,
            updated_at: now,
        };

        vec![
            Self {
                photo: Some("/images/camilo-portrait.png".to_string()),
                website: Some("https://example.com/camilo".to_string()),
                twitter: Some("https://x.com/".to_string()),
                ..candidate(
                    "camilo-torres",
                    "Camilo",
                    "Torres",
                    "Pacto Histórico",
                    "Justicia social, transparencia pública y desarrollo territorial para Santander.",
                )
            },
            candidate(
                "andrea-ruiz",
                "Andrea",
                "Ruiz",
                "Movimiento Ciudadano",
                "Empleo joven, educación digital y seguridad ciudadana con enfoque preventivo.",
            ),
            candidate(
                "jorge-perez",
                "Jorge",
                "Pérez",
                "Alianza Regional",
                "Infraestructura, salud rural y fortalecimiento de la economía local.",
            ),
        ]
    }
}
