use std::ops::{Deref, DerefMut};

use argon2::Config as Argon2Config;
use chrono::{DateTime, NaiveDate, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::common::{age_today, Gender, Municipality, VoterId};

/// Core voter data, as stored in the voters collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterCore {
    pub first_name: String,
    pub last_name: String,
    /// National identity number. Unique across all voters.
    pub cedula: String,
    /// Unique across all voters.
    pub email: String,
    pub birth_date: NaiveDate,
    pub gender: Gender,
    pub municipality: Municipality,
    /// Argon2 encoded hash of the voter's password.
    pub password_hash: String,
    /// Derived from the vote collection; only the ledger and login change it.
    pub has_voted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl VoterCore {
    /// Check whether the given password is correct.
    pub fn verify_password<T: AsRef<[u8]>>(&self, password: T) -> Result<bool> {
        Ok(argon2::verify_encoded(
            &self.password_hash,
            password.as_ref(),
        )?)
    }

    /// The voter's age in whole years as of today.
    pub fn age(&self) -> i32 {
        age_today(self.birth_date)
    }

    /// Bump `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Hash a plaintext password for storage.
pub fn hash_password(password: &str) -> Result<String> {
    // 16 bytes is recommended for password hashing:
    //  https://en.wikipedia.org/wiki/Argon2
    let mut salt = [0_u8; 16];
    rand::thread_rng().fill(&mut salt);
    Ok(argon2::hash_encoded(
        password.as_bytes(),
        &salt,
        &Argon2Config::default(),
    )?)
}

/// A voter from the store, with its unique ID.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Voter {
    pub id: VoterId,
    #[serde(flatten)]
    pub voter: VoterCore,
}

impl Deref for Voter {
    type Target = VoterCore;

    fn deref(&self) -> &Self::Target {
        &self.voter
    }
}

impl DerefMut for Voter {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.voter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert_ne!(hash, hash_password("correct horse").unwrap());

        let now = Utc::now();
        let voter = VoterCore {
            first_name: "Ana".to_string(),
            last_name: "Gómez".to_string(),
            cedula: "1001".to_string(),
            email: "ana@example.com".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: Gender::Female,
            municipality: Municipality::Cali,
            password_hash: hash,
            has_voted: false,
            created_at: now,
            updated_at: now,
        };
        assert!(voter.verify_password("correct horse").unwrap());
        assert!(!voter.verify_password("correct horse ").unwrap());
    }

    #[test]
    fn stored_layout() {
        let now = Utc::now();
        let voter = Voter {
            id: VoterId::new("votante-1"),
            voter: VoterCore {
                first_name: "Ana".to_string(),
                last_name: "Gómez".to_string(),
                cedula: "1001".to_string(),
                email: "ana@example.com".to_string(),
                birth_date: NaiveDate::from_ymd_opt(1990, 1, 31).unwrap(),
                gender: Gender::Female,
                municipality: Municipality::Cali,
                password_hash: String::new(),
                has_voted: true,
                created_at: now,
                updated_at: now,
            },
        };

        let json = serde_json::to_value(&voter).unwrap();
        assert_eq!(json["id"], "votante-1");
        assert_eq!(json["birth_date"], "1990-01-31");
        assert_eq!(json["gender"], "femenino");
        assert_eq!(json["municipality"], "cali");
        assert_eq!(json["has_voted"], true);
        assert_eq!(
            json["created_at"].as_str().unwrap().parse::<DateTime<Utc>>().unwrap(),
            now
        );

        let back: Voter = serde_json::from_value(json).unwrap();
        assert_eq!(back, voter);
    }
}
