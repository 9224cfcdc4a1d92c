use std::borrow::Borrow;
use std::fmt::{Display, Formatter};
use std::ops::Deref;

use data_encoding::BASE32_NOPAD;
use serde::{Deserialize, Serialize};

/// Number of random bytes in a generated ID.
const RANDOM_BYTES: usize = 10;

/// A random, lowercase, URL-safe suffix for generated IDs.
fn random_suffix() -> String {
    let bytes: [u8; RANDOM_BYTES] = rand::random();
    BASE32_NOPAD.encode(&bytes).to_ascii_lowercase()
}

/// Define a string-backed ID type that cannot be confused with the others.
macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Deref for $name {
            type Target = str;

            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl Borrow<str> for $name {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self::new(id)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self::new(id)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl PartialEq<&str> for $name {
            fn eq(&self, other: &&str) -> bool {
                self.0 == *other
            }
        }
    };
}

string_id!(
    /// Unique ID of a registered voter.
    VoterId
);

string_id!(
    /// Unique ID of a candidate, e.g. `camilo-torres`.
    CandidateId
);

string_id!(
    /// Unique ID of a cast vote.
    VoteId
);

impl VoterId {
    /// Generate a fresh, random voter ID.
    pub fn generate() -> Self {
        Self(format!("votante-{}", random_suffix()))
    }
}

impl VoteId {
    /// Generate a fresh, random vote ID.
    pub fn generate() -> Self {
        Self(format!("voto-{}", random_suffix()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn generated_ids_are_distinct() {
        let ids: HashSet<_> = (0..100).map(|_| VoteId::generate()).collect();
        assert_eq!(ids.len(), 100);

        let voter = VoterId::generate();
        assert!(voter.starts_with("votante-"));
        assert_eq!(voter.len(), "votante-".len() + 16);
        assert!(voter
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    }

    #[test]
    fn serialises_as_plain_string() {
        let id = CandidateId::from("andrea-ruiz");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"andrea-ruiz\"");
        assert_eq!(
            serde_json::from_str::<CandidateId>("\"andrea-ruiz\"").unwrap(),
            id
        );
        assert_eq!(id, "andrea-ruiz");
    }
}
