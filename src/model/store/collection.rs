use serde::{de::DeserializeOwned, Serialize};

use crate::model::db::{Candidate, Vote, Voter};

/// A record type that is stored as one named collection.
pub trait Collection: Serialize + DeserializeOwned {
    /// The substrate key holding the collection.
    const NAME: &'static str;
}

impl Collection for Voter {
    const NAME: &'static str = "voters";
}

impl Collection for Candidate {
    const NAME: &'static str = "candidates";
}

impl Collection for Vote {
    const NAME: &'static str = "votes";
}
