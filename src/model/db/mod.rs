//! Records as they are held in the store's collections.

mod candidate;
mod vote;
mod voter;

pub use candidate::Candidate;
pub use vote::{DeviceClass, Vote, VoteMetadata};
pub use voter::{hash_password, Voter, VoterCore};
