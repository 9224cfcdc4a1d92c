//! Types shared between stored records and the public API.

mod age;
mod gender;
mod id;
mod municipality;

pub use age::{age_on, age_today, AgeBucket, VOTING_AGE};
pub use gender::Gender;
pub use id::{CandidateId, VoteId, VoterId};
pub use municipality::Municipality;
