use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::common::{CandidateId, Municipality};
use crate::model::db::Vote;

/// Summary of a set of votes, computed fresh on every request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    #[serde(rename = "total_votos")]
    pub total_votes: u64,
    /// Percentage of registered voters who cast one of the votes.
    #[serde(rename = "participacion")]
    pub participation: f64,
    #[serde(rename = "votos_por_candidato")]
    pub votes_by_candidate: BTreeMap<CandidateId, u64>,
    #[serde(rename = "distribucion_geografica")]
    pub votes_by_municipality: BTreeMap<Municipality, u64>,
}

impl Statistics {
    /// Tally `votes` against an electorate of `registered` voters.
    pub fn tally<'a>(votes: impl IntoIterator<Item = &'a Vote>, registered: usize) -> Self {
        let mut stats = Self::default();
        for vote in votes {
            stats.total_votes += 1;
            *stats
                .votes_by_candidate
                .entry(vote.candidate_id.clone())
                .or_default() += 1;
            *stats
                .votes_by_municipality
                .entry(vote.municipality)
                .or_default() += 1;
        }
        stats.participation = percentage(stats.total_votes, registered as u64);
        stats
    }

    /// Per-candidate results, most votes first. Candidates without votes are omitted.
    pub fn candidate_results(&self) -> Vec<CandidateResult> {
        let mut results = self
            .votes_by_candidate
            .iter()
            .map(|(candidate_id, &votes)| CandidateResult {
                candidate_id: candidate_id.clone(),
                votes,
                percentage: percentage(votes, self.total_votes),
            })
            .collect::<Vec<_>>();
        // The map iterates in ID order and the sort is stable, so ties stay in ID order.
        results.sort_by(|a, b| b.votes.cmp(&a.votes));
        results
    }

    /// The candidate with the most votes, if there were any. Ties go to the smallest ID.
    pub fn leader(&self) -> Option<CandidateResult> {
        self.candidate_results().into_iter().next()
    }

    /// Does the leader hold more than half the votes?
    pub fn has_majority(&self) -> bool {
        self.leader()
            .map_or(false, |leader| leader.votes * 2 > self.total_votes)
    }
}

/// One candidate's share of the vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateResult {
    pub candidate_id: CandidateId,
    pub votes: u64,
    pub percentage: f64,
}

/// `part` as a percentage of `whole`, or zero if `whole` is zero.
fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
