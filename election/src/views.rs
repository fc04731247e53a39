//! Results handed back to callers of the service.

use ballot_store::{Candidate, ElectionRecord, ElectionStatus, PLACEHOLDER_PHOTO};
use ballot_types::{CandidateId, Digest, ElectionId, Timestamp, UserId};
use serde::{Deserialize, Serialize};

/// An election together with its id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionView {
    pub election_id: ElectionId,
    pub title: String,
    pub candidates: Vec<Candidate>,
    pub status: ElectionStatus,
    pub creator_id: Option<UserId>,
}

impl ElectionView {
    pub fn new(election_id: ElectionId, record: &ElectionRecord) -> Self {
        Self {
            election_id,
            title: record.title.clone(),
            candidates: record.candidates.clone(),
            status: record.status(),
            creator_id: record.creator_id.clone(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == ElectionStatus::Active
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoterCreated {
    pub voter_id: UserId,
    pub name: String,
}

/// Proof that a vote landed in the chain.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    pub vote_hash: Digest,
    pub block_index: u64,
    pub block_hash: Digest,
    pub timestamp: Timestamp,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateTally {
    pub candidate_id: CandidateId,
    pub name: String,
    pub votes: u64,
}

/// Per-candidate counts in the election's candidate order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub election_id: ElectionId,
    pub title: String,
    pub results: Vec<CandidateTally>,
    pub total: u64,
}

impl TallyResult {
    pub fn votes_for(&self, candidate: &CandidateId) -> Option<u64> {
        self.results
            .iter()
            .find(|r| &r.candidate_id == candidate)
            .map(|r| r.votes)
    }
}

/// Reference photo of the admin who created an election.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatorPhoto {
    pub creator_id: UserId,
    pub photo_data_uri: String,
}

impl CreatorPhoto {
    /// The creator has not enrolled a real face yet.
    pub fn is_placeholder(&self) -> bool {
        self.photo_data_uri.starts_with(PLACEHOLDER_PHOTO)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedVoter {
    pub voter_id: UserId,
    pub name: String,
}
