//! Plaintext vote payloads whose hashes the chain commits to.

use ballot_crypto::{random_salt, sha256_digest};
use ballot_types::{CandidateId, Digest, ElectionId};
use serde::{Deserialize, Serialize};

use crate::StoreError;

/// One cast vote. The random salt keeps two identical choices from
/// producing the same hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VotePayload {
    pub election_id: ElectionId,
    pub candidate_id: CandidateId,
    pub salt: String,
}

/// Hash input: keys in sorted order, compact JSON.
#[derive(Serialize)]
struct Canonical<'a> {
    candidate_id: &'a CandidateId,
    election_id: &'a ElectionId,
    salt: &'a str,
}

impl VotePayload {
    /// A payload with a fresh random salt.
    pub fn new(election_id: ElectionId, candidate_id: CandidateId) -> Self {
        Self {
            election_id,
            candidate_id,
            salt: random_salt(),
        }
    }

    /// `{"candidate_id":..,"election_id":..,"salt":..}` with no whitespace.
    pub fn canonical_json(&self) -> Result<String, StoreError> {
        let canonical = Canonical {
            candidate_id: &self.candidate_id,
            election_id: &self.election_id,
            salt: &self.salt,
        };
        serde_json::to_string(&canonical).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// SHA-256 of [`VotePayload::canonical_json`]; this is the block's `vote_hash`.
    pub fn hash(&self) -> Result<Digest, StoreError> {
        Ok(sha256_digest(self.canonical_json()?.as_bytes()))
    }
}
