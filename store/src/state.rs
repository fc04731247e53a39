//! The aggregate root persisted as one unit.

use ballot_ledger::Chain;
use ballot_types::{CandidateId, ElectionId, Role, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{Candidate, ElectionRecord, User, VotePayload};

/// Users, elections, the chain, and the payload log.
///
/// Missing top-level keys load as empty collections.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerState {
    #[serde(default)]
    pub users: BTreeMap<UserId, User>,
    #[serde(default)]
    pub elections: BTreeMap<ElectionId, ElectionRecord>,
    #[serde(default, rename = "chain")]
    pub ledger: Chain,
    #[serde(default)]
    pub payloads: Vec<VotePayload>,
}

impl LedgerState {
    /// The first user with the admin role.
    pub fn admin(&self) -> Option<&User> {
        self.users.values().find(|u| u.role == Role::Admin)
    }

    pub fn voters(&self) -> impl Iterator<Item = &User> {
        self.users.values().filter(|u| u.role == Role::Voter)
    }

    pub fn candidate(&self, election: &ElectionId, candidate: &CandidateId) -> Option<&Candidate> {
        self.elections.get(election)?.candidate(candidate)
    }

    /// Payloads recorded for `election`, in cast order.
    pub fn payloads_for<'a>(
        &'a self,
        election: &'a ElectionId,
    ) -> impl Iterator<Item = &'a VotePayload> + 'a {
        self.payloads
            .iter()
            .filter(move |p| &p.election_id == election)
    }
}
