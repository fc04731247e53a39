//! Election records held in the registry.

use ballot_types::{CandidateId, UserId};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    pub name: String,
}

/// Two-state lifecycle. There is no way back from `Closed`; deleting an
/// election removes its record instead of adding a third state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElectionStatus {
    Active,
    Closed,
}

/// An election as stored under its id (the id is the registry key).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionRecord {
    pub title: String,
    pub candidates: Vec<Candidate>,
    /// Persisted as the boolean `active`.
    #[serde(rename = "active", with = "active_flag")]
    status: ElectionStatus,
    #[serde(rename = "creatorId", default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<UserId>,
}

impl ElectionRecord {
    /// A new, active election.
    pub fn new(title: impl Into<String>, candidates: Vec<Candidate>, creator_id: UserId) -> Self {
        Self {
            title: title.into(),
            candidates,
            status: ElectionStatus::Active,
            creator_id: Some(creator_id),
        }
    }

    pub fn status(&self) -> ElectionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == ElectionStatus::Active
    }

    /// Stop accepting votes. Closing a closed election changes nothing.
    pub fn close(&mut self) {
        self.status = ElectionStatus::Closed;
    }

    pub fn candidate(&self, id: &CandidateId) -> Option<&Candidate> {
        self.candidates.iter().find(|c| &c.id == id)
    }
}

mod active_flag {
    use super::ElectionStatus;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(status: &ElectionStatus, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_bool(*status == ElectionStatus::Active)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<ElectionStatus, D::Error> {
        Ok(if bool::deserialize(d)? {
            ElectionStatus::Active
        } else {
            ElectionStatus::Closed
        })
    }
}
