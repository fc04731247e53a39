//! User roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The role of a registered user. Exactly one admin exists per store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Creates, closes, and deletes elections.
    Admin,
    /// Casts at most one vote per election.
    Voter,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    pub fn can_vote(&self) -> bool {
        matches!(self, Self::Voter)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Voter => "voter",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
