//! Boundary to the face-recognition model.
//!
//! The model is opaque: it answers yes or no with a human-readable reason.
//! Photos travel as data URIs.

use ballot_types::UserId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Outcome of comparing a live photo with a reference photo.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Authorization {
    pub authorized: bool,
    pub reason: String,
}

/// A voter offered to the model as a possible match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredVoter {
    pub user_id: UserId,
    pub photo_data_uri: String,
}

/// Outcome of matching a live photo against registered voters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identification {
    pub matched: bool,
    pub voter_id: Option<UserId>,
    pub reason: String,
}

/// The model could not be reached or gave no usable answer.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("face oracle failed: {0}")]
pub struct OracleError(pub String);

pub trait FaceOracle: Send + Sync {
    /// Does `live_photo` show the same person as `reference_photo`?
    fn verify_admin(
        &self,
        reference_photo: &str,
        live_photo: &str,
    ) -> Result<Authorization, OracleError>;

    /// Which of `registered`, if any, appears in `live_photo`?
    fn identify_voter(
        &self,
        live_photo: &str,
        registered: &[RegisteredVoter],
    ) -> Result<Identification, OracleError>;
}
