use ballot_store::StoreError;
use ballot_work::WorkError;
use thiserror::Error;

use crate::OracleError;

#[derive(Debug, Error)]
pub enum ElectionError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    NotAuthorized(String),

    #[error("Invalid voter")]
    InvalidVoter,

    #[error("Invalid or inactive election")]
    InvalidOrInactiveElection,

    #[error("Voter already voted in this election")]
    AlreadyVoted,

    #[error("Invalid candidate")]
    InvalidCandidate,

    #[error("storage failure: {0}")]
    StorageFailure(#[from] StoreError),

    #[error("sealing failed: {0}")]
    Work(#[from] WorkError),

    #[error(transparent)]
    Oracle(#[from] OracleError),

    #[error("config error: {0}")]
    Config(String),
}

impl ElectionError {
    pub(crate) fn no_such_election() -> Self {
        Self::NotFound("No such election".into())
    }

    pub(crate) fn face_rejected(reason: &str) -> Self {
        Self::NotAuthorized(format!("face verification failed: {reason}"))
    }
}
