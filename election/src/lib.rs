//! Election lifecycle on top of the vote ledger.
//!
//! [`ElectionService`] owns every operation that reads or mutates the
//! persisted [`ballot_store::LedgerState`]: each call loads the whole state
//! (initializing it on first use), works on it in memory, and saves it back
//! only if the operation succeeded. Calls through one service are serialized
//! by a write lock.
//!
//! [`GatedElections`] layers the face-verification checks on top, talking to
//! the recognition model only through the [`FaceOracle`] trait.

pub mod config;
pub mod error;
pub mod gated;
pub mod oracle;
pub mod service;
pub mod views;

pub use config::ServiceConfig;
pub use error::ElectionError;
pub use gated::GatedElections;
pub use oracle::{Authorization, FaceOracle, Identification, OracleError, RegisteredVoter};
pub use service::ElectionService;
pub use views::{
    CandidateTally, CreatorPhoto, ElectionView, IdentifiedVoter, TallyResult, VoteReceipt,
    VoterCreated,
};
