//! Fundamental types for the ballot ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! digests, vote hashes, timestamps and clocks, identifiers, and user roles.

pub mod digest;
pub mod error;
pub mod ids;
pub mod role;
pub mod time;
pub mod vote_hash;

pub use digest::Digest;
pub use error::DigestError;
pub use ids::{CandidateId, ElectionId, UserId};
pub use role::Role;
pub use time::{Clock, SystemClock, Timestamp};
pub use vote_hash::VoteHash;
