//! Proof-of-work sealing for ledger blocks.
//!
//! Not mining in any adversarial sense: the target is fixed and small. It
//! gives every block a verifiable "effort" property so that rewriting
//! history means redoing the work for every later block.
//!
//! The work hash is `SHA-256(preimage || decimal(nonce))`, where the
//! preimage is everything in the block's hash input except the nonce.
//! Callers own the preimage layout; this crate never parses it.

pub mod error;
pub mod generator;
pub mod target;
pub mod validator;

pub use error::WorkError;
pub use generator::WorkGenerator;
pub use target::{WorkTarget, DEFAULT_ZERO_NIBBLES};
pub use validator::{validate_work, work_hash};

/// The result of PoW generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkNonce(pub u64);
