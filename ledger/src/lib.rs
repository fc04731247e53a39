//! Append-only vote ledger.
//!
//! A single hash-linked chain of proof-of-work sealed blocks. Each block
//! commits to the hash of one vote payload; the payloads themselves live
//! outside the chain. There is one writer and one copy of the chain: no
//! peers, no forks, no consensus.

pub mod block;
pub mod chain;
pub mod error;
pub mod genesis;
pub mod report;

pub use block::Block;
pub use chain::{Chain, POW_TARGET};
pub use error::ChainFault;
pub use genesis::{create_genesis_block, GENESIS_INDEX};
pub use report::ChainReport;
