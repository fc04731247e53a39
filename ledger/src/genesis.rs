//! Genesis block creation: the first block of every chain.
//!
//! Genesis has fixed content apart from its timestamp: index 0, the
//! `GENESIS` vote marker, and an all-zero previous hash. It is sealed by the
//! same proof-of-work search as every other block.

use crate::block::Block;
use crate::chain::POW_TARGET;
use ballot_types::vote_hash::GENESIS_MARKER;
use ballot_types::{Digest, Timestamp, VoteHash};
use ballot_work::{WorkError, WorkGenerator};

pub const GENESIS_INDEX: u64 = 0;

/// Seal the genesis block at `timestamp`.
pub fn create_genesis_block(
    generator: &WorkGenerator,
    timestamp: Timestamp,
) -> Result<Block, WorkError> {
    Block::seal(
        GENESIS_INDEX,
        timestamp,
        VoteHash::Genesis,
        Digest::ZERO,
        generator,
        &POW_TARGET,
    )
}

/// Whether `block` has genesis content (ignores proof-of-work).
///
/// Compares the stored text: exactly 64 `'0'` characters and the literal
/// `GENESIS` marker.
pub fn is_genesis_shaped(block: &Block) -> bool {
    let previous = block.previous_hash();
    previous.len() == 64
        && previous.bytes().all(|b| b == b'0')
        && block.vote_hash() == GENESIS_MARKER
}
