//! The append-only chain of sealed blocks.

use ballot_types::{Digest, Timestamp, VoteHash};
use ballot_work::{WorkError, WorkGenerator, WorkTarget};
use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::genesis::{create_genesis_block, is_genesis_shaped};
use crate::report::ChainReport;
use crate::ChainFault;

/// Every block hash in the ledger must start with `"0000"`.
pub const POW_TARGET: WorkTarget = WorkTarget::new();

/// Ordered sequence of blocks; position 0 is genesis.
///
/// Invariants of a valid chain:
/// - every block hash meets [`POW_TARGET`]
/// - block 0 has genesis content
/// - `blocks[i].previous_hash` is the lowercase hex of
///   `blocks[i - 1].compute_hash()` for `i > 0`
///
/// Only [`Chain::ensure_genesis`] and [`Chain::add_block`] grow the chain.
/// Blocks are never removed or reordered.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chain {
    blocks: Vec<Block>,
}

impl Chain {
    /// An empty chain. It fails verification until genesis is sealed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap blocks loaded from storage as-is.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// A fresh chain holding only a sealed genesis block.
    pub fn with_genesis(generator: &WorkGenerator, timestamp: Timestamp) -> Result<Self, WorkError> {
        let mut chain = Self::new();
        chain.ensure_genesis(generator, timestamp)?;
        Ok(chain)
    }

    /// Seal genesis if the chain is empty. Returns `true` if a block was added.
    pub fn ensure_genesis(
        &mut self,
        generator: &WorkGenerator,
        timestamp: Timestamp,
    ) -> Result<bool, WorkError> {
        if !self.blocks.is_empty() {
            return Ok(false);
        }
        self.blocks.push(create_genesis_block(generator, timestamp)?);
        Ok(true)
    }

    /// Hash of the tip, or the zero digest for an empty chain.
    pub fn last_hash(&self) -> Digest {
        self.blocks
            .last()
            .map(Block::compute_hash)
            .unwrap_or(Digest::ZERO)
    }

    /// Seal a block committing to `vote_hash` on top of the tip and append it.
    pub fn add_block(
        &mut self,
        vote_hash: Digest,
        timestamp: Timestamp,
        generator: &WorkGenerator,
    ) -> Result<&Block, WorkError> {
        let block = Block::seal(
            self.blocks.len() as u64,
            timestamp,
            VoteHash::Payload(vote_hash),
            self.last_hash(),
            generator,
            &POW_TARGET,
        )?;
        self.blocks.push(block);
        Ok(&self.blocks[self.blocks.len() - 1])
    }

    /// Walk the chain in order and report the first broken rule.
    ///
    /// Checks, per block: proof-of-work, then genesis content (block 0) or
    /// the link to the previous block (every other block).
    pub fn verify(&self) -> Result<(), ChainFault> {
        if self.blocks.is_empty() {
            return Err(ChainFault::Empty);
        }
        let mut previous: Option<String> = None;
        for (i, block) in self.blocks.iter().enumerate() {
            let index = i as u64;
            let hash = block.compute_hash();
            if !POW_TARGET.is_met_by(&hash) {
                return Err(ChainFault::InvalidWork { index });
            }
            match previous {
                None => {
                    if !is_genesis_shaped(block) {
                        return Err(ChainFault::InvalidGenesis { index });
                    }
                }
                Some(prev) => {
                    if block.previous_hash() != prev {
                        return Err(ChainFault::BrokenLink { index });
                    }
                }
            }
            previous = Some(hash.to_hex());
        }
        Ok(())
    }

    /// [`Chain::verify`] folded into a user-facing report.
    pub fn report(&self) -> ChainReport {
        ChainReport::from(self.verify())
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Block> {
        self.blocks.get(index)
    }

    pub fn last(&self) -> Option<&Block> {
        self.blocks.last()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }
}
