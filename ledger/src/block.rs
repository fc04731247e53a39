//! A single sealed ledger block.

use ballot_types::{Digest, Timestamp, VoteHash};
use ballot_work::{work_hash, WorkError, WorkGenerator, WorkTarget};
use serde::{Deserialize, Serialize};

/// One sealed, hash-linked record in the ledger.
///
/// The block hash is never stored: [`Block::compute_hash`] recomputes it
/// from `index|timestamp|vote_hash|previous_hash|nonce` every time, so any
/// edit to a field changes the hash.
///
/// `vote_hash` and `previous_hash` are kept as the exact text that was
/// sealed or loaded. A persisted block whose text differs from its sealed
/// form (case, length, anything else) still decodes and hashes to
/// something new, so verification reports it instead of normalizing it away.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain; 0 is genesis.
    index: u64,
    /// Seconds since epoch at seal time.
    timestamp: Timestamp,
    /// Hash of the vote payload, or `GENESIS`.
    vote_hash: String,
    /// Hash of the previous block, 64 zeros for genesis.
    previous_hash: String,
    /// Found by sealing.
    nonce: u64,
}

impl Block {
    /// Assemble a block from stored text without sealing it.
    ///
    /// Used when reloading persisted blocks; nothing is checked here.
    /// [`crate::Chain::verify`] decides whether the result is valid.
    pub fn from_parts(
        index: u64,
        timestamp: Timestamp,
        vote_hash: impl Into<String>,
        previous_hash: impl Into<String>,
        nonce: u64,
    ) -> Self {
        Self {
            index,
            timestamp,
            vote_hash: vote_hash.into(),
            previous_hash: previous_hash.into(),
            nonce,
        }
    }

    /// Build a block and search for the smallest nonce that meets `target`.
    pub fn seal(
        index: u64,
        timestamp: Timestamp,
        vote_hash: VoteHash,
        previous_hash: Digest,
        generator: &WorkGenerator,
        target: &WorkTarget,
    ) -> Result<Self, WorkError> {
        let unsealed = Self::from_parts(
            index,
            timestamp,
            vote_hash.to_string(),
            previous_hash.to_hex(),
            0,
        );
        let nonce = generator.generate(&unsealed.preimage(), target)?;
        Ok(unsealed.with_nonce(nonce.0))
    }

    pub fn index(&self) -> u64 {
        self.index
    }

    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// The `vote_hash` text exactly as stored.
    pub fn vote_hash(&self) -> &str {
        &self.vote_hash
    }

    /// The `previous_hash` text exactly as stored.
    pub fn previous_hash(&self) -> &str {
        &self.previous_hash
    }

    /// The payload digest, if `vote_hash` is one in canonical lowercase form.
    pub fn vote_digest(&self) -> Option<Digest> {
        match self.vote_hash.parse::<VoteHash>() {
            Ok(VoteHash::Payload(d)) if d.to_hex() == self.vote_hash => Some(d),
            _ => None,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Copy of this block with a different nonce.
    pub fn with_nonce(&self, nonce: u64) -> Self {
        Self {
            nonce,
            ..self.clone()
        }
    }

    /// Hash input minus the nonce: `index|timestamp|vote_hash|previous_hash|`.
    pub fn preimage(&self) -> String {
        format!(
            "{}|{}|{}|{}|",
            self.index,
            self.timestamp.as_secs(),
            self.vote_hash,
            self.previous_hash
        )
    }

    /// SHA-256 of `index|timestamp|vote_hash|previous_hash|nonce`.
    pub fn compute_hash(&self) -> Digest {
        work_hash(&self.preimage(), self.nonce)
    }

    /// Whether this block's hash meets `target`.
    pub fn meets(&self, target: &WorkTarget) -> bool {
        target.is_met_by(&self.compute_hash())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_crypto::sha256_hex;

    fn sample() -> Block {
        Block::from_parts(
            3,
            Timestamp::new(1_700_000_000),
            "11".repeat(32),
            "22".repeat(32),
            42,
        )
    }

    #[test]
    fn hash_is_sha256_of_pipe_joined_fields() {
        let block = sample();
        let expected = sha256_hex(
            format!("3|1700000000|{}|{}|42", "11".repeat(32), "22".repeat(32)).as_bytes(),
        );
        assert_eq!(block.compute_hash().to_string(), expected);
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(sample().compute_hash(), sample().compute_hash());
    }

    #[test]
    fn with_nonce_changes_only_nonce() {
        let block = sample();
        let bumped = block.with_nonce(43);
        assert_eq!(bumped.nonce(), 43);
        assert_eq!(bumped.index(), block.index());
        assert_eq!(bumped.preimage(), block.preimage());
        assert_ne!(bumped.compute_hash(), block.compute_hash());
    }

    #[test]
    fn seal_meets_target() {
        let target = WorkTarget::new();
        let block = Block::seal(
            1,
            Timestamp::new(1_700_000_000),
            VoteHash::from(Digest::new([0x33; 32])),
            Digest::new([0x44; 32]),
            &WorkGenerator::sequential(),
            &target,
        )
        .unwrap();
        assert!(block.meets(&target));
        assert!(block.compute_hash().to_string().starts_with("0000"));
        assert_eq!(block.vote_hash(), "33".repeat(32));
        assert_eq!(block.previous_hash(), "44".repeat(32));
    }

    #[test]
    fn serializes_with_flat_string_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["index"], 3);
        assert_eq!(json["timestamp"], 1_700_000_000u64);
        assert_eq!(json["vote_hash"], "11".repeat(32));
        assert_eq!(json["previous_hash"], "22".repeat(32));
        assert_eq!(json["nonce"], 42);
    }

    #[test]
    fn uppercase_text_is_kept_and_hashed_as_stored() {
        let lower = Block::from_parts(
            3,
            Timestamp::new(1_700_000_000),
            "ab".repeat(32),
            "cd".repeat(32),
            42,
        );
        let mut json = serde_json::to_value(&lower).unwrap();
        json["vote_hash"] = "AB".repeat(32).into();
        let edited: Block = serde_json::from_value(json).unwrap();

        assert_eq!(edited.vote_hash(), "AB".repeat(32));
        assert_ne!(edited.compute_hash(), lower.compute_hash());
        assert_eq!(edited.vote_digest(), None);
        assert_eq!(lower.vote_digest(), Some(Digest::new([0xab; 32])));
        assert_eq!(serde_json::to_value(&edited).unwrap()["vote_hash"], "AB".repeat(32));
    }

    #[test]
    fn arbitrary_text_still_decodes() {
        let mut json = serde_json::to_value(sample()).unwrap();
        json["vote_hash"] = "deadbeef".into();
        json["previous_hash"] = "not a hash".into();
        let edited: Block = serde_json::from_value(json).unwrap();

        assert_eq!(edited.vote_hash(), "deadbeef");
        assert_eq!(edited.previous_hash(), "not a hash");
        assert_eq!(edited.vote_digest(), None);
        assert_ne!(edited.compute_hash(), sample().compute_hash());
    }

    #[test]
    fn vote_digest_reads_canonical_payloads() {
        assert_eq!(sample().vote_digest(), Some(Digest::new([0x11; 32])));
        let genesis = Block::from_parts(0, Timestamp::new(1), "GENESIS", "0".repeat(64), 0);
        assert_eq!(genesis.vote_digest(), None);
    }
}
