#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_ledger::{Block, Chain};
use ballot_types::{Digest, VoteHash};

fuzz_target!(|data: &[u8]| {
    // Decoding hostile block JSON must fail cleanly, never panic.
    if let Ok(block) = serde_json::from_slice::<Block>(data) {
        let _ = block.compute_hash();
        let _ = block.vote_digest();
        let _ = Chain::from_blocks(vec![block]).verify();
    }

    if let Ok(text) = std::str::from_utf8(data) {
        let _ = text.parse::<Digest>();
        let _ = text.parse::<VoteHash>();
    }
});
