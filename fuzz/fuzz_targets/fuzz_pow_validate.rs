#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_work::{validate_work, work_hash, WorkTarget};

fuzz_target!(|data: &[u8]| {
    // Layout: 8 bytes nonce, 1 byte target width, rest is the preimage.
    if data.len() < 9 {
        return;
    }
    let nonce = u64::from_le_bytes([
        data[0], data[1], data[2], data[3],
        data[4], data[5], data[6], data[7],
    ]);
    let target = WorkTarget::with_zero_nibbles(data[8] as u32);
    let preimage = String::from_utf8_lossy(&data[9..]);

    // Validation is exactly "the work hash meets the target".
    let valid = validate_work(&preimage, nonce, &target);
    assert_eq!(valid, target.is_met_by(&work_hash(&preimage, nonce)));
});
