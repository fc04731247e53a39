//! PoW validation.

use std::fmt::Write;

use ballot_crypto::sha256_multi;
use ballot_types::Digest;

use crate::WorkTarget;

/// Compute `SHA-256(preimage || decimal(nonce))`.
pub fn work_hash(preimage: &str, nonce: u64) -> Digest {
    let mut buf = String::with_capacity(20);
    work_hash_with(preimage, nonce, &mut buf)
}

/// Allocation-free variant for the search loop; `buf` is scratch space.
pub(crate) fn work_hash_with(preimage: &str, nonce: u64, buf: &mut String) -> Digest {
    buf.clear();
    // Writing to a String cannot fail.
    let _ = write!(buf, "{}", nonce);
    Digest::new(sha256_multi(&[preimage.as_bytes(), buf.as_bytes()]))
}

/// Validate that `nonce` makes the work hash of `preimage` meet `target`.
pub fn validate_work(preimage: &str, nonce: u64, target: &WorkTarget) -> bool {
    target.is_met_by(&work_hash(preimage, nonce))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ballot_crypto::sha256_hex;

    #[test]
    fn work_hash_appends_decimal_nonce() {
        let preimage = "3|1700000000|GENESIS|abc|";
        assert_eq!(
            work_hash(preimage, 4711).to_string(),
            sha256_hex(b"3|1700000000|GENESIS|abc|4711")
        );
    }

    #[test]
    fn scratch_buffer_is_reset() {
        let mut buf = String::from("garbage");
        let a = work_hash_with("p|", 7, &mut buf);
        assert_eq!(a, work_hash("p|", 7));
    }
}
