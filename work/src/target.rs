//! The proof-of-work target: a required run of leading zero hex digits.

use ballot_types::Digest;

/// Leading zero hex digits every sealed block hash must carry (`"0000"`).
pub const DEFAULT_ZERO_NIBBLES: u32 = 4;

/// A hash meets the target when its hex rendering starts with
/// `zero_nibbles` `0` characters, i.e. its numeric value is below
/// `2^(256 - 4 * zero_nibbles)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorkTarget {
    zero_nibbles: u32,
}

impl WorkTarget {
    pub const fn new() -> Self {
        Self {
            zero_nibbles: DEFAULT_ZERO_NIBBLES,
        }
    }

    /// Construct with a custom prefix length (tests and benchmarks).
    ///
    /// Values above 64 are clamped: a digest has only 64 hex digits.
    pub const fn with_zero_nibbles(zero_nibbles: u32) -> Self {
        Self {
            zero_nibbles: if zero_nibbles > 64 { 64 } else { zero_nibbles },
        }
    }

    pub fn zero_nibbles(&self) -> u32 {
        self.zero_nibbles
    }

    /// The required hex prefix, e.g. `"0000"`.
    pub fn prefix(&self) -> String {
        "0".repeat(self.zero_nibbles as usize)
    }

    /// Expected number of attempts to meet this target (`16^zero_nibbles`).
    pub fn expected_attempts(&self) -> u128 {
        16u128.saturating_pow(self.zero_nibbles)
    }

    /// Whether `hash` carries the required prefix.
    pub fn is_met_by(&self, hash: &Digest) -> bool {
        let bytes = hash.as_bytes();
        let full_bytes = (self.zero_nibbles / 2) as usize;
        if bytes[..full_bytes].iter().any(|&b| b != 0) {
            return false;
        }
        if self.zero_nibbles % 2 == 1 {
            return bytes[full_bytes] >> 4 == 0;
        }
        true
    }
}

impl Default for WorkTarget {
    fn default() -> Self {
        Self::new()
    }
}
