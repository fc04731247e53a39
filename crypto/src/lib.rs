//! Cryptographic primitives for the ballot ledger.
//!
//! - **SHA-256** for block hashes and vote payload hashes
//! - **OsRng** salts that keep identical vote choices from hashing alike
//! - Random v4 UUID identifiers for users, elections, and candidates

pub mod hash;
pub mod random;

pub use hash::{sha256, sha256_digest, sha256_hex, sha256_multi};
pub use random::{random_id, random_salt, SALT_LEN};
