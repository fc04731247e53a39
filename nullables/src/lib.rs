//! Nullable infrastructure for deterministic testing.
//!
//! Everything the election service reaches outside itself for (the clock,
//! the state store, the face oracle) sits behind a trait. This crate
//! provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically
//! - Never touch the filesystem or network

pub mod clock;
pub mod oracle;
pub mod store;

pub use clock::NullClock;
pub use oracle::NullFaceOracle;
pub use store::NullStore;
