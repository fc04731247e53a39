//! Whole-file JSON backend for [`ballot_store::StateStore`].
//!
//! The entire [`ballot_store::LedgerState`] lives in one pretty-printed JSON
//! file. Every save rewrites the whole file via a sibling temp file and a
//! rename, so readers never observe a half-written state.

mod file;

pub use file::JsonFileStore;
