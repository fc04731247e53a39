//! Caller-facing outcome of a chain verification.

use serde::{Deserialize, Serialize};

use crate::ChainFault;

/// Message reported for a chain that passes every check.
pub const CHAIN_OK: &str = "Chain OK";

/// `{ ok, message }` as surfaced to end users.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainReport {
    pub ok: bool,
    pub message: String,
}

impl From<Result<(), ChainFault>> for ChainReport {
    fn from(result: Result<(), ChainFault>) -> Self {
        match result {
            Ok(()) => Self {
                ok: true,
                message: CHAIN_OK.to_string(),
            },
            Err(fault) => Self {
                ok: false,
                message: fault.to_string(),
            },
        }
    }
}
