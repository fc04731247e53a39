use thiserror::Error;

/// The first integrity rule a chain breaks, as found by [`crate::Chain::verify`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ChainFault {
    #[error("Empty chain")]
    Empty,

    #[error("PoW invalid at index {index}")]
    InvalidWork { index: u64 },

    #[error("Genesis invalid at index {index}")]
    InvalidGenesis { index: u64 },

    #[error("Broken link at index {index}")]
    BrokenLink { index: u64 },
}

impl ChainFault {
    /// Position of the offending block, if the fault is tied to one.
    pub fn index(&self) -> Option<u64> {
        match self {
            Self::Empty => None,
            Self::InvalidWork { index }
            | Self::InvalidGenesis { index }
            | Self::BrokenLink { index } => Some(*index),
        }
    }
}
