//! The `vote_hash` field of a block: either the genesis marker or a payload digest.

use crate::{Digest, DigestError};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Literal stored in the genesis block's `vote_hash` field.
pub const GENESIS_MARKER: &str = "GENESIS";

/// What a block commits to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VoteHash {
    /// The genesis block carries no vote.
    Genesis,
    /// SHA-256 of a canonical vote payload.
    Payload(Digest),
}

impl VoteHash {
    pub fn is_genesis(&self) -> bool {
        matches!(self, Self::Genesis)
    }

    pub fn digest(&self) -> Option<&Digest> {
        match self {
            Self::Genesis => None,
            Self::Payload(d) => Some(d),
        }
    }
}

impl From<Digest> for VoteHash {
    fn from(d: Digest) -> Self {
        Self::Payload(d)
    }
}

impl FromStr for VoteHash {
    type Err = DigestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == GENESIS_MARKER {
            Ok(Self::Genesis)
        } else {
            Digest::from_hex(s).map(Self::Payload)
        }
    }
}

impl fmt::Display for VoteHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Genesis => f.write_str(GENESIS_MARKER),
            Self::Payload(d) => fmt::Display::fmt(d, f),
        }
    }
}

impl Serialize for VoteHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VoteHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genesis_round_trips_as_marker() {
        let json = serde_json::to_string(&VoteHash::Genesis).unwrap();
        assert_eq!(json, "\"GENESIS\"");
        let back: VoteHash = serde_json::from_str(&json).unwrap();
        assert!(back.is_genesis());
    }

    #[test]
    fn payload_displays_as_hex() {
        let vh = VoteHash::from(Digest::new([0xff; 32]));
        assert_eq!(vh.to_string(), "ff".repeat(32));
        assert_eq!(vh.digest(), Some(&Digest::new([0xff; 32])));
    }

    #[test]
    fn lowercase_marker_is_not_genesis() {
        assert!("genesis".parse::<VoteHash>().is_err());
    }
}
