//! Registered users: the single admin and any number of voters.

use ballot_types::{ElectionId, Role, UserId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Reference photo given to the admin on first initialization: a 1x1 PNG.
///
/// While the admin still has this photo, face checks are skipped and the
/// first live photo becomes the reference.
pub const PLACEHOLDER_PHOTO: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub user_id: UserId,
    pub name: String,
    pub role: Role,
    /// Elections this user has voted in. Grows by one entry per vote, never shrinks.
    #[serde(default, with = "voted_map")]
    voted: BTreeSet<ElectionId>,
    /// Reference photo (data URI) handed to the face oracle.
    #[serde(
        rename = "photoDataUri",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub photo_data_uri: Option<String>,
}

impl User {
    pub fn new(user_id: UserId, name: impl Into<String>, role: Role, photo: Option<String>) -> Self {
        Self {
            user_id,
            name: name.into(),
            role,
            voted: BTreeSet::new(),
            photo_data_uri: photo,
        }
    }

    pub fn has_voted(&self, election: &ElectionId) -> bool {
        self.voted.contains(election)
    }

    /// Mark `election` as voted. Returns `false` if it was already marked.
    pub fn record_vote(&mut self, election: ElectionId) -> bool {
        self.voted.insert(election)
    }

    pub fn voted(&self) -> impl Iterator<Item = &ElectionId> {
        self.voted.iter()
    }

    /// Whether the reference photo is missing or still the placeholder.
    pub fn has_placeholder_photo(&self) -> bool {
        self.photo_data_uri
            .as_deref()
            .map_or(true, |p| p.starts_with(PLACEHOLDER_PHOTO))
    }
}

/// `voted` is persisted as `{"<election_id>": true, ...}`.
mod voted_map {
    use ballot_types::ElectionId;
    use serde::{Deserialize, Deserializer, Serializer};
    use std::collections::{BTreeMap, BTreeSet};

    pub fn serialize<S: Serializer>(set: &BTreeSet<ElectionId>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_map(set.iter().map(|id| (id, true)))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<BTreeSet<ElectionId>, D::Error> {
        let map = BTreeMap::<ElectionId, bool>::deserialize(d)?;
        Ok(map.into_iter().filter(|(_, v)| *v).map(|(k, _)| k).collect())
    }
}
