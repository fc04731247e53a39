//! Face-gated election flows.
//!
//! The admin proves identity by a live photo compared against the stored
//! reference photo; voters are identified by matching a live photo against
//! every registered voter. While the admin still holds the placeholder
//! photo, create and close skip the comparison and enroll the live photo.
//! Delete always compares.

use ballot_store::StateStore;
use ballot_types::{CandidateId, Clock, ElectionId};
use tracing::{info, warn};

use crate::oracle::{FaceOracle, RegisteredVoter};
use crate::views::{ElectionView, IdentifiedVoter, VoteReceipt, VoterCreated};
use crate::{ElectionError, ElectionService};

pub struct GatedElections<S, C, O> {
    service: ElectionService<S, C>,
    oracle: O,
}

impl<S: StateStore, C: Clock, O: FaceOracle> GatedElections<S, C, O> {
    pub fn new(service: ElectionService<S, C>, oracle: O) -> Self {
        Self { service, oracle }
    }

    /// Ungated operations (tally, verification, queries).
    pub fn service(&self) -> &ElectionService<S, C> {
        &self.service
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Create an election as the admin shown in `live_photo`.
    pub fn create_election(
        &self,
        title: &str,
        candidate_names: &[String],
        live_photo: &str,
    ) -> Result<ElectionView, ElectionError> {
        if title.trim().is_empty() || candidate_names.is_empty() {
            return Err(ElectionError::InvalidInput(
                "Title and candidates are required".into(),
            ));
        }
        require_photo(live_photo)?;

        let admin = self.service.admin_user()?;
        match admin.photo_data_uri.as_deref() {
            Some(reference) if !admin.has_placeholder_photo() => {
                self.check_admin(reference, live_photo)?;
            }
            _ => info!(admin = %admin.user_id, "enrolling admin reference photo"),
        }

        self.service
            .create_election(title, candidate_names, &admin.user_id, Some(live_photo))
    }

    /// Register a voter; a reference photo is mandatory here.
    pub fn add_voter(&self, name: &str, photo: &str) -> Result<VoterCreated, ElectionError> {
        if name.trim().is_empty() {
            return Err(ElectionError::InvalidInput("Voter name is required".into()));
        }
        if photo.trim().is_empty() {
            return Err(ElectionError::InvalidInput("Voter photo is required".into()));
        }
        self.service.add_voter(name, Some(photo))
    }

    /// Find the registered voter shown in `live_photo`.
    pub fn identify_voter(&self, live_photo: &str) -> Result<IdentifiedVoter, ElectionError> {
        if live_photo.trim().is_empty() {
            return Err(ElectionError::InvalidInput("Photo data is missing".into()));
        }

        let registered: Vec<RegisteredVoter> = self
            .service
            .voters()?
            .into_iter()
            .filter_map(|v| {
                Some(RegisteredVoter {
                    photo_data_uri: v.photo_data_uri?,
                    user_id: v.user_id,
                })
            })
            .collect();
        if registered.is_empty() {
            return Err(ElectionError::NotAuthorized(
                "no voters with photos registered".into(),
            ));
        }

        let identification = self.oracle.identify_voter(live_photo, &registered)?;
        let voter_id = match identification.voter_id {
            Some(id) if identification.matched => id,
            _ => {
                warn!(reason = %identification.reason, "voter not identified");
                return Err(ElectionError::NotAuthorized(format!(
                    "Could not identify voter: {}",
                    identification.reason
                )));
            }
        };

        let voter = self
            .service
            .get_user(&voter_id)?
            .ok_or_else(|| ElectionError::NotFound("Identified voter not found".into()))?;
        info!(voter = %voter.user_id, "voter identified");
        Ok(IdentifiedVoter {
            voter_id: voter.user_id,
            name: voter.name,
        })
    }

    /// Identify the voter in `live_photo`, then cast their vote.
    pub fn cast_vote(
        &self,
        live_photo: &str,
        election: &ElectionId,
        candidate: &CandidateId,
    ) -> Result<VoteReceipt, ElectionError> {
        let voter = self.identify_voter(live_photo)?;
        self.service.cast_vote(&voter.voter_id, election, candidate)
    }

    /// Close an election as its creator.
    pub fn close_election(
        &self,
        election: &ElectionId,
        live_photo: &str,
    ) -> Result<ElectionView, ElectionError> {
        require_photo(live_photo)?;
        let creator = self.service.election_creator_photo(election)?;
        if creator.is_placeholder() {
            info!(creator = %creator.creator_id, "enrolling creator reference photo");
        } else {
            self.check_admin(&creator.photo_data_uri, live_photo)?;
        }
        self.service
            .update_user_photo(&creator.creator_id, live_photo)?;
        self.service.close_election(election)
    }

    /// Delete an election as its creator. There is no enrollment shortcut.
    pub fn delete_election(
        &self,
        election: &ElectionId,
        live_photo: &str,
    ) -> Result<ElectionView, ElectionError> {
        require_photo(live_photo)?;
        let creator = self.service.election_creator_photo(election)?;
        self.check_admin(&creator.photo_data_uri, live_photo)?;
        self.service.delete_election(election)
    }

    fn check_admin(&self, reference: &str, live_photo: &str) -> Result<(), ElectionError> {
        let verdict = self.oracle.verify_admin(reference, live_photo)?;
        if verdict.authorized {
            Ok(())
        } else {
            warn!(reason = %verdict.reason, "face verification rejected");
            Err(ElectionError::face_rejected(&verdict.reason))
        }
    }
}

fn require_photo(live_photo: &str) -> Result<(), ElectionError> {
    if live_photo.trim().is_empty() {
        return Err(ElectionError::InvalidInput(
            "Face verification is required".into(),
        ));
    }
    Ok(())
}
