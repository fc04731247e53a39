use std::collections::BTreeSet;
use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use ballot_crypto::random_id;
use ballot_ledger::{Chain, ChainReport};
use ballot_store::{
    Candidate, ElectionRecord, LedgerState, StateStore, User, VotePayload, PLACEHOLDER_PHOTO,
};
use ballot_types::{CandidateId, Clock, ElectionId, Role, SystemClock, UserId};
use ballot_utils::format_elapsed;
use ballot_work::WorkGenerator;
use tracing::{debug, info, warn};

use crate::views::{
    CandidateTally, CreatorPhoto, ElectionView, TallyResult, VoteReceipt, VoterCreated,
};
use crate::ElectionError;

/// Name given to the admin created on first initialization.
pub const ADMIN_NAME: &str = "Admin";

/// Runs election operations against a [`StateStore`].
///
/// Every operation is one load-work-save cycle under `write_lock` and the
/// store's own [`StateStore::lock`]. The first keeps calls through one
/// service (e.g. shared behind an `Arc`) from interleaving; the second
/// extends that to other services and processes over the same backing file.
pub struct ElectionService<S, C = SystemClock> {
    store: S,
    clock: C,
    generator: WorkGenerator,
    write_lock: Mutex<()>,
}

impl<S: StateStore> ElectionService<S, SystemClock> {
    /// A service sealing blocks with wall-clock timestamps.
    pub fn new(store: S, generator: WorkGenerator) -> Self {
        Self::with_clock(store, SystemClock, generator)
    }
}

impl<S: StateStore, C: Clock> ElectionService<S, C> {
    pub fn with_clock(store: S, clock: C, generator: WorkGenerator) -> Self {
        Self {
            store,
            clock,
            generator,
            write_lock: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    // ── Lifecycle ──────────────────────────────────────────────────────

    /// Create an active election owned by `creator`, who must be the admin.
    ///
    /// Candidate names are trimmed and blanks dropped; at least two distinct
    /// names must remain. A supplied `creator_photo` replaces the creator's
    /// reference photo in the same save.
    pub fn create_election(
        &self,
        title: &str,
        candidate_names: &[String],
        creator: &UserId,
        creator_photo: Option<&str>,
    ) -> Result<ElectionView, ElectionError> {
        self.transact(|state| {
            let admin = state
                .users
                .get_mut(creator)
                .filter(|u| u.role.is_admin())
                .ok_or_else(|| {
                    ElectionError::NotAuthorized("only the admin can create elections".into())
                })?;

            let title = title.trim();
            if title.is_empty() {
                return Err(ElectionError::InvalidInput("Title is required".into()));
            }
            let names = candidate_list(candidate_names)?;

            if let Some(photo) = creator_photo.filter(|p| !p.trim().is_empty()) {
                admin.photo_data_uri = Some(photo.to_string());
            }

            let candidates = names
                .into_iter()
                .map(|name| Candidate {
                    id: CandidateId::new(random_id()),
                    name,
                })
                .collect();
            let election_id = ElectionId::new(random_id());
            let record = ElectionRecord::new(title, candidates, creator.clone());
            let view = ElectionView::new(election_id.clone(), &record);
            state.elections.insert(election_id, record);

            info!(
                election = %view.election_id,
                title = %view.title,
                candidates = view.candidates.len(),
                "election created"
            );
            Ok(view)
        })
    }

    /// Register a voter. A blank photo counts as no photo.
    pub fn add_voter(&self, name: &str, photo: Option<&str>) -> Result<VoterCreated, ElectionError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ElectionError::InvalidInput("Voter name is required".into()));
        }
        let photo = photo.filter(|p| !p.trim().is_empty()).map(str::to_string);

        self.transact(|state| {
            let voter_id = UserId::new(random_id());
            state.users.insert(
                voter_id.clone(),
                User::new(voter_id.clone(), name, Role::Voter, photo),
            );
            info!(voter = %voter_id, "voter added");
            Ok(VoterCreated {
                voter_id,
                name: name.to_string(),
            })
        })
    }

    /// Record one vote: payload, sealed block, and the voter's `voted` mark
    /// all land in the same save, or none of them do.
    ///
    /// Checks run in a fixed order: voter, election, double vote, candidate.
    pub fn cast_vote(
        &self,
        voter: &UserId,
        election: &ElectionId,
        candidate: &CandidateId,
    ) -> Result<VoteReceipt, ElectionError> {
        self.transact(|state| {
            let user = state
                .users
                .get(voter)
                .filter(|u| u.role.can_vote())
                .ok_or(ElectionError::InvalidVoter)?;
            let record = state
                .elections
                .get(election)
                .filter(|e| e.is_active())
                .ok_or(ElectionError::InvalidOrInactiveElection)?;
            if user.has_voted(election) {
                return Err(ElectionError::AlreadyVoted);
            }
            if record.candidate(candidate).is_none() {
                return Err(ElectionError::InvalidCandidate);
            }

            let payload = VotePayload::new(election.clone(), candidate.clone());
            let vote_hash = payload.hash()?;

            let started = Instant::now();
            let block = state
                .ledger
                .add_block(vote_hash, self.clock.now(), &self.generator)?;
            debug!(
                index = block.index(),
                nonce = block.nonce(),
                elapsed = %format_elapsed(started.elapsed()),
                "block sealed"
            );
            let receipt = VoteReceipt {
                vote_hash,
                block_index: block.index(),
                block_hash: block.compute_hash(),
                timestamp: block.timestamp(),
            };

            state.payloads.push(payload);
            if let Some(user) = state.users.get_mut(voter) {
                user.record_vote(election.clone());
            }

            info!(
                election = %election,
                block = receipt.block_index,
                vote_hash = %receipt.vote_hash,
                "vote recorded"
            );
            Ok(receipt)
        })
    }

    /// Stop accepting votes. Closing an already closed election succeeds.
    pub fn close_election(&self, election: &ElectionId) -> Result<ElectionView, ElectionError> {
        self.transact(|state| {
            let record = state
                .elections
                .get_mut(election)
                .ok_or_else(ElectionError::no_such_election)?;
            record.close();
            info!(election = %election, "election closed");
            Ok(ElectionView::new(election.clone(), record))
        })
    }

    /// Remove the election record. Its blocks and payloads stay in the
    /// ledger, so the chain still verifies afterwards.
    pub fn delete_election(&self, election: &ElectionId) -> Result<ElectionView, ElectionError> {
        self.transact(|state| {
            let record = state
                .elections
                .remove(election)
                .ok_or_else(ElectionError::no_such_election)?;
            info!(election = %election, "election deleted");
            Ok(ElectionView::new(election.clone(), &record))
        })
    }

    /// Count payloads per candidate, in the election's candidate order.
    ///
    /// Payloads naming a candidate the election does not have are ignored.
    pub fn tally(&self, election: &ElectionId) -> Result<TallyResult, ElectionError> {
        self.read(|state| {
            let record = state
                .elections
                .get(election)
                .ok_or_else(ElectionError::no_such_election)?;
            let mut results: Vec<CandidateTally> = record
                .candidates
                .iter()
                .map(|c| CandidateTally {
                    candidate_id: c.id.clone(),
                    name: c.name.clone(),
                    votes: 0,
                })
                .collect();
            for payload in state.payloads_for(election) {
                if let Some(entry) = results
                    .iter_mut()
                    .find(|r| r.candidate_id == payload.candidate_id)
                {
                    entry.votes += 1;
                }
            }
            let total = results.iter().map(|r| r.votes).sum();
            Ok(TallyResult {
                election_id: election.clone(),
                title: record.title.clone(),
                results,
                total,
            })
        })
    }

    /// Check the stored chain. Faults are reported, never repaired.
    pub fn verify_chain(&self) -> Result<ChainReport, ElectionError> {
        self.read(|state| {
            let report = state.ledger.report();
            if report.ok {
                debug!(blocks = state.ledger.len(), "chain verified");
            } else {
                warn!(fault = %report.message, "chain verification failed");
            }
            Ok(report)
        })
    }

    // ── Queries ────────────────────────────────────────────────────────

    /// Every election, ordered by id.
    pub fn list_elections(&self) -> Result<Vec<ElectionView>, ElectionError> {
        self.read(|state| {
            Ok(state
                .elections
                .iter()
                .map(|(id, record)| ElectionView::new(id.clone(), record))
                .collect())
        })
    }

    pub fn get_election(&self, election: &ElectionId) -> Result<ElectionView, ElectionError> {
        self.read(|state| {
            state
                .elections
                .get(election)
                .map(|record| ElectionView::new(election.clone(), record))
                .ok_or_else(ElectionError::no_such_election)
        })
    }

    pub fn admin_user(&self) -> Result<User, ElectionError> {
        self.read(|state| {
            state
                .admin()
                .cloned()
                .ok_or_else(|| ElectionError::NotFound("Admin user not found".into()))
        })
    }

    pub fn get_user(&self, user: &UserId) -> Result<Option<User>, ElectionError> {
        self.read(|state| Ok(state.users.get(user).cloned()))
    }

    pub fn voters(&self) -> Result<Vec<User>, ElectionError> {
        self.read(|state| Ok(state.voters().cloned().collect()))
    }

    /// Replace a user's reference photo.
    pub fn update_user_photo(&self, user: &UserId, photo: &str) -> Result<(), ElectionError> {
        if photo.trim().is_empty() {
            return Err(ElectionError::InvalidInput("Photo is required".into()));
        }
        self.transact(|state| {
            let entry = state
                .users
                .get_mut(user)
                .ok_or_else(|| ElectionError::NotFound(format!("No such user: {user}")))?;
            entry.photo_data_uri = Some(photo.to_string());
            debug!(user = %user, "reference photo updated");
            Ok(())
        })
    }

    /// The reference photo of whoever created `election`.
    pub fn election_creator_photo(
        &self,
        election: &ElectionId,
    ) -> Result<CreatorPhoto, ElectionError> {
        self.read(|state| {
            let record = state
                .elections
                .get(election)
                .ok_or_else(ElectionError::no_such_election)?;
            record
                .creator_id
                .as_ref()
                .and_then(|id| state.users.get(id))
                .and_then(|creator| {
                    Some(CreatorPhoto {
                        creator_id: creator.user_id.clone(),
                        photo_data_uri: creator.photo_data_uri.clone()?,
                    })
                })
                .ok_or_else(|| {
                    ElectionError::NotFound(
                        "Could not find the reference photo for the election creator".into(),
                    )
                })
        })
    }

    // ── Persistence ────────────────────────────────────────────────────

    /// Load, mutate, save. Nothing is saved if `op` fails.
    fn transact<T>(
        &self,
        op: impl FnOnce(&mut LedgerState) -> Result<T, ElectionError>,
    ) -> Result<T, ElectionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let _store_lock = self.store.lock()?;
        let mut state = self.load_or_init()?;
        let out = op(&mut state)?;
        self.store.save(&state)?;
        Ok(out)
    }

    /// Load and inspect. Still takes the lock, since loading may initialize.
    fn read<T>(
        &self,
        op: impl FnOnce(&LedgerState) -> Result<T, ElectionError>,
    ) -> Result<T, ElectionError> {
        let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
        let _store_lock = self.store.lock()?;
        let state = self.load_or_init()?;
        op(&state)
    }

    fn load_or_init(&self) -> Result<LedgerState, ElectionError> {
        if let Some(state) = self.store.load()? {
            return Ok(state);
        }
        let state = self.initial_state()?;
        self.store.save(&state)?;
        info!(
            admin = %state.admin().map(|u| u.user_id.as_str()).unwrap_or_default(),
            "initialized empty ledger"
        );
        Ok(state)
    }

    /// Sealed genesis plus a single admin holding the placeholder photo.
    fn initial_state(&self) -> Result<LedgerState, ElectionError> {
        let started = Instant::now();
        let ledger = Chain::with_genesis(&self.generator, self.clock.now())?;
        debug!(elapsed = %format_elapsed(started.elapsed()), "genesis sealed");

        let admin_id = UserId::new(random_id());
        let admin = User::new(
            admin_id.clone(),
            ADMIN_NAME,
            Role::Admin,
            Some(PLACEHOLDER_PHOTO.to_string()),
        );
        let mut state = LedgerState {
            ledger,
            ..Default::default()
        };
        state.users.insert(admin_id, admin);
        Ok(state)
    }
}

/// Trimmed, non-blank, distinct candidate names; at least two.
fn candidate_list(names: &[String]) -> Result<Vec<String>, ElectionError> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for name in names.iter().map(|n| n.trim()).filter(|n| !n.is_empty()) {
        if !seen.insert(name) {
            return Err(ElectionError::InvalidInput(format!(
                "Duplicate candidate: {name}"
            )));
        }
        out.push(name.to_string());
    }
    if out.len() < 2 {
        return Err(ElectionError::InvalidInput(
            "Please provide at least two candidates".into(),
        ));
    }
    Ok(out)
}
