//! Nullable face oracle: scripted verdicts for testing.

use ballot_election::{Authorization, FaceOracle, Identification, OracleError, RegisteredVoter};
use ballot_types::UserId;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Clone, Debug)]
enum Verdict {
    Accept,
    Reject(String),
    Fail(String),
}

/// A [`FaceOracle`] that answers from a script instead of looking at photos.
///
/// Admin checks get the configured verdict. Identification matches the
/// voter set via [`NullFaceOracle::identifies`] if that voter is among the
/// registered candidates.
#[derive(Debug)]
pub struct NullFaceOracle {
    verdict: Verdict,
    identifies: Mutex<Option<UserId>>,
    verify_calls: AtomicUsize,
    identify_calls: AtomicUsize,
}

impl NullFaceOracle {
    fn with_verdict(verdict: Verdict) -> Self {
        Self {
            verdict,
            identifies: Mutex::new(None),
            verify_calls: AtomicUsize::new(0),
            identify_calls: AtomicUsize::new(0),
        }
    }

    /// Every face matches.
    pub fn accepting() -> Self {
        Self::with_verdict(Verdict::Accept)
    }

    /// Every admin check is refused with `reason`; nobody is identified.
    pub fn rejecting(reason: impl Into<String>) -> Self {
        Self::with_verdict(Verdict::Reject(reason.into()))
    }

    /// Every call fails as if the model were unreachable.
    pub fn failing(message: impl Into<String>) -> Self {
        Self::with_verdict(Verdict::Fail(message.into()))
    }

    /// Recognise `voter` in any live photo from now on.
    pub fn identifies(&self, voter: UserId) {
        *self.identifies.lock().unwrap() = Some(voter);
    }

    pub fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    pub fn identify_calls(&self) -> usize {
        self.identify_calls.load(Ordering::SeqCst)
    }
}

impl FaceOracle for NullFaceOracle {
    fn verify_admin(
        &self,
        _reference_photo: &str,
        _live_photo: &str,
    ) -> Result<Authorization, OracleError> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match &self.verdict {
            Verdict::Accept => Ok(Authorization {
                authorized: true,
                reason: "faces match".into(),
            }),
            Verdict::Reject(reason) => Ok(Authorization {
                authorized: false,
                reason: reason.clone(),
            }),
            Verdict::Fail(message) => Err(OracleError(message.clone())),
        }
    }

    fn identify_voter(
        &self,
        _live_photo: &str,
        registered: &[RegisteredVoter],
    ) -> Result<Identification, OracleError> {
        self.identify_calls.fetch_add(1, Ordering::SeqCst);
        match &self.verdict {
            Verdict::Fail(message) => return Err(OracleError(message.clone())),
            Verdict::Reject(reason) => {
                return Ok(Identification {
                    matched: false,
                    voter_id: None,
                    reason: reason.clone(),
                })
            }
            Verdict::Accept => {}
        }
        let target = self.identifies.lock().unwrap().clone();
        Ok(match target.filter(|id| registered.iter().any(|v| &v.user_id == id)) {
            Some(id) => Identification {
                matched: true,
                voter_id: Some(id),
                reason: "face matches a registered voter".into(),
            },
            None => Identification {
                matched: false,
                voter_id: None,
                reason: "no registered voter matches".into(),
            },
        })
    }
}
