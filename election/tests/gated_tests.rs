//! Face-gated flows with a scripted oracle.

use ballot_election::{ElectionError, ElectionService, GatedElections};
use ballot_nullables::{NullClock, NullFaceOracle, NullStore};
use ballot_types::ElectionId;
use ballot_work::WorkGenerator;

const ADMIN_FACE: &str = "data:image/jpeg;base64,ADMINFACE";
const VOTER_FACE: &str = "data:image/jpeg;base64,VOTERFACE";

type Gated = GatedElections<NullStore, NullClock, NullFaceOracle>;

fn gated(oracle: NullFaceOracle) -> Gated {
    GatedElections::new(
        ElectionService::with_clock(
            NullStore::new(),
            NullClock::new(1_700_000_000),
            WorkGenerator::sequential(),
        ),
        oracle,
    )
}

fn ab() -> Vec<String> {
    vec!["A".to_string(), "B".to_string()]
}

#[test]
fn first_create_enrolls_admin_without_asking_the_oracle() {
    let g = gated(NullFaceOracle::rejecting("would refuse"));
    let election = g.create_election("Board Seat", &ab(), ADMIN_FACE).unwrap();
    assert_eq!(g.oracle().verify_calls(), 0);

    let admin = g.service().admin_user().unwrap();
    assert_eq!(admin.photo_data_uri.as_deref(), Some(ADMIN_FACE));
    assert_eq!(election.creator_id, Some(admin.user_id));
}

#[test]
fn later_create_is_verified_and_rejection_blocks_it() {
    let g = gated(NullFaceOracle::accepting());
    g.create_election("First", &ab(), ADMIN_FACE).unwrap();
    g.create_election("Second", &ab(), ADMIN_FACE).unwrap();
    assert_eq!(g.oracle().verify_calls(), 1);

    let store_state = g.service().store().snapshot().unwrap();
    let strict = GatedElections::new(
        ElectionService::with_clock(
            NullStore::with_state(store_state),
            NullClock::new(1_700_000_000),
            WorkGenerator::sequential(),
        ),
        NullFaceOracle::rejecting("different person"),
    );
    let err = strict.create_election("Third", &ab(), "data:x").unwrap_err();
    assert!(matches!(err, ElectionError::NotAuthorized(_)));
    assert_eq!(err.to_string(), "face verification failed: different person");
    assert_eq!(strict.service().list_elections().unwrap().len(), 2);
}

#[test]
fn create_requires_photo_and_inputs() {
    let g = gated(NullFaceOracle::accepting());
    assert!(matches!(
        g.create_election("Seat", &ab(), " "),
        Err(ElectionError::InvalidInput(_))
    ));
    assert!(matches!(
        g.create_election("", &ab(), ADMIN_FACE),
        Err(ElectionError::InvalidInput(_))
    ));
    assert!(matches!(
        g.create_election("Seat", &["A".to_string()], ADMIN_FACE),
        Err(ElectionError::InvalidInput(_))
    ));
}

#[test]
fn oracle_outage_is_an_oracle_error() {
    let g = gated(NullFaceOracle::failing("model offline"));
    g.create_election("First", &ab(), ADMIN_FACE).unwrap();
    let err = g.create_election("Second", &ab(), ADMIN_FACE).unwrap_err();
    assert!(matches!(err, ElectionError::Oracle(_)));
}

#[test]
fn add_voter_needs_name_and_photo() {
    let g = gated(NullFaceOracle::accepting());
    assert!(matches!(
        g.add_voter("Ann", ""),
        Err(ElectionError::InvalidInput(_))
    ));
    assert!(matches!(
        g.add_voter("", VOTER_FACE),
        Err(ElectionError::InvalidInput(_))
    ));
    let created = g.add_voter("Ann", VOTER_FACE).unwrap();
    assert_eq!(created.name, "Ann");
}

#[test]
fn identification_needs_registered_photos() {
    let g = gated(NullFaceOracle::accepting());
    g.service().add_voter("No Photo", None).unwrap();
    let err = g.identify_voter(VOTER_FACE).unwrap_err();
    assert!(matches!(err, ElectionError::NotAuthorized(_)));
    assert_eq!(err.to_string(), "no voters with photos registered");
    assert_eq!(g.oracle().identify_calls(), 0);
}

#[test]
fn identified_voter_can_cast() {
    let g = gated(NullFaceOracle::accepting());
    let election = g.create_election("Board Seat", &ab(), ADMIN_FACE).unwrap();
    let ann = g.add_voter("Ann", VOTER_FACE).unwrap();
    g.oracle().identifies(ann.voter_id.clone());

    let who = g.identify_voter(VOTER_FACE).unwrap();
    assert_eq!(who.voter_id, ann.voter_id);
    assert_eq!(who.name, "Ann");

    let receipt = g
        .cast_vote(VOTER_FACE, &election.election_id, &election.candidates[0].id)
        .unwrap();
    assert_eq!(receipt.block_index, 1);
    assert_eq!(g.service().tally(&election.election_id).unwrap().total, 1);
}

#[test]
fn unrecognised_face_cannot_vote() {
    let g = gated(NullFaceOracle::accepting());
    let election = g.create_election("Board Seat", &ab(), ADMIN_FACE).unwrap();
    g.add_voter("Ann", VOTER_FACE).unwrap();

    let err = g
        .cast_vote("data:image/jpeg;base64,STRANGER", &election.election_id, &election.candidates[0].id)
        .unwrap_err();
    assert!(matches!(err, ElectionError::NotAuthorized(_)));
    assert!(err.to_string().starts_with("Could not identify voter"));
    assert_eq!(g.service().tally(&election.election_id).unwrap().total, 0);
}

#[test]
fn close_skips_check_for_placeholder_creator() {
    let g = gated(NullFaceOracle::rejecting("would refuse"));
    let admin = g.service().admin_user().unwrap().user_id;
    // Created through the plain service, so the admin still has the placeholder.
    let election = g
        .service()
        .create_election("Seat", &ab(), &admin, None)
        .unwrap();

    let closed = g.close_election(&election.election_id, ADMIN_FACE).unwrap();
    assert!(!closed.is_active());
    assert_eq!(g.oracle().verify_calls(), 0);
    let creator = g.service().election_creator_photo(&election.election_id).unwrap();
    assert_eq!(creator.photo_data_uri, ADMIN_FACE);
}

#[test]
fn close_with_enrolled_creator_is_verified() {
    let g = gated(NullFaceOracle::accepting());
    let election = g.create_election("Seat", &ab(), ADMIN_FACE).unwrap();
    g.close_election(&election.election_id, ADMIN_FACE).unwrap();
    assert_eq!(g.oracle().verify_calls(), 1);
    assert!(!g.service().get_election(&election.election_id).unwrap().is_active());
}

#[test]
fn rejected_close_leaves_election_open() {
    let g = gated(NullFaceOracle::rejecting("no match"));
    let election = g.create_election("Seat", &ab(), ADMIN_FACE).unwrap();
    let err = g
        .close_election(&election.election_id, "data:image/jpeg;base64,OTHER")
        .unwrap_err();
    assert_eq!(err.to_string(), "face verification failed: no match");
    let creator = g.service().election_creator_photo(&election.election_id).unwrap();
    assert_eq!(creator.photo_data_uri, ADMIN_FACE);
    assert!(g.service().get_election(&election.election_id).unwrap().is_active());
}

#[test]
fn delete_always_verifies() {
    let g = gated(NullFaceOracle::rejecting("no match"));
    let admin = g.service().admin_user().unwrap().user_id;
    let election = g
        .service()
        .create_election("Seat", &ab(), &admin, None)
        .unwrap();

    let err = g.delete_election(&election.election_id, ADMIN_FACE).unwrap_err();
    assert!(matches!(err, ElectionError::NotAuthorized(_)));
    assert_eq!(g.oracle().verify_calls(), 1);
    assert!(g.service().get_election(&election.election_id).is_ok());
}

#[test]
fn accepted_delete_removes_election() {
    let g = gated(NullFaceOracle::accepting());
    let election = g.create_election("Seat", &ab(), ADMIN_FACE).unwrap();
    g.delete_election(&election.election_id, ADMIN_FACE).unwrap();
    assert!(g.service().list_elections().unwrap().is_empty());
    assert!(g.service().verify_chain().unwrap().ok);
}

#[test]
fn gated_ops_on_unknown_election_are_not_found() {
    let g = gated(NullFaceOracle::accepting());
    let missing: ElectionId = "missing".into();
    assert!(matches!(
        g.close_election(&missing, ADMIN_FACE),
        Err(ElectionError::NotFound(_))
    ));
    assert!(matches!(
        g.delete_election(&missing, ADMIN_FACE),
        Err(ElectionError::NotFound(_))
    ));
}
