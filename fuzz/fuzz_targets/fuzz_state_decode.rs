#![no_main]

use libfuzzer_sys::fuzz_target;

use ballot_store::LedgerState;

// A state file is untrusted input: loading, verifying and counting over
// whatever it contains must never panic.
fuzz_target!(|data: &[u8]| {
    let Ok(state) = serde_json::from_slice::<LedgerState>(data) else {
        return;
    };
    let report = state.ledger.report();
    assert_eq!(report.ok, state.ledger.verify().is_ok());

    for (id, election) in &state.elections {
        for payload in state.payloads_for(id) {
            let _ = election.candidate(&payload.candidate_id);
            let _ = payload.hash();
        }
    }
    let _ = state.admin();
    let _ = state.voters().count();
});
