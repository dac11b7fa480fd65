use callboard_core::model::TimeSeriesPoint;
use callboard_core::{
    ChartSurface, EditError, EditOutcome, EditSession, EditStep, EditWorkflow, SaveSync,
    ValidationError,
};
use prefstore::{
    MemoryStore, PreferenceRecord, PreferenceStore, RemoteError, StoreKind, StoredValue,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Store double that fails every call and counts how often it was hit.
#[derive(Default)]
struct DownStore {
    lookups: AtomicUsize,
    upserts: AtomicUsize,
}

impl PreferenceStore for DownStore {
    fn lookup(
        &self,
        _email: &str,
        _setting_key: &str,
    ) -> Result<Option<StoredValue>, RemoteError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        Err(RemoteError::Status {
            code: 404,
            body: "relation \"user_settings\" does not exist".to_string(),
        })
    }

    fn upsert(&self, _record: &PreferenceRecord) -> Result<(), RemoteError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        Err(RemoteError::Transport("connection refused".to_string()))
    }

    fn kind(&self) -> StoreKind {
        StoreKind::Remote
    }
}

fn memory_workflow() -> (EditWorkflow, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    (EditWorkflow::new(store.clone()), store)
}

#[test]
fn email_without_at_stays_in_collect_identity() {
    let (workflow, _store) = memory_workflow();
    let surface = ChartSurface::seeded();
    let mut session = workflow.open(&surface);
    session.email = "not-an-email".to_string();

    let result = workflow.submit_identity(&mut session);

    assert_eq!(
        result,
        Err(EditError::Validation(ValidationError::InvalidEmail))
    );
    assert_eq!(session.step(), EditStep::CollectIdentity);
    assert_eq!(session.error_message(), Some("Please enter a valid email."));
    assert!(!session.is_pending());
}

#[test]
fn stored_value_leads_to_confirm_and_seeds_overwrite() {
    let store = Arc::new(MemoryStore::with_records([PreferenceRecord::new(
        "a@b.com",
        "Calls at 11:00",
        410.0,
    )]));
    let workflow = EditWorkflow::new(store);
    let surface = ChartSurface::seeded();
    let mut session = workflow.open(&surface);
    session.email = "a@b.com".to_string();

    let step = workflow.submit_identity(&mut session).expect("lookup");
    assert_eq!(step, EditStep::ConfirmOverwrite);
    assert_eq!(session.previous_remote_value(), Some(410.0));

    session.confirm_overwrite().expect("overwrite");
    assert_eq!(session.step(), EditStep::CollectValue);
    assert_eq!(session.candidate_value, "410");
}

#[test]
fn cancel_at_confirm_leaves_surface_alone() {
    let store = Arc::new(MemoryStore::with_records([PreferenceRecord::new(
        "a@b.com",
        "Calls at 11:00",
        410.0,
    )]));
    let workflow = EditWorkflow::new(store.clone());
    let mut surface = ChartSurface::seeded();
    let mut session = workflow.open(&surface);
    session.email = "a@b.com".to_string();
    workflow.submit_identity(&mut session).expect("lookup");

    let outcome = session.cancel();
    workflow.finish(&outcome, &mut surface).expect("finish");

    assert_eq!(outcome, EditOutcome::Cancelled);
    assert!(session.is_closed());
    assert_eq!(surface.slot().value, 340.0);
    assert_eq!(surface.revision(), 0);
    assert_eq!(
        store.get("a@b.com", "Calls at 11:00").map(|r| r.custom_value),
        Some(410.0)
    );
}

#[test]
fn missing_record_seeds_open_time_value() {
    let (workflow, _store) = memory_workflow();
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    session.email = "a@b.com".to_string();
    session.candidate_value = "typed before lookup".to_string();

    let step = workflow.submit_identity(&mut session).expect("lookup");

    assert_eq!(step, EditStep::CollectValue);
    assert_eq!(session.candidate_value, "340");
    assert_eq!(session.previous_remote_value(), None);
}

#[test]
fn failing_lookup_degrades_to_collect_value() {
    let store = Arc::new(DownStore::default());
    let workflow = EditWorkflow::new(store.clone());
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    session.email = "a@b.com".to_string();

    let step = workflow.submit_identity(&mut session).expect("remote errors are not surfaced");

    assert_eq!(step, EditStep::CollectValue);
    assert_eq!(session.candidate_value, "340");
    assert_eq!(session.error_message(), None);
    assert_eq!(store.lookups.load(Ordering::SeqCst), 1);
}

#[test]
fn non_numeric_value_is_rejected_without_remote_call() {
    let store = Arc::new(DownStore::default());
    let workflow = EditWorkflow::new(store.clone());
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    session.email = "a@b.com".to_string();
    workflow.submit_identity(&mut session).expect("lookup");

    session.candidate_value = "five hundred".to_string();
    let result = workflow.submit_value(&mut session);

    assert!(matches!(
        result,
        Err(EditError::Validation(ValidationError::InvalidNumber(_)))
    ));
    assert_eq!(session.step(), EditStep::CollectValue);
    assert_eq!(session.error_message(), Some("Please enter a valid number"));
    assert_eq!(store.upserts.load(Ordering::SeqCst), 0);
    assert!(!session.is_closed());
}

#[test]
fn failed_upsert_still_updates_slot() {
    let store = Arc::new(DownStore::default());
    let workflow = EditWorkflow::new(store.clone());
    let mut surface = ChartSurface::seeded();
    let mut session = workflow.open(&surface);
    session.email = "a@b.com".to_string();
    workflow.submit_identity(&mut session).expect("lookup");
    session.candidate_value = "512.5".to_string();

    let outcome = workflow.submit_value(&mut session).expect("save completes");
    workflow.finish(&outcome, &mut surface).expect("finish");

    match outcome {
        EditOutcome::Saved { email, value, sync } => {
            assert_eq!(email, "a@b.com");
            assert_eq!(value, 512.5);
            assert!(sync.is_local_only());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(store.upserts.load(Ordering::SeqCst), 1);
    assert_eq!(surface.slot().value, 512.5);
}

#[test]
fn eleven_oclock_scenario_saves_everywhere() {
    let (workflow, store) = memory_workflow();
    let mut surface = ChartSurface::seeded();
    assert_eq!(surface.slot(), &TimeSeriesPoint::new("11:00", 340.0));

    let mut session = workflow.open(&surface);
    session.email = "a@b.com".to_string();
    assert_eq!(
        workflow.submit_identity(&mut session),
        Ok(EditStep::CollectValue)
    );
    assert_eq!(session.candidate_value, "340");

    session.candidate_value = "500".to_string();
    let outcome = workflow.submit_value(&mut session).expect("save");
    workflow.finish(&outcome, &mut surface).expect("finish");

    assert_eq!(
        outcome,
        EditOutcome::Saved {
            email: "a@b.com".to_string(),
            value: 500.0,
            sync: SaveSync::Everywhere,
        }
    );
    assert_eq!(surface.slot(), &TimeSeriesPoint::new("11:00", 500.0));
    assert_eq!(
        store.get("a@b.com", "Calls at 11:00").map(|r| r.custom_value),
        Some(500.0)
    );
}

#[test]
fn reopening_starts_over_from_live_value() {
    let (workflow, _store) = memory_workflow();
    let mut surface = ChartSurface::seeded();
    let mut first = workflow.open(&surface);
    first.email = "a@b.com".to_string();
    workflow.submit_identity(&mut first).expect("lookup");
    first.candidate_value = "777".to_string();
    let outcome = workflow.submit_value(&mut first).expect("save");
    workflow.finish(&outcome, &mut surface).expect("finish");

    let second = workflow.open(&surface);
    assert_ne!(second.id(), first.id());
    assert_eq!(second.step(), EditStep::CollectIdentity);
    assert_eq!(second.email, "");
    assert_eq!(second.candidate_value, "777");
    assert_eq!(second.error_message(), None);
}

#[test]
fn transitions_from_wrong_step_are_rejected() {
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    assert_eq!(
        session.confirm_overwrite(),
        Err(EditError::UnexpectedStep {
            expected: EditStep::ConfirmOverwrite,
            actual: EditStep::CollectIdentity,
        })
    );
    assert!(matches!(
        session.begin_save(),
        Err(EditError::UnexpectedStep { .. })
    ));
    assert_eq!(session.step(), EditStep::CollectIdentity);
}

#[test]
fn in_flight_lookup_blocks_resubmission() {
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    session.email = "a@b.com".to_string();
    let request = session.begin_lookup().expect("request");
    assert_eq!(request.setting_key, "Calls at 11:00");
    assert_eq!(request.session, session.id());
    assert!(session.is_pending());
    assert_eq!(session.begin_lookup(), Err(EditError::Busy));

    session.resolve_lookup(Ok(None)).expect("resolve");
    assert!(!session.is_pending());
    assert_eq!(session.resolve_lookup(Ok(None)), Err(EditError::NotPending));
}

#[test]
fn results_after_cancel_are_dropped() {
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    session.email = "a@b.com".to_string();
    session.begin_lookup().expect("request");
    session.cancel();

    assert_eq!(
        session.resolve_lookup(Ok(Some(StoredValue { custom_value: 1.0 }))),
        Err(EditError::Closed)
    );
    assert_eq!(session.step(), EditStep::CollectIdentity);
}

#[test]
fn save_request_carries_record_for_key() {
    let mut session = EditSession::open(340.0, "Calls at 11:00");
    session.email = "a@b.com".to_string();
    session.begin_lookup().expect("lookup");
    session.resolve_lookup(Ok(None)).expect("resolve");
    session.candidate_value = " 42 ".to_string();

    let request = session.begin_save().expect("save request");
    assert_eq!(request.record.email, "a@b.com");
    assert_eq!(request.record.setting_key, "Calls at 11:00");
    assert_eq!(request.record.custom_value, 42.0);

    let outcome = session.complete_save(Ok(())).expect("complete");
    assert!(matches!(outcome, EditOutcome::Saved { sync: SaveSync::Everywhere, .. }));
    assert_eq!(session.complete_save(Ok(())), Err(EditError::Closed));
}

#[test]
fn save_uses_the_email_that_was_looked_up() {
    let surface = ChartSurface::seeded();
    let mut session = EditSession::open(surface.slot().value, surface.slot_label());
    session.email = "a@b.com".to_string();

    let lookup = session.begin_lookup().expect("lookup request");
    session.email = "nobody".to_string();
    session.resolve_lookup(Ok(None)).expect("resolve");
    assert_eq!(session.checked_email(), Some("a@b.com"));

    session.candidate_value = "500".to_string();
    let save = session.begin_save().expect("save request");
    assert_eq!(save.record.email, lookup.email);
    assert_eq!(save.record.email, "a@b.com");

    let outcome = session.complete_save(Ok(())).expect("complete");
    match outcome {
        EditOutcome::Saved { email, .. } => assert_eq!(email, "a@b.com"),
        other => panic!("unexpected outcome {other:?}"),
    }
}
