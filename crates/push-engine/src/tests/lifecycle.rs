use super::*;
use crate::{EventOutcome, WorkerEvent, WorkerLifecycleState};

#[tokio::test]
async fn install_skips_waiting() {
    let h = Harness::new(vec![]);
    assert_eq!(h.worker.lifecycle_state(), WorkerLifecycleState::Parsed);

    let outcome = h.worker.dispatch(WorkerEvent::Install).await.unwrap();
    assert_eq!(outcome, EventOutcome::Installed);
    assert_eq!(h.worker.lifecycle_state(), WorkerLifecycleState::Installed);
    assert_eq!(h.registration.skip_waiting_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn activate_claims_clients() {
    let h = Harness::new(vec![]);
    h.worker.dispatch(WorkerEvent::Install).await.unwrap();
    let outcome = h.worker.dispatch(WorkerEvent::Activate).await.unwrap();

    assert_eq!(outcome, EventOutcome::Activated);
    assert_eq!(h.worker.lifecycle_state(), WorkerLifecycleState::Active);
    assert!(h.clients.claimed.load(Ordering::SeqCst));
}

#[tokio::test]
async fn failed_claim_leaves_worker_activating() {
    let mut clients = FakeClients::new(vec![]);
    clients.fail_claim = true;
    let h = Harness::build(FakeNotifications::default(), clients);

    h.worker.dispatch(WorkerEvent::Install).await.unwrap();
    let err = h.worker.dispatch(WorkerEvent::Activate).await.unwrap_err();

    assert!(matches!(err, WorkerError::Platform(_)));
    assert_eq!(h.worker.lifecycle_state(), WorkerLifecycleState::Activating);
}

#[tokio::test]
async fn periodic_sync_runs_check_only_for_its_tag() {
    let h = Harness::new(vec![]);

    let outcome = h
        .worker
        .dispatch(WorkerEvent::PeriodicSync {
            tag: crate::PERIODIC_CHECK_TAG.into(),
        })
        .await
        .unwrap();
    assert_eq!(outcome, EventOutcome::SyncCompleted);

    let outcome = h
        .worker
        .dispatch(WorkerEvent::PeriodicSync { tag: "refresh-feed".into() })
        .await
        .unwrap();
    assert_eq!(outcome, EventOutcome::Ignored);

    assert_eq!(h.check.runs.load(Ordering::SeqCst), 1);
}
