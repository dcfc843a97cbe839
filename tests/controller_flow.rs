//! End-to-end controller flow with real estimate jobs

use neurocinema::app::{ControllerAction, Effect, EstimateJob, JobOutcome, Screen, StateManager};
use neurocinema::models::{MovieRecord, RecordField};
use std::time::Duration;
use tokio::sync::mpsc;

fn fill(state: &mut StateManager) {
    let values = [
        (RecordField::Name, "Quiet Rooms"),
        (RecordField::Genre, "Drama"),
        (RecordField::Director, "A. Director"),
        (RecordField::Runtime, "100"),
        (RecordField::Score, "9"),
        (RecordField::Budget, "10000000"),
        (RecordField::Year, "2020"),
        (RecordField::Votes, "1000"),
    ];
    for (field, value) in values {
        state.handle(ControllerAction::Edit(field, value.to_string()));
    }
}

fn schedule(effect: Effect) -> (u64, MovieRecord) {
    match effect {
        Effect::ScheduleEstimate { job_id, record } => (job_id, record),
        other => panic!("expected a scheduled estimate, got {:?}", other),
    }
}

#[tokio::test]
async fn test_full_flow_reaches_results_and_resets() {
    let mut state = StateManager::new();
    state.handle(ControllerAction::Start);
    fill(&mut state);

    let (job_id, record) = schedule(state.handle(ControllerAction::Submit));
    let (tx, mut rx) = mpsc::channel(1);
    let job = EstimateJob::spawn(job_id, record, Duration::from_millis(10), 42, tx);

    let ready = rx.recv().await.expect("estimate");
    state.handle(ControllerAction::EstimateReady {
        job_id: ready.job_id,
        estimate: ready.estimate,
    });
    assert_eq!(job.join().await.unwrap(), JobOutcome::Delivered);

    assert_eq!(state.screen(), Screen::Results);
    let gross = state.estimate().expect("estimate stored").gross;
    assert!((19_440_000.0..=29_160_000.0).contains(&gross));

    state.handle(ControllerAction::Reset);
    assert_eq!(state.screen(), Screen::Welcome);
    assert!(state.record().is_empty());
    assert!(state.estimate().is_none());
}

#[tokio::test]
async fn test_result_arriving_after_reset_is_ignored() {
    let mut state = StateManager::new();
    state.handle(ControllerAction::Start);
    fill(&mut state);

    let (job_id, record) = schedule(state.handle(ControllerAction::Submit));
    let (tx, mut rx) = mpsc::channel(1);
    // Not cancelled, so it still delivers after the reset
    let job = EstimateJob::spawn(job_id, record, Duration::from_millis(20), 1, tx);

    assert_eq!(
        state.handle(ControllerAction::Reset),
        Effect::CancelEstimate { job_id }
    );

    let stale = rx.recv().await.expect("job still delivers");
    state.handle(ControllerAction::EstimateReady {
        job_id: stale.job_id,
        estimate: stale.estimate,
    });
    job.join().await.unwrap();

    assert_eq!(state.screen(), Screen::Welcome);
    assert!(state.estimate().is_none());
    assert!(state.record().is_empty());
}

#[tokio::test]
async fn test_cancelled_job_leaves_state_untouched() {
    let mut state = StateManager::new();
    state.handle(ControllerAction::Start);
    fill(&mut state);

    let (job_id, record) = schedule(state.handle(ControllerAction::Submit));
    let (tx, mut rx) = mpsc::channel(1);
    let mut job = EstimateJob::spawn(job_id, record, Duration::from_secs(5), 1, tx);

    if let Effect::CancelEstimate { job_id: cancelled } = state.handle(ControllerAction::Reset) {
        assert_eq!(cancelled, job.job_id());
        job.cancel();
    }

    assert_eq!(job.join().await.unwrap(), JobOutcome::Cancelled);
    assert!(rx.recv().await.is_none());
    assert_eq!(state.screen(), Screen::Welcome);
}

#[test]
fn test_incomplete_record_never_schedules() {
    let mut state = StateManager::new();
    state.handle(ControllerAction::Start);
    state.handle(ControllerAction::Edit(RecordField::Name, "Only a title".into()));

    assert!(!state.submit_enabled());
    assert_eq!(state.handle(ControllerAction::Submit), Effect::None);
    assert_eq!(state.screen(), Screen::Input);
    assert_eq!(state.missing_required().len(), 7);
}
