//! Submission pipeline tests against a mock backend
//!
//! Stage ordering, outcome classification, the validity gate and reset are
//! checked with instant pacing; hold times run under a paused clock.

mod common;

use common::fixtures::{
    approved_reply, bare_reply, complete_form, denied_reply, reply, server_error_reply,
    validation_reply, COMPLETE_VALUES,
};
use common::mock_backend::MockBackend;
use common::recording_surface::{Event, RecordingSurface};
use loanflow::error::Error;
use loanflow::form::{AttachmentSlot, Field};
use loanflow::submit::{LoanDesk, Pacing, SubmissionPhase};
use loanflow::types::{BackendReply, OutcomeKind, StageId, StageStatus, Trigger, View};
use std::sync::Arc;
use std::time::Duration;

fn desk_with(backend: Arc<MockBackend>, surface: Arc<RecordingSurface>, pacing: Pacing) -> LoanDesk {
    LoanDesk::builder()
        .backend(backend)
        .surface(surface)
        .pacing(pacing)
        .build()
        .unwrap()
}

fn fill(desk: &mut LoanDesk) {
    for (field, value) in COMPLETE_VALUES {
        desk.set_field(field, value);
    }
}

/// Run one instant-paced submission that answers with `reply`
async fn run(reply: BackendReply) -> (LoanDesk, Arc<MockBackend>, Arc<RecordingSurface>) {
    let backend = Arc::new(MockBackend::replying(reply));
    let surface = Arc::new(RecordingSurface::new());
    let mut desk = desk_with(Arc::clone(&backend), Arc::clone(&surface), Pacing::INSTANT);
    fill(&mut desk);
    desk.submit().await.unwrap();
    (desk, backend, surface)
}

fn assert_stage_order(transitions: &[(StageId, StageStatus)]) {
    let mut reached = 0;
    for (id, status) in transitions {
        assert!(
            id.index() + 1 >= reached,
            "stage {id} changed after a later stage was reached"
        );
        reached = reached.max(id.index() + 1);
        if *status == StageStatus::Completed {
            assert_eq!(
                reached,
                id.index() + 1,
                "stage {id} completed while a later stage was already reached"
            );
        }
    }
}

// =============================================================================
// Stage ordering
// =============================================================================

#[tokio::test]
async fn test_approved_stage_sequence() {
    let (_desk, _backend, surface) = run(approved_reply()).await;

    assert_eq!(
        surface.stage_transitions(),
        vec![
            (StageId::Intake, StageStatus::Active),
            (StageId::Intake, StageStatus::Completed),
            (StageId::Validation, StageStatus::Active),
            (StageId::Validation, StageStatus::Completed),
            (StageId::Decision, StageStatus::Active),
            (StageId::Decision, StageStatus::Completed),
        ]
    );
}

#[tokio::test]
async fn test_stages_never_complete_out_of_order() {
    for reply in [
        approved_reply(),
        denied_reply(),
        validation_reply(),
        server_error_reply(),
        bare_reply(204),
    ] {
        let (_desk, _backend, surface) = run(reply).await;
        assert_stage_order(&surface.stage_transitions());
    }
}

#[tokio::test]
async fn test_submit_switches_to_pipeline_then_result() {
    let (desk, _backend, surface) = run(approved_reply()).await;

    let views: Vec<View> = surface
        .events()
        .into_iter()
        .filter_map(|e| match e {
            Event::View(v) => Some(v),
            _ => None,
        })
        .collect();
    assert_eq!(views, vec![View::Pipeline, View::Result]);
    assert_eq!(desk.view(), View::Result);
}

#[tokio::test]
async fn test_trigger_busy_until_reset() {
    let (desk, _backend, surface) = run(denied_reply()).await;

    assert!(surface.events().contains(&Event::Trigger(Trigger::busy())));
    assert_eq!(desk.trigger(), Trigger::busy());
    assert_eq!(desk.trigger().label(), None);
}

// =============================================================================
// Classification
// =============================================================================

#[tokio::test]
async fn test_validation_rejection() {
    let (desk, _backend, _surface) = run(validation_reply()).await;

    let card = desk.result().unwrap();
    assert_eq!(card.kind, OutcomeKind::ValidationFailed);
    assert_eq!(card.title, "Rejected");
    assert_eq!(card.remarks, "Income documentation unclear");
    assert!(!card.metrics_visible);
    assert!(card.rows.is_empty());
    assert_eq!(desk.stage(StageId::Validation).status, StageStatus::Error);
    assert_eq!(
        desk.stage(StageId::Validation).message,
        "Validation anomalies detected."
    );
    assert_eq!(desk.stage(StageId::Decision).status, StageStatus::Pending);
    assert_eq!(
        desk.phase(),
        SubmissionPhase::Finished(OutcomeKind::ValidationFailed)
    );
}

#[tokio::test]
async fn test_approval_renders_metrics_at_full_width() {
    let (desk, _backend, surface) = run(approved_reply()).await;

    let card = desk.result().unwrap();
    assert_eq!(card.kind, OutcomeKind::Approved);
    assert_eq!(card.title, "Loan Approved");
    assert_eq!(card.remarks, "Strong profile");
    assert!(card.metrics_visible);
    assert_eq!(card.rows.len(), 2);
    assert_eq!(card.rows[0].key, "confidence");
    assert_eq!(card.rows[0].percent, 92.0);
    assert_eq!(card.rows[0].width, 92.0);
    assert_eq!(card.rows[1].key, "dti_score");
    assert_eq!(card.rows[1].percent, 80.0);
    assert_eq!(card.rows[1].width, 80.0);
    assert_eq!(desk.stage(StageId::Decision).status, StageStatus::Completed);

    let metric_events: Vec<Event> = surface
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::MetricInserted(..) | Event::MetricWidth(..)))
        .collect();
    assert_eq!(
        metric_events,
        vec![
            Event::MetricInserted(0, "confidence".into(), 0.0),
            Event::MetricInserted(1, "dti_score".into(), 0.0),
            Event::MetricWidth(0, "confidence".into(), 92.0),
            Event::MetricWidth(1, "dti_score".into(), 80.0),
        ]
    );
}

#[tokio::test]
async fn test_success_status_counts_as_approval() {
    let (desk, _backend, _surface) = run(reply(
        200,
        serde_json::json!({ "status": "Success", "remarks": "ok" }),
    ))
    .await;

    let card = desk.result().unwrap();
    assert_eq!(card.kind, OutcomeKind::Approved);
    assert!(!card.metrics_visible);
}

#[tokio::test]
async fn test_denial_hides_metrics() {
    let (desk, _backend, _surface) = run(denied_reply()).await;

    let card = desk.result().unwrap();
    assert_eq!(card.kind, OutcomeKind::Rejected);
    assert_eq!(card.title, "Loan Rejected");
    assert_eq!(card.remarks, "Score below threshold");
    assert!(!card.metrics_visible);
    assert_eq!(desk.stage(StageId::Decision).status, StageStatus::Error);
    assert_eq!(
        desk.stage(StageId::Decision).message,
        "Policy limits exceeded."
    );
}

#[tokio::test]
async fn test_server_error_carries_error_text() {
    let (desk, _backend, _surface) = run(server_error_reply()).await;

    let card = desk.result().unwrap();
    assert_eq!(card.kind, OutcomeKind::SystemError);
    assert_eq!(card.title, "Error");
    assert_eq!(
        card.remarks,
        "An internal error occurred: model unavailable"
    );
    assert_eq!(desk.stage(StageId::Decision).status, StageStatus::Error);
    assert_eq!(desk.stage(StageId::Decision).message, "System Error.");
}

#[tokio::test]
async fn test_400_from_other_stage_is_system_error() {
    let (desk, _backend, _surface) = run(reply(
        400,
        serde_json::json!({ "stage": "Decision Agent", "error": "bad input" }),
    ))
    .await;

    assert_eq!(desk.result().unwrap().kind, OutcomeKind::SystemError);
    assert_eq!(desk.stage(StageId::Validation).status, StageStatus::Completed);
}

#[tokio::test]
async fn test_empty_payload_defaults() {
    let (desk, _backend, _surface) = run(bare_reply(200)).await;

    let card = desk.result().unwrap();
    assert_eq!(card.kind, OutcomeKind::Rejected);
    assert_eq!(card.remarks, "No remarks provided.");
}

#[tokio::test]
async fn test_network_failure() {
    let backend = Arc::new(MockBackend::new());
    backend.fail_submit("connection refused");
    let surface = Arc::new(RecordingSurface::new());
    let mut desk = desk_with(Arc::clone(&backend), Arc::clone(&surface), Pacing::INSTANT);
    fill(&mut desk);

    let outcome = desk.submit().await.unwrap();

    assert_eq!(outcome.kind, OutcomeKind::NetworkError);
    assert_eq!(outcome.title, "Error");
    assert_eq!(outcome.remarks, "Failed to connect to agentic backend.");
    assert!(outcome.metrics.is_none());
    assert_eq!(desk.stage(StageId::Decision).status, StageStatus::Error);
    assert_eq!(desk.stage(StageId::Decision).message, "Network failure.");
    assert_eq!(desk.stage(StageId::Validation).status, StageStatus::Active);
    assert_eq!(desk.view(), View::Result);
    assert_eq!(backend.submit_count(), 1);
}

#[tokio::test]
async fn test_presenter_called_once_per_submission() {
    let (_desk, _backend, surface) = run(approved_reply()).await;

    let results = surface
        .events()
        .into_iter()
        .filter(|e| matches!(e, Event::Result(..)))
        .count();
    assert_eq!(results, 1);
}

// =============================================================================
// Request contents
// =============================================================================

#[tokio::test]
async fn test_backend_receives_current_form() {
    let backend = Arc::new(MockBackend::replying(denied_reply()));
    let mut desk = desk_with(
        Arc::clone(&backend),
        Arc::new(RecordingSurface::new()),
        Pacing::INSTANT,
    );
    fill(&mut desk);
    desk.set_field(Field::LoanAmount, "25000");
    desk.attach(AttachmentSlot::IncomeProof, "/tmp/payslip.pdf");

    desk.submit().await.unwrap();

    let calls = backend.get_submit_calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].get(Field::LoanAmount), "25000");
    assert_eq!(calls[0].get(Field::FirstName), "Jane");
    assert!(calls[0].attachment(AttachmentSlot::IncomeProof).is_some());
    assert!(calls[0].attachment(AttachmentSlot::IdentityDocument).is_none());
}

// =============================================================================
// Validity gate
// =============================================================================

#[tokio::test]
async fn test_gate_tracks_every_field_change() {
    let surface = Arc::new(RecordingSurface::new());
    let mut desk = desk_with(
        Arc::new(MockBackend::new()),
        Arc::clone(&surface),
        Pacing::INSTANT,
    );

    for (field, value) in COMPLETE_VALUES {
        desk.set_field(field, value);
    }
    assert!(desk.trigger().enabled);

    desk.set_field(Field::CreditScore, "0");
    assert!(!desk.trigger().enabled);
    assert!(desk.validity().is_marked(Field::CreditScore));

    desk.set_field(Field::CreditScore, "700");
    assert!(desk.trigger().enabled);

    desk.set_field(Field::Email, "");
    assert!(!desk.trigger().enabled);

    desk.set_field(Field::Email, "jane@example.com");
    assert!(desk.trigger().enabled);
    assert!(desk.validity().is_valid());

    let last = surface.events().into_iter().last();
    assert_eq!(last, Some(Event::Validity(true, Trigger::idle(true))));
}

#[tokio::test]
async fn test_submit_blocked_by_invalid_form() {
    let backend = Arc::new(MockBackend::replying(approved_reply()));
    let mut desk = desk_with(
        Arc::clone(&backend),
        Arc::new(RecordingSurface::new()),
        Pacing::INSTANT,
    );
    fill(&mut desk);
    desk.set_field(Field::AnnualIncome, "-1");

    let err = desk.submit().await.unwrap_err();

    let Error::SubmitBlocked(reason) = err else {
        panic!("expected SubmitBlocked, got {err:?}");
    };
    assert!(reason.contains("annual_income"), "reason: {reason}");
    assert_eq!(backend.submit_count(), 0);
    assert_eq!(desk.view(), View::Form);
    assert_eq!(desk.phase(), SubmissionPhase::Ready);
}

#[tokio::test]
async fn test_blocked_submit_names_missing_fields() {
    let backend = Arc::new(MockBackend::replying(approved_reply()));
    let mut desk = desk_with(
        Arc::clone(&backend),
        Arc::new(RecordingSurface::new()),
        Pacing::INSTANT,
    );
    desk.set_field(Field::FirstName, "Jane");
    assert!(!desk.trigger().enabled);

    let err = desk.submit().await.unwrap_err();

    let Error::SubmitBlocked(reason) = err else {
        panic!("expected SubmitBlocked, got {err:?}");
    };
    assert!(reason.contains("last_name"), "reason: {reason}");
    assert!(reason.contains("loan_term"), "reason: {reason}");
    assert!(!reason.contains("first_name"), "reason: {reason}");
    assert_eq!(backend.submit_count(), 0);
}

#[tokio::test]
async fn test_second_submit_before_reset_is_blocked() {
    let (mut desk, backend, _surface) = run(approved_reply()).await;
    backend.push_reply(approved_reply());

    let err = desk.submit().await.unwrap_err();

    let Error::SubmitBlocked(reason) = err else {
        panic!("expected SubmitBlocked, got {err:?}");
    };
    assert!(reason.contains("reset"), "reason: {reason}");
    assert_eq!(backend.submit_count(), 1);
}

#[tokio::test]
async fn test_field_edit_during_result_keeps_trigger_disabled() {
    let (mut desk, _backend, _surface) = run(denied_reply()).await;

    desk.set_field(Field::LoanAmount, "5000");

    assert!(!desk.trigger().enabled);
    assert!(desk.trigger().busy);
}

// =============================================================================
// Reset
// =============================================================================

#[tokio::test]
async fn test_reset_restores_initial_configuration() {
    for reply in [
        approved_reply(),
        denied_reply(),
        validation_reply(),
        server_error_reply(),
    ] {
        let (mut desk, _backend, _surface) = run(reply).await;
        desk.reset().await;

        assert_eq!(desk.view(), View::Form);
        assert!(desk.result().is_none());
        assert_eq!(desk.trigger(), Trigger::idle(true));
        assert_eq!(desk.trigger().label(), Some("Submit Application"));
        assert_eq!(desk.phase(), SubmissionPhase::Ready);
        for id in StageId::ALL {
            assert_eq!(desk.stage(id).status, StageStatus::Pending);
            assert_eq!(desk.stage(id).message, id.placeholder());
        }
        assert_eq!(desk.form().get(Field::FirstName), "");
    }
}

#[tokio::test]
async fn test_reset_is_idempotent() {
    let backend = Arc::new(MockBackend::new());
    backend.fail_submit("down");
    let mut desk = desk_with(backend, Arc::new(RecordingSurface::new()), Pacing::INSTANT);
    fill(&mut desk);
    desk.submit().await.unwrap();

    desk.reset().await;
    let once: Vec<_> = desk.stages().to_vec();
    let trigger = desk.trigger();

    desk.reset().await;
    assert_eq!(desk.stages().to_vec(), once);
    assert_eq!(desk.trigger(), trigger);
    assert_eq!(desk.view(), View::Form);
}

#[tokio::test]
async fn test_desk_reusable_after_reset() {
    let backend = Arc::new(MockBackend::replying(denied_reply()));
    backend.push_reply(approved_reply());
    let mut desk = desk_with(
        Arc::clone(&backend),
        Arc::new(RecordingSurface::new()),
        Pacing::INSTANT,
    );

    fill(&mut desk);
    assert_eq!(desk.submit().await.unwrap().kind, OutcomeKind::Rejected);
    desk.reset().await;

    fill(&mut desk);
    assert_eq!(desk.submit().await.unwrap().kind, OutcomeKind::Approved);
    assert_eq!(backend.submit_count(), 2);
    assert_eq!(backend.get_submit_calls()[1], complete_form());
}

// =============================================================================
// Holds
// =============================================================================

#[tokio::test(start_paused = true)]
async fn test_standard_holds_are_minimums() {
    let backend = Arc::new(MockBackend::replying(approved_reply()));
    let surface = Arc::new(RecordingSurface::new());
    let mut desk = desk_with(backend, Arc::clone(&surface), Pacing::STANDARD);
    fill(&mut desk);

    desk.submit().await.unwrap();

    let intake_done = surface
        .elapsed_at(|e| matches!(e, Event::Stage(StageId::Intake, StageStatus::Completed, _)))
        .unwrap();
    let validation_done = surface
        .elapsed_at(|e| {
            matches!(e, Event::Stage(StageId::Validation, StageStatus::Completed, _))
        })
        .unwrap();
    let decision_done = surface
        .elapsed_at(|e| matches!(e, Event::Stage(StageId::Decision, StageStatus::Completed, _)))
        .unwrap();
    let result_shown = surface
        .elapsed_at(|e| matches!(e, Event::Result(..)))
        .unwrap();
    let bars_grown = surface
        .elapsed_at(|e| matches!(e, Event::MetricWidth(..)))
        .unwrap();

    assert!(intake_done >= Duration::from_millis(1500));
    assert!(validation_done >= Duration::from_millis(3000));
    assert!(decision_done >= Duration::from_millis(5000));
    assert!(result_shown >= Duration::from_millis(5800));
    assert!(bars_grown >= Duration::from_millis(5900));
}

#[tokio::test(start_paused = true)]
async fn test_validation_hold_starts_after_response() {
    let backend = Arc::new(MockBackend::replying(denied_reply()));
    backend.set_latency(Duration::from_secs(3));
    let surface = Arc::new(RecordingSurface::new());
    let mut desk = desk_with(backend, Arc::clone(&surface), Pacing::STANDARD);
    fill(&mut desk);

    desk.submit().await.unwrap();

    let validation_done = surface
        .elapsed_at(|e| {
            matches!(e, Event::Stage(StageId::Validation, StageStatus::Completed, _))
        })
        .unwrap();
    assert!(validation_done >= Duration::from_millis(6000));
}

#[tokio::test(start_paused = true)]
async fn test_network_failure_skips_remaining_stage_holds() {
    let backend = Arc::new(MockBackend::new());
    backend.fail_submit("refused");
    let surface = Arc::new(RecordingSurface::new());
    let mut desk = desk_with(backend, Arc::clone(&surface), Pacing::STANDARD);
    fill(&mut desk);

    desk.submit().await.unwrap();

    let decision_error = surface
        .elapsed_at(|e| matches!(e, Event::Stage(StageId::Decision, StageStatus::Error, _)))
        .unwrap();
    let result_shown = surface
        .elapsed_at(|e| matches!(e, Event::Result(..)))
        .unwrap();
    assert!(decision_error >= Duration::from_millis(1500));
    assert!(decision_error < Duration::from_millis(3000));
    assert!(result_shown >= decision_error + Duration::from_millis(800));
}
