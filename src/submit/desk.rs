//! Submission orchestrator
//!
//! [`LoanDesk`] runs one submission end to end: it interleaves the fixed
//! holds with the single backend call, moves the stage tracker strictly in
//! pipeline order, and hands exactly one outcome to the result presenter.

use crate::backend::ApplicationBackend;
use crate::error::{Error, Result};
use crate::form::{self, ApplicationForm, AttachmentSlot, Field, Validity};
use crate::pipeline::{NoopSurface, StageMark, StageTracker, Surface};
use crate::result::{ResultCard, ResultPresenter};
use crate::submit::classify;
use crate::submit::pacing::{Pacing, hold};
use crate::types::{BackendReply, Outcome, OutcomeKind, Stage, StageId, Trigger, View};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

const INTAKE_ACTIVE: &str = "Extracting and structuring data payloads...";
const INTAKE_DONE: &str = "Data structured successfully.";
const VALIDATION_ACTIVE: &str = "Scrutinizing documents and validating fields...";
const VALIDATION_FAILED: &str = "Validation anomalies detected.";
const VALIDATION_DONE: &str = "All rules and documents verified.";
const DECISION_ACTIVE: &str = "Querying ML ensemble and calculating risk matrices...";
const DECISION_SYSTEM_ERROR: &str = "System Error.";
const DECISION_APPROVED: &str = "Decision reached successfully.";
const DECISION_REJECTED: &str = "Policy limits exceeded.";
const DECISION_NETWORK_ERROR: &str = "Network failure.";

/// Logical position of the desk in the submission state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Form visible, no submission
    Ready,
    /// Intake stage on screen
    Preparing,
    /// Request sent, waiting for the backend
    AwaitingResponse,
    /// Response in, validation screen pending
    Classifying,
    /// Decision stage on screen
    Deciding,
    /// Terminal outcome reached; only a reset leaves this phase
    Finished(OutcomeKind),
}

/// Builder wiring the desk to its collaborators
#[derive(Default)]
pub struct LoanDeskBuilder {
    backend: Option<Arc<dyn ApplicationBackend>>,
    surface: Option<Arc<dyn Surface>>,
    pacing: Option<Pacing>,
}

impl LoanDeskBuilder {
    /// Backend receiving submissions (required)
    #[must_use]
    pub fn backend(mut self, backend: Arc<dyn ApplicationBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Surface rendering every visible change (defaults to [`NoopSurface`])
    #[must_use]
    pub fn surface(mut self, surface: Arc<dyn Surface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Hold times (defaults to [`Pacing::STANDARD`])
    #[must_use]
    pub const fn pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = Some(pacing);
        self
    }

    /// Build the desk in its initial configuration
    ///
    /// The trigger starts enabled on the empty form, the same state `reset`
    /// returns to. The live gate takes over from the first field change, and
    /// `submit` re-checks the form regardless.
    pub fn build(self) -> Result<LoanDesk> {
        let backend = self
            .backend
            .ok_or_else(|| Error::Config("a backend is required to build a loan desk".into()))?;
        let surface = self.surface.unwrap_or_else(|| Arc::new(NoopSurface));
        let pacing = self.pacing.unwrap_or_default();
        let form = ApplicationForm::new();

        Ok(LoanDesk {
            backend,
            tracker: StageTracker::new(Arc::clone(&surface)),
            presenter: ResultPresenter::new(Arc::clone(&surface), pacing.bar_animation),
            surface,
            pacing,
            validity: form::evaluate(&form),
            form,
            trigger: Trigger::idle(true),
            view: View::Form,
            phase: SubmissionPhase::Ready,
        })
    }
}

/// One loan application form with its pipeline and result view
pub struct LoanDesk {
    backend: Arc<dyn ApplicationBackend>,
    surface: Arc<dyn Surface>,
    pacing: Pacing,
    form: ApplicationForm,
    validity: Validity,
    trigger: Trigger,
    view: View,
    tracker: StageTracker,
    presenter: ResultPresenter,
    phase: SubmissionPhase,
}

impl LoanDesk {
    /// Start building a desk
    pub fn builder() -> LoanDeskBuilder {
        LoanDeskBuilder::default()
    }

    /// Change a field and recompute the validity gate
    ///
    /// The trigger follows the gate unless a submission holds it busy.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) -> &Validity {
        self.form.set(field, value);
        self.validity = form::evaluate(&self.form);
        if !self.trigger.busy {
            self.trigger = Trigger::idle(self.validity.is_valid());
        }
        self.surface.on_validity(&self.validity, self.trigger);
        &self.validity
    }

    /// Attach a document to one of the optional slots
    pub fn attach(&mut self, slot: AttachmentSlot, path: impl Into<PathBuf>) {
        self.form.attach(slot, path);
    }

    /// Run one submission to its terminal outcome
    ///
    /// Fails only when the submission cannot start: an earlier submission
    /// still holds the trigger busy, or the form does not pass the gate (the
    /// error then names the offending fields). Every failure after that point is
    /// reported as an [`Outcome`].
    pub async fn submit(&mut self) -> Result<Outcome> {
        if self.trigger.busy {
            return Err(Error::SubmitBlocked(
                "a submission already ran; reset before submitting again".into(),
            ));
        }
        self.validity = form::evaluate(&self.form);
        if !self.validity.is_valid() {
            return Err(Error::SubmitBlocked(self.validity.describe()));
        }

        info!("submitting application to {}", self.backend.endpoint());
        self.set_trigger(Trigger::busy()).await;
        self.switch_view(View::Pipeline).await;
        self.phase = SubmissionPhase::Preparing;
        self.tracker
            .set_stage(StageId::Intake, StageMark::Active, Some(INTAKE_ACTIVE))
            .await;

        hold(self.pacing.intake).await;

        self.tracker
            .set_stage(StageId::Intake, StageMark::Completed, Some(INTAKE_DONE))
            .await;
        self.tracker
            .set_stage(
                StageId::Validation,
                StageMark::Active,
                Some(VALIDATION_ACTIVE),
            )
            .await;

        self.phase = SubmissionPhase::AwaitingResponse;
        let response = self.backend.submit(&self.form).await;
        let outcome = match response {
            Ok(reply) => self.interpret(&reply).await,
            Err(e) => {
                warn!("submission failed without a response: {e}");
                self.tracker
                    .set_stage(
                        StageId::Decision,
                        StageMark::Error,
                        Some(DECISION_NETWORK_ERROR),
                    )
                    .await;
                classify::network_failure()
            }
        };

        self.phase = SubmissionPhase::Finished(outcome.kind);
        info!("submission finished: {}", outcome.kind);

        hold(self.pacing.reveal).await;
        self.switch_view(View::Result).await;
        self.presenter.present(&outcome).await;

        Ok(outcome)
    }

    async fn interpret(&mut self, reply: &BackendReply) -> Outcome {
        debug!("backend answered {}", reply.status);
        hold(self.pacing.validation).await;
        self.phase = SubmissionPhase::Classifying;

        if let Some(outcome) = classify::screen(reply) {
            self.tracker
                .set_stage(
                    StageId::Validation,
                    StageMark::Error,
                    Some(VALIDATION_FAILED),
                )
                .await;
            return outcome;
        }

        self.tracker
            .set_stage(
                StageId::Validation,
                StageMark::Completed,
                Some(VALIDATION_DONE),
            )
            .await;
        self.tracker
            .set_stage(StageId::Decision, StageMark::Active, Some(DECISION_ACTIVE))
            .await;
        self.phase = SubmissionPhase::Deciding;

        hold(self.pacing.decision).await;

        let outcome = classify::decide(reply);
        let (mark, message) = match outcome.kind {
            OutcomeKind::Approved => (StageMark::Completed, DECISION_APPROVED),
            OutcomeKind::SystemError => (StageMark::Error, DECISION_SYSTEM_ERROR),
            _ => (StageMark::Error, DECISION_REJECTED),
        };
        self.tracker
            .set_stage(StageId::Decision, mark, Some(message))
            .await;

        outcome
    }

    /// Return the whole desk to its initial configuration
    ///
    /// Idempotent: the result is the same from any terminal phase and from
    /// the initial state.
    pub async fn reset(&mut self) {
        debug!("resetting loan desk");
        self.presenter.clear();
        self.switch_view(View::Form).await;
        self.form.clear();
        self.validity = form::evaluate(&self.form);
        self.set_trigger(Trigger::idle(true)).await;
        self.tracker.reset().await;
        self.phase = SubmissionPhase::Ready;
    }

    async fn switch_view(&mut self, view: View) {
        self.view = view;
        self.surface.on_view(view).await;
    }

    async fn set_trigger(&mut self, trigger: Trigger) {
        self.trigger = trigger;
        self.surface.on_trigger(trigger).await;
    }

    /// Current form values
    pub const fn form(&self) -> &ApplicationForm {
        &self.form
    }

    /// Last computed validity gate
    pub const fn validity(&self) -> &Validity {
        &self.validity
    }

    /// Trigger control state
    pub const fn trigger(&self) -> Trigger {
        self.trigger
    }

    /// Visible view
    pub const fn view(&self) -> View {
        self.view
    }

    /// Current state-machine phase
    pub const fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    /// One stage's visible state
    pub fn stage(&self, id: StageId) -> &Stage {
        self.tracker.stage(id)
    }

    /// All stages in pipeline order
    pub const fn stages(&self) -> &[Stage; 3] {
        self.tracker.stages()
    }

    /// Rendered result, present only in the result view
    pub const fn result(&self) -> Option<&ResultCard> {
        self.presenter.card()
    }

    /// Hold times in use
    pub const fn pacing(&self) -> Pacing {
        self.pacing
    }
}
