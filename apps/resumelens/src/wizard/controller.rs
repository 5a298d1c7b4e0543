use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ScoringMode;
use crate::errors::AnalysisError;
use crate::input::InputStore;
use crate::models::{AnalysisResult, ResumeInput};
use crate::results::{build_improvements_view, build_results_view, ImprovementsView, ResultsView};
use crate::scoring_client::AnalysisClient;
use crate::wizard::state::{RequestToken, WizardState, WorkflowState};
use crate::wizard::transitions::{transition, Effect, PendingAnalysis, WizardEvent};

/// How a resolved request affected the workflow.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Accepted,
    Failed(AnalysisError),
    /// The request had been superseded; its response was ignored.
    Discarded,
}

/// Owns one `WorkflowState` and is the only way to change it.
///
/// The scoring call is split in two so callers can interleave it with other
/// events: `begin_submit` hands out a `PendingAnalysis`, the caller awaits
/// `AnalysisClient::analyze`, then reports back through `complete`. Responses
/// for superseded tokens are dropped. `run_analysis` does all three in one go.
#[derive(Debug)]
pub struct WizardController {
    id: Uuid,
    state: WorkflowState,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardController {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            state: WorkflowState::default(),
        }
    }

    /// A controller whose submissions will use `mode`.
    pub fn with_mode(mode: ScoringMode) -> Self {
        let mut controller = Self::new();
        controller.state.mode = mode;
        controller
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn current(&self) -> WizardState {
        self.state.step
    }

    pub fn progress_step(&self) -> u8 {
        self.state.progress_step()
    }

    pub fn mode(&self) -> ScoringMode {
        self.state.mode
    }

    pub fn inputs(&self) -> &InputStore {
        &self.state.inputs
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.analysis()
    }

    pub fn last_error(&self) -> Option<&AnalysisError> {
        self.state.last_error.as_ref()
    }

    /// Whether the analyze trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        self.state.can_submit()
    }

    fn dispatch(&mut self, event: WizardEvent) -> Effect {
        let event_name = event.name();
        let from = self.state.step;
        let outcome = transition(std::mem::take(&mut self.state), event);
        self.state = outcome.state;

        if from != self.state.step {
            info!(
                "Workflow {}: {} --{}--> {}",
                self.id, from, event_name, self.state.step
            );
        } else {
            debug!("Workflow {}: {} handled in {}", self.id, event_name, from);
        }

        outcome.effect
    }

    fn applied(effect: Effect) -> Result<(), AnalysisError> {
        match effect {
            Effect::Rejected(e) | Effect::Failed(e) => Err(e),
            _ => Ok(()),
        }
    }

    pub fn set_resume(&mut self, resume: ResumeInput) -> Result<(), AnalysisError> {
        Self::applied(self.dispatch(WizardEvent::SetResume(resume)))
    }

    pub fn set_resume_text(
        &mut self,
        source_name: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), AnalysisError> {
        self.set_resume(ResumeInput::text(source_name, text))
    }

    pub fn set_resume_file(
        &mut self,
        file_name: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Result<(), AnalysisError> {
        Self::applied(self.dispatch(WizardEvent::SetResumeFile {
            file_name: file_name.into(),
            bytes,
        }))
    }

    pub fn set_job_description(&mut self, text: impl Into<String>) -> Result<(), AnalysisError> {
        Self::applied(self.dispatch(WizardEvent::SetJobDescription(text.into())))
    }

    /// Only accepted at `Input`.
    pub fn set_mode(&mut self, mode: ScoringMode) -> Result<(), AnalysisError> {
        Self::applied(self.dispatch(WizardEvent::SetMode(mode)))
    }

    /// Validates inputs and enters `Scoring`. The returned request must be sent
    /// and its outcome passed to `complete` with the same token.
    pub fn begin_submit(&mut self) -> Result<PendingAnalysis, AnalysisError> {
        match self.dispatch(WizardEvent::Submit) {
            Effect::Dispatch(pending) => {
                info!(
                    "Workflow {}: dispatching analysis request {}",
                    self.id, pending.token
                );
                Ok(pending)
            }
            Effect::Rejected(e) | Effect::Failed(e) => {
                warn!("Workflow {}: submit rejected: {e}", self.id);
                Err(e)
            }
            other => Err(AnalysisError::InvalidTransition {
                from: self.state.step.to_string(),
                event: format!("submit ({other:?})"),
            }),
        }
    }

    pub fn complete(
        &mut self,
        token: RequestToken,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Completion {
        match self.dispatch(WizardEvent::Resolved { token, outcome }) {
            Effect::Accepted => {
                info!("Workflow {}: accepted result of request {token}", self.id);
                Completion::Accepted
            }
            Effect::Failed(e) => {
                warn!(
                    "Workflow {}: request {token} failed [{}]: {e}",
                    self.id,
                    e.category()
                );
                Completion::Failed(e)
            }
            _ => {
                info!(
                    "Workflow {}: discarded stale response for request {token}",
                    self.id
                );
                Completion::Discarded
            }
        }
    }

    /// Submit in the client's mode, await the scoring call, and apply its outcome.
    pub async fn run_analysis(
        &mut self,
        client: &AnalysisClient,
    ) -> Result<&AnalysisResult, AnalysisError> {
        if self.state.mode != client.mode() {
            self.set_mode(client.mode())?;
        }
        let pending = self.begin_submit()?;
        let outcome = client.analyze(&pending.request).await;

        match self.complete(pending.token, outcome) {
            Completion::Accepted => self.result().ok_or(AnalysisError::InvalidTransition {
                from: self.state.step.to_string(),
                event: "resolved".to_string(),
            }),
            Completion::Failed(e) => Err(e),
            Completion::Discarded => Err(AnalysisError::InvalidTransition {
                from: self.state.step.to_string(),
                event: "resolved".to_string(),
            }),
        }
    }

    /// Results → Improvements.
    pub fn advance(&mut self) -> Result<(), AnalysisError> {
        Self::applied(self.dispatch(WizardEvent::Advance))
    }

    /// Back to a cleared `Input` from any state.
    pub fn reset(&mut self) {
        self.dispatch(WizardEvent::Reset);
    }

    pub fn results_view(&self) -> Option<ResultsView> {
        self.result().map(build_results_view)
    }

    pub fn improvements_view(&self) -> Option<Result<ImprovementsView, AnalysisError>> {
        self.result().map(build_improvements_view)
    }
}
