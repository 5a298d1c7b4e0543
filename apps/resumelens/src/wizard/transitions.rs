//! The wizard's transition table as a pure function.
//!
//! ```text
//! Input        --submit, submittable-->      Scoring
//! Input        --submit, not submittable-->  Input   (ValidationError, no transition)
//!                                                     (includes a binary resume in JSON mode)
//! Scoring      --resolved Ok-->              Results (store result)
//! Scoring      --resolved Err-->             Input   (report failure, no result)
//! Results      --advance-->                  Improvements
//! any          --reset-->                    Input   (ResetCoordinator)
//! ```
//!
//! A resolution whose token is not the live one is discarded in every state.
//! Events outside the table leave the state untouched.

use chrono::Utc;

use crate::config::ScoringMode;
use crate::errors::{AnalysisError, ValidationError};
use crate::models::{AnalysisResult, ResumeInput};
use crate::scoring_client::normalize::validate_result;
use crate::scoring_client::AnalysisRequest;
use crate::wizard::reset::ResetCoordinator;
use crate::wizard::state::{AcceptedResult, RequestToken, WizardState, WorkflowState};

#[derive(Debug, Clone)]
pub enum WizardEvent {
    SetResume(ResumeInput),
    SetResumeFile { file_name: String, bytes: Vec<u8> },
    SetJobDescription(String),
    SetMode(ScoringMode),
    Submit,
    Resolved {
        token: RequestToken,
        outcome: Result<AnalysisResult, AnalysisError>,
    },
    Advance,
    Reset,
}

impl WizardEvent {
    pub fn name(&self) -> &'static str {
        match self {
            WizardEvent::SetResume(_) => "set_resume",
            WizardEvent::SetResumeFile { .. } => "set_resume_file",
            WizardEvent::SetJobDescription(_) => "set_job_description",
            WizardEvent::SetMode(_) => "set_mode",
            WizardEvent::Submit => "submit",
            WizardEvent::Resolved { .. } => "resolved",
            WizardEvent::Advance => "advance",
            WizardEvent::Reset => "reset",
        }
    }
}

/// A request the caller must now send, tagged with its token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingAnalysis {
    pub token: RequestToken,
    pub request: AnalysisRequest,
}

/// What a transition asks the caller to do or report.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// State changed; nothing to report.
    Applied,
    /// Entered `Scoring`; the caller must run this request.
    Dispatch(PendingAnalysis),
    /// Event refused; state unchanged apart from the error flag.
    Rejected(AnalysisError),
    /// The live request failed; the workflow is back at `Input`.
    Failed(AnalysisError),
    /// The live request succeeded; the workflow is at `Results`.
    Accepted,
    /// A superseded request resolved and was ignored.
    Discarded(RequestToken),
}

#[derive(Debug, Clone)]
pub struct Transition {
    pub state: WorkflowState,
    pub effect: Effect,
}

impl Transition {
    fn to(state: WorkflowState, effect: Effect) -> Self {
        Self { state, effect }
    }
}

pub fn transition(mut state: WorkflowState, event: WizardEvent) -> Transition {
    let from = state.step;

    match (from, event) {
        (_, WizardEvent::Reset) => {
            ResetCoordinator::reset(&mut state);
            Transition::to(state, Effect::Applied)
        }

        (_, WizardEvent::Resolved { token, outcome }) => resolve(state, token, outcome),

        (WizardState::Input, WizardEvent::SetResume(resume)) => {
            state.inputs.set_resume(resume);
            Transition::to(state, Effect::Applied)
        }

        (WizardState::Input, WizardEvent::SetResumeFile { file_name, bytes }) => {
            match state.inputs.set_resume_file(&file_name, bytes) {
                Ok(()) => Transition::to(state, Effect::Applied),
                Err(e) => reject(state, e.into()),
            }
        }

        (WizardState::Input, WizardEvent::SetJobDescription(text)) => {
            state.inputs.set_job_description(text);
            Transition::to(state, Effect::Applied)
        }

        (WizardState::Input, WizardEvent::SetMode(mode)) => {
            state.mode = mode;
            Transition::to(state, Effect::Applied)
        }

        (WizardState::Input, WizardEvent::Submit) => {
            if let Err(e) = state.inputs.validate_for(state.mode) {
                return reject(state, e.into());
            }
            let Some((resume, job_description)) = state.inputs.snapshot() else {
                return reject(state, ValidationError::MissingResume.into());
            };
            let token = state.ledger.issue();
            state.step = WizardState::Scoring;
            state.last_error = None;
            Transition::to(
                state,
                Effect::Dispatch(PendingAnalysis {
                    token,
                    request: AnalysisRequest::new(resume, job_description),
                }),
            )
        }

        (WizardState::Scoring, WizardEvent::Submit) => {
            Transition::to(state, Effect::Rejected(AnalysisError::ConcurrentRequest))
        }

        (WizardState::Results, WizardEvent::Advance) if state.result.is_some() => {
            state.step = WizardState::Improvements;
            Transition::to(state, Effect::Applied)
        }

        (from, event) => Transition::to(
            state,
            Effect::Rejected(AnalysisError::InvalidTransition {
                from: from.to_string(),
                event: event.name().to_string(),
            }),
        ),
    }
}

fn resolve(
    mut state: WorkflowState,
    token: RequestToken,
    outcome: Result<AnalysisResult, AnalysisError>,
) -> Transition {
    if state.step != WizardState::Scoring || !state.ledger.settle(token) {
        return Transition::to(state, Effect::Discarded(token));
    }

    match outcome.and_then(|result| validate_result(&result).map(|()| result)) {
        Ok(result) => {
            state.result = Some(AcceptedResult {
                token,
                result,
                accepted_at: Utc::now(),
            });
            state.step = WizardState::Results;
            Transition::to(state, Effect::Accepted)
        }
        Err(e) => {
            state.result = None;
            state.step = WizardState::Input;
            state.last_error = Some(e.clone());
            Transition::to(state, Effect::Failed(e))
        }
    }
}

/// Refuses an event at `Input`, recording the error for display.
fn reject(mut state: WorkflowState, error: AnalysisError) -> Transition {
    state.last_error = Some(error.clone());
    Transition::to(state, Effect::Rejected(error))
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::models::PresentationHints;

    fn sample_result(score: f64) -> AnalysisResult {
        AnalysisResult {
            overall_score: score,
            semantic_similarity: 70.0,
            keyword_match: 60.0,
            skill_match: 50.0,
            matched_skills: vec!["Python".to_string()],
            missing_skills: vec!["Docker".to_string()],
            category_analysis: BTreeMap::new(),
            recommendations: vec![],
            resume_bullets: vec![],
            improved_bullets: vec![],
            hints: PresentationHints::default(),
        }
    }

    fn filled() -> WorkflowState {
        let mut state = WorkflowState::default();
        state.inputs.set_resume_text("paste", "Python, SQL");
        state.inputs.set_job_description("Docker, Kubernetes");
        state
    }

    fn submit(state: WorkflowState) -> (WorkflowState, RequestToken) {
        let t = transition(state, WizardEvent::Submit);
        match t.effect {
            Effect::Dispatch(pending) => (t.state, pending.token),
            other => panic!("expected dispatch, got {other:?}"),
        }
    }

    #[test]
    fn test_submit_without_inputs_stays_at_input() {
        let t = transition(WorkflowState::default(), WizardEvent::Submit);
        assert_eq!(t.state.step, WizardState::Input);
        assert_eq!(
            t.effect,
            Effect::Rejected(AnalysisError::Validation(ValidationError::MissingResume))
        );
        assert!(t.state.last_error.is_some());
    }

    #[test]
    fn test_submit_with_inputs_enters_scoring() {
        let t = transition(filled(), WizardEvent::Submit);
        assert_eq!(t.state.step, WizardState::Scoring);
        match t.effect {
            Effect::Dispatch(pending) => {
                assert_eq!(pending.request.job_description, "Docker, Kubernetes");
                assert!(t.state.ledger.is_live(pending.token));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_second_submit_while_scoring_is_concurrent_error() {
        let (state, token) = submit(filled());
        let t = transition(state, WizardEvent::Submit);
        assert_eq!(t.effect, Effect::Rejected(AnalysisError::ConcurrentRequest));
        assert_eq!(t.state.step, WizardState::Scoring);
        assert!(t.state.ledger.is_live(token));
    }

    #[test]
    fn test_success_moves_to_results() {
        let (state, token) = submit(filled());
        let t = transition(
            state,
            WizardEvent::Resolved {
                token,
                outcome: Ok(sample_result(78.5)),
            },
        );
        assert_eq!(t.effect, Effect::Accepted);
        assert_eq!(t.state.step, WizardState::Results);
        assert_eq!(t.state.progress_step(), 2);
        assert_eq!(t.state.analysis().unwrap().overall_score, 78.5);
    }

    #[test]
    fn test_failure_returns_to_input_without_result() {
        let (state, token) = submit(filled());
        let err = AnalysisError::Server {
            status_code: 500,
            message: String::new(),
        };
        let t = transition(
            state,
            WizardEvent::Resolved {
                token,
                outcome: Err(err.clone()),
            },
        );
        assert_eq!(t.effect, Effect::Failed(err.clone()));
        assert_eq!(t.state.step, WizardState::Input);
        assert!(t.state.result.is_none());
        assert_eq!(t.state.last_error, Some(err));
        // inputs survive so the user can retry
        assert!(t.state.inputs.is_submittable());
    }

    #[test]
    fn test_invalid_result_is_treated_as_failure() {
        let (state, token) = submit(filled());
        let mut bad = sample_result(60.0);
        bad.resume_bullets = vec!["Worked on ML models".to_string()];
        let t = transition(
            state,
            WizardEvent::Resolved {
                token,
                outcome: Ok(bad),
            },
        );
        assert!(matches!(
            t.effect,
            Effect::Failed(AnalysisError::MismatchedLength { .. })
        ));
        assert_eq!(t.state.step, WizardState::Input);
    }

    #[test]
    fn test_stale_resolution_is_discarded() {
        let (state, stale) = submit(filled());
        let state = transition(state, WizardEvent::Reset).state;
        let t = transition(
            state,
            WizardEvent::Resolved {
                token: stale,
                outcome: Ok(sample_result(90.0)),
            },
        );
        assert_eq!(t.effect, Effect::Discarded(stale));
        assert!(t.state.is_cleared());
    }

    #[test]
    fn test_advance_requires_results() {
        let t = transition(filled(), WizardEvent::Advance);
        assert!(matches!(
            t.effect,
            Effect::Rejected(AnalysisError::InvalidTransition { .. })
        ));
        assert_eq!(t.state.step, WizardState::Input);
    }

    #[test]
    fn test_advance_from_results_to_improvements() {
        let (state, token) = submit(filled());
        let state = transition(
            state,
            WizardEvent::Resolved {
                token,
                outcome: Ok(sample_result(78.5)),
            },
        )
        .state;
        let t = transition(state, WizardEvent::Advance);
        assert_eq!(t.effect, Effect::Applied);
        assert_eq!(t.state.step, WizardState::Improvements);
        assert_eq!(t.state.progress_step(), 3);
    }

    #[test]
    fn test_inputs_locked_outside_input_step() {
        let (state, _) = submit(filled());
        let t = transition(state, WizardEvent::SetJobDescription("new".to_string()));
        assert!(matches!(
            t.effect,
            Effect::Rejected(AnalysisError::InvalidTransition { .. })
        ));
        assert_eq!(
            t.state.inputs.job_description().unwrap().text,
            "Docker, Kubernetes"
        );
    }

    #[test]
    fn test_bad_upload_rejected_at_input() {
        let t = transition(
            WorkflowState::default(),
            WizardEvent::SetResumeFile {
                file_name: "cv.png".to_string(),
                bytes: vec![1, 2, 3],
            },
        );
        assert!(matches!(
            t.effect,
            Effect::Rejected(AnalysisError::Validation(
                ValidationError::UnsupportedFileType(_)
            ))
        ));
        assert_eq!(t.state.step, WizardState::Input);
    }

    #[test]
    fn test_binary_resume_in_json_mode_rejected_before_token() {
        let mut state = WorkflowState::default();
        state
            .inputs
            .set_resume_file("cv.pdf", vec![0x25, 0x50, 0xff, 0xfe])
            .unwrap();
        state.inputs.set_job_description("Docker");

        let t = transition(state, WizardEvent::Submit);
        assert_eq!(
            t.effect,
            Effect::Rejected(AnalysisError::Validation(
                ValidationError::UnsupportedFileType(".pdf".to_string())
            ))
        );
        assert_eq!(t.state.step, WizardState::Input);
        assert_eq!(t.state.ledger.issued_count(), 0);

        let t = transition(t.state, WizardEvent::SetMode(ScoringMode::Multipart));
        let (state, _) = submit(t.state);
        assert_eq!(state.step, WizardState::Scoring);
    }

    #[test]
    fn test_mode_locked_outside_input_step() {
        let (state, _) = submit(filled());
        let t = transition(state, WizardEvent::SetMode(ScoringMode::Multipart));
        assert!(matches!(
            t.effect,
            Effect::Rejected(AnalysisError::InvalidTransition { .. })
        ));
        assert_eq!(t.state.mode, ScoringMode::Json);
    }
}
