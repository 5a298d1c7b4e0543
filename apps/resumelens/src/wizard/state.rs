use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::ScoringMode;
use crate::errors::AnalysisError;
use crate::input::InputStore;
use crate::models::AnalysisResult;

/// The four wizard steps. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardState {
    #[default]
    Input,
    Scoring,
    Results,
    Improvements,
}

impl WizardState {
    /// Progress indicator step: Input and Scoring share step 1.
    pub fn progress_step(&self) -> u8 {
        match self {
            WizardState::Input | WizardState::Scoring => 1,
            WizardState::Results => 2,
            WizardState::Improvements => 3,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            WizardState::Input => "Input",
            WizardState::Scoring => "Scoring",
            WizardState::Results => "Results",
            WizardState::Improvements => "Improvements",
        }
    }
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Identifies one outbound analysis. Tokens are never reused within a
/// workflow, so a response can always be matched to the request that caused it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn sequence(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues request tokens and remembers which one, if any, is still awaited.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestLedger {
    issued: u64,
    live: Option<RequestToken>,
}

impl RequestLedger {
    pub fn issue(&mut self) -> RequestToken {
        self.issued += 1;
        let token = RequestToken(self.issued);
        self.live = Some(token);
        token
    }

    pub fn live(&self) -> Option<RequestToken> {
        self.live
    }

    pub fn is_live(&self, token: RequestToken) -> bool {
        self.live == Some(token)
    }

    /// Marks `token` as answered. Returns false for stale or unknown tokens.
    pub fn settle(&mut self, token: RequestToken) -> bool {
        if self.is_live(token) {
            self.live = None;
            true
        } else {
            false
        }
    }

    /// Drops interest in the live request. The counter keeps advancing so the
    /// superseded token can never match again.
    pub fn supersede(&mut self) -> Option<RequestToken> {
        self.live.take()
    }

    pub fn issued_count(&self) -> u64 {
        self.issued
    }
}

/// A result the workflow accepted, tagged with the request that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedResult {
    pub token: RequestToken,
    pub result: AnalysisResult,
    pub accepted_at: DateTime<Utc>,
}

/// The complete state of one analysis workflow, as a plain value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkflowState {
    pub step: WizardState,
    /// Wire shape submissions will use; decides whether a binary resume is sendable.
    pub mode: ScoringMode,
    pub inputs: InputStore,
    pub result: Option<AcceptedResult>,
    /// Last failure reported to the user; cleared by the next submit or reset.
    pub last_error: Option<AnalysisError>,
    pub ledger: RequestLedger,
}

impl WorkflowState {
    pub fn progress_step(&self) -> u8 {
        self.step.progress_step()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.result.as_ref().map(|accepted| &accepted.result)
    }

    /// True when the analyze trigger should be enabled.
    pub fn can_submit(&self) -> bool {
        self.step == WizardState::Input && self.inputs.is_submittable_for(self.mode)
    }

    /// `{Input, no resume, no job description, no result}`.
    pub fn is_cleared(&self) -> bool {
        self.step == WizardState::Input && self.inputs.is_empty() && self.result.is_none()
    }
}
