// Wizard: Input → Scoring → Results → Improvements, with reset back to Input.
// State is an explicit `WorkflowState` value; `transitions::transition` is the
// only code that changes it and `WizardController` the only owner.

pub mod controller;
pub mod reset;
pub mod state;
pub mod transitions;

pub use controller::{Completion, WizardController};
pub use reset::ResetCoordinator;
pub use state::{AcceptedResult, RequestToken, WizardState, WorkflowState};
pub use transitions::{transition, Effect, PendingAnalysis, WizardEvent};
