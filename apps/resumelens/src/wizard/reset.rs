use tracing::debug;

use crate::wizard::state::{WizardState, WorkflowState};

/// Returns a workflow to its initial values from any state.
pub struct ResetCoordinator;

impl ResetCoordinator {
    /// Clears both inputs, discards the stored result and any reported error,
    /// and forces the wizard back to `Input`.
    ///
    /// An in-flight request is superseded, so its response is ignored whenever
    /// it arrives. Idempotent.
    pub fn reset(state: &mut WorkflowState) {
        if let Some(token) = state.ledger.supersede() {
            debug!("Reset superseded in-flight request {token}");
        }
        state.inputs.clear();
        state.result = None;
        state.last_error = None;
        state.step = WizardState::Input;
    }
}
