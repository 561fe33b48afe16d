use serde::Serialize;

/// Inputs that decide which actions are currently allowed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GateInputs {
    pub busy: bool,
    pub base_present: bool,
    pub has_restore_plan: bool,
    pub has_advanced_plan: bool,
}

/// Enablement of user-facing actions, recomputed from [`GateInputs`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionGate {
    /// Plain actions with no precondition
    pub general: bool,
    /// Actions that need the base manager
    pub base_actions: bool,
    /// Provisioning the base manager, only offered while it is absent
    pub provision: bool,
    pub run_restore: bool,
    pub run_advanced: bool,
}

impl ActionGate {
    pub fn compute(inputs: GateInputs) -> Self {
        let free = !inputs.busy;
        Self {
            general: free,
            base_actions: free && inputs.base_present,
            provision: free && !inputs.base_present,
            run_restore: free && inputs.has_restore_plan,
            run_advanced: free && inputs.has_advanced_plan,
        }
    }
}
