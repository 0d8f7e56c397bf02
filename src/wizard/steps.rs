//! Step sequence and forward gates.

use crate::wizard::WizardState;
use serde::{Deserialize, Serialize};

/// Fixed wizard step sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Template,
    Topics,
    Config,
    Settings,
    Preview,
}

impl WizardStep {
    pub const ALL: [WizardStep; 5] = [
        WizardStep::Template,
        WizardStep::Topics,
        WizardStep::Config,
        WizardStep::Settings,
        WizardStep::Preview,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }

    pub fn prev(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::from_index)
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::Template => "Choose a template",
            WizardStep::Topics => "Select topics",
            WizardStep::Config => "Configure sections",
            WizardStep::Settings => "Paper settings",
            WizardStep::Preview => "Preview and generate",
        }
    }
}

/// Whether the user may leave `step` forwards. Recomputed from state on every call.
pub fn can_proceed(step: WizardStep, state: &WizardState) -> bool {
    match step {
        WizardStep::Template => true,
        WizardStep::Topics => !state.selection.is_empty(),
        WizardStep::Config => !state.sections.is_empty() && state.total_marks > 0,
        WizardStep::Settings | WizardStep::Preview => true,
    }
}

/// First step in `from..to` whose gate is closed, if any
pub fn first_blocked(from: WizardStep, to: WizardStep, state: &WizardState) -> Option<WizardStep> {
    WizardStep::ALL[from.index()..to.index()]
        .iter()
        .copied()
        .find(|step| !can_proceed(*step, state))
}
