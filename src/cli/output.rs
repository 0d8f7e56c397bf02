//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::WizardError;

/// Map domain errors to a string for CLI output.
pub fn map_error(e: &WizardError) -> String {
    match e {
        WizardError::ScriptAction { index, source } => {
            format!("Script failed at action #{}: {}", index + 1, source)
        }
        other => other.to_string(),
    }
}
