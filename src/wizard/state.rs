//! Mutable model state owned by one wizard instance.

use crate::sections::SectionModel;
use crate::selection::{SelectionModel, TopicWeights};
use crate::settings::{DifficultyDistribution, PaperSettings, QuestionTypeDistribution};
use serde::{Deserialize, Serialize};

/// Starting values for a new wizard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WizardDefaults {
    #[serde(default = "default_total_marks")]
    pub total_marks: u32,
    /// Minutes; `None` means untimed
    #[serde(default = "default_time_limit")]
    pub time_limit: Option<u32>,
}

fn default_total_marks() -> u32 {
    100
}

fn default_time_limit() -> Option<u32> {
    Some(90)
}

impl Default for WizardDefaults {
    fn default() -> Self {
        Self {
            total_marks: default_total_marks(),
            time_limit: default_time_limit(),
        }
    }
}

/// Everything the user configures. Persists across step navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WizardState {
    pub paper_name: String,
    pub template_id: Option<String>,
    pub total_marks: u32,
    pub time_limit: Option<u32>,
    pub sections: SectionModel,
    pub selection: SelectionModel,
    pub weights: TopicWeights,
    pub difficulty: DifficultyDistribution,
    pub question_types: QuestionTypeDistribution,
    pub settings: PaperSettings,
}

impl WizardState {
    pub fn with_defaults(defaults: &WizardDefaults) -> Self {
        Self {
            paper_name: String::new(),
            template_id: None,
            total_marks: defaults.total_marks,
            time_limit: defaults.time_limit,
            sections: SectionModel::new(),
            selection: SelectionModel::new(),
            weights: TopicWeights::new(),
            difficulty: DifficultyDistribution::default(),
            question_types: QuestionTypeDistribution::default(),
            settings: PaperSettings::default(),
        }
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::with_defaults(&WizardDefaults::default())
    }
}
