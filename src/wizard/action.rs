//! Discrete user interactions and scripted sessions.

use crate::catalogue::load_document;
use crate::error::CatalogueError;
use crate::sections::{QuestionType, SectionPatch, StarterLayout};
use crate::settings::{DifficultyDistribution, QuestionTypeDistribution, SettingToggle};
use crate::types::{SectionId, TopicId};
use crate::wizard::WizardStep;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One user interaction. Each is applied completely before the next.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum WizardAction {
    /// `None` starts a custom paper
    ChooseTemplate {
        #[serde(default)]
        template_id: Option<String>,
    },
    ToggleSubtopic {
        topic_id: TopicId,
        subtopic: String,
    },
    ToggleTopic {
        topic_id: TopicId,
    },
    SelectAllTopics,
    DeselectAllTopics,
    SetTopicWeight {
        topic_id: TopicId,
        weight: f64,
    },
    SetTotalMarks {
        marks: u32,
    },
    SetTimeLimit {
        #[serde(default)]
        minutes: Option<u32>,
    },
    AddSection,
    RemoveSection {
        section_id: SectionId,
    },
    UpdateSection {
        section_id: SectionId,
        #[serde(flatten)]
        patch: SectionPatch,
    },
    FocusSection {
        section_id: SectionId,
    },
    MoveSection {
        section_id: SectionId,
        to_index: usize,
    },
    DragOver {
        active_id: SectionId,
        over_id: SectionId,
    },
    AutoDistributeMarks,
    ToggleQuestionType {
        section_id: SectionId,
        question_type: QuestionType,
    },
    ApplyStarterLayout {
        layout: StarterLayout,
    },
    SetDifficulty(DifficultyDistribution),
    SetQuestionTypeMix(QuestionTypeDistribution),
    SetSetting {
        setting: SettingToggle,
        enabled: bool,
    },
    Next,
    Back,
    GoToStep {
        step: WizardStep,
    },
}

/// Recorded list of actions replayed against a fresh wizard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardScript {
    #[serde(default)]
    pub actions: Vec<WizardAction>,
}

impl WizardScript {
    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        load_document(path)
    }
}
