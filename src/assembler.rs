//! Configuration Assembler
//!
//! Pure merge of wizard state into the immutable record handed to the paper generation
//! service. No validation happens here: callers only assemble once every step gate has
//! passed.

use crate::sections::Section;
use crate::settings::{DifficultyDistribution, PaperSettings, QuestionTypeDistribution};
use crate::types::TopicId;
use crate::wizard::WizardState;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Finished paper configuration, serialized camelCase for the downstream service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperConfig {
    pub title: String,
    pub total_marks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_limit: Option<u32>,
    pub sections: Vec<Section>,
    pub selected_topics: Vec<TopicId>,
    pub selected_subtopics: BTreeMap<TopicId, Vec<String>>,
    /// Absent means "uniform weighting"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub topic_weights: Option<BTreeMap<TopicId, f64>>,
    pub difficulty_distribution: DifficultyDistribution,
    pub question_type_distribution: QuestionTypeDistribution,
    pub settings: PaperSettings,
}

/// Snapshot `state` into a [`PaperConfig`]
pub fn assemble(state: &WizardState) -> PaperConfig {
    let selected_subtopics: BTreeMap<TopicId, Vec<String>> = state
        .selection
        .iter()
        .filter(|(_, subs)| !subs.is_empty())
        .map(|(id, subs)| (id.clone(), subs.iter().cloned().collect()))
        .collect();
    let selected_topics = selected_subtopics.keys().cloned().collect();

    let topic_weights = state
        .weights
        .is_touched()
        .then(|| state.weights.explicit().clone());

    PaperConfig {
        title: state.paper_name.clone(),
        total_marks: state.total_marks,
        time_limit: state.time_limit,
        sections: state.sections.sections().to_vec(),
        selected_topics,
        selected_subtopics,
        topic_weights,
        difficulty_distribution: state.difficulty,
        question_type_distribution: state.question_types,
        settings: state.settings,
    }
}
