//! Topic Selection
//!
//! Topic → subtopic selection with derived tri-state summaries. The stored map only ever
//! holds topics with a non-empty selection, so "selected topics" is always exactly its key
//! set. Display filtering lives in [`search`]; per-topic weighting in [`weights`].

pub mod search;
pub mod weights;

pub use search::{search, TopicView};
pub use weights::{TopicWeights, DEFAULT_WEIGHT, MAX_WEIGHT, MIN_WEIGHT, WEIGHT_STEP};

use crate::catalogue::{Topic, TopicCatalogue};
use crate::error::WizardError;
use crate::types::TopicId;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Summary of a topic's selection relative to its full subtopic list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriState {
    None,
    Partial,
    All,
}

impl TriState {
    /// The one place tri-state is derived.
    pub fn from_counts(selected: usize, total: usize) -> Self {
        if selected == 0 {
            TriState::None
        } else if selected == total {
            TriState::All
        } else {
            TriState::Partial
        }
    }
}

/// Selection state: topic id → chosen subtopic names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionModel {
    selected: BTreeMap<TopicId, BTreeSet<String>>,
}

impl SelectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip membership of a single subtopic
    pub fn toggle_subtopic(
        &mut self,
        catalogue: &TopicCatalogue,
        topic_id: &str,
        subtopic: &str,
    ) -> Result<(), WizardError> {
        let topic = catalogue
            .get(topic_id)
            .ok_or_else(|| WizardError::UnknownTopic(topic_id.to_string()))?;
        if !topic.has_subtopic(subtopic) {
            return Err(WizardError::UnknownSubtopic {
                topic_id: topic_id.to_string(),
                subtopic: subtopic.to_string(),
            });
        }

        let set = self.selected.entry(topic.id.clone()).or_default();
        if !set.remove(subtopic) {
            set.insert(subtopic.to_string());
        }
        if set.is_empty() {
            self.selected.remove(topic_id);
        }
        debug!(topic_id, subtopic, "Toggled subtopic");
        Ok(())
    }

    /// A fully-selected topic is cleared; anything else (none or partial) becomes fully selected.
    pub fn toggle_all_for_topic(&mut self, topic: &Topic) -> TriState {
        let next = match self.tri_state(topic) {
            TriState::All => {
                self.selected.remove(&topic.id);
                TriState::None
            }
            TriState::None | TriState::Partial => {
                self.select_topic(topic);
                self.tri_state(topic)
            }
        };
        debug!(topic_id = %topic.id, state = ?next, "Toggled whole topic");
        next
    }

    /// Fully select every topic in the catalogue
    pub fn select_all(&mut self, catalogue: &TopicCatalogue) {
        for topic in catalogue.topics() {
            self.select_topic(topic);
        }
        debug!(topics = self.selected.len(), "Selected all topics");
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
        debug!("Cleared all topic selections");
    }

    /// Overwrite the selection with exactly these topics, fully selected
    pub fn replace_with_full_topics<'a>(&mut self, topics: impl IntoIterator<Item = &'a Topic>) {
        self.selected.clear();
        for topic in topics {
            self.select_topic(topic);
        }
    }

    pub fn tri_state(&self, topic: &Topic) -> TriState {
        TriState::from_counts(self.selected_count(&topic.id), topic.subtopic_count())
    }

    pub fn selected_count(&self, topic_id: &str) -> usize {
        self.selected.get(topic_id).map(BTreeSet::len).unwrap_or(0)
    }

    pub fn is_selected(&self, topic_id: &str, subtopic: &str) -> bool {
        self.selected
            .get(topic_id)
            .map(|s| s.contains(subtopic))
            .unwrap_or(false)
    }

    pub fn total_selected(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// True when no subtopic anywhere is selected
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Topic ids with a non-empty selection
    pub fn selected_topics(&self) -> Vec<TopicId> {
        self.selected.keys().cloned().collect()
    }

    pub fn subtopics_for(&self, topic_id: &str) -> Option<&BTreeSet<String>> {
        self.selected.get(topic_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&TopicId, &BTreeSet<String>)> {
        self.selected.iter()
    }

    fn select_topic(&mut self, topic: &Topic) {
        if topic.subtopics.is_empty() {
            return;
        }
        self.selected
            .insert(topic.id.clone(), topic.subtopics.iter().cloned().collect());
    }
}
