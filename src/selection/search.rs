//! Display filtering for the topic list. Never touches selection state.

use crate::catalogue::{Topic, TopicCatalogue};

/// A topic as it should be displayed for the current search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicView<'a> {
    pub topic: &'a Topic,
    /// Subtopics to show: the full list on a topic-name match, else only matching ones
    pub subtopics: Vec<&'a str>,
}

impl TopicView<'_> {
    pub fn is_narrowed(&self) -> bool {
        self.subtopics.len() < self.topic.subtopics.len()
    }
}

/// Filter the catalogue for display.
///
/// Case-insensitive substring match on the trimmed query. A topic whose own name matches
/// keeps its full subtopic list; otherwise it is shown only if some subtopic matches, and
/// then with just those subtopics.
pub fn search<'a>(catalogue: &'a TopicCatalogue, query: &str) -> Vec<TopicView<'a>> {
    let needle = query.trim().to_lowercase();

    catalogue
        .topics()
        .iter()
        .filter_map(|topic| {
            if needle.is_empty() || topic.name.to_lowercase().contains(&needle) {
                return Some(TopicView {
                    topic,
                    subtopics: topic.subtopics.iter().map(String::as_str).collect(),
                });
            }
            let matching: Vec<&str> = topic
                .subtopics
                .iter()
                .filter(|s| s.to_lowercase().contains(&needle))
                .map(String::as_str)
                .collect();
            if matching.is_empty() {
                None
            } else {
                Some(TopicView {
                    topic,
                    subtopics: matching,
                })
            }
        })
        .collect()
}
