//! Topic Catalogue
//!
//! Read-only curriculum reference data: topics and their ordered subtopics, plus the
//! display-only exam identifiers used when synthesizing paper names. Nothing in the wizard
//! mutates the catalogue; it is loaded once and shared.

use crate::error::CatalogueError;
use crate::types::TopicId;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

const BUILTIN_TOPICS: &str = include_str!("../data/topics.toml");

/// A curriculum topic with its ordered subtopics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub id: TopicId,
    pub name: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub subtopics: Vec<String>,
}

impl Topic {
    pub fn has_subtopic(&self, name: &str) -> bool {
        self.subtopics.iter().any(|s| s == name)
    }

    pub fn subtopic_count(&self) -> usize {
        self.subtopics.len()
    }
}

/// Ordered topic catalogue
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicCatalogue {
    #[serde(default)]
    topics: Vec<Topic>,
}

impl TopicCatalogue {
    /// Build a catalogue, rejecting duplicate topic ids and duplicate subtopics
    pub fn new(topics: Vec<Topic>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for topic in &topics {
            if !seen.insert(topic.id.as_str()) {
                return Err(CatalogueError::DuplicateTopic(topic.id.clone()));
            }
            let mut names = HashSet::new();
            for sub in &topic.subtopics {
                if !names.insert(sub.as_str()) {
                    return Err(CatalogueError::DuplicateSubtopic {
                        topic_id: topic.id.clone(),
                        subtopic: sub.clone(),
                    });
                }
            }
        }
        Ok(Self { topics })
    }

    /// Sample catalogue shipped with the crate
    pub fn builtin() -> Result<Self, CatalogueError> {
        let parsed: TopicCatalogue =
            toml::from_str(BUILTIN_TOPICS).map_err(|e| CatalogueError::Parse {
                path: "data/topics.toml".into(),
                message: e.to_string(),
            })?;
        Self::new(parsed.topics)
    }

    /// Load from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let parsed: TopicCatalogue = load_document(path)?;
        Self::new(parsed.topics)
    }

    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    pub fn get(&self, topic_id: &str) -> Option<&Topic> {
        self.topics.iter().find(|t| t.id == topic_id)
    }

    pub fn contains_subtopic(&self, topic_id: &str, subtopic: &str) -> bool {
        self.get(topic_id)
            .map(|t| t.has_subtopic(subtopic))
            .unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.topics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }
}

/// Display-only exam identifiers. Never validated against the catalogue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamContext {
    #[serde(default = "default_board")]
    pub board: String,
    #[serde(default = "default_qualification")]
    pub qualification: String,
    #[serde(default = "default_subject")]
    pub subject: String,
}

fn default_board() -> String {
    "AQA".to_string()
}

fn default_qualification() -> String {
    "GCSE".to_string()
}

fn default_subject() -> String {
    "Mathematics".to_string()
}

impl Default for ExamContext {
    fn default() -> Self {
        Self {
            board: default_board(),
            qualification: default_qualification(),
            subject: default_subject(),
        }
    }
}

/// Deserialize a TOML or JSON document, picking the format from the file extension.
pub(crate) fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T, CatalogueError> {
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogueError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parse_err = |message: String| CatalogueError::Parse {
        path: path.to_path_buf(),
        message,
    };
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => toml::from_str(&raw).map_err(|e| parse_err(e.to_string())),
        Some("json") => serde_json::from_str(&raw).map_err(|e| parse_err(e.to_string())),
        _ => Err(CatalogueError::UnsupportedFormat(path.to_path_buf())),
    }
}
