//! Error types for the Papersmith paper configuration wizard.

use crate::types::{SectionId, TopicId};
use crate::wizard::WizardStep;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading reference data (topics, templates, scripts)
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("Failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unsupported file extension for {0:?} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    #[error("Duplicate topic id: {0}")]
    DuplicateTopic(TopicId),

    #[error("Duplicate subtopic '{subtopic}' in topic {topic_id}")]
    DuplicateSubtopic { topic_id: TopicId, subtopic: String },

    #[error("Duplicate template id: {0}")]
    DuplicateTemplate(String),
}

/// Wizard-level errors
#[derive(Debug, Error)]
pub enum WizardError {
    #[error("Unknown topic: {0}")]
    UnknownTopic(TopicId),

    #[error("Subtopic '{subtopic}' does not belong to topic {topic_id}")]
    UnknownSubtopic { topic_id: TopicId, subtopic: String },

    #[error("Unknown section: {0}")]
    UnknownSection(SectionId),

    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    #[error("Starter layouts are only available while the section list is empty")]
    SectionsNotEmpty,

    #[error("Cannot move from {from:?} to {to:?}")]
    StepLocked { from: WizardStep, to: WizardStep },

    #[error("Paper cannot be generated yet: {0:?} step is incomplete")]
    NotReadyToGenerate(WizardStep),

    #[error("Scripted action #{index} failed: {source}")]
    ScriptAction {
        index: usize,
        #[source]
        source: Box<WizardError>,
    },

    #[error("Catalogue error: {0}")]
    Catalogue(#[from] CatalogueError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<config::ConfigError> for WizardError {
    fn from(err: config::ConfigError) -> Self {
        WizardError::ConfigError(err.to_string())
    }
}
