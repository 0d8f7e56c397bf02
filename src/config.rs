//! Configuration System
//!
//! Layered configuration for the wizard front end: reference data locations, exam identity
//! used for paper names, starting values, the generation service endpoint, and logging.
//! Layers (lowest to highest): built-in defaults, global file, workspace files,
//! `PAPERSMITH__*` environment variables.

use crate::catalogue::{ExamContext, TopicCatalogue};
use crate::error::WizardError;
use crate::generation::GeneratorConfig;
use crate::logging::LoggingConfig;
use crate::template::TemplateLibrary;
use crate::wizard::WizardDefaults;
use config::{Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

mod merge;
mod sources;

pub use sources::global_file::global_config_path;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PapersmithConfig {
    /// Topic catalogue file (.toml or .json); built-in sample when unset
    #[serde(default)]
    pub catalogue_path: Option<PathBuf>,

    /// Template library file (.toml or .json); built-in presets when unset
    #[serde(default)]
    pub templates_path: Option<PathBuf>,

    /// Exam identifiers used for paper names
    #[serde(default)]
    pub exam: ExamContext,

    /// Starting values for new wizards
    #[serde(default)]
    pub defaults: WizardDefaults,

    /// Paper generation service
    #[serde(default)]
    pub generator: GeneratorConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Configuration validation errors
#[derive(Debug, Clone)]
pub enum ValidationError {
    Generator(String),
    Defaults(String),
    Path(String),
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::Generator(msg) => write!(f, "Generator: {}", msg),
            ValidationError::Defaults(msg) => write!(f, "Defaults: {}", msg),
            ValidationError::Path(msg) => write!(f, "Path: {}", msg),
        }
    }
}

impl std::error::Error for ValidationError {}

impl PapersmithConfig {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(e) = self.generator.validate() {
            errors.push(ValidationError::Generator(e));
        }

        if self.defaults.total_marks == 0 {
            errors.push(ValidationError::Defaults(
                "total_marks must be greater than zero".to_string(),
            ));
        }
        if self.defaults.time_limit == Some(0) {
            errors.push(ValidationError::Defaults(
                "time_limit must be greater than zero (omit it for untimed papers)".to_string(),
            ));
        }

        for (label, path) in [
            ("catalogue_path", &self.catalogue_path),
            ("templates_path", &self.templates_path),
        ] {
            if let Some(path) = path {
                if !path.exists() {
                    errors.push(ValidationError::Path(format!(
                        "{} does not exist: {}",
                        label,
                        path.display()
                    )));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load the topic catalogue this configuration points at
    pub fn load_catalogue(&self) -> Result<TopicCatalogue, WizardError> {
        Ok(match &self.catalogue_path {
            Some(path) => TopicCatalogue::load(path)?,
            None => TopicCatalogue::builtin()?,
        })
    }

    /// Load the template library this configuration points at
    pub fn load_templates(&self) -> Result<TemplateLibrary, WizardError> {
        Ok(match &self.templates_path {
            Some(path) => TemplateLibrary::load(path)?,
            None => TemplateLibrary::builtin()?,
        })
    }

    /// Make relative reference-data paths relative to `base`
    fn resolve_paths(mut self, base: &Path) -> Self {
        for path in [&mut self.catalogue_path, &mut self.templates_path]
            .into_iter()
            .flatten()
        {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
        self
    }
}

/// Loads [`PapersmithConfig`] from the configured layers
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration for a workspace.
    pub fn load(workspace_root: &Path) -> Result<PapersmithConfig, WizardError> {
        let builder = merge::merge_policy::builder_with_defaults()?;
        let builder = sources::global_file::add_to_builder(builder)?;
        let builder = sources::workspace_file::add_to_builder(builder, workspace_root)?;
        let config: PapersmithConfig = builder
            .add_source(Environment::with_prefix("PAPERSMITH").separator("__"))
            .build()?
            .try_deserialize()?;
        Ok(config.resolve_paths(workspace_root))
    }

    /// Load configuration from one explicit file (plus defaults), ignoring other layers.
    pub fn load_from_file(path: &Path) -> Result<PapersmithConfig, WizardError> {
        let config: PapersmithConfig = merge::merge_policy::builder_with_defaults()?
            .add_source(File::from(path).required(true))
            .build()?
            .try_deserialize()?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Ok(config.resolve_paths(base))
    }
}
