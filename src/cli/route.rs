//! CLI route: single route table and run context. Dispatches to the wizard and presentation.

use crate::catalogue::TopicCatalogue;
use crate::cli::interactive;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_paper_config_json, format_templates_json, format_templates_text, format_topics_json,
    format_topics_text,
};
use crate::config::{ConfigLoader, PapersmithConfig};
use crate::error::WizardError;
use crate::generation::{GenerationOutcome, HttpPaperGenerator};
use crate::selection::search;
use crate::template::TemplateLibrary;
use crate::wizard::{Wizard, WizardScript, WizardStep};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Runtime context for CLI execution: loaded configuration plus shared reference data.
pub struct RunContext {
    workspace_root: PathBuf,
    config: PapersmithConfig,
    catalogue: Arc<TopicCatalogue>,
    templates: Arc<TemplateLibrary>,
}

impl RunContext {
    /// Create run context from workspace root and optional config path. Uses ConfigLoader only.
    pub fn new(workspace_root: PathBuf, config_path: Option<PathBuf>) -> Result<Self, WizardError> {
        let config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        Self::from_config(workspace_root, config)
    }

    /// Build a context around an already-loaded configuration
    pub fn from_config(
        workspace_root: PathBuf,
        config: PapersmithConfig,
    ) -> Result<Self, WizardError> {
        let catalogue = Arc::new(config.load_catalogue()?);
        let templates = Arc::new(config.load_templates()?);
        debug!(
            topics = catalogue.len(),
            templates = templates.templates().len(),
            "Loaded reference data"
        );
        Ok(Self {
            workspace_root,
            config,
            catalogue,
            templates,
        })
    }

    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    pub fn config(&self) -> &PapersmithConfig {
        &self.config
    }

    /// Fresh wizard over this context's reference data
    pub fn new_wizard(&self) -> Wizard {
        Wizard::with_defaults(
            Arc::clone(&self.catalogue),
            Arc::clone(&self.templates),
            self.config.exam.clone(),
            &self.config.defaults,
        )
    }

    pub fn execute(&self, command: &Commands) -> Result<String, WizardError> {
        match command {
            Commands::Topics { search: query, format } => {
                let views = search(&self.catalogue, query.as_deref().unwrap_or(""));
                match format.as_str() {
                    "json" => format_topics_json(&views),
                    _ => Ok(format_topics_text(&views)),
                }
            }
            Commands::Templates { format } => match format.as_str() {
                "json" => format_templates_json(&self.templates),
                _ => Ok(format_templates_text(&self.templates)),
            },
            Commands::Build { script, output } => self.handle_build(script, output.as_deref()),
            Commands::Generate { script } => self.handle_generate(script),
            Commands::Wizard => interactive::run(self),
            Commands::Validate => self.handle_validate(),
        }
    }

    /// Replay a script and advance to the preview step
    pub fn replay(&self, script_path: &Path) -> Result<Wizard, WizardError> {
        let script = WizardScript::load(script_path)?;
        info!(
            script = %script_path.display(),
            actions = script.actions.len(),
            "Replaying wizard script"
        );
        let mut wizard = self.new_wizard();
        wizard.run_script(script)?;
        advance_to_preview(&mut wizard)?;
        Ok(wizard)
    }

    fn handle_build(&self, script: &Path, output: Option<&Path>) -> Result<String, WizardError> {
        let wizard = self.replay(script)?;
        let json = format_paper_config_json(&wizard.assemble())?;
        match output {
            Some(path) => {
                std::fs::write(path, &json)?;
                Ok(format!("Paper configuration written to {}", path.display()))
            }
            None => Ok(json),
        }
    }

    fn handle_generate(&self, script: &Path) -> Result<String, WizardError> {
        let generator = HttpPaperGenerator::new(&self.config.generator)?;
        let mut wizard = self.replay(script)?;

        let rt = tokio::runtime::Runtime::new().map_err(|e| {
            WizardError::ConfigError(format!("Failed to create tokio runtime: {}", e))
        })?;
        match rt.block_on(wizard.generate(&generator))? {
            GenerationOutcome::Generated(paper_id) => Ok(format!("Paper generated: {}", paper_id)),
            GenerationOutcome::Failed(message) => Err(WizardError::GenerationFailed(message)),
            GenerationOutcome::AlreadyInFlight => {
                Ok("A generation request is already in flight".to_string())
            }
        }
    }

    fn handle_validate(&self) -> Result<String, WizardError> {
        match self.config.validate() {
            Ok(()) => Ok(format!(
                "Configuration is valid ({} topics, {} templates)",
                self.catalogue.len(),
                self.templates.templates().len()
            )),
            Err(errors) => {
                let lines: Vec<String> = errors.iter().map(|e| format!("  - {}", e)).collect();
                Err(WizardError::ConfigError(format!(
                    "Configuration has {} problem(s):\n{}",
                    errors.len(),
                    lines.join("\n")
                )))
            }
        }
    }
}

/// Step forward until the preview step, stopping at the first closed gate
pub fn advance_to_preview(wizard: &mut Wizard) -> Result<(), WizardError> {
    while wizard.step() != WizardStep::Preview {
        wizard.next()?;
    }
    Ok(())
}
