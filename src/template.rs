//! Paper Templates
//!
//! Canned starting configurations and the applier that seeds wizard state from them in one
//! step. Built-in presets ship in `data/templates.toml`; more can be loaded from disk.

use crate::catalogue::{load_document, ExamContext, TopicCatalogue};
use crate::error::CatalogueError;
use crate::sections::QuestionType;
use crate::types::TopicId;
use crate::wizard::WizardState;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::path::Path;
use tracing::{debug, warn};

const BUILTIN_TEMPLATES: &str = include_str!("../data/templates.toml");

/// Section layout carried by a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBlueprint {
    /// Ignored when applied; sections always get fresh ids
    #[serde(default)]
    pub id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub instructions: String,
    #[serde(default)]
    pub question_types: BTreeSet<QuestionType>,
    #[serde(default)]
    pub target_marks: u32,
}

/// Named preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub total_marks: u32,
    /// Time limit in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub calculator: bool,
    #[serde(default)]
    pub formula_sheet: bool,
    #[serde(default)]
    pub sections: Vec<SectionBlueprint>,
    /// When present, selection is overwritten with exactly these topics
    #[serde(default)]
    pub topic_ids: Option<Vec<TopicId>>,
}

/// Ordered template collection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateLibrary {
    #[serde(default)]
    templates: Vec<Template>,
}

impl TemplateLibrary {
    pub fn new(templates: Vec<Template>) -> Result<Self, CatalogueError> {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                return Err(CatalogueError::DuplicateTemplate(template.id.clone()));
            }
        }
        Ok(Self { templates })
    }

    pub fn builtin() -> Result<Self, CatalogueError> {
        let parsed: TemplateLibrary =
            toml::from_str(BUILTIN_TEMPLATES).map_err(|e| CatalogueError::Parse {
                path: "data/templates.toml".into(),
                message: e.to_string(),
            })?;
        Self::new(parsed.templates)
    }

    pub fn load(path: &Path) -> Result<Self, CatalogueError> {
        let parsed: TemplateLibrary = load_document(path)?;
        Self::new(parsed.templates)
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Display name for a templated paper
pub fn template_paper_name(exam: &ExamContext, template: &Template) -> String {
    format!("{} {} {}", exam.board, exam.qualification, template.name)
}

/// Display name for a paper built from scratch
pub fn custom_paper_name(exam: &ExamContext) -> String {
    format!("{} {} Custom Paper", exam.board, exam.qualification)
}

/// Seed scalars, sections and (optionally) selection from a template.
///
/// Selection is overwritten, never merged, when the template lists topic ids; ids the
/// catalogue does not know are skipped. Topic weights are left alone.
pub fn apply_template(
    state: &mut WizardState,
    catalogue: &TopicCatalogue,
    exam: &ExamContext,
    template: &Template,
) {
    state.total_marks = template.total_marks;
    state.time_limit = template.duration;
    state.settings.calculator_allowed = template.calculator;
    state.settings.include_formula_sheet = template.formula_sheet;

    state.sections.replace_from_blueprints(&template.sections);

    if let Some(topic_ids) = &template.topic_ids {
        let topics: Vec<_> = topic_ids
            .iter()
            .filter_map(|id| {
                let topic = catalogue.get(id);
                if topic.is_none() {
                    warn!(template_id = %template.id, topic_id = %id, "Template references unknown topic; skipping");
                }
                topic
            })
            .collect();
        state.selection.replace_with_full_topics(topics);
    }

    state.paper_name = template_paper_name(exam, template);
    state.template_id = Some(template.id.clone());
    debug!(
        template_id = %template.id,
        sections = template.sections.len(),
        "Applied template"
    );
}

/// Start from scratch: only the display name changes.
pub fn apply_custom(state: &mut WizardState, exam: &ExamContext) {
    state.paper_name = custom_paper_name(exam);
    state.template_id = None;
    debug!("Selected custom paper");
}
