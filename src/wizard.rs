//! Paper Configuration Wizard
//!
//! Owns one instance's state and gates navigation across the fixed step sequence. Every
//! public mutation corresponds to one discrete user interaction; [`Wizard::dispatch`] is the
//! single entry point for replaying them from a script.

pub mod action;
pub mod state;
pub mod steps;

pub use action::{WizardAction, WizardScript};
pub use state::{WizardDefaults, WizardState};
pub use steps::{can_proceed, first_blocked, WizardStep};

use crate::assembler::{assemble, PaperConfig};
use crate::catalogue::{ExamContext, TopicCatalogue};
use crate::error::WizardError;
use crate::generation::{GenerationError, GenerationOutcome, PaperGenerator};
use crate::sections::{QuestionType, SectionPatch, StarterLayout};
use crate::selection::{search, TopicView, TriState};
use crate::settings::{
    DifficultyDistribution, QuestionTypeDistribution, SettingToggle,
};
use crate::template::{apply_custom, apply_template, TemplateLibrary};
use crate::types::{PaperId, SectionId};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Message shown when a generation failure carries no message of its own
pub const GENERIC_GENERATION_FAILURE: &str = "Failed to generate paper. Please try again.";

/// One wizard session
pub struct Wizard {
    catalogue: Arc<TopicCatalogue>,
    templates: Arc<TemplateLibrary>,
    exam: ExamContext,
    state: WizardState,
    step: WizardStep,
    error: Option<String>,
    generating: bool,
}

impl Wizard {
    pub fn new(
        catalogue: Arc<TopicCatalogue>,
        templates: Arc<TemplateLibrary>,
        exam: ExamContext,
    ) -> Self {
        Self::with_defaults(catalogue, templates, exam, &WizardDefaults::default())
    }

    pub fn with_defaults(
        catalogue: Arc<TopicCatalogue>,
        templates: Arc<TemplateLibrary>,
        exam: ExamContext,
        defaults: &WizardDefaults,
    ) -> Self {
        Self {
            catalogue,
            templates,
            exam,
            state: WizardState::with_defaults(defaults),
            step: WizardStep::Template,
            error: None,
            generating: false,
        }
    }

    pub fn catalogue(&self) -> &TopicCatalogue {
        &self.catalogue
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    pub fn exam(&self) -> &ExamContext {
        &self.exam
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// User-visible error, if any
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_generating(&self) -> bool {
        self.generating
    }

    // Navigation

    /// Gate for the current step
    pub fn can_proceed(&self) -> bool {
        can_proceed(self.step, &self.state)
    }

    /// Jump to `target`. Backwards is always allowed; forwards at most one step, and only
    /// through open gates. A permitted move clears the displayed error.
    pub fn go_to_step(&mut self, target: WizardStep) -> Result<(), WizardError> {
        let from = self.step;
        let locked = WizardError::StepLocked { from, to: target };
        if target.index() > from.index() + 1 {
            return Err(locked);
        }
        if target > from && first_blocked(from, target, &self.state).is_some() {
            return Err(locked);
        }
        self.step = target;
        self.error = None;
        debug!(from = ?from, to = ?target, "Changed wizard step");
        Ok(())
    }

    pub fn next(&mut self) -> Result<(), WizardError> {
        let target = self.step.next().ok_or(WizardError::StepLocked {
            from: self.step,
            to: self.step,
        })?;
        self.go_to_step(target)
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        let target = self.step.prev().ok_or(WizardError::StepLocked {
            from: self.step,
            to: self.step,
        })?;
        self.go_to_step(target)
    }

    // Template step

    /// Apply a template by id, or start a custom paper with `None`
    pub fn choose_template(&mut self, template_id: Option<&str>) -> Result<(), WizardError> {
        match template_id {
            Some(id) => {
                let template = self
                    .templates
                    .get(id)
                    .ok_or_else(|| WizardError::UnknownTemplate(id.to_string()))?;
                apply_template(&mut self.state, &self.catalogue, &self.exam, template);
            }
            None => apply_custom(&mut self.state, &self.exam),
        }
        Ok(())
    }

    // Topics step

    pub fn toggle_subtopic(&mut self, topic_id: &str, subtopic: &str) -> Result<(), WizardError> {
        self.state
            .selection
            .toggle_subtopic(&self.catalogue, topic_id, subtopic)
    }

    pub fn toggle_topic(&mut self, topic_id: &str) -> Result<TriState, WizardError> {
        let topic = self
            .catalogue
            .get(topic_id)
            .ok_or_else(|| WizardError::UnknownTopic(topic_id.to_string()))?;
        Ok(self.state.selection.toggle_all_for_topic(topic))
    }

    pub fn select_all_topics(&mut self) {
        self.state.selection.select_all(&self.catalogue);
    }

    pub fn deselect_all_topics(&mut self) {
        self.state.selection.deselect_all();
    }

    pub fn set_topic_weight(&mut self, topic_id: &str, weight: f64) -> Result<f64, WizardError> {
        self.state.weights.set(&self.catalogue, topic_id, weight)
    }

    pub fn tri_state(&self, topic_id: &str) -> Option<TriState> {
        self.catalogue
            .get(topic_id)
            .map(|topic| self.state.selection.tri_state(topic))
    }

    /// Topics to display for `query`
    pub fn search(&self, query: &str) -> Vec<TopicView<'_>> {
        search(&self.catalogue, query)
    }

    // Config step

    pub fn set_total_marks(&mut self, marks: u32) {
        self.state.total_marks = marks;
    }

    pub fn set_time_limit(&mut self, minutes: Option<u32>) {
        self.state.time_limit = minutes;
    }

    pub fn add_section(&mut self) -> SectionId {
        let total = self.state.total_marks;
        self.state.sections.add_section(total).id.clone()
    }

    pub fn remove_section(&mut self, section_id: &str) -> Result<(), WizardError> {
        self.state.sections.remove_section(section_id).map(|_| ())
    }

    pub fn update_section(
        &mut self,
        section_id: &str,
        patch: SectionPatch,
    ) -> Result<(), WizardError> {
        self.state.sections.update_section(section_id, patch)
    }

    pub fn focus_section(&mut self, section_id: &str) -> Result<(), WizardError> {
        self.state.sections.focus(section_id)
    }

    pub fn move_section(&mut self, section_id: &str, to_index: usize) -> Result<(), WizardError> {
        self.state.sections.move_section(section_id, to_index)
    }

    pub fn drag_over(&mut self, active_id: &str, over_id: &str) -> Result<(), WizardError> {
        self.state.sections.drag_over(active_id, over_id)
    }

    pub fn auto_distribute_marks(&mut self) {
        let total = self.state.total_marks;
        self.state.sections.auto_distribute_marks(total);
    }

    pub fn toggle_question_type(
        &mut self,
        section_id: &str,
        question_type: QuestionType,
    ) -> Result<bool, WizardError> {
        self.state
            .sections
            .toggle_question_type(section_id, question_type)
    }

    pub fn apply_starter_layout(&mut self, layout: StarterLayout) -> Result<(), WizardError> {
        let total = self.state.total_marks;
        self.state.sections.apply_starter_layout(layout, total)
    }

    // Settings step

    pub fn set_difficulty(&mut self, mix: DifficultyDistribution) {
        self.state.difficulty = mix;
    }

    pub fn set_question_type_mix(&mut self, mix: QuestionTypeDistribution) {
        self.state.question_types = mix;
    }

    pub fn set_setting(&mut self, setting: SettingToggle, enabled: bool) {
        self.state.settings.set(setting, enabled);
    }

    // Actions

    /// Apply one interaction
    pub fn dispatch(&mut self, action: WizardAction) -> Result<(), WizardError> {
        match action {
            WizardAction::ChooseTemplate { template_id } => {
                self.choose_template(template_id.as_deref())
            }
            WizardAction::ToggleSubtopic { topic_id, subtopic } => {
                self.toggle_subtopic(&topic_id, &subtopic)
            }
            WizardAction::ToggleTopic { topic_id } => self.toggle_topic(&topic_id).map(|_| ()),
            WizardAction::SelectAllTopics => {
                self.select_all_topics();
                Ok(())
            }
            WizardAction::DeselectAllTopics => {
                self.deselect_all_topics();
                Ok(())
            }
            WizardAction::SetTopicWeight { topic_id, weight } => {
                self.set_topic_weight(&topic_id, weight).map(|_| ())
            }
            WizardAction::SetTotalMarks { marks } => {
                self.set_total_marks(marks);
                Ok(())
            }
            WizardAction::SetTimeLimit { minutes } => {
                self.set_time_limit(minutes);
                Ok(())
            }
            WizardAction::AddSection => {
                self.add_section();
                Ok(())
            }
            WizardAction::RemoveSection { section_id } => self.remove_section(&section_id),
            WizardAction::UpdateSection { section_id, patch } => {
                self.update_section(&section_id, patch)
            }
            WizardAction::FocusSection { section_id } => self.focus_section(&section_id),
            WizardAction::MoveSection {
                section_id,
                to_index,
            } => self.move_section(&section_id, to_index),
            WizardAction::DragOver { active_id, over_id } => self.drag_over(&active_id, &over_id),
            WizardAction::AutoDistributeMarks => {
                self.auto_distribute_marks();
                Ok(())
            }
            WizardAction::ToggleQuestionType {
                section_id,
                question_type,
            } => self
                .toggle_question_type(&section_id, question_type)
                .map(|_| ()),
            WizardAction::ApplyStarterLayout { layout } => self.apply_starter_layout(layout),
            WizardAction::SetDifficulty(mix) => {
                self.set_difficulty(mix);
                Ok(())
            }
            WizardAction::SetQuestionTypeMix(mix) => {
                self.set_question_type_mix(mix);
                Ok(())
            }
            WizardAction::SetSetting { setting, enabled } => {
                self.set_setting(setting, enabled);
                Ok(())
            }
            WizardAction::Next => self.next(),
            WizardAction::Back => self.back(),
            WizardAction::GoToStep { step } => self.go_to_step(step),
        }
    }

    /// Replay a script, stopping at the first failing action
    pub fn run_script(&mut self, script: WizardScript) -> Result<(), WizardError> {
        for (index, action) in script.actions.into_iter().enumerate() {
            debug!(index, action = ?action, "Replaying action");
            if let Err(e) = self.dispatch(action) {
                warn!(index, error = %e, "Scripted action failed");
                return Err(WizardError::ScriptAction {
                    index,
                    source: Box::new(e),
                });
            }
        }
        Ok(())
    }

    // Output

    /// Snapshot of the current configuration
    pub fn assemble(&self) -> PaperConfig {
        assemble(&self.state)
    }

    /// Mark a generation request as in flight and return the configuration to send.
    ///
    /// Returns `Ok(None)` when a request is already outstanding. Fails when not on the
    /// preview step or when any earlier gate has closed since it was passed.
    pub fn begin_generation(&mut self) -> Result<Option<PaperConfig>, WizardError> {
        if self.generating {
            debug!("Generation already in flight; ignoring");
            return Ok(None);
        }
        if self.step != WizardStep::Preview {
            return Err(WizardError::NotReadyToGenerate(self.step));
        }
        if let Some(blocked) = first_blocked(WizardStep::Template, WizardStep::Preview, &self.state)
        {
            return Err(WizardError::NotReadyToGenerate(blocked));
        }
        self.generating = true;
        self.error = None;
        Ok(Some(self.assemble()))
    }

    /// Record the result of an outstanding generation request
    pub fn finish_generation(
        &mut self,
        result: Result<PaperId, GenerationError>,
    ) -> GenerationOutcome {
        self.generating = false;
        match result {
            Ok(paper_id) => {
                info!(paper_id = %paper_id, "Paper generated");
                GenerationOutcome::Generated(paper_id)
            }
            Err(e) => {
                let message = e
                    .message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| GENERIC_GENERATION_FAILURE.to_string());
                warn!(error = %message, "Paper generation failed");
                self.error = Some(message.clone());
                GenerationOutcome::Failed(message)
            }
        }
    }

    /// Hand the assembled configuration to `generator`
    pub async fn generate<G>(&mut self, generator: &G) -> Result<GenerationOutcome, WizardError>
    where
        G: PaperGenerator + ?Sized,
    {
        let Some(config) = self.begin_generation()? else {
            return Ok(GenerationOutcome::AlreadyInFlight);
        };
        info!(
            title = %config.title,
            sections = config.sections.len(),
            topics = config.selected_topics.len(),
            "Requesting paper generation"
        );
        let result = generator.generate(&config).await;
        Ok(self.finish_generation(result))
    }
}
