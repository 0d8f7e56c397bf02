//! Paper Sections
//!
//! Ordered section list with mark budgets and question-type tags. Every mutation leaves
//! `order` equal to array position (dense, zero-based). Mark totals are advisory: nothing
//! here refuses a configuration whose section marks disagree with the paper total.

pub mod distribute;
pub mod layouts;

pub use distribute::even_split;
pub use layouts::{canonical_instructions, section_name, StarterLayout, GENERIC_INSTRUCTIONS};

use crate::error::WizardError;
use crate::template::SectionBlueprint;
use crate::types::SectionId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use tracing::debug;

/// Question type tag carried by sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    MultipleChoice,
    ShortAnswer,
    LongAnswer,
    Calculation,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
        QuestionType::Calculation,
    ];

    pub fn label(self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "Multiple choice",
            QuestionType::ShortAnswer => "Short answer",
            QuestionType::LongAnswer => "Long answer",
            QuestionType::Calculation => "Calculation",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Question types a freshly added section starts with
pub fn default_question_types() -> BTreeSet<QuestionType> {
    [QuestionType::ShortAnswer, QuestionType::LongAnswer]
        .into_iter()
        .collect()
}

/// One section of the paper
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub id: SectionId,
    pub name: String,
    pub instructions: String,
    pub question_types: BTreeSet<QuestionType>,
    pub target_marks: u32,
    pub order: usize,
}

/// Partial update for a section; `None` fields are left alone
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub question_types: Option<BTreeSet<QuestionType>>,
    #[serde(default)]
    pub target_marks: Option<u32>,
}

/// Advisory comparison of allocated section marks against the paper total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationStatus {
    Balanced,
    Under(u32),
    Over(u32),
}

/// Ordered section list with UI focus
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionModel {
    sections: Vec<Section>,
    focused: Option<SectionId>,
    next_id: u64,
}

impl SectionModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    pub fn focused(&self) -> Option<&SectionId> {
        self.focused.as_ref()
    }

    pub fn focus(&mut self, id: &str) -> Result<(), WizardError> {
        self.position(id)?;
        self.focused = Some(id.to_string());
        Ok(())
    }

    /// Sum of section marks, saturating at `u32::MAX`
    pub fn allocated_marks(&self) -> u32 {
        self.sections
            .iter()
            .fold(0u32, |acc, s| acc.saturating_add(s.target_marks))
    }

    /// Marks not yet claimed by any section, floored at zero
    pub fn unallocated_marks(&self, total_marks: u32) -> u32 {
        total_marks.saturating_sub(self.allocated_marks())
    }

    pub fn allocation_status(&self, total_marks: u32) -> AllocationStatus {
        let allocated = self.allocated_marks();
        if allocated == total_marks {
            AllocationStatus::Balanced
        } else if allocated < total_marks {
            AllocationStatus::Under(total_marks - allocated)
        } else {
            AllocationStatus::Over(allocated - total_marks)
        }
    }

    /// Append the next lettered section, claiming whatever marks remain unallocated
    pub fn add_section(&mut self, total_marks: u32) -> &Section {
        let index = self.sections.len();
        let name = section_name(index);
        let section = Section {
            id: self.fresh_id(),
            instructions: canonical_instructions(&name).to_string(),
            name,
            question_types: default_question_types(),
            target_marks: self.unallocated_marks(total_marks),
            order: index,
        };
        debug!(section_id = %section.id, target_marks = section.target_marks, "Added section");
        self.sections.push(section);
        &self.sections[index]
    }

    pub fn remove_section(&mut self, id: &str) -> Result<Section, WizardError> {
        let index = self.position(id)?;
        let removed = self.sections.remove(index);
        self.renumber();
        if self.focused.as_deref() == Some(id) {
            self.focused = self.sections.first().map(|s| s.id.clone());
        }
        debug!(section_id = id, remaining = self.sections.len(), "Removed section");
        Ok(removed)
    }

    pub fn update_section(&mut self, id: &str, patch: SectionPatch) -> Result<(), WizardError> {
        let index = self.position(id)?;
        let section = &mut self.sections[index];
        if let Some(name) = patch.name {
            section.name = name;
        }
        if let Some(instructions) = patch.instructions {
            section.instructions = instructions;
        }
        if let Some(types) = patch.question_types {
            section.question_types = types;
        }
        if let Some(marks) = patch.target_marks {
            section.target_marks = marks;
        }
        debug!(section_id = id, "Updated section");
        Ok(())
    }

    /// Move one section to `to_index` (clamped), renumbering every `order`.
    pub fn move_section(&mut self, id: &str, to_index: usize) -> Result<(), WizardError> {
        let from = self.position(id)?;
        let to = to_index.min(self.sections.len() - 1);
        if from != to {
            let section = self.sections.remove(from);
            self.sections.insert(to, section);
            self.renumber();
            debug!(section_id = id, from, to, "Moved section");
        }
        Ok(())
    }

    /// Pointer crossed into `over_id` while dragging `active_id`: splice the dragged
    /// section into the hovered section's slot.
    pub fn drag_over(&mut self, active_id: &str, over_id: &str) -> Result<(), WizardError> {
        let target = self.position(over_id)?;
        if active_id == over_id {
            return Ok(());
        }
        self.move_section(active_id, target)
    }

    /// Spread `total_marks` evenly; earlier sections absorb the remainder one mark each
    pub fn auto_distribute_marks(&mut self, total_marks: u32) {
        let shares = even_split(total_marks, self.sections.len());
        for (section, marks) in self.sections.iter_mut().zip(shares) {
            section.target_marks = marks;
        }
        debug!(total_marks, sections = self.sections.len(), "Auto-distributed marks");
    }

    /// Add the type if absent, remove it if present. Returns whether it is now present.
    pub fn toggle_question_type(
        &mut self,
        id: &str,
        question_type: QuestionType,
    ) -> Result<bool, WizardError> {
        let index = self.position(id)?;
        let types = &mut self.sections[index].question_types;
        let present = if types.remove(&question_type) {
            false
        } else {
            types.insert(question_type);
            true
        };
        debug!(section_id = id, ?question_type, present, "Toggled question type");
        Ok(present)
    }

    pub fn apply_starter_layout(
        &mut self,
        layout: StarterLayout,
        total_marks: u32,
    ) -> Result<(), WizardError> {
        if !self.sections.is_empty() {
            return Err(WizardError::SectionsNotEmpty);
        }
        for (index, part) in layout.parts().iter().enumerate() {
            let name = section_name(index);
            let section = Section {
                id: self.fresh_id(),
                instructions: canonical_instructions(&name).to_string(),
                name,
                question_types: part.question_types.iter().copied().collect(),
                target_marks: part.marks_for(total_marks),
                order: index,
            };
            self.sections.push(section);
        }
        debug!(layout = ?layout, "Applied starter layout");
        Ok(())
    }

    /// Replace all sections with fresh copies of the blueprints. Blueprint ids are discarded.
    pub fn replace_from_blueprints(&mut self, blueprints: &[SectionBlueprint]) {
        let mut sections = Vec::with_capacity(blueprints.len());
        for (index, blueprint) in blueprints.iter().enumerate() {
            sections.push(Section {
                id: self.fresh_id(),
                name: blueprint.name.clone(),
                instructions: blueprint.instructions.clone(),
                question_types: blueprint.question_types.clone(),
                target_marks: blueprint.target_marks,
                order: index,
            });
        }
        self.sections = sections;
        self.focused = None;
    }

    fn position(&self, id: &str) -> Result<usize, WizardError> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| WizardError::UnknownSection(id.to_string()))
    }

    fn renumber(&mut self) {
        for (index, section) in self.sections.iter_mut().enumerate() {
            section.order = index;
        }
    }

    fn fresh_id(&mut self) -> SectionId {
        self.next_id += 1;
        format!("section-{}", self.next_id)
    }
}
