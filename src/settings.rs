//! Paper settings and percentage mixes.
//!
//! Toggles are a fixed set of named booleans. Distributions are named percentage buckets
//! whose totals are reported but never enforced.

use serde::{Deserialize, Serialize};

/// Named paper toggles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaperSettings {
    pub show_marks: bool,
    pub calculator_allowed: bool,
    pub include_formula_sheet: bool,
    pub include_data_booklet: bool,
    pub exam_conditions: bool,
}

impl Default for PaperSettings {
    fn default() -> Self {
        Self {
            show_marks: true,
            calculator_allowed: true,
            include_formula_sheet: false,
            include_data_booklet: false,
            exam_conditions: false,
        }
    }
}

/// Selector for one [`PaperSettings`] field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingToggle {
    ShowMarks,
    CalculatorAllowed,
    IncludeFormulaSheet,
    IncludeDataBooklet,
    ExamConditions,
}

impl SettingToggle {
    pub const ALL: [SettingToggle; 5] = [
        SettingToggle::ShowMarks,
        SettingToggle::CalculatorAllowed,
        SettingToggle::IncludeFormulaSheet,
        SettingToggle::IncludeDataBooklet,
        SettingToggle::ExamConditions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SettingToggle::ShowMarks => "Show marks next to each question",
            SettingToggle::CalculatorAllowed => "Calculator allowed",
            SettingToggle::IncludeFormulaSheet => "Include formula sheet",
            SettingToggle::IncludeDataBooklet => "Include data booklet",
            SettingToggle::ExamConditions => "Exam conditions",
        }
    }
}

impl PaperSettings {
    pub fn get(&self, toggle: SettingToggle) -> bool {
        match toggle {
            SettingToggle::ShowMarks => self.show_marks,
            SettingToggle::CalculatorAllowed => self.calculator_allowed,
            SettingToggle::IncludeFormulaSheet => self.include_formula_sheet,
            SettingToggle::IncludeDataBooklet => self.include_data_booklet,
            SettingToggle::ExamConditions => self.exam_conditions,
        }
    }

    pub fn set(&mut self, toggle: SettingToggle, value: bool) {
        let field = match toggle {
            SettingToggle::ShowMarks => &mut self.show_marks,
            SettingToggle::CalculatorAllowed => &mut self.calculator_allowed,
            SettingToggle::IncludeFormulaSheet => &mut self.include_formula_sheet,
            SettingToggle::IncludeDataBooklet => &mut self.include_data_booklet,
            SettingToggle::ExamConditions => &mut self.exam_conditions,
        };
        *field = value;
    }

    pub fn flip(&mut self, toggle: SettingToggle) -> bool {
        let next = !self.get(toggle);
        self.set(toggle, next);
        next
    }
}

/// Advisory check of a percentage mix
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageStatus {
    Balanced,
    Off(u32),
}

impl PercentageStatus {
    fn from_total(total: u32) -> Self {
        if total == 100 {
            PercentageStatus::Balanced
        } else {
            PercentageStatus::Off(total)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    pub easy: u32,
    pub medium: u32,
    pub hard: u32,
}

impl Default for DifficultyDistribution {
    fn default() -> Self {
        Self {
            easy: 30,
            medium: 50,
            hard: 20,
        }
    }
}

impl DifficultyDistribution {
    pub fn total(&self) -> u32 {
        self.easy.saturating_add(self.medium).saturating_add(self.hard)
    }

    pub fn status(&self) -> PercentageStatus {
        PercentageStatus::from_total(self.total())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTypeDistribution {
    pub multiple_choice: u32,
    pub short_answer: u32,
    pub long_answer: u32,
    pub calculation: u32,
}

impl Default for QuestionTypeDistribution {
    fn default() -> Self {
        Self {
            multiple_choice: 20,
            short_answer: 40,
            long_answer: 30,
            calculation: 10,
        }
    }
}

impl QuestionTypeDistribution {
    pub fn total(&self) -> u32 {
        self.multiple_choice
            .saturating_add(self.short_answer)
            .saturating_add(self.long_answer)
            .saturating_add(self.calculation)
    }

    pub fn status(&self) -> PercentageStatus {
        PercentageStatus::from_total(self.total())
    }
}
