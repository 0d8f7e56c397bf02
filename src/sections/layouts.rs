//! Section naming, canonical instructions and canned starter layouts.

use crate::sections::QuestionType;
use serde::{Deserialize, Serialize};

/// Fallback instruction for sections without a canonical entry
pub const GENERIC_INSTRUCTIONS: &str = "Answer all questions in the spaces provided.";

/// Letter-sequence name for the section at `index`: A..Z, then AA, AB, ...
pub fn section_name(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.reverse();
    format!("Section {}", letters.into_iter().collect::<String>())
}

/// Canonical instructions for a derived section name
pub fn canonical_instructions(name: &str) -> &'static str {
    match name {
        "Section A" => "Answer all questions in this section. Calculators may not be used.",
        "Section B" => "Answer all questions in this section. Show all your working.",
        "Section C" => {
            "Answer all questions in this section. Extended answers should be written in full sentences."
        }
        _ => GENERIC_INSTRUCTIONS,
    }
}

/// Canned layouts offered while the section list is empty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StarterLayout {
    /// One section carrying all marks
    Single,
    /// Sections A/B, 40/60
    TwoPart,
    /// Sections A/B/C, 20/50/30
    ThreePart,
}

/// One section of a starter layout
#[derive(Debug, Clone, Copy)]
pub struct LayoutPart {
    pub percent: u32,
    pub question_types: &'static [QuestionType],
}

impl LayoutPart {
    /// Percentage share of the total, rounded half up
    pub fn marks_for(&self, total_marks: u32) -> u32 {
        let scaled = u64::from(total_marks) * u64::from(self.percent);
        u32::try_from((scaled + 50) / 100).unwrap_or(u32::MAX)
    }
}

const SINGLE: &[LayoutPart] = &[LayoutPart {
    percent: 100,
    question_types: &[
        QuestionType::MultipleChoice,
        QuestionType::ShortAnswer,
        QuestionType::LongAnswer,
    ],
}];

const TWO_PART: &[LayoutPart] = &[
    LayoutPart {
        percent: 40,
        question_types: &[QuestionType::MultipleChoice, QuestionType::ShortAnswer],
    },
    LayoutPart {
        percent: 60,
        question_types: &[QuestionType::LongAnswer, QuestionType::Calculation],
    },
];

const THREE_PART: &[LayoutPart] = &[
    LayoutPart {
        percent: 20,
        question_types: &[QuestionType::MultipleChoice],
    },
    LayoutPart {
        percent: 50,
        question_types: &[QuestionType::ShortAnswer, QuestionType::Calculation],
    },
    LayoutPart {
        percent: 30,
        question_types: &[QuestionType::LongAnswer],
    },
];

impl StarterLayout {
    pub const ALL: [StarterLayout; 3] = [
        StarterLayout::Single,
        StarterLayout::TwoPart,
        StarterLayout::ThreePart,
    ];

    pub fn parts(self) -> &'static [LayoutPart] {
        match self {
            StarterLayout::Single => SINGLE,
            StarterLayout::TwoPart => TWO_PART,
            StarterLayout::ThreePart => THREE_PART,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StarterLayout::Single => "Single section",
            StarterLayout::TwoPart => "Two sections (A/B)",
            StarterLayout::ThreePart => "Three sections (A/B/C)",
        }
    }
}
