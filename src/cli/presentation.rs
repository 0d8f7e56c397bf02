//! CLI presentation: tables and summaries. Formatting only; no domain decisions.

use crate::assembler::PaperConfig;
use crate::error::WizardError;
use crate::sections::{AllocationStatus, SectionModel};
use crate::selection::TopicView;
use crate::settings::{DifficultyDistribution, PercentageStatus, QuestionTypeDistribution};
use crate::template::TemplateLibrary;
use crate::wizard::WizardState;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;

fn to_json(value: &serde_json::Value) -> Result<String, WizardError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| WizardError::ConfigError(format!("Failed to serialize output: {}", e)))
}

pub fn format_topics_text(views: &[TopicView<'_>]) -> String {
    if views.is_empty() {
        return "No matching topics.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Topic ID", "Name", "Subtopics"]);
    for view in views {
        let subtopics = if view.is_narrowed() {
            format!(
                "{} (of {})",
                view.subtopics.join(", "),
                view.topic.subtopics.len()
            )
        } else {
            view.subtopics.join(", ")
        };
        table.add_row(vec![
            view.topic.id.as_str(),
            view.topic.name.as_str(),
            subtopics.as_str(),
        ]);
    }
    table.to_string()
}

pub fn format_topics_json(views: &[TopicView<'_>]) -> Result<String, WizardError> {
    let arr: Vec<serde_json::Value> = views
        .iter()
        .map(|v| {
            json!({
                "id": v.topic.id,
                "name": v.topic.name,
                "icon": v.topic.icon,
                "subtopics": v.subtopics,
            })
        })
        .collect();
    to_json(&serde_json::Value::Array(arr))
}

pub fn format_templates_text(library: &TemplateLibrary) -> String {
    if library.is_empty() {
        return "No templates available.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["ID", "Name", "Marks", "Minutes", "Sections", "Topics"]);
    for t in library.templates() {
        let minutes = t
            .duration
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());
        let topics = t
            .topic_ids
            .as_ref()
            .map(|ids| ids.join(", "))
            .unwrap_or_else(|| "(any)".to_string());
        table.add_row(vec![
            t.id.clone(),
            t.name.clone(),
            t.total_marks.to_string(),
            minutes,
            t.sections.len().to_string(),
            topics,
        ]);
    }
    table.to_string()
}

pub fn format_templates_json(library: &TemplateLibrary) -> Result<String, WizardError> {
    let value = serde_json::to_value(library.templates())
        .map_err(|e| WizardError::ConfigError(format!("Failed to serialize output: {}", e)))?;
    to_json(&value)
}

fn allocation_line(sections: &SectionModel, total_marks: u32) -> String {
    let allocated = sections.allocated_marks();
    match sections.allocation_status(total_marks) {
        AllocationStatus::Balanced => {
            format!("{} / {} marks allocated", allocated, total_marks)
                .green()
                .to_string()
        }
        AllocationStatus::Under(n) => format!(
            "{} / {} marks allocated ({} unallocated)",
            allocated, total_marks, n
        )
        .yellow()
        .to_string(),
        AllocationStatus::Over(n) => format!(
            "{} / {} marks allocated ({} over)",
            allocated, total_marks, n
        )
        .yellow()
        .to_string(),
    }
}

fn percentage_line(label: &str, status: PercentageStatus) -> String {
    match status {
        PercentageStatus::Balanced => format!("{}: 100%", label).green().to_string(),
        PercentageStatus::Off(total) => format!("{}: {}% (should be 100%)", label, total)
            .yellow()
            .to_string(),
    }
}

/// Human-readable preview of the current wizard state
pub fn format_paper_summary(state: &WizardState) -> String {
    let mut out = String::new();
    let title = if state.paper_name.is_empty() {
        "(untitled paper)"
    } else {
        state.paper_name.as_str()
    };
    out.push_str(&format!("{}\n", title.bold()));
    let time = state
        .time_limit
        .map(|m| format!("{} minutes", m))
        .unwrap_or_else(|| "untimed".to_string());
    out.push_str(&format!("Total marks: {}  |  Time: {}\n", state.total_marks, time));
    out.push_str(&format!(
        "{}\n",
        allocation_line(&state.sections, state.total_marks)
    ));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["#", "Section", "Marks", "Question types"]);
    for section in state.sections.sections() {
        let types: Vec<&str> = section.question_types.iter().map(|q| q.label()).collect();
        table.add_row(vec![
            (section.order + 1).to_string(),
            section.name.clone(),
            section.target_marks.to_string(),
            types.join(", "),
        ]);
    }
    out.push_str(&format!("{}\n", table));

    out.push_str(&format!(
        "Topics: {} ({} subtopics)\n",
        state.selection.selected_topics().len(),
        state.selection.total_selected()
    ));
    out.push_str(&format!("{}\n", difficulty_line(&state.difficulty)));
    out.push_str(&question_mix_line(&state.question_types));
    out
}

fn difficulty_line(mix: &DifficultyDistribution) -> String {
    format!(
        "Difficulty easy/medium/hard: {}/{}/{}  {}",
        mix.easy,
        mix.medium,
        mix.hard,
        percentage_line("total", mix.status())
    )
}

fn question_mix_line(mix: &QuestionTypeDistribution) -> String {
    format!(
        "Question mix MC/short/long/calc: {}/{}/{}/{}  {}",
        mix.multiple_choice,
        mix.short_answer,
        mix.long_answer,
        mix.calculation,
        percentage_line("total", mix.status())
    )
}

/// Pretty JSON for an assembled configuration
pub fn format_paper_config_json(config: &PaperConfig) -> Result<String, WizardError> {
    serde_json::to_string_pretty(config)
        .map_err(|e| WizardError::ConfigError(format!("Failed to serialize paper config: {}", e)))
}
