//! Interactive terminal walk-through of the wizard steps.

use crate::cli::presentation::{format_paper_config_json, format_paper_summary};
use crate::cli::route::RunContext;
use crate::error::WizardError;
use crate::generation::{GenerationOutcome, HttpPaperGenerator};
use crate::sections::{QuestionType, SectionPatch, StarterLayout};
use crate::settings::{DifficultyDistribution, QuestionTypeDistribution, SettingToggle};
use crate::wizard::{Wizard, WizardStep};
use dialoguer::{Confirm, Input, MultiSelect, Select};
use owo_colors::OwoColorize;

fn input_error(e: dialoguer::Error) -> WizardError {
    WizardError::ConfigError(format!("Failed to get user input: {}", e))
}

fn select(prompt: &str, items: &[String], default: usize) -> Result<usize, WizardError> {
    Select::new()
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(input_error)
}

fn confirm(prompt: &str) -> Result<bool, WizardError> {
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(input_error)
}

fn ask_u32(prompt: &str, default: u32) -> Result<u32, WizardError> {
    Input::<u32>::new()
        .with_prompt(prompt)
        .default(default)
        .interact_text()
        .map_err(input_error)
}

fn warn_user(message: &str) {
    eprintln!("{}", message.yellow());
}

/// Run the wizard until the user generates, prints, or quits
pub fn run(ctx: &RunContext) -> Result<String, WizardError> {
    let mut wizard = ctx.new_wizard();
    loop {
        println!(
            "\n{} {}/{}: {}",
            "Step".bold(),
            wizard.step().index() + 1,
            WizardStep::ALL.len(),
            wizard.step().title().bold()
        );
        let finished = match wizard.step() {
            WizardStep::Template => template_step(&mut wizard)?,
            WizardStep::Topics => topics_step(&mut wizard)?,
            WizardStep::Config => config_step(&mut wizard)?,
            WizardStep::Settings => settings_step(&mut wizard)?,
            WizardStep::Preview => preview_step(ctx, &mut wizard)?,
        };
        if let Some(output) = finished {
            return Ok(output);
        }
    }
}

fn go_next(wizard: &mut Wizard) {
    if let Err(e) = wizard.next() {
        warn_user(&format!("{} is not complete yet ({})", wizard.step().title(), e));
    }
}

fn go_back(wizard: &mut Wizard) {
    if wizard.step() != WizardStep::Template {
        if let Err(e) = wizard.back() {
            warn_user(&format!("Cannot go back from {} ({})", wizard.step().title(), e));
        }
    }
}

fn template_step(wizard: &mut Wizard) -> Result<Option<String>, WizardError> {
    let mut items: Vec<String> = wizard
        .templates()
        .templates()
        .iter()
        .map(|t| format!("{} ({} marks)", t.name, t.total_marks))
        .collect();
    items.push("Custom paper".to_string());
    items.push("Quit".to_string());

    let choice = select("Start from", &items, 0)?;
    let template_count = wizard.templates().templates().len();
    if choice == template_count + 1 {
        return Ok(Some("Wizard cancelled".to_string()));
    }
    let template_id = wizard
        .templates()
        .templates()
        .get(choice)
        .map(|t| t.id.clone());
    wizard.choose_template(template_id.as_deref())?;
    println!("Paper: {}", wizard.state().paper_name);
    go_next(wizard);
    Ok(None)
}

fn topics_step(wizard: &mut Wizard) -> Result<Option<String>, WizardError> {
    let query: String = Input::new()
        .with_prompt("Search topics (empty for all)")
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;

    // (topic id, topic name, subtopic, currently selected)
    let mut rows: Vec<(String, String, String, bool)> = Vec::new();
    for view in wizard.search(&query) {
        for sub in view.subtopics {
            let selected = wizard.state().selection.is_selected(&view.topic.id, sub);
            rows.push((
                view.topic.id.clone(),
                view.topic.name.clone(),
                sub.to_string(),
                selected,
            ));
        }
    }

    if rows.is_empty() {
        warn_user("No topics match that search");
    } else {
        let labels: Vec<String> = rows
            .iter()
            .map(|(_, name, sub, _)| format!("{} / {}", name, sub))
            .collect();
        let defaults: Vec<bool> = rows.iter().map(|(_, _, _, selected)| *selected).collect();
        let chosen = MultiSelect::new()
            .with_prompt("Subtopics (space to toggle)")
            .items(&labels)
            .defaults(&defaults)
            .interact()
            .map_err(input_error)?;
        for (index, (topic_id, _, sub, was_selected)) in rows.iter().enumerate() {
            if chosen.contains(&index) != *was_selected {
                wizard.toggle_subtopic(topic_id, sub)?;
            }
        }
    }
    println!(
        "{} subtopics selected across {} topics",
        wizard.state().selection.total_selected(),
        wizard.state().selection.selected_topics().len()
    );

    if !wizard.state().selection.is_empty() && confirm("Adjust topic weights?")? {
        for topic_id in wizard.state().selection.selected_topics() {
            let current = wizard.state().weights.get(&topic_id);
            let weight: f64 = Input::new()
                .with_prompt(format!("Weight for {} (0.5 - 3.0)", topic_id))
                .default(current)
                .interact_text()
                .map_err(input_error)?;
            let applied = wizard.set_topic_weight(&topic_id, weight)?;
            if applied != weight {
                println!("Using {} for {}", applied, topic_id);
            }
        }
    }

    let items = ["Continue", "Search again", "Back"].map(String::from);
    match select("Next", &items, 0)? {
        0 => go_next(wizard),
        2 => go_back(wizard),
        _ => {}
    }
    Ok(None)
}

fn pick_section(wizard: &Wizard, prompt: &str) -> Result<Option<String>, WizardError> {
    let sections = wizard.state().sections.sections();
    if sections.is_empty() {
        warn_user("There are no sections yet");
        return Ok(None);
    }
    let items: Vec<String> = sections
        .iter()
        .map(|s| format!("{} ({} marks)", s.name, s.target_marks))
        .collect();
    let index = select(prompt, &items, 0)?;
    Ok(sections.get(index).map(|s| s.id.clone()))
}

fn config_step(wizard: &mut Wizard) -> Result<Option<String>, WizardError> {
    let marks = ask_u32("Total marks", wizard.state().total_marks)?;
    wizard.set_total_marks(marks);

    let current = wizard
        .state()
        .time_limit
        .map(|m| m.to_string())
        .unwrap_or_default();
    let time: String = Input::new()
        .with_prompt("Time limit in minutes (empty for untimed)")
        .default(current)
        .allow_empty(true)
        .interact_text()
        .map_err(input_error)?;
    let time = time.trim();
    if time.is_empty() {
        wizard.set_time_limit(None);
    } else {
        match time.parse::<u32>() {
            Ok(minutes) => wizard.set_time_limit(Some(minutes)),
            Err(_) => warn_user("Time limit must be a whole number; leaving it unchanged"),
        }
    }

    if wizard.state().sections.is_empty() {
        let mut items: Vec<String> = StarterLayout::ALL
            .iter()
            .map(|l| l.label().to_string())
            .collect();
        items.push("Start with a blank section".to_string());
        let choice = select("Starter layout", &items, 0)?;
        match StarterLayout::ALL.get(choice) {
            Some(layout) => wizard.apply_starter_layout(*layout)?,
            None => {
                wizard.add_section();
            }
        }
    }

    let items = [
        "Continue",
        "Add section",
        "Remove section",
        "Rename section",
        "Set section marks",
        "Move section",
        "Toggle question type",
        "Auto-distribute marks",
        "Back",
    ]
    .map(String::from);
    loop {
        println!("{}", format_paper_summary(wizard.state()));
        match select("Sections", &items, 0)? {
            0 => {
                let before = wizard.step();
                go_next(wizard);
                if wizard.step() != before {
                    return Ok(None);
                }
            }
            1 => {
                wizard.add_section();
            }
            2 => {
                if let Some(id) = pick_section(wizard, "Remove which section?")? {
                    wizard.remove_section(&id)?;
                }
            }
            3 => {
                if let Some(id) = pick_section(wizard, "Rename which section?")? {
                    let name: String = Input::new()
                        .with_prompt("New name")
                        .interact_text()
                        .map_err(input_error)?;
                    wizard.update_section(
                        &id,
                        SectionPatch {
                            name: Some(name),
                            ..Default::default()
                        },
                    )?;
                }
            }
            4 => {
                if let Some(id) = pick_section(wizard, "Set marks for which section?")? {
                    let current = wizard
                        .state()
                        .sections
                        .get(&id)
                        .map(|s| s.target_marks)
                        .unwrap_or(0);
                    let marks = ask_u32("Target marks", current)?;
                    wizard.update_section(
                        &id,
                        SectionPatch {
                            target_marks: Some(marks),
                            ..Default::default()
                        },
                    )?;
                }
            }
            5 => {
                if let Some(id) = pick_section(wizard, "Move which section?")? {
                    let position = ask_u32("New position (1 = first)", 1)?;
                    wizard.move_section(&id, position.saturating_sub(1) as usize)?;
                }
            }
            6 => {
                if let Some(id) = pick_section(wizard, "Which section?")? {
                    let labels: Vec<String> =
                        QuestionType::ALL.iter().map(|q| q.label().to_string()).collect();
                    let index = select("Question type", &labels, 0)?;
                    if let Some(question_type) = QuestionType::ALL.get(index) {
                        wizard.toggle_question_type(&id, *question_type)?;
                    }
                }
            }
            7 => wizard.auto_distribute_marks(),
            _ => {
                go_back(wizard);
                return Ok(None);
            }
        }
    }
}

fn settings_step(wizard: &mut Wizard) -> Result<Option<String>, WizardError> {
    let labels: Vec<String> = SettingToggle::ALL
        .iter()
        .map(|s| s.label().to_string())
        .collect();
    let defaults: Vec<bool> = SettingToggle::ALL
        .iter()
        .map(|s| wizard.state().settings.get(*s))
        .collect();
    let chosen = MultiSelect::new()
        .with_prompt("Paper settings (space to toggle)")
        .items(&labels)
        .defaults(&defaults)
        .interact()
        .map_err(input_error)?;
    for (index, setting) in SettingToggle::ALL.iter().enumerate() {
        wizard.set_setting(*setting, chosen.contains(&index));
    }

    if confirm("Adjust difficulty mix?")? {
        let current = wizard.state().difficulty;
        let mix = DifficultyDistribution {
            easy: ask_u32("Easy %", current.easy)?,
            medium: ask_u32("Medium %", current.medium)?,
            hard: ask_u32("Hard %", current.hard)?,
        };
        wizard.set_difficulty(mix);
        if mix.total() != 100 {
            warn_user(&format!("Difficulty mix totals {}% (should be 100%)", mix.total()));
        }
    }

    if confirm("Adjust question type mix?")? {
        let current = wizard.state().question_types;
        let mix = QuestionTypeDistribution {
            multiple_choice: ask_u32("Multiple choice %", current.multiple_choice)?,
            short_answer: ask_u32("Short answer %", current.short_answer)?,
            long_answer: ask_u32("Long answer %", current.long_answer)?,
            calculation: ask_u32("Calculation %", current.calculation)?,
        };
        wizard.set_question_type_mix(mix);
        if mix.total() != 100 {
            warn_user(&format!("Question type mix totals {}% (should be 100%)", mix.total()));
        }
    }

    let items = ["Continue", "Back"].map(String::from);
    match select("Next", &items, 0)? {
        0 => go_next(wizard),
        _ => go_back(wizard),
    }
    Ok(None)
}

fn preview_step(ctx: &RunContext, wizard: &mut Wizard) -> Result<Option<String>, WizardError> {
    println!("{}", format_paper_summary(wizard.state()));
    if let Some(error) = wizard.error() {
        warn_user(error);
    }

    let can_generate = ctx.config().generator.endpoint.is_some();
    let mut items = Vec::new();
    if can_generate {
        items.push("Generate paper".to_string());
    }
    items.push("Print configuration JSON".to_string());
    items.push("Back".to_string());
    let choice = select("Ready", &items, 0)?;
    let choice = if can_generate { choice } else { choice + 1 };

    match choice {
        0 => {
            let generator = HttpPaperGenerator::new(&ctx.config().generator)?;
            let rt = tokio::runtime::Runtime::new().map_err(|e| {
                WizardError::ConfigError(format!("Failed to create tokio runtime: {}", e))
            })?;
            match rt.block_on(wizard.generate(&generator))? {
                GenerationOutcome::Generated(paper_id) => {
                    Ok(Some(format!("Paper generated: {}", paper_id)))
                }
                // Failure message stays on the wizard and is shown on the next pass
                GenerationOutcome::Failed(_) | GenerationOutcome::AlreadyInFlight => Ok(None),
            }
        }
        1 => Ok(Some(format_paper_config_json(&wizard.assemble())?)),
        _ => {
            go_back(wizard);
            Ok(None)
        }
    }
}
