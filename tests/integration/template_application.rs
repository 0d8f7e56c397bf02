//! Template step behaviour against the built-in presets

use crate::integration::test_utils::builtin_wizard;
use papersmith::sections::QuestionType;
use papersmith::selection::TriState;

#[test]
fn test_template_seeds_scalars_and_sections() {
    let mut wizard = builtin_wizard();
    wizard.choose_template(Some("higher-calculator")).unwrap();

    let state = wizard.state();
    assert_eq!(state.paper_name, "AQA GCSE Higher Paper 2 (Calculator)");
    assert_eq!(state.template_id.as_deref(), Some("higher-calculator"));
    assert_eq!(state.total_marks, 80);
    assert_eq!(state.time_limit, Some(90));
    assert!(state.settings.calculator_allowed);
    assert!(state.settings.include_formula_sheet);

    let sections = state.sections.sections();
    assert_eq!(sections.len(), 2);
    assert_eq!(sections[1].name, "Section B");
    assert!(sections[1].question_types.contains(&QuestionType::Calculation));
    assert_eq!(
        sections.iter().map(|s| s.order).collect::<Vec<_>>(),
        vec![0, 1]
    );
}

#[test]
fn test_template_without_topics_keeps_selection() {
    let mut wizard = builtin_wizard();
    wizard.toggle_subtopic("number", "Standard form").unwrap();
    wizard.choose_template(Some("foundation-non-calculator")).unwrap();
    assert!(wizard
        .state()
        .selection
        .is_selected("number", "Standard form"));
    assert!(!wizard.state().settings.calculator_allowed);
}

#[test]
fn test_template_topics_replace_selection() {
    let mut wizard = builtin_wizard();
    wizard.toggle_subtopic("number", "Standard form").unwrap();
    wizard
        .choose_template(Some("statistics-probability-review"))
        .unwrap();

    assert_eq!(wizard.tri_state("number"), Some(TriState::None));
    assert_eq!(wizard.tri_state("statistics"), Some(TriState::All));
    assert_eq!(wizard.tri_state("probability"), Some(TriState::All));
    assert_eq!(
        wizard.state().selection.selected_topics(),
        vec!["probability".to_string(), "statistics".to_string()]
    );
}

#[test]
fn test_switching_templates_replaces_sections_with_fresh_ids() {
    let mut wizard = builtin_wizard();
    wizard.choose_template(Some("higher-calculator")).unwrap();
    let first_ids: Vec<String> = wizard
        .state()
        .sections
        .sections()
        .iter()
        .map(|s| s.id.clone())
        .collect();

    wizard.choose_template(Some("algebra-quiz")).unwrap();
    let sections = wizard.state().sections.sections();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0].target_marks, 40);
    assert!(!first_ids.contains(&sections[0].id));
    assert_eq!(wizard.state().total_marks, 40);
}

#[test]
fn test_custom_after_template_only_renames() {
    let mut wizard = builtin_wizard();
    wizard.choose_template(Some("algebra-quiz")).unwrap();
    wizard.set_topic_weight("algebra", 3.0).unwrap();
    wizard.choose_template(None).unwrap();

    let state = wizard.state();
    assert_eq!(state.paper_name, "AQA GCSE Custom Paper");
    assert!(state.template_id.is_none());
    assert_eq!(state.total_marks, 40);
    assert_eq!(state.sections.len(), 1);
    assert_eq!(state.weights.get("algebra"), 3.0);
    assert_eq!(wizard.tri_state("algebra"), Some(TriState::All));
}
