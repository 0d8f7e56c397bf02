//! End-to-end wizard sessions driven through the public API

use crate::integration::test_utils::builtin_wizard;
use papersmith::error::WizardError;
use papersmith::sections::{AllocationStatus, QuestionType, SectionPatch, StarterLayout};
use papersmith::selection::TriState;
use papersmith::settings::{DifficultyDistribution, SettingToggle};
use papersmith::wizard::{WizardAction, WizardStep};

#[test]
fn test_custom_paper_full_flow() {
    let mut wizard = builtin_wizard();
    wizard.choose_template(None).unwrap();
    assert_eq!(wizard.state().paper_name, "AQA GCSE Custom Paper");
    wizard.next().unwrap();

    // Topics gate is closed until something is selected
    assert!(!wizard.can_proceed());
    assert!(matches!(wizard.next(), Err(WizardError::StepLocked { .. })));
    wizard.toggle_subtopic("algebra", "Sequences").unwrap();
    wizard.toggle_subtopic("geometry", "Vectors").unwrap();
    assert_eq!(wizard.tri_state("algebra"), Some(TriState::Partial));
    wizard.next().unwrap();

    assert_eq!(wizard.step(), WizardStep::Config);
    wizard.set_total_marks(80);
    let a = wizard.add_section();
    let b = wizard.add_section();
    let c = wizard.add_section();
    wizard.auto_distribute_marks();
    let marks: Vec<u32> = wizard
        .state()
        .sections
        .sections()
        .iter()
        .map(|s| s.target_marks)
        .collect();
    assert_eq!(marks, vec![27, 27, 26]);

    wizard.move_section(&c, 0).unwrap();
    let ids: Vec<&str> = wizard
        .state()
        .sections
        .sections()
        .iter()
        .map(|s| s.id.as_str())
        .collect();
    assert_eq!(ids, vec![c.as_str(), a.as_str(), b.as_str()]);
    wizard.next().unwrap();

    wizard.set_setting(SettingToggle::ExamConditions, true);
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Preview);

    let config = wizard.assemble();
    assert_eq!(config.title, "AQA GCSE Custom Paper");
    assert_eq!(config.total_marks, 80);
    assert_eq!(config.selected_topics, vec!["algebra", "geometry"]);
    assert_eq!(config.sections[0].id, c);
    assert_eq!(config.sections[0].order, 0);
    assert!(config.settings.exam_conditions);
    assert!(config.topic_weights.is_none());
}

#[test]
fn test_backwards_navigation_always_allowed() {
    let mut wizard = builtin_wizard();
    wizard.choose_template(Some("algebra-quiz")).unwrap();
    wizard.go_to_step(WizardStep::Topics).unwrap();
    wizard.go_to_step(WizardStep::Config).unwrap();

    wizard.deselect_all_topics();
    wizard.go_to_step(WizardStep::Template).unwrap();
    assert_eq!(wizard.step(), WizardStep::Template);
}

#[test]
fn test_cannot_skip_ahead_more_than_one_step() {
    let mut wizard = builtin_wizard();
    wizard.choose_template(Some("foundation-non-calculator")).unwrap();
    wizard.select_all_topics();
    let err = wizard.go_to_step(WizardStep::Settings).unwrap_err();
    assert!(matches!(
        err,
        WizardError::StepLocked {
            from: WizardStep::Template,
            to: WizardStep::Settings
        }
    ));
}

#[test]
fn test_config_gate_needs_sections_and_marks() {
    let mut wizard = builtin_wizard();
    wizard.toggle_topic("number").unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Config);
    assert!(!wizard.can_proceed());

    let id = wizard.add_section();
    assert!(wizard.can_proceed());
    wizard.set_total_marks(0);
    assert!(!wizard.can_proceed());
    wizard.set_total_marks(50);
    wizard.remove_section(&id).unwrap();
    assert!(!wizard.can_proceed());
}

#[test]
fn test_mark_mismatch_is_advisory() {
    let mut wizard = builtin_wizard();
    wizard.toggle_topic("ratio").unwrap();
    wizard.next().unwrap();
    wizard.next().unwrap();
    let id = wizard.add_section();
    wizard
        .update_section(
            &id,
            SectionPatch {
                target_marks: Some(140),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(
        wizard.state().sections.allocation_status(wizard.state().total_marks),
        AllocationStatus::Over(40)
    );
    wizard.next().unwrap();
    wizard.set_difficulty(DifficultyDistribution {
        easy: 10,
        medium: 10,
        hard: 10,
    });
    wizard.next().unwrap();
    assert_eq!(wizard.step(), WizardStep::Preview);
    assert_eq!(wizard.assemble().difficulty_distribution.total(), 30);
}

#[test]
fn test_starter_layout_then_edit() {
    let mut wizard = builtin_wizard();
    wizard.set_total_marks(80);
    wizard
        .apply_starter_layout(StarterLayout::ThreePart)
        .unwrap();
    let sections = wizard.state().sections.sections().to_vec();
    assert_eq!(
        sections.iter().map(|s| s.target_marks).collect::<Vec<_>>(),
        vec![16, 40, 24]
    );
    assert!(matches!(
        wizard.apply_starter_layout(StarterLayout::Single),
        Err(WizardError::SectionsNotEmpty)
    ));

    let present = wizard
        .toggle_question_type(&sections[0].id, QuestionType::MultipleChoice)
        .unwrap();
    assert!(!present);
    assert!(wizard.state().sections.sections()[0]
        .question_types
        .is_empty());
    let present = wizard
        .toggle_question_type(&sections[0].id, QuestionType::Calculation)
        .unwrap();
    assert!(present);
}

#[test]
fn test_dispatch_applies_actions_in_order() {
    let mut wizard = builtin_wizard();
    let actions = vec![
        WizardAction::ChooseTemplate { template_id: None },
        WizardAction::Next,
        WizardAction::ToggleTopic {
            topic_id: "probability".to_string(),
        },
        WizardAction::SetTopicWeight {
            topic_id: "probability".to_string(),
            weight: 2.3,
        },
        WizardAction::Next,
        WizardAction::AddSection,
        WizardAction::AddSection,
        WizardAction::AutoDistributeMarks,
        WizardAction::Next,
        WizardAction::Next,
    ];
    for action in actions {
        wizard.dispatch(action).unwrap();
    }
    assert_eq!(wizard.step(), WizardStep::Preview);
    let config = wizard.assemble();
    assert_eq!(config.topic_weights.unwrap()["probability"], 2.5);
    assert_eq!(
        config.sections.iter().map(|s| s.target_marks).sum::<u32>(),
        100
    );
}

#[test]
fn test_unknown_ids_are_rejected() {
    let mut wizard = builtin_wizard();
    assert!(matches!(
        wizard.toggle_subtopic("algebra", "Calculus"),
        Err(WizardError::UnknownSubtopic { .. })
    ));
    assert!(matches!(
        wizard.toggle_topic("chemistry"),
        Err(WizardError::UnknownTopic(_))
    ));
    assert!(matches!(
        wizard.remove_section("section-99"),
        Err(WizardError::UnknownSection(_))
    ));
    assert!(matches!(
        wizard.choose_template(Some("nope")),
        Err(WizardError::UnknownTemplate(_))
    ));
    assert!(wizard.state().selection.is_empty());
}
