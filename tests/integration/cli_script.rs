//! CLI commands driven through RunContext with scripted sessions

use papersmith::cli::{map_error, Commands, RunContext};
use papersmith::config::PapersmithConfig;
use papersmith::error::WizardError;
use std::path::PathBuf;
use tempfile::TempDir;

fn context() -> RunContext {
    RunContext::from_config(PathBuf::from("."), PapersmithConfig::default()).unwrap()
}

const CUSTOM_SCRIPT: &str = r#"
[[actions]]
action = "choose_template"

[[actions]]
action = "toggle_topic"
topic_id = "geometry"

[[actions]]
action = "toggle_subtopic"
topic_id = "geometry"
subtopic = "Vectors"

[[actions]]
action = "set_total_marks"
marks = 60

[[actions]]
action = "set_time_limit"

[[actions]]
action = "apply_starter_layout"
layout = "two_part"

[[actions]]
action = "set_setting"
setting = "include_data_booklet"
enabled = true
"#;

#[test]
fn test_build_prints_assembled_config() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.toml");
    std::fs::write(&script, CUSTOM_SCRIPT).unwrap();

    let output = context()
        .execute(&Commands::Build {
            script: script.clone(),
            output: None,
        })
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["title"], "AQA GCSE Custom Paper");
    assert_eq!(json["totalMarks"], 60);
    assert!(json.get("timeLimit").is_none());
    assert_eq!(json["selectedTopics"], serde_json::json!(["geometry"]));
    assert_eq!(
        json["selectedSubtopics"]["geometry"].as_array().unwrap().len(),
        6
    );
    assert_eq!(json["sections"].as_array().unwrap().len(), 2);
    assert_eq!(json["sections"][0]["targetMarks"], 24);
    assert_eq!(json["sections"][1]["targetMarks"], 36);
    assert_eq!(json["settings"]["includeDataBooklet"], true);
}

#[test]
fn test_build_writes_output_file() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.json");
    std::fs::write(
        &script,
        r#"{"actions": [
            {"action": "choose_template", "template_id": "algebra-quiz"},
            {"action": "set_topic_weight", "topic_id": "algebra", "weight": 1.5}
        ]}"#,
    )
    .unwrap();
    let out = temp.path().join("paper.json");

    let message = context()
        .execute(&Commands::Build {
            script,
            output: Some(out.clone()),
        })
        .unwrap();
    assert!(message.contains("paper.json"));

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(json["topicWeights"]["algebra"], 1.5);
    assert_eq!(json["timeLimit"], 45);
}

#[test]
fn test_build_reports_incomplete_step() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.toml");
    std::fs::write(&script, "[[actions]]\naction = \"choose_template\"\n").unwrap();

    let err = context()
        .execute(&Commands::Build {
            script,
            output: None,
        })
        .unwrap_err();
    assert!(matches!(err, WizardError::StepLocked { .. }));
}

#[test]
fn test_failing_script_action_is_numbered_from_one() {
    let temp = TempDir::new().unwrap();
    let script = temp.path().join("session.toml");
    std::fs::write(
        &script,
        r#"
[[actions]]
action = "add_section"

[[actions]]
action = "remove_section"
section_id = "section-9"
"#,
    )
    .unwrap();

    let err = context()
        .execute(&Commands::Build {
            script,
            output: None,
        })
        .unwrap_err();
    assert!(matches!(err, WizardError::ScriptAction { index: 1, .. }));
    assert_eq!(
        map_error(&err),
        "Script failed at action #2: Unknown section: section-9"
    );
}

#[test]
fn test_topics_and_templates_listings() {
    let ctx = context();
    let topics = ctx
        .execute(&Commands::Topics {
            search: Some("probab".to_string()),
            format: "json".to_string(),
        })
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&topics).unwrap();
    let ids: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["id"].as_str().unwrap())
        .collect();
    assert!(ids.contains(&"probability"));
    assert!(!ids.contains(&"algebra"));

    let templates = ctx
        .execute(&Commands::Templates {
            format: "text".to_string(),
        })
        .unwrap();
    assert!(templates.contains("higher-calculator"));
    assert!(templates.contains("algebra-quiz"));
}

#[test]
fn test_run_context_from_config_file() {
    let temp = TempDir::new().unwrap();
    let config_file = temp.path().join("papersmith.toml");
    std::fs::write(
        &config_file,
        "[exam]\nboard = \"OCR\"\n\n[defaults]\ntotal_marks = 50\ntime_limit = 30\n",
    )
    .unwrap();
    let ctx = RunContext::new(temp.path().to_path_buf(), Some(config_file)).unwrap();

    let wizard = ctx.new_wizard();
    assert_eq!(wizard.state().total_marks, 50);
    assert_eq!(wizard.state().time_limit, Some(30));
    assert_eq!(wizard.exam().board, "OCR");
}
