//! Integration tests for layered configuration loading

use crate::integration::test_utils::with_xdg_env;
use papersmith::config::{global_config_path, ConfigLoader};
use tempfile::TempDir;

fn write(path: &std::path::Path, contents: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, contents).unwrap();
}

#[test]
fn test_defaults_without_any_files() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.exam.board, "AQA");
        assert_eq!(config.defaults.total_marks, 100);
        assert_eq!(config.defaults.time_limit, Some(90));
        assert!(config.generator.endpoint.is_none());
        assert_eq!(config.generator.request_timeout_secs, 120);
    });
}

#[test]
fn test_workspace_overrides_global() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        let global = global_config_path().unwrap();
        write(
            &global,
            r#"
[exam]
board = "OCR"
qualification = "A-Level"

[generator]
endpoint = "https://global.example.com"
"#,
        );
        write(
            &workspace.path().join("config").join("config.toml"),
            r#"
[exam]
board = "Edexcel"

[defaults]
total_marks = 60
"#,
        );

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.exam.board, "Edexcel");
        assert_eq!(config.exam.qualification, "A-Level");
        assert_eq!(config.defaults.total_marks, 60);
        assert_eq!(
            config.generator.endpoint.as_deref(),
            Some("https://global.example.com")
        );
    });
}

#[test]
fn test_environment_specific_workspace_file() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        write(
            &workspace.path().join("config").join("config.toml"),
            "[defaults]\ntotal_marks = 60\n",
        );
        write(
            &workspace.path().join("config").join("staging.toml"),
            "[defaults]\ntotal_marks = 70\n",
        );
        std::env::set_var("PAPERSMITH_ENV", "staging");

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.defaults.total_marks, 70);
    });
}

#[test]
fn test_environment_variable_override() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        write(
            &workspace.path().join("config").join("config.toml"),
            "[exam]\nboard = \"Edexcel\"\n",
        );
        std::env::set_var("PAPERSMITH__EXAM__BOARD", "WJEC");

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(config.exam.board, "WJEC");
    });
}

#[test]
fn test_workspace_catalogue_path_is_resolved_and_loaded() {
    let xdg = TempDir::new().unwrap();
    let workspace = TempDir::new().unwrap();
    with_xdg_env(&xdg, || {
        write(
            &workspace.path().join("data").join("physics.toml"),
            r#"
[[topics]]
id = "forces"
name = "Forces"
subtopics = ["Newton's laws", "Moments"]
"#,
        );
        write(
            &workspace.path().join("config").join("config.toml"),
            "catalogue_path = \"data/physics.toml\"\n",
        );

        let config = ConfigLoader::load(workspace.path()).unwrap();
        assert_eq!(
            config.catalogue_path,
            Some(workspace.path().join("data/physics.toml"))
        );
        assert!(config.validate().is_ok());
        let catalogue = config.load_catalogue().unwrap();
        assert_eq!(catalogue.len(), 1);
        assert!(catalogue.contains_subtopic("forces", "Moments"));
    });
}

#[test]
fn test_invalid_generator_endpoint_fails_validation() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("papersmith.toml");
    write(
        &config_file,
        "[generator]\nendpoint = \"papers.example.com\"\n",
    );

    let config = ConfigLoader::load_from_file(&config_file).unwrap();
    let errors = config.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].to_string().starts_with("Generator:"));
}
