// tests/config.rs

use std::fs;
use std::io::Write;

use is_it_ready::config::{
    ConfigSource, catalogue, catalogue_entry, default_task_definitions, find_config_file,
    load_from_path, merge_with_catalogue, resolve_config, validate_raw_config,
};
use is_it_ready::errors::ReadyError;
use is_it_ready::parsers::{self, ParserRegistry};
use is_it_ready::types::RunOptions;
use tempfile::{NamedTempFile, tempdir};

fn write_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn loads_tasks_in_file_order() {
    let file = write_config(
        r#"
watch_ignore = ["dist/**"]

[[task]]
tool = "Vitest"
command = "npm test"

[[task]]
tool = "ESLint"
command = "npm run lint"
loose_command = "npm run lint -- --quiet"
fix_command = "npm run lint -- --fix"
label = "Lint"
"#,
    );

    let raw = load_from_path(file.path()).unwrap();
    validate_raw_config(&raw).unwrap();
    let tasks = merge_with_catalogue(&raw, &ParserRegistry::with_defaults()).unwrap();

    assert_eq!(raw.watch_ignore, Some(vec!["dist/**".to_string()]));
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].label, "Tests");
    assert_eq!(tasks[0].tool, parsers::VITEST);
    assert_eq!(tasks[1].label, "Lint");
    assert_eq!(tasks[1].loose_command.as_deref(), Some("npm run lint -- --quiet"));
    assert_eq!(tasks[1].fix_command.as_deref(), Some("npm run lint -- --fix"));
}

#[test]
fn merged_tasks_get_the_catalogue_parser() {
    let file = write_config(
        r#"
[[task]]
tool = "ESLint"
command = "npm run lint"
"#,
    );
    let raw = load_from_path(file.path()).unwrap();
    let tasks = merge_with_catalogue(&raw, &ParserRegistry::with_defaults()).unwrap();

    let parsed = tasks[0]
        .classify("✖ 1 problem (1 error, 0 warnings)")
        .expect("eslint parser bound");
    assert_eq!(parsed.errors, Some(1));
}

#[test]
fn unknown_tool_is_rejected() {
    let file = write_config(
        r#"
[[task]]
tool = "Rubocop"
command = "rubocop"
"#,
    );
    let raw = load_from_path(file.path()).unwrap();

    match validate_raw_config(&raw) {
        Err(ReadyError::UnknownTool(tool)) => assert_eq!(tool, "Rubocop"),
        other => panic!("expected UnknownTool, got {other:?}"),
    }
}

#[test]
fn empty_command_is_rejected() {
    let file = write_config(
        r#"
[[task]]
tool = "Knip"
command = "  "
"#,
    );
    let raw = load_from_path(file.path()).unwrap();

    match validate_raw_config(&raw) {
        Err(ReadyError::ConfigError(msg)) => {
            assert!(msg.contains("Knip"));
            assert!(msg.contains("command"));
        }
        other => panic!("expected ConfigError, got {other:?}"),
    }
}

#[test]
fn config_without_tasks_is_rejected() {
    let file = write_config("watch_ignore = []\n");
    let raw = load_from_path(file.path()).unwrap();

    assert!(matches!(
        validate_raw_config(&raw),
        Err(ReadyError::ConfigError(_))
    ));
}

#[test]
fn invalid_watch_ignore_is_rejected() {
    let file = write_config(
        r#"
watch_ignore = ["src/[oops"]

[[task]]
tool = "Vitest"
command = "npm test"
"#,
    );
    let raw = load_from_path(file.path()).unwrap();

    assert!(matches!(
        validate_raw_config(&raw),
        Err(ReadyError::ConfigError(_))
    ));
}

#[test]
fn malformed_toml_is_a_toml_error() {
    let file = write_config("[[task]\ntool = ");
    assert!(matches!(
        load_from_path(file.path()),
        Err(ReadyError::TomlError(_))
    ));
}

#[test]
fn blank_variants_fall_back_to_base_command() {
    let file = write_config(
        r#"
[[task]]
tool = "Prettier"
command = "npx prettier --check ."
fix_command = ""
"#,
    );
    let raw = load_from_path(file.path()).unwrap();
    let tasks = merge_with_catalogue(&raw, &ParserRegistry::with_defaults()).unwrap();

    assert_eq!(tasks[0].fix_command, None);
}

#[test]
fn defaults_used_when_no_file_exists() {
    let dir = tempdir().unwrap();
    let registry = ParserRegistry::with_defaults();

    let resolved = resolve_config(&RunOptions::default(), dir.path(), &registry).unwrap();

    assert_eq!(resolved.source, ConfigSource::Defaults);
    let labels: Vec<&str> = resolved.tasks.iter().map(|t| t.label.as_str()).collect();
    assert_eq!(
        labels,
        vec![
            "Formatting",
            "Linting",
            "MD Linting",
            "Spell Checking",
            "Type Checking",
            "Tests",
            "Inventory",
            "Package Health",
        ]
    );
    assert!(resolved.tasks.iter().all(|t| t.parser.is_some()));
}

#[test]
fn project_file_is_discovered() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("is-it-ready.toml");
    fs::write(&path, "[[task]]\ntool = \"Vitest\"\ncommand = \"npm test\"\n").unwrap();

    assert_eq!(find_config_file(dir.path()), Some(path.clone()));

    let resolved = resolve_config(
        &RunOptions::default(),
        dir.path(),
        &ParserRegistry::with_defaults(),
    )
    .unwrap();
    assert_eq!(resolved.source, ConfigSource::File(path));
    assert_eq!(resolved.tasks.len(), 1);
}

#[test]
fn hidden_file_wins_over_plain_name() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("is-it-ready.toml"), "").unwrap();
    fs::write(dir.path().join(".is-it-ready.toml"), "").unwrap();

    assert_eq!(
        find_config_file(dir.path()),
        Some(dir.path().join(".is-it-ready.toml"))
    );
}

#[test]
fn missing_explicit_config_is_an_error() {
    let dir = tempdir().unwrap();
    let options = RunOptions {
        config_path: Some("nope.toml".into()),
        ..RunOptions::default()
    };

    assert!(matches!(
        resolve_config(&options, dir.path(), &ParserRegistry::with_defaults()),
        Err(ReadyError::ConfigError(_))
    ));
}

#[test]
fn catalogue_covers_every_parser() {
    let registry = ParserRegistry::with_defaults();
    for entry in catalogue() {
        assert!(registry.has(entry.tool), "{} has no parser", entry.tool);
    }
    assert!(!catalogue_entry(parsers::NPM_OUTDATED).unwrap().enabled_by_default);
    assert_eq!(default_task_definitions(&registry).len(), 8);
}
