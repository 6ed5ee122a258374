//! Integration test: loading character folders from disk
//!
//! Exercises the on-disk layout: one folder per character, each with a
//! config file, local ids assigned by folder order.

use dialogue_customizer::core::config::AssetsConfig;
use dialogue_customizer::core::{CustomizerConfig, CustomizerError, LocalId};
use dialogue_customizer::host::{DialogueSession, InMemoryHost};
use dialogue_customizer::text::load_characters;
use std::fs;
use std::path::Path;

fn write_character(root: &Path, folder: &str, body: &str) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("config.toml"), body).unwrap();
}

fn five_folders() -> AssetsConfig {
    AssetsConfig {
        config_file_name: "config.toml".into(),
        folders: ["gina", "sq", "raqio", "stella", "shigemichi"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

#[test]
fn test_one_malformed_config_among_five() {
    let root = tempfile::tempdir().unwrap();
    write_character(root.path(), "gina", "name = \"Lyra\"");
    write_character(root.path(), "sq", "name = \"Pip\"\nknown_skills = [\"dogeza\"]");
    write_character(root.path(), "raqio", "name = [unterminated");
    write_character(root.path(), "stella", "name = \"Vega\"");
    write_character(root.path(), "shigemichi", "name = \"Bram\"");

    let outcome = load_characters(root.path(), &five_folders());

    assert_eq!(outcome.store.len(), 4);
    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].folder, "raqio");
    assert_eq!(outcome.failures[0].local_id, LocalId(3));
    assert!(outcome.store.get(LocalId(3)).is_none());
    // Characters after the broken one still load with their own ids
    assert_eq!(outcome.store.get(LocalId(5)).unwrap().display_name, "Bram");
}

#[test]
fn test_skill_map_matches_loaded_records() {
    let root = tempfile::tempdir().unwrap();
    write_character(
        root.path(),
        "gina",
        "name = \"Lyra\"\nknown_skills = [\"certify\", \"dogeza\"]",
    );
    write_character(root.path(), "stella", "name = \"Vega\"");

    let outcome = load_characters(root.path(), &five_folders());

    assert_eq!(outcome.skills.len(), 2);
    assert_eq!(outcome.skills[&LocalId(1)].len(), 2);
    assert!(outcome.skills[&LocalId(4)].is_empty());
    assert_eq!(outcome.missing.len(), 3);
}

#[test]
fn test_session_from_assets_reports_failures() {
    let root = tempfile::tempdir().unwrap();
    write_character(root.path(), "gina", "name = \"Lyra\"");
    write_character(root.path(), "sq", "this is not toml");

    let (session, failures) =
        DialogueSession::from_assets(CustomizerConfig::default(), root.path()).unwrap();

    assert_eq!(failures.len(), 1);
    assert_eq!(session.store().len(), 1);

    let mut host = InMemoryHost::new();
    assert_eq!(session.on_character_data_ready(&mut host), 1);
    assert_eq!(session.names().get("Gina"), Some("Lyra"));
    assert_eq!(session.names().get("SQ"), None);
}

#[test]
fn test_invalid_config_rejected_before_loading() {
    let root = tempfile::tempdir().unwrap();
    let mut config = CustomizerConfig::default();
    config.roster.table_size = 0;

    let result = DialogueSession::from_assets(config, root.path());

    assert!(matches!(result, Err(CustomizerError::Config(_))));
}
