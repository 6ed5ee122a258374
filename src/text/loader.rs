//! Load character records from the per-character asset folders
//!
//! Folders are visited in configured order and each one's position becomes
//! its local id. A missing folder or config file is not an error; a config
//! that fails to read or parse is recorded as a failure and only that
//! character is skipped.

use crate::core::config::AssetsConfig;
use crate::core::error::CustomizerError;
use crate::core::types::{LocalId, SkillId};
use crate::text::record::{parse_character_toml, CharacterRecord};
use crate::text::store::CharacterTextStore;
use rayon::prelude::*;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::Path;
use std::time::Instant;

/// A character whose config existed but could not be loaded
#[derive(Debug)]
pub struct LoadFailure {
    pub local_id: LocalId,
    pub folder: String,
    pub error: CustomizerError,
}

/// Everything the load phase produces
#[derive(Debug, Default)]
pub struct LoadOutcome {
    pub store: CharacterTextStore,
    /// Skill sets for the skill subsystem, keyed like the store
    pub skills: BTreeMap<LocalId, BTreeSet<SkillId>>,
    pub failures: Vec<LoadFailure>,
    /// Folders that were not present on disk
    pub missing: Vec<String>,
}

enum FolderResult {
    Loaded(CharacterRecord),
    Missing(String),
    NoConfig,
    Failed(LoadFailure),
}

/// Load all character records under `assets_root`
pub fn load_characters(assets_root: &Path, assets: &AssetsConfig) -> LoadOutcome {
    let started = Instant::now();

    let slots: Vec<(LocalId, &String)> = assets
        .folders
        .iter()
        .enumerate()
        .filter_map(|(i, folder)| match LocalId::from_host(i as i32 + 1) {
            Some(id) => Some((id, folder)),
            None => {
                tracing::warn!("Folder {} exceeds the local id range, skipping", folder);
                None
            }
        })
        .collect();

    // PARALLEL: each task owns one local id
    let results: Vec<FolderResult> = slots
        .par_iter()
        .map(|&(local_id, folder)| {
            load_folder(assets_root, folder, &assets.config_file_name, local_id)
        })
        .collect();

    let mut outcome = LoadOutcome::default();
    for result in results {
        match result {
            FolderResult::Loaded(record) => {
                for (literal, replacement) in &record.nicknames {
                    tracing::debug!(
                        "Nickname loaded for {}: {} -> {}",
                        record.local_id,
                        literal,
                        replacement
                    );
                }
                outcome.store.insert(record);
            }
            FolderResult::Missing(folder) => outcome.missing.push(folder),
            FolderResult::NoConfig => {}
            FolderResult::Failed(failure) => {
                tracing::error!("Failed to load {}: {}", failure.folder, failure.error);
                outcome.failures.push(failure);
            }
        }
    }
    outcome.skills = outcome.store.skill_map();

    tracing::info!(
        "Loaded {}/{} character configs ({} failed) in {} ms",
        outcome.store.len(),
        assets.folders.len(),
        outcome.failures.len(),
        started.elapsed().as_millis()
    );

    outcome
}

fn load_folder(root: &Path, folder: &str, file_name: &str, local_id: LocalId) -> FolderResult {
    let folder_path = root.join(folder);
    if !folder_path.is_dir() {
        tracing::info!("Could not find path {}", folder_path.display());
        return FolderResult::Missing(folder.to_string());
    }

    let config_path = folder_path.join(file_name);
    if !config_path.is_file() {
        return FolderResult::NoConfig;
    }

    let parsed = fs::read_to_string(&config_path)
        .map_err(CustomizerError::from)
        .and_then(|content| parse_character_toml(&content, local_id));

    match parsed {
        Ok(record) => FolderResult::Loaded(record),
        Err(e) => FolderResult::Failed(LoadFailure {
            local_id,
            folder: folder.to_string(),
            error: CustomizerError::CharacterLoad {
                folder: folder.to_string(),
                source: Box::new(e),
            },
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_character(root: &Path, folder: &str, body: &str) {
        let dir = root.join(folder);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), body).unwrap();
    }

    fn assets(folders: &[&str]) -> AssetsConfig {
        AssetsConfig {
            config_file_name: "config.toml".into(),
            folders: folders.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_local_ids_follow_folder_order() {
        let root = tempfile::tempdir().unwrap();
        write_character(root.path(), "b", "name = \"Bee\"");
        write_character(root.path(), "c", "name = \"Cee\"");

        let outcome = load_characters(root.path(), &assets(&["a", "b", "c"]));

        // "a" is missing but still consumes local id 1
        assert_eq!(outcome.missing, vec!["a".to_string()]);
        assert_eq!(outcome.store.get(LocalId(2)).unwrap().display_name, "Bee");
        assert_eq!(outcome.store.get(LocalId(3)).unwrap().display_name, "Cee");
        assert!(outcome.store.get(LocalId(1)).is_none());
    }

    #[test]
    fn test_folder_without_config_is_skipped_silently() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir_all(root.path().join("a")).unwrap();

        let outcome = load_characters(root.path(), &assets(&["a"]));

        assert!(outcome.store.is_empty());
        assert!(outcome.failures.is_empty());
        assert!(outcome.missing.is_empty());
    }

    #[test]
    fn test_parse_failure_is_recorded() {
        let root = tempfile::tempdir().unwrap();
        write_character(root.path(), "a", "name = ");

        let outcome = load_characters(root.path(), &assets(&["a"]));

        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].local_id, LocalId(1));
        assert!(matches!(
            outcome.failures[0].error,
            CustomizerError::CharacterLoad { .. }
        ));
    }
}
