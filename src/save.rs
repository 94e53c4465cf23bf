use std::fs::{File, create_dir_all, read_dir, remove_file, write};
use std::path::Path;

use log::warn;

use crate::error::AppError;
use crate::game_state::GameState;

pub const SAVE_DIR: &str = "./data/save";

// Saves hold the GameState snapshot only. Specialist sessions are never
// written out; a loaded game always starts with empty histories.
#[derive(Debug, Default)]
pub struct SaveManager {
    pub available_saves: Vec<String>,
}

impl SaveManager {
    pub fn new() -> Self {
        Self {
            available_saves: Self::scan_save_files(),
        }
    }

    pub fn scan_save_files() -> Vec<String> {
        let save_dir = Path::new(SAVE_DIR);
        if !save_dir.exists() {
            return Vec::new();
        }

        read_dir(save_dir)
            .map(|entries| {
                entries
                    .filter_map(|entry| {
                        let path = entry.ok()?.path();
                        if path.is_file() && path.extension()? == "json" {
                            path.file_stem()?.to_str().map(String::from)
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn load(&self, save_name: &str) -> Result<GameState, AppError> {
        let path = format!("{SAVE_DIR}/{save_name}.json");
        let file = File::open(path)?;
        let state: GameState = serde_json::from_reader(file)?;
        Ok(state)
    }

    /// Persists the snapshot. An I/O failure is reported and logged but
    /// must never halt the game; the caller keeps playing unpersisted.
    pub fn save(&mut self, state: &GameState) -> Result<(), AppError> {
        let result = (|| -> Result<(), AppError> {
            create_dir_all(SAVE_DIR)?;
            let save_path = format!("{SAVE_DIR}/{}.json", state.save_name);
            let serialized = serde_json::to_string_pretty(state)?;
            write(save_path, serialized)?;
            Ok(())
        })();
        if let Err(err) = &result {
            warn!("failed to save game \"{}\": {err}", state.save_name);
        } else {
            self.available_saves = Self::scan_save_files();
        }
        result
    }

    pub fn delete_save(&mut self, save_name: &str) -> Result<(), AppError> {
        let path = format!("{SAVE_DIR}/{save_name}.json");
        remove_file(path)?;
        self.available_saves = Self::scan_save_files();
        Ok(())
    }
}
