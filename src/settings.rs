use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, Write};

// Define a structure to hold application settings with serialization and deserialization capabilities.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub openai_api_key: Option<String>, // Optional API key for OpenAI services.
    pub model: String,                  // Model served to every specialist.
    pub context_window: u32,            // Shared window size, in cost units.
    pub request_timeout_secs: u64,      // Bounded wait for one generative call.
    pub debug_mode: bool,               // Flag to enable or disable debug mode.
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            openai_api_key: None, // No API key by default.
            model: "gpt-4o-mini".to_string(),
            context_window: 16_000,
            request_timeout_secs: 60,
            debug_mode: false,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    // Load settings from the default file path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_settings_from_file("./data/settings.json").unwrap_or_default()
    }

    pub fn save(&self) -> io::Result<()> {
        std::fs::create_dir_all("./data")?; // Ensure the data directory exists.
        self.save_to_file("./data/settings.json")
    }

    pub fn load_settings_from_file(path: &str) -> io::Result<Self> {
        let data = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&data)?;
        Ok(settings)
    }

    pub fn save_to_file(&self, path: &str) -> io::Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        if let Some(parent) = std::path::Path::new(path).parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = fs::File::create(path)?;
        file.write_all(data.as_bytes())?;
        Ok(())
    }
}
