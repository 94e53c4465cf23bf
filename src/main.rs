use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};

use emberquest::ai::OpenAiClient;
use emberquest::character::{CharacterSheet, Class};
use emberquest::game_state::GameState;
use emberquest::orchestrator::TurnEngine;
use emberquest::save::SaveManager;
use emberquest::settings::Settings;

// Headless shell: one line of input per turn, one committed turn out.
// Rendering proper lives elsewhere; this is the smallest playable loop.
#[tokio::main]
async fn main() -> Result<()> {
    emberquest::logging::init().context("failed to install logger")?;
    let settings = Settings::load();

    let api_key = settings
        .openai_api_key
        .clone()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .context("no OpenAI API key in settings or OPENAI_API_KEY")?;

    let client = OpenAiClient::new(api_key, settings.model.clone(), settings.request_timeout_secs);

    let save_manager = SaveManager::new();
    let state = match save_manager.available_saves.first() {
        Some(name) => {
            println!("Resuming \"{name}\".");
            save_manager.load(name)?
        }
        None => {
            let character = CharacterSheet::new("Wren".to_string(), Class::Ranger);
            GameState::new("wren".to_string(), character)
        }
    };

    let mut engine = TurnEngine::new(client, state, settings.context_window);
    if engine.state.quest.is_none() {
        engine.begin_quest().await?;
    }
    if let Some(quest) = &engine.state.quest {
        println!("{} — {}", quest.location_name, quest.quest_goal);
    }

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let input = line.trim();
        if input == ":quit" {
            break;
        }

        let report = engine.take_turn(input).await?;
        println!("\n{}\n", report.narration);
        for event in &report.events {
            println!("* {event}");
        }
        if !report.suggested_actions.is_empty() {
            println!("[{}]", report.suggested_actions.join(" / "));
        }
    }

    Ok(())
}
