use crate::game_state::GameState;
use crate::prompt::Prompt;
use crate::specialist::Specialist;

// Context tiering: each specialist gets a disjoint, minimal slice of the
// game state. No specialist ever sees the whole aggregate; this is what
// keeps every prompt small no matter how long the game runs.
//
// Identity-critical facts (quest goal, active actor name) are written into
// the prompt fresh every turn. Session history may be rotated away at any
// moment, so nothing load-bearing is ever left to the transcript.

pub fn build_context(
    specialist: Specialist,
    state: &GameState,
    player_action: Option<&str>,
) -> Prompt {
    let mut prompt = Prompt::new();
    match specialist {
        Specialist::World => {
            prompt.critical("Propose a new location and quest for the adventurer.");
            prompt.droppable(format!(
                "The adventurer is a level {} {}.",
                state.character.level, state.character.class
            ));
        }
        Specialist::Encounter => {
            if let Some(quest) = &state.quest {
                prompt.critical(format!("Quest goal: {}", quest.quest_goal));
                prompt.critical(format!(
                    "Encounter {} of {}.",
                    quest.current_encounter + 1,
                    quest.total_encounters
                ));
            }
            for (encounter_type, count) in state.encounter_type_counts() {
                prompt.droppable(format!("{encounter_type} encounters so far: {count}"));
            }
            prompt.critical("Propose the next encounter type and difficulty.");
        }
        Specialist::Narrative => {
            if let Some(quest) = &state.quest {
                prompt.critical(format!("Location: {}", quest.location_name));
                prompt.critical(quest.stage_guidance());
                prompt.droppable(format!("Quest goal: {}", quest.quest_goal));
            }
            prompt.droppable(format!(
                "The adventurer: {}, level {} {}, {}/{} HP.",
                state.character.name,
                state.character.level,
                state.character.class,
                state.character.hp,
                state.character.max_hp
            ));
            if let Some(actor) = state.active_actor() {
                prompt.identity(format!("Active presence (use this exact name): {actor}"));
            }
            if let Some(action) = player_action {
                prompt.action(format!("The player's action: {action}"));
            }
        }
        Specialist::Character => {
            prompt.critical(format!(
                "Introduce {}, a level {} {}.",
                state.character.name, state.character.level, state.character.class
            ));
        }
        Specialist::Items => {
            if let Some(action) = player_action {
                prompt.critical(format!("Item: {action}"));
            }
        }
        Specialist::Abilities => {
            prompt.critical(format!(
                "Class: {}. New level: {}.",
                state.character.class, state.character.level
            ));
        }
        Specialist::MonsterDescriptor => {
            if let Some(actor) = state.active_actor() {
                prompt.identity(format!("Monster name (use exactly): {actor}"));
            }
        }
        Specialist::Npc => {
            if let Some(actor) = state.active_actor() {
                prompt.identity(format!("NPC name (use exactly): {actor}"));
            }
            if let Some(quest) = &state.quest {
                prompt.droppable(format!("Quest goal: {}", quest.quest_goal));
            }
            if let Some(action) = player_action {
                prompt.action(format!("The player says: {action}"));
            }
        }
    }
    prompt
}
