use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use uuid::Uuid;

use crate::character::CharacterSheet;
use crate::encounter::{EncounterRecord, EncounterType, PendingInteraction};
use crate::message::{Message, MessageType};
use crate::quest::QuestProgress;

/// The single owning aggregate for one game instance. Specialist sessions
/// are deliberately absent: they are not part of the persisted snapshot and
/// a loaded game starts with empty histories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: String,
    pub save_name: String,
    pub character: CharacterSheet,
    pub quest: Option<QuestProgress>,
    pub pending: Option<PendingInteraction>,
    pub encounters: Vec<EncounterRecord>,
    pub turn_log: Vec<Message>,
    pub suggested_actions: Vec<String>,
}

impl GameState {
    pub fn new(save_name: String, character: CharacterSheet) -> Self {
        GameState {
            id: Uuid::new_v4().to_string(),
            save_name,
            character,
            quest: None,
            pending: None,
            encounters: Vec::new(),
            turn_log: Vec::new(),
            suggested_actions: Vec::new(),
        }
    }

    pub fn log(&mut self, message_type: MessageType, content: String) {
        self.turn_log.push(Message::new(message_type, content));
    }

    /// Aggregate per-type counts for the encounter specialist's slice.
    pub fn encounter_type_counts(&self) -> Vec<(EncounterType, u32)> {
        let mut counts: HashMap<EncounterType, u32> = HashMap::new();
        for record in &self.encounters {
            *counts.entry(record.encounter_type).or_insert(0) += 1;
        }
        EncounterType::iter()
            .filter_map(|t| counts.get(&t).map(|c| (t, *c)))
            .collect()
    }

    /// The exact identity string of the active actor, if any. Re-injected
    /// into narrative prompts every turn.
    pub fn active_actor(&self) -> Option<String> {
        match &self.pending {
            Some(PendingInteraction::MonsterEngagement { monster, .. }) => {
                Some(monster.name.clone())
            }
            Some(PendingInteraction::Conversation { npc }) => Some(npc.clone()),
            _ => None,
        }
    }

    /// Clears quest-scoped transient state (used on quest end and reset).
    pub fn clear_quest(&mut self) {
        self.quest = None;
        self.pending = None;
        self.encounters.clear();
        self.suggested_actions.clear();
    }
}
