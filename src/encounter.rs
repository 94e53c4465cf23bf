use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::catalog::{AffixedItem, AffixedMonster};

/// Closed taxonomy of encounter types. `Final` is reserved: the orchestrator
/// assigns it when the quest's encounter counter reaches its planned total,
/// and the generative layer may never propose it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum EncounterType {
    Combat,
    Social,
    Exploration,
    Puzzle,
    Trap,
    Stealth,
    Chase,
    Final,
}

impl EncounterType {
    /// Types whose resolution belongs to the deterministic combat engine;
    /// the sanitizer strips outcome-claiming verbs from their narration.
    pub fn combat_resolved(&self) -> bool {
        matches!(self, EncounterType::Combat | EncounterType::Final)
    }
}

/// Keyword classification of a free-text type proposal, confined here so it
/// can be unit-tested in isolation. `Final` is never produced.
pub fn classify_encounter(proposal: &str) -> EncounterType {
    let text = proposal.to_lowercase();
    let table: &[(&str, EncounterType)] = &[
        ("combat", EncounterType::Combat),
        ("fight", EncounterType::Combat),
        ("battle", EncounterType::Combat),
        ("social", EncounterType::Social),
        ("conversation", EncounterType::Social),
        ("dialogue", EncounterType::Social),
        ("puzzle", EncounterType::Puzzle),
        ("riddle", EncounterType::Puzzle),
        ("trap", EncounterType::Trap),
        ("stealth", EncounterType::Stealth),
        ("sneak", EncounterType::Stealth),
        ("chase", EncounterType::Chase),
        ("pursuit", EncounterType::Chase),
        ("exploration", EncounterType::Exploration),
        ("explore", EncounterType::Exploration),
    ];
    for (keyword, encounter_type) in table {
        if text.contains(keyword) {
            return *encounter_type;
        }
    }
    EncounterType::Exploration
}

pub fn clamp_difficulty(proposed: i64) -> u8 {
    proposed.clamp(1, 5) as u8
}

/// One resolved encounter, as recorded in the game log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncounterRecord {
    pub encounter_type: EncounterType,
    pub difficulty: u8,
    pub index: u32,
}

/// Short-lived flags gating which player inputs are currently legal.
/// Created by the orchestrator when a turn produces a hook; cleared by the
/// handler that resolves it or by quest reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PendingInteraction {
    MonsterEngagement { monster: AffixedMonster, boss: bool },
    Trap { description: String },
    Transaction { item: AffixedItem, price: u32 },
    Conversation { npc: String },
}
