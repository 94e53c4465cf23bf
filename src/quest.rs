use log::warn;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// Quest-type taxonomy. Each type carries its own finale guidance and its
/// own completion predicate.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, Serialize, Deserialize,
)]
pub enum QuestType {
    Combat,
    Retrieval,
    Escort,
    Investigation,
    Rescue,
    Diplomatic,
}

/// Keyword classification of a quest-goal string, confined here so it can
/// be unit-tested in isolation.
pub fn classify_quest(goal: &str) -> QuestType {
    let text = goal.to_lowercase();
    let table: &[(&str, QuestType)] = &[
        ("slay", QuestType::Combat),
        ("kill", QuestType::Combat),
        ("defeat", QuestType::Combat),
        ("destroy", QuestType::Combat),
        ("hunt", QuestType::Combat),
        ("escort", QuestType::Escort),
        ("protect", QuestType::Escort),
        ("guide", QuestType::Escort),
        ("rescue", QuestType::Rescue),
        ("free", QuestType::Rescue),
        ("save", QuestType::Rescue),
        ("investigate", QuestType::Investigation),
        ("uncover", QuestType::Investigation),
        ("discover", QuestType::Investigation),
        ("solve", QuestType::Investigation),
        ("negotiate", QuestType::Diplomatic),
        ("broker", QuestType::Diplomatic),
        ("truce", QuestType::Diplomatic),
        ("peace", QuestType::Diplomatic),
        ("retrieve", QuestType::Retrieval),
        ("recover", QuestType::Retrieval),
        ("find", QuestType::Retrieval),
        ("steal", QuestType::Retrieval),
        ("fetch", QuestType::Retrieval),
    ];
    for (keyword, quest_type) in table {
        if text.contains(keyword) {
            return *quest_type;
        }
    }
    QuestType::Retrieval
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuestStage {
    NotStarted,
    Early,
    Mid,
    Finale,
    Completed,
    Overtime(u32),
    Failed,
}

/// What a turn did to the quest, surfaced to the orchestrator for logging
/// and for the commit step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestEvent {
    None,
    Completed,
    FailedOvertime,
    FailedCasualty,
}

/// Extra encounters granted past the planned total before the quest fails.
pub const OVERTIME_ALLOWANCE: u32 = 3;

const EARLY_THRESHOLD: f32 = 0.40;
const FINALE_THRESHOLD: f32 = 0.85;

const COMPLETION_VERBS: &[&str] = &[
    "take", "claim", "grab", "retrieve", "seize", "recover", "pick up", "snatch",
];
const ACQUISITION_MARKERS: &[&str] = &[
    "you claim", "you take", "you grab", "you retrieve", "you recover", "you seize",
    "now in your hands", "is yours",
];
const ARRIVAL_KEYWORDS: &[&str] = &["arrive", "arrives", "arrived", "reaches", "reached", "safely"];
const CASUALTY_KEYWORDS: &[&str] = &["dies", "dead", "slain", "corpse", "lifeless", "perishes"];
const REVELATION_KEYWORDS: &[&str] = &["uncover", "reveal", "discover", "truth", "solved", "culprit"];
const RESCUE_KEYWORDS: &[&str] = &["freed", "free", "rescued", "released", "unbound", "unchained"];
const ACCORD_KEYWORDS: &[&str] = &["agree", "agreed", "truce", "accord", "treaty", "peace"];

// Known heuristic: objective extraction and completion matching are
// lowercase substring checks against player phrasing. Approximate by
// intent; the property tests pin the expected shape.

/// Pulls the objective keyword out of a quest-goal string: the noun phrase
/// after the first article, cut at the next connective.
pub fn extract_objective(goal: &str) -> String {
    let cleaned: String = goal
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == ' ' { c } else { ' ' })
        .collect();
    let words: Vec<&str> = cleaned.split_whitespace().collect();

    let connectives = ["from", "in", "of", "at", "before", "and", "to", "for"];
    if let Some(article_pos) = words
        .iter()
        .position(|w| matches!(*w, "the" | "a" | "an"))
    {
        let tail = &words[article_pos + 1..];
        let end = tail
            .iter()
            .position(|w| connectives.contains(w))
            .unwrap_or(tail.len());
        if end > 0 {
            return tail[..end].join(" ");
        }
    }
    words.last().map(|w| w.to_string()).unwrap_or_default()
}

/// The authoritative quest lifecycle. `completed` is set only here; the
/// generative layer's claims are evidence fed into `apply_turn`, never a
/// value copied in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestProgress {
    pub location_name: String,
    pub quest_goal: String,
    pub quest_objective: String,
    pub quest_type: QuestType,
    pub current_encounter: u32,
    pub total_encounters: u32,
    pub completed: bool,
    pub failed: bool,
}

impl QuestProgress {
    pub fn new(location_name: String, quest_goal: String, total_encounters: u32) -> Self {
        let quest_type = classify_quest(&quest_goal);
        let quest_objective = extract_objective(&quest_goal);
        QuestProgress {
            location_name,
            quest_goal,
            quest_objective,
            quest_type,
            current_encounter: 0,
            total_encounters,
            completed: false,
            failed: false,
        }
    }

    pub fn stage(&self) -> QuestStage {
        if self.completed {
            return QuestStage::Completed;
        }
        if self.failed {
            return QuestStage::Failed;
        }
        if self.current_encounter == 0 {
            return QuestStage::NotStarted;
        }
        if self.current_encounter > self.total_encounters {
            let over = self.current_encounter - self.total_encounters;
            if over >= OVERTIME_ALLOWANCE {
                return QuestStage::Failed;
            }
            return QuestStage::Overtime(over);
        }
        let ratio = self.current_encounter as f32 / self.total_encounters as f32;
        if ratio < EARLY_THRESHOLD {
            QuestStage::Early
        } else if ratio < FINALE_THRESHOLD {
            QuestStage::Mid
        } else {
            QuestStage::Finale
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.stage(), QuestStage::Completed | QuestStage::Failed)
    }

    /// True when the next encounter to run is the planned final one.
    pub fn next_is_final(&self) -> bool {
        self.current_encounter + 1 >= self.total_encounters
    }

    /// Stage guidance injected as a critical prompt line each turn.
    pub fn stage_guidance(&self) -> String {
        match self.stage() {
            QuestStage::NotStarted | QuestStage::Early => {
                "Stage: opening. Establish the location and hint at the goal.".to_string()
            }
            QuestStage::Mid => {
                "Stage: rising action. Complications mount; the goal feels closer.".to_string()
            }
            QuestStage::Finale => self.finale_guidance(),
            QuestStage::Overtime(n) => format!(
                "Stage: overtime ({n} past the plan). Urgency is extreme; the chance is slipping away."
            ),
            QuestStage::Completed => "Stage: aftermath. The goal is achieved.".to_string(),
            QuestStage::Failed => "Stage: failure. The chance has passed.".to_string(),
        }
    }

    fn finale_guidance(&self) -> String {
        let tail = match self.quest_type {
            QuestType::Combat => "The designated foe stands before the player at last.",
            QuestType::Retrieval => "The sought object is within reach at last.",
            QuestType::Escort => "The destination is in sight; the charge is almost safe.",
            QuestType::Investigation => "The last pieces of the truth are at hand.",
            QuestType::Rescue => "The captive is near; their bonds can finally be broken.",
            QuestType::Diplomatic => "The parties are gathered; an accord hangs in the balance.",
        };
        format!("Stage: finale. {tail}")
    }

    /// Advances the encounter counter and reports overtime failure.
    pub fn advance_encounter(&mut self) -> QuestEvent {
        if self.is_terminal() {
            return QuestEvent::None;
        }
        self.current_encounter += 1;
        if !self.completed
            && self.current_encounter > self.total_encounters
            && self.current_encounter - self.total_encounters >= OVERTIME_ALLOWANCE
        {
            self.failed = true;
            return QuestEvent::FailedOvertime;
        }
        QuestEvent::None
    }

    /// Evaluates this turn's evidence against the quest-type completion
    /// predicate. `boss_defeated` comes from the combat engine only;
    /// `player_action` and `narrative` are the literal action and the
    /// validated narration. Completion is gated on the character being
    /// alive and is monotonic once set.
    pub fn apply_turn(
        &mut self,
        player_action: &str,
        narrative: &str,
        boss_defeated: bool,
        character_hp: i32,
    ) -> QuestEvent {
        if character_hp <= 0 {
            // Death correction: a completion flag cannot survive a dead
            // character, whatever claimed it.
            if self.completed {
                warn!("discarding quest completion: character is dead");
                self.completed = false;
            }
            return QuestEvent::None;
        }
        if self.completed || self.failed {
            return QuestEvent::None;
        }

        let action = player_action.to_lowercase();
        let narration = narrative.to_lowercase();
        let objective = self.quest_objective.as_str();

        let done = match self.quest_type {
            // Only the combat engine's boss-defeat signal counts;
            // narrative claims are ignored.
            QuestType::Combat => boss_defeated,
            QuestType::Retrieval => {
                let action_claims = !objective.is_empty()
                    && action.contains(objective)
                    && COMPLETION_VERBS.iter().any(|v| action.contains(v));
                let narration_claims = !objective.is_empty()
                    && narration.contains(objective)
                    && ACQUISITION_MARKERS.iter().any(|m| narration.contains(m));
                action_claims || narration_claims
            }
            QuestType::Escort => {
                if CASUALTY_KEYWORDS.iter().any(|k| narration.contains(k)) {
                    self.failed = true;
                    return QuestEvent::FailedCasualty;
                }
                !objective.is_empty()
                    && narration.contains(objective)
                    && ARRIVAL_KEYWORDS.iter().any(|k| narration.contains(k))
            }
            QuestType::Investigation => {
                !objective.is_empty()
                    && (action.contains(objective) || narration.contains(objective))
                    && REVELATION_KEYWORDS
                        .iter()
                        .any(|k| action.contains(k) || narration.contains(k))
            }
            QuestType::Rescue => {
                !objective.is_empty()
                    && (action.contains(objective) || narration.contains(objective))
                    && RESCUE_KEYWORDS
                        .iter()
                        .any(|k| action.contains(k) || narration.contains(k))
            }
            QuestType::Diplomatic => {
                ACCORD_KEYWORDS
                    .iter()
                    .any(|k| action.contains(k) || narration.contains(k))
                    && (objective.is_empty()
                        || action.contains(objective)
                        || narration.contains(objective))
            }
        };

        if done {
            self.completed = true;
            return QuestEvent::Completed;
        }
        QuestEvent::None
    }

    /// Failure summary shown when the overtime allowance runs out: what was
    /// attempted, how far it got, no success flag.
    pub fn failure_summary(&self) -> String {
        format!(
            "The quest \"{}\" in {} has failed after {} encounters (planned {}). \
             The moment has passed.",
            self.quest_goal, self.location_name, self.current_encounter, self.total_encounters
        )
    }
}
