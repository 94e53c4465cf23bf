use log::warn;

use crate::catalog::{MonsterCatalog, NpcCatalog};
use crate::encounter::EncounterType;

// Post-processing for raw generative narration. The model's free text is an
// untrusted proposal; everything player-visible passes through here first.

/// Markers after which structured-output artifacts tend to bleed into prose.
const LEAK_MARKERS: &[&str] = &["```", "{", "}", "[", "]", "\"narration\"", "narration:"];

/// Verbs that would pre-empt the combat engine's verdict.
const RESOLUTION_VERBS: &[&str] = &[
    "defeat", "defeats", "defeated", "kill", "kills", "killed", "slay", "slays", "slain",
    "strike", "strikes", "struck", "wound", "wounds", "wounded", "destroy", "destroys",
    "destroyed", "vanquish", "vanquished", "behead", "beheaded",
];

const NEUTRAL_VERB: &str = "confronted";

const SUGGESTION_PREFIXES: &[&str] = &[
    "you could", "you might", "perhaps you", "maybe you", "do you", "will you",
    "what do you", "would you like",
];

const PLACEHOLDER_LINE: &str = "Something else stirs at the edge of your senses, unseen.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sanitized {
    pub text: String,
    /// True when sanitization would have deleted everything and the
    /// original text was returned instead.
    pub fell_back: bool,
}

fn strip_leaked_structure(text: &str) -> String {
    let cut = LEAK_MARKERS
        .iter()
        .filter_map(|marker| text.find(marker))
        .min();
    match cut {
        Some(idx) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

fn neutralize_resolution_verbs(text: &str) -> String {
    // Word splitting is per line, so a verb right after a line break is
    // still seen as its own token.
    text.lines()
        .map(neutralize_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn neutralize_line(line: &str) -> String {
    line.split(' ')
        .map(|word| {
            let core: String = word
                .chars()
                .filter(|c| c.is_alphanumeric())
                .collect::<String>()
                .to_lowercase();
            if RESOLUTION_VERBS.contains(&core.as_str()) {
                // Preserve surrounding punctuation.
                let lead: String = word.chars().take_while(|c| !c.is_alphanumeric()).collect();
                let trail: String = word
                    .chars()
                    .rev()
                    .take_while(|c| !c.is_alphanumeric())
                    .collect::<String>()
                    .chars()
                    .rev()
                    .collect();
                format!("{lead}{NEUTRAL_VERB}{trail}")
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn is_suggestion_line(line: &str) -> bool {
    let lowered = line.trim().to_lowercase();
    lowered.ends_with('?') || SUGGESTION_PREFIXES.iter().any(|p| lowered.starts_with(p))
}

fn names_competing_entity(line: &str, expected: &str) -> bool {
    let lowered = line.to_lowercase();
    let expected_lower = expected.to_lowercase();
    let competing_monster = MonsterCatalog::base_names().any(|name| {
        lowered.contains(name) && !expected_lower.contains(name)
    });
    let competing_npc = NpcCatalog::names().iter().any(|name| {
        let name_lower = name.to_lowercase();
        lowered.contains(&name_lower) && expected_lower != name_lower
    });
    competing_monster || competing_npc
}

/// Pure post-processing pass over raw narration, in order: strip leaked
/// structure, neutralize combat-resolving verbs for combat-resolved
/// encounter types, drop question/suggestion lines, and replace lines that
/// name an entity other than the expected actor. If the passes together
/// would delete all of a non-empty input, the original is returned
/// unchanged and flagged.
pub fn validate(
    raw_text: &str,
    encounter_type: EncounterType,
    expected_actor: Option<&str>,
) -> Sanitized {
    let stripped = strip_leaked_structure(raw_text);

    let verbed = if encounter_type.combat_resolved() {
        neutralize_resolution_verbs(&stripped)
    } else {
        stripped
    };

    let mut lines: Vec<String> = Vec::new();
    for line in verbed.lines() {
        if is_suggestion_line(line) {
            continue;
        }
        if let Some(expected) = expected_actor {
            if names_competing_entity(line, expected) {
                lines.push(PLACEHOLDER_LINE.to_string());
                continue;
            }
        }
        lines.push(line.to_string());
    }

    let text = lines.join("\n").trim().to_string();

    if text.is_empty() && !raw_text.trim().is_empty() {
        warn!("sanitizer deleted entire narration; returning raw text");
        return Sanitized {
            text: raw_text.to_string(),
            fell_back: true,
        };
    }

    Sanitized {
        text,
        fell_back: false,
    }
}
