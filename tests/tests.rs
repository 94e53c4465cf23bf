use emberquest::budget::{compute_available, estimate_cost};
use emberquest::catalog::{ItemCatalog, MonsterCatalog, generate_item, generate_monster};
use emberquest::character::{CharacterSheet, Class};
use emberquest::context::build_context;
use emberquest::encounter::{EncounterType, PendingInteraction, classify_encounter, clamp_difficulty};
use emberquest::error::{AIError, AppError, GameError};
use emberquest::game_state::GameState;
use emberquest::message::{Message, MessageType};
use emberquest::orchestrator::turn_rewards;
use emberquest::prompt::Prompt;
use emberquest::quest::{
    QuestEvent, QuestProgress, QuestStage, QuestType, classify_quest, extract_objective,
};
use emberquest::sanitize::validate;
use emberquest::save::SaveManager;
use emberquest::session::{GLOBAL_RESET_INTERVAL, SessionPool};
use emberquest::specialist::Specialist;

fn line_costs(p: &Prompt) -> u32 {
    p.lines().iter().map(|l| estimate_cost(&l.text)).sum()
}

fn sample_prompt() -> Prompt {
    let mut p = Prompt::new();
    p.critical("Stage: finale. The sought object is within reach at last.");
    p.droppable("Combat encounters so far: 3");
    p.action("The player's action: grab the amulet");
    p.droppable("Exploration encounters so far: 2");
    p.identity("Active presence (use this exact name): armored goblin");
    p.droppable("The adventurer: Wren, level 3 Ranger, 20/24 HP.");
    p
}

#[test]
fn estimate_cost_is_monotonic_in_length() {
    assert_eq!(estimate_cost(""), 0);
    assert!(estimate_cost("abcd") <= estimate_cost("abcdefgh"));
    assert_eq!(estimate_cost("abcd"), 1);
    assert_eq!(estimate_cost("abcde"), 2);
}

#[test]
fn compute_available_fails_closed() {
    assert_eq!(compute_available(1000, 400, 300, 200, 50), 50);
    assert_eq!(compute_available(1000, 900, 300, 200, 50), 0);
    assert_eq!(compute_available(100, 5000, 0, 0, 0), 0);
}

#[test]
fn truncation_is_idempotent() {
    let prompt = sample_prompt();
    for budget in [0, 5, 10, 20, 40, 100, 10_000] {
        let once = prompt.truncate(budget);
        let twice = once.truncate(budget);
        assert_eq!(once, twice, "truncate not idempotent at budget {budget}");
    }
}

#[test]
fn truncation_respects_budget_when_must_keep_fits() {
    let prompt = sample_prompt();
    let must_keep: u32 = prompt
        .lines()
        .iter()
        .filter(|l| l.priority.must_keep())
        .map(|l| estimate_cost(&l.text))
        .sum();

    for budget in [must_keep, must_keep + 3, must_keep + 50] {
        let cut = prompt.truncate(budget);
        assert!(line_costs(&cut) <= budget);
        // Every must-keep line survives.
        assert!(cut.contains("Stage: finale"));
        assert!(cut.contains("grab the amulet"));
        assert!(cut.contains("armored goblin"));
    }
}

#[test]
fn truncation_drops_droppable_lines_first() {
    let prompt = sample_prompt();
    let must_keep: u32 = prompt
        .lines()
        .iter()
        .filter(|l| l.priority.must_keep())
        .map(|l| estimate_cost(&l.text))
        .sum();
    let cut = prompt.truncate(must_keep);
    assert_eq!(cut.lines().len(), 3);
    assert!(!cut.contains("encounters so far"));
}

#[test]
fn truncation_overflow_keeps_strict_priority_order() {
    let prompt = sample_prompt();
    // Budget for the critical line only.
    let critical_cost = estimate_cost("Stage: finale. The sought object is within reach at last.");
    let cut = prompt.truncate(critical_cost);
    assert!(cut.contains("Stage: finale"));
    assert!(!cut.contains("armored goblin"));
    assert!(!cut.contains("encounters so far"));
}

#[test]
fn sanitizer_replaces_resolution_verbs_in_combat_only() {
    let combat = validate("You killed the goblin", EncounterType::Combat, None);
    assert!(!combat.text.contains("killed"));
    assert!(combat.text.contains("goblin"));

    let exploration = validate("You killed the goblin", EncounterType::Exploration, None);
    assert_eq!(exploration.text, "You killed the goblin");
}

#[test]
fn sanitizer_neutralizes_verbs_across_line_breaks() {
    let raw = "With one blow you\nkilled the goblin where it stood.\n\nYou strike again.";
    let out = validate(raw, EncounterType::Combat, None);
    assert!(!out.text.contains("killed"));
    assert!(!out.text.contains("strike"));
    assert!(out.text.contains("confronted"));
    // Paragraph structure survives the pass.
    assert!(out.text.contains('\n'));
}

#[test]
fn sanitizer_strips_leaked_structure() {
    let out = validate(
        "The door creaks open. {\"narration\": \"leak\"}",
        EncounterType::Exploration,
        None,
    );
    assert_eq!(out.text, "The door creaks open.");
}

#[test]
fn sanitizer_drops_question_and_suggestion_lines() {
    let raw = "The hall is silent.\nWhat do you do next?\nYou could try the stairs.";
    let out = validate(raw, EncounterType::Exploration, None);
    assert_eq!(out.text, "The hall is silent.");
}

#[test]
fn sanitizer_replaces_competing_entity_lines() {
    let raw = "The armored goblin snarls.\nA troll lumbers out of the dark.";
    let out = validate(raw, EncounterType::Combat, Some("armored goblin"));
    assert!(out.text.contains("goblin"));
    assert!(!out.text.contains("troll"));
    assert!(out.text.lines().count() == 2);
}

#[test]
fn sanitizer_fails_safe_on_full_deletion() {
    // Every line is a question, so sanitization would delete everything.
    let raw = "What do you do?\nWill you run?";
    let out = validate(raw, EncounterType::Exploration, None);
    assert!(out.fell_back);
    assert_eq!(out.text, raw);
}

#[test]
fn objective_extraction_takes_phrase_after_article() {
    assert_eq!(extract_objective("Retrieve the ancient amulet"), "ancient amulet");
    assert_eq!(
        extract_objective("Recover the ember crown from the ruined keep"),
        "ember crown"
    );
    assert_eq!(extract_objective("Find a lost heirloom"), "lost heirloom");
}

#[test]
fn quest_goal_classification() {
    assert_eq!(classify_quest("Slay the wyvern tyrant"), QuestType::Combat);
    assert_eq!(classify_quest("Retrieve the ancient amulet"), QuestType::Retrieval);
    assert_eq!(classify_quest("Escort the merchant caravan"), QuestType::Escort);
    assert_eq!(classify_quest("Uncover the truth of the fire"), QuestType::Investigation);
    assert_eq!(classify_quest("Rescue the miller's daughter"), QuestType::Rescue);
    assert_eq!(classify_quest("Broker peace between the clans"), QuestType::Diplomatic);
    assert_eq!(classify_quest("Wander aimlessly"), QuestType::Retrieval);
}

#[test]
fn retrieval_quest_keyword_gate() {
    let mut quest = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    );
    assert_eq!(quest.quest_objective, "ancient amulet");

    // Action with verb and objective completes.
    let event = quest.apply_turn("grab the ancient amulet", "", false, 10);
    assert_eq!(event, QuestEvent::Completed);
    assert!(quest.completed);

    // Action without either does not.
    let mut quest2 = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    );
    quest2.apply_turn("look at the pedestal", "", false, 10);
    assert!(!quest2.completed);

    // Narrative acquisition phrasing alone completes.
    let mut quest3 = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    );
    quest3.apply_turn("wait", "you claim the ancient amulet", false, 10);
    assert!(quest3.completed);
}

#[test]
fn combat_quest_ignores_narrative_claims() {
    let mut quest = QuestProgress::new(
        "the Ashen Peak".to_string(),
        "Slay the wyvern tyrant".to_string(),
        5,
    );
    quest.apply_turn(
        "finish it",
        "you have defeated the wyvern tyrant and the quest is complete",
        false,
        10,
    );
    assert!(!quest.completed);

    // Only the combat engine's signal counts.
    let event = quest.apply_turn("", "", true, 10);
    assert_eq!(event, QuestEvent::Completed);
}

#[test]
fn quest_completion_is_monotonic() {
    let mut quest = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    );
    quest.apply_turn("grab the ancient amulet", "", false, 10);
    assert!(quest.completed);

    for _ in 0..5 {
        quest.apply_turn("look around", "nothing happens", false, 10);
        assert!(quest.completed);
    }
}

#[test]
fn quest_completion_discarded_while_dead() {
    let mut quest = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    );
    // Completion signal while dead is discarded.
    quest.apply_turn("grab the ancient amulet", "", false, 0);
    assert!(!quest.completed);

    // The death correction also clears an already-set flag.
    quest.apply_turn("grab the ancient amulet", "", false, 10);
    assert!(quest.completed);
    quest.apply_turn("", "", false, -2);
    assert!(!quest.completed);
}

#[test]
fn escort_casualty_fails_the_quest() {
    let mut quest = QuestProgress::new(
        "the King's Road".to_string(),
        "Escort the merchant caravan".to_string(),
        5,
    );
    assert_eq!(quest.quest_type, QuestType::Escort);
    let event = quest.apply_turn(
        "press on",
        "a guard lies dead beside the merchant caravan",
        false,
        10,
    );
    assert_eq!(event, QuestEvent::FailedCasualty);
    assert_eq!(quest.stage(), QuestStage::Failed);
}

#[test]
fn escort_arrival_completes() {
    let mut quest = QuestProgress::new(
        "the King's Road".to_string(),
        "Escort the merchant caravan".to_string(),
        5,
    );
    let event = quest.apply_turn(
        "press on",
        "the merchant caravan finally arrives, safely within the city walls",
        false,
        10,
    );
    assert_eq!(event, QuestEvent::Completed);
}

#[test]
fn overtime_failure_boundary() {
    let mut quest = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    );
    for _ in 0..7 {
        quest.advance_encounter();
    }
    assert_eq!(quest.current_encounter, 7);
    assert_eq!(quest.stage(), QuestStage::Overtime(2));

    let event = quest.advance_encounter();
    assert_eq!(quest.current_encounter, 8);
    assert_eq!(event, QuestEvent::FailedOvertime);
    assert_eq!(quest.stage(), QuestStage::Failed);
}

#[test]
fn quest_stage_thresholds() {
    let mut quest = QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        10,
    );
    assert_eq!(quest.stage(), QuestStage::NotStarted);
    quest.advance_encounter();
    assert_eq!(quest.stage(), QuestStage::Early); // 1/10
    for _ in 0..3 {
        quest.advance_encounter();
    }
    assert_eq!(quest.stage(), QuestStage::Mid); // 4/10
    for _ in 0..5 {
        quest.advance_encounter();
    }
    assert_eq!(quest.stage(), QuestStage::Finale); // 9/10
}

#[test]
fn encounter_classification_is_closed() {
    assert_eq!(classify_encounter("a fierce combat"), EncounterType::Combat);
    assert_eq!(classify_encounter("sneak past"), EncounterType::Stealth);
    assert_eq!(classify_encounter("riddle of the door"), EncounterType::Puzzle);
    // Unknown text falls back; "final" is never produced from a proposal.
    assert_eq!(classify_encounter("final"), EncounterType::Exploration);
    assert_eq!(classify_encounter("gibberish"), EncounterType::Exploration);
    assert_eq!(clamp_difficulty(99), 5);
    assert_eq!(clamp_difficulty(-4), 1);
}

#[test]
fn rewards_are_pure_and_never_lethal() {
    let a = turn_rewards(EncounterType::Combat, 3, 2, 20);
    let b = turn_rewards(EncounterType::Combat, 3, 2, 20);
    assert_eq!(a, b);
    assert!(a.xp > 0);

    // A trap at 3 HP cannot bring the character below 1.
    let trap = turn_rewards(EncounterType::Trap, 5, 1, 3);
    assert!(trap.hp_delta >= -2);
}

#[test]
fn affixed_monster_stats_stay_positive() {
    let mut rng = rand::rng();
    for difficulty in 1..=5u8 {
        let monster = generate_monster(&mut rng, difficulty, 3);
        assert!(monster.hp > 0);
        assert!(monster.attack > 0);
        assert!(monster.defense > 0);
        assert!(monster.name.contains(&monster.base_name));
        assert!(MonsterCatalog::lookup(&monster.base_name).is_some());
    }
}

#[test]
fn affixed_item_generation() {
    let mut rng = rand::rng();
    for _ in 0..20 {
        let item = generate_item(&mut rng);
        assert!(item.power >= 1);
        assert!(item.value > 0);
    }
}

#[test]
fn catalog_lookup_is_case_insensitive() {
    assert!(MonsterCatalog::lookup("Goblin").is_some());
    assert!(MonsterCatalog::lookup("no such beast").is_none());
    assert!(ItemCatalog::lookup("Shortsword").is_some());
}

#[test]
fn error_messages_carry_their_payload() {
    let err = AppError::from(AIError::ResponseParseError("boom".to_string()));
    assert_eq!(err.to_string(), "AI error: Failed to parse model response: boom");

    let err = AppError::from(GameError::NoActiveQuest);
    assert_eq!(err.to_string(), "Game error: No active quest");
}

#[test]
fn message_roundtrips_through_json() {
    let message = Message::new(MessageType::Game, "The hall is silent.".to_string());
    let serialized = serde_json::to_string(&message).unwrap();
    let loaded: Message = serde_json::from_str(&serialized).unwrap();
    assert_eq!(loaded.content, "The hall is silent.");
    assert_eq!(loaded.message_type, MessageType::Game);
    assert_eq!(loaded.timestamp, message.timestamp);
}

#[test]
fn logger_installs_behind_the_facade() {
    let installed = emberquest::logging::init();
    assert!(installed.is_ok());
    log::warn!("logger smoke line");
}

#[test]
fn save_roundtrip_and_delete() {
    let character = CharacterSheet::new("Wren".to_string(), Class::Ranger);
    let state = GameState::new("roundtrip-probe".to_string(), character);

    let mut manager = SaveManager::new();
    manager.save(&state).unwrap();
    assert!(manager.available_saves.iter().any(|s| s == "roundtrip-probe"));

    let loaded = manager.load("roundtrip-probe").unwrap();
    assert_eq!(loaded.save_name, "roundtrip-probe");
    assert_eq!(loaded.character.name, "Wren");

    manager.delete_save("roundtrip-probe").unwrap();
    assert!(!manager.available_saves.iter().any(|s| s == "roundtrip-probe"));
}

#[test]
fn character_levels_up_from_xp() {
    let mut character = CharacterSheet::new("Wren".to_string(), Class::Ranger);
    let before_hp = character.max_hp;
    let gained = character.gain_xp(100);
    assert_eq!(gained, 1);
    assert_eq!(character.level, 2);
    assert!(character.max_hp > before_hp);
    assert_eq!(character.hp, character.max_hp);
}

#[test]
fn session_rotates_at_usage_ceiling() {
    let mut pool = SessionPool::new();
    let ceiling = Specialist::Narrative.usage_ceiling();
    for _ in 0..ceiling {
        pool.record_use(Specialist::Narrative, "p".to_string(), "r".to_string());
    }
    assert!(pool.should_rotate(Specialist::Narrative));

    pool.rotate(Specialist::Narrative);
    assert!(!pool.should_rotate(Specialist::Narrative));
    assert_eq!(pool.uses(Specialist::Narrative), 0);
}

#[test]
fn pool_wipes_on_global_reset_interval() {
    let mut pool = SessionPool::new();
    pool.record_use(Specialist::World, "p".to_string(), "r".to_string());
    for turn in 1..GLOBAL_RESET_INTERVAL {
        assert!(!pool.tick_turn(), "early wipe at turn {turn}");
    }
    assert!(pool.tick_turn());
    assert_eq!(pool.uses(Specialist::World), 0);
}

#[test]
fn narrative_context_reinjects_identity_facts() {
    let character = CharacterSheet::new("Wren".to_string(), Class::Ranger);
    let mut state = GameState::new("test".to_string(), character);
    state.quest = Some(QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    ));
    let mut rng = rand::rng();
    let monster = generate_monster(&mut rng, 2, 1);
    state.pending = Some(PendingInteraction::MonsterEngagement {
        monster: monster.clone(),
        boss: false,
    });

    // The narrative slice carries the exact actor name and the quest facts
    // every single turn; nothing identity-critical relies on history.
    let prompt = build_context(Specialist::Narrative, &state, Some("attack it"));
    assert!(prompt.contains(&monster.name));
    assert!(prompt.contains("Retrieve the ancient amulet"));
    assert!(prompt.contains("attack it"));
}

#[test]
fn context_slices_are_minimal() {
    let character = CharacterSheet::new("Wren".to_string(), Class::Ranger);
    let mut state = GameState::new("test".to_string(), character);
    state.quest = Some(QuestProgress::new(
        "the Sunken Crypt".to_string(),
        "Retrieve the ancient amulet".to_string(),
        5,
    ));

    // The encounter specialist sees counts and the goal, never vitals.
    let prompt = build_context(Specialist::Encounter, &state, None);
    assert!(prompt.contains("Retrieve the ancient amulet"));
    assert!(!prompt.contains("HP"));
    assert!(!prompt.contains("Wren"));

    // The abilities specialist sees class and level only.
    let prompt = build_context(Specialist::Abilities, &state, None);
    assert!(prompt.contains("Ranger"));
    assert!(!prompt.contains("Sunken Crypt"));
}
