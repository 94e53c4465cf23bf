use log::{debug, info, warn};
use rand::Rng;

use crate::ai::{
    EncounterProposal, LineProposal, ModelClient, NarrativeProposal, ResponseSchema,
    WorldProposal, encounter_schema, line_schema, narrative_schema, parse_proposal,
    world_schema,
};
use crate::budget::{TurnBudget, estimate_cost};
use crate::catalog::{NpcCatalog, generate_item, generate_monster};
use crate::context::build_context;
use crate::encounter::{
    EncounterRecord, EncounterType, PendingInteraction, clamp_difficulty, classify_encounter,
};
use crate::error::{AIError, AppError, GameError};
use crate::game_state::GameState;
use crate::message::MessageType;
use crate::prompt::Prompt;
use crate::quest::{QuestEvent, QuestProgress, QuestStage, QuestType};
use crate::sanitize::validate;
use crate::save::SaveManager;
use crate::session::SessionPool;
use crate::specialist::Specialist;

const MAX_INPUT_LEN: usize = 280;
const MIN_ENCOUNTERS: u32 = 3;
const MAX_ENCOUNTERS: u32 = 8;

const FALLBACK_NARRATION: &str =
    "The moment holds its breath. Nothing decisive happens, and the world waits on your next move.";

const FALLBACK_LOCATION: &str = "the Emberfall Marches";
const FALLBACK_GOAL: &str = "Recover the ember crown from the ruined keep";
const FALLBACK_TOTAL: u32 = 5;

const ATTACK_VERBS: &[&str] = &["attack", "fight", "strike", "swing", "charge", "cast", "shoot", "stab"];
const FLEE_VERBS: &[&str] = &["flee", "run", "retreat", "escape", "withdraw"];
const DISARM_VERBS: &[&str] = &["disarm", "dodge", "jump", "avoid", "careful", "step back"];
const BUY_WORDS: &[&str] = &["buy", "accept", "pay", "trade", "purchase", "deal"];
const DECLINE_WORDS: &[&str] = &["decline", "refuse", "no thanks", "walk away", "leave"];
const FAREWELL_WORDS: &[&str] = &["farewell", "goodbye", "leave", "depart", "bye"];

/// Sequencing states of one turn. Strictly sequential per player input;
/// no two turns run concurrently for one game instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingInput,
    DecidingEncounter,
    ResolvingActors,
    GeneratingNarrative,
    Validating,
    Committing,
}

/// Deterministic per-turn rewards. A pure function of its inputs; never
/// derived from generative text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rewards {
    pub xp: u32,
    pub gold: u32,
    pub hp_delta: i32,
    pub loot: bool,
}

const NO_REWARDS: Rewards = Rewards {
    xp: 0,
    gold: 0,
    hp_delta: 0,
    loot: false,
};

pub fn turn_rewards(
    encounter_type: EncounterType,
    difficulty: u8,
    level: u32,
    current_hp: i32,
) -> Rewards {
    let base_xp = difficulty as u32 * 12 + level * 3;
    match encounter_type {
        EncounterType::Combat | EncounterType::Final => Rewards {
            xp: base_xp * 2,
            gold: difficulty as u32 * 8,
            hp_delta: 0,
            loot: difficulty >= 3,
        },
        EncounterType::Trap => Rewards {
            xp: base_xp,
            gold: 0,
            // A trap never drops the character below 1 HP on its own.
            hp_delta: -((difficulty as i32 * 2).min((current_hp - 1).max(0))),
            loot: false,
        },
        EncounterType::Social => Rewards {
            xp: base_xp / 2,
            gold: difficulty as u32 * 2,
            hp_delta: 0,
            loot: false,
        },
        EncounterType::Exploration => Rewards {
            xp: base_xp,
            gold: difficulty as u32 * 3,
            hp_delta: if current_hp > 0 { 2 } else { 0 },
            loot: difficulty >= 4,
        },
        EncounterType::Puzzle | EncounterType::Stealth | EncounterType::Chase => Rewards {
            xp: base_xp + level * 2,
            gold: difficulty as u32 * 4,
            hp_delta: 0,
            loot: false,
        },
    }
}

/// What one committed turn hands back to the view layer.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub narration: String,
    pub suggested_actions: Vec<String>,
    pub events: Vec<String>,
    pub quest_stage: QuestStage,
}

/// The turn sequencer. Owns the session pool and the game state for one
/// game instance; every committed state transition flows through here.
pub struct TurnEngine<C: ModelClient> {
    client: C,
    pool: SessionPool,
    pub state: GameState,
    save_manager: SaveManager,
    window: u32,
    phase: TurnPhase,
}

impl<C: ModelClient> TurnEngine<C> {
    pub fn new(client: C, state: GameState, window: u32) -> Self {
        TurnEngine {
            client,
            pool: SessionPool::new(),
            state,
            save_manager: SaveManager::new(),
            window,
            phase: TurnPhase::AwaitingInput,
        }
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn pool(&self) -> &SessionPool {
        &self.pool
    }

    /// Test/diagnostic hook: force a session rotation.
    pub fn rotate_session(&mut self, specialist: Specialist) {
        self.pool.rotate(specialist);
    }

    pub fn reset(&mut self) {
        self.pool.reset_all();
        self.state.clear_quest();
        self.phase = TurnPhase::AwaitingInput;
    }

    /// Builds the bounded prompt, dispatches one specialist exchange, and
    /// records it against the session. Rotation happens before the call so
    /// a rotated session re-applies only its fixed instructions.
    async fn dispatch(
        &mut self,
        specialist: Specialist,
        prompt: &Prompt,
        schema: &ResponseSchema,
    ) -> Result<String, AIError> {
        if self.pool.should_rotate(specialist) {
            self.pool.rotate(specialist);
        }

        let instruction_cost = estimate_cost(specialist.instructions());
        let history_cost = self.pool.get(specialist).history_cost();
        let mut budget = TurnBudget::compute(self.window, instruction_cost, history_cost);
        if budget.is_exhausted() {
            // History has eaten the whole window; drop it and recompute.
            warn!("no prompt budget left for {specialist}; rotating session");
            self.pool.rotate(specialist);
            budget = TurnBudget::compute(self.window, instruction_cost, 0);
        }

        let mut bounded = prompt.truncate(budget.available);
        if bounded.cost() > budget.available {
            // Budget violation after truncation is an internal invariant
            // breach; fall back to must-keep content only.
            warn!(
                "prompt for {specialist} exceeds budget after truncation ({} > {})",
                bounded.cost(),
                budget.available
            );
            bounded = prompt.must_keep_only();
        }

        let body = bounded.render();
        debug!("dispatching {specialist}: {} units", estimate_cost(&body));

        let history = self.pool.get(specialist).history.clone();
        let raw = self
            .client
            .respond(specialist.instructions(), &history, &body, schema)
            .await?;

        self.pool.record_use(specialist, body, raw.clone());
        Ok(raw)
    }

    /// Optional one-line flavor from a secondary specialist. Failures are
    /// swallowed; flavor never blocks a turn.
    async fn flavor_line(&mut self, specialist: Specialist, prompt: &Prompt) -> Option<String> {
        match self.dispatch(specialist, prompt, &line_schema()).await {
            Ok(raw) => parse_proposal::<LineProposal>(&raw).ok().map(|p| p.line),
            Err(err) => {
                debug!("flavor call to {specialist} failed: {err}");
                None
            }
        }
    }

    /// Starts a fresh quest: a world proposal (with deterministic fallback)
    /// is clamped and committed as the authoritative QuestProgress.
    pub async fn begin_quest(&mut self) -> Result<(), AppError> {
        self.state.clear_quest();

        let prompt = build_context(Specialist::World, &self.state, None);
        let proposal = match self.dispatch(Specialist::World, &prompt, &world_schema()).await {
            Ok(raw) => parse_proposal::<WorldProposal>(&raw).ok(),
            Err(err) => {
                warn!("world proposal failed, using stock quest: {err}");
                None
            }
        };

        let (location, goal, total) = match proposal {
            Some(p) => {
                let total = (p.total_encounters.max(0) as u32).clamp(MIN_ENCOUNTERS, MAX_ENCOUNTERS);
                (p.location, p.quest_goal, total)
            }
            None => (
                FALLBACK_LOCATION.to_string(),
                FALLBACK_GOAL.to_string(),
                FALLBACK_TOTAL,
            ),
        };

        let quest = QuestProgress::new(location, goal, total);
        info!(
            "new quest: {:?} \"{}\" in {} ({} encounters, objective \"{}\")",
            quest.quest_type,
            quest.quest_goal,
            quest.location_name,
            quest.total_encounters,
            quest.quest_objective
        );

        if self.state.turn_log.is_empty() {
            let prompt = build_context(Specialist::Character, &self.state, None);
            if let Some(intro) = self.flavor_line(Specialist::Character, &prompt).await {
                self.state.log(MessageType::System, intro);
            }
        }
        self.state.log(
            MessageType::System,
            format!("You arrive at {}. {}", quest.location_name, quest.quest_goal),
        );
        self.state.quest = Some(quest);
        self.state.suggested_actions = self.suggest_actions();
        Ok(())
    }

    /// One player action, one committed state transition. Always reaches
    /// the commit step: a generative failure takes the fallback path
    /// instead of surfacing.
    pub async fn take_turn(&mut self, player_input: &str) -> Result<TurnReport, AppError> {
        let action: String = player_input.trim().chars().take(MAX_INPUT_LEN).collect();
        if action.is_empty() {
            return Ok(self.report("You hesitate, and the moment passes.".to_string(), vec![]));
        }

        let quest = self.state.quest.as_ref().ok_or(GameError::NoActiveQuest)?;
        if quest.is_terminal() {
            let line = if quest.completed {
                "The quest is complete. The tale here is finished."
            } else {
                "The quest has failed. The tale here is finished."
            };
            return Ok(self.report(line.to_string(), vec![]));
        }
        if !self.state.character.is_alive() {
            return Ok(self.report("You are beyond action.".to_string(), vec![]));
        }

        let prior_pending = self.state.pending.clone();
        let result = match prior_pending.clone() {
            Some(pending) => self.resolve_pending(&action, pending).await,
            None => self.run_pipeline(&action).await,
        };

        match result {
            Ok(report) => Ok(report),
            Err(err) => {
                // Fallback path: a generic line, the turn consumed, and no
                // other state mutation. The game is never left stuck.
                warn!("generative pipeline failed, committing fallback: {err}");
                self.state.pending = prior_pending;
                self.phase = TurnPhase::Committing;
                self.state.log(MessageType::Player, action);
                self.state
                    .log(MessageType::Game, FALLBACK_NARRATION.to_string());
                if self.pool.tick_turn() {
                    info!("periodic global session reset");
                }
                self.phase = TurnPhase::AwaitingInput;
                Ok(self.report(FALLBACK_NARRATION.to_string(), vec![]))
            }
        }
    }

    /// The standard pipeline: decide the encounter, resolve its actor,
    /// generate and validate narration, then commit deterministically.
    async fn run_pipeline(&mut self, action: &str) -> Result<TurnReport, AIError> {
        self.phase = TurnPhase::DecidingEncounter;
        let forced_final = self
            .state
            .quest
            .as_ref()
            .is_some_and(|q| q.next_is_final());

        let (encounter_type, difficulty) = self.decide_encounter(forced_final).await?;

        self.phase = TurnPhase::ResolvingActors;
        let quest_type = self
            .state
            .quest
            .as_ref()
            .map(|q| q.quest_type)
            .unwrap_or(QuestType::Retrieval);
        let mut rng = rand::rng();
        let new_pending = self.resolve_actor(encounter_type, difficulty, quest_type, &mut rng);

        // The actor identity must be fixed before narrative generation, so
        // the hook is installed now and rolled back by the caller on error.
        self.state.pending = new_pending;
        let actor = self.state.active_actor();

        let actor_flavor = match &self.state.pending {
            Some(PendingInteraction::MonsterEngagement { .. }) => {
                let prompt = build_context(Specialist::MonsterDescriptor, &self.state, None);
                self.flavor_line(Specialist::MonsterDescriptor, &prompt).await
            }
            Some(PendingInteraction::Conversation { .. }) => {
                let prompt = build_context(Specialist::Npc, &self.state, Some(action));
                self.flavor_line(Specialist::Npc, &prompt).await
            }
            _ => None,
        };

        self.phase = TurnPhase::GeneratingNarrative;
        let prompt = build_context(Specialist::Narrative, &self.state, Some(action));
        let raw = self
            .dispatch(Specialist::Narrative, &prompt, &narrative_schema())
            .await?;
        let narration = parse_proposal::<NarrativeProposal>(&raw)?.narration;

        self.phase = TurnPhase::Validating;
        // A finale outside a combat quest has no combat verdict to guard.
        let sanitize_type = if encounter_type == EncounterType::Final
            && quest_type != QuestType::Combat
        {
            EncounterType::Exploration
        } else {
            encounter_type
        };
        let sanitized = validate(&narration, sanitize_type, actor.as_deref());
        if sanitized.fell_back {
            warn!("sanitizer fell back to raw narration this turn");
        }

        let mut narration = sanitized.text;
        if let Some(flavor) = actor_flavor {
            let flavored = validate(&flavor, sanitize_type, actor.as_deref());
            if !flavored.fell_back && !flavored.text.is_empty() {
                narration.push('\n');
                narration.push_str(&flavored.text);
            }
        }

        let rewards = turn_rewards(
            encounter_type,
            difficulty,
            self.state.character.level,
            self.state.character.hp,
        );

        Ok(self
            .commit(action, narration, encounter_type, difficulty, rewards, false)
            .await)
    }

    /// Step 1 of the pipeline: the generative proposal, then the
    /// deterministic override. `Final` is never taken from the proposal.
    async fn decide_encounter(
        &mut self,
        forced_final: bool,
    ) -> Result<(EncounterType, u8), AIError> {
        let prompt = build_context(Specialist::Encounter, &self.state, None);
        let raw = self
            .dispatch(Specialist::Encounter, &prompt, &encounter_schema())
            .await?;
        let proposal: EncounterProposal = parse_proposal(&raw)?;

        let mut encounter_type = classify_encounter(&proposal.encounter_type);
        let difficulty = clamp_difficulty(proposal.difficulty);

        if forced_final {
            // Quest mechanics trump the proposal: the planned last
            // encounter is always the quest's terminal type.
            debug!("overriding proposed {encounter_type} with Final");
            encounter_type = EncounterType::Final;
        }

        Ok((encounter_type, difficulty))
    }

    /// Step 2: table-driven actor resolution. Monster and NPC identity is
    /// fixed here, deterministically, never by the generative layer.
    fn resolve_actor(
        &self,
        encounter_type: EncounterType,
        difficulty: u8,
        quest_type: QuestType,
        rng: &mut impl Rng,
    ) -> Option<PendingInteraction> {
        match encounter_type {
            EncounterType::Combat => Some(PendingInteraction::MonsterEngagement {
                monster: generate_monster(rng, difficulty, self.state.character.level),
                boss: false,
            }),
            EncounterType::Final if quest_type == QuestType::Combat => {
                // The designated boss: top difficulty regardless of proposal.
                Some(PendingInteraction::MonsterEngagement {
                    monster: generate_monster(rng, 5, self.state.character.level),
                    boss: true,
                })
            }
            EncounterType::Social => Some(PendingInteraction::Conversation {
                npc: NpcCatalog::random_entry(rng).to_string(),
            }),
            EncounterType::Trap => Some(PendingInteraction::Trap {
                description: "a pressure plate half-hidden under dust".to_string(),
            }),
            EncounterType::Exploration if rng.random_range(0..4) == 0 => {
                let item = generate_item(rng);
                let price = item.value;
                Some(PendingInteraction::Transaction { item, price })
            }
            _ => None,
        }
    }

    /// Resolves the active interaction hook with deterministic rules. The
    /// generative layer contributes flavor only.
    async fn resolve_pending(
        &mut self,
        action: &str,
        pending: PendingInteraction,
    ) -> Result<TurnReport, AIError> {
        let lowered = action.to_lowercase();
        match pending {
            PendingInteraction::MonsterEngagement { monster, boss } => {
                if ATTACK_VERBS.iter().any(|v| lowered.contains(v)) {
                    let mut rng = rand::rng();
                    let outcome =
                        crate::combat::resolve_combat(&mut self.state.character, &monster, &mut rng);
                    let mut narration = outcome.log.join("\n");
                    self.state.pending = None;

                    if outcome.victory {
                        let rewards = turn_rewards(
                            EncounterType::Combat,
                            monster.difficulty,
                            self.state.character.level,
                            self.state.character.hp,
                        );
                        let boss_defeated = boss;
                        return Ok(self
                            .commit_resolution(action, narration, rewards, boss_defeated)
                            .await);
                    }

                    if !self.state.character.is_alive() {
                        narration.push_str("\nDarkness takes you.");
                    }
                    return Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await);
                }
                if FLEE_VERBS.iter().any(|v| lowered.contains(v)) {
                    self.state.pending = None;
                    self.state.character.apply_damage(monster.difficulty as u32);
                    let narration = format!(
                        "You break away from the {} and put distance behind you.",
                        monster.name
                    );
                    return Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await);
                }
                let narration = format!("The {} blocks your path, waiting.", monster.name);
                Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await)
            }
            PendingInteraction::Trap { description } => {
                self.state.pending = None;
                let mut rng = rand::rng();
                if DISARM_VERBS.iter().any(|v| lowered.contains(v))
                    && crate::combat::roll_die(&mut rng, 20) + self.state.character.level > 8
                {
                    let rewards = turn_rewards(
                        EncounterType::Trap,
                        1,
                        self.state.character.level,
                        self.state.character.hp,
                    );
                    let narration =
                        format!("You ease past {description}. The mechanism stays silent.");
                    let safe = Rewards { hp_delta: 0, ..rewards };
                    return Ok(self.commit_resolution(action, narration, safe, false).await);
                }
                let rewards = turn_rewards(
                    EncounterType::Trap,
                    3,
                    self.state.character.level,
                    self.state.character.hp,
                );
                let narration = format!("{description} gives way under you. Pain follows.");
                Ok(self.commit_resolution(action, narration, rewards, false).await)
            }
            PendingInteraction::Transaction { item, price } => {
                if BUY_WORDS.iter().any(|w| lowered.contains(w)) {
                    if self.state.character.gold >= price {
                        self.state.character.gold -= price;
                        let item_prompt = {
                            let mut p = Prompt::new();
                            p.critical(format!("Item: {}", item.name));
                            p
                        };
                        let flavor = self.flavor_line(Specialist::Items, &item_prompt).await;
                        let mut narration =
                            format!("The peddler hands over the {} for {price} gold.", item.name);
                        if let Some(line) = flavor {
                            narration.push('\n');
                            narration.push_str(&line);
                        }
                        self.state.character.add_item(item);
                        self.state.pending = None;
                        return Ok(self
                            .commit_resolution(action, narration, NO_REWARDS, false)
                            .await);
                    }
                    let narration = "You come up short of coin, and the peddler shrugs.".to_string();
                    self.state.pending = None;
                    return Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await);
                }
                if DECLINE_WORDS.iter().any(|w| lowered.contains(w)) {
                    self.state.pending = None;
                    let narration = "You wave the offer away.".to_string();
                    return Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await);
                }
                let narration = format!(
                    "The peddler holds out the {} expectantly: {price} gold.",
                    item.name
                );
                Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await)
            }
            PendingInteraction::Conversation { npc } => {
                if FAREWELL_WORDS.iter().any(|w| lowered.contains(w)) {
                    self.state.pending = None;
                    let narration = format!("{npc} nods and turns back to their business.");
                    return Ok(self.commit_resolution(action, narration, NO_REWARDS, false).await);
                }
                let prompt = build_context(Specialist::Npc, &self.state, Some(action));
                let reply = self
                    .flavor_line(Specialist::Npc, &prompt)
                    .await
                    .unwrap_or_else(|| format!("{npc} considers you in silence."));
                let sanitized = validate(&reply, EncounterType::Social, Some(&npc));
                Ok(self
                    .commit_resolution(action, sanitized.text, NO_REWARDS, false)
                    .await)
            }
        }
    }

    /// Shared commit for the standard pipeline: records the encounter,
    /// applies rewards and quest transitions, logs, and persists.
    async fn commit(
        &mut self,
        action: &str,
        narration: String,
        encounter_type: EncounterType,
        difficulty: u8,
        rewards: Rewards,
        boss_defeated: bool,
    ) -> TurnReport {
        self.phase = TurnPhase::Committing;

        let mut events = Vec::new();

        if let Some(quest) = self.state.quest.as_mut() {
            let index = quest.current_encounter + 1;
            self.state.encounters.push(EncounterRecord {
                encounter_type,
                difficulty,
                index,
            });
            if quest.advance_encounter() == QuestEvent::FailedOvertime {
                events.push(quest.failure_summary());
            }
        }

        self.apply_rewards_and_quest(action, &narration, rewards, boss_defeated, &mut events)
            .await;

        self.finish_commit(action, narration, events)
    }

    /// Commit for turns that resolve an existing hook (no new encounter is
    /// recorded; the encounter counter does not advance).
    async fn commit_resolution(
        &mut self,
        action: &str,
        narration: String,
        rewards: Rewards,
        boss_defeated: bool,
    ) -> TurnReport {
        self.phase = TurnPhase::Committing;
        let mut events = Vec::new();
        self.apply_rewards_and_quest(action, &narration, rewards, boss_defeated, &mut events)
            .await;
        self.finish_commit(action, narration, events)
    }

    async fn apply_rewards_and_quest(
        &mut self,
        action: &str,
        narration: &str,
        rewards: Rewards,
        boss_defeated: bool,
        events: &mut Vec<String>,
    ) {
        let character = &mut self.state.character;
        character.gold += rewards.gold;
        if rewards.hp_delta < 0 {
            character.apply_damage((-rewards.hp_delta) as u32);
        } else if rewards.hp_delta > 0 {
            character.heal(rewards.hp_delta as u32);
        }

        if rewards.loot {
            let mut rng = rand::rng();
            let item = generate_item(&mut rng);
            events.push(format!("Found: {}.", item.name));
            character.add_item(item);
        }

        let levels_gained = character.gain_xp(rewards.xp);
        if levels_gained > 0 {
            let level = self.state.character.level;
            events.push(format!("You reach level {level}."));
            let prompt = build_context(Specialist::Abilities, &self.state, None);
            let ability = self
                .flavor_line(Specialist::Abilities, &prompt)
                .await
                .unwrap_or_else(|| "Hard-Won Instinct".to_string());
            events.push(format!("New ability: {ability}."));
            self.state.character.abilities.push(ability);
        }

        let hp = self.state.character.hp;
        if let Some(quest) = self.state.quest.as_mut() {
            match quest.apply_turn(action, narration, boss_defeated, hp) {
                QuestEvent::Completed => {
                    events.push(format!("Quest complete: {}.", quest.quest_goal));
                }
                QuestEvent::FailedCasualty => {
                    events.push(quest.failure_summary());
                }
                QuestEvent::FailedOvertime => {
                    events.push(quest.failure_summary());
                }
                QuestEvent::None => {}
            }
        }
    }

    fn finish_commit(
        &mut self,
        action: &str,
        narration: String,
        events: Vec<String>,
    ) -> TurnReport {
        self.state.log(MessageType::Player, action.to_string());
        self.state.log(MessageType::Game, narration.clone());
        for event in &events {
            self.state.log(MessageType::System, event.clone());
        }

        self.state.suggested_actions = self.suggest_actions();

        if self.pool.tick_turn() {
            info!("periodic global session reset");
        }

        // Persistence failure is a warning, never a halt.
        let _ = self.save_manager.save(&self.state);

        self.phase = TurnPhase::AwaitingInput;
        self.report(narration, events)
    }

    fn report(&self, narration: String, events: Vec<String>) -> TurnReport {
        TurnReport {
            narration,
            suggested_actions: self.state.suggested_actions.clone(),
            events,
            quest_stage: self
                .state
                .quest
                .as_ref()
                .map(|q| q.stage())
                .unwrap_or(QuestStage::NotStarted),
        }
    }

    /// Suggested next actions travel on their own structured channel,
    /// never inside the narration.
    fn suggest_actions(&self) -> Vec<String> {
        match &self.state.pending {
            Some(PendingInteraction::MonsterEngagement { monster, .. }) => vec![
                format!("Attack the {}", monster.name),
                "Flee".to_string(),
            ],
            Some(PendingInteraction::Trap { .. }) => vec![
                "Disarm the trap".to_string(),
                "Step back carefully".to_string(),
            ],
            Some(PendingInteraction::Transaction { item, .. }) => vec![
                format!("Buy the {}", item.name),
                "Decline".to_string(),
            ],
            Some(PendingInteraction::Conversation { npc }) => vec![
                format!("Ask {npc} about the quest"),
                "Say farewell".to_string(),
            ],
            None => vec![
                "Press on".to_string(),
                "Survey the area".to_string(),
                "Rest a moment".to_string(),
            ],
        }
    }
}
