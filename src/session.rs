use std::collections::HashMap;

use log::debug;

use crate::budget::estimate_cost;
use crate::specialist::Specialist;

/// One prompt/response pair in a session's history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub prompt: String,
    pub response: String,
}

/// The live conversational state bound to one specialist. Sessions are
/// never part of the persisted snapshot; a loaded game starts fresh.
#[derive(Debug, Clone)]
pub struct Session {
    pub specialist: Specialist,
    pub history: Vec<Exchange>,
    pub uses: u32,
}

impl Session {
    fn new(specialist: Specialist) -> Self {
        Session {
            specialist,
            history: Vec::new(),
            uses: 0,
        }
    }

    pub fn history_cost(&self) -> u32 {
        self.history
            .iter()
            .map(|e| estimate_cost(&e.prompt) + estimate_cost(&e.response))
            .sum()
    }

    pub fn record(&mut self, prompt: String, response: String) {
        self.history.push(Exchange { prompt, response });
        self.uses += 1;
    }
}

/// Every `GLOBAL_RESET_INTERVAL` turns the whole pool is rotated, since the
/// per-specialist exchange-cost estimates are heuristic and drift.
pub const GLOBAL_RESET_INTERVAL: u64 = 40;

/// Owns one persistent conversation per specialist role. One pool per game
/// instance; the orchestrator is the only mutator.
#[derive(Debug, Default)]
pub struct SessionPool {
    sessions: HashMap<Specialist, Session>,
    turns: u64,
}

impl SessionPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, specialist: Specialist) -> &Session {
        self.sessions
            .entry(specialist)
            .or_insert_with(|| Session::new(specialist))
    }

    pub fn record_use(&mut self, specialist: Specialist, prompt: String, response: String) {
        self.sessions
            .entry(specialist)
            .or_insert_with(|| Session::new(specialist))
            .record(prompt, response);
    }

    /// A session rotates at its usage ceiling, or earlier if its history
    /// has outgrown the share the ceiling was calibrated for.
    pub fn should_rotate(&self, specialist: Specialist) -> bool {
        self.sessions.get(&specialist).is_some_and(|s| {
            s.uses >= specialist.usage_ceiling()
                || s.history_cost() >= specialist.usage_ceiling() * specialist.exchange_cost()
        })
    }

    /// Discards the session's history and zeroes its usage counter. Facts
    /// mentioned before a rotation are gone; anything identity-critical has
    /// to be re-injected into the next prompt by the context builder.
    pub fn rotate(&mut self, specialist: Specialist) {
        debug!("rotating session for {specialist}");
        self.sessions.insert(specialist, Session::new(specialist));
    }

    pub fn reset_all(&mut self) {
        debug!("resetting all specialist sessions");
        self.sessions.clear();
        self.turns = 0;
    }

    /// Called once per committed turn. Returns true when the periodic
    /// global safety net kicked in and wiped the pool.
    pub fn tick_turn(&mut self) -> bool {
        self.turns += 1;
        if self.turns % GLOBAL_RESET_INTERVAL == 0 {
            self.sessions.clear();
            return true;
        }
        false
    }

    pub fn turns(&self) -> u64 {
        self.turns
    }

    pub fn uses(&self, specialist: Specialist) -> u32 {
        self.sessions.get(&specialist).map_or(0, |s| s.uses)
    }
}
