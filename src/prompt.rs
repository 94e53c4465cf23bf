use crate::budget::estimate_cost;

// Priority-tagged line model for prompt bodies. Must-keep lines survive
// truncation in strict priority order; droppable lines are added greedily
// in their original order while the budget lasts.

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LinePriority {
    /// Critical stage markers (quest stage guidance, forced-encounter flags).
    Critical,
    /// The player's literal action for this turn.
    Action,
    /// Active monster/NPC identity. Re-injected every turn, never recalled
    /// from session history.
    Identity,
    /// Summaries, counts, flavor. First to go.
    Droppable,
}

impl LinePriority {
    pub fn must_keep(&self) -> bool {
        !matches!(self, LinePriority::Droppable)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptLine {
    pub priority: LinePriority,
    pub text: String,
}

/// A prompt body under construction. Lines keep their insertion order;
/// rendering joins them with newlines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Prompt {
    lines: Vec<PromptLine>,
}

impl Prompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, priority: LinePriority, text: impl Into<String>) {
        self.lines.push(PromptLine {
            priority,
            text: text.into(),
        });
    }

    pub fn critical(&mut self, text: impl Into<String>) {
        self.push(LinePriority::Critical, text);
    }

    pub fn action(&mut self, text: impl Into<String>) {
        self.push(LinePriority::Action, text);
    }

    pub fn identity(&mut self, text: impl Into<String>) {
        self.push(LinePriority::Identity, text);
    }

    pub fn droppable(&mut self, text: impl Into<String>) {
        self.push(LinePriority::Droppable, text);
    }

    pub fn lines(&self) -> &[PromptLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn render(&self) -> String {
        self.lines
            .iter()
            .map(|l| l.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn cost(&self) -> u32 {
        estimate_cost(&self.render())
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }

    /// Emergency form: every droppable line removed, budget ignored.
    pub fn must_keep_only(&self) -> Prompt {
        Prompt {
            lines: self
                .lines
                .iter()
                .filter(|l| l.priority.must_keep())
                .cloned()
                .collect(),
        }
    }

    /// Deterministic, idempotent truncation to `max_units`.
    ///
    /// Keep all must-keep lines when they fit together. When even those
    /// exceed the budget, keep them by strict priority (Critical, then
    /// Action, then Identity), cutting within a class in insertion order.
    /// Any leftover budget is spent on droppable lines in original order.
    pub fn truncate(&self, max_units: u32) -> Prompt {
        let mut kept = vec![false; self.lines.len()];
        let mut spent: u32 = 0;

        let must_keep_cost: u32 = self
            .lines
            .iter()
            .filter(|l| l.priority.must_keep())
            .map(|l| estimate_cost(&l.text))
            .sum();

        if must_keep_cost > max_units {
            // Emergency path: must-keep lines alone overflow the budget.
            for class in [
                LinePriority::Critical,
                LinePriority::Action,
                LinePriority::Identity,
            ] {
                for (i, line) in self.lines.iter().enumerate() {
                    if line.priority != class {
                        continue;
                    }
                    let cost = estimate_cost(&line.text);
                    if spent + cost <= max_units {
                        kept[i] = true;
                        spent += cost;
                    }
                }
            }
        } else {
            for (i, line) in self.lines.iter().enumerate() {
                if line.priority.must_keep() {
                    kept[i] = true;
                }
            }
            spent = must_keep_cost;
            for (i, line) in self.lines.iter().enumerate() {
                if line.priority.must_keep() {
                    continue;
                }
                let cost = estimate_cost(&line.text);
                if spent + cost <= max_units {
                    kept[i] = true;
                    spent += cost;
                }
            }
        }

        Prompt {
            lines: self
                .lines
                .iter()
                .zip(kept)
                .filter_map(|(line, keep)| keep.then(|| line.clone()))
                .collect(),
        }
    }
}
