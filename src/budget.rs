// Token budget arithmetic. Costs are approximate units (roughly one unit
// per four characters); the only requirement is that the estimate never
// undercounts so badly that a prompt slips past the shared window.

/// Fixed divisor approximation: ceil(chars / 4).
pub fn estimate_cost(text: &str) -> u32 {
    (text.chars().count() as u32).div_ceil(4)
}

/// Units left for a new prompt once fixed costs are accounted for.
/// Fails closed: returns 0 whenever the fixed costs exceed the window.
pub fn compute_available(
    window_size: u32,
    instruction_cost: u32,
    history_cost: u32,
    reserved_response: u32,
    safety_margin: u32,
) -> u32 {
    window_size
        .saturating_sub(instruction_cost)
        .saturating_sub(history_cost)
        .saturating_sub(reserved_response)
        .saturating_sub(safety_margin)
}

/// Ephemeral per-call allowance, computed fresh each time a specialist is
/// about to be prompted. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnBudget {
    pub available: u32,
}

pub const RESERVED_RESPONSE: u32 = 1_500;
pub const SAFETY_MARGIN: u32 = 512;

impl TurnBudget {
    pub fn compute(window_size: u32, instruction_cost: u32, history_cost: u32) -> Self {
        TurnBudget {
            available: compute_available(
                window_size,
                instruction_cost,
                history_cost,
                RESERVED_RESPONSE,
                SAFETY_MARGIN,
            ),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.available == 0
    }
}
