//! Aggregates derived from the in-memory contributor list.
//!
//! All functions are pure and order-independent; they are recomputed from
//! scratch whenever the list changes.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::contribution::Contribution;

pub const DEFAULT_GOAL_AMOUNT: i64 = 1_000_000;
pub const DEFAULT_PER_PERSON_TARGET: i64 = 12_000;

/// Two independent constants: the overall goal, and the reference amount
/// each contributor is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FundraisingTargets {
    pub goal_amount: Decimal,
    pub per_person_target: Decimal,
}

impl Default for FundraisingTargets {
    fn default() -> Self {
        Self {
            goal_amount: Decimal::from(DEFAULT_GOAL_AMOUNT),
            per_person_target: Decimal::from(DEFAULT_PER_PERSON_TARGET),
        }
    }
}

// Totals saturate at `Decimal::MAX` instead of overflowing.
pub fn cleared_total(contributions: &[Contribution]) -> Decimal {
    contributions
        .iter()
        .filter(|c| c.cleared)
        .fold(Decimal::ZERO, |total, c| total.saturating_add(c.amount))
}

pub fn pending_total(contributions: &[Contribution]) -> Decimal {
    contributions
        .iter()
        .filter(|c| !c.cleared)
        .fold(Decimal::ZERO, |total, c| total.saturating_add(c.amount))
}

pub fn remaining_to_goal(contributions: &[Contribution], goal: Decimal) -> Decimal {
    goal
        .saturating_sub(cleared_total(contributions))
        .max(Decimal::ZERO)
}

/// Unclamped ratio of cleared money to the goal; zero when the goal is not
/// positive, `Decimal::MAX` when the ratio is too large to represent.
pub fn progress_fraction(contributions: &[Contribution], goal: Decimal) -> Decimal {
    if goal <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    cleared_total(contributions)
        .checked_div(goal)
        .unwrap_or(Decimal::MAX)
}

pub fn is_goal_complete(contributions: &[Contribution], goal: Decimal) -> bool {
    cleared_total(contributions) >= goal
}

pub fn remaining_to_target(contribution: &Contribution, target: Decimal) -> Decimal {
    target
        .saturating_sub(contribution.amount)
        .max(Decimal::ZERO)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub contributor_count: usize,
    pub cleared_total: Decimal,
    pub pending_total: Decimal,
    pub remaining: Decimal,
    pub progress_fraction: Decimal,
    /// Display percentage, clamped to 0..=100 and rounded to one place.
    pub progress_percent: Decimal,
    pub complete: bool,
}

impl Summary {
    pub fn compute(contributions: &[Contribution], targets: &FundraisingTargets) -> Self {
        let goal = targets.goal_amount;
        let fraction = progress_fraction(contributions, goal);
        let percent = fraction
            .saturating_mul(Decimal::ONE_HUNDRED)
            .clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
            .round_dp(1);

        Self {
            contributor_count: contributions.len(),
            cleared_total: cleared_total(contributions),
            pending_total: pending_total(contributions),
            remaining: remaining_to_goal(contributions, goal),
            progress_fraction: fraction,
            progress_percent: percent,
            complete: is_goal_complete(contributions, goal),
        }
    }
}
