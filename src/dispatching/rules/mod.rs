//! Built-in tie-break rules.
//!
//! # Rules
//!
//! - **MostFollowingTasks**: prefer tasks that unlock the most direct dependents.
//! - **LongestTime**: prefer tasks with the greatest duration.
//!
//! Rules are plain data so the enabled set can be stored, serialized and
//! compared. Serialized names are `"mostFollowingTasks"` and `"longestTime"`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{RuleContext, RuleMetric};
use crate::models::Task;

/// A secondary assignment rule used to break ties between eligible tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TieBreakRule {
    /// Highest number of direct dependents first.
    ///
    /// Keeps the precedence graph opening up, so later stations have
    /// more choice.
    MostFollowingTasks,
    /// Longest duration first.
    ///
    /// Places bulky tasks while stations still have room for them.
    LongestTime,
}

impl TieBreakRule {
    /// Every recognized rule, in canonical order.
    pub const ALL: [TieBreakRule; 2] = [TieBreakRule::MostFollowingTasks, TieBreakRule::LongestTime];

    /// Identifier used in configuration (`mostFollowingTasks`, `longestTime`).
    pub fn name(&self) -> &'static str {
        match self {
            TieBreakRule::MostFollowingTasks => "mostFollowingTasks",
            TieBreakRule::LongestTime => "longestTime",
        }
    }

    /// Human-readable rule description.
    pub fn description(&self) -> &'static str {
        match self {
            TieBreakRule::MostFollowingTasks => "most following tasks",
            TieBreakRule::LongestTime => "longest time",
        }
    }

    /// Evaluates a task. Higher metric = preferred.
    pub fn evaluate(&self, task: &Task, context: &RuleContext) -> RuleMetric {
        match self {
            TieBreakRule::MostFollowingTasks => context.dependent_count(task.id) as f64,
            TieBreakRule::LongestTime => task.duration,
        }
    }

    /// Justification fragment naming the rule and its winning metric,
    /// e.g. `most following tasks (2)` or `longest time (45s)`.
    pub fn justify(&self, metric: RuleMetric) -> String {
        match self {
            TieBreakRule::MostFollowingTasks => format!("{} ({})", self.description(), metric),
            TieBreakRule::LongestTime => format!("{} ({}s)", self.description(), metric),
        }
    }

    /// Parses a configuration identifier.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

impl fmt::Display for TieBreakRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
