//! Rule evaluation context.

use std::collections::HashMap;

use crate::graph::TaskGraph;

/// Graph-derived data needed by tie-break rules.
///
/// Built once per run from the [`TaskGraph`]; rules only read it.
#[derive(Debug, Clone, Default)]
pub struct RuleContext {
    /// Number of direct dependents per task (task_id → count).
    pub dependent_counts: HashMap<u32, usize>,
}

impl RuleContext {
    /// Creates an empty context (every dependent count is 0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Precomputes dependent counts for every task in the graph.
    pub fn from_graph(graph: &TaskGraph<'_>) -> Self {
        let dependent_counts = graph
            .tasks()
            .iter()
            .map(|t| (t.id, graph.dependent_count(t.id)))
            .collect();
        Self { dependent_counts }
    }

    /// Sets the dependent count for a task.
    pub fn with_dependent_count(mut self, task_id: u32, count: usize) -> Self {
        self.dependent_counts.insert(task_id, count);
        self
    }

    /// Dependent count for a task (0 if unknown).
    pub fn dependent_count(&self, task_id: u32) -> usize {
        self.dependent_counts.get(&task_id).copied().unwrap_or(0)
    }
}
