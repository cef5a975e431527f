//! Infeasibility diagnosis.
//!
//! Produced when the scheduler stops making progress. For every task left
//! unassigned it lists what blocks it:
//! - precedences that reference tasks which do not exist,
//! - precedences that exist but were never assigned,
//! - a duration larger than the cycle time (fits no station).
//!
//! The diagnosis is informational; nothing is repaired.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

use crate::graph::TaskGraph;

/// Why the line could not be balanced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfeasibleDiagnosis {
    /// Cycle time of the failed run (seconds).
    pub cycle_time: f64,
    /// Tasks assigned before the run stalled.
    pub assigned_count: usize,
    /// Total number of tasks.
    pub task_count: usize,
    /// One entry per unassigned task, in input order.
    pub tasks: Vec<TaskDiagnosis>,
    /// A precedence cycle, if the graph has one (task IDs in dependency order).
    pub cycle: Option<Vec<u32>>,
}

/// Blocking reasons for one unassigned task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDiagnosis {
    /// Task ID.
    pub task_id: u32,
    /// Task name.
    pub task_name: String,
    /// Task duration (seconds).
    pub duration: f64,
    /// Precedence IDs with no matching task.
    pub invalid_precedences: Vec<u32>,
    /// Existing precedences that are still unassigned.
    pub unmet_precedences: Vec<u32>,
    /// Whether the duration exceeds the cycle time.
    pub task_too_big: bool,
}

impl TaskDiagnosis {
    /// Whether any blocking reason was found for this task.
    pub fn is_blocked(&self) -> bool {
        !self.invalid_precedences.is_empty() || !self.unmet_precedences.is_empty() || self.task_too_big
    }
}

impl InfeasibleDiagnosis {
    /// Inspects every unassigned task against the final assignment state.
    pub fn diagnose(graph: &TaskGraph<'_>, assigned: &HashSet<u32>, cycle_time: f64) -> Self {
        let tasks = graph
            .unassigned(assigned)
            .into_iter()
            .map(|task| {
                let (invalid, existing): (Vec<u32>, Vec<u32>) =
                    task.precedences.iter().partition(|&&p| !graph.contains(p));
                TaskDiagnosis {
                    task_id: task.id,
                    task_name: task.name.clone(),
                    duration: task.duration,
                    invalid_precedences: invalid,
                    unmet_precedences: existing
                        .into_iter()
                        .filter(|p| !assigned.contains(p))
                        .collect(),
                    task_too_big: task.duration > cycle_time,
                }
            })
            .collect();

        Self {
            cycle_time,
            assigned_count: graph.len() - graph.unassigned(assigned).len(),
            task_count: graph.len(),
            tasks,
            cycle: graph.find_cycle(),
        }
    }

    /// Diagnosis entry for a task, if it was left unassigned.
    pub fn task(&self, task_id: u32) -> Option<&TaskDiagnosis> {
        self.tasks.iter().find(|t| t.task_id == task_id)
    }

    /// IDs of unassigned tasks.
    pub fn unassigned_ids(&self) -> Vec<u32> {
        self.tasks.iter().map(|t| t.task_id).collect()
    }

    /// IDs of tasks whose duration exceeds the cycle time.
    pub fn oversized_tasks(&self) -> Vec<u32> {
        self.tasks
            .iter()
            .filter(|t| t.task_too_big)
            .map(|t| t.task_id)
            .collect()
    }

    /// Whether any task references a non-existent precedence.
    pub fn has_invalid_precedences(&self) -> bool {
        self.tasks.iter().any(|t| !t.invalid_precedences.is_empty())
    }
}

fn join_ids(ids: &[u32]) -> String {
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl fmt::Display for InfeasibleDiagnosis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Cannot assign all tasks ({} of {} assigned). Problems detected:",
            self.assigned_count, self.task_count
        )?;
        for task in &self.tasks {
            writeln!(f, "Task {} ({}):", task.task_id, task.task_name)?;
            if !task.invalid_precedences.is_empty() {
                writeln!(
                    f,
                    "  - references non-existent precedences: {}",
                    join_ids(&task.invalid_precedences)
                )?;
            }
            if !task.unmet_precedences.is_empty() {
                writeln!(
                    f,
                    "  - pending precedences: {}",
                    join_ids(&task.unmet_precedences)
                )?;
            }
            if task.task_too_big {
                writeln!(
                    f,
                    "  - time ({}s) exceeds the cycle time ({:.2}s)",
                    task.duration, self.cycle_time
                )?;
            }
        }
        if let Some(cycle) = &self.cycle {
            writeln!(f, "Circular dependency: {}", join_ids(cycle))?;
        }
        writeln!(f, "Check that:")?;
        writeln!(f, "1. every precedence references an existing task")?;
        writeln!(f, "2. there are no circular dependencies")?;
        writeln!(f, "3. every task fits within the cycle time")?;
        write!(f, "4. the precedence graph is solvable")
    }
}
