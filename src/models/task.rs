//! Task model.
//!
//! A task is a unit of work on the assembly line with a fixed duration
//! and a set of precedence constraints (tasks that must be assigned first).
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 2

use serde::{Deserialize, Serialize};

/// A production task to be assigned to a station.
///
/// # Time Representation
/// Durations are in seconds, matching the cycle time unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique positive task identifier.
    pub id: u32,
    /// Human-readable name.
    pub name: String,
    /// Processing time (seconds).
    pub duration: f64,
    /// IDs of tasks that must be assigned before this one.
    #[serde(default)]
    pub precedences: Vec<u32>,
}

impl Task {
    /// Creates a task with no precedences.
    pub fn new(id: u32, name: impl Into<String>, duration: f64) -> Self {
        Self {
            id,
            name: name.into(),
            duration,
            precedences: Vec::new(),
        }
    }

    /// Adds a precedence task ID.
    pub fn with_precedence(mut self, task_id: u32) -> Self {
        self.precedences.push(task_id);
        self
    }

    /// Replaces the precedence set.
    pub fn with_precedences(mut self, task_ids: impl IntoIterator<Item = u32>) -> Self {
        self.precedences = task_ids.into_iter().collect();
        self
    }

    /// Whether `task_id` is listed as a precedence of this task.
    pub fn depends_on(&self, task_id: u32) -> bool {
        self.precedences.contains(&task_id)
    }

    /// Whether this task has no precedences.
    pub fn is_root(&self) -> bool {
        self.precedences.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_builder() {
        let task = Task::new(4, "Paint", 40.0)
            .with_precedence(2)
            .with_precedence(3);

        assert_eq!(task.id, 4);
        assert_eq!(task.name, "Paint");
        assert!((task.duration - 40.0).abs() < 1e-10);
        assert_eq!(task.precedences, vec![2, 3]);
        assert!(task.depends_on(3));
        assert!(!task.depends_on(1));
        assert!(!task.is_root());
    }

    #[test]
    fn test_task_root() {
        let task = Task::new(1, "Cut", 45.0);
        assert!(task.is_root());
        assert!(!task.with_precedences([7, 8]).is_root());
    }

    #[test]
    fn test_task_deserialize_without_precedences() {
        let task: Task = serde_json::from_str(r#"{"id":1,"name":"Cut","duration":45.0}"#).unwrap();
        assert!(task.precedences.is_empty());
    }
}
