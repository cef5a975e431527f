//! Station and assignment trace models.
//!
//! A station is a unit of line capacity holding a contiguous subset of
//! tasks. Each assignment made by the scheduler is logged as an
//! [`AssignmentStep`], giving a replayable trace of the balance.

use serde::{Deserialize, Serialize};

use super::Task;

/// A work station and the tasks assigned to it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    /// Sequential station number (1-based).
    pub id: usize,
    /// Assigned tasks in assignment order.
    pub tasks: Vec<Task>,
    /// Accumulated workload (seconds).
    pub total_time: f64,
    /// Unused capacity: cycle time minus `total_time` (seconds).
    pub remaining_time: f64,
}

impl Station {
    /// Opens an empty station with full capacity.
    pub fn open(id: usize, cycle_time: f64) -> Self {
        Self {
            id,
            tasks: Vec::new(),
            total_time: 0.0,
            remaining_time: cycle_time,
        }
    }

    /// Appends a task and consumes its duration from the remaining capacity.
    pub fn assign(&mut self, task: &Task) {
        self.tasks.push(task.clone());
        self.total_time += task.duration;
        self.remaining_time -= task.duration;
    }

    /// Whether no task has been assigned yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Number of assigned tasks.
    #[inline]
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    /// IDs of assigned tasks, in assignment order.
    pub fn task_ids(&self) -> Vec<u32> {
        self.tasks.iter().map(|t| t.id).collect()
    }

    /// Idle time per cycle (seconds). Same as `remaining_time`.
    #[inline]
    pub fn idle_time(&self) -> f64 {
        self.remaining_time
    }

    /// Workload as a percentage of the cycle time.
    ///
    /// Returns `None` if `cycle_time` is not positive.
    pub fn utilization(&self, cycle_time: f64) -> Option<f64> {
        if cycle_time <= 0.0 {
            return None;
        }
        Some(self.total_time / cycle_time * 100.0)
    }
}

/// One entry of the assignment trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentStep {
    /// Station receiving the task.
    pub station_id: usize,
    /// Assigned task ID.
    pub task_id: u32,
    /// Assigned task name (denormalized for reporting).
    pub task_name: String,
    /// Assigned task duration (seconds).
    pub task_time: f64,
    /// Station capacity left after this assignment (seconds).
    pub remaining_time: f64,
    /// Why this task was chosen among the eligible ones.
    pub justification: String,
}

impl AssignmentStep {
    /// Records the assignment of `task` to `station` (after the station was updated).
    pub fn new(station: &Station, task: &Task, justification: impl Into<String>) -> Self {
        Self {
            station_id: station.id,
            task_id: task.id,
            task_name: task.name.clone(),
            task_time: task.duration,
            remaining_time: station.remaining_time,
            justification: justification.into(),
        }
    }
}
