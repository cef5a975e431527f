//! Precedence graph queries.
//!
//! Read-only view over the task set used by the scheduler and the
//! tie-break chain. Answers three questions:
//! - which tasks may enter the open station right now (eligibility),
//! - how many tasks directly depend on a given task (dependent count),
//! - whether the precedence relation contains a cycle.
//!
//! # Reference
//! Cormen et al. (2009), "Introduction to Algorithms", Ch. 22.4 (Topological Sort)

use std::collections::{HashMap, HashSet};

use crate::models::Task;

/// Indexed, immutable precedence graph over a task slice.
#[derive(Debug, Clone)]
pub struct TaskGraph<'a> {
    tasks: &'a [Task],
    index: HashMap<u32, usize>,
    dependents: HashMap<u32, usize>,
}

impl<'a> TaskGraph<'a> {
    /// Indexes the task set.
    ///
    /// If IDs are duplicated, lookups resolve to the first occurrence.
    pub fn new(tasks: &'a [Task]) -> Self {
        let mut index = HashMap::with_capacity(tasks.len());
        for (i, task) in tasks.iter().enumerate() {
            index.entry(task.id).or_insert(i);
        }

        let mut dependents: HashMap<u32, usize> = HashMap::new();
        for task in tasks {
            let mut seen = HashSet::new();
            for &pred in &task.precedences {
                if pred != task.id && seen.insert(pred) {
                    *dependents.entry(pred).or_default() += 1;
                }
            }
        }

        Self {
            tasks,
            index,
            dependents,
        }
    }

    /// All tasks, in input order.
    #[inline]
    pub fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    /// Number of tasks.
    #[inline]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the graph has no tasks.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Looks up a task by ID.
    pub fn get(&self, id: u32) -> Option<&'a Task> {
        self.index.get(&id).map(|&i| &self.tasks[i])
    }

    /// Whether a task with this ID exists.
    pub fn contains(&self, id: u32) -> bool {
        self.index.contains_key(&id)
    }

    /// Number of other tasks listing `id` as a precedence.
    pub fn dependent_count(&self, id: u32) -> usize {
        self.dependents.get(&id).copied().unwrap_or(0)
    }

    /// Sum of all task durations (seconds).
    pub fn total_duration(&self) -> f64 {
        self.tasks.iter().map(|t| t.duration).sum()
    }

    /// Tasks that can be placed in a station with `remaining_capacity` left.
    ///
    /// A task is eligible iff it is unassigned, every precedence is assigned,
    /// and its duration fits. Returned in input order.
    pub fn eligible(&self, assigned: &HashSet<u32>, remaining_capacity: f64) -> Vec<&'a Task> {
        self.tasks
            .iter()
            .filter(|t| !assigned.contains(&t.id))
            .filter(|t| t.precedences.iter().all(|p| assigned.contains(p)))
            .filter(|t| t.duration <= remaining_capacity)
            .collect()
    }

    /// Tasks not yet assigned, in input order.
    pub fn unassigned(&self, assigned: &HashSet<u32>) -> Vec<&'a Task> {
        self.tasks
            .iter()
            .filter(|t| !assigned.contains(&t.id))
            .collect()
    }

    /// Finds one precedence cycle, if any.
    ///
    /// Returns the task IDs on the cycle in dependency order
    /// (each ID is a precedence of the next; the last closes back on the first).
    /// Precedences pointing at unknown tasks are ignored.
    ///
    /// # Algorithm
    /// Iterative DFS over predecessor edges with an explicit frame stack and
    /// an in-stack set. A back edge (neighbor already on the stack) closes a
    /// cycle. Roots are tried in task input order, so the result is
    /// deterministic. O(V + E); depth is bounded by the heap, not the thread
    /// stack.
    pub fn find_cycle(&self) -> Option<Vec<u32>> {
        let mut visited: HashSet<u32> = HashSet::with_capacity(self.tasks.len());
        let mut on_stack: HashSet<u32> = HashSet::new();
        // (task id, index of the next precedence to explore)
        let mut frames: Vec<(u32, usize)> = Vec::new();

        for root in self.tasks {
            if !visited.insert(root.id) {
                continue;
            }
            on_stack.insert(root.id);
            frames.push((root.id, 0));

            while let Some(frame) = frames.last_mut() {
                let (node, next) = *frame;
                let precedences = self
                    .get(node)
                    .map_or(&[][..], |task| task.precedences.as_slice());

                let Some(&pred) = precedences.get(next) else {
                    frames.pop();
                    on_stack.remove(&node);
                    continue;
                };
                frame.1 += 1;

                if !self.contains(pred) {
                    continue;
                }
                if on_stack.contains(&pred) {
                    // Back edge: frames[pos..] walks successor-wards from `pred`.
                    let pos = frames.iter().rposition(|&(id, _)| id == pred)?;
                    return Some(frames[pos..].iter().rev().map(|&(id, _)| id).collect());
                }
                if visited.insert(pred) {
                    on_stack.insert(pred);
                    frames.push((pred, 0));
                }
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_tasks() -> Vec<Task> {
        vec![
            Task::new(1, "Cut", 45.0),
            Task::new(2, "Sand", 30.0).with_precedence(1),
            Task::new(3, "Drill", 25.0).with_precedence(1),
            Task::new(4, "Paint", 40.0).with_precedences([2, 3]),
        ]
    }

    #[test]
    fn test_dependent_count() {
        let tasks = scenario_tasks();
        let graph = TaskGraph::new(&tasks);
        assert_eq!(graph.dependent_count(1), 2);
        assert_eq!(graph.dependent_count(2), 1);
        assert_eq!(graph.dependent_count(3), 1);
        assert_eq!(graph.dependent_count(4), 0);
        assert_eq!(graph.dependent_count(99), 0);
    }

    #[test]
    fn test_dependent_count_ignores_self_and_duplicates() {
        let tasks = vec![
            Task::new(1, "A", 10.0).with_precedence(1),
            Task::new(2, "B", 10.0).with_precedences([1, 1]),
        ];
        let graph = TaskGraph::new(&tasks);
        assert_eq!(graph.dependent_count(1), 1);
    }

    #[test]
    fn test_eligible_initial() {
        let tasks = scenario_tasks();
        let graph = TaskGraph::new(&tasks);
        let eligible = graph.eligible(&HashSet::new(), 288.0);
        assert_eq!(eligible.len(), 1);
        assert_eq!(eligible[0].id, 1);
    }

    #[test]
    fn test_eligible_after_root() {
        let tasks = scenario_tasks();
        let graph = TaskGraph::new(&tasks);
        let assigned: HashSet<u32> = [1].into_iter().collect();
        let ids: Vec<u32> = graph.eligible(&assigned, 288.0).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[test]
    fn test_eligible_respects_capacity() {
        let tasks = scenario_tasks();
        let graph = TaskGraph::new(&tasks);
        let assigned: HashSet<u32> = [1].into_iter().collect();
        // Sand (30) does not fit in 28, Drill (25) does.
        let ids: Vec<u32> = graph.eligible(&assigned, 28.0).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
        // Exact fit is allowed.
        let ids: Vec<u32> = graph.eligible(&assigned, 25.0).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3]);
    }

    #[test]
    fn test_eligible_dangling_precedence_never_ready() {
        let tasks = vec![Task::new(1, "A", 10.0).with_precedence(42)];
        let graph = TaskGraph::new(&tasks);
        assert!(graph.eligible(&HashSet::new(), 100.0).is_empty());
        assert!(!graph.contains(42));
    }

    #[test]
    fn test_unassigned_and_total() {
        let tasks = scenario_tasks();
        let graph = TaskGraph::new(&tasks);
        let assigned: HashSet<u32> = [1, 3].into_iter().collect();
        let ids: Vec<u32> = graph.unassigned(&assigned).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![2, 4]);
        assert!((graph.total_duration() - 140.0).abs() < 1e-10);
        assert_eq!(graph.len(), 4);
        assert_eq!(graph.get(3).map(|t| t.name.as_str()), Some("Drill"));
    }

    #[test]
    fn test_no_cycle() {
        let tasks = scenario_tasks();
        assert!(TaskGraph::new(&tasks).find_cycle().is_none());
    }

    #[test]
    fn test_cycle_detected() {
        // 1 -> 2 -> 3 -> 1
        let tasks = vec![
            Task::new(1, "A", 10.0).with_precedence(3),
            Task::new(2, "B", 10.0).with_precedence(1),
            Task::new(3, "C", 10.0).with_precedence(2),
        ];
        let cycle = TaskGraph::new(&tasks).find_cycle().unwrap();
        assert_eq!(cycle.len(), 3);
        let mut sorted = cycle.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3]);
    }

    #[test]
    fn test_self_cycle() {
        let tasks = vec![Task::new(1, "A", 10.0).with_precedence(1)];
        assert_eq!(TaskGraph::new(&tasks).find_cycle(), Some(vec![1]));
    }

    #[test]
    fn test_long_cycle_does_not_exhaust_stack() {
        // i depends on i + 1; the last task depends on the first.
        let n = 50_000u32;
        let tasks: Vec<Task> = (1..=n)
            .map(|id| Task::new(id, format!("T{id}"), 1.0).with_precedence(id % n + 1))
            .collect();
        let cycle = TaskGraph::new(&tasks).find_cycle().unwrap();
        assert_eq!(cycle.len(), n as usize);
        assert_eq!(cycle[0], n);
        assert_eq!(cycle[n as usize - 1], 1);
    }

    #[test]
    fn test_cycle_behind_acyclic_prefix() {
        // 1 <- 2 <- 3 <- 4 <- 3
        let tasks = vec![
            Task::new(1, "A", 10.0),
            Task::new(2, "B", 10.0).with_precedence(1),
            Task::new(3, "C", 10.0).with_precedences([2, 4]),
            Task::new(4, "D", 10.0).with_precedence(3),
        ];
        assert_eq!(TaskGraph::new(&tasks).find_cycle(), Some(vec![4, 3]));
    }
}
