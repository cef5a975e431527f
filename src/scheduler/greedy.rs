//! Greedy precedence-aware station filling.
//!
//! # Algorithm
//!
//! 1. Open station 1 with full capacity (the cycle time).
//! 2. Collect the eligible tasks: unassigned, all precedences assigned,
//!    duration within the station's remaining capacity.
//! 3. If any, pick one with the tie-break chain, assign it, log a step,
//!    and repeat step 2 on the same station.
//! 4. If none and the station holds tasks, close it and open the next.
//! 5. If none and the station is empty, count a stalled iteration. After
//!    `max_stalled_iterations` consecutive stalls the run is infeasible.
//!
//! The stall threshold is a safety valve rather than a proof of
//! infeasibility; it is configurable.
//!
//! # Complexity
//! O(n² · p) where n = tasks, p = precedences per task.
//!
//! # Reference
//! Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 4.2

use rand::Rng;
use std::collections::HashSet;
use tracing::{debug, warn};

use super::InfeasibleDiagnosis;
use crate::dispatching::{RuleContext, TieBreakChain, TieBreakRule};
use crate::graph::TaskGraph;
use crate::models::{AssignmentStep, Station, Task};

/// Default number of consecutive unproductive iterations before giving up.
pub const DEFAULT_MAX_STALLED_ITERATIONS: usize = 50;

/// Stations and assignment trace of a completed run.
#[derive(Debug, Clone, PartialEq)]
pub struct StationPlan {
    /// Closed stations, ordered by ID.
    pub stations: Vec<Station>,
    /// One step per task, in assignment order.
    pub steps: Vec<AssignmentStep>,
}

impl StationPlan {
    /// Number of stations.
    pub fn station_count(&self) -> usize {
        self.stations.len()
    }

    /// Station holding a task.
    pub fn station_of(&self, task_id: u32) -> Option<usize> {
        self.steps
            .iter()
            .find(|s| s.task_id == task_id)
            .map(|s| s.station_id)
    }

    /// Position of a task in the assignment trace.
    pub fn step_index(&self, task_id: u32) -> Option<usize> {
        self.steps.iter().position(|s| s.task_id == task_id)
    }
}

/// Greedy station-filling scheduler.
///
/// # Example
///
/// ```
/// use u_line_balance::scheduler::StationScheduler;
/// use u_line_balance::dispatching::TieBreakRule;
/// use u_line_balance::models::Task;
/// use rand::SeedableRng;
///
/// let tasks = vec![
///     Task::new(1, "Cut", 45.0),
///     Task::new(2, "Sand", 30.0).with_precedence(1),
/// ];
/// let scheduler = StationScheduler::new().with_rules(&[TieBreakRule::LongestTime]);
/// let mut rng = rand::rngs::StdRng::seed_from_u64(1);
///
/// let plan = scheduler.assign(&tasks, 60.0, &mut rng).unwrap();
/// assert_eq!(plan.station_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct StationScheduler {
    chain: TieBreakChain,
    max_stalled_iterations: usize,
}

impl StationScheduler {
    /// Creates a scheduler with no tie-break rules.
    pub fn new() -> Self {
        Self {
            chain: TieBreakChain::new(),
            max_stalled_iterations: DEFAULT_MAX_STALLED_ITERATIONS,
        }
    }

    /// Sets the tie-break chain.
    pub fn with_chain(mut self, chain: TieBreakChain) -> Self {
        self.chain = chain;
        self
    }

    /// Sets the tie-break rules in selection order.
    pub fn with_rules(mut self, rules: &[TieBreakRule]) -> Self {
        self.chain = TieBreakChain::from_rules(rules);
        self
    }

    /// Sets the stall threshold (minimum 1).
    pub fn with_max_stalled_iterations(mut self, limit: usize) -> Self {
        self.max_stalled_iterations = limit.max(1);
        self
    }

    /// The tie-break chain in use.
    pub fn chain(&self) -> &TieBreakChain {
        &self.chain
    }

    /// The stall threshold in use.
    pub fn max_stalled_iterations(&self) -> usize {
        self.max_stalled_iterations
    }

    /// Assigns every task to a station of capacity `cycle_time`.
    ///
    /// Returns the diagnosis instead of a partial plan if the run stalls.
    pub fn assign<R: Rng>(
        &self,
        tasks: &[Task],
        cycle_time: f64,
        rng: &mut R,
    ) -> Result<StationPlan, InfeasibleDiagnosis> {
        let graph = TaskGraph::new(tasks);
        let context = RuleContext::from_graph(&graph);

        let mut assigned: HashSet<u32> = HashSet::with_capacity(tasks.len());
        let mut stations: Vec<Station> = Vec::new();
        let mut steps: Vec<AssignmentStep> = Vec::with_capacity(tasks.len());
        let mut current = Station::open(1, cycle_time);
        let mut stalled = 0usize;

        while assigned.len() < graph.len() {
            let eligible = graph.eligible(&assigned, current.remaining_time);

            if eligible.is_empty() {
                if !current.is_empty() {
                    debug!(
                        station = current.id,
                        tasks = current.task_count(),
                        total_time = current.total_time,
                        "station closed"
                    );
                    let next = Station::open(current.id + 1, cycle_time);
                    stations.push(std::mem::replace(&mut current, next));
                    continue;
                }

                // Nothing changes between stalls; each retry sees the same eligible set.
                stalled += 1;
                if stalled >= self.max_stalled_iterations {
                    let diagnosis = InfeasibleDiagnosis::diagnose(&graph, &assigned, cycle_time);
                    warn!(
                        assigned = diagnosis.assigned_count,
                        total = diagnosis.task_count,
                        stalled,
                        "no task fits an empty station; line is infeasible"
                    );
                    return Err(diagnosis);
                }
                continue;
            }

            stalled = 0;
            let Some(selection) = self.chain.select(&eligible, &context, rng) else {
                unreachable!("tie-break chain returned no task for non-empty candidates");
            };

            let task = selection.task;
            current.assign(task);
            assigned.insert(task.id);
            debug!(
                station = current.id,
                task = task.id,
                remaining = current.remaining_time,
                reason = %selection.justification,
                "task assigned"
            );
            steps.push(AssignmentStep::new(&current, task, selection.justification));
        }

        if !current.is_empty() {
            stations.push(current);
        }

        Ok(StationPlan { stations, steps })
    }
}

impl Default for StationScheduler {
    fn default() -> Self {
        Self::new()
    }
}
