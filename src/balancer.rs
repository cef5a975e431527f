//! Balancing entry points.
//!
//! [`compute_balance`] runs one complete balance: validate the input,
//! derive the cycle time, fill stations, evaluate efficiency. Either the
//! whole outcome is returned or an error is; there is no partial result.
//!
//! [`LineBalancer`] is the caller-owned run context for front ends that
//! keep the last outcome around between steps. It replaces any global
//! store: state only lives as long as the caller keeps the balancer.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::dispatching::TieBreakRule;
use crate::error::{BalanceError, Result};
use crate::models::{AssignmentStep, ProjectConfig, Station, Task};
use crate::scheduler::{LineKpi, StationScheduler, DEFAULT_MAX_STALLED_ITERATIONS};
use crate::validation::validate_input;

/// Everything needed to run a balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// Project parameters.
    pub project: ProjectConfig,
    /// Tasks to assign.
    pub tasks: Vec<Task>,
    /// Tie-break rules in selection order. Empty = fully random tie resolution.
    #[serde(default)]
    pub enabled_rules: Vec<TieBreakRule>,
    /// Consecutive unproductive iterations tolerated before giving up.
    #[serde(default = "default_max_stalled_iterations")]
    pub max_stalled_iterations: usize,
}

fn default_max_stalled_iterations() -> usize {
    DEFAULT_MAX_STALLED_ITERATIONS
}

impl BalanceRequest {
    /// Creates a request with no tie-break rules.
    pub fn new(project: ProjectConfig, tasks: Vec<Task>) -> Self {
        Self {
            project,
            tasks,
            enabled_rules: Vec::new(),
            max_stalled_iterations: DEFAULT_MAX_STALLED_ITERATIONS,
        }
    }

    /// Enables a tie-break rule (appended to the selection order).
    pub fn with_rule(mut self, rule: TieBreakRule) -> Self {
        self.enabled_rules.push(rule);
        self
    }

    /// Sets all tie-break rules in selection order.
    pub fn with_rules(mut self, rules: impl IntoIterator<Item = TieBreakRule>) -> Self {
        self.enabled_rules = rules.into_iter().collect();
        self
    }

    /// Sets the stall threshold.
    pub fn with_max_stalled_iterations(mut self, limit: usize) -> Self {
        self.max_stalled_iterations = limit;
        self
    }

    /// Eight-task furniture line: 480 min/day, 100 units/day, both rules enabled.
    pub fn sample() -> Self {
        let tasks = vec![
            Task::new(1, "Cut material", 45.0),
            Task::new(2, "Sand pieces", 30.0).with_precedence(1),
            Task::new(3, "Drill", 25.0).with_precedence(1),
            Task::new(4, "Paint base", 40.0).with_precedences([2, 3]),
            Task::new(5, "Assemble frame", 50.0).with_precedence(4),
            Task::new(6, "Install components", 35.0).with_precedence(5),
            Task::new(7, "Quality inspection", 20.0).with_precedence(6),
            Task::new(8, "Packaging", 25.0).with_precedence(7),
        ];
        Self::new(ProjectConfig::new("Sample line", 480.0, 100), tasks)
            .with_rules(TieBreakRule::ALL)
    }

    /// Runs the balance described by this request.
    pub fn run<R: Rng>(&self, rng: &mut R) -> Result<BalanceOutcome> {
        run_balance(
            &self.project,
            &self.tasks,
            &self.enabled_rules,
            self.max_stalled_iterations,
            rng,
        )
    }
}

/// A completed balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceOutcome {
    /// Closed stations, ordered by ID.
    pub stations: Vec<Station>,
    /// Assignment trace, one step per task.
    pub steps: Vec<AssignmentStep>,
    /// Efficiency indicators.
    pub results: LineKpi,
}

/// Balances `tasks` on a line sized by `config`.
///
/// `enabled_rules` are applied in the given order; ties they leave are
/// drawn from `rng`. Pass a seeded RNG for reproducible results.
///
/// # Example
///
/// ```
/// use u_line_balance::{compute_balance, EfficiencyClass, ProjectConfig, Task, TieBreakRule};
/// use rand::SeedableRng;
///
/// let config = ProjectConfig::new("Chairs", 480.0, 100);
/// let tasks = vec![
///     Task::new(1, "Cut", 45.0),
///     Task::new(2, "Sand", 30.0).with_precedence(1),
///     Task::new(3, "Drill", 25.0).with_precedence(1),
///     Task::new(4, "Paint", 40.0).with_precedences([2, 3]),
/// ];
/// let mut rng = rand::rngs::StdRng::seed_from_u64(0);
///
/// let outcome = compute_balance(&config, &tasks, &[TieBreakRule::LongestTime], &mut rng).unwrap();
/// assert_eq!(outcome.results.actual_stations, 1);
/// assert_eq!(outcome.results.classification, EfficiencyClass::Unsatisfactory);
/// ```
pub fn compute_balance<R: Rng>(
    config: &ProjectConfig,
    tasks: &[Task],
    enabled_rules: &[TieBreakRule],
    rng: &mut R,
) -> Result<BalanceOutcome> {
    run_balance(config, tasks, enabled_rules, DEFAULT_MAX_STALLED_ITERATIONS, rng)
}

fn run_balance<R: Rng>(
    config: &ProjectConfig,
    tasks: &[Task],
    enabled_rules: &[TieBreakRule],
    max_stalled_iterations: usize,
    rng: &mut R,
) -> Result<BalanceOutcome> {
    if let Err(errors) = validate_input(config, tasks) {
        warn!(errors = errors.len(), "balance input rejected");
        return Err(BalanceError::InvalidInput(errors));
    }

    let cycle_time = config.cycle_time_secs();
    info!(
        project = %config.project_name,
        tasks = tasks.len(),
        cycle_time,
        rules = ?enabled_rules,
        "balancing line"
    );

    let plan = StationScheduler::new()
        .with_rules(enabled_rules)
        .with_max_stalled_iterations(max_stalled_iterations)
        .assign(tasks, cycle_time, rng)?;

    let results = LineKpi::calculate(&plan.stations, cycle_time);
    info!(
        stations = results.actual_stations,
        theoretical = results.theoretical_stations,
        efficiency = results.efficiency,
        classification = %results.classification,
        "line balanced"
    );

    Ok(BalanceOutcome {
        stations: plan.stations,
        steps: plan.steps,
        results,
    })
}

/// Caller-owned run context holding the last published outcome.
///
/// # Example
///
/// ```
/// use u_line_balance::{BalanceRequest, LineBalancer};
/// use rand::SeedableRng;
///
/// let mut balancer = LineBalancer::new();
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// balancer.run(&BalanceRequest::sample(), &mut rng).unwrap();
/// assert!(balancer.outcome().is_some());
///
/// balancer.reset();
/// assert!(balancer.outcome().is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct LineBalancer {
    outcome: Option<BalanceOutcome>,
}

impl LineBalancer {
    /// Creates a context with nothing published.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a balance and publishes its outcome.
    ///
    /// Any previous outcome is cleared first, so a failed run leaves
    /// nothing published.
    pub fn compute_balance<R: Rng>(
        &mut self,
        config: &ProjectConfig,
        tasks: &[Task],
        enabled_rules: &[TieBreakRule],
        rng: &mut R,
    ) -> Result<&BalanceOutcome> {
        self.outcome = None;
        let outcome = compute_balance(config, tasks, enabled_rules, rng)?;
        Ok(&*self.outcome.insert(outcome))
    }

    /// Runs a request and publishes its outcome.
    pub fn run<R: Rng>(&mut self, request: &BalanceRequest, rng: &mut R) -> Result<&BalanceOutcome> {
        self.outcome = None;
        let outcome = request.run(rng)?;
        Ok(&*self.outcome.insert(outcome))
    }

    /// The last published outcome.
    pub fn outcome(&self) -> Option<&BalanceOutcome> {
        self.outcome.as_ref()
    }

    /// Clears any published outcome.
    pub fn reset(&mut self) {
        self.outcome = None;
    }
}
