//! Tie-break rules and the rule chain for station filling.
//!
//! When several tasks are eligible for the open station, the scheduler
//! asks a [`TieBreakChain`] to pick one. The chain applies the enabled
//! [`TieBreakRule`]s in the order the caller selected them; anything
//! still tied at the end is resolved uniformly at random from an
//! injected RNG.
//!
//! # Usage
//!
//! ```
//! use u_line_balance::dispatching::{RuleContext, TieBreakChain, TieBreakRule};
//! use u_line_balance::graph::TaskGraph;
//! use u_line_balance::models::Task;
//! use rand::SeedableRng;
//!
//! let tasks = vec![
//!     Task::new(1, "Cut", 45.0),
//!     Task::new(2, "Sand", 30.0),
//!     Task::new(3, "Polish", 10.0).with_precedence(2),
//! ];
//! let graph = TaskGraph::new(&tasks);
//! let ctx = RuleContext::from_graph(&graph);
//! let chain = TieBreakChain::new().with_rule(TieBreakRule::MostFollowingTasks);
//!
//! let candidates = vec![&tasks[0], &tasks[1]];
//! let mut rng = rand::rngs::StdRng::seed_from_u64(7);
//! let selection = chain.select(&candidates, &ctx, &mut rng).unwrap();
//! assert_eq!(selection.task.id, 2);
//! ```
//!
//! # References
//!
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines", Ch. 4

mod context;
mod engine;
pub mod rules;

pub use context::RuleContext;
pub use engine::{
    Reduction, Resolution, Selection, TieBreakChain, ONLY_CANDIDATE, RANDOM_AFTER_RULES,
    RANDOM_NO_RULES,
};
pub use rules::TieBreakRule;

/// Metric returned by a tie-break rule.
///
/// **Higher metric = preferred.** The chain keeps the candidates sharing
/// the maximum metric.
pub type RuleMetric = f64;
