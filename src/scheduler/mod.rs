//! Station assignment and balance evaluation.
//!
//! # Algorithm
//!
//! `StationScheduler` fills stations one at a time with a greedy,
//! precedence-aware heuristic. It is not optimal (line balancing is
//! NP-hard), but is fast and fully traceable.
//!
//! # KPI
//!
//! `LineKpi` computes efficiency, balance delay, idle time and the
//! theoretical station count.
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Groover (2015), "Automation, Production Systems, and CIM", Ch. 15

mod diagnosis;
mod greedy;
mod kpi;

pub use diagnosis::{InfeasibleDiagnosis, TaskDiagnosis};
pub use greedy::{StationPlan, StationScheduler, DEFAULT_MAX_STALLED_ITERATIONS};
pub use kpi::{EfficiencyClass, LineKpi, OUTSTANDING_THRESHOLD, SATISFACTORY_THRESHOLD};
