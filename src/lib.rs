//! Assembly line balancing for the U-Engine ecosystem.
//!
//! Assigns precedence-constrained tasks to sequential stations so that no
//! station's workload exceeds the cycle time, then reports line efficiency.
//! The heuristic is greedy and traceable, not optimal.
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Task`, `ProjectConfig`, `Station`, `AssignmentStep`
//! - **`graph`**: Precedence queries: eligibility, dependent counts, cycles
//! - **`dispatching`**: Tie-break rules and the ordered rule chain
//! - **`scheduler`**: Greedy station filling, infeasibility diagnosis, KPIs
//! - **`validation`**: Input integrity checks (ranges, names, duplicate IDs)
//! - **`balancer`**: `compute_balance` and the `LineBalancer` run context
//!
//! # Determinism
//!
//! Ties the enabled rules cannot break are drawn from the caller's RNG.
//! With no rules enabled the balance is intentionally random; pass a
//! seeded RNG (`StdRng::seed_from_u64`) to reproduce a run.
//!
//! # References
//!
//! - Scholl (1999), "Balancing and Sequencing of Assembly Lines"
//! - Groover (2015), "Automation, Production Systems, and CIM", Ch. 15
//! - Helgeson & Birnie (1961), "Assembly Line Balancing Using the Ranked
//!   Positional Weight Technique"

pub mod balancer;
pub mod dispatching;
pub mod error;
pub mod graph;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use balancer::{compute_balance, BalanceOutcome, BalanceRequest, LineBalancer};
pub use dispatching::{TieBreakChain, TieBreakRule};
pub use error::{BalanceError, Result};
pub use models::{AssignmentStep, ProjectConfig, Station, Task};
pub use scheduler::{EfficiencyClass, InfeasibleDiagnosis, LineKpi, TaskDiagnosis};
