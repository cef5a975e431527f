//! Line balancing domain models.
//!
//! Plain data types describing a balancing problem and its solution.
//!
//! # Domain Mappings
//!
//! | u-line-balance | Assembly | Packaging | Kitting |
//! |----------------|----------|-----------|---------|
//! | Task | Work element | Pack operation | Pick step |
//! | Station | Work station | Pack cell | Kitting bench |
//! | Cycle time | Takt time | Line rate | Wave interval |

mod project;
mod station;
mod task;

pub(crate) use project::theoretical_stations;
pub use project::ProjectConfig;
pub use station::{AssignmentStep, Station};
pub use task::Task;
