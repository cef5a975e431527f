//! Project parameters and cycle time derivation.
//!
//! The cycle time is the maximum workload a single station may carry,
//! derived from the available production time and the daily demand:
//!
//! ```text
//! C = (production minutes per day × 60) / required units per day
//! ```
//!
//! # Reference
//! Groover (2015), "Automation, Production Systems, and CIM", Ch. 15.2

use serde::{Deserialize, Serialize};

/// Throughput targets for a line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project display name.
    pub project_name: String,
    /// Available production time per day (minutes).
    pub production_time_per_day: f64,
    /// Units that must be produced per day.
    pub required_production_per_day: u32,
}

impl ProjectConfig {
    /// Creates a project configuration.
    pub fn new(
        project_name: impl Into<String>,
        production_time_per_day: f64,
        required_production_per_day: u32,
    ) -> Self {
        Self {
            project_name: project_name.into(),
            production_time_per_day,
            required_production_per_day,
        }
    }

    /// Station capacity in seconds.
    ///
    /// Inputs are range-checked by [`crate::validation::validate_input`];
    /// this is a plain formula.
    #[inline]
    pub fn cycle_time_secs(&self) -> f64 {
        self.production_time_per_day * 60.0 / self.required_production_per_day as f64
    }

    /// Lower bound on the station count: `ceil(total / C)`.
    pub fn theoretical_stations(&self, total_task_time: f64) -> usize {
        theoretical_stations(total_task_time, self.cycle_time_secs())
    }
}

/// `ceil(total_task_time / cycle_time)`, or 0 for a non-positive cycle time.
///
/// The ratio is shrunk by a few ULPs before rounding up, so rounding noise
/// in the division alone cannot add a station.
pub(crate) fn theoretical_stations(total_task_time: f64, cycle_time: f64) -> usize {
    if cycle_time <= 0.0 || total_task_time <= 0.0 {
        return 0;
    }
    let ratio = total_task_time / cycle_time;
    (ratio - ratio * 8.0 * f64::EPSILON).ceil() as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_time() {
        let config = ProjectConfig::new("Chairs", 480.0, 100);
        assert!((config.cycle_time_secs() - 288.0).abs() < 1e-10);
    }

    #[test]
    fn test_cycle_time_fractional() {
        // 450 min * 60 / 7 units = 3857.142857...
        let config = ProjectConfig::new("Tables", 450.0, 7);
        assert!((config.cycle_time_secs() - 27_000.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_theoretical_stations() {
        let config = ProjectConfig::new("Chairs", 480.0, 100);
        assert_eq!(config.theoretical_stations(140.0), 1);
        assert_eq!(config.theoretical_stations(288.0), 1);
        assert_eq!(config.theoretical_stations(288.5), 2);
        assert_eq!(config.theoretical_stations(0.0), 0);
    }

    #[test]
    fn test_theoretical_stations_just_over_cycle() {
        let config = ProjectConfig::new("Chairs", 480.0, 100);
        assert_eq!(config.theoretical_stations(288.0 + 1e-7), 2);
        assert_eq!(config.theoretical_stations(144.0 + 144.000_000_1), 2);
        assert_eq!(config.theoretical_stations(576.0), 2);
    }
}
