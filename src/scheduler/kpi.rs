//! Line balance quality metrics (KPIs).
//!
//! Computes efficiency indicators from the final station list.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Efficiency (E) | Σt / (N · C) × 100 |
//! | Balance delay | 100 − E |
//! | Theoretical stations | ⌈Σt / C⌉ |
//! | Idle time | N · C − Σt |
//! | Station utilization | t_k / C × 100 |
//!
//! # Reference
//! Groover (2015), "Automation, Production Systems, and CIM", Ch. 15.2

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{theoretical_stations, Station};

/// Efficiency below this is unsatisfactory (percent).
pub const SATISFACTORY_THRESHOLD: f64 = 60.0;
/// Efficiency above this is outstanding (percent).
pub const OUTSTANDING_THRESHOLD: f64 = 90.0;

/// Three-tier efficiency classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EfficiencyClass {
    /// Below 60 %.
    Unsatisfactory,
    /// 60 % to 90 % inclusive.
    Satisfactory,
    /// Above 90 %.
    Outstanding,
}

impl EfficiencyClass {
    /// Classifies an efficiency percentage.
    pub fn from_efficiency(efficiency: f64) -> Self {
        if efficiency < SATISFACTORY_THRESHOLD {
            EfficiencyClass::Unsatisfactory
        } else if efficiency <= OUTSTANDING_THRESHOLD {
            EfficiencyClass::Satisfactory
        } else {
            EfficiencyClass::Outstanding
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            EfficiencyClass::Unsatisfactory => "Unsatisfactory",
            EfficiencyClass::Satisfactory => "Satisfactory",
            EfficiencyClass::Outstanding => "Outstanding",
        }
    }
}

impl fmt::Display for EfficiencyClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Line balance performance indicators.
///
/// All time values are in seconds, percentages in 0..100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineKpi {
    /// Sum of all task durations.
    pub total_task_time: f64,
    /// Station capacity.
    pub cycle_time: f64,
    /// Lower bound on the station count.
    pub theoretical_stations: usize,
    /// Stations actually opened.
    pub actual_stations: usize,
    /// Line efficiency (percent).
    pub efficiency: f64,
    /// Efficiency tier.
    pub classification: EfficiencyClass,
    /// Unused station time per cycle, summed over stations.
    pub total_idle_time: f64,
    /// 100 − efficiency.
    pub balance_delay: f64,
    /// Per-station utilization (percent), in station order.
    pub station_utilization: Vec<f64>,
}

impl LineKpi {
    /// Computes KPIs from the closed stations.
    ///
    /// An empty station list or a non-positive cycle time yields 0 % efficiency.
    pub fn calculate(stations: &[Station], cycle_time: f64) -> Self {
        let total_task_time: f64 = stations.iter().map(|s| s.total_time).sum();
        let actual_stations = stations.len();
        let available = actual_stations as f64 * cycle_time;

        let efficiency = if available > 0.0 {
            total_task_time / available * 100.0
        } else {
            0.0
        };

        let station_utilization = stations
            .iter()
            .map(|s| s.utilization(cycle_time).unwrap_or(0.0))
            .collect();

        Self {
            total_task_time,
            cycle_time,
            theoretical_stations: theoretical_stations(total_task_time, cycle_time),
            actual_stations,
            efficiency,
            classification: EfficiencyClass::from_efficiency(efficiency),
            total_idle_time: (available - total_task_time).max(0.0),
            balance_delay: if available > 0.0 { 100.0 - efficiency } else { 0.0 },
            station_utilization,
        }
    }

    /// Stations opened beyond the theoretical minimum.
    pub fn excess_stations(&self) -> usize {
        self.actual_stations.saturating_sub(self.theoretical_stations)
    }

    /// Whether efficiency reaches `min_efficiency` percent.
    pub fn meets_threshold(&self, min_efficiency: f64) -> bool {
        self.efficiency >= min_efficiency
    }
}
