//! # Defines Telemetry Pack for the NavCtrl

// -----------------------------------------------------------------------------------------------
// IMPORTS
// -----------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::MissionStats};
use nalgebra::Point2;
use serde::Serialize;

use super::NavModeKind;

// -----------------------------------------------------------------------------------------------
// STRUCTS
// -----------------------------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Default)]
pub struct NavTm {
    /// Number of ticks executed so far
    pub tick: u64,

    pub mode: NavModeKind,

    pub home_position: Option<Point2<f64>>,

    /// Actuator command produced by the last tick
    pub cmd: ActuatorCmd,

    pub num_mode_changes: u64,

    /// Summary captured when the mission finished
    pub mission_summary: Option<MissionSummary>,
}

/// End of mission statistics, captured once when the rover enters Done.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MissionSummary {
    pub percent_mapped: f64,
    pub fidelity: f64,
    pub elapsed_s: f64,
    pub samples_collected: u32,
    pub samples_total: u32,
}

// -----------------------------------------------------------------------------------------------
// IMPLS
// -----------------------------------------------------------------------------------------------

impl From<&MissionStats> for MissionSummary {
    fn from(stats: &MissionStats) -> Self {
        Self {
            percent_mapped: stats.percent_mapped,
            fidelity: stats.fidelity,
            elapsed_s: stats.elapsed_s,
            samples_collected: stats.samples_collected,
            samples_total: stats.samples_total,
        }
    }
}
