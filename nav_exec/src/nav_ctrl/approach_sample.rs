//! # [`NavMode::ApproachSample`] implementation
//!
//! Samples are approached on a curve: while the sample is still distant and not far to the left,
//! the rover swings hard right, so that a sample sitting inside a left turn doesn't get the rover
//! wedged against the terrain edge it was following.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use log::warn;
use serde::Deserialize;

use super::{update_stall, ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// ApproachSample mode of the NavCtrl.
///
/// Possible transitions, in priority order:
/// - CollectSample, once near the sample
/// - SetBack, when stalled
/// - WallFollow, when the sample is lost from view
#[derive(Debug, Clone, Default)]
pub struct ApproachSample {
    /// Number of consecutive ticks spent stationary
    stall_ticks: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ApproachSampleParams {
    /// Sample distance beyond which the search swing may be used
    pub search_dist_px: f64,

    /// Sample bearing below which the search swing is used
    pub search_max_angle_deg: f64,

    /// Steering demand during the search swing
    pub search_steer_deg: f64,

    pub stall_speed_ms: f64,

    pub stall_limit_ticks: u32,

    /// Speed above which the rover brakes rather than creeps
    pub brake_speed_ms: f64,

    /// Sample distance at and beyond which no braking is applied
    pub brake_range_px: f64,

    pub creep_throttle: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ApproachSampleParams {
    fn default() -> Self {
        Self {
            search_dist_px: 10.0,
            search_max_angle_deg: 20.0,
            search_steer_deg: -15.0,
            stall_speed_ms: 0.03,
            stall_limit_ticks: 60,
            brake_speed_ms: 0.5,
            brake_range_px: 100.0,
            creep_throttle: 0.2,
        }
    }
}

impl ApproachSample {
    pub fn new() -> Self {
        Self { stall_ticks: 0 }
    }

    pub fn stall_ticks(&self) -> u32 {
        self.stall_ticks
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        let p = &params.approach_sample;
        let sample_angle_deg = snapshot.sample_angle_rad.to_degrees();

        if snapshot.sample_dist_px > p.search_dist_px && sample_angle_deg < p.search_max_angle_deg
        {
            cmd.set_steer(p.search_steer_deg);
        } else {
            cmd.set_steer(sample_angle_deg);
        }

        update_stall(
            &mut self.stall_ticks,
            snapshot.velocity_ms.abs() <= p.stall_speed_ms,
        );

        // Brake harder the closer the sample is
        if snapshot.velocity_ms > p.brake_speed_ms {
            let range_px = p.brake_range_px.min(snapshot.sample_dist_px);
            cmd.set_brake(1.0 - range_px / p.brake_range_px);
        } else {
            cmd.set_brake(0.0);
            cmd.set_throttle(p.creep_throttle);
        }
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        let p = &params.approach_sample;

        if snapshot.near_sample {
            return ModeAction::Switch(NavModeKind::CollectSample);
        }

        if self.stall_ticks >= p.stall_limit_ticks {
            warn!("Stalled for {} ticks approaching a sample", self.stall_ticks);
            self.stall_ticks = 0;
            return ModeAction::Switch(NavModeKind::SetBack);
        }

        if !snapshot.sees_sample {
            return ModeAction::Switch(NavModeKind::WallFollow);
        }

        ModeAction::Stay
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
