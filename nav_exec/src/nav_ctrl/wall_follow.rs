//! # [`NavMode::WallFollow`] implementation
//!
//! The rover explores by keeping the terrain edge on its left. The steering demand is the mean
//! navigable bearing biased to the left, and the speed cap shrinks as the amount of visible
//! navigable terrain falls.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use log::{info, warn};
use serde::Deserialize;
use util::maths;

use super::{update_stall, ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// WallFollow mode of the NavCtrl.
///
/// Possible transitions, in priority order:
/// - ReturnHome, when the map is mostly complete and home is nearby
/// - SetBack, when stalled
/// - Idle, when navigable terrain is lost
/// - Stopped, when an obstacle is ahead
/// - ApproachSample, when a sample is in range and not behind the rover's right shoulder
#[derive(Debug, Clone)]
pub struct WallFollow {
    /// Number of consecutive ticks spent at near-zero velocity
    stall_ticks: u32,

    /// Speed cap with a full view of navigable terrain
    ///
    /// Units: meters/second
    max_speed_ms: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct WallFollowParams {
    /// Speed cap when the full number of navigable angles is visible
    pub max_speed_ms: f64,

    /// Left bias added to the mean navigable bearing
    pub steer_bias_deg: f64,

    /// Number of navigable angles considered a full view
    pub full_view_num_angles: usize,

    /// Reduction in the speed cap for each angle missing from a full view
    pub speed_cap_loss_per_angle_ms: f64,

    pub max_throttle: f64,

    /// Throttle per m/s of speed below the cap
    pub throttle_gain: f64,

    /// Brake first applied when over the speed cap
    pub overspeed_full_brake: f64,

    /// Brake finally demanded when over the speed cap, overriding the full brake
    pub overspeed_brake: f64,

    /// Absolute speed at or below which the rover counts as stalled
    pub stall_speed_ms: f64,

    /// Stalled ticks after which a SetBack is started
    pub stall_limit_ticks: u32,

    /// Percent mapped above which the rover heads home
    pub return_mapped_percent: f64,

    /// Distance to home within which ReturnHome may start
    pub return_home_radius_m: f64,

    /// Sample distance below which the sample is approached
    pub sample_range_px: f64,

    /// Sample bearing above which the sample is approached
    pub sample_min_angle_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for WallFollowParams {
    fn default() -> Self {
        Self {
            max_speed_ms: 3.5,
            steer_bias_deg: 11.0,
            full_view_num_angles: 1000,
            speed_cap_loss_per_angle_ms: 0.001,
            max_throttle: 0.7,
            throttle_gain: 0.75,
            overspeed_full_brake: 1.0,
            overspeed_brake: 0.5,
            stall_speed_ms: 0.15,
            stall_limit_ticks: 60,
            return_mapped_percent: 80.0,
            return_home_radius_m: 10.0,
            sample_range_px: 60.0,
            sample_min_angle_rad: -0.1 * std::f64::consts::PI,
        }
    }
}

impl WallFollow {
    pub fn new(params: &NavCtrlParams) -> Self {
        Self {
            stall_ticks: 0,
            max_speed_ms: params.wall_follow.max_speed_ms,
        }
    }

    pub fn stall_ticks(&self) -> u32 {
        self.stall_ticks
    }

    /// Speed cap for the given number of visible navigable angles.
    ///
    /// The cap is `max_speed_ms` with a full view and drops linearly for every angle missing from
    /// it. It can go negative for very sparse views.
    pub fn speed_cap(&self, params: &NavCtrlParams, num_angles: usize) -> f64 {
        let p = &params.wall_follow;
        let missing = p.full_view_num_angles.saturating_sub(num_angles);

        self.max_speed_ms - missing as f64 * p.speed_cap_loss_per_angle_ms
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        let p = &params.wall_follow;

        // The first known position while following the wall becomes home
        if let Some(pos) = snapshot.position_m {
            if persistant.home.set_once(pos) {
                info!("Home position set to ({:.3}, {:.3})", pos.x, pos.y);
            }
        }

        update_stall(
            &mut self.stall_ticks,
            snapshot.velocity_ms.abs() <= p.stall_speed_ms,
        );

        // Without sight there's nothing to steer by, the next decide will drop back to Idle
        let nav_angles = match snapshot.nav_angles() {
            Some(a) => a,
            None => return,
        };

        cmd.set_brake(0.0);

        // Left steering bias
        if let Some(mean_rad) = maths::mean(nav_angles) {
            cmd.set_steer(mean_rad.to_degrees() + p.steer_bias_deg);
        }

        let cap_ms = self.speed_cap(params, nav_angles.len());
        let vel_ms = snapshot.velocity_ms;

        if vel_ms > cap_ms {
            cmd.set_brake(p.overspeed_full_brake);
        }

        if vel_ms < cap_ms {
            cmd.set_throttle(p.max_throttle.min((cap_ms - vel_ms) * p.throttle_gain));
        } else {
            cmd.set_throttle(0.0);
        }

        if vel_ms > cap_ms {
            cmd.set_brake(p.overspeed_brake);
        }
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        let p = &params.wall_follow;

        let home_in_reach = persistant
            .home
            .distance_from(snapshot.position_m)
            .map_or(false, |d| d < p.return_home_radius_m);

        if snapshot.stats.percent_mapped > p.return_mapped_percent && home_in_reach {
            return ModeAction::Switch(NavModeKind::ReturnHome);
        }

        if self.stall_ticks >= p.stall_limit_ticks {
            warn!("Stalled for {} ticks while wall following", self.stall_ticks);
            self.stall_ticks = 0;
            return ModeAction::Switch(NavModeKind::SetBack);
        }

        if snapshot.nav_angles().is_none() {
            return ModeAction::Switch(NavModeKind::Idle);
        }

        if snapshot.obstacle_ahead {
            return ModeAction::Switch(NavModeKind::Stopped);
        }

        if snapshot.sample_dist_px < p.sample_range_px
            && snapshot.sample_angle_rad > p.sample_min_angle_rad
        {
            return ModeAction::Switch(NavModeKind::ApproachSample);
        }

        ModeAction::Stay
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------
