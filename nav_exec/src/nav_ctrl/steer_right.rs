//! # [`NavMode::SteerRight`] implementation

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

/// SteerRight mode of the NavCtrl, turning away from an obstacle with a steering angle that winds
/// further to the right every tick.
///
/// Possible transitions, in priority order:
/// - ApproachSample, when a sample is close on the left
/// - WallFollow, once the obstacle is cleared
/// - SetBack, when stationary for too long
#[derive(Debug, Clone)]
pub struct SteerRight {
    /// Number of consecutive ticks spent stationary
    stall_ticks: u32,

    /// Accumulated steering demand
    ///
    /// Units: degrees
    steer_accum_deg: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SteerRightParams {
    /// Steering demand before the first tick of the turn
    pub initial_steer_deg: f64,

    /// Amount the steering demand winds to the right each tick
    pub steer_step_deg: f64,

    /// Furthest right the steering demand may wind
    pub min_steer_deg: f64,

    /// Brake applied while a wall is ahead
    pub wall_brake: f64,

    /// Throttle removed each tick
    pub throttle_decay: f64,

    /// Velocity below which the rover is considered to be rolling backwards
    pub reverse_speed_ms: f64,

    /// Throttle applied when rolling backwards
    pub unstall_throttle: f64,

    pub stall_speed_ms: f64,

    pub stall_limit_ticks: u32,

    pub sample_range_px: f64,

    pub sample_min_angle_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SteerRightParams {
    fn default() -> Self {
        Self {
            initial_steer_deg: -1.0,
            steer_step_deg: 0.5,
            min_steer_deg: -15.0,
            wall_brake: 1.0,
            throttle_decay: 0.1,
            reverse_speed_ms: -0.1,
            unstall_throttle: 0.5,
            stall_speed_ms: 0.03,
            stall_limit_ticks: 120,
            sample_range_px: 40.0,
            sample_min_angle_rad: 0.0,
        }
    }
}

impl SteerRight {
    pub fn new(params: &NavCtrlParams) -> Self {
        Self {
            stall_ticks: 0,
            steer_accum_deg: params.steer_right.initial_steer_deg,
        }
    }

    pub fn stall_ticks(&self) -> u32 {
        self.stall_ticks
    }

    pub fn steer_accum_deg(&self) -> f64 {
        self.steer_accum_deg
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        let p = &params.steer_right;

        self.steer_accum_deg = (self.steer_accum_deg - p.steer_step_deg).max(p.min_steer_deg);
        cmd.set_steer(self.steer_accum_deg);

        if snapshot.wall_ahead {
            cmd.set_brake(p.wall_brake);
        } else {
            cmd.set_brake(0.0);
        }

        // Bleed off whatever throttle was left from the previous mode
        cmd.set_throttle((cmd.throttle() - p.throttle_decay).max(0.0));

        update_stall(
            &mut self.stall_ticks,
            snapshot.velocity_ms.abs() < p.stall_speed_ms,
        );

        if snapshot.velocity_ms < p.reverse_speed_ms {
            cmd.set_throttle(p.unstall_throttle);
        }
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        let p = &params.steer_right;

        if snapshot.sample_dist_px < p.sample_range_px
            && snapshot.sample_angle_rad > p.sample_min_angle_rad
        {
            return ModeAction::Switch(NavModeKind::ApproachSample);
        }

        if !snapshot.obstacle_ahead {
            return ModeAction::Switch(NavModeKind::WallFollow);
        }

        if self.stall_ticks > p.stall_limit_ticks {
            warn!("Stationary for {} ticks while steering right", self.stall_ticks);
            self.stall_ticks = 0;
            return ModeAction::Switch(NavModeKind::SetBack);
        }

        ModeAction::Stay
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_steer_winds_right() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut sr = SteerRight::new(&params);
        let mut cmd = ActuatorCmd::default();
        let snap = Snapshot {
            obstacle_ahead: true,
            velocity_ms: 0.2,
            ..Default::default()
        };

        sr.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.steer_deg(), -1.5);
        sr.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.steer_deg(), -2.0);

        for _ in 0..100 {
            sr.act(&params, &mut persistant, &snap, &mut cmd);
        }
        assert_eq!(sr.steer_accum_deg(), -15.0);
        assert_eq!(cmd.steer_deg(), -15.0);
    }

    #[test]
    fn test_wall_brake_and_throttle() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut sr = SteerRight::new(&params);
        let mut cmd = ActuatorCmd::default();
        cmd.set_throttle(0.25);

        let mut snap = Snapshot {
            obstacle_ahead: true,
            wall_ahead: true,
            velocity_ms: 0.2,
            ..Default::default()
        };

        sr.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.brake(), 1.0);
        assert!((cmd.throttle() - 0.15).abs() < 1e-9);

        snap.wall_ahead = false;
        sr.act(&params, &mut persistant, &snap, &mut cmd);
        sr.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.brake(), 0.0);
        assert_eq!(cmd.throttle(), 0.0);

        // Rolling backwards gets a throttle boost
        snap.velocity_ms = -0.2;
        sr.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.throttle(), 0.5);
    }

    #[test]
    fn test_steer_right_decide() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut sr = SteerRight::new(&params);
        let mut cmd = ActuatorCmd::default();

        let mut snap = Snapshot {
            obstacle_ahead: true,
            ..Default::default()
        };
        assert_eq!(sr.decide(&params, &persistant, &snap), ModeAction::Stay);

        // Sample range is tighter than in the other modes
        snap.sample_dist_px = 45.0;
        snap.sample_angle_rad = 0.2;
        assert_eq!(sr.decide(&params, &persistant, &snap), ModeAction::Stay);
        snap.sample_dist_px = 35.0;
        assert_eq!(
            sr.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::ApproachSample)
        );
        snap.sample_dist_px = 45.0;

        for _ in 0..121 {
            sr.act(&params, &mut persistant, &snap, &mut cmd);
        }
        assert_eq!(
            sr.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::SetBack)
        );

        snap.obstacle_ahead = false;
        assert_eq!(
            sr.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );
    }
}
