//! # [`NavMode::Stopped`] implementation

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

/// Stopped mode of the NavCtrl, holding the rover still in front of an obstacle or wall.
///
/// Possible transitions, in priority order:
/// - ApproachSample, when a sample is in range on the left
/// - WallFollow, once neither a wall nor an obstacle is ahead
/// - SetBack, when stationary for too long
/// - SteerRight, when an obstacle is ahead
#[derive(Debug, Clone, Default)]
pub struct Stopped {
    /// Number of consecutive ticks spent stationary
    stall_ticks: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct StoppedParams {
    pub brake: f64,

    /// Absolute speed below which the rover counts as stationary
    pub stall_speed_ms: f64,

    /// Stationary ticks after which a SetBack is started
    pub stall_limit_ticks: u32,

    pub sample_range_px: f64,

    pub sample_min_angle_rad: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for StoppedParams {
    fn default() -> Self {
        Self {
            brake: 1.0,
            stall_speed_ms: 0.03,
            stall_limit_ticks: 90,
            sample_range_px: 60.0,
            sample_min_angle_rad: 0.0,
        }
    }
}

impl Stopped {
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
        let p = &params.stopped;

        cmd.set_throttle(0.0);
        cmd.set_brake(p.brake);

        update_stall(
            &mut self.stall_ticks,
            snapshot.velocity_ms.abs() < p.stall_speed_ms,
        );
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        let p = &params.stopped;

        if snapshot.sample_dist_px < p.sample_range_px
            && snapshot.sample_angle_rad > p.sample_min_angle_rad
        {
            return ModeAction::Switch(NavModeKind::ApproachSample);
        }

        if !(snapshot.wall_ahead || snapshot.obstacle_ahead) {
            return ModeAction::Switch(NavModeKind::WallFollow);
        }

        if self.stall_ticks > p.stall_limit_ticks {
            warn!("Stationary for {} ticks while stopped", self.stall_ticks);
            self.stall_ticks = 0;
            return ModeAction::Switch(NavModeKind::SetBack);
        }

        if snapshot.obstacle_ahead {
            return ModeAction::Switch(NavModeKind::SteerRight);
        }

        if snapshot.wall_ahead {
            return ModeAction::Stay;
        }

        ModeAction::Switch(NavModeKind::WallFollow)
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_stopped_act() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut stopped = Stopped::new();
        let mut cmd = ActuatorCmd::default();
        cmd.set_throttle(0.7);
        cmd.set_steer(12.0);

        let mut snap = Snapshot::default();
        snap.velocity_ms = 0.5;
        stopped.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.throttle(), 0.0);
        assert_eq!(cmd.brake(), 1.0);
        assert_eq!(cmd.steer_deg(), 12.0);
        assert_eq!(stopped.stall_ticks(), 0);

        snap.velocity_ms = -0.02;
        stopped.act(&params, &mut persistant, &snap, &mut cmd);
        stopped.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(stopped.stall_ticks(), 2);

        snap.velocity_ms = 0.03;
        stopped.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(stopped.stall_ticks(), 0);
    }

    #[test]
    fn test_stopped_decide() {
        let params = NavCtrlParams::default();
        let persistant = NavPersistantData::default();
        let mut stopped = Stopped::new();

        let mut snap = Snapshot::default();
        assert_eq!(
            stopped.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );

        snap.wall_ahead = true;
        assert_eq!(stopped.decide(&params, &persistant, &snap), ModeAction::Stay);

        snap.obstacle_ahead = true;
        assert_eq!(
            stopped.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::SteerRight)
        );

        // Only samples on the left are approached
        snap.sample_dist_px = 30.0;
        snap.sample_angle_rad = -0.05;
        assert_eq!(
            stopped.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::SteerRight)
        );
        snap.sample_angle_rad = 0.05;
        assert_eq!(
            stopped.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::ApproachSample)
        );
    }

    #[test]
    fn test_stopped_stall_limit() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut stopped = Stopped::new();
        let mut cmd = ActuatorCmd::default();

        let mut snap = Snapshot::default();
        snap.wall_ahead = true;

        for _ in 0..90 {
            stopped.act(&params, &mut persistant, &snap, &mut cmd);
        }
        assert_eq!(stopped.decide(&params, &persistant, &snap), ModeAction::Stay);

        stopped.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(
            stopped.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::SetBack)
        );
        assert_eq!(stopped.stall_ticks(), 0);
    }
}
