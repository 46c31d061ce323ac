//! # [`NavMode::ReturnHome`] implementation
//!
//! ReturnHome computes a steering target towards home and a throttle target proportional to the
//! distance, but neither is written into the actuator command. The rover keeps whatever
//! steering and throttle it had on entry, and ReturnHome only brakes when moving faster than the
//! remaining distance. The targets are kept on the mode for telemetry.

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{
    actuator::{ActuatorCmd, STEER_LIMIT_DEG},
    perception::Snapshot,
};
use log::{trace, warn};
use serde::Deserialize;
use util::maths;

use super::{update_stall, ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// ReturnHome mode of the NavCtrl.
///
/// Possible transitions, in priority order:
/// - SetBack, when stalled
/// - Done, once home is reached
#[derive(Debug, Clone, Default)]
pub struct ReturnHome {
    /// Number of consecutive ticks spent below the stall speed
    stall_ticks: u32,

    /// Bearing to home, limited to the steering range
    ///
    /// Units: degrees
    steer_target_deg: Option<f64>,

    /// Throttle proportional to the distance home
    throttle_target: Option<f64>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct ReturnHomeParams {
    /// Brake removed per meter of distance remaining
    pub brake_dist_gain: f64,

    /// Throttle target per meter of distance remaining
    pub throttle_gain: f64,

    pub max_throttle: f64,

    /// Signed velocity below which the rover counts as stalled
    pub stall_speed_ms: f64,

    pub stall_limit_ticks: u32,

    /// Distance to home at which the mission is complete
    pub arrive_radius_m: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for ReturnHomeParams {
    fn default() -> Self {
        Self {
            brake_dist_gain: 0.01,
            throttle_gain: 0.1,
            max_throttle: 1.0,
            stall_speed_ms: 0.03,
            stall_limit_ticks: 60,
            arrive_radius_m: 5.0,
        }
    }
}

impl ReturnHome {
    pub fn new() -> Self {
        Self {
            stall_ticks: 0,
            steer_target_deg: None,
            throttle_target: None,
        }
    }

    pub fn stall_ticks(&self) -> u32 {
        self.stall_ticks
    }

    /// The last steering target computed, not applied to the command.
    pub fn steer_target_deg(&self) -> Option<f64> {
        self.steer_target_deg
    }

    /// The last throttle target computed, not applied to the command.
    pub fn throttle_target(&self) -> Option<f64> {
        self.throttle_target
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        let p = &params.return_home;

        // Stall is counted on signed velocity, so reversing counts as stalled
        update_stall(
            &mut self.stall_ticks,
            snapshot.velocity_ms < p.stall_speed_ms,
        );

        let (pos, home) = match (snapshot.position_m, persistant.home.get()) {
            (Some(pos), Some(home)) => (pos, home),
            _ => return,
        };

        let dist_m = maths::distance(&pos, &home);

        self.steer_target_deg = Some(maths::clamp(
            &maths::bearing_deg(&pos, &home),
            &-STEER_LIMIT_DEG,
            &STEER_LIMIT_DEG,
        ));

        if snapshot.velocity_ms > dist_m {
            cmd.set_brake(snapshot.velocity_ms - dist_m * p.brake_dist_gain);
        }

        self.throttle_target = Some(maths::clamp(
            &(dist_m * p.throttle_gain),
            &-p.max_throttle,
            &p.max_throttle,
        ));

        trace!(
            "ReturnHome: dist {:.3} m, steer target {:?} deg, throttle target {:?}",
            dist_m,
            self.steer_target_deg,
            self.throttle_target
        );
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        let p = &params.return_home;

        if self.stall_ticks > p.stall_limit_ticks {
            warn!("Stalled for {} ticks returning home", self.stall_ticks);
            return ModeAction::Switch(NavModeKind::SetBack);
        }

        match persistant.home.distance_from(snapshot.position_m) {
            Some(d) if d < p.arrive_radius_m => ModeAction::Switch(NavModeKind::Done),
            _ => ModeAction::Stay,
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Point2;

    fn setup() -> (NavCtrlParams, NavPersistantData, ReturnHome) {
        let mut persistant = NavPersistantData::default();
        persistant.home.set_once(Point2::new(0.0, 0.0));

        (NavCtrlParams::default(), persistant, ReturnHome::new())
    }

    #[test]
    fn test_targets_not_applied() {
        let (params, mut persistant, mut rh) = setup();
        let mut cmd = ActuatorCmd::default();
        cmd.set_throttle(0.6);
        cmd.set_steer(7.0);
        cmd.set_brake(0.0);

        let snap = Snapshot {
            position_m: Some(Point2::new(-8.0, 0.0)),
            velocity_ms: 1.0,
            ..Default::default()
        };
        rh.act(&params, &mut persistant, &snap, &mut cmd);

        // Home is due +X of the rover
        assert!(rh.steer_target_deg().unwrap().abs() < 1e-9);
        assert_eq!(rh.throttle_target(), Some(0.8));

        // The command itself is untouched
        assert_eq!(cmd.throttle(), 0.6);
        assert_eq!(cmd.steer_deg(), 7.0);
        assert_eq!(cmd.brake(), 0.0);
    }

    #[test]
    fn test_brake_when_overshooting() {
        let (params, mut persistant, mut rh) = setup();
        let mut cmd = ActuatorCmd::default();

        let snap = Snapshot {
            position_m: Some(Point2::new(0.0, 2.0)),
            velocity_ms: 3.0,
            ..Default::default()
        };
        rh.act(&params, &mut persistant, &snap, &mut cmd);

        assert!((cmd.brake() - 2.98).abs() < 1e-9);
        assert!((rh.steer_target_deg().unwrap() + 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_return_home_decide() {
        let (params, mut persistant, mut rh) = setup();
        let mut cmd = ActuatorCmd::default();

        let mut snap = Snapshot {
            position_m: Some(Point2::new(6.0, 0.0)),
            velocity_ms: 0.5,
            ..Default::default()
        };
        rh.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(rh.decide(&params, &persistant, &snap), ModeAction::Stay);

        snap.position_m = Some(Point2::new(4.0, 0.0));
        assert_eq!(
            rh.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::Done)
        );

        // Unknown position never completes
        snap.position_m = None;
        assert_eq!(rh.decide(&params, &persistant, &snap), ModeAction::Stay);

        // Reversing counts as stalled
        snap.velocity_ms = -1.0;
        for _ in 0..61 {
            rh.act(&params, &mut persistant, &snap, &mut cmd);
        }
        assert_eq!(
            rh.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::SetBack)
        );
    }
}
