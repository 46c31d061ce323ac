//! # [`NavMode::SetBack`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use log::{debug, warn};
use nalgebra::Point2;
use serde::Deserialize;
use util::maths;

use super::{ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// SetBack mode of the NavCtrl, reversing straight back to free the rover after a stall.
///
/// Possible transitions, after the reverse has run for long enough:
/// - Quicksand, if reversing didn't move the rover
/// - WallFollow, otherwise
#[derive(Debug, Clone, Default)]
pub struct SetBack {
    /// Number of ticks spent in this SetBack
    ticks: u32,

    /// Position at the start of the reverse
    ///
    /// Units: meters
    anchor_position_m: Option<Point2<f64>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct SetBackParams {
    /// Throttle used to reverse
    pub reverse_throttle: f64,

    /// Ticks to reverse for before checking the displacement
    pub min_ticks: u32,

    /// Displacement below which the rover is considered stuck in quicksand
    pub quicksand_dist_m: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for SetBackParams {
    fn default() -> Self {
        Self {
            reverse_throttle: -2.0,
            min_ticks: 25,
            quicksand_dist_m: 0.1,
        }
    }
}

impl SetBack {
    pub fn new() -> Self {
        Self {
            ticks: 0,
            anchor_position_m: None,
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn anchor_position_m(&self) -> Option<Point2<f64>> {
        self.anchor_position_m
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        if self.anchor_position_m.is_none() {
            self.anchor_position_m = snapshot.position_m;
        }

        cmd.set_brake(0.0);
        cmd.set_steer(0.0);
        cmd.set_throttle(params.set_back.reverse_throttle);

        self.ticks += 1;
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        let p = &params.set_back;

        if self.ticks <= p.min_ticks {
            return ModeAction::Stay;
        }

        // Without both positions there's no evidence of being stuck
        let displacement_m = match (self.anchor_position_m, snapshot.position_m) {
            (Some(anchor), Some(pos)) => maths::distance(&anchor, &pos),
            _ => return ModeAction::Switch(NavModeKind::WallFollow),
        };

        debug!("SetBack displacement: {:.3} m", displacement_m);

        if displacement_m < p.quicksand_dist_m {
            warn!(
                "Reversed for {} ticks but only moved {:.3} m, assuming quicksand",
                self.ticks, displacement_m
            );
            ModeAction::Switch(NavModeKind::Quicksand)
        } else {
            ModeAction::Switch(NavModeKind::WallFollow)
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    fn run(set_back: &mut SetBack, snap: &Snapshot, n: u32) {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut cmd = ActuatorCmd::default();

        for _ in 0..n {
            set_back.act(&params, &mut persistant, snap, &mut cmd);
        }

        assert_eq!(cmd.throttle(), -2.0);
        assert_eq!(cmd.brake(), 0.0);
        assert_eq!(cmd.steer_deg(), 0.0);
    }

    #[test]
    fn test_set_back_to_quicksand() {
        let params = NavCtrlParams::default();
        let persistant = NavPersistantData::default();
        let mut set_back = SetBack::new();

        let mut snap = Snapshot {
            position_m: Some(Point2::new(50.0, 50.0)),
            ..Default::default()
        };

        run(&mut set_back, &snap, 25);
        assert_eq!(set_back.anchor_position_m(), Some(Point2::new(50.0, 50.0)));
        assert_eq!(set_back.decide(&params, &persistant, &snap), ModeAction::Stay);

        run(&mut set_back, &snap, 1);
        assert_eq!(set_back.ticks(), 26);

        snap.position_m = Some(Point2::new(50.05, 50.0));
        assert_eq!(
            set_back.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::Quicksand)
        );
    }

    #[test]
    fn test_set_back_to_wall_follow() {
        let params = NavCtrlParams::default();
        let persistant = NavPersistantData::default();
        let mut set_back = SetBack::new();

        let mut snap = Snapshot {
            position_m: Some(Point2::new(50.0, 50.0)),
            ..Default::default()
        };
        run(&mut set_back, &snap, 26);

        // Anchor stays at the first position
        snap.position_m = Some(Point2::new(50.0, 49.9));
        run(&mut set_back, &snap, 1);
        assert_eq!(set_back.anchor_position_m(), Some(Point2::new(50.0, 50.0)));

        snap.position_m = Some(Point2::new(50.0, 49.0));
        assert_eq!(
            set_back.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );
    }

    #[test]
    fn test_set_back_unknown_position() {
        let params = NavCtrlParams::default();
        let persistant = NavPersistantData::default();
        let mut set_back = SetBack::new();

        let mut snap = Snapshot::default();
        run(&mut set_back, &snap, 10);
        assert_eq!(set_back.anchor_position_m(), None);

        // Anchor is taken on the first tick a position is known
        snap.position_m = Some(Point2::new(1.0, 1.0));
        run(&mut set_back, &snap, 16);
        assert_eq!(set_back.anchor_position_m(), Some(Point2::new(1.0, 1.0)));
        assert_eq!(
            set_back.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::Quicksand)
        );

        snap.position_m = None;
        assert_eq!(
            set_back.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );
    }
}
