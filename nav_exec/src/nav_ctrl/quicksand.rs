//! # [`NavMode::Quicksand`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use serde::Deserialize;

use super::{ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// Quicksand mode of the NavCtrl, spinning in place after reversing failed to move the rover.
///
/// Possible transitions:
/// - WallFollow, after spinning for long enough
#[derive(Debug, Clone, Default)]
pub struct Quicksand {
    /// Number of ticks spent spinning
    ticks: u32,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct QuicksandParams {
    pub spin_steer_deg: f64,

    pub spin_ticks: u32,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for QuicksandParams {
    fn default() -> Self {
        Self {
            spin_steer_deg: -15.0,
            spin_ticks: 150,
        }
    }
}

impl Quicksand {
    pub fn new() -> Self {
        Self { ticks: 0 }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        _snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        cmd.set_brake(0.0);
        cmd.set_steer(params.quicksand.spin_steer_deg);
        cmd.set_throttle(0.0);

        self.ticks += 1;
    }

    pub fn decide(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        _snapshot: &Snapshot,
    ) -> ModeAction {
        if self.ticks > params.quicksand.spin_ticks {
            ModeAction::Switch(NavModeKind::WallFollow)
        } else {
            ModeAction::Stay
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_quicksand_spin() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut qs = Quicksand::new();
        let mut cmd = ActuatorCmd::default();
        cmd.set_throttle(-2.0);
        let snap = Snapshot::default();

        for _ in 0..150 {
            qs.act(&params, &mut persistant, &snap, &mut cmd);
            assert_eq!(qs.decide(&params, &persistant, &snap), ModeAction::Stay);
        }
        assert_eq!(cmd.steer_deg(), -15.0);
        assert_eq!(cmd.throttle(), 0.0);

        qs.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(
            qs.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );
    }
}
