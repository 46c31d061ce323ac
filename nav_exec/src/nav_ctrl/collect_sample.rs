//! # [`NavMode::CollectSample`] implementation

// ------------------------------------------------------------------------------------------------
// IMPORTS
// ------------------------------------------------------------------------------------------------

use comms_if::eqpt::{actuator::ActuatorCmd, perception::Snapshot};
use serde::Deserialize;

use super::{ModeAction, NavCtrlParams, NavModeKind, NavPersistantData};

// ------------------------------------------------------------------------------------------------
// STRUCTS
// ------------------------------------------------------------------------------------------------

/// CollectSample mode of the NavCtrl, holding the rover still while the sample is picked up.
///
/// Possible transitions:
/// - WallFollow, once the sample is out of view and no pickup is in progress
#[derive(Debug, Clone, Default)]
pub struct CollectSample;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct CollectSampleParams {
    pub brake: f64,
}

// ------------------------------------------------------------------------------------------------
// IMPLS
// ------------------------------------------------------------------------------------------------

impl Default for CollectSampleParams {
    fn default() -> Self {
        Self { brake: 10.0 }
    }
}

impl CollectSample {
    pub fn new() -> Self {
        Self
    }

    pub fn act(
        &mut self,
        params: &NavCtrlParams,
        _persistant: &mut NavPersistantData,
        snapshot: &Snapshot,
        cmd: &mut ActuatorCmd,
    ) {
        cmd.set_brake(params.collect_sample.brake);

        // Only ask for a pickup while there's something in view to pick up
        cmd.set_pickup_request(snapshot.sees_sample);
    }

    pub fn decide(
        &mut self,
        _params: &NavCtrlParams,
        _persistant: &NavPersistantData,
        snapshot: &Snapshot,
    ) -> ModeAction {
        if !snapshot.sees_sample && !snapshot.picking_up {
            ModeAction::Switch(NavModeKind::WallFollow)
        } else {
            ModeAction::Stay
        }
    }
}

// ------------------------------------------------------------------------------------------------
// TESTS
// ------------------------------------------------------------------------------------------------

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_collect_sample() {
        let params = NavCtrlParams::default();
        let mut persistant = NavPersistantData::default();
        let mut collect = CollectSample::new();
        let mut cmd = ActuatorCmd::default();

        let mut snap = Snapshot {
            sees_sample: true,
            ..Default::default()
        };
        collect.act(&params, &mut persistant, &snap, &mut cmd);
        assert_eq!(cmd.brake(), 10.0);
        assert!(cmd.pickup_request());
        assert_eq!(collect.decide(&params, &persistant, &snap), ModeAction::Stay);

        // Pickup underway, sample no longer visible
        snap.sees_sample = false;
        snap.picking_up = true;
        collect.act(&params, &mut persistant, &snap, &mut cmd);
        assert!(!cmd.pickup_request());
        assert_eq!(collect.decide(&params, &persistant, &snap), ModeAction::Stay);

        snap.picking_up = false;
        assert_eq!(
            collect.decide(&params, &persistant, &snap),
            ModeAction::Switch(NavModeKind::WallFollow)
        );
    }
}
